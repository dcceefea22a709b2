use log::{Log, Metadata, Record};
use parking_lot::{const_mutex, Mutex};
use sailbot_servo::{Servo, ServoFactory, SimulatedBoard};

static LINES: Mutex<Vec<String>> = const_mutex(Vec::new());

struct Capture;

impl Log for Capture {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.target() == "servo"
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            LINES.lock().push(format!("{}", record.args()));
        }
    }

    fn flush(&self) {}
}

static LOGGER: Capture = Capture;

// Single test in this binary so the global logger sees only these servos.
#[test]
fn diagnostics_are_tagged_with_servo_id() {
    log::set_logger(&LOGGER).unwrap();
    log::set_max_level(log::LevelFilter::Trace);

    let mut factory = ServoFactory::new(SimulatedBoard::default());
    let _spare = factory.servo(0);
    let a = factory.servo(2);
    let b = factory.servo(4);
    let mut broken = factory.servo(8);

    Servo::set_multiple_targets(&[&a, &b], &[10.0, 20.0]).unwrap();
    broken.rotate_to_degrees(90.0);

    // the batch still went out despite the gap
    assert_eq!(factory.board().lock().commands().len(), 1);

    let lines = LINES.lock().clone();
    if cfg!(feature = "diagnostics") {
        assert!(lines.iter().any(|l| l.starts_with("Servo #1: channels not contiguous")), "{:?}", lines);
        assert!(lines.iter().any(|l| l.starts_with("Servo #3: channel 8 invalid")), "{:?}", lines);
        assert!(lines.iter().any(|l| l.starts_with("Servo #3: bad channel, aborting rotate")), "{:?}", lines);
        assert!(lines.iter().all(|l| !l.starts_with("Servo #0")), "{:?}", lines);
    } else {
        assert!(lines.is_empty(), "{:?}", lines);
    }
}
