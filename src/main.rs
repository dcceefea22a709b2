use env_logger::Env;
use sailbot_servo::{BoardCommand, Calibration, ServoFactory, SimulatedBoard};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let mut factory = ServoFactory::new(SimulatedBoard::default());

    let mut rudder = factory.servo(0);
    // sail winch jitters below 3 degrees
    let mut sail = factory.build(Calibration::new(500, 2500, 0.0, 200.0, 3.0, 200.0), 1);
    let mut trim_tab = factory.servo(2);
    let mut unplugged = factory.servo(9);

    rudder.rotate_to_degrees(90.0);
    rudder.rotate_by(-15.0);
    sail.rotate_to_degrees(0.0);
    trim_tab.rotate_to_degrees(270.0);
    unplugged.rotate_to_degrees(45.0);

    for servo in [&rudder, &sail, &trim_tab, &unplugged] {
        println!(
            "Servo #{} on channel {}: {:.1} degrees, flags: {}",
            servo.id(),
            servo.channel(),
            servo.current_degrees(),
            servo.error_code()
        );
    }

    sailbot_servo::Servo::set_multiple_targets(&[&rudder, &sail, &trim_tab], &[90.0, 100.0, 90.0])?;

    for command in factory.board().lock().commands() {
        match command {
            BoardCommand::SetTarget { channel, target } => {
                println!("set target: channel {} -> {}", channel, target)
            }
            BoardCommand::SetMultiTarget { first_channel, targets } => {
                println!("set multi target: from channel {} -> {:?}", first_channel, targets)
            }
        }
    }

    Ok(())
}
