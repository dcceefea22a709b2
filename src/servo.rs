use crate::{
    calibration::Calibration,
    constants::*,
    controller::{BoardError, ControllerBoard, SharedBoard},
    types::{clamp_angle, ErrorFlag, ErrorFlags},
};

// Every servo message goes through here so the `diagnostics` feature can drop them all.
macro_rules! diag {
    ($level:ident, $id:expr, $($arg:tt)+) => {
        if cfg!(feature = "diagnostics") {
            log::$level!(target: "servo", "Servo #{}: {}", $id, format_args!($($arg)+));
        }
    };
}

/// A hobby servo on one channel of a shared controller board.
///
/// Calibration is fixed at construction. Validation failures never abort;
/// they accumulate in [`Servo::error_code`] until cleared, and commands
/// against an invalid channel are dropped before they reach the board.
pub struct Servo<B: ControllerBoard> {
    board: SharedBoard<B>,
    // board units, already scaled from microseconds
    pulse_width_min: u16,
    pulse_width_max: u16,
    degree_range_min: f32,
    degree_range_max: f32,
    angle_min: f32,
    angle_max: f32,
    channel: u8,
    id: u32,
    error_flags: ErrorFlags,
}

impl<B: ControllerBoard> Servo<B> {
    pub(crate) fn new(board: SharedBoard<B>, calibration: Calibration, channel: u8, id: u32) -> Self {
        let scale = board.lock().pulse_scale();
        let (pulse_width_min, min_fits) = scale_pulse(calibration.min_us, scale);
        let (pulse_width_max, max_fits) = scale_pulse(calibration.max_us, scale);

        let mut servo = Servo {
            board,
            pulse_width_min,
            pulse_width_max,
            degree_range_min: calibration.degree_range_min,
            degree_range_max: calibration.degree_range_max,
            angle_min: calibration.angle_min,
            angle_max: calibration.angle_max,
            channel,
            id,
            error_flags: ErrorFlags::empty(),
        };

        if !(min_fits && max_fits) {
            servo.flag(ErrorFlag::PulseWidthConfig, "pulse width does not fit the board register");
        }
        servo.check_min_pulse_width();
        servo.check_max_pulse_width();
        servo.check_min_degree_range();
        servo.check_max_degree_range();
        servo.check_min_angle();
        servo.check_max_angle();
        servo.check_channel();
        servo
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn channel(&self) -> u8 {
        self.channel
    }

    /// Pulse width bounds in board units.
    pub fn pulse_width_range(&self) -> (u16, u16) {
        (self.pulse_width_min, self.pulse_width_max)
    }

    pub fn degree_range(&self) -> (f32, f32) {
        (self.degree_range_min, self.degree_range_max)
    }

    pub fn angle_range(&self) -> (f32, f32) {
        (self.angle_min, self.angle_max)
    }

    pub fn error_code(&self) -> ErrorFlags {
        self.error_flags
    }

    pub fn clear_error_code(&mut self) {
        self.error_flags.clear();
    }

    fn flag(&mut self, flag: ErrorFlag, msg: &str) {
        self.error_flags.insert(flag);
        diag!(warn, self.id, "{}", msg);
    }

    fn check_min_pulse_width(&mut self) {
        if self.pulse_width_min >= self.pulse_width_max {
            self.flag(ErrorFlag::PulseWidthConfig, "min pulse width not below max");
        }
    }

    fn check_max_pulse_width(&mut self) {
        if self.pulse_width_max <= self.pulse_width_min {
            self.flag(ErrorFlag::PulseWidthConfig, "max pulse width not above min");
        }
    }

    fn check_min_degree_range(&mut self) {
        if self.degree_range_min < 0.0 || self.degree_range_min > self.degree_range_max {
            self.flag(ErrorFlag::DegreeRangeConfig, "min degree range invalid");
        }
    }

    fn check_max_degree_range(&mut self) {
        if self.degree_range_max > MAX_DEGREE_RANGE || self.degree_range_max < self.degree_range_min {
            self.flag(ErrorFlag::DegreeRangeConfig, "max degree range invalid");
        }
    }

    fn check_min_angle(&mut self) {
        if self.angle_min < 0.0 || self.angle_min > self.angle_max || self.angle_min < self.degree_range_min {
            self.flag(ErrorFlag::AngleConfig, "min angle invalid");
        }
    }

    fn check_max_angle(&mut self) {
        if self.angle_max < 0.0 || self.angle_max < self.angle_min || self.angle_max > self.degree_range_max {
            self.flag(ErrorFlag::AngleConfig, "max angle invalid");
        }
    }

    fn check_channel(&mut self) {
        let channel_count = self.board.lock().channel_count();
        if self.channel >= channel_count {
            let msg = format!("channel {} invalid, board has {}", self.channel, channel_count);
            self.flag(ErrorFlag::ChannelConfig, &msg);
        }
    }

    /// Point-slope map from `[0, degree_range_max]` onto the pulse range.
    /// A zero-width degree range pins every angle to the minimum pulse.
    pub fn degrees_to_pulse_width(&self, degrees: f32) -> u16 {
        if self.degree_range_max == 0.0 {
            return self.pulse_width_min;
        }
        let span = f64::from(self.pulse_width_max) - f64::from(self.pulse_width_min);
        let pulse = span / f64::from(self.degree_range_max) * f64::from(degrees) + f64::from(self.pulse_width_min);
        pulse.round() as u16
    }

    /// Inverse of [`Servo::degrees_to_pulse_width`], exact only when the
    /// degree range starts at zero.
    pub fn pulse_width_to_degrees(&self, pulse_width: u16) -> f32 {
        let span = f64::from(self.pulse_width_max) - f64::from(self.pulse_width_min);
        if span == 0.0 {
            return self.degree_range_min;
        }
        let degrees = f64::from(self.degree_range_max) / span * (f64::from(pulse_width) - f64::from(self.pulse_width_min))
            + f64::from(self.degree_range_min);
        degrees as f32
    }

    fn read_degrees(&self) -> Option<f32> {
        if self.error_flags.contains(ErrorFlag::ChannelConfig) {
            diag!(debug, self.id, "bad channel, not reading position");
            return None;
        }
        let position = self.board.lock().get_position(self.channel);
        match position {
            Ok(pulse_width) => Some(self.pulse_width_to_degrees(pulse_width)),
            Err(e) => {
                diag!(error, self.id, "position read failed: {}", e);
                None
            }
        }
    }

    /// Current angle as reported by the board, or [`NO_READING`] when the
    /// channel is invalid or the board did not answer.
    pub fn current_degrees(&self) -> f32 {
        self.read_degrees().unwrap_or(NO_READING)
    }

    /// Moves to `degrees`, clamped into the angle range. Clamping sets
    /// `RotateClampedAboveMax` or `RotateClampedBelowMin` but the clamped
    /// command is still sent. Nothing is sent while the channel is invalid.
    pub fn rotate_to_degrees(&mut self, degrees: f32) {
        let (degrees, clamped) = clamp_angle(degrees, self.angle_min, self.angle_max);
        match clamped {
            Some(ErrorFlag::RotateClampedAboveMax) => {
                self.flag(ErrorFlag::RotateClampedAboveMax, "requested angle above max, clamped")
            }
            Some(flag) => self.flag(flag, "requested angle below min, clamped"),
            None => {}
        }

        let pulse_width = self.degrees_to_pulse_width(degrees);
        self.check_channel();
        if self.error_flags.contains(ErrorFlag::ChannelConfig) {
            diag!(debug, self.id, "bad channel, aborting rotate");
            return;
        }

        let result = self.board.lock().set_target(self.channel, pulse_width);
        if let Err(e) = result {
            diag!(error, self.id, "set target {} failed: {}", pulse_width, e);
        }
    }

    /// Moves by `delta` degrees from the board-reported position rounded to a
    /// whole degree. Skipped when no position can be read.
    pub fn rotate_by(&mut self, delta: f32) {
        let Some(current) = self.read_degrees() else {
            diag!(warn, self.id, "no position reading, rotate by {} skipped", delta);
            return;
        };
        self.rotate_to_degrees(current.round() + delta);
    }

    /// Sends every target in one command so the channels move together.
    ///
    /// The servos are expected on contiguous channels starting at
    /// `servos[0]`; a gap is only reported, and targets are still placed by
    /// position in the list. Angles are neither clamped nor flagged.
    pub fn set_multiple_targets(servos: &[&Servo<B>], degrees: &[f32]) -> Result<(), BoardError> {
        let Some(first) = servos.first() else {
            return Ok(());
        };

        for pair in servos.windows(2) {
            if u16::from(pair[0].channel) + 1 != u16::from(pair[1].channel) {
                diag!(
                    warn,
                    pair[0].id,
                    "channels not contiguous in set_multiple_targets: {} then {}",
                    pair[0].channel,
                    pair[1].channel
                );
            }
        }

        if servos.len() != degrees.len() {
            diag!(
                warn,
                first.id,
                "{} servos but {} angles, extra entries ignored",
                servos.len(),
                degrees.len()
            );
        }

        let targets: Vec<u16> = servos
            .iter()
            .zip(degrees)
            .map(|(servo, &degrees)| servo.degrees_to_pulse_width(degrees))
            .collect();

        first.board.lock().set_multi_target(first.channel, &targets)
    }
}

// Returns the scaled value and whether it fit.
fn scale_pulse(us: u16, scale: u16) -> (u16, bool) {
    match us.checked_mul(scale) {
        Some(pulse_width) => (pulse_width, true),
        None => (u16::MAX, false),
    }
}
