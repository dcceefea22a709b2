// Defaults taken from the HS-422 datasheet (0-180 degrees, 500-2500us)
pub const DEFAULT_MIN_US: u16 = 500;
pub const DEFAULT_MAX_US: u16 = 2500;
pub const DEFAULT_MIN_ANGLE: f32 = 0.0;
pub const DEFAULT_MAX_ANGLE: f32 = 180.0;

// Upper bound for any manufacturer degree range
pub const MAX_DEGREE_RANGE: f32 = 360.0;

// Mini Maestro 8-channel board
pub const MAESTRO_CHANNELS: u8 = 8;
pub const MAESTRO_PULSE_SCALE: u16 = 4;

/// Returned by `Servo::current_degrees` when no reading is available.
pub const NO_READING: f32 = -1.0;
