mod calibration;
mod constants;
mod controller;
mod servo;
mod simulated;
mod types;

pub use calibration::Calibration;
pub use controller::{BoardError, ControllerBoard, ServoFactory, SharedBoard};
pub use servo::Servo;
pub use simulated::{BoardCommand, SimulatedBoard};
pub use types::{ErrorFlag, ErrorFlags};

// Re-export commonly used items
pub use constants::{MAESTRO_CHANNELS, MAESTRO_PULSE_SCALE, NO_READING};
