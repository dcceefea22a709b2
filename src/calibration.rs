use crate::constants::*;

/// Calibration of a single servo as given by the datasheet and bench tests.
///
/// Pulse widths are in microseconds here; the board's scale factor is applied
/// when a servo is built from this value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibration {
    pub min_us: u16,
    pub max_us: u16,
    /// Manufacturer rated range of motion.
    pub degree_range_min: f32,
    pub degree_range_max: f32,
    /// Range the servo actually tolerates, found experimentally.
    pub angle_min: f32,
    pub angle_max: f32,
}

impl Calibration {
    pub fn new(
        min_us: u16,
        max_us: u16,
        degree_range_min: f32,
        degree_range_max: f32,
        angle_min: f32,
        angle_max: f32,
    ) -> Self {
        Calibration {
            min_us,
            max_us,
            degree_range_min,
            degree_range_max,
            angle_min,
            angle_max,
        }
    }

    pub fn with_pulse_range(mut self, min_us: u16, max_us: u16) -> Self {
        self.min_us = min_us;
        self.max_us = max_us;
        self
    }

    pub fn with_degree_range(mut self, min: f32, max: f32) -> Self {
        self.degree_range_min = min;
        self.degree_range_max = max;
        self
    }

    pub fn with_angle_range(mut self, min: f32, max: f32) -> Self {
        self.angle_min = min;
        self.angle_max = max;
        self
    }
}

impl Default for Calibration {
    fn default() -> Self {
        Calibration::new(
            DEFAULT_MIN_US,
            DEFAULT_MAX_US,
            DEFAULT_MIN_ANGLE,
            DEFAULT_MAX_ANGLE,
            DEFAULT_MIN_ANGLE,
            DEFAULT_MAX_ANGLE,
        )
    }
}
