use crate::{calibration::Calibration, servo::Servo};
use parking_lot::Mutex;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    ChannelOutOfRange { channel: u8, channel_count: u8 },
    NotConnected,
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::ChannelOutOfRange { channel, channel_count } => {
                write!(f, "Channel {} out of range: board has {} channels", channel, channel_count)
            }
            BoardError::NotConnected => write!(f, "Controller board not connected"),
        }
    }
}

impl Error for BoardError {}

/// A multi-channel servo controller board.
///
/// Targets and positions are in the board's native pulse units, which are
/// `pulse_scale()` times finer than microseconds.
pub trait ControllerBoard {
    fn channel_count(&self) -> u8;

    fn pulse_scale(&self) -> u16;

    fn get_position(&mut self, channel: u8) -> Result<u16, BoardError>;

    fn set_target(&mut self, channel: u8, target: u16) -> Result<(), BoardError>;

    /// Sets `targets.len()` contiguous channels starting at `first_channel`.
    fn set_multi_target(&mut self, first_channel: u8, targets: &[u16]) -> Result<(), BoardError>;
}

/// One connection to the board, shared by every servo wired to it.
pub type SharedBoard<B> = Arc<Mutex<B>>;

/// Builds servos against a shared board and hands out their diagnostic ids.
pub struct ServoFactory<B: ControllerBoard> {
    board: SharedBoard<B>,
    next_id: u32,
}

impl<B: ControllerBoard> ServoFactory<B> {
    pub fn new(board: B) -> Self {
        Self::with_shared(Arc::new(Mutex::new(board)))
    }

    pub fn with_shared(board: SharedBoard<B>) -> Self {
        ServoFactory { board, next_id: 0 }
    }

    pub fn board(&self) -> &SharedBoard<B> {
        &self.board
    }

    /// Servo on `channel` with the default calibration.
    pub fn servo(&mut self, channel: u8) -> Servo<B> {
        self.build(Calibration::default(), channel)
    }

    /// Servo on `channel` with a custom pulse range and default degree ranges.
    pub fn servo_with_pulse_range(&mut self, min_us: u16, max_us: u16, channel: u8) -> Servo<B> {
        self.build(Calibration::default().with_pulse_range(min_us, max_us), channel)
    }

    /// Servo with a full calibration. Invalid values leave flags on the servo
    /// rather than failing.
    pub fn build(&mut self, calibration: Calibration, channel: u8) -> Servo<B> {
        let id = self.next_id;
        self.next_id += 1;
        Servo::new(Arc::clone(&self.board), calibration, channel, id)
    }
}
