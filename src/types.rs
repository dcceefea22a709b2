use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

/// A single validation failure recorded on a servo.
///
/// The discriminants are the bit positions used in [`ErrorFlags::bits`].
#[derive(Debug, Display, EnumIter, Clone, Copy, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum ErrorFlag {
    PulseWidthConfig = 0x01,
    DegreeRangeConfig = 0x02,
    AngleConfig = 0x04,
    ChannelConfig = 0x08,
    RotateClampedBelowMin = 0x10,
    RotateClampedAboveMax = 0x20,
}

impl ErrorFlag {
    pub const fn bit(self) -> u8 {
        self as u8
    }
}

/// Sticky set of [`ErrorFlag`]s. Flags only go away through [`ErrorFlags::clear`].
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash)]
pub struct ErrorFlags(u8);

impl ErrorFlags {
    pub const fn empty() -> Self {
        ErrorFlags(0)
    }

    /// Builds a set from raw bits, dropping bits that name no flag.
    pub fn from_bits_truncate(bits: u8) -> Self {
        let known = ErrorFlag::iter().fold(0, |acc, flag| acc | flag.bit());
        ErrorFlags(bits & known)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, flag: ErrorFlag) -> bool {
        self.0 & flag.bit() != 0
    }

    pub fn insert(&mut self, flag: ErrorFlag) {
        self.0 |= flag.bit();
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    /// Flags currently set, in bit order.
    pub fn iter(self) -> impl Iterator<Item = ErrorFlag> {
        ErrorFlag::iter().filter(move |&flag| self.contains(flag))
    }
}

impl From<ErrorFlag> for ErrorFlags {
    fn from(flag: ErrorFlag) -> Self {
        ErrorFlags(flag.bit())
    }
}

impl BitOr for ErrorFlag {
    type Output = ErrorFlags;

    fn bitor(self, rhs: ErrorFlag) -> ErrorFlags {
        ErrorFlags(self.bit() | rhs.bit())
    }
}

impl BitOr<ErrorFlag> for ErrorFlags {
    type Output = ErrorFlags;

    fn bitor(self, rhs: ErrorFlag) -> ErrorFlags {
        ErrorFlags(self.0 | rhs.bit())
    }
}

impl BitOrAssign<ErrorFlag> for ErrorFlags {
    fn bitor_assign(&mut self, rhs: ErrorFlag) {
        self.insert(rhs);
    }
}

impl fmt::Display for ErrorFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "none");
        }
        for (i, flag) in self.iter().enumerate() {
            if i > 0 {
                write!(f, " | ")?;
            }
            write!(f, "{}", flag)?;
        }
        Ok(())
    }
}

// Checks the upper bound first so an inverted range still resolves to one side.
pub(crate) fn clamp_angle(angle: f32, min: f32, max: f32) -> (f32, Option<ErrorFlag>) {
    if angle > max {
        (max, Some(ErrorFlag::RotateClampedAboveMax))
    } else if angle < min {
        (min, Some(ErrorFlag::RotateClampedBelowMin))
    } else {
        (angle, None)
    }
}
