//! Errors reported by the curve interface.
//!
//! Only decoding of externally provided point encodings can fail; the
//! arithmetic itself has no failure path (in particular, inversion of
//! zero yields zero).

use core::fmt;
use core::fmt::Display;

/// Decoding failures for marshaled points.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Error {
    /// The encoded point does not have the expected length in bytes.
    InvalidLength {
        expected: usize,
        actual: usize,
    },
    /// The leading tag byte is not the uncompressed-point tag (0x04).
    InvalidTag(u8),
    /// A coordinate is not lower than the field modulus.
    CoordinateOutOfRange,
    /// The decoded coordinates do not fulfill the curve equation.
    NotOnCurve,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::InvalidLength { expected, actual }
                => write!(f, "encoded point must be {} bytes in length, got {}",
                    expected, actual),
            Error::InvalidTag(tag)
                => write!(f, "unsupported point encoding tag 0x{:02X}", tag),
            Error::CoordinateOutOfRange
                => write!(f, "point coordinate is not lower than the field modulus"),
            Error::NotOnCurve
                => write!(f, "point is not on the curve"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Result type for fallible curve operations.
pub type Result<T> = core::result::Result<T, Error>;
