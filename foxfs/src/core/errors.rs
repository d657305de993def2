// SPDX-License-Identifier: MIT

use core::fmt;

pub use foxio::errors::*;

use crate::codec::{FieldCategory, PACKED_WIDTHS_SIZE};

/// Errors raised by the structure codec and by width-configuration loading.
///
/// These are local to one record: the caller decides whether to skip, retry or abort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoxCodecError {
    /// A width-class code outside `0..=5`. `category` is set when the code came
    /// from a field-width configuration slot.
    InvalidWidthClass {
        code: u8,
        category: Option<FieldCategory>,
    },
    /// A descriptor (or its stream payload) reads past the end of the buffer.
    BufferTruncated {
        offset: usize,
        needed: usize,
        available: usize,
    },
    /// An integer does not fit the resolved byte width of its field.
    ValueOutOfRange { index: usize, value: u64, width: usize },
    FieldCountMismatch { expected: usize, got: usize },
    FieldKindMismatch { index: usize },
    BlobLengthMismatch {
        index: usize,
        expected: usize,
        got: usize,
    },
    /// The schema contains a stream-length field and has no fixed byte size.
    Unsized,
}

impl FoxCodecError {
    pub fn msg(&self) -> &'static str {
        match self {
            FoxCodecError::InvalidWidthClass { .. } => "Invalid width class",
            FoxCodecError::BufferTruncated { .. } => "Buffer truncated",
            FoxCodecError::ValueOutOfRange { .. } => "Value out of range for field width",
            FoxCodecError::FieldCountMismatch { .. } => "Field count does not match schema",
            FoxCodecError::FieldKindMismatch { .. } => "Field value does not match descriptor",
            FoxCodecError::BlobLengthMismatch { .. } => "Blob length does not match descriptor",
            FoxCodecError::Unsized => "Schema has no fixed size",
        }
    }
}

impl fmt::Display for FoxCodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FoxCodecError::InvalidWidthClass {
                code,
                category: Some(cat),
            } => write!(f, "{}: code {code} for category '{cat}'", self.msg()),
            FoxCodecError::InvalidWidthClass { code, category: None } => {
                write!(f, "{}: code {code}", self.msg())
            }
            FoxCodecError::BufferTruncated {
                offset,
                needed,
                available,
            } => write!(
                f,
                "{}: need {needed} bytes at offset {offset}, {available} available",
                self.msg()
            ),
            FoxCodecError::ValueOutOfRange {
                index,
                value,
                width,
            } => write!(
                f,
                "{}: field #{index} value {value} exceeds {width} byte(s)",
                self.msg()
            ),
            FoxCodecError::FieldCountMismatch { expected, got } => {
                write!(f, "{}: expected {expected}, got {got}", self.msg())
            }
            FoxCodecError::FieldKindMismatch { index } => {
                write!(f, "{}: field #{index}", self.msg())
            }
            FoxCodecError::BlobLengthMismatch {
                index,
                expected,
                got,
            } => write!(
                f,
                "{}: field #{index} expected {expected} bytes, got {got}",
                self.msg()
            ),
            FoxCodecError::Unsized => write!(f, "{}", self.msg()),
        }
    }
}

/// Errors that abort a mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoxMountError {
    IO(FoxIOError),
    Codec(FoxCodecError),
    SignatureMismatch { found: [u8; 8] },
    UnsupportedVersion { major: u16, minor: u16 },
    Other(&'static str),
}

impl FoxMountError {
    pub fn msg(&self) -> &'static str {
        match self {
            FoxMountError::IO(_) => "IO error",
            FoxMountError::Codec(_) => "Invalid field-width configuration",
            FoxMountError::SignatureMismatch { .. } => "Superblock signature mismatch",
            FoxMountError::UnsupportedVersion { .. } => "Unsupported foxfs version",
            FoxMountError::Other(msg) => msg,
        }
    }

    pub fn source(&self) -> Option<FoxError> {
        match self {
            FoxMountError::IO(e) => Some(FoxError::IO(*e)),
            FoxMountError::Codec(e) => Some(FoxError::Codec(*e)),
            _ => None,
        }
    }
}

impl fmt::Display for FoxMountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FoxMountError::SignatureMismatch { found } => {
                write!(f, "{}: found {:02X?}", self.msg(), found)?
            }
            FoxMountError::UnsupportedVersion { major, minor } => {
                write!(f, "{}: {major}.{minor}", self.msg())?
            }
            _ => write!(f, "{}", self.msg())?,
        }
        write_chain(f, self.source())
    }
}

/// Errors local to one structural record read or written through a volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoxRecordError {
    IO(FoxIOError),
    Codec(FoxCodecError),
    /// A block-group descriptor's embedded width configuration disagrees with the superblock.
    ConfigurationDrift {
        expected: [u8; PACKED_WIDTHS_SIZE],
        found: [u8; PACKED_WIDTHS_SIZE],
    },
    Other(&'static str),
}

impl FoxRecordError {
    pub fn msg(&self) -> &'static str {
        match self {
            FoxRecordError::IO(_) => "IO error",
            FoxRecordError::Codec(_) => "Codec error",
            FoxRecordError::ConfigurationDrift { .. } => "Field-width configuration drift",
            FoxRecordError::Other(msg) => msg,
        }
    }

    pub fn source(&self) -> Option<FoxError> {
        match self {
            FoxRecordError::IO(e) => Some(FoxError::IO(*e)),
            FoxRecordError::Codec(e) => Some(FoxError::Codec(*e)),
            _ => None,
        }
    }
}

impl fmt::Display for FoxRecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FoxRecordError::ConfigurationDrift { expected, found } => write!(
                f,
                "{}: superblock {:02X?}, descriptor {:02X?}",
                self.msg(),
                expected,
                found
            )?,
            _ => write!(f, "{}", self.msg())?,
        }
        write_chain(f, self.source())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoxFormatterError {
    IO(FoxIOError),
    Codec(FoxCodecError),
    Invalid(&'static str),
    Other(&'static str),
}

impl FoxFormatterError {
    pub fn msg(&self) -> &'static str {
        match self {
            FoxFormatterError::IO(_) => "IO error",
            FoxFormatterError::Codec(_) => "Codec error",
            FoxFormatterError::Invalid(msg) => msg,
            FoxFormatterError::Other(msg) => msg,
        }
    }

    pub fn source(&self) -> Option<FoxError> {
        match self {
            FoxFormatterError::IO(e) => Some(FoxError::IO(*e)),
            FoxFormatterError::Codec(e) => Some(FoxError::Codec(*e)),
            _ => None,
        }
    }
}

impl fmt::Display for FoxFormatterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.msg())?;
        write_chain(f, self.source())
    }
}

/// Top-level error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoxError {
    IO(FoxIOError),
    Codec(FoxCodecError),
    Mount(FoxMountError),
    Record(FoxRecordError),
    Formatter(FoxFormatterError),
    Other(&'static str),
}

impl fmt::Display for FoxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FoxError::IO(e) => write!(f, "{e}"),
            FoxError::Codec(e) => write!(f, "{e}"),
            FoxError::Mount(e) => write!(f, "{e}"),
            FoxError::Record(e) => write!(f, "{e}"),
            FoxError::Formatter(e) => write!(f, "{e}"),
            FoxError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl FoxError {
    pub fn msg(&self) -> &'static str {
        match self {
            FoxError::IO(e) => e.msg(),
            FoxError::Codec(e) => e.msg(),
            FoxError::Mount(e) => e.msg(),
            FoxError::Record(e) => e.msg(),
            FoxError::Formatter(e) => e.msg(),
            FoxError::Other(msg) => msg,
        }
    }

    pub fn source(&self) -> Option<FoxError> {
        match self {
            FoxError::Mount(e) => e.source(),
            FoxError::Record(e) => e.source(),
            FoxError::Formatter(e) => e.source(),
            FoxError::IO(_) | FoxError::Codec(_) | FoxError::Other(_) => None,
        }
    }
}

fn write_chain(f: &mut fmt::Formatter<'_>, mut current: Option<FoxError>) -> fmt::Result {
    while let Some(src) = current {
        write!(f, "\n  caused by: {src}")?;
        current = src.source();
    }
    Ok(())
}

#[cfg(feature = "std")]
impl std::error::Error for FoxCodecError {}
#[cfg(feature = "std")]
impl std::error::Error for FoxMountError {}
#[cfg(feature = "std")]
impl std::error::Error for FoxRecordError {}
#[cfg(feature = "std")]
impl std::error::Error for FoxFormatterError {}
#[cfg(feature = "std")]
impl std::error::Error for FoxError {}

// === type Fox*Result ===

pub type FoxResult<T = ()> = Result<T, FoxError>;
pub type FoxCodecResult<T = ()> = Result<T, FoxCodecError>;
pub type FoxMountResult<T = ()> = Result<T, FoxMountError>;
pub type FoxRecordResult<T = ()> = Result<T, FoxRecordError>;
pub type FoxFormatterResult<T = ()> = Result<T, FoxFormatterError>;

crate::impl_error_from! {
    FoxIOError        => FoxError::IO,
    FoxCodecError     => FoxError::Codec,
    FoxMountError     => FoxError::Mount,
    FoxRecordError    => FoxError::Record,
    FoxFormatterError => FoxError::Formatter,

    FoxIOError    => FoxMountError::IO,
    FoxIOError    => FoxRecordError::IO,
    FoxIOError    => FoxFormatterError::IO,
    FoxCodecError => FoxMountError::Codec,
    FoxCodecError => FoxRecordError::Codec,
    FoxCodecError => FoxFormatterError::Codec,
}

crate::impl_error_from_msg!(FoxError, FoxMountError, FoxRecordError, FoxFormatterError);

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;

    #[test]
    fn test_error_chain_display() {
        let low = FoxCodecError::InvalidWidthClass {
            code: 9,
            category: Some(FieldCategory::Uid),
        };
        let top: FoxError = FoxMountError::from(low).into();

        let text = top.to_string();
        assert!(text.starts_with("Invalid field-width configuration"));
        assert!(text.contains("caused by: Invalid width class: code 9 for category 'uid'"));
    }

    #[test]
    fn test_str_into_other() {
        let e: FoxRecordError = "boom".into();
        assert_eq!(e, FoxRecordError::Other("boom"));
        assert_eq!(e.msg(), "boom");
    }
}
