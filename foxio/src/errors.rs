// SPDX-License-Identifier: MIT

use core::fmt;

/// Result type for FoxIO operations.
pub type FoxIOResult<T = ()> = core::result::Result<T, FoxIOError>;

/// Error type for FoxIO operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoxIOError {
    Other(&'static str),
    OutOfBounds,
    Unsupported,
}

impl FoxIOError {
    pub fn msg(&self) -> &'static str {
        match self {
            FoxIOError::Other(msg) => msg,
            FoxIOError::OutOfBounds => "Out of bounds",
            FoxIOError::Unsupported => "Unsupported operation",
        }
    }
}

impl From<&'static str> for FoxIOError {
    #[inline]
    fn from(msg: &'static str) -> Self {
        FoxIOError::Other(msg)
    }
}

impl fmt::Display for FoxIOError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.msg())
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FoxIOError {}
