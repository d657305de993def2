// SPDX-License-Identifier: MIT
//! Width resolution table: width-class code -> byte count.

use core::fmt;

use crate::core::{FoxCodecError, FoxCodecResult};

/// Byte counts selectable by a width class, indexed by class code.
pub const WIDTH_CLASS_BYTES: [usize; 6] = [1, 2, 3, 4, 6, 8];

/// A validated width class.
///
/// The on-disk code is the discriminant; see [`WIDTH_CLASS_BYTES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum WidthClass {
    U8 = 0,
    U16 = 1,
    U24 = 2,
    U32 = 3,
    U48 = 4,
    U64 = 5,
}

impl WidthClass {
    pub const ALL: [WidthClass; 6] = [
        WidthClass::U8,
        WidthClass::U16,
        WidthClass::U24,
        WidthClass::U32,
        WidthClass::U48,
        WidthClass::U64,
    ];

    #[inline]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(WidthClass::U8),
            1 => Some(WidthClass::U16),
            2 => Some(WidthClass::U24),
            3 => Some(WidthClass::U32),
            4 => Some(WidthClass::U48),
            5 => Some(WidthClass::U64),
            _ => None,
        }
    }

    /// Reverse lookup from a byte count (host-side configuration speaks bytes).
    pub fn from_bytes(bytes: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.bytes() == bytes)
    }

    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    #[inline]
    pub const fn bytes(self) -> usize {
        WIDTH_CLASS_BYTES[self as usize]
    }

    /// Largest value representable in this width.
    #[inline]
    pub const fn max_value(self) -> u64 {
        max_for_width(self.bytes())
    }
}

impl fmt::Display for WidthClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "u{}", self.bytes() * 8)
    }
}

/// Resolves a raw width-class code to its byte count.
#[inline]
pub fn resolve(code: u8) -> FoxCodecResult<usize> {
    WidthClass::from_code(code)
        .map(WidthClass::bytes)
        .ok_or(FoxCodecError::InvalidWidthClass {
            code,
            category: None,
        })
}

#[inline]
pub(crate) const fn max_for_width(width: usize) -> u64 {
    if width >= 8 {
        u64::MAX
    } else {
        (1u64 << (width * 8)) - 1
    }
}
