// SPDX-License-Identifier: MIT
//! Volume field-width configuration.
//!
//! Packed layout (6 bytes, little-endian nibble order): the code of category `i`
//! lives in byte `i / 2`, in the low nibble when `i` is even and in the high
//! nibble when `i` is odd. The high nibble of the last byte is reserved: it is
//! written as zero and ignored on load.

use core::fmt;

use crate::codec::{CATEGORY_COUNT, FieldCategory, WidthClass};
use crate::core::{FoxCodecError, FoxCodecResult};

/// Size in bytes of the packed configuration (11 nibbles rounded up).
pub const PACKED_WIDTHS_SIZE: usize = CATEGORY_COUNT.div_ceil(2);

/// One width class per field category.
///
/// Built once per mount (or at format time) and never mutated afterwards.
/// `Copy` and free of interior mutability, so it can be shared across threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldWidths {
    classes: [WidthClass; CATEGORY_COUNT],
}

impl FieldWidths {
    pub const fn new(classes: [WidthClass; CATEGORY_COUNT]) -> Self {
        Self { classes }
    }

    /// Every category resolved to the same width class.
    pub const fn uniform(class: WidthClass) -> Self {
        Self::new([class; CATEGORY_COUNT])
    }

    /// Decodes and validates a packed configuration.
    ///
    /// Fails on the first slot holding a code outside the width-class table,
    /// naming its category.
    pub fn load(raw: &[u8; PACKED_WIDTHS_SIZE]) -> FoxCodecResult<Self> {
        let codes = Self::unpack(raw);
        let mut classes = [WidthClass::U8; CATEGORY_COUNT];
        for (cat, (slot, code)) in FieldCategory::ALL
            .into_iter()
            .zip(classes.iter_mut().zip(codes))
        {
            *slot = WidthClass::from_code(code).ok_or(FoxCodecError::InvalidWidthClass {
                code,
                category: Some(cat),
            })?;
        }
        Ok(Self { classes })
    }

    /// Splits the packed bytes into raw 4-bit codes, without validation.
    pub fn unpack(raw: &[u8; PACKED_WIDTHS_SIZE]) -> [u8; CATEGORY_COUNT] {
        core::array::from_fn(|i| {
            let byte = raw[i / 2];
            if i % 2 == 0 { byte & 0x0F } else { byte >> 4 }
        })
    }

    pub fn pack(&self) -> [u8; PACKED_WIDTHS_SIZE] {
        let mut raw = [0u8; PACKED_WIDTHS_SIZE];
        for (i, class) in self.classes.iter().enumerate() {
            let code = class.code() & 0x0F;
            raw[i / 2] |= if i % 2 == 0 { code } else { code << 4 };
        }
        raw
    }

    #[inline]
    pub const fn class(&self, category: FieldCategory) -> WidthClass {
        self.classes[category.index()]
    }

    /// Resolved byte width of `category`.
    #[inline]
    pub const fn category_width(&self, category: FieldCategory) -> usize {
        self.class(category).bytes()
    }

    /// Returns a copy with `category` set to `class`. Format-time construction only.
    #[must_use]
    pub const fn with(mut self, category: FieldCategory, class: WidthClass) -> Self {
        self.classes[category.index()] = class;
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldCategory, WidthClass)> + '_ {
        FieldCategory::ALL.into_iter().zip(self.classes.iter().copied())
    }
}

impl Default for FieldWidths {
    fn default() -> Self {
        Self::new([
            WidthClass::U32, // block
            WidthClass::U8,  // namelen
            WidthClass::U16, // nlink
            WidthClass::U64, // locsize
            WidthClass::U64, // date
            WidthClass::U32, // uid
            WidthClass::U32, // gid
            WidthClass::U16, // devmin
            WidthClass::U16, // devmaj
            WidthClass::U32, // flags
            WidthClass::U32, // inode
        ])
    }
}

impl fmt::Display for FieldWidths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (cat, class)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{cat}={}", class.bytes())?;
        }
        Ok(())
    }
}
