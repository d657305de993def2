// SPDX-License-Identifier: MIT
//! On-disk structures of the foxfs filesystem.
//!
//! Integer fields of most records have a byte width chosen per volume at
//! format time. The widths are stored packed in the superblock and every
//! record is described by a schema that the generic codec walks.

#![cfg_attr(not(feature = "std"), no_std)]

#[macro_use]
extern crate alloc;

// Core Modules
pub mod codec;
pub mod core;
pub mod fs;

pub mod prelude {
    pub use crate::codec::{
        FieldCategory, FieldDescriptor, FieldValue, FieldWidths, PACKED_WIDTHS_SIZE, RecordKind,
        WidthClass, schema_for,
    };
    pub use crate::core::errors::*;
    pub use crate::core::report::*;
    pub use crate::fs::constant::*;
    pub use crate::fs::types::*;
    pub use crate::fs::{DirListing, FoxChecker, FoxFormatter, FoxMeta, FoxVolume};
}
