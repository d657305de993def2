// SPDX-License-Identifier: MIT
//! foxfs block-group descriptor

use alloc::vec;
use alloc::vec::Vec;

use bitflags::bitflags;

use crate::codec::{FieldValue, FieldWidths, PACKED_WIDTHS_SIZE, RecordKind};
use crate::core::{FoxCodecResult, FoxRecordError, FoxRecordResult};
use crate::fs::types::record::{FieldCursor, FoxRecord};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct BlockGroupFlags: u8 {
        /// Inode table and bitmap not initialized
        const INODE_UNINIT = 0x01;
        /// Block bitmap not initialized
        const BLOCK_UNINIT = 0x02;
        /// Inode table zeroed
        const INODE_ZEROED = 0x04;
    }
}

/// Per-block-group descriptor.
///
/// `widths_copy` mirrors the superblock configuration. It is never used to
/// resolve widths, only to detect drift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoxBlockGroupDesc {
    /// Block usage bitmap block
    pub block_bitmap: u64,
    /// First block of the inode table
    pub inode_table: u64,
    pub free_blocks: u64,
    pub free_inodes: u64,
    pub flags: BlockGroupFlags,
    pub widths_copy: [u8; PACKED_WIDTHS_SIZE],
}

impl FoxBlockGroupDesc {
    /// Creates a descriptor stamped with `widths`.
    pub fn new(
        block_bitmap: u64,
        inode_table: u64,
        free_blocks: u64,
        free_inodes: u64,
        widths: &FieldWidths,
    ) -> Self {
        Self {
            block_bitmap,
            inode_table,
            free_blocks,
            free_inodes,
            flags: BlockGroupFlags::empty(),
            widths_copy: widths.pack(),
        }
    }

    /// Compares the embedded configuration copy against the authoritative one.
    ///
    /// A copy holding an invalid width code fails with `InvalidWidthClass`; a
    /// valid but different copy fails with `ConfigurationDrift`.
    pub fn check_drift(&self, widths: &FieldWidths) -> FoxRecordResult {
        let copy = FieldWidths::load(&self.widths_copy)?;
        if copy != *widths {
            return Err(FoxRecordError::ConfigurationDrift {
                expected: widths.pack(),
                found: self.widths_copy,
            });
        }
        Ok(())
    }
}

impl FoxRecord for FoxBlockGroupDesc {
    const KIND: RecordKind = RecordKind::BlockGroup;

    fn from_fields(fields: Vec<FieldValue>) -> FoxCodecResult<Self> {
        let mut c = FieldCursor::new(fields, Self::schema().len())?;
        Ok(Self {
            block_bitmap: c.uint()?,
            inode_table: c.uint()?,
            free_blocks: c.uint()?,
            free_inodes: c.uint()?,
            flags: BlockGroupFlags::from_bits_retain(c.u8()?),
            widths_copy: c.blob()?,
        })
    }

    fn to_fields(&self) -> Vec<FieldValue> {
        vec![
            self.block_bitmap.into(),
            self.inode_table.into(),
            self.free_blocks.into(),
            self.free_inodes.into(),
            self.flags.bits().into(),
            FieldValue::Blob(self.widths_copy.to_vec()),
        ]
    }
}
