// SPDX-License-Identifier: MIT

use foxio::prelude::*;
use log::debug;

use crate::core::{FoxFormatterError, FoxFormatterResult};
use crate::fs::constant::*;
use crate::fs::meta::FoxMeta;
use crate::fs::types::{FoxBlockGroupDesc, FoxRecord, FoxSuperblock};

/// Writes the fixed structures of a new volume.
///
/// Only the superblock has a fixed home; block-group descriptors are placed
/// by the caller through [`FoxFormatter::write_group_descriptor`].
pub struct FoxFormatter<'a, IO: FoxIO + ?Sized> {
    io: &'a mut IO,
    meta: &'a FoxMeta,
}

impl<'a, IO: FoxIO + ?Sized> FoxFormatter<'a, IO> {
    pub fn new(io: &'a mut IO, meta: &'a FoxMeta) -> Self {
        Self { io, meta }
    }

    /// Formats the volume.
    ///
    /// A full format zeroes the whole volume first; a quick one only clears
    /// the remainder of the first block.
    #[must_use = "format result must be checked for errors"]
    pub fn format(&mut self, full_format: bool) -> FoxFormatterResult {
        self.meta.validate()?;

        if full_format {
            let len = usize::try_from(self.meta.size_bytes)
                .map_err(|_| FoxFormatterError::Invalid("Volume too large to zero in one pass"))?;
            self.io.zero_fill(0, len)?;
        } else {
            let tail = self.meta.block_size as usize - FOXFS_SUPERBLOCK_SIZE;
            self.io
                .zero_fill(FOXFS_SUPERBLOCK_OFFSET + FOXFS_SUPERBLOCK_SIZE as u64, tail)?;
        }

        self.write_superblock()?;
        self.io.flush()?;
        debug!(
            "foxfs: formatted {} bytes, block_size={} widths [{}]",
            self.meta.size_bytes, self.meta.block_size, self.meta.widths
        );
        Ok(())
    }

    fn write_superblock(&mut self) -> FoxFormatterResult {
        let sb = FoxSuperblock::new(
            self.meta.block_size,
            self.meta.os_id,
            self.meta.max_mounts,
            &self.meta.widths,
        );
        self.io.write_struct(FOXFS_SUPERBLOCK_OFFSET, &sb)?;
        Ok(())
    }

    /// Writes a block-group descriptor stamped with the volume widths.
    ///
    /// Returns the descriptor size in bytes.
    pub fn write_group_descriptor(
        &mut self,
        offset: u64,
        block_bitmap: u64,
        inode_table: u64,
        free_blocks: u64,
        free_inodes: u64,
    ) -> FoxFormatterResult<usize> {
        crate::ensure!(
            offset >= self.meta.block_size as u64,
            FoxFormatterError::Invalid("Group descriptor overlaps the superblock block")
        );
        let size = FoxBlockGroupDesc::fixed_size(&self.meta.widths)?;
        crate::ensure!(
            offset
                .checked_add(size as u64)
                .is_some_and(|end| end <= self.meta.size_bytes),
            FoxFormatterError::Invalid("Group descriptor extends past the end of the volume")
        );
        let desc = FoxBlockGroupDesc::new(
            block_bitmap,
            inode_table,
            free_blocks,
            free_inodes,
            &self.meta.widths,
        );
        let bytes = desc.encode(&self.meta.widths)?;
        self.io.write_at(offset, &bytes)?;
        Ok(bytes.len())
    }
}
