// SPDX-License-Identifier: MIT

use crate::codec::FieldWidths;
use crate::core::{FoxFormatterError, FoxFormatterResult};
use crate::fs::constant::*;
use crate::fs::types::{FoxSuperblock, OsId};

/// Format-time description of a volume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoxMeta {
    pub size_bytes: u64,
    pub block_size: u16,
    pub os_id: OsId,
    pub max_mounts: u16,
    pub widths: FieldWidths,
}

impl FoxMeta {
    pub fn new(size_bytes: u64) -> Self {
        Self::new_custom(
            size_bytes,
            FOXFS_DEFAULT_BLOCK_SIZE,
            OsId::Linux,
            FOXFS_DEFAULT_MAX_MOUNTS,
            FieldWidths::default(),
        )
    }

    pub fn new_custom(
        size_bytes: u64,
        block_size: u16,
        os_id: OsId,
        max_mounts: u16,
        widths: FieldWidths,
    ) -> Self {
        Self {
            size_bytes,
            block_size,
            os_id,
            max_mounts,
            widths,
        }
    }

    /// Rebuilds the format-time parameters of an existing volume.
    pub fn from_superblock(sb: &FoxSuperblock, size_bytes: u64) -> FoxFormatterResult<Self> {
        Ok(Self::new_custom(
            size_bytes,
            sb.block_size(),
            sb.os(),
            sb.max_mounts.get(),
            sb.field_widths()?,
        ))
    }

    pub fn block_count(&self) -> u64 {
        self.size_bytes / self.block_size as u64
    }

    pub fn validate(&self) -> FoxFormatterResult {
        crate::ensure!(
            self.block_size.is_power_of_two()
                && (FOXFS_MIN_BLOCK_SIZE..=FOXFS_MAX_BLOCK_SIZE).contains(&self.block_size),
            FoxFormatterError::Invalid("Block size must be a power of two in 512..=32768")
        );
        crate::ensure!(
            self.size_bytes >= self.block_size as u64,
            FoxFormatterError::Invalid("Volume smaller than one block")
        );
        Ok(())
    }
}
