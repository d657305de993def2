// SPDX-License-Identifier: MIT
//! Mounted view of a foxfs volume.
//!
//! The volume owns nothing but the superblock and the loaded field widths.
//! Every record offset is supplied by the caller.

use alloc::vec;
use alloc::vec::Vec;

use foxio::prelude::*;
use log::{debug, warn};

use crate::codec::{FieldCategory, FieldWidths};
use crate::core::{FoxMountError, FoxMountResult, FoxRecordError, FoxRecordResult};
use crate::fs::constant::*;
use crate::fs::types::*;

const READ_ONLY: FoxRecordError = FoxRecordError::Other("Volume is opened read-only");

pub struct FoxVolume<'io, IO: FoxIO + ?Sized> {
    io: &'io mut IO,
    superblock: FoxSuperblock,
    widths: FieldWidths,
    read_only: bool,
}

impl<'io, IO: FoxIO + ?Sized> FoxVolume<'io, IO> {
    /// Mounts read-write: bumps the mount count and marks the volume mounted.
    pub fn mount(io: &'io mut IO) -> FoxMountResult<Self> {
        let mut vol = Self::load(io, false)?;

        let count = vol.superblock.mount_count.get().saturating_add(1);
        vol.superblock.mount_count.set(count);
        vol.superblock
            .set_state(vol.superblock.state() | FsState::MOUNTED);
        vol.store_superblock()?;

        if vol.superblock.needs_check() {
            warn!(
                "foxfs: mounted {count} times (max {}), check recommended",
                vol.superblock.max_mounts.get()
            );
        }
        Ok(vol)
    }

    /// Validates the volume without writing anything back.
    pub fn open_read_only(io: &'io mut IO) -> FoxMountResult<Self> {
        Self::load(io, true)
    }

    fn load(io: &'io mut IO, read_only: bool) -> FoxMountResult<Self> {
        let mut raw = [0u8; FOXFS_SUPERBLOCK_SIZE];
        io.read_at(FOXFS_SUPERBLOCK_OFFSET, &mut raw)?;
        let superblock = FoxSuperblock::decode(&raw)?;

        let (major, minor) = superblock.version();
        if major != FOXFS_VERSION_MAJOR {
            return Err(FoxMountError::UnsupportedVersion { major, minor });
        }

        let widths = superblock.field_widths()?;
        let state = superblock.state();
        if state.contains(FsState::ERRORS) {
            warn!("foxfs: volume marked with errors");
        }
        if state.contains(FsState::MOUNTED) && !read_only {
            warn!("foxfs: volume was not cleanly unmounted");
        }
        debug!(
            "foxfs: v{major}.{minor} block_size={} widths [{widths}]",
            superblock.block_size()
        );

        Ok(Self {
            io,
            superblock,
            widths,
            read_only,
        })
    }

    fn store_superblock(&mut self) -> FoxIOResult {
        self.io
            .write_struct(FOXFS_SUPERBLOCK_OFFSET, &self.superblock)?;
        self.io.flush()
    }

    /// Clears the mounted state. No-op for read-only volumes.
    pub fn unmount(mut self) -> FoxMountResult {
        if self.read_only {
            return Ok(());
        }
        self.superblock
            .set_state(self.superblock.state() - FsState::MOUNTED);
        self.store_superblock()?;
        debug!("foxfs: unmounted");
        Ok(())
    }

    pub fn superblock(&self) -> &FoxSuperblock {
        &self.superblock
    }

    pub fn widths(&self) -> &FieldWidths {
        &self.widths
    }

    pub fn block_size(&self) -> u16 {
        self.superblock.block_size()
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Reads one fixed-size record at `offset`.
    pub fn read_record<R: FoxRecord>(&mut self, offset: u64) -> FoxRecordResult<R> {
        let size = R::fixed_size(&self.widths)?;
        let mut buf = vec![0u8; size];
        self.io.read_at(offset, &mut buf)?;
        let (record, _) = R::decode(&buf, 0, &self.widths)?;
        Ok(record)
    }

    /// Writes one record at `offset`; returns the number of bytes written.
    pub fn write_record<R: FoxRecord>(&mut self, offset: u64, record: &R) -> FoxRecordResult<usize> {
        crate::ensure!(!self.read_only, READ_ONLY);
        let bytes = record.encode(&self.widths)?;
        self.io.write_at(offset, &bytes)?;
        Ok(bytes.len())
    }

    /// Reads a block-group descriptor and checks its width copy against the superblock.
    pub fn read_block_group(&mut self, offset: u64) -> FoxRecordResult<FoxBlockGroupDesc> {
        let desc: FoxBlockGroupDesc = self.read_record(offset)?;
        if let Err(e) = desc.check_drift(&self.widths) {
            warn!("foxfs: block group at {offset:#x}: {e}");
            return Err(e);
        }
        Ok(desc)
    }

    pub fn read_inode(&mut self, offset: u64) -> FoxRecordResult<FoxInode> {
        self.read_record(offset)
    }

    pub fn write_inode(&mut self, offset: u64, inode: &FoxInode) -> FoxRecordResult<usize> {
        self.write_record(offset, inode)
    }

    /// Reads `len` bytes of packed directory entries at `offset`.
    pub fn read_dir_entries(&mut self, offset: u64, len: usize) -> FoxRecordResult<DirListing> {
        let mut buf = vec![0u8; len];
        self.io.read_at(offset, &mut buf)?;
        Ok(DirListing {
            buf,
            widths: self.widths,
        })
    }

    /// Writes `entries` followed by a zero name-length terminator.
    ///
    /// Returns the number of bytes written, terminator included.
    pub fn write_dir_entries(
        &mut self,
        offset: u64,
        entries: &[FoxDirEntry],
    ) -> FoxRecordResult<usize> {
        crate::ensure!(!self.read_only, READ_ONLY);
        let mut bytes = encode_dir_entries(entries, &self.widths)?;
        let terminator = self.widths.category_width(FieldCategory::NameLen);
        bytes.resize(bytes.len() + terminator, 0);
        self.io.write_at(offset, &bytes)?;
        Ok(bytes.len())
    }
}

/// Raw directory bytes read from a volume.
#[derive(Debug, Clone)]
pub struct DirListing {
    buf: Vec<u8>,
    widths: FieldWidths,
}

impl DirListing {
    pub fn iter(&self) -> DirEntryIter<'_> {
        DirEntryIter::new(&self.buf, &self.widths)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }
}

impl<'a> IntoIterator for &'a DirListing {
    type Item = <DirEntryIter<'a> as Iterator>::Item;
    type IntoIter = DirEntryIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
