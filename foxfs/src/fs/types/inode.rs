// SPDX-License-Identifier: MIT
//! foxfs inode

use alloc::vec::Vec;

use crate::codec::{FieldValue, RecordKind};
use crate::core::FoxCodecResult;
use crate::fs::constant::*;
use crate::fs::types::record::{FieldCursor, FoxRecord};

/// File type encoded in the high nibble of the inode mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Fifo,
    CharDevice,
    Directory,
    BlockDevice,
    Regular,
    Symlink,
    Socket,
}

impl FileType {
    pub const fn from_mode(mode: u16) -> Option<Self> {
        match mode & FOXFS_S_IFMT {
            FOXFS_S_IFIFO => Some(FileType::Fifo),
            FOXFS_S_IFCHR => Some(FileType::CharDevice),
            FOXFS_S_IFDIR => Some(FileType::Directory),
            FOXFS_S_IFBLK => Some(FileType::BlockDevice),
            FOXFS_S_IFREG => Some(FileType::Regular),
            FOXFS_S_IFLNK => Some(FileType::Symlink),
            FOXFS_S_IFSOCK => Some(FileType::Socket),
            _ => None,
        }
    }

    pub const fn mode_bits(self) -> u16 {
        match self {
            FileType::Fifo => FOXFS_S_IFIFO,
            FileType::CharDevice => FOXFS_S_IFCHR,
            FileType::Directory => FOXFS_S_IFDIR,
            FileType::BlockDevice => FOXFS_S_IFBLK,
            FileType::Regular => FOXFS_S_IFREG,
            FileType::Symlink => FOXFS_S_IFLNK,
            FileType::Socket => FOXFS_S_IFSOCK,
        }
    }
}

/// foxfs inode.
///
/// Field widths other than `mode` and `links` are chosen per volume; values are
/// held as `u64` and range-checked on encode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FoxInode {
    pub mode: u16,
    pub uid: u64,
    pub gid: u64,
    /// Size in bytes
    pub size: u64,
    /// Number of blocks in use
    pub blocks: u64,
    pub atime: u64,
    pub ctime: u64,
    pub mtime: u64,
    pub dtime: u64,
    /// Hard link count
    pub links: u16,
    pub flags: u64,
    pub direct: [u64; FOXFS_DIRECT_BLOCKS],
    /// Single, double and triple indirect blocks
    pub indirect: [u64; FOXFS_INDIRECT_LEVELS],
    /// Alternate data stream directory
    pub ads_dir: u64,
}

impl FoxInode {
    pub fn new(file_type: FileType, permissions: u16) -> Self {
        Self {
            mode: file_type.mode_bits() | (permissions & !FOXFS_S_IFMT),
            links: 1,
            ..Default::default()
        }
    }

    pub fn file_type(&self) -> Option<FileType> {
        FileType::from_mode(self.mode)
    }

    pub fn permissions(&self) -> u16 {
        self.mode & !FOXFS_S_IFMT
    }

    pub fn is_dir(&self) -> bool {
        self.file_type() == Some(FileType::Directory)
    }

    pub fn is_file(&self) -> bool {
        self.file_type() == Some(FileType::Regular)
    }

    /// Deleted inodes carry a non-zero deletion time.
    pub fn is_deleted(&self) -> bool {
        self.dtime != 0
    }

    /// Data pointer `i`: `0..10` direct, `10..13` indirect levels.
    pub fn block_pointer(&self, i: usize) -> Option<u64> {
        match i {
            0..FOXFS_DIRECT_BLOCKS => Some(self.direct[i]),
            FOXFS_DIRECT_BLOCKS..FOXFS_DATA_POINTERS => {
                Some(self.indirect[i - FOXFS_DIRECT_BLOCKS])
            }
            _ => None,
        }
    }

    pub fn set_block_pointer(&mut self, i: usize, block: u64) -> bool {
        match i {
            0..FOXFS_DIRECT_BLOCKS => self.direct[i] = block,
            FOXFS_DIRECT_BLOCKS..FOXFS_DATA_POINTERS => {
                self.indirect[i - FOXFS_DIRECT_BLOCKS] = block
            }
            _ => return false,
        }
        true
    }

    /// Has an alternate data stream directory.
    pub fn has_ads(&self) -> bool {
        self.ads_dir != 0
    }
}

impl FoxRecord for FoxInode {
    const KIND: RecordKind = RecordKind::Inode;

    fn from_fields(fields: Vec<FieldValue>) -> FoxCodecResult<Self> {
        let mut c = FieldCursor::new(fields, Self::schema().len())?;
        let mut inode = Self {
            mode: c.u16()?,
            uid: c.uint()?,
            gid: c.uint()?,
            size: c.uint()?,
            blocks: c.uint()?,
            atime: c.uint()?,
            ctime: c.uint()?,
            mtime: c.uint()?,
            dtime: c.uint()?,
            links: c.u16()?,
            flags: c.uint()?,
            ..Default::default()
        };
        for slot in inode.direct.iter_mut().chain(inode.indirect.iter_mut()) {
            *slot = c.uint()?;
        }
        inode.ads_dir = c.uint()?;
        Ok(inode)
    }

    fn to_fields(&self) -> Vec<FieldValue> {
        let mut fields = Vec::with_capacity(Self::schema().len());
        fields.extend([
            self.mode.into(),
            self.uid.into(),
            self.gid.into(),
            self.size.into(),
            self.blocks.into(),
            self.atime.into(),
            self.ctime.into(),
            self.mtime.into(),
            self.dtime.into(),
            self.links.into(),
            self.flags.into(),
        ]);
        fields.extend(
            self.direct
                .iter()
                .chain(self.indirect.iter())
                .chain(core::iter::once(&self.ads_dir))
                .map(|&b| FieldValue::Uint(b)),
        );
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{FieldCategory, FieldWidths, WidthClass};
    use crate::core::FoxCodecError;

    fn widths() -> FieldWidths {
        FieldWidths::default()
            .with(FieldCategory::Block, WidthClass::U32)
            .with(FieldCategory::Uid, WidthClass::U16)
            .with(FieldCategory::Gid, WidthClass::U16)
    }

    #[test]
    fn roundtrip_sequential_pointers() {
        let w = widths();
        let mut inode = FoxInode::new(FileType::Regular, 0o644);
        inode.uid = 1000;
        inode.gid = 1000;
        inode.size = 13 * 4096;
        inode.blocks = 13;
        for (i, b) in (100u64..=112).enumerate() {
            assert!(inode.set_block_pointer(i, b));
        }

        let bytes = inode.encode(&w).unwrap();
        assert_eq!(bytes.len(), FoxInode::fixed_size(&w).unwrap());

        let (back, used) = FoxInode::decode(&bytes, 0, &w).unwrap();
        assert_eq!(back, inode);
        assert_eq!(used, bytes.len());
        assert_eq!(back.block_pointer(12), Some(112));
        assert_eq!(back.block_pointer(13), None);
        assert!(back.is_file());
        assert_eq!(back.permissions(), 0o644);
    }

    #[test]
    fn uid_beyond_width_is_rejected() {
        let w = widths();
        let mut inode = FoxInode::new(FileType::Directory, 0o755);
        inode.uid = 65_536;
        assert_eq!(
            inode.encode(&w),
            Err(FoxCodecError::ValueOutOfRange {
                index: 1,
                value: 65_536,
                width: 2
            })
        );
    }

    #[test]
    fn ads_pointer_is_last_field() {
        let w = widths();
        let mut inode = FoxInode::new(FileType::Regular, 0o600);
        inode.ads_dir = 0xABCD;
        let bytes = inode.encode(&w).unwrap();
        assert_eq!(&bytes[bytes.len() - 4..], &0xABCDu32.to_le_bytes());
        assert!(inode.has_ads());
    }
}
