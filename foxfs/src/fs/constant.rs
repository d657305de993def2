// SPDX-License-Identifier: MIT

/// Superblock signature.
pub const FOXFS_SIGNATURE: [u8; 8] = *b"foxfs!!!";

pub const FOXFS_VERSION_MAJOR: u16 = 1;
pub const FOXFS_VERSION_MINOR: u16 = 0;

/// The superblock lives at the very start of the volume.
pub const FOXFS_SUPERBLOCK_OFFSET: u64 = 0;
pub const FOXFS_SUPERBLOCK_SIZE: usize = 27;

pub const FOXFS_MIN_BLOCK_SIZE: u16 = 512;
pub const FOXFS_MAX_BLOCK_SIZE: u16 = 32768;
pub const FOXFS_DEFAULT_BLOCK_SIZE: u16 = 4096;

/// Mounts allowed before a consistency check is recommended.
pub const FOXFS_DEFAULT_MAX_MOUNTS: u16 = 20;

// Inode block pointers
pub const FOXFS_DIRECT_BLOCKS: usize = 10;
pub const FOXFS_INDIRECT_LEVELS: usize = 3;
pub const FOXFS_DATA_POINTERS: usize = FOXFS_DIRECT_BLOCKS + FOXFS_INDIRECT_LEVELS;

// Inode mode (file type, high nibble)
pub const FOXFS_S_IFMT: u16 = 0xF000;
pub const FOXFS_S_IFIFO: u16 = 0x1000;
pub const FOXFS_S_IFCHR: u16 = 0x2000;
pub const FOXFS_S_IFDIR: u16 = 0x4000;
pub const FOXFS_S_IFBLK: u16 = 0x6000;
pub const FOXFS_S_IFREG: u16 = 0x8000;
pub const FOXFS_S_IFLNK: u16 = 0xA000;
pub const FOXFS_S_IFSOCK: u16 = 0xC000;
