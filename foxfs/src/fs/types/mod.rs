// SPDX-License-Identifier: MIT

pub mod bgdt;
pub mod dirent;
pub mod inode;
pub mod partmeta;
pub mod record;
pub mod superblock;

pub use bgdt::*;
pub use dirent::*;
pub use inode::*;
pub use partmeta::*;
pub use record::FoxRecord;
pub use superblock::*;
