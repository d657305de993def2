// SPDX-License-Identifier: MIT
//! foxfs superblock: the only fixed-layout record on a volume.

use core::fmt;

use bitflags::bitflags;
use zerocopy::byteorder::{LE, U16};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

use crate::codec::{FieldWidths, PACKED_WIDTHS_SIZE};
use crate::core::{FoxCodecError, FoxCodecResult, FoxMountError, FoxMountResult};
use crate::fs::constant::*;

bitflags! {
    /// Filesystem state byte.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FsState: u8 {
        const CLEAN   = 0x01;
        const ERRORS  = 0x02;
        const MOUNTED = 0x04;
    }
}

/// Operating system that created the volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsId {
    Linux,
    Bsd,
    MacOs,
    Windows,
    Other(u16),
}

impl OsId {
    pub const fn from_raw(raw: u16) -> Self {
        match raw {
            0 => OsId::Linux,
            1 => OsId::Bsd,
            2 => OsId::MacOs,
            3 => OsId::Windows,
            other => OsId::Other(other),
        }
    }

    pub const fn raw(self) -> u16 {
        match self {
            OsId::Linux => 0,
            OsId::Bsd => 1,
            OsId::MacOs => 2,
            OsId::Windows => 3,
            OsId::Other(raw) => raw,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "linux" => Some(OsId::Linux),
            "bsd" => Some(OsId::Bsd),
            "macos" => Some(OsId::MacOs),
            "windows" => Some(OsId::Windows),
            _ => None,
        }
    }
}

impl fmt::Display for OsId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OsId::Linux => f.write_str("linux"),
            OsId::Bsd => f.write_str("bsd"),
            OsId::MacOs => f.write_str("macos"),
            OsId::Windows => f.write_str("windows"),
            OsId::Other(raw) => write!(f, "unknown ({raw})"),
        }
    }
}

/// foxfs superblock (27 bytes, little-endian, no padding).
///
/// Decodable before any field-width configuration exists, so it is a plain
/// fixed layout rather than a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoBytes, FromBytes, KnownLayout, Immutable, Unaligned)]
#[repr(C)]
pub struct FoxSuperblock {
    /// "foxfs!!!"
    pub sig: [u8; 8],
    pub ver_maj: U16<LE>,
    pub ver_min: U16<LE>,
    /// Block size in bytes
    pub blk_size: U16<LE>,
    pub os_id: U16<LE>,
    pub mount_count: U16<LE>,
    pub max_mounts: U16<LE>,
    pub fs_state: u8,
    /// Packed field-width configuration
    pub widths: [u8; PACKED_WIDTHS_SIZE],
}

impl FoxSuperblock {
    /// Fresh superblock for a newly formatted volume.
    pub fn new(block_size: u16, os_id: OsId, max_mounts: u16, widths: &FieldWidths) -> Self {
        Self {
            sig: FOXFS_SIGNATURE,
            ver_maj: U16::new(FOXFS_VERSION_MAJOR),
            ver_min: U16::new(FOXFS_VERSION_MINOR),
            blk_size: U16::new(block_size),
            os_id: U16::new(os_id.raw()),
            mount_count: U16::new(0),
            max_mounts: U16::new(max_mounts),
            fs_state: FsState::CLEAN.bits(),
            widths: widths.pack(),
        }
    }

    /// Parses a superblock from the start of `buf` and checks its signature.
    pub fn decode(buf: &[u8]) -> FoxMountResult<Self> {
        let (sb, _) = Self::read_from_prefix(buf).map_err(|_| {
            FoxMountError::Codec(FoxCodecError::BufferTruncated {
                offset: 0,
                needed: FOXFS_SUPERBLOCK_SIZE,
                available: buf.len(),
            })
        })?;
        sb.validate_signature()?;
        Ok(sb)
    }

    pub fn validate_signature(&self) -> FoxMountResult {
        if self.sig != FOXFS_SIGNATURE {
            return Err(FoxMountError::SignatureMismatch { found: self.sig });
        }
        Ok(())
    }

    /// Loads the volume's field-width configuration.
    pub fn field_widths(&self) -> FoxCodecResult<FieldWidths> {
        FieldWidths::load(&self.widths)
    }

    pub fn version(&self) -> (u16, u16) {
        (self.ver_maj.get(), self.ver_min.get())
    }

    pub fn block_size(&self) -> u16 {
        self.blk_size.get()
    }

    pub fn os(&self) -> OsId {
        OsId::from_raw(self.os_id.get())
    }

    pub fn state(&self) -> FsState {
        FsState::from_bits_retain(self.fs_state)
    }

    pub fn set_state(&mut self, state: FsState) {
        self.fs_state = state.bits();
    }

    /// True once the mount count reached the configured maximum (0 disables the check).
    pub fn needs_check(&self) -> bool {
        let max = self.max_mounts.get();
        max != 0 && self.mount_count.get() >= max
    }

    /// Encode to raw bytes
    pub fn to_bytes(&self) -> [u8; FOXFS_SUPERBLOCK_SIZE] {
        let mut out = [0u8; FOXFS_SUPERBLOCK_SIZE];
        out.copy_from_slice(self.as_bytes());
        out
    }
}

// Ensure the struct is exactly 27 bytes
const _: () = assert!(core::mem::size_of::<FoxSuperblock>() == FOXFS_SUPERBLOCK_SIZE);
