// SPDX-License-Identifier: MIT
#![cfg_attr(not(feature = "std"), no_std)]

// Core modules
pub mod errors;

// Backend modules
#[cfg(feature = "mem")]
mod mem;

#[cfg(feature = "std")]
mod std_io;

// Prelude re-exports (central entrypoint)
pub mod prelude {
    pub use super::FoxIO;
    pub use super::FoxIOExt;
    pub use super::FoxIOStructExt;
    pub use super::errors::*;

    #[cfg(feature = "mem")]
    pub use super::mem::MemFoxIO;

    #[cfg(feature = "std")]
    pub use super::std_io::StdFoxIO;
}

// Internal use
use errors::*;

/// Size of the scratch buffer used by zero fill.
pub const BLOCK_BUF_SIZE: usize = 4096;

/// Block IO abstraction trait.
///
/// Reads and writes at byte offsets relative to the start of the volume.
/// foxfs never performs IO on its own: every structural record it decodes or
/// encodes goes through an implementation of this trait supplied by the caller.
pub trait FoxIO {
    /// Writes `data` at `offset`.
    fn write_at(&mut self, offset: u64, data: &[u8]) -> FoxIOResult;

    /// Reads `buf.len()` bytes into `buf` from `offset`.
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> FoxIOResult;

    /// Flushes any buffered data (may be a no-op).
    fn flush(&mut self) -> FoxIOResult;
}

/// Extension helpers for FoxIO.
pub trait FoxIOExt: FoxIO {
    /// Fills a region with zeroes.
    ///
    /// Used when formatting (clearing the tail of the superblock block).
    #[inline(always)]
    fn zero_fill(&mut self, offset: u64, len: usize) -> FoxIOResult {
        const ZERO_BUF: [u8; BLOCK_BUF_SIZE] = [0u8; BLOCK_BUF_SIZE];
        let mut remaining = len;
        let mut off = offset;
        while remaining > 0 {
            let chunk = remaining.min(ZERO_BUF.len());
            self.write_at(off, &ZERO_BUF[..chunk])?;
            off += chunk as u64;
            remaining -= chunk;
        }
        Ok(())
    }
}

impl<T: FoxIO + ?Sized> FoxIOExt for T {}

/// Writes fixed-layout structs using zerocopy.
///
/// Only the superblock goes through here: it must be writable before any
/// field-width configuration exists.
pub trait FoxIOStructExt: FoxIO {
    /// Writes a struct of type `T` at the given offset.
    fn write_struct<T: zerocopy::IntoBytes + zerocopy::Immutable>(
        &mut self,
        offset: u64,
        val: &T,
    ) -> FoxIOResult {
        self.write_at(offset, val.as_bytes())
    }
}

impl<T: FoxIO + ?Sized> FoxIOStructExt for T {}
