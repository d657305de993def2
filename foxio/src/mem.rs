// SPDX-License-Identifier: MIT

use crate::{FoxIO, FoxIOError, FoxIOResult};

/// In-memory implementation of `FoxIO`.
///
/// Useful for tests and RAM-backed volume images.
#[derive(Debug)]
pub struct MemFoxIO<'a> {
    buffer: &'a mut [u8],
    partition_offset: u64,
}

impl<'a> MemFoxIO<'a> {
    #[inline]
    pub fn new(buffer: &'a mut [u8]) -> Self {
        Self::new_with_offset(buffer, 0)
    }

    /// Offsets passed to `read_at`/`write_at` are relative to `partition_offset`.
    #[inline]
    pub fn new_with_offset(buffer: &'a mut [u8], partition_offset: u64) -> Self {
        Self {
            buffer,
            partition_offset,
        }
    }

    /// Returns the absolute byte range `[start, end)` or `OutOfBounds`.
    #[inline]
    fn span(&self, offset: u64, len: usize) -> FoxIOResult<(usize, usize)> {
        let start = self
            .partition_offset
            .checked_add(offset)
            .ok_or(FoxIOError::OutOfBounds)?;
        let end = start
            .checked_add(len as u64)
            .ok_or(FoxIOError::OutOfBounds)?;
        if end > self.buffer.len() as u64 {
            return Err(FoxIOError::OutOfBounds);
        }
        Ok((start as usize, end as usize))
    }
}

impl<'a> FoxIO for MemFoxIO<'a> {
    #[inline(always)]
    fn write_at(&mut self, offset: u64, data: &[u8]) -> FoxIOResult {
        let (start, end) = self.span(offset, data.len())?;
        self.buffer[start..end].copy_from_slice(data);
        Ok(())
    }

    #[inline(always)]
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> FoxIOResult {
        let (start, end) = self.span(offset, buf.len())?;
        buf.copy_from_slice(&self.buffer[start..end]);
        Ok(())
    }

    #[inline]
    fn flush(&mut self) -> FoxIOResult {
        Ok(())
    }
}
