// SPDX-License-Identifier: MIT

use std::io::{Error, ErrorKind, Read, Seek, SeekFrom, Write};

use crate::{FoxIO, FoxIOError, FoxIOResult};

/// `FoxIO` over any `Read + Write + Seek` (image files, block devices).
#[derive(Debug)]
pub struct StdFoxIO<'a, T: Read + Write + Seek> {
    io: &'a mut T,
    partition_offset: u64,
}

impl<'a, T: Read + Write + Seek> StdFoxIO<'a, T> {
    #[inline]
    pub fn new(io: &'a mut T) -> Self {
        Self::new_with_offset(io, 0)
    }

    #[inline]
    pub fn new_with_offset(io: &'a mut T, partition_offset: u64) -> Self {
        Self {
            io,
            partition_offset,
        }
    }

    #[inline]
    fn seek_to(&mut self, offset: u64) -> FoxIOResult {
        let abs_offset = self
            .partition_offset
            .checked_add(offset)
            .ok_or(FoxIOError::OutOfBounds)?;
        self.io.seek(SeekFrom::Start(abs_offset))?;
        Ok(())
    }
}

impl<'a, T: Read + Write + Seek> FoxIO for StdFoxIO<'a, T> {
    fn write_at(&mut self, offset: u64, data: &[u8]) -> FoxIOResult {
        self.seek_to(offset)?;
        self.io.write_all(data)?;
        Ok(())
    }

    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> FoxIOResult {
        self.seek_to(offset)?;
        self.io.read_exact(buf)?;
        Ok(())
    }

    fn flush(&mut self) -> FoxIOResult {
        self.io.flush()?;
        Ok(())
    }
}

impl From<Error> for FoxIOError {
    #[cold]
    #[inline(never)]
    fn from(e: Error) -> Self {
        match e.kind() {
            ErrorKind::UnexpectedEof => FoxIOError::OutOfBounds,
            ErrorKind::Unsupported => FoxIOError::Unsupported,
            ErrorKind::NotFound => FoxIOError::Other("Device or image not found"),
            ErrorKind::PermissionDenied => FoxIOError::Other("Permission denied"),
            ErrorKind::InvalidInput => FoxIOError::Other("Invalid seek or input"),
            _ => FoxIOError::Other("Device I/O error"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::prelude::*;
    use tempfile::tempfile;

    #[test]
    fn test_rw() {
        let mut file = tempfile().unwrap();
        let mut io = StdFoxIO::new(&mut file);
        io.write_at(10, &[1, 2, 3, 4]).unwrap();

        let mut output = [0u8; 4];
        io.read_at(10, &mut output).unwrap();
        assert_eq!(output, [1, 2, 3, 4]);
    }

    #[test]
    fn test_short_read_is_out_of_bounds() {
        let mut file = tempfile().unwrap();
        let mut io = StdFoxIO::new(&mut file);
        io.write_at(0, &[1, 2]).unwrap();

        let mut output = [0u8; 8];
        assert_eq!(io.read_at(0, &mut output), Err(FoxIOError::OutOfBounds));
    }

    #[test]
    fn test_partition_offset() {
        let mut file = tempfile().unwrap();
        {
            let mut io = StdFoxIO::new_with_offset(&mut file, 512);
            io.write_at(4, &0xDEAD_BEEFu32.to_le_bytes()).unwrap();
        }
        let mut io = StdFoxIO::new(&mut file);
        let mut out = [0u8; 4];
        io.read_at(516, &mut out).unwrap();
        assert_eq!(u32::from_le_bytes(out), 0xDEAD_BEEF);
    }
}
