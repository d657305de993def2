// SPDX-License-Identifier: MIT
//! foxfs directory entries

use alloc::vec;
use alloc::vec::Vec;

use crate::codec::{FieldCategory, FieldValue, FieldWidths, RecordKind};
use crate::core::{FoxCodecResult, FoxRecordError, FoxRecordResult};
use crate::fs::types::record::{FieldCursor, FoxRecord};

/// Directory entry: a name and the inode it points to.
///
/// On disk the name length is a `namelen`-wide integer followed by the raw
/// name bytes, then an `inode`-wide number. Names are not NUL terminated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoxDirEntry {
    pub name: Vec<u8>,
    pub inode: u64,
}

impl FoxDirEntry {
    pub fn new(name: &[u8], inode: u64) -> Self {
        Self {
            name: name.to_vec(),
            inode,
        }
    }

    /// Name as UTF-8, if valid.
    pub fn name_str(&self) -> Option<&str> {
        core::str::from_utf8(&self.name).ok()
    }

    pub fn is_dot(&self) -> bool {
        self.name == b"." || self.name == b".."
    }
}

impl FoxRecord for FoxDirEntry {
    const KIND: RecordKind = RecordKind::DirEntry;

    fn from_fields(fields: Vec<FieldValue>) -> FoxCodecResult<Self> {
        let mut c = FieldCursor::new(fields, Self::schema().len())?;
        Ok(Self {
            name: c.stream()?,
            inode: c.uint()?,
        })
    }

    fn to_fields(&self) -> Vec<FieldValue> {
        vec![FieldValue::Stream(self.name.clone()), self.inode.into()]
    }
}

/// Walks a packed directory listing.
///
/// The listing ends at the end of the buffer, at an entry whose name length
/// is zero, or at a zero tail too short to hold a name length. Iteration
/// stops after the first decode error.
pub struct DirEntryIter<'a> {
    buf: &'a [u8],
    pos: usize,
    widths: FieldWidths,
    done: bool,
}

impl<'a> DirEntryIter<'a> {
    pub fn new(buf: &'a [u8], widths: &FieldWidths) -> Self {
        Self {
            buf,
            pos: 0,
            widths: *widths,
            done: false,
        }
    }

    /// Byte offset of the next entry within the listing.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// A zero name length, or an all-zero tail shorter than one length field.
    fn at_terminator(&self) -> bool {
        let width = self.widths.category_width(FieldCategory::NameLen);
        let end = self.buf.len().min(self.pos.saturating_add(width));
        self.buf
            .get(self.pos..end)
            .is_some_and(|len| len.iter().all(|&b| b == 0))
    }
}

impl Iterator for DirEntryIter<'_> {
    type Item = FoxCodecResult<FoxDirEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.pos >= self.buf.len() || self.at_terminator() {
            self.done = true;
            return None;
        }
        match FoxDirEntry::decode(self.buf, self.pos, &self.widths) {
            Ok((entry, used)) => {
                self.pos += used;
                Some(Ok(entry))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Packs `entries` back to back. No terminator is appended.
pub fn encode_dir_entries(
    entries: &[FoxDirEntry],
    widths: &FieldWidths,
) -> FoxRecordResult<Vec<u8>> {
    let mut out = Vec::new();
    for entry in entries {
        // an empty name reads back as the terminator
        if entry.name.is_empty() {
            return Err(FoxRecordError::Other("Empty directory entry name"));
        }
        entry.encode_into(widths, &mut out)?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::WidthClass;
    use crate::core::FoxCodecError;

    fn widths() -> FieldWidths {
        FieldWidths::default()
            .with(FieldCategory::NameLen, WidthClass::U8)
            .with(FieldCategory::Inode, WidthClass::U32)
    }

    #[test]
    fn readme_entry_layout() {
        let w = widths();
        let entry = FoxDirEntry::new(b"readme.txt", 42);
        let bytes = entry.encode(&w).unwrap();

        assert_eq!(bytes.len(), 1 + 10 + 4);
        assert_eq!(bytes[0], 10);
        assert_eq!(&bytes[1..11], b"readme.txt");
        assert_eq!(&bytes[11..], &42u32.to_le_bytes());

        let (back, used) = FoxDirEntry::decode(&bytes, 0, &w).unwrap();
        assert_eq!(back.name_str(), Some("readme.txt"));
        assert_eq!(back.inode, 42);
        assert_eq!(used, 15);
    }

    #[test]
    fn dirent_has_no_fixed_size() {
        assert_eq!(
            FoxDirEntry::fixed_size(&widths()),
            Err(FoxCodecError::Unsized)
        );
    }

    #[test]
    fn iter_stops_at_zero_name_length() {
        let w = widths();
        let mut listing = encode_dir_entries(
            &[
                FoxDirEntry::new(b".", 2),
                FoxDirEntry::new(b"..", 2),
                FoxDirEntry::new(b"readme.txt", 42),
            ],
            &w,
        )
        .unwrap();
        listing.extend_from_slice(&[0u8; 32]);

        let names: Vec<_> = DirEntryIter::new(&listing, &w)
            .map(|e| e.unwrap().name)
            .collect();
        assert_eq!(names, vec![b".".to_vec(), b"..".to_vec(), b"readme.txt".to_vec()]);
    }

    #[test]
    fn iter_reports_truncation_once() {
        let w = widths();
        let mut listing = FoxDirEntry::new(b"a", 7).encode(&w).unwrap();
        listing.extend_from_slice(&[20, b'x', b'y']); // claims 20 name bytes

        let mut it = DirEntryIter::new(&listing, &w);
        assert_eq!(it.next(), Some(Ok(FoxDirEntry::new(b"a", 7))));
        assert!(matches!(
            it.next(),
            Some(Err(FoxCodecError::BufferTruncated { .. }))
        ));
        assert_eq!(it.next(), None);
    }

    #[test]
    fn short_zero_tail_ends_listing() {
        let w = widths().with(FieldCategory::NameLen, WidthClass::U16);
        let mut listing = FoxDirEntry::new(b"a", 7).encode(&w).unwrap();
        listing.push(0);

        let mut it = DirEntryIter::new(&listing, &w);
        assert_eq!(it.next(), Some(Ok(FoxDirEntry::new(b"a", 7))));
        assert_eq!(it.next(), None);

        // a non-zero short tail is still truncated
        *listing.last_mut().unwrap() = 3;
        let results: Vec<_> = DirEntryIter::new(&listing, &w).collect();
        assert!(matches!(
            results[..],
            [Ok(_), Err(FoxCodecError::BufferTruncated { needed: 2, available: 1, .. })]
        ));
    }

    #[test]
    fn empty_name_is_rejected() {
        assert_eq!(
            encode_dir_entries(&[FoxDirEntry::new(b"", 1)], &widths()),
            Err(FoxRecordError::Other("Empty directory entry name"))
        );
    }
}
