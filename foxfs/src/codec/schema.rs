// SPDX-License-Identifier: MIT
//! Schema registry: the on-disk records, described as data.

use core::fmt;

use crate::codec::{FieldCategory, PACKED_WIDTHS_SIZE, WidthClass};

/// One entry of a record schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDescriptor {
    /// Unsigned integer with a literal width-class code.
    FixedInt(u8),
    /// Opaque bytes with a literal length.
    FixedBlob(usize),
    /// Unsigned integer whose width comes from the volume configuration.
    Variable(FieldCategory),
    /// Variable integer holding the byte length of a raw payload that follows it.
    StreamLength(FieldCategory),
}

impl FieldDescriptor {
    #[inline]
    pub const fn is_stream(&self) -> bool {
        matches!(self, FieldDescriptor::StreamLength(_))
    }

    pub const fn category(&self) -> Option<FieldCategory> {
        match self {
            FieldDescriptor::Variable(c) | FieldDescriptor::StreamLength(c) => Some(*c),
            _ => None,
        }
    }
}

impl fmt::Display for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldDescriptor::FixedInt(code) => match WidthClass::from_code(*code) {
                Some(class) => write!(f, "{class}"),
                None => write!(f, "u?({code})"),
            },
            FieldDescriptor::FixedBlob(len) => write!(f, "[u8; {len}]"),
            FieldDescriptor::Variable(cat) => write!(f, "var({cat})"),
            FieldDescriptor::StreamLength(cat) => write!(f, "stream({cat})"),
        }
    }
}

/// Record kinds known to the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    PartitionMetadata,
    BlockGroup,
    Inode,
    DirEntry,
}

impl RecordKind {
    pub const ALL: [RecordKind; 4] = [
        RecordKind::PartitionMetadata,
        RecordKind::BlockGroup,
        RecordKind::Inode,
        RecordKind::DirEntry,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            RecordKind::PartitionMetadata => "partition-metadata",
            RecordKind::BlockGroup => "block-group",
            RecordKind::Inode => "inode",
            RecordKind::DirEntry => "dirent",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const U8: FieldDescriptor = FieldDescriptor::FixedInt(WidthClass::U8.code());
const U16: FieldDescriptor = FieldDescriptor::FixedInt(WidthClass::U16.code());
const BLOCK: FieldDescriptor = FieldDescriptor::Variable(FieldCategory::Block);
const LOCSIZE: FieldDescriptor = FieldDescriptor::Variable(FieldCategory::LocSize);
const DATE: FieldDescriptor = FieldDescriptor::Variable(FieldCategory::Date);

/// Reserved for partition-level metadata; intentionally empty in this version.
pub const SCHEMA_PARTITION_METADATA: &[FieldDescriptor] = &[];

pub const SCHEMA_BLOCK_GROUP: &[FieldDescriptor] = &[
    BLOCK,   // block usage bitmap
    BLOCK,   // inode table
    LOCSIZE, // unallocated blocks
    LOCSIZE, // unallocated inodes
    U8,      // flags
    FieldDescriptor::FixedBlob(PACKED_WIDTHS_SIZE), // copy of the superblock widths
];

pub const SCHEMA_INODE: &[FieldDescriptor] = &[
    U16, // mode
    FieldDescriptor::Variable(FieldCategory::Uid),
    FieldDescriptor::Variable(FieldCategory::Gid),
    LOCSIZE, // local size
    BLOCK,   // number of blocks
    DATE,    // access
    DATE,    // creation
    DATE,    // modification
    DATE,    // deletion
    U16,     // hard links
    FieldDescriptor::Variable(FieldCategory::Flags),
    BLOCK, // direct 0
    BLOCK, // direct 1
    BLOCK, // direct 2
    BLOCK, // direct 3
    BLOCK, // direct 4
    BLOCK, // direct 5
    BLOCK, // direct 6
    BLOCK, // direct 7
    BLOCK, // direct 8
    BLOCK, // direct 9
    BLOCK, // single indirect
    BLOCK, // double indirect
    BLOCK, // triple indirect
    BLOCK, // ADS directory
];

pub const SCHEMA_DIR_ENTRY: &[FieldDescriptor] = &[
    FieldDescriptor::StreamLength(FieldCategory::NameLen),
    FieldDescriptor::Variable(FieldCategory::Inode),
];

pub const fn schema_for(kind: RecordKind) -> &'static [FieldDescriptor] {
    match kind {
        RecordKind::PartitionMetadata => SCHEMA_PARTITION_METADATA,
        RecordKind::BlockGroup => SCHEMA_BLOCK_GROUP,
        RecordKind::Inode => SCHEMA_INODE,
        RecordKind::DirEntry => SCHEMA_DIR_ENTRY,
    }
}
