// SPDX-License-Identifier: MIT

use core::fmt;

pub const CATEGORY_COUNT: usize = 11;

/// Quantities whose byte width is chosen per volume.
///
/// The discriminant is the slot index in the packed field-width configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum FieldCategory {
    Block = 0,
    NameLen = 1,
    NLink = 2,
    LocSize = 3,
    Date = 4,
    Uid = 5,
    Gid = 6,
    DevMinor = 7,
    DevMajor = 8,
    Flags = 9,
    Inode = 10,
}

impl FieldCategory {
    pub const ALL: [FieldCategory; CATEGORY_COUNT] = [
        FieldCategory::Block,
        FieldCategory::NameLen,
        FieldCategory::NLink,
        FieldCategory::LocSize,
        FieldCategory::Date,
        FieldCategory::Uid,
        FieldCategory::Gid,
        FieldCategory::DevMinor,
        FieldCategory::DevMajor,
        FieldCategory::Flags,
        FieldCategory::Inode,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Short identifier, also used as the key in volume layout files.
    pub const fn name(self) -> &'static str {
        match self {
            FieldCategory::Block => "block",
            FieldCategory::NameLen => "namelen",
            FieldCategory::NLink => "nlink",
            FieldCategory::LocSize => "locsize",
            FieldCategory::Date => "date",
            FieldCategory::Uid => "uid",
            FieldCategory::Gid => "gid",
            FieldCategory::DevMinor => "devmin",
            FieldCategory::DevMajor => "devmaj",
            FieldCategory::Flags => "flags",
            FieldCategory::Inode => "inode",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            FieldCategory::Block => "block pointer",
            FieldCategory::NameLen => "name length",
            FieldCategory::NLink => "link count",
            FieldCategory::LocSize => "location/size",
            FieldCategory::Date => "timestamp",
            FieldCategory::Uid => "user id",
            FieldCategory::Gid => "group id",
            FieldCategory::DevMinor => "device minor",
            FieldCategory::DevMajor => "device major",
            FieldCategory::Flags => "flags",
            FieldCategory::Inode => "inode number",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl fmt::Display for FieldCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_order_is_stable() {
        for (i, cat) in FieldCategory::ALL.iter().enumerate() {
            assert_eq!(cat.index(), i);
            assert_eq!(FieldCategory::from_index(i), Some(*cat));
            assert_eq!(FieldCategory::from_name(cat.name()), Some(*cat));
        }
        assert_eq!(FieldCategory::from_index(CATEGORY_COUNT), None);
    }
}
