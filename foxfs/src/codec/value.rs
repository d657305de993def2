// SPDX-License-Identifier: MIT

use alloc::vec::Vec;

/// A decoded field, in schema order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Fixed or variable integer.
    Uint(u64),
    /// Fixed-length opaque bytes.
    Blob(Vec<u8>),
    /// Payload of a stream-length field. Its length is the field's on-disk value.
    Stream(Vec<u8>),
}

impl FieldValue {
    #[inline]
    pub fn as_uint(&self) -> Option<u64> {
        match self {
            FieldValue::Uint(v) => Some(*v),
            _ => None,
        }
    }

    /// Bytes of a blob or stream payload.
    #[inline]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            FieldValue::Blob(b) | FieldValue::Stream(b) => Some(b),
            FieldValue::Uint(_) => None,
        }
    }

    pub fn into_bytes(self) -> Option<Vec<u8>> {
        match self {
            FieldValue::Blob(b) | FieldValue::Stream(b) => Some(b),
            FieldValue::Uint(_) => None,
        }
    }
}

impl From<u64> for FieldValue {
    fn from(v: u64) -> Self {
        FieldValue::Uint(v)
    }
}

impl From<u32> for FieldValue {
    fn from(v: u32) -> Self {
        FieldValue::Uint(v as u64)
    }
}

impl From<u16> for FieldValue {
    fn from(v: u16) -> Self {
        FieldValue::Uint(v as u64)
    }
}

impl From<u8> for FieldValue {
    fn from(v: u8) -> Self {
        FieldValue::Uint(v as u64)
    }
}
