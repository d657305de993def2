// SPDX-License-Identifier: MIT

use alloc::vec::Vec;

use crate::codec::{FieldValue, RecordKind};
use crate::core::FoxCodecResult;
use crate::fs::types::record::{FieldCursor, FoxRecord};

/// Partition-level metadata. Carries no fields in this version.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FoxPartitionMetadata;

impl FoxRecord for FoxPartitionMetadata {
    const KIND: RecordKind = RecordKind::PartitionMetadata;

    fn from_fields(fields: Vec<FieldValue>) -> FoxCodecResult<Self> {
        FieldCursor::new(fields, Self::schema().len())?;
        Ok(Self)
    }

    fn to_fields(&self) -> Vec<FieldValue> {
        Vec::new()
    }
}
