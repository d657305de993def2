// SPDX-License-Identifier: MIT
//! Typed views over schema-described records.

use alloc::vec::Vec;

use crate::codec::{self, FieldDescriptor, FieldValue, FieldWidths, RecordKind, schema_for};
use crate::core::{FoxCodecError, FoxCodecResult};

/// A structural record with a registry schema.
///
/// Implementors only convert between their fields and [`FieldValue`]s; every
/// byte goes through the generic codec.
pub trait FoxRecord: Sized {
    const KIND: RecordKind;

    fn schema() -> &'static [FieldDescriptor] {
        schema_for(Self::KIND)
    }

    fn from_fields(fields: Vec<FieldValue>) -> FoxCodecResult<Self>;

    fn to_fields(&self) -> Vec<FieldValue>;

    /// Decodes one record at `offset`; returns it with the bytes consumed.
    fn decode(buf: &[u8], offset: usize, widths: &FieldWidths) -> FoxCodecResult<(Self, usize)> {
        let (fields, used) = codec::decode(buf, offset, Self::schema(), widths)?;
        Ok((Self::from_fields(fields)?, used))
    }

    fn encode(&self, widths: &FieldWidths) -> FoxCodecResult<Vec<u8>> {
        codec::encode(&self.to_fields(), Self::schema(), widths)
    }

    fn encode_into(&self, widths: &FieldWidths, out: &mut Vec<u8>) -> FoxCodecResult<usize> {
        codec::encode_into(&self.to_fields(), Self::schema(), widths, out)
    }

    /// On-disk size under `widths`, `Unsized` for records with a stream field.
    fn fixed_size(widths: &FieldWidths) -> FoxCodecResult<usize> {
        codec::size_of(Self::schema(), widths)
    }
}

/// Consumes decoded fields in order, checking each one's kind.
pub(crate) struct FieldCursor {
    fields: alloc::vec::IntoIter<FieldValue>,
    index: usize,
    expected: usize,
    got: usize,
}

impl FieldCursor {
    pub(crate) fn new(fields: Vec<FieldValue>, expected: usize) -> FoxCodecResult<Self> {
        let got = fields.len();
        if got != expected {
            return Err(FoxCodecError::FieldCountMismatch { expected, got });
        }
        Ok(Self {
            fields: fields.into_iter(),
            index: 0,
            expected,
            got,
        })
    }

    fn next(&mut self) -> FoxCodecResult<(usize, FieldValue)> {
        let index = self.index;
        let value = self.fields.next().ok_or(FoxCodecError::FieldCountMismatch {
            expected: self.expected,
            got: self.got,
        })?;
        self.index += 1;
        Ok((index, value))
    }

    pub(crate) fn uint(&mut self) -> FoxCodecResult<u64> {
        let (index, value) = self.next()?;
        value
            .as_uint()
            .ok_or(FoxCodecError::FieldKindMismatch { index })
    }

    pub(crate) fn u16(&mut self) -> FoxCodecResult<u16> {
        self.narrow(2)
    }

    pub(crate) fn u8(&mut self) -> FoxCodecResult<u8> {
        self.narrow(1)
    }

    fn narrow<T: TryFrom<u64>>(&mut self, width: usize) -> FoxCodecResult<T> {
        let index = self.index;
        let value = self.uint()?;
        T::try_from(value).map_err(|_| FoxCodecError::ValueOutOfRange {
            index,
            value,
            width,
        })
    }

    pub(crate) fn blob<const N: usize>(&mut self) -> FoxCodecResult<[u8; N]> {
        let (index, value) = self.next()?;
        match value {
            FieldValue::Blob(bytes) => {
                let got = bytes.len();
                bytes
                    .try_into()
                    .map_err(|_| FoxCodecError::BlobLengthMismatch {
                        index,
                        expected: N,
                        got,
                    })
            }
            _ => Err(FoxCodecError::FieldKindMismatch { index }),
        }
    }

    pub(crate) fn stream(&mut self) -> FoxCodecResult<Vec<u8>> {
        let (index, value) = self.next()?;
        match value {
            FieldValue::Stream(bytes) => Ok(bytes),
            _ => Err(FoxCodecError::FieldKindMismatch { index }),
        }
    }
}
