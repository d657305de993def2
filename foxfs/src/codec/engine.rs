// SPDX-License-Identifier: MIT
//! Generic structure codec.
//!
//! One engine drives every record kind: it walks a schema in order and resolves
//! each descriptor's width against the volume's [`FieldWidths`]. All integers are
//! little-endian.

use alloc::vec::Vec;

use crate::codec::width::max_for_width;
use crate::codec::{FieldDescriptor, FieldValue, FieldWidths, resolve};
use crate::core::{FoxCodecError, FoxCodecResult};

/// Resolved position of one schema field, as reported by [`layout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLayout {
    pub descriptor: FieldDescriptor,
    /// Byte offset inside the record; `None` once a stream payload precedes the field.
    pub offset: Option<usize>,
    /// Width of the integer or blob itself (stream payload excluded).
    pub width: usize,
}

/// Bounds-checked read cursor over a byte slice.
struct ByteReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    fn new(buf: &'a [u8], pos: usize) -> Self {
        Self { buf, pos }
    }

    fn take(&mut self, n: usize) -> FoxCodecResult<&'a [u8]> {
        let available = self.buf.len().saturating_sub(self.pos);
        if n > available {
            return Err(FoxCodecError::BufferTruncated {
                offset: self.pos,
                needed: n,
                available,
            });
        }
        let out = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }

    fn take_uint(&mut self, width: usize) -> FoxCodecResult<u64> {
        let bytes = self.take(width)?;
        let mut le = [0u8; 8];
        le[..width].copy_from_slice(bytes);
        Ok(u64::from_le_bytes(le))
    }
}

/// Byte width of the integer or blob part of `desc`.
#[inline]
fn field_width(desc: &FieldDescriptor, widths: &FieldWidths) -> FoxCodecResult<usize> {
    match desc {
        FieldDescriptor::FixedInt(code) => resolve(*code),
        FieldDescriptor::FixedBlob(len) => Ok(*len),
        FieldDescriptor::Variable(cat) | FieldDescriptor::StreamLength(cat) => {
            Ok(widths.category_width(*cat))
        }
    }
}

#[inline]
fn put_uint(out: &mut Vec<u8>, index: usize, value: u64, width: usize) -> FoxCodecResult {
    if value > max_for_width(width) {
        return Err(FoxCodecError::ValueOutOfRange {
            index,
            value,
            width,
        });
    }
    out.extend_from_slice(&value.to_le_bytes()[..width]);
    Ok(())
}

/// Decodes one record starting at `offset` in `buf`.
///
/// Returns the field values in schema order and the number of bytes consumed,
/// stream payloads included. Never reads outside `buf`.
pub fn decode(
    buf: &[u8],
    offset: usize,
    schema: &[FieldDescriptor],
    widths: &FieldWidths,
) -> FoxCodecResult<(Vec<FieldValue>, usize)> {
    let mut reader = ByteReader::new(buf, offset);
    let mut values = Vec::with_capacity(schema.len());

    for desc in schema {
        let width = field_width(desc, widths)?;
        let value = match desc {
            FieldDescriptor::FixedInt(_) | FieldDescriptor::Variable(_) => {
                FieldValue::Uint(reader.take_uint(width)?)
            }
            FieldDescriptor::FixedBlob(_) => FieldValue::Blob(reader.take(width)?.to_vec()),
            FieldDescriptor::StreamLength(_) => {
                let len_pos = reader.pos;
                let len = reader.take_uint(width)?;
                // A length beyond the address space cannot fit in the buffer either.
                let len = usize::try_from(len).map_err(|_| FoxCodecError::BufferTruncated {
                    offset: len_pos + width,
                    needed: usize::MAX,
                    available: buf.len().saturating_sub(len_pos + width),
                })?;
                FieldValue::Stream(reader.take(len)?.to_vec())
            }
        };
        values.push(value);
    }

    Ok((values, reader.pos - offset))
}

/// Appends the encoding of `values` to `out`; returns the number of bytes written.
///
/// On error `out` may hold a partially written record.
pub fn encode_into(
    values: &[FieldValue],
    schema: &[FieldDescriptor],
    widths: &FieldWidths,
    out: &mut Vec<u8>,
) -> FoxCodecResult<usize> {
    if values.len() != schema.len() {
        return Err(FoxCodecError::FieldCountMismatch {
            expected: schema.len(),
            got: values.len(),
        });
    }

    let start = out.len();
    for (index, (desc, value)) in schema.iter().zip(values).enumerate() {
        let width = field_width(desc, widths)?;
        match (desc, value) {
            (FieldDescriptor::FixedInt(_) | FieldDescriptor::Variable(_), FieldValue::Uint(v)) => {
                put_uint(out, index, *v, width)?;
            }
            (FieldDescriptor::FixedBlob(_), FieldValue::Blob(bytes)) => {
                if bytes.len() != width {
                    return Err(FoxCodecError::BlobLengthMismatch {
                        index,
                        expected: width,
                        got: bytes.len(),
                    });
                }
                out.extend_from_slice(bytes);
            }
            (FieldDescriptor::StreamLength(_), FieldValue::Stream(payload)) => {
                put_uint(out, index, payload.len() as u64, width)?;
                out.extend_from_slice(payload);
            }
            _ => return Err(FoxCodecError::FieldKindMismatch { index }),
        }
    }

    Ok(out.len() - start)
}

/// Encodes one record into a fresh buffer.
pub fn encode(
    values: &[FieldValue],
    schema: &[FieldDescriptor],
    widths: &FieldWidths,
) -> FoxCodecResult<Vec<u8>> {
    let mut out = Vec::new();
    encode_into(values, schema, widths, &mut out)?;
    Ok(out)
}

/// Fixed byte size of a record, or `Unsized` if the schema carries a stream field.
pub fn size_of(schema: &[FieldDescriptor], widths: &FieldWidths) -> FoxCodecResult<usize> {
    schema.iter().try_fold(0usize, |acc, desc| {
        if desc.is_stream() {
            return Err(FoxCodecError::Unsized);
        }
        Ok(acc + field_width(desc, widths)?)
    })
}

/// Concrete byte layout of `schema` under `widths`.
pub fn layout(
    schema: &[FieldDescriptor],
    widths: &FieldWidths,
) -> FoxCodecResult<Vec<FieldLayout>> {
    let mut fields = Vec::with_capacity(schema.len());
    let mut offset = Some(0usize);
    for desc in schema {
        let width = field_width(desc, widths)?;
        fields.push(FieldLayout {
            descriptor: *desc,
            offset,
            width,
        });
        offset = match desc {
            FieldDescriptor::StreamLength(_) => None,
            _ => offset.map(|o| o + width),
        };
    }
    Ok(fields)
}
