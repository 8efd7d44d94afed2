//! Schema-less traversal of encoded messages.
//!
//! The walker follows only the wire structure (tags, varints, length prefixes, groups). It does
//! not know what any field means, so it can inspect, validate or filter payloads from message
//! types this crate has never seen.
//!
//! | Use case | Prefer |
//! |----------|--------|
//! | List the fields of a buffer | [`FieldWalker`] |
//! | Check a buffer is well-formed | [`validate_fields`] |
//! | Drop fields before relaying | [`retain_fields`] |
//! | Decode into a typed struct | [`Message::decode`](crate::codec::Message::decode) |
//!
//! Length-delimited payloads are returned as borrowed bytes; whether they hold a string, raw
//! bytes, a packed run or an embedded message is up to the caller (see [dump](crate::dump) for a
//! heuristic).

use crate::codec::CodecError;
use crate::reader::{Reader, RECURSION_LIMIT};
use crate::value::{RawField, RawValue};
use crate::wire::{Tag, WireType};

/// Iterator over the top-level fields of a buffer.
///
/// Yields `Err` once for malformed input and then stops.
pub struct FieldWalker<'a> {
    reader: Reader<'a>,
    failed: bool,
}

impl<'a> FieldWalker<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        FieldWalker {
            reader: Reader::new(data),
            failed: false,
        }
    }

    pub fn position(&self) -> usize {
        self.reader.position()
    }
}

impl<'a> Iterator for FieldWalker<'a> {
    type Item = Result<RawField<'a>, CodecError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.reader.is_at_end() {
            return None;
        }
        let result = read_field(&mut self.reader, 0);
        if result.is_err() {
            self.failed = true;
        }
        Some(result)
    }
}

fn read_field<'a>(r: &mut Reader<'a>, depth: u32) -> Result<RawField<'a>, CodecError> {
    let start = r.position();
    let tag = r.tag()?;
    read_payload(r, tag, start, depth)
}

fn read_payload<'a>(
    r: &mut Reader<'a>,
    tag: Tag,
    start: usize,
    depth: u32,
) -> Result<RawField<'a>, CodecError> {
    let value = match tag.wire_type() {
        WireType::Varint => RawValue::Varint(r.uint64()?),
        WireType::Fixed64 => RawValue::Fixed64(r.fixed64()?),
        WireType::Fixed32 => RawValue::Fixed32(r.fixed32()?),
        WireType::LengthDelimited => RawValue::Bytes(r.bytes()?),
        WireType::StartGroup => {
            if depth >= RECURSION_LIMIT {
                return Err(CodecError::RecursionLimit);
            }
            let mut fields = Vec::new();
            loop {
                let inner_start = r.position();
                let inner = r.tag()?;
                if inner.wire_type() == WireType::EndGroup {
                    if inner.field_number() != tag.field_number() {
                        return Err(CodecError::GroupMismatch {
                            expected: tag.field_number(),
                            found: inner.field_number(),
                        });
                    }
                    break;
                }
                fields.push(read_payload(r, inner, inner_start, depth + 1)?);
            }
            RawValue::Group(fields)
        }
        WireType::EndGroup => return Err(CodecError::UnexpectedEndGroup(tag.field_number())),
    };
    Ok(RawField {
        field_number: tag.field_number(),
        wire_type: tag.wire_type(),
        value,
        range: (start, r.position()),
    })
}

/// Collect every top-level field, failing on the first malformed one.
pub fn scan_fields(data: &[u8]) -> Result<Vec<RawField<'_>>, CodecError> {
    FieldWalker::new(data).collect()
}

/// Check that `data` is a complete sequence of well-formed fields; returns the field count.
///
/// Uses skipping only, so nothing is allocated.
pub fn validate_fields(data: &[u8]) -> Result<usize, CodecError> {
    let mut r = Reader::new(data);
    let mut count = 0;
    while !r.is_at_end() {
        let tag = r.tag()?;
        r.skip_field(tag)?;
        count += 1;
    }
    Ok(count)
}

/// Re-emit `data` keeping only top-level fields whose number passes `keep`.
///
/// Kept fields are copied byte for byte, so their encoding (including any non-canonical varints)
/// is preserved.
pub fn retain_fields(data: &[u8], keep: impl Fn(u32) -> bool) -> Result<Vec<u8>, CodecError> {
    let mut r = Reader::new(data);
    let mut out = Vec::with_capacity(data.len());
    let mut dropped = 0usize;
    while !r.is_at_end() {
        let start = r.position();
        let tag = r.tag()?;
        r.skip_field(tag)?;
        if keep(tag.field_number()) {
            out.extend_from_slice(&data[start..r.position()]);
        } else {
            dropped += 1;
        }
    }
    tracing::trace!(dropped, kept_bytes = out.len(), "retain_fields");
    Ok(out)
}
