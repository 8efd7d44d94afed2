//! Bounded cursor over encoded bytes.
//!
//! A [`Reader`] borrows its input for its whole lifetime and hands out borrowed slices for
//! `bytes`/`string` fields. Every read checks the current bound before consuming anything, so
//! input that lies about its lengths fails with an error instead of over-reading.
//!
//! Embedded messages are decoded by narrowing the bound with [`Reader::push_limit`] and
//! restoring it with [`Reader::pop_limit`], which also checks that the nested decode stopped
//! exactly at its declared end.

use crate::codec::CodecError;
use crate::varint::{decode_varint, skip_varint, zigzag_decode32, zigzag_decode64};
use crate::wire::{Tag, WireType};
use byteorder::{ByteOrder, LittleEndian};

/// Deepest group nesting [`Reader::skip_field`] will follow.
pub const RECURSION_LIMIT: u32 = 100;

#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
    end: usize,
}

impl<'a> Reader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Reader {
            data,
            pos: 0,
            end: data.len(),
        }
    }

    /// Current offset into the input.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Current bound; reads never go past it.
    pub fn end(&self) -> usize {
        self.end
    }

    pub fn remaining(&self) -> usize {
        self.end - self.pos
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.end
    }

    /// The whole input, independent of the current bound.
    pub fn source(&self) -> &'a [u8] {
        self.data
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], CodecError> {
        if n > self.remaining() {
            return Err(CodecError::Truncated {
                needed: n,
                remaining: self.remaining(),
            });
        }
        let out = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }

    fn varint(&mut self) -> Result<u64, CodecError> {
        decode_varint(self.data, &mut self.pos, self.end)
    }

    pub fn tag(&mut self) -> Result<Tag, CodecError> {
        let raw = self.varint()?;
        Tag::unpack(raw)
    }

    /// Reads a full varint and keeps the low 32 bits.
    pub fn uint32(&mut self) -> Result<u32, CodecError> {
        Ok(self.varint()? as u32)
    }

    pub fn int32(&mut self) -> Result<i32, CodecError> {
        Ok(self.varint()? as i32)
    }

    pub fn sint32(&mut self) -> Result<i32, CodecError> {
        Ok(zigzag_decode32(self.varint()? as u32))
    }

    pub fn uint64(&mut self) -> Result<u64, CodecError> {
        self.varint()
    }

    pub fn int64(&mut self) -> Result<i64, CodecError> {
        Ok(self.varint()? as i64)
    }

    pub fn sint64(&mut self) -> Result<i64, CodecError> {
        Ok(zigzag_decode64(self.varint()?))
    }

    /// Any non-zero varint is `true`.
    pub fn bool(&mut self) -> Result<bool, CodecError> {
        Ok(self.varint()? != 0)
    }

    pub fn enumeration(&mut self) -> Result<i32, CodecError> {
        self.int32()
    }

    pub fn fixed32(&mut self) -> Result<u32, CodecError> {
        Ok(LittleEndian::read_u32(self.take(4)?))
    }

    pub fn sfixed32(&mut self) -> Result<i32, CodecError> {
        Ok(self.fixed32()? as i32)
    }

    pub fn fixed64(&mut self) -> Result<u64, CodecError> {
        Ok(LittleEndian::read_u64(self.take(8)?))
    }

    pub fn sfixed64(&mut self) -> Result<i64, CodecError> {
        Ok(self.fixed64()? as i64)
    }

    pub fn float(&mut self) -> Result<f32, CodecError> {
        Ok(LittleEndian::read_f32(self.take(4)?))
    }

    pub fn double(&mut self) -> Result<f64, CodecError> {
        Ok(LittleEndian::read_f64(self.take(8)?))
    }

    /// Read a length prefix and check it fits inside the current bound.
    pub fn length(&mut self) -> Result<usize, CodecError> {
        let declared = self.varint()?;
        let remaining = self.remaining();
        if declared > remaining as u64 {
            return Err(CodecError::LengthOverrun {
                declared,
                remaining,
            });
        }
        Ok(declared as usize)
    }

    pub fn bytes(&mut self) -> Result<&'a [u8], CodecError> {
        let len = self.length()?;
        self.take(len)
    }

    pub fn string(&mut self) -> Result<&'a str, CodecError> {
        let b = self.bytes()?;
        Ok(std::str::from_utf8(b)?)
    }

    /// Narrow the bound to the next `len` bytes. Returns the previous bound for
    /// [`pop_limit`](Self::pop_limit).
    pub fn push_limit(&mut self, len: usize) -> Result<usize, CodecError> {
        if len > self.remaining() {
            return Err(CodecError::LengthOverrun {
                declared: len as u64,
                remaining: self.remaining(),
            });
        }
        let old = self.end;
        self.end = self.pos + len;
        Ok(old)
    }

    /// Restore the bound saved by [`push_limit`](Self::push_limit). The cursor must sit exactly
    /// on the narrowed end.
    pub fn pop_limit(&mut self, old_end: usize) -> Result<(), CodecError> {
        if self.pos != self.end {
            return Err(CodecError::LengthMismatch {
                expected: self.end,
                actual: self.pos,
            });
        }
        self.end = old_end;
        Ok(())
    }

    /// Read a length prefix, then run `f` with the bound narrowed to that payload.
    pub fn read_limited<T>(
        &mut self,
        f: impl FnOnce(&mut Reader<'a>) -> Result<T, CodecError>,
    ) -> Result<T, CodecError> {
        let len = self.length()?;
        let old = self.push_limit(len)?;
        let out = f(self)?;
        self.pop_limit(old)?;
        Ok(out)
    }

    /// Advance past one field's payload without interpreting it.
    pub fn skip_field(&mut self, tag: Tag) -> Result<(), CodecError> {
        self.skip_field_at_depth(tag, 0)
    }

    fn skip_field_at_depth(&mut self, tag: Tag, depth: u32) -> Result<(), CodecError> {
        match tag.wire_type() {
            WireType::Varint => skip_varint(self.data, &mut self.pos, self.end)?,
            WireType::Fixed64 => {
                self.take(8)?;
            }
            WireType::Fixed32 => {
                self.take(4)?;
            }
            WireType::LengthDelimited => {
                self.bytes()?;
            }
            WireType::StartGroup => {
                if depth >= RECURSION_LIMIT {
                    return Err(CodecError::RecursionLimit);
                }
                loop {
                    let inner = self.tag()?;
                    if inner.wire_type() == WireType::EndGroup {
                        if inner.field_number() != tag.field_number() {
                            return Err(CodecError::GroupMismatch {
                                expected: tag.field_number(),
                                found: inner.field_number(),
                            });
                        }
                        break;
                    }
                    self.skip_field_at_depth(inner, depth + 1)?;
                }
            }
            WireType::EndGroup => {
                return Err(CodecError::UnexpectedEndGroup(tag.field_number()));
            }
        }
        Ok(())
    }

    /// Decode one element of a repeated varint field into `out`, accepting both the packed
    /// (one length-delimited run) and the one-tag-per-element form.
    pub fn packed_varints<T>(
        &mut self,
        tag: Tag,
        out: &mut Vec<T>,
        mut read: impl FnMut(&mut Reader<'a>) -> Result<T, CodecError>,
    ) -> Result<bool, CodecError> {
        match tag.wire_type() {
            WireType::LengthDelimited => {
                self.read_limited(|r| {
                    while !r.is_at_end() {
                        out.push(read(r)?);
                    }
                    Ok(())
                })?;
                Ok(true)
            }
            WireType::Varint => {
                out.push(read(self)?);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Like [`packed_varints`](Self::packed_varints) for `fixed32`/`sfixed32`/`float` elements.
    pub fn packed_fixed32<T>(
        &mut self,
        tag: Tag,
        out: &mut Vec<T>,
        read: impl FnMut(&mut Reader<'a>) -> Result<T, CodecError>,
    ) -> Result<bool, CodecError> {
        self.packed_fixed(tag, WireType::Fixed32, out, read)
    }

    /// Like [`packed_varints`](Self::packed_varints) for `fixed64`/`sfixed64`/`double` elements.
    pub fn packed_fixed64<T>(
        &mut self,
        tag: Tag,
        out: &mut Vec<T>,
        read: impl FnMut(&mut Reader<'a>) -> Result<T, CodecError>,
    ) -> Result<bool, CodecError> {
        self.packed_fixed(tag, WireType::Fixed64, out, read)
    }

    fn packed_fixed<T>(
        &mut self,
        tag: Tag,
        element: WireType,
        out: &mut Vec<T>,
        mut read: impl FnMut(&mut Reader<'a>) -> Result<T, CodecError>,
    ) -> Result<bool, CodecError> {
        if tag.wire_type() == element {
            out.push(read(self)?);
            return Ok(true);
        }
        if tag.wire_type() != WireType::LengthDelimited {
            return Ok(false);
        }
        self.read_limited(|r| {
            // Fixed-width runs know their element count up front.
            let width = if element == WireType::Fixed32 { 4 } else { 8 };
            out.reserve(r.remaining() / width);
            while !r.is_at_end() {
                out.push(read(r)?);
            }
            Ok(())
        })?;
        Ok(true)
    }
}
