//! Codec errors and the message/enum traits that generated types implement.
//!
//! A message type supplies two bodies: [`Message::encode_raw`], which writes its non-default
//! fields in field-number order, and [`Message::merge_field`], which handles one field of the
//! decode loop. Everything else (top-level encode/decode, embedded-message framing, bounded
//! sub-message decode, skipping unknown fields) is provided here, so every message shares one
//! decode loop.

use crate::reader::Reader;
use crate::wire::{Tag, WireType};
use crate::writer::Writer;

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),
    #[error("truncated input: needed {needed} byte(s), {remaining} remaining")]
    Truncated { needed: usize, remaining: usize },
    #[error("varint longer than 10 bytes or wider than 64 bits")]
    VarintOverflow,
    #[error("length-delimited payload of {declared} byte(s) exceeds the {remaining} remaining")]
    LengthOverrun { declared: u64, remaining: usize },
    #[error("invalid wire type {0}")]
    InvalidWireType(u8),
    #[error("invalid field number {0}")]
    InvalidFieldNumber(u64),
    #[error("invalid UTF-8 in string field: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
    #[error("end-group tag for field {0} without a matching start-group")]
    UnexpectedEndGroup(u32),
    #[error("group for field {expected} closed by end-group for field {found}")]
    GroupMismatch { expected: u32, found: u32 },
    #[error("groups nested too deeply")]
    RecursionLimit,
    #[error("embedded message should end at offset {expected}, decoder stopped at {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

/// A protobuf message with a fixed field layout.
pub trait Message: Default {
    /// Write every non-default field, without any outer length prefix.
    fn encode_raw(&self, w: &mut Writer);

    /// Decode one field whose tag has already been read.
    ///
    /// Returns `Ok(false)` when the field number is unknown to this message or arrives with a
    /// wire type it cannot hold; the caller then skips the payload.
    fn merge_field(&mut self, tag: Tag, r: &mut Reader<'_>) -> Result<bool, CodecError>;

    fn encode_to_vec(&self) -> Vec<u8> {
        let mut w = Writer::new();
        self.encode_raw(&mut w);
        w.finish()
    }

    fn encoded_len(&self) -> usize {
        self.encode_to_vec().len()
    }

    /// Write this message as embedded field `field_number`.
    fn encode_nested(&self, field_number: u32, w: &mut Writer) {
        w.tag(field_number, WireType::LengthDelimited).fork();
        self.encode_raw(w);
        w.ldelim();
    }

    fn decode(buf: &[u8]) -> Result<Self, CodecError> {
        let mut r = Reader::new(buf);
        let mut msg = Self::default();
        msg.merge_from(&mut r, None)?;
        Ok(msg)
    }

    /// Run the decode loop until the reader's bound, or for exactly `length` bytes.
    fn merge_from(&mut self, r: &mut Reader<'_>, length: Option<usize>) -> Result<(), CodecError> {
        let saved = match length {
            Some(n) => Some(r.push_limit(n)?),
            None => None,
        };
        while !r.is_at_end() {
            let tag = r.tag()?;
            if !self.merge_field(tag, r)? {
                tracing::trace!(
                    field = tag.field_number(),
                    wire_type = %tag.wire_type(),
                    "skipping unknown field"
                );
                r.skip_field(tag)?;
            }
        }
        if let Some(old) = saved {
            r.pop_limit(old)?;
        }
        Ok(())
    }

    /// Merge an embedded message: a length prefix followed by that many bytes of fields.
    fn merge_length_delimited(&mut self, r: &mut Reader<'_>) -> Result<(), CodecError> {
        let len = r.length()?;
        self.merge_from(r, Some(len))
    }
}

/// Closed protobuf enum with a fixed set of named values.
pub trait Enumeration: Copy + Sized + 'static {
    fn from_i32(v: i32) -> Option<Self>;
    fn to_i32(self) -> i32;
    /// Name as written in the schema (`SIDE_BUY`).
    fn as_str_name(self) -> &'static str;
    fn from_str_name(name: &str) -> Option<Self>;
}

/// An enum field as decoded: a known variant, or an integer this build does not know.
///
/// Unknown integers are kept verbatim and written back unchanged, so messages can be relayed
/// through an older build without losing values added by a newer peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumValue<E> {
    Known(E),
    Unrecognized(i32),
}

impl<E: Enumeration> EnumValue<E> {
    pub fn from_i32(v: i32) -> Self {
        match E::from_i32(v) {
            Some(e) => EnumValue::Known(e),
            None => EnumValue::Unrecognized(v),
        }
    }

    pub fn to_i32(self) -> i32 {
        match self {
            EnumValue::Known(e) => e.to_i32(),
            EnumValue::Unrecognized(v) => v,
        }
    }

    pub fn known(self) -> Option<E> {
        match self {
            EnumValue::Known(e) => Some(e),
            EnumValue::Unrecognized(_) => None,
        }
    }

    pub fn is_unrecognized(self) -> bool {
        matches!(self, EnumValue::Unrecognized(_))
    }

    /// Schema name, or `"UNRECOGNIZED"`.
    pub fn as_str_name(self) -> &'static str {
        match self {
            EnumValue::Known(e) => e.as_str_name(),
            EnumValue::Unrecognized(_) => "UNRECOGNIZED",
        }
    }

    /// Accepts a schema name; anything else maps to the `-1` sentinel.
    pub fn from_str_name(name: &str) -> Self {
        match E::from_str_name(name) {
            Some(e) => EnumValue::Known(e),
            None => EnumValue::Unrecognized(-1),
        }
    }
}

impl<E: Enumeration + Default> Default for EnumValue<E> {
    fn default() -> Self {
        EnumValue::Known(E::default())
    }
}

impl<E> From<E> for EnumValue<E> {
    fn from(e: E) -> Self {
        EnumValue::Known(e)
    }
}

/// Whether an incoming tag carries the wire type a field expects. Mismatches are treated as
/// unknown fields.
#[inline]
pub fn expect_wire_type(tag: Tag, expected: WireType) -> bool {
    tag.wire_type() == expected
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    enum Color {
        #[default]
        Unspecified,
        Red,
    }

    impl Enumeration for Color {
        fn from_i32(v: i32) -> Option<Self> {
            match v {
                0 => Some(Color::Unspecified),
                1 => Some(Color::Red),
                _ => None,
            }
        }

        fn to_i32(self) -> i32 {
            self as i32
        }

        fn as_str_name(self) -> &'static str {
            match self {
                Color::Unspecified => "COLOR_UNSPECIFIED",
                Color::Red => "COLOR_RED",
            }
        }

        fn from_str_name(name: &str) -> Option<Self> {
            match name {
                "COLOR_UNSPECIFIED" => Some(Color::Unspecified),
                "COLOR_RED" => Some(Color::Red),
                _ => None,
            }
        }
    }

    #[derive(Debug, Default, PartialEq)]
    struct Pair {
        a: u32,
        b: u32,
    }

    impl Message for Pair {
        fn encode_raw(&self, w: &mut Writer) {
            if self.a != 0 {
                w.tag(1, WireType::Varint).uint32(self.a);
            }
            if self.b != 0 {
                w.tag(2, WireType::Varint).uint32(self.b);
            }
        }

        fn merge_field(&mut self, tag: Tag, r: &mut Reader<'_>) -> Result<bool, CodecError> {
            match tag.field_number() {
                1 if expect_wire_type(tag, WireType::Varint) => self.a = r.uint32()?,
                2 if expect_wire_type(tag, WireType::Varint) => self.b = r.uint32()?,
                _ => return Ok(false),
            }
            Ok(true)
        }
    }

    #[test]
    fn enum_value_keeps_unknown_integer() {
        let v: EnumValue<Color> = EnumValue::from_i32(42);
        assert!(v.is_unrecognized());
        assert_eq!(v.to_i32(), 42);
        assert_eq!(v.as_str_name(), "UNRECOGNIZED");
        assert_eq!(EnumValue::<Color>::from_i32(1).known(), Some(Color::Red));
    }

    #[test]
    fn enum_value_names() {
        assert_eq!(EnumValue::<Color>::from_str_name("COLOR_RED"), EnumValue::Known(Color::Red));
        assert_eq!(EnumValue::<Color>::from_str_name("nope"), EnumValue::Unrecognized(-1));
        assert_eq!(EnumValue::<Color>::default(), EnumValue::Known(Color::Unspecified));
    }

    #[test]
    fn decode_skips_unknown_and_mismatched_fields() {
        // a=1, field 2 as fixed32 (wrong type, skipped), field 9 bytes, b=3
        let buf = hex!("08 01 15 00 00 00 00 4a 01 ff 10 03");
        let p = Pair::decode(&buf).expect("decode");
        assert_eq!(p, Pair { a: 1, b: 3 });
    }

    #[test]
    fn merge_from_with_length_stops_at_bound() {
        let buf = hex!("08 01 10 02");
        let mut r = Reader::new(&buf);
        let mut p = Pair::default();
        p.merge_from(&mut r, Some(2)).unwrap();
        assert_eq!(p, Pair { a: 1, b: 0 });
        assert_eq!(r.position(), 2);
        assert_eq!(r.end(), 4);
    }

    #[test]
    fn bounded_decode_fails_when_field_straddles_bound() {
        // Bound of 1 byte cuts the varint field in half.
        let buf = hex!("08 01");
        let mut r = Reader::new(&buf);
        let mut p = Pair::default();
        assert!(p.merge_from(&mut r, Some(1)).is_err());
    }

    #[test]
    fn encode_nested_and_merge_length_delimited() {
        let mut w = Writer::new();
        Pair { a: 5, b: 0 }.encode_nested(3, &mut w);
        let out = w.finish();
        assert_eq!(out, hex!("1a 02 08 05"));

        let mut r = Reader::new(&out);
        assert_eq!(r.tag().unwrap(), Tag::new(3, WireType::LengthDelimited));
        let mut p = Pair::default();
        p.merge_length_delimited(&mut r).unwrap();
        assert_eq!(p.a, 5);
        assert!(r.is_at_end());
    }
}
