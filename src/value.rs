//! Undecoded field payloads, as produced by the schema-less [walk](crate::walk).

use crate::wire::WireType;

/// One field as it appears on the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct RawField<'a> {
    pub field_number: u32,
    pub wire_type: WireType,
    pub value: RawValue<'a>,
    /// Byte range of the whole field (tag included) in the walked buffer.
    pub range: (usize, usize),
}

/// A payload before any schema gives it meaning.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue<'a> {
    Varint(u64),
    Fixed64(u64),
    Fixed32(u32),
    Bytes(&'a [u8]),
    /// Fields between a start-group tag and its end-group.
    Group(Vec<RawField<'a>>),
}

impl<'a> RawValue<'a> {
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            RawValue::Varint(x) => Some(*x),
            RawValue::Fixed64(x) => Some(*x),
            RawValue::Fixed32(x) => Some(u64::from(*x)),
            _ => None,
        }
    }

    /// Varints read as plain `int64`, fixed values as `sfixed32`/`sfixed64`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            RawValue::Varint(x) => Some(*x as i64),
            RawValue::Fixed64(x) => Some(*x as i64),
            RawValue::Fixed32(x) => Some(i64::from(*x as i32)),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        match self {
            RawValue::Fixed32(x) => Some(f32::from_bits(*x)),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            RawValue::Fixed64(x) => Some(f64::from_bits(*x)),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&'a [u8]> {
        match self {
            RawValue::Bytes(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&'a str> {
        self.as_bytes().and_then(|b| std::str::from_utf8(b).ok())
    }

    pub fn as_group(&self) -> Option<&[RawField<'a>]> {
        match self {
            RawValue::Group(fields) => Some(fields.as_slice()),
            _ => None,
        }
    }
}
