//! Wire types and field tags.
//!
//! A tag packs a field number and a [`WireType`] as `field_number << 3 | wire_type` and is
//! itself written as a varint in front of every field.

use crate::codec::CodecError;
use std::fmt;

/// Largest field number a tag can carry (29 bits).
pub const MAX_FIELD_NUMBER: u32 = (1 << 29) - 1;

/// How a field's payload is framed on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireType {
    Varint = 0,
    Fixed64 = 1,
    LengthDelimited = 2,
    /// Legacy group start; skippable, never written.
    StartGroup = 3,
    /// Legacy group end; skippable, never written.
    EndGroup = 4,
    Fixed32 = 5,
}

impl WireType {
    pub fn from_u8(v: u8) -> Result<WireType, CodecError> {
        Ok(match v {
            0 => WireType::Varint,
            1 => WireType::Fixed64,
            2 => WireType::LengthDelimited,
            3 => WireType::StartGroup,
            4 => WireType::EndGroup,
            5 => WireType::Fixed32,
            other => return Err(CodecError::InvalidWireType(other)),
        })
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Scalar wire types that may appear inside a packed repeated field.
    pub fn is_packable(self) -> bool {
        matches!(self, WireType::Varint | WireType::Fixed64 | WireType::Fixed32)
    }
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WireType::Varint => "varint",
            WireType::Fixed64 => "fixed64",
            WireType::LengthDelimited => "length-delimited",
            WireType::StartGroup => "start-group",
            WireType::EndGroup => "end-group",
            WireType::Fixed32 => "fixed32",
        };
        f.write_str(name)
    }
}

/// A field number paired with its wire type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tag {
    field_number: u32,
    wire_type: WireType,
}

impl Tag {
    /// Build a tag for writing.
    ///
    /// # Panics
    ///
    /// If `field_number` is 0 or above [`MAX_FIELD_NUMBER`]; such a tag can only come from a
    /// codec bug, never from input data.
    pub fn new(field_number: u32, wire_type: WireType) -> Tag {
        assert!(
            (1..=MAX_FIELD_NUMBER).contains(&field_number),
            "field number {} out of range",
            field_number
        );
        Tag {
            field_number,
            wire_type,
        }
    }

    /// Split a raw tag value read from the wire.
    pub fn unpack(raw: u64) -> Result<Tag, CodecError> {
        let wire_type = WireType::from_u8((raw & 7) as u8)?;
        let field_number = raw >> 3;
        if field_number == 0 || field_number > u64::from(MAX_FIELD_NUMBER) {
            return Err(CodecError::InvalidFieldNumber(field_number));
        }
        Ok(Tag {
            field_number: field_number as u32,
            wire_type,
        })
    }

    pub fn pack(self) -> u32 {
        (self.field_number << 3) | u32::from(self.wire_type.as_u8())
    }

    pub fn field_number(self) -> u32 {
        self.field_number
    }

    pub fn wire_type(self) -> WireType {
        self.wire_type
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.field_number, self.wire_type)
    }
}
