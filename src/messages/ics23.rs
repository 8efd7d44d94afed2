//! Merkle proof leaf operations (`cosmos.ics23.v1`).

use crate::codec::{expect_wire_type, CodecError, EnumValue, Enumeration, Message};
use crate::reader::Reader;
use crate::wire::{Tag, WireType};
use crate::writer::Writer;

/// Hash function applied at a proof step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum HashOp {
    #[default]
    NoHash = 0,
    Sha256 = 1,
    Sha512 = 2,
    Keccak = 3,
    Ripemd160 = 4,
    /// ripemd160(sha256(x))
    Bitcoin = 5,
    Sha512_256 = 6,
}

impl Enumeration for HashOp {
    fn from_i32(v: i32) -> Option<Self> {
        match v {
            0 => Some(HashOp::NoHash),
            1 => Some(HashOp::Sha256),
            2 => Some(HashOp::Sha512),
            3 => Some(HashOp::Keccak),
            4 => Some(HashOp::Ripemd160),
            5 => Some(HashOp::Bitcoin),
            6 => Some(HashOp::Sha512_256),
            _ => None,
        }
    }

    fn to_i32(self) -> i32 {
        self as i32
    }

    fn as_str_name(self) -> &'static str {
        match self {
            HashOp::NoHash => "NO_HASH",
            HashOp::Sha256 => "SHA256",
            HashOp::Sha512 => "SHA512",
            HashOp::Keccak => "KECCAK",
            HashOp::Ripemd160 => "RIPEMD160",
            HashOp::Bitcoin => "BITCOIN",
            HashOp::Sha512_256 => "SHA512_256",
        }
    }

    fn from_str_name(name: &str) -> Option<Self> {
        match name {
            "NO_HASH" => Some(HashOp::NoHash),
            "SHA256" => Some(HashOp::Sha256),
            "SHA512" => Some(HashOp::Sha512),
            "KECCAK" => Some(HashOp::Keccak),
            "RIPEMD160" => Some(HashOp::Ripemd160),
            "BITCOIN" => Some(HashOp::Bitcoin),
            "SHA512_256" => Some(HashOp::Sha512_256),
            _ => None,
        }
    }
}

/// How the length of key/value data is prefixed before hashing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LengthOp {
    #[default]
    NoPrefix = 0,
    /// Protobuf-style varint.
    VarProto = 1,
    VarRlp = 2,
    Fixed32Big = 3,
    Fixed32Little = 4,
    Fixed64Big = 5,
    Fixed64Little = 6,
    /// No prefix; data must be exactly 32 bytes.
    Require32Bytes = 7,
    Require64Bytes = 8,
}

impl Enumeration for LengthOp {
    fn from_i32(v: i32) -> Option<Self> {
        match v {
            0 => Some(LengthOp::NoPrefix),
            1 => Some(LengthOp::VarProto),
            2 => Some(LengthOp::VarRlp),
            3 => Some(LengthOp::Fixed32Big),
            4 => Some(LengthOp::Fixed32Little),
            5 => Some(LengthOp::Fixed64Big),
            6 => Some(LengthOp::Fixed64Little),
            7 => Some(LengthOp::Require32Bytes),
            8 => Some(LengthOp::Require64Bytes),
            _ => None,
        }
    }

    fn to_i32(self) -> i32 {
        self as i32
    }

    fn as_str_name(self) -> &'static str {
        match self {
            LengthOp::NoPrefix => "NO_PREFIX",
            LengthOp::VarProto => "VAR_PROTO",
            LengthOp::VarRlp => "VAR_RLP",
            LengthOp::Fixed32Big => "FIXED32_BIG",
            LengthOp::Fixed32Little => "FIXED32_LITTLE",
            LengthOp::Fixed64Big => "FIXED64_BIG",
            LengthOp::Fixed64Little => "FIXED64_LITTLE",
            LengthOp::Require32Bytes => "REQUIRE_32_BYTES",
            LengthOp::Require64Bytes => "REQUIRE_64_BYTES",
        }
    }

    fn from_str_name(name: &str) -> Option<Self> {
        match name {
            "NO_PREFIX" => Some(LengthOp::NoPrefix),
            "VAR_PROTO" => Some(LengthOp::VarProto),
            "VAR_RLP" => Some(LengthOp::VarRlp),
            "FIXED32_BIG" => Some(LengthOp::Fixed32Big),
            "FIXED32_LITTLE" => Some(LengthOp::Fixed32Little),
            "FIXED64_BIG" => Some(LengthOp::Fixed64Big),
            "FIXED64_LITTLE" => Some(LengthOp::Fixed64Little),
            "REQUIRE_32_BYTES" => Some(LengthOp::Require32Bytes),
            "REQUIRE_64_BYTES" => Some(LengthOp::Require64Bytes),
            _ => None,
        }
    }
}

/// How a leaf hash is computed from key and value:
/// `hash(prefix || length(prehash_key(key)) || length(prehash_value(value)))`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct LeafOp {
    pub hash: EnumValue<HashOp>,
    pub prehash_key: EnumValue<HashOp>,
    pub prehash_value: EnumValue<HashOp>,
    pub length: EnumValue<LengthOp>,
    /// Leaf domain separator. Default empty.
    pub prefix: Vec<u8>,
}

impl Message for LeafOp {
    fn encode_raw(&self, w: &mut Writer) {
        let enums = [
            (1, self.hash.to_i32()),
            (2, self.prehash_key.to_i32()),
            (3, self.prehash_value.to_i32()),
            (4, self.length.to_i32()),
        ];
        for (field, v) in enums {
            if v != 0 {
                w.tag(field, WireType::Varint).enumeration(v);
            }
        }
        if !self.prefix.is_empty() {
            w.tag(5, WireType::LengthDelimited).bytes(&self.prefix);
        }
    }

    fn merge_field(&mut self, tag: Tag, r: &mut Reader<'_>) -> Result<bool, CodecError> {
        let varint = expect_wire_type(tag, WireType::Varint);
        match tag.field_number() {
            1 if varint => self.hash = EnumValue::from_i32(r.enumeration()?),
            2 if varint => self.prehash_key = EnumValue::from_i32(r.enumeration()?),
            3 if varint => self.prehash_value = EnumValue::from_i32(r.enumeration()?),
            4 if varint => self.length = EnumValue::from_i32(r.enumeration()?),
            5 if expect_wire_type(tag, WireType::LengthDelimited) => {
                self.prefix = r.bytes()?.to_vec();
            }
            _ => return Ok(false),
        }
        Ok(true)
    }
}
