//! # protowire: Protocol Buffers binary wire-format codec
//!
//! The writer/reader pair that generated message types call into, bit-exact with any
//! standards-compliant protobuf implementation.
//!
//! ## Wire format
//!
//! - Every field is `[tag varint][payload]`, with `tag = field_number << 3 | wire_type`.
//! - **Varint** (0): 7 bits per byte, high bit = continuation. Negative `int32`/`int64` are
//!   written as their 64-bit two's-complement pattern (ten bytes); `sint32`/`sint64` use zig-zag.
//! - **Fixed64** (1) / **Fixed32** (5): 8 / 4 raw little-endian bytes.
//! - **Length-delimited** (2): `[length varint][bytes]` for bytes, strings, embedded messages
//!   and packed repeated scalars.
//! - **Groups** (3/4): legacy; skipped on input, never written.
//!
//! ## Pieces
//!
//! - [`Writer`]: typed puts plus `fork`/`ldelim` to length-prefix nested content without a
//!   sizing pass.
//! - [`Reader`]: bounded cursor with typed gets, [`Reader::skip_field`] for unknown fields, and
//!   `push_limit`/`pop_limit` for embedded messages.
//! - [`Message`] / [`Enumeration`]: what generated types implement; the decode loop lives here.
//! - [`walk`], [`dump`]: schema-less inspection. [`frame`]: length-prefixed streams.
//!
//! ## Example
//!
//! ```
//! use protowire::{Message, Reader, WireType, Writer};
//! use protowire::messages::clob::SubaccountId;
//!
//! let id = SubaccountId { owner: "dydx1abc".to_string(), number: 2 };
//! let bytes = id.encode_to_vec();
//! assert_eq!(SubaccountId::decode(&bytes).unwrap(), id);
//!
//! let mut w = Writer::new();
//! w.tag(1, WireType::LengthDelimited).bytes(&[1, 2, 3]);
//! let out = w.finish();
//! assert_eq!(out, [0x0a, 0x03, 0x01, 0x02, 0x03]);
//!
//! let mut r = Reader::new(&out);
//! let tag = r.tag().unwrap();
//! assert_eq!((tag.field_number(), tag.wire_type()), (1, WireType::LengthDelimited));
//! assert_eq!(r.bytes().unwrap(), &[1, 2, 3]);
//! ```

pub mod codec;
pub mod dump;
pub mod frame;
pub mod messages;
pub mod reader;
pub mod value;
pub mod varint;
pub mod walk;
pub mod wire;
pub mod writer;

pub use codec::{CodecError, EnumValue, Enumeration, Message};
pub use dump::dump_message;
pub use frame::{decode_frame, encode_frame, FrameDecodeResult};
pub use reader::{Reader, RECURSION_LIMIT};
pub use value::{RawField, RawValue};
pub use varint::MAX_VARINT_LEN;
pub use walk::{retain_fields, scan_fields, validate_fields, FieldWalker};
pub use wire::{Tag, WireType, MAX_FIELD_NUMBER};
pub use writer::Writer;
