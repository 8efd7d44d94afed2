//! Append-only encoder with fork/ldelim framing for nested length-delimited content.
//!
//! The length of an embedded message is unknown until all of its fields are written. Instead of
//! a sizing pass, [`Writer::fork`] starts a fresh segment and [`Writer::ldelim`] splices
//! `[length varint][segment]` into the parent once the content is complete. Forks nest to any
//! depth and mirror the message structure.
//!
//! All puts write the payload only; callers write the field tag first with [`Writer::tag`]:
//!
//! ```
//! use protowire::{WireType, Writer};
//!
//! let mut w = Writer::new();
//! w.tag(3, WireType::LengthDelimited).fork();
//! w.tag(1, WireType::Varint).uint32(5);
//! w.ldelim();
//! assert_eq!(w.finish(), vec![0x1a, 0x02, 0x08, 0x05]);
//! ```

use crate::varint::{encode_varint, zigzag_encode32, zigzag_encode64};
use crate::wire::{Tag, WireType};
use byteorder::{ByteOrder, LittleEndian};

#[derive(Debug, Default)]
pub struct Writer {
    root: Vec<u8>,
    forks: Vec<Vec<u8>>,
}

impl Writer {
    pub fn new() -> Self {
        Writer::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Writer {
            root: Vec::with_capacity(capacity),
            forks: Vec::new(),
        }
    }

    /// Segment currently receiving bytes: the innermost fork, or the root.
    fn out(&mut self) -> &mut Vec<u8> {
        match self.forks.last_mut() {
            Some(seg) => seg,
            None => &mut self.root,
        }
    }

    /// Bytes written so far into the current segment.
    pub fn len(&self) -> usize {
        self.forks.last().map_or(self.root.len(), Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of open forks.
    pub fn depth(&self) -> usize {
        self.forks.len()
    }

    /// Write a field tag.
    ///
    /// # Panics
    ///
    /// If `field_number` is outside `1..=MAX_FIELD_NUMBER`.
    pub fn tag(&mut self, field_number: u32, wire_type: WireType) -> &mut Self {
        let packed = Tag::new(field_number, wire_type).pack();
        encode_varint(u64::from(packed), self.out());
        self
    }

    pub fn uint32(&mut self, v: u32) -> &mut Self {
        encode_varint(u64::from(v), self.out());
        self
    }

    /// Negative values are sign-extended and take ten bytes.
    pub fn int32(&mut self, v: i32) -> &mut Self {
        encode_varint(i64::from(v) as u64, self.out());
        self
    }

    pub fn sint32(&mut self, v: i32) -> &mut Self {
        encode_varint(u64::from(zigzag_encode32(v)), self.out());
        self
    }

    pub fn uint64(&mut self, v: u64) -> &mut Self {
        encode_varint(v, self.out());
        self
    }

    pub fn int64(&mut self, v: i64) -> &mut Self {
        encode_varint(v as u64, self.out());
        self
    }

    pub fn sint64(&mut self, v: i64) -> &mut Self {
        encode_varint(zigzag_encode64(v), self.out());
        self
    }

    pub fn bool(&mut self, v: bool) -> &mut Self {
        self.out().push(u8::from(v));
        self
    }

    /// Enum values travel as `int32`.
    pub fn enumeration(&mut self, v: i32) -> &mut Self {
        self.int32(v)
    }

    pub fn fixed32(&mut self, v: u32) -> &mut Self {
        let mut buf = [0u8; 4];
        LittleEndian::write_u32(&mut buf, v);
        self.out().extend_from_slice(&buf);
        self
    }

    pub fn sfixed32(&mut self, v: i32) -> &mut Self {
        self.fixed32(v as u32)
    }

    pub fn fixed64(&mut self, v: u64) -> &mut Self {
        let mut buf = [0u8; 8];
        LittleEndian::write_u64(&mut buf, v);
        self.out().extend_from_slice(&buf);
        self
    }

    pub fn sfixed64(&mut self, v: i64) -> &mut Self {
        self.fixed64(v as u64)
    }

    pub fn float(&mut self, v: f32) -> &mut Self {
        let mut buf = [0u8; 4];
        LittleEndian::write_f32(&mut buf, v);
        self.out().extend_from_slice(&buf);
        self
    }

    pub fn double(&mut self, v: f64) -> &mut Self {
        let mut buf = [0u8; 8];
        LittleEndian::write_f64(&mut buf, v);
        self.out().extend_from_slice(&buf);
        self
    }

    /// Length varint followed by the bytes verbatim.
    pub fn bytes(&mut self, b: &[u8]) -> &mut Self {
        let out = self.out();
        encode_varint(b.len() as u64, out);
        out.extend_from_slice(b);
        self
    }

    pub fn string(&mut self, s: &str) -> &mut Self {
        self.bytes(s.as_bytes())
    }

    /// Append already-encoded bytes with no framing (e.g. a field copied from another buffer).
    pub fn raw(&mut self, b: &[u8]) -> &mut Self {
        self.out().extend_from_slice(b);
        self
    }

    /// Start a nested segment; everything written until the matching [`ldelim`](Self::ldelim)
    /// becomes one length-delimited payload.
    pub fn fork(&mut self) -> &mut Self {
        self.forks.push(Vec::new());
        self
    }

    /// Close the innermost fork, writing its length and content into the parent segment.
    ///
    /// # Panics
    ///
    /// If no fork is open.
    pub fn ldelim(&mut self) -> &mut Self {
        let seg = match self.forks.pop() {
            Some(seg) => seg,
            None => panic!("ldelim() without a matching fork()"),
        };
        let out = self.out();
        encode_varint(seg.len() as u64, out);
        out.extend_from_slice(&seg);
        self
    }

    /// Write `values` as one packed repeated field. Empty lists write nothing.
    pub fn packed_uint32(&mut self, field_number: u32, values: &[u32]) -> &mut Self {
        if values.is_empty() {
            return self;
        }
        self.tag(field_number, WireType::LengthDelimited).fork();
        for &v in values {
            self.uint32(v);
        }
        self.ldelim()
    }

    pub fn packed_uint64(&mut self, field_number: u32, values: &[u64]) -> &mut Self {
        if values.is_empty() {
            return self;
        }
        self.tag(field_number, WireType::LengthDelimited).fork();
        for &v in values {
            self.uint64(v);
        }
        self.ldelim()
    }

    pub fn packed_fixed32(&mut self, field_number: u32, values: &[u32]) -> &mut Self {
        if values.is_empty() {
            return self;
        }
        // Fixed-width elements: the length is known up front, no fork needed.
        self.tag(field_number, WireType::LengthDelimited)
            .uint64(values.len() as u64 * 4);
        for &v in values {
            self.fixed32(v);
        }
        self
    }

    pub fn packed_fixed64(&mut self, field_number: u32, values: &[u64]) -> &mut Self {
        if values.is_empty() {
            return self;
        }
        self.tag(field_number, WireType::LengthDelimited)
            .uint64(values.len() as u64 * 8);
        for &v in values {
            self.fixed64(v);
        }
        self
    }

    /// Drop all written bytes and open forks, keeping the root allocation.
    pub fn reset(&mut self) {
        self.root.clear();
        self.forks.clear();
    }

    /// Return the encoded bytes.
    ///
    /// # Panics
    ///
    /// If a fork is still open.
    pub fn finish(self) -> Vec<u8> {
        assert!(
            self.forks.is_empty(),
            "finish() with {} unclosed fork(s)",
            self.forks.len()
        );
        self.root
    }
}
