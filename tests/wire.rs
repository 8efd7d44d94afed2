//! Wire-level properties: concrete byte layouts, varint boundaries, skipping, bounded decode and
//! malformed-input rejection.

use hex_literal::hex;
use protowire::messages::clob::SubaccountId;
use protowire::{scan_fields, validate_fields, CodecError, Message, Reader, Tag, WireType, Writer};

#[test]
fn bytes_field_layout() {
    let mut w = Writer::new();
    w.tag(1, WireType::LengthDelimited).bytes(&[1, 2, 3]);
    assert_eq!(w.finish(), hex!("0a 03 01 02 03"));
}

#[test]
fn nested_message_layout() {
    let mut w = Writer::new();
    w.tag(3, WireType::LengthDelimited).fork();
    w.tag(1, WireType::Varint).uint32(5);
    w.ldelim();
    assert_eq!(w.finish(), hex!("1a 02 08 05"));
}

#[test]
fn unknown_varint_between_known_fields() {
    // 1: 7, 99: 300 (unknown), 2: "ok"
    let mut w = Writer::new();
    w.tag(1, WireType::Varint).uint32(7);
    w.tag(99, WireType::Varint).uint32(300);
    w.tag(2, WireType::LengthDelimited).string("ok");
    let buf = w.finish();
    assert_eq!(&buf[2..6], &hex!("98 06 ac 02"));

    let mut r = Reader::new(&buf);
    let mut first = None;
    let mut second = None;
    while !r.is_at_end() {
        let tag = r.tag().unwrap();
        match tag.field_number() {
            1 => first = Some(r.uint32().unwrap()),
            2 => second = Some(r.string().unwrap()),
            _ => r.skip_field(tag).unwrap(),
        }
    }
    assert_eq!(first, Some(7));
    assert_eq!(second, Some("ok"));
    assert_eq!(r.position(), buf.len());
}

/// Skipping each wire type must land exactly where a typed read would.
#[test]
fn skip_matches_typed_read_for_every_wire_type() {
    let wire_types = [
        WireType::Varint,
        WireType::Fixed64,
        WireType::LengthDelimited,
        WireType::Fixed32,
    ];
    for wire_type in wire_types {
        let mut w = Writer::new();
        w.tag(1, WireType::Varint).uint32(11);
        w.tag(50, wire_type);
        match wire_type {
            WireType::Varint => w.uint64(u64::MAX),
            WireType::Fixed64 => w.double(3.5),
            WireType::LengthDelimited => w.bytes(&[9; 130]),
            WireType::Fixed32 => w.float(-1.25),
            other => panic!("no payload for {}", other),
        };
        w.tag(2, WireType::Varint).uint32(22);
        let buf = w.finish();

        let mut r = Reader::new(&buf);
        assert_eq!(r.tag().unwrap().field_number(), 1);
        assert_eq!(r.uint32().unwrap(), 11);
        let unknown = r.tag().unwrap();
        assert_eq!(unknown.wire_type(), wire_type);
        r.skip_field(unknown).unwrap();
        assert_eq!(r.tag().unwrap().field_number(), 2, "after skipping {}", wire_type);
        assert_eq!(r.uint32().unwrap(), 22);
        assert!(r.is_at_end());
    }
}

#[test]
fn skip_legacy_group_between_known_fields() {
    // 1: 1, group 7 { 1: 2, 2: "x" }, 2: 3
    let buf = hex!("08 01 3b 08 02 12 01 78 3c 10 03");
    let mut r = Reader::new(&buf);
    let mut seen = Vec::new();
    while !r.is_at_end() {
        let tag = r.tag().unwrap();
        if tag.wire_type() == WireType::Varint {
            seen.push((tag.field_number(), r.uint32().unwrap()));
        } else {
            r.skip_field(tag).unwrap();
        }
    }
    assert_eq!(seen, vec![(1, 1), (2, 3)]);
}

#[test]
fn varint_boundaries_in_32_and_64_bit_contexts() {
    let values: [u64; 7] = [0, 127, 128, (1 << 31) - 1, 1 << 32, (1 << 63) - 1, u64::MAX];
    for v in values {
        let mut w = Writer::new();
        w.uint64(v).int64(v as i64);
        if let Ok(v32) = u32::try_from(v) {
            w.uint32(v32).int32(v32 as i32);
        }
        let buf = w.finish();
        let mut r = Reader::new(&buf);
        assert_eq!(r.uint64().unwrap(), v);
        assert_eq!(r.int64().unwrap(), v as i64);
        if let Ok(v32) = u32::try_from(v) {
            assert_eq!(r.uint32().unwrap(), v32);
            assert_eq!(r.int32().unwrap(), v32 as i32);
        }
        assert!(r.is_at_end(), "value {}", v);
    }
}

#[test]
fn fixed_and_signed_scalars_at_extremes() {
    let mut w = Writer::new();
    for v in [0, u32::MAX] {
        w.fixed32(v);
    }
    for v in [i32::MIN, 0, i32::MAX] {
        w.sfixed32(v).sint32(v).int32(v);
    }
    for v in [0, u64::MAX] {
        w.fixed64(v);
    }
    for v in [i64::MIN, 0, i64::MAX] {
        w.sfixed64(v).sint64(v).int64(v);
    }
    for v in [f32::MIN, 0.0, f32::MAX, f32::INFINITY] {
        w.float(v);
    }
    for v in [f64::MIN, 0.0, -0.0, f64::MAX, f64::NEG_INFINITY] {
        w.double(v);
    }
    let buf = w.finish();

    let mut r = Reader::new(&buf);
    for v in [0, u32::MAX] {
        assert_eq!(r.fixed32().unwrap(), v);
    }
    for v in [i32::MIN, 0, i32::MAX] {
        assert_eq!(r.sfixed32().unwrap(), v);
        assert_eq!(r.sint32().unwrap(), v);
        assert_eq!(r.int32().unwrap(), v);
    }
    for v in [0, u64::MAX] {
        assert_eq!(r.fixed64().unwrap(), v);
    }
    for v in [i64::MIN, 0, i64::MAX] {
        assert_eq!(r.sfixed64().unwrap(), v);
        assert_eq!(r.sint64().unwrap(), v);
        assert_eq!(r.int64().unwrap(), v);
    }
    for v in [f32::MIN, 0.0, f32::MAX, f32::INFINITY] {
        assert_eq!(r.float().unwrap(), v);
    }
    for v in [f64::MIN, 0.0, -0.0, f64::MAX, f64::NEG_INFINITY] {
        assert_eq!(r.double().unwrap().to_bits(), f64::to_bits(v));
    }
    assert!(r.is_at_end());
}

#[test]
fn nan_survives_fixed_width_roundtrip() {
    let mut w = Writer::new();
    w.float(f32::NAN).double(f64::NAN);
    let buf = w.finish();
    let mut r = Reader::new(&buf);
    assert!(r.float().unwrap().is_nan());
    assert!(r.double().unwrap().is_nan());
}

#[test]
fn int32_minimum_and_negative_int64() {
    let mut w = Writer::new();
    w.int32(i32::MIN).int64(i64::MIN).sint32(i32::MIN).sint64(i64::MAX);
    let buf = w.finish();
    let mut r = Reader::new(&buf);
    assert_eq!(r.int32().unwrap(), i32::MIN);
    assert_eq!(r.int64().unwrap(), i64::MIN);
    assert_eq!(r.sint32().unwrap(), i32::MIN);
    assert_eq!(r.sint64().unwrap(), i64::MAX);
}

#[test]
fn never_terminating_varint_is_rejected() {
    let buf = hex!("08 ff ff ff");
    let mut r = Reader::new(&buf);
    r.tag().unwrap();
    assert!(matches!(r.uint64(), Err(CodecError::Truncated { .. })));

    let endless = [0xffu8; 32];
    let mut r = Reader::new(&endless);
    assert!(matches!(r.uint64(), Err(CodecError::VarintOverflow)));
}

#[test]
fn skip_rejects_never_terminating_varint() {
    let buf = hex!("ff ff");
    let mut r = Reader::new(&buf);
    assert!(r.skip_field(Tag::new(1, WireType::Varint)).is_err());
}

#[test]
fn overlong_varint_fails_whether_field_is_known_or_not() {
    // Same payload on known field 2 (number) and unknown field 9.
    let payload = hex!("ff ff ff ff ff ff ff ff ff 7f");
    for field in [2u32, 9] {
        let mut w = Writer::new();
        w.tag(field, WireType::Varint).raw(&payload);
        let buf = w.finish();
        assert!(
            SubaccountId::decode(&buf).is_err(),
            "field {} accepted an overlong varint",
            field
        );
        assert_eq!(validate_fields(&buf).is_ok(), scan_fields(&buf).is_ok());
    }
}

#[test]
fn lying_length_prefix_is_rejected_without_reading() {
    // Declares 2^32 bytes of content.
    let buf = hex!("0a 80 80 80 80 10 00");
    let mut r = Reader::new(&buf);
    r.tag().unwrap();
    assert!(matches!(r.bytes(), Err(CodecError::LengthOverrun { .. })));
}

#[derive(Debug, Default, PartialEq)]
struct Inner {
    value: u32,
}

impl Message for Inner {
    fn encode_raw(&self, w: &mut Writer) {
        if self.value != 0 {
            w.tag(1, WireType::Varint).uint32(self.value);
        }
    }

    fn merge_field(&mut self, tag: Tag, r: &mut Reader<'_>) -> Result<bool, CodecError> {
        match (tag.field_number(), tag.wire_type()) {
            (1, WireType::Varint) => self.value = r.uint32()?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

#[test]
fn bounded_decode_leaves_parent_cursor_at_declared_end() {
    // 3: { 1: 5, 9: "zz" }, 4: 1
    let buf = hex!("1a 06 08 05 4a 02 7a 7a 20 01");
    let mut r = Reader::new(&buf);
    let tag = r.tag().unwrap();
    assert_eq!(tag, Tag::new(3, WireType::LengthDelimited));
    let len = r.length().unwrap();
    let start = r.position();
    let mut inner = Inner::default();
    inner.merge_from(&mut r, Some(len)).unwrap();
    assert_eq!(inner.value, 5);
    assert_eq!(r.position(), start + len);
    assert_eq!(r.end(), buf.len());
    assert_eq!(r.tag().unwrap().field_number(), 4);
}

#[test]
fn nested_field_crossing_its_bound_is_rejected() {
    // Declared inner length 1, but the inner varint field needs 2 bytes.
    let buf = hex!("1a 01 08 05");
    let mut r = Reader::new(&buf);
    r.tag().unwrap();
    let mut inner = Inner::default();
    assert!(inner.merge_length_delimited(&mut r).is_err());
}

#[test]
fn decode_error_returns_no_partial_message() {
    let good = Inner { value: 9 }.encode_to_vec();
    let mut bad = good.clone();
    bad.push(0x80);
    assert!(Inner::decode(&good).is_ok());
    assert!(Inner::decode(&bad).is_err());
}
