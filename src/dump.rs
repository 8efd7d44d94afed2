//! Render encoded bytes as indented text, one field per line, without a schema.
//!
//! ```text
//! 1 {
//!   1: "dydx1abc"
//!   2: 7
//! }
//! 2: 0x0000002a (fixed32)
//! ```
//!
//! Length-delimited payloads are guessed: a quoted string when they are printable UTF-8, else a
//! nested block when the bytes parse completely as fields, hex otherwise. The guess can be wrong
//! for short byte strings that happen to look like fields; the raw walk is the ground truth.

use crate::codec::CodecError;
use crate::value::{RawField, RawValue};
use crate::walk::{scan_fields, validate_fields};
use std::fmt;

/// Nested blocks are not attempted below this depth; deeper payloads print as strings or hex.
const MAX_NESTING: usize = 32;

/// Dump a whole buffer.
pub fn dump_message(data: &[u8]) -> Result<String, CodecError> {
    let fields = scan_fields(data)?;
    Ok(Fields(&fields).to_string())
}

/// Top-level fields rendered one per line.
struct Fields<'f, 'a>(&'f [RawField<'a>]);

impl fmt::Display for Fields<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_fields(f, self.0, 0)
    }
}

fn write_fields(f: &mut fmt::Formatter<'_>, fields: &[RawField<'_>], depth: usize) -> fmt::Result {
    for field in fields {
        write_field(f, field, depth)?;
    }
    Ok(())
}

fn indent(f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        f.write_str("  ")?;
    }
    Ok(())
}

fn write_block(
    f: &mut fmt::Formatter<'_>,
    header: fmt::Arguments<'_>,
    inner: &[RawField<'_>],
    depth: usize,
) -> fmt::Result {
    writeln!(f, "{}", header)?;
    write_fields(f, inner, depth + 1)?;
    indent(f, depth)?;
    f.write_str("}\n")
}

fn write_field(f: &mut fmt::Formatter<'_>, field: &RawField<'_>, depth: usize) -> fmt::Result {
    indent(f, depth)?;
    let n = field.field_number;
    match &field.value {
        RawValue::Varint(v) => writeln!(f, "{}: {}", n, v),
        RawValue::Fixed32(v) => writeln!(f, "{}: 0x{:08x} (fixed32)", n, v),
        RawValue::Fixed64(v) => writeln!(f, "{}: 0x{:016x} (fixed64)", n, v),
        RawValue::Group(inner) => write_block(f, format_args!("{} {{ (group)", n), inner, depth),
        RawValue::Bytes(b) => match classify(b, depth) {
            Payload::Message(inner) => write_block(f, format_args!("{} {{", n), &inner, depth),
            Payload::Text(s) => writeln!(f, "{}: {:?}", n, s),
            Payload::Binary => writeln!(f, "{}: 0x{}", n, hex::encode(b)),
        },
    }
}

enum Payload<'a> {
    Message(Vec<RawField<'a>>),
    Text(&'a str),
    Binary,
}

fn classify(b: &[u8], depth: usize) -> Payload<'_> {
    if !b.is_empty() && depth < MAX_NESTING && validate_fields(b).is_ok() {
        // Printable text that also happens to parse as fields reads better as text.
        if let Some(s) = printable(b) {
            return Payload::Text(s);
        }
        if let Ok(fields) = scan_fields(b) {
            return Payload::Message(fields);
        }
    }
    match printable(b) {
        Some(s) => Payload::Text(s),
        None => Payload::Binary,
    }
}

fn printable(b: &[u8]) -> Option<&str> {
    let s = std::str::from_utf8(b).ok()?;
    if s.chars().all(|c| !c.is_control() || c == '\n' || c == '\t') {
        Some(s)
    } else {
        None
    }
}
