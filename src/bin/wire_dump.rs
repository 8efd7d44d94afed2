//! Dump protobuf wire data without a schema, one field per line.
//!
//! Usage:
//!   wire_dump [OPTIONS] [FILE]
//!   wire_dump < message.bin
//!
//! Options:
//!   --hex, -x         Input is hex text (whitespace ignored) instead of raw bytes
//!   --delimited, -d   Input is a stream of length-prefixed messages; dump each one
//!
//! Set `RUST_LOG=protowire=trace` to see skipped fields and dropped frame entries on stderr.
//! Exit code 1 if the input is not well-formed.

use anyhow::{bail, Context};
use protowire::{dump_message, Reader};
use std::io::{self, Read, Write};
use tracing_subscriber::EnvFilter;

fn take_flag(args: &mut Vec<String>, long: &str, short: &str) -> bool {
    if let Some(pos) = args.iter().position(|a| a == long || a == short) {
        args.remove(pos);
        true
    } else {
        false
    }
}

fn read_input(path: Option<&str>) -> anyhow::Result<Vec<u8>> {
    match path {
        Some(p) => std::fs::read(p).with_context(|| format!("reading {}", p)),
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("reading stdin")?;
            Ok(buf)
        }
    }
}

fn decode_hex_text(raw: &[u8]) -> anyhow::Result<Vec<u8>> {
    let text: String = std::str::from_utf8(raw)
        .context("hex input is not text")?
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    hex::decode(&text).context("invalid hex input")
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let hex_input = take_flag(&mut args, "--hex", "-x");
    let delimited = take_flag(&mut args, "--delimited", "-d");
    if args.len() > 1 {
        bail!("expected at most one input file, got {}", args.len());
    }

    let raw = read_input(args.first().map(String::as_str))?;
    let data = if hex_input { decode_hex_text(&raw)? } else { raw };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if delimited {
        let mut r = Reader::new(&data);
        let mut index = 0usize;
        while !r.is_at_end() {
            let start = r.position();
            let body = match r.bytes() {
                Ok(b) => b,
                Err(e) => {
                    eprintln!("entry {} at offset {}: {}", index, start, e);
                    std::process::exit(1);
                }
            };
            writeln!(out, "# entry {} ({} bytes)", index, body.len())?;
            match dump_message(body) {
                Ok(text) => out.write_all(text.as_bytes())?,
                Err(e) => {
                    eprintln!("entry {}: {}", index, e);
                    std::process::exit(1);
                }
            }
            index += 1;
        }
    } else {
        match dump_message(&data) {
            Ok(text) => out.write_all(text.as_bytes())?,
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        }
    }
    Ok(())
}
