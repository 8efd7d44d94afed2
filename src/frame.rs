//! Length-prefixed message streams: each entry is a varint byte length followed by one encoded
//! message.
//!
//! When an entry's framing is intact but its body does not decode, the entry is reported in
//! [`FrameDecodeResult::removed`] and decoding continues with the next one. A broken length
//! prefix leaves no way to find the next entry and aborts the whole frame.

use crate::codec::{CodecError, Message};
use crate::reader::Reader;
use crate::varint::{encode_varint, MAX_VARINT_LEN};
use crate::writer::Writer;
use std::io::Read;

/// Result of decoding a frame: decoded messages and the entries that were dropped.
#[derive(Debug)]
pub struct FrameDecodeResult<M> {
    pub messages: Vec<DecodedMessage<M>>,
    pub removed: Vec<RemovedMessage>,
}

#[derive(Debug)]
pub struct DecodedMessage<M> {
    pub message: M,
    /// Byte range of the entry body (after the length prefix).
    pub byte_range: (usize, usize),
}

#[derive(Debug)]
pub struct RemovedMessage {
    pub byte_range: (usize, usize),
    pub reason: String,
}

/// Encode one message with its length prefix.
pub fn encode_delimited<M: Message>(msg: &M) -> Vec<u8> {
    let mut w = Writer::new();
    w.fork();
    msg.encode_raw(&mut w);
    w.ldelim();
    w.finish()
}

/// Encode a sequence of messages as one frame.
pub fn encode_frame<M: Message>(messages: &[M]) -> Vec<u8> {
    let mut w = Writer::new();
    for msg in messages {
        w.fork();
        msg.encode_raw(&mut w);
        w.ldelim();
    }
    w.finish()
}

/// Decode every entry of a frame.
pub fn decode_frame<M: Message>(bytes: &[u8]) -> Result<FrameDecodeResult<M>, CodecError> {
    let mut r = Reader::new(bytes);
    let mut messages = Vec::new();
    let mut removed = Vec::new();

    while !r.is_at_end() {
        let body = r.bytes()?;
        let end = r.position();
        let start = end - body.len();
        match M::decode(body) {
            Ok(message) => messages.push(DecodedMessage {
                message,
                byte_range: (start, end),
            }),
            Err(e) => {
                tracing::debug!(start, end, error = %e, "dropping undecodable frame entry");
                removed.push(RemovedMessage {
                    byte_range: (start, end),
                    reason: e.to_string(),
                });
            }
        }
    }

    Ok(FrameDecodeResult { messages, removed })
}

/// Re-encode only the entries that decoded.
pub fn encode_frame_with_compliant_only<M: Message>(result: &FrameDecodeResult<M>) -> Vec<u8> {
    let mut w = Writer::new();
    for entry in &result.messages {
        w.fork();
        entry.message.encode_raw(&mut w);
        w.ldelim();
    }
    w.finish()
}

/// Read one length-prefixed message from a byte stream.
///
/// Returns `Ok(None)` when the stream ends cleanly before a new entry; a stream that ends inside
/// an entry is an error.
pub fn read_delimited<M: Message, R: Read>(src: &mut R) -> Result<Option<M>, CodecError> {
    let mut prefix = Vec::with_capacity(MAX_VARINT_LEN);
    let mut byte = [0u8; 1];
    loop {
        if src.read(&mut byte)? == 0 {
            if prefix.is_empty() {
                return Ok(None);
            }
            return Err(CodecError::Truncated {
                needed: 1,
                remaining: 0,
            });
        }
        prefix.push(byte[0]);
        if byte[0] < 0x80 {
            break;
        }
        if prefix.len() == MAX_VARINT_LEN {
            return Err(CodecError::VarintOverflow);
        }
    }
    let len = Reader::new(&prefix).uint64()?;
    let mut body = Vec::new();
    let got = src.by_ref().take(len).read_to_end(&mut body)?;
    if (got as u64) < len {
        return Err(CodecError::Truncated {
            needed: usize::try_from(len).unwrap_or(usize::MAX),
            remaining: got,
        });
    }
    M::decode(&body).map(Some)
}

/// Append one length-prefixed message to `out`.
pub fn write_delimited<M: Message>(msg: &M, out: &mut Vec<u8>) {
    let body = msg.encode_to_vec();
    encode_varint(body.len() as u64, out);
    out.extend_from_slice(&body);
}
