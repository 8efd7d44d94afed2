//! Delayed-message ids scheduled for a block (`dydxprotocol.delaymsg`).

use crate::codec::{CodecError, Message};
use crate::reader::Reader;
use crate::wire::Tag;
use crate::writer::Writer;

/// Ids of the delayed messages due at one block height.
///
/// `message_ids` is a packed repeated `uint32`; both the packed and the one-tag-per-id forms
/// decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BlockMessageIds {
    pub message_ids: Vec<u32>,
}

impl Message for BlockMessageIds {
    fn encode_raw(&self, w: &mut Writer) {
        w.packed_uint32(1, &self.message_ids);
    }

    fn merge_field(&mut self, tag: Tag, r: &mut Reader<'_>) -> Result<bool, CodecError> {
        match tag.field_number() {
            1 => r.packed_varints(tag, &mut self.message_ids, Reader::uint32),
            _ => Ok(false),
        }
    }
}
