//! Exact size accounting for items and their rendered tuples.
//!
//! The returned counts are hard guarantees: the assembler allocates exactly
//! these many bytes and the buffer is never grown. Counting shares the
//! emission path with the renderer (see [`wire::emit`](crate::wire)), so the
//! two cannot disagree.

use std::convert::Infallible;

use crate::{
    item::Item,
    wire::{
        self,
        emit::{self, ByteCount},
    },
};

fn counted(emit: impl FnOnce(&mut ByteCount) -> Result<(), Infallible>) -> usize {
    let mut count = ByteCount::default();
    match emit(&mut count) {
        Ok(()) => count.0,
        Err(never) => match never {},
    }
}

/// Exact byte length of `item`'s meta JSON.
pub(crate) fn meta_len(item: &Item) -> usize { counted(|count| emit::emit_meta(item, count)) }

/// Exact byte length of `item`'s payload part: emitted JSON for the JSON
/// variants, the declared raw length for files and custom data.
pub(crate) fn payload_len(item: &Item) -> usize {
    match item {
        Item::File(file) => file.declared_len(),
        Item::CustomData(custom) => custom.declared_len(),
        json_item => counted(|count| emit::emit_payload(json_item, count)),
    }
}

/// Content type announced for `item`'s payload part.
pub(crate) fn payload_content_type(item: &Item) -> &str {
    match item {
        Item::Event(_) | Item::Timeseries(_) | Item::DataSourceConfiguration(_) => {
            wire::JSON_CONTENT_TYPE
        }
        Item::File(_) => wire::OCTET_STREAM_CONTENT_TYPE,
        Item::CustomData(custom) => &custom.content_type,
    }
}

/// Exact combined byte length of `item`'s meta JSON and payload part.
///
/// Equals `len(meta_json) + len(payload_json_or_raw_bytes)` of the actual
/// serialization, with every delimiter and quoting byte of present optional
/// fields included and absent ones contributing zero.
#[must_use]
pub fn size_of(item: &Item) -> usize { meta_len(item) + payload_len(item) }

/// Exact size of one rendered multipart tuple for `item`, boundaries and
/// part headers included.
pub(crate) fn tuple_size(item: &Item) -> usize {
    wire::tuple_fixed_overhead() + payload_content_type(item).len() + size_of(item)
}
