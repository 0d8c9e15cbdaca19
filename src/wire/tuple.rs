//! Tuple rendering: one item's meta and payload parts within a body.

use crate::{error::UplinkError, item::Item, sizing};

use super::{
    CONTENT_TYPE_PREFIX, CRLF, DASHES, META_CONTENT_TYPE, RELATED_BOUNDARY_PREFIX,
    cursor::BodyCursor, emit, token,
};

/// Write one complete multipart tuple for `item` into `cursor`.
///
/// A fresh random sub-boundary is generated per tuple so it cannot collide
/// with content. Every write is bounds-checked by the cursor; on failure,
/// partial bytes may have been written and the caller must discard the whole
/// buffer.
///
/// # Errors
///
/// Returns a capacity error if the cursor runs out of space mid-render, or
/// a payload error if the item's raw source fails or runs short.
pub(crate) fn render_tuple(
    cursor: &mut BodyCursor,
    item: &mut Item,
    main_boundary: &str,
) -> Result<(), UplinkError> {
    let sub_boundary = token::boundary();

    cursor.put_str(DASHES)?;
    cursor.put_str(main_boundary)?;
    cursor.put_str(CRLF)?;
    cursor.put_str(RELATED_BOUNDARY_PREFIX)?;
    cursor.put_str(&sub_boundary)?;
    cursor.put_str(CRLF)?;
    cursor.put_str(CRLF)?;

    cursor.put_str(DASHES)?;
    cursor.put_str(&sub_boundary)?;
    cursor.put_str(CRLF)?;
    cursor.put_str(CONTENT_TYPE_PREFIX)?;
    cursor.put_str(META_CONTENT_TYPE)?;
    cursor.put_str(CRLF)?;
    cursor.put_str(CRLF)?;
    emit::emit_meta(item, cursor)?;
    cursor.put_str(CRLF)?;

    cursor.put_str(DASHES)?;
    cursor.put_str(&sub_boundary)?;
    cursor.put_str(CRLF)?;
    cursor.put_str(CONTENT_TYPE_PREFIX)?;
    cursor.put_str(sizing::payload_content_type(item))?;
    cursor.put_str(CRLF)?;
    cursor.put_str(CRLF)?;
    render_payload(cursor, item)?;
    cursor.put_str(CRLF)?;

    cursor.put_str(DASHES)?;
    cursor.put_str(&sub_boundary)?;
    cursor.put_str(DASHES)?;
    cursor.put_str(CRLF)?;
    Ok(())
}

fn render_payload(cursor: &mut BodyCursor, item: &mut Item) -> Result<(), UplinkError> {
    match item {
        Item::File(file) => {
            let declared = file.declared_len();
            cursor.fill_from(file.source_mut(), declared)
        }
        Item::CustomData(custom) => {
            let declared = custom.declared_len();
            cursor.fill_from(custom.source_mut(), declared)
        }
        json_item => Ok(emit::emit_payload(json_item, cursor)?),
    }
}

/// Write the terminating `--<main>--\r\n` marker.
pub(crate) fn close_body(
    cursor: &mut BodyCursor,
    main_boundary: &str,
) -> Result<(), crate::error::CapacityError> {
    cursor.put_str(DASHES)?;
    cursor.put_str(main_boundary)?;
    cursor.put_str(DASHES)?;
    cursor.put_str(CRLF)
}
