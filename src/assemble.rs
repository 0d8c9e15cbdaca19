//! Body assembly: size-probe, exact allocation, render, close.

use bytes::Bytes;

use crate::{
    error::UplinkError,
    item::Item,
    sizing,
    store::Store,
    wire::{self, cursor::BodyCursor, token, tuple},
};

/// One finished multipart body plus the boundary its parts share.
#[derive(Clone, Debug)]
pub struct Body {
    bytes: Bytes,
    boundary: String,
}

impl Body {
    /// The finished body bytes.
    #[must_use]
    pub fn bytes(&self) -> &Bytes { &self.bytes }

    /// Consume the body, returning its bytes.
    #[must_use]
    pub fn into_bytes(self) -> Bytes { self.bytes }

    /// Body length in bytes.
    #[must_use]
    pub fn len(&self) -> usize { self.bytes.len() }

    /// Whether the body is empty (never true for an assembled body).
    #[must_use]
    pub fn is_empty(&self) -> bool { self.bytes.is_empty() }

    /// Main boundary separating the body's tuples.
    #[must_use]
    pub fn boundary(&self) -> &str { &self.boundary }

    /// `Content-Type` header value announcing this body.
    #[must_use]
    pub fn content_type(&self) -> String {
        format!("multipart/related;boundary={};charset=utf-8", self.boundary)
    }
}

/// Render a single item into one finished body.
///
/// The item is sized first and rejected before any allocation if it cannot
/// fit `max_body_size`; otherwise exactly the computed byte count is
/// reserved and filled.
///
/// # Errors
///
/// Returns the item's validation error,
/// [`UplinkError::ItemExceedsMaxHttpRequestSize`] when the item cannot fit
/// alone, or a render/payload error (in which case the buffer is
/// discarded).
pub fn assemble_item(item: &mut Item, max_body_size: usize) -> Result<Body, UplinkError> {
    item.validate()?;
    let total = sizing::tuple_size(item) + wire::body_close_len();
    if total > max_body_size {
        return Err(UplinkError::ItemExceedsMaxHttpRequestSize {
            size: total,
            max: max_body_size,
        });
    }

    let boundary = token::boundary();
    let mut cursor = BodyCursor::with_limit(total)?;
    tuple::render_tuple(&mut cursor, item, &boundary)?;
    tuple::close_body(&mut cursor, &boundary)?;
    debug_assert_eq!(cursor.remaining(), 0, "sizing must match rendered length");
    Ok(Body {
        bytes: cursor.into_bytes(),
        boundary,
    })
}

/// Assemble one body from a store's `Ready` entries.
///
/// Runs the size-probe pass (permanently ignoring entries that can never
/// fit alone), then greedy selection. Entries chosen for this body are left
/// `Selected` for the caller to commit or roll back once transport has
/// spoken.
///
/// # Errors
///
/// Returns [`UplinkError::StoreIsEmpty`] for an empty store,
/// [`UplinkError::ItemExceedsMaxHttpRequestSize`] when no remaining entry
/// can fit a body, or a render/payload error (selected entries are rolled
/// back and the buffer discarded).
pub(crate) fn assemble_store(store: &mut Store, max_body_size: usize) -> Result<Body, UplinkError> {
    if store.is_empty() {
        return Err(UplinkError::StoreIsEmpty);
    }
    store.probe(max_body_size);
    if store.all_ignored() {
        return Err(UplinkError::ItemExceedsMaxHttpRequestSize {
            size: store.max_cached_size().unwrap_or(0),
            max: max_body_size,
        });
    }

    let consumed = store.select(max_body_size);
    if consumed == 0 {
        // Post-probe, a zero selection means every remaining entry needs a
        // fresh body it cannot fit.
        return Err(UplinkError::ItemExceedsMaxHttpRequestSize {
            size: store.max_cached_size().unwrap_or(0),
            max: max_body_size,
        });
    }
    log::debug!(
        "assembling {consumed}-byte body from {} selected entries",
        store.count_with_status(crate::store::EntryStatus::Selected),
    );

    let boundary = token::boundary();
    match render_selected(store, consumed, &boundary) {
        Ok(cursor) => {
            debug_assert_eq!(cursor.remaining(), 0, "sizing must match rendered length");
            Ok(Body {
                bytes: cursor.into_bytes(),
                boundary,
            })
        }
        Err(err) => {
            store.rollback_selected();
            Err(err)
        }
    }
}

fn render_selected(
    store: &mut Store,
    consumed: usize,
    boundary: &str,
) -> Result<BodyCursor, UplinkError> {
    let mut cursor = BodyCursor::with_limit(consumed)?;
    for entry in store.selected_mut() {
        tuple::render_tuple(&mut cursor, entry.item_mut(), boundary)?;
    }
    tuple::close_body(&mut cursor, boundary)?;
    Ok(cursor)
}
