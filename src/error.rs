//! Canonical error and result types for the crate.
//!
//! This module defines the single public `UplinkError` surface together with
//! the per-concern error enums raised by the cursor, payload sources, and the
//! pluggable transport.

use thiserror::Error;

/// The renderer ran out of pre-sized buffer space.
///
/// Bodies are allocated to their exact computed size, so hitting this error
/// outside tests indicates a defect in the size accounting rather than a
/// recoverable condition.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("capacity exceeded: needed {needed} bytes with {remaining} remaining")]
pub struct CapacityError {
    /// Bytes the rejected write required.
    pub needed: usize,
    /// Bytes left before the cursor's limit.
    pub remaining: usize,
}

/// Errors surfaced by payload sources feeding the renderer.
#[derive(Debug, Error)]
pub enum PayloadError {
    /// The backing file or buffer failed to open, seek, or read.
    #[error("payload source i/o failure: {0}")]
    Io(#[from] std::io::Error),
    /// The source ran dry before yielding its declared byte count.
    #[error("payload source ended after {got} of {declared} declared bytes")]
    ShortRead { declared: usize, got: usize },
}

/// Errors surfaced by the pluggable HTTP transport.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The exchange itself failed (network, TLS, malformed response).
    #[error("http exchange failed: {0}")]
    Exchange(#[source] Box<dyn std::error::Error + Send + Sync>),
    /// The server answered with a status outside the 2xx range.
    #[error("unexpected http status {status}")]
    UnexpectedStatus { status: u16 },
}

/// Top-level error type exposed by `uplink`.
#[derive(Debug, Error)]
pub enum UplinkError {
    /// Exact body allocation failed.
    #[error("allocation of {requested} bytes failed")]
    OutOfMemory { requested: usize },
    /// A mandatory item field was empty or absent.
    #[error("{item} is missing mandatory field `{field}`")]
    MissingMandatoryField {
        item: &'static str,
        field: &'static str,
    },
    /// A field was present but malformed (bad timestamp, characters that
    /// would require JSON escaping, or an out-of-range configuration value).
    #[error("{item} field `{field}` has an invalid format")]
    InvalidFieldFormat {
        item: &'static str,
        field: &'static str,
    },
    /// An item, or every remaining store entry, cannot fit one body alone.
    #[error("item of {size} bytes exceeds the maximum http request size of {max}")]
    ItemExceedsMaxHttpRequestSize { size: usize, max: usize },
    /// The store held no entries when the exchange was requested.
    #[error("store contains no entries")]
    StoreIsEmpty,
    /// Internal renderer defect; see [`CapacityError`].
    #[error(transparent)]
    Capacity(#[from] CapacityError),
    /// A payload source failed while the body was being rendered.
    #[error(transparent)]
    Payload(#[from] PayloadError),
    /// The transport collaborator failed; the in-flight drain round was
    /// rolled back before this was raised.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Canonical result alias used by `uplink` public APIs.
pub type Result<T> = std::result::Result<T, UplinkError>;
