//! Multipart wire format: literal constants, random tokens, the bounded
//! body cursor, shared JSON emitters, and the tuple renderer.
//!
//! All overhead arithmetic is derived from the literal strings themselves so
//! the byte accounting can never drift from what the renderer writes.

pub(crate) mod cursor;
pub(crate) mod emit;
pub(crate) mod token;
pub(crate) mod tuple;

pub(crate) const CRLF: &str = "\r\n";
pub(crate) const DASHES: &str = "--";
pub(crate) const CONTENT_TYPE_PREFIX: &str = "Content-Type: ";
pub(crate) const RELATED_BOUNDARY_PREFIX: &str = "Content-Type: multipart/related;boundary=";
pub(crate) const META_CONTENT_TYPE: &str = "application/vnd.siemens.mindsphere.meta+json";
pub(crate) const JSON_CONTENT_TYPE: &str = "application/json";
pub(crate) const OCTET_STREAM_CONTENT_TYPE: &str = "application/octet-stream";

/// Length of every generated boundary token.
pub(crate) const BOUNDARY_LEN: usize = 20;

/// Fixed bytes of one tuple skeleton, excluding the meta JSON, the payload
/// bytes, and the payload content-type string.
pub(crate) const fn tuple_fixed_overhead() -> usize {
    // --<main>\r\n
    DASHES.len() + BOUNDARY_LEN + CRLF.len()
    // Content-Type: multipart/related;boundary=<sub>\r\n plus blank line
        + RELATED_BOUNDARY_PREFIX.len() + BOUNDARY_LEN + CRLF.len() + CRLF.len()
    // --<sub>\r\n
        + DASHES.len() + BOUNDARY_LEN + CRLF.len()
    // Content-Type: <meta content type>\r\n plus blank line
        + CONTENT_TYPE_PREFIX.len() + META_CONTENT_TYPE.len() + CRLF.len() + CRLF.len()
    // <meta json>\r\n
        + CRLF.len()
    // --<sub>\r\n
        + DASHES.len() + BOUNDARY_LEN + CRLF.len()
    // Content-Type: <payload content type>\r\n plus blank line
        + CONTENT_TYPE_PREFIX.len() + CRLF.len() + CRLF.len()
    // <payload bytes>\r\n
        + CRLF.len()
    // --<sub>--\r\n
        + DASHES.len() + BOUNDARY_LEN + DASHES.len() + CRLF.len()
}

/// Bytes of the terminating `--<main>--\r\n` marker closing a body.
pub(crate) const fn body_close_len() -> usize {
    DASHES.len() + BOUNDARY_LEN + DASHES.len() + CRLF.len()
}
