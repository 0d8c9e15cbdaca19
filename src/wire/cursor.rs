//! Bounded cursor used to build multipart bodies without reallocation.

use bytes::Bytes;

use crate::{
    error::{CapacityError, PayloadError, UplinkError},
    payload::PayloadSource,
};

/// Upper bound on a single pull from a payload source.
pub(crate) const PULL_CHUNK_MAX: usize = 16 * 1024;

/// Fixed-limit byte writer backing the tuple renderer.
///
/// The cursor owns a buffer reserved to exactly its limit and refuses writes
/// that would cross it, so a rendered body can never outgrow the size the
/// probe pass computed for it.
#[derive(Debug)]
pub(crate) struct BodyCursor {
    buf: Vec<u8>,
    limit: usize,
}

impl BodyCursor {
    /// Allocate a cursor with exactly `limit` bytes of capacity.
    ///
    /// # Errors
    ///
    /// Returns [`UplinkError::OutOfMemory`] if the reservation fails.
    pub(crate) fn with_limit(limit: usize) -> Result<Self, UplinkError> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(limit)
            .map_err(|_| UplinkError::OutOfMemory { requested: limit })?;
        Ok(Self { buf, limit })
    }

    /// Bytes left before the limit.
    pub(crate) fn remaining(&self) -> usize { self.limit - self.buf.len() }

    /// Bytes written so far.
    pub(crate) fn written(&self) -> usize { self.buf.len() }

    /// Append `bytes`, refusing to cross the limit.
    pub(crate) fn put(&mut self, bytes: &[u8]) -> Result<(), CapacityError> {
        if bytes.len() > self.remaining() {
            return Err(CapacityError {
                needed: bytes.len(),
                remaining: self.remaining(),
            });
        }
        self.buf.extend_from_slice(bytes);
        Ok(())
    }

    /// Append a string slice; see [`BodyCursor::put`].
    pub(crate) fn put_str(&mut self, piece: &str) -> Result<(), CapacityError> {
        self.put(piece.as_bytes())
    }

    /// Pull exactly `declared` bytes from `source` in bounded chunks.
    ///
    /// The source is rewound first so retried entries restart from byte
    /// zero. On failure the cursor's contents are unusable and the whole
    /// body must be discarded.
    ///
    /// # Errors
    ///
    /// Returns a capacity error if `declared` exceeds the remaining space, a
    /// [`PayloadError::ShortRead`] if the source runs dry early, or the
    /// source's own I/O error.
    pub(crate) fn fill_from(
        &mut self,
        source: &mut dyn PayloadSource,
        declared: usize,
    ) -> Result<(), UplinkError> {
        if declared > self.remaining() {
            return Err(CapacityError {
                needed: declared,
                remaining: self.remaining(),
            }
            .into());
        }
        source.rewind()?;
        let start = self.buf.len();
        self.buf.resize(start + declared, 0);
        let mut filled = 0;
        while filled < declared {
            let chunk = (declared - filled).min(PULL_CHUNK_MAX);
            let window = &mut self.buf[start + filled..start + filled + chunk];
            let got = source.read_chunk(window)?;
            if got == 0 {
                return Err(PayloadError::ShortRead {
                    declared,
                    got: filled,
                }
                .into());
            }
            filled += got;
        }
        Ok(())
    }

    /// Finish the body, yielding exactly the bytes written.
    pub(crate) fn into_bytes(self) -> Bytes { Bytes::from(self.buf) }
}
