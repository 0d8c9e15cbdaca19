//! Pull-style payload sources for raw item bodies.
//!
//! File contents and custom-data buffers are never materialized as a second
//! in-memory copy; the renderer pulls them into the pre-sized body buffer in
//! bounded chunks through the [`PayloadSource`] trait.

use std::{
    fs::File,
    io::{Read, Seek, SeekFrom},
    path::PathBuf,
};

use bytes::Bytes;

use crate::error::PayloadError;

/// Supplies raw payload bytes to the renderer in bounded chunks.
///
/// A source must yield exactly the byte count its owning item declares per
/// render pass. Returning `Ok(0)` signals exhaustion; the renderer treats an
/// early zero as a short read because the body was sized to the declared
/// length.
pub trait PayloadSource {
    /// Reposition the source to its first byte.
    ///
    /// Called before every render pass, since a store may retry the same
    /// item across multiple drain rounds.
    ///
    /// # Errors
    ///
    /// Returns a [`PayloadError`] if the source cannot be repositioned.
    fn rewind(&mut self) -> Result<(), PayloadError>;

    /// Read up to `buf.len()` bytes, returning the count written.
    ///
    /// # Errors
    ///
    /// Returns a [`PayloadError`] if the underlying read fails.
    fn read_chunk(&mut self, buf: &mut [u8]) -> Result<usize, PayloadError>;
}

/// In-memory payload source over a caller-supplied buffer.
#[derive(Clone, Debug)]
pub struct MemorySource {
    data: Bytes,
    position: usize,
}

impl MemorySource {
    /// Wrap `data` as a payload source.
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            position: 0,
        }
    }

    /// Total byte count of the wrapped buffer.
    #[must_use]
    pub fn len(&self) -> usize { self.data.len() }

    /// Whether the wrapped buffer is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.data.is_empty() }
}

impl PayloadSource for MemorySource {
    fn rewind(&mut self) -> Result<(), PayloadError> {
        self.position = 0;
        Ok(())
    }

    fn read_chunk(&mut self, buf: &mut [u8]) -> Result<usize, PayloadError> {
        let remaining = &self.data[self.position..];
        let count = remaining.len().min(buf.len());
        buf[..count].copy_from_slice(&remaining[..count]);
        self.position += count;
        Ok(count)
    }
}

/// File-backed payload source.
///
/// The handle is opened lazily on first use and rewound with a seek on every
/// subsequent render pass, so a retried store entry always streams the file
/// from byte zero.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    handle: Option<File>,
}

impl FileSource {
    /// Create a source for the file at `path` without opening it.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            handle: None,
        }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &std::path::Path { &self.path }

    fn handle(&mut self) -> Result<&mut File, PayloadError> {
        if self.handle.is_none() {
            self.handle = Some(File::open(&self.path)?);
        }
        let Some(handle) = self.handle.as_mut() else {
            unreachable!("handle was just opened")
        };
        Ok(handle)
    }
}

impl PayloadSource for FileSource {
    fn rewind(&mut self) -> Result<(), PayloadError> {
        let handle = self.handle()?;
        handle.seek(SeekFrom::Start(0))?;
        Ok(())
    }

    fn read_chunk(&mut self, buf: &mut [u8]) -> Result<usize, PayloadError> {
        let handle = self.handle()?;
        Ok(handle.read(buf)?)
    }
}
