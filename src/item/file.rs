//! File items streamed from disk.

use std::path::Path;

use crate::{
    error::UplinkError,
    item,
    payload::{FileSource, PayloadSource},
};

/// A file upload: meta details plus a lazily opened disk source.
///
/// The declared length is captured once at construction; it is the wire
/// length the sizing pass and the renderer both rely on, so the backing file
/// must not change size while the item is in flight.
#[derive(Debug)]
pub struct FileItem {
    pub(crate) name: String,
    pub(crate) creation_date: String,
    pub(crate) file_type: Option<String>,
    pub(crate) declared_len: usize,
    pub(crate) source: FileSource,
}

impl FileItem {
    /// Create a file item for the file at `path`, recording its current
    /// length as the declared wire length.
    ///
    /// # Errors
    ///
    /// Returns [`UplinkError::Payload`] if the file cannot be inspected.
    pub fn new(
        path: impl AsRef<Path>,
        name: impl Into<String>,
        creation_date: impl Into<String>,
    ) -> Result<Self, UplinkError> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path).map_err(crate::error::PayloadError::from)?;
        let declared_len = usize::try_from(metadata.len()).map_err(|_| {
            UplinkError::InvalidFieldFormat {
                item: "file",
                field: "length",
            }
        })?;
        Ok(Self {
            name: name.into(),
            creation_date: creation_date.into(),
            file_type: None,
            declared_len,
            source: FileSource::new(path),
        })
    }

    /// Attach the optional file type tag carried in the meta details.
    #[must_use]
    pub fn with_file_type(mut self, file_type: impl Into<String>) -> Self {
        self.file_type = Some(file_type.into());
        self
    }

    /// Declared wire length of the file contents.
    #[must_use]
    pub const fn declared_len(&self) -> usize { self.declared_len }

    pub(crate) fn source_mut(&mut self) -> &mut dyn PayloadSource { &mut self.source }

    pub(crate) fn validate(&self) -> Result<(), UplinkError> {
        item::require("file", "fileName", &self.name)?;
        item::validate_timestamp("file", "creationDate", &self.creation_date)?;
        if let Some(file_type) = &self.file_type {
            item::require("file", "fileType", file_type)?;
        }
        Ok(())
    }
}
