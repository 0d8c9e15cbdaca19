//! Custom data items: caller-typed raw buffers.

use bytes::Bytes;
use serde_json::{Map, Value};

use crate::{
    error::UplinkError,
    item,
    payload::{MemorySource, PayloadSource},
};

/// An opaque payload with a caller-chosen meta type and content type.
#[derive(Debug)]
pub struct CustomData {
    pub(crate) payload_type: String,
    pub(crate) version: String,
    pub(crate) content_type: String,
    /// Compact JSON object when present.
    pub(crate) details: Option<String>,
    pub(crate) declared_len: usize,
    pub(crate) source: MemorySource,
}

impl CustomData {
    /// Create a custom data item over `data`.
    pub fn new(
        payload_type: impl Into<String>,
        version: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        let source = MemorySource::new(data);
        Self {
            payload_type: payload_type.into(),
            version: version.into(),
            content_type: content_type.into(),
            details: None,
            declared_len: source.len(),
            source,
        }
    }

    /// Attach a details object to the meta payload.
    #[must_use]
    pub fn with_details(mut self, details: Map<String, Value>) -> Self {
        self.details = Some(Value::Object(details).to_string());
        self
    }

    /// Declared wire length of the raw buffer.
    #[must_use]
    pub const fn declared_len(&self) -> usize { self.declared_len }

    pub(crate) fn source_mut(&mut self) -> &mut dyn PayloadSource { &mut self.source }

    pub(crate) fn validate(&self) -> Result<(), UplinkError> {
        item::require("custom data", "type", &self.payload_type)?;
        item::require("custom data", "version", &self.version)?;
        item::require("custom data", "contentType", &self.content_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_length_tracks_buffer() {
        let custom = CustomData::new("vibrationSample", "1.0", "application/cbor", vec![1_u8; 64]);
        assert_eq!(custom.declared_len(), 64);
        custom.validate().expect("valid custom data");
    }

    #[test]
    fn empty_type_is_rejected() {
        let custom = CustomData::new("", "1.0", "application/cbor", Vec::new());
        let err = custom.validate().expect_err("empty type");
        assert!(matches!(
            err,
            UplinkError::MissingMandatoryField {
                item: "custom data",
                field: "type",
            }
        ));
    }
}
