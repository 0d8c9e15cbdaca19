//! Exchange configuration.

use crate::error::UplinkError;

/// Smallest accepted ceiling for one outbound HTTP payload.
///
/// Below this the fixed multipart overhead leaves no room for even a trivial
/// item, so the constructor rejects the value outright instead of letting
/// every later exchange fail with a size error.
pub const MIN_HTTP_PAYLOAD_SIZE: usize = 400;

/// Settings shared by every exchange performed through one [`Exchange`]
/// instance.
///
/// [`Exchange`]: crate::exchange::Exchange
#[derive(Clone, Debug)]
pub struct Config {
    upload_url: String,
    max_http_payload_size: usize,
}

impl Config {
    /// Create a configuration, validating the payload ceiling.
    ///
    /// # Errors
    ///
    /// Returns [`UplinkError::InvalidFieldFormat`] if `max_http_payload_size`
    /// is below [`MIN_HTTP_PAYLOAD_SIZE`], or
    /// [`UplinkError::MissingMandatoryField`] if `upload_url` is empty.
    pub fn new(
        upload_url: impl Into<String>,
        max_http_payload_size: usize,
    ) -> Result<Self, UplinkError> {
        let upload_url = upload_url.into();
        if upload_url.is_empty() {
            return Err(UplinkError::MissingMandatoryField {
                item: "config",
                field: "upload_url",
            });
        }
        if max_http_payload_size < MIN_HTTP_PAYLOAD_SIZE {
            return Err(UplinkError::InvalidFieldFormat {
                item: "config",
                field: "max_http_payload_size",
            });
        }
        Ok(Self {
            upload_url,
            max_http_payload_size,
        })
    }

    /// Destination URL for assembled bodies.
    #[must_use]
    pub fn upload_url(&self) -> &str { &self.upload_url }

    /// Hard ceiling for one outbound body, headers excluded.
    #[must_use]
    pub const fn max_http_payload_size(&self) -> usize { self.max_http_payload_size }
}
