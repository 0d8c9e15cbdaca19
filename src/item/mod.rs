//! Typed telemetry and configuration items accepted by the assembly engine.
//!
//! `Item` is a closed sum type; the sizing, rendering, and assembly entry
//! points dispatch on it exactly once. Items are immutable once handed to
//! the engine apart from the status bookkeeping a containing
//! [`Store`](crate::store::Store) performs on their behalf.

pub mod custom_data;
pub mod data_source;
pub mod event;
pub mod file;
pub mod timeseries;

pub use custom_data::CustomData;
pub use data_source::{DataPoint, DataSource, DataSourceConfiguration};
pub use event::{Event, EventSchema, Severity};
pub use file::FileItem;
pub use timeseries::{DataPointValue, Timeseries, ValueList};

use crate::error::UplinkError;

/// One typed telemetry or configuration record awaiting upload.
#[derive(Debug)]
pub enum Item {
    Event(Event),
    Timeseries(Timeseries),
    File(FileItem),
    CustomData(CustomData),
    DataSourceConfiguration(DataSourceConfiguration),
}

impl Item {
    /// Check every mandatory field before the item is sized or rendered.
    ///
    /// # Errors
    ///
    /// Returns [`UplinkError::MissingMandatoryField`] or
    /// [`UplinkError::InvalidFieldFormat`] describing the first offending
    /// field.
    pub fn validate(&self) -> Result<(), UplinkError> {
        match self {
            Self::Event(event) => event.validate(),
            Self::Timeseries(timeseries) => timeseries.validate(),
            Self::File(file) => file.validate(),
            Self::CustomData(custom) => custom.validate(),
            Self::DataSourceConfiguration(configuration) => configuration.validate(),
        }
    }

    /// Variant name used in diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Event(_) => "event",
            Self::Timeseries(_) => "timeseries",
            Self::File(_) => "file",
            Self::CustomData(_) => "custom data",
            Self::DataSourceConfiguration(_) => "data source configuration",
        }
    }
}

impl From<Event> for Item {
    fn from(event: Event) -> Self { Self::Event(event) }
}

impl From<Timeseries> for Item {
    fn from(timeseries: Timeseries) -> Self { Self::Timeseries(timeseries) }
}

impl From<FileItem> for Item {
    fn from(file: FileItem) -> Self { Self::File(file) }
}

impl From<CustomData> for Item {
    fn from(custom: CustomData) -> Self { Self::CustomData(custom) }
}

impl From<DataSourceConfiguration> for Item {
    fn from(configuration: DataSourceConfiguration) -> Self {
        Self::DataSourceConfiguration(configuration)
    }
}

/// Reject empty mandatory fields, then apply the JSON-safety check.
pub(crate) fn require(
    item: &'static str,
    field: &'static str,
    value: &str,
) -> Result<(), UplinkError> {
    if value.is_empty() {
        return Err(UplinkError::MissingMandatoryField { item, field });
    }
    json_safe(item, field, value)
}

/// Strings embedded in hand-emitted JSON must not need escaping, otherwise
/// the exact-size arithmetic would diverge from the rendered bytes.
pub(crate) fn json_safe(
    item: &'static str,
    field: &'static str,
    value: &str,
) -> Result<(), UplinkError> {
    if value
        .bytes()
        .any(|byte| byte == b'"' || byte == b'\\' || byte < 0x20)
    {
        return Err(UplinkError::InvalidFieldFormat { item, field });
    }
    Ok(())
}

/// Validate a UTC millisecond timestamp of the form
/// `yyyy-MM-ddTHH:mm:ss.SSSZ` (24 bytes).
pub(crate) fn validate_timestamp(
    item: &'static str,
    field: &'static str,
    value: &str,
) -> Result<(), UplinkError> {
    let bytes = value.as_bytes();
    let shape_ok = bytes.len() == 24
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes[10] == b'T'
        && bytes[13] == b':'
        && bytes[16] == b':'
        && bytes[19] == b'.'
        && bytes[23] == b'Z';
    let digits_ok = shape_ok
        && bytes.iter().enumerate().all(|(index, byte)| {
            matches!(index, 4 | 7 | 10 | 13 | 16 | 19 | 23) || byte.is_ascii_digit()
        });
    if digits_ok {
        Ok(())
    } else {
        Err(UplinkError::InvalidFieldFormat { item, field })
    }
}
