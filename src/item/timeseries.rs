//! Timeseries items: batches of timestamped data point readings.

use crate::{error::UplinkError, item};

/// One reading of one data point.
#[derive(Clone, Debug)]
pub struct DataPointValue {
    pub(crate) data_point_id: String,
    pub(crate) value: String,
    pub(crate) quality_code: String,
}

impl DataPointValue {
    pub fn new(
        data_point_id: impl Into<String>,
        value: impl Into<String>,
        quality_code: impl Into<String>,
    ) -> Self {
        Self {
            data_point_id: data_point_id.into(),
            value: value.into(),
            quality_code: quality_code.into(),
        }
    }

    fn validate(&self) -> Result<(), UplinkError> {
        item::require("timeseries", "dataPointId", &self.data_point_id)?;
        item::require("timeseries", "value", &self.value)?;
        item::require("timeseries", "qualityCode", &self.quality_code)
    }
}

/// Readings sharing one timestamp.
#[derive(Clone, Debug)]
pub struct ValueList {
    pub(crate) timestamp: String,
    pub(crate) values: Vec<DataPointValue>,
}

impl ValueList {
    pub fn new(timestamp: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            values: Vec::new(),
        }
    }

    /// Append one reading.
    #[must_use]
    pub fn with_value(mut self, value: DataPointValue) -> Self {
        self.values.push(value);
        self
    }

    fn validate(&self) -> Result<(), UplinkError> {
        item::validate_timestamp("timeseries", "timestamp", &self.timestamp)?;
        for value in &self.values {
            value.validate()?;
        }
        Ok(())
    }
}

/// A timeseries item bound to one data source configuration.
#[derive(Debug)]
pub struct Timeseries {
    pub(crate) configuration_id: String,
    pub(crate) value_lists: Vec<ValueList>,
}

impl Timeseries {
    pub fn new(configuration_id: impl Into<String>) -> Self {
        Self {
            configuration_id: configuration_id.into(),
            value_lists: Vec::new(),
        }
    }

    /// Append one value list, preserving insertion order on the wire.
    pub fn push(&mut self, value_list: ValueList) { self.value_lists.push(value_list); }

    /// Builder-style variant of [`Timeseries::push`].
    #[must_use]
    pub fn with_value_list(mut self, value_list: ValueList) -> Self {
        self.value_lists.push(value_list);
        self
    }

    pub(crate) fn validate(&self) -> Result<(), UplinkError> {
        item::require("timeseries", "configurationId", &self.configuration_id)?;
        for value_list in &self.value_lists {
            value_list.validate()?;
        }
        Ok(())
    }
}
