//! Data source configuration items.

use serde_json::{Map, Value};

use crate::{error::UplinkError, item};

/// One data point definition within a data source.
#[derive(Clone, Debug)]
pub struct DataPoint {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) data_type: String,
    pub(crate) unit: String,
    /// Compact JSON object when present.
    pub(crate) custom_data: Option<String>,
}

impl DataPoint {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        data_type: impl Into<String>,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            data_type: data_type.into(),
            unit: unit.into(),
            custom_data: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_custom_data(mut self, custom_data: Map<String, Value>) -> Self {
        self.custom_data = Some(Value::Object(custom_data).to_string());
        self
    }

    fn validate(&self) -> Result<(), UplinkError> {
        item::require("data source configuration", "dataPoint.id", &self.id)?;
        item::require("data source configuration", "dataPoint.name", &self.name)?;
        item::require("data source configuration", "dataPoint.type", &self.data_type)?;
        item::require("data source configuration", "dataPoint.unit", &self.unit)?;
        if let Some(description) = &self.description {
            item::json_safe(
                "data source configuration",
                "dataPoint.description",
                description,
            )?;
        }
        Ok(())
    }
}

/// One data source grouping a set of data points.
#[derive(Clone, Debug)]
pub struct DataSource {
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) data_points: Vec<DataPoint>,
    /// Compact JSON object when present.
    pub(crate) custom_data: Option<String>,
}

impl DataSource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            data_points: Vec::new(),
            custom_data: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_data_point(mut self, data_point: DataPoint) -> Self {
        self.data_points.push(data_point);
        self
    }

    #[must_use]
    pub fn with_custom_data(mut self, custom_data: Map<String, Value>) -> Self {
        self.custom_data = Some(Value::Object(custom_data).to_string());
        self
    }

    fn validate(&self) -> Result<(), UplinkError> {
        item::require("data source configuration", "dataSource.name", &self.name)?;
        if let Some(description) = &self.description {
            item::json_safe(
                "data source configuration",
                "dataSource.description",
                description,
            )?;
        }
        for data_point in &self.data_points {
            data_point.validate()?;
        }
        Ok(())
    }
}

/// The agent's declared mapping of data sources and points.
#[derive(Debug)]
pub struct DataSourceConfiguration {
    pub(crate) configuration_id: String,
    pub(crate) data_sources: Vec<DataSource>,
}

impl DataSourceConfiguration {
    pub fn new(configuration_id: impl Into<String>) -> Self {
        Self {
            configuration_id: configuration_id.into(),
            data_sources: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_data_source(mut self, data_source: DataSource) -> Self {
        self.data_sources.push(data_source);
        self
    }

    pub(crate) fn validate(&self) -> Result<(), UplinkError> {
        item::require(
            "data source configuration",
            "configurationId",
            &self.configuration_id,
        )?;
        for data_source in &self.data_sources {
            data_source.validate()?;
        }
        Ok(())
    }
}
