//! Business events.

use serde_json::{Map, Value};

use crate::{error::UplinkError, item, wire::token};

/// Schema version of the event payload envelope.
///
/// The schema version decides both the `version` tag in the meta payload and
/// how many digits a serialized severity occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventSchema {
    V1,
    V2,
}

impl EventSchema {
    /// Wire representation of the schema version.
    #[must_use]
    pub(crate) const fn version_str(self) -> &'static str {
        match self {
            Self::V1 => "1.0",
            Self::V2 => "2.0",
        }
    }
}

/// Event severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Information,
}

impl Severity {
    /// Serialized digits for this severity under `schema`: one digit for
    /// schema 1.0, two for 2.0.
    #[must_use]
    pub(crate) const fn digits(self, schema: EventSchema) -> &'static str {
        match (schema, self) {
            (EventSchema::V1, Self::Error) => "1",
            (EventSchema::V1, Self::Warning) => "2",
            (EventSchema::V1, Self::Information) => "3",
            (EventSchema::V2, Self::Error) => "20",
            (EventSchema::V2, Self::Warning) => "30",
            (EventSchema::V2, Self::Information) => "40",
        }
    }
}

/// One business event, stamped with a fresh GUID at construction.
#[derive(Debug)]
pub struct Event {
    pub(crate) id: String,
    pub(crate) schema: EventSchema,
    pub(crate) event_type: String,
    pub(crate) type_version: String,
    pub(crate) severity: Severity,
    pub(crate) timestamp: String,
    pub(crate) correlation_id: Option<String>,
    pub(crate) description: Option<String>,
    /// Compact JSON object, `{}` when the caller supplied no details.
    pub(crate) details: String,
}

impl Event {
    /// Create an event with the mandatory fields.
    ///
    /// `timestamp` must be a UTC millisecond timestamp
    /// (`yyyy-MM-ddTHH:mm:ss.SSSZ`); it is validated when the event enters
    /// the engine, not here.
    pub fn new(
        schema: EventSchema,
        event_type: impl Into<String>,
        type_version: impl Into<String>,
        severity: Severity,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            id: token::guid(),
            schema,
            event_type: event_type.into(),
            type_version: type_version.into(),
            severity,
            timestamp: timestamp.into(),
            correlation_id: None,
            description: None,
            details: "{}".to_owned(),
        }
    }

    /// Attach a diagnostic correlation identifier.
    #[must_use]
    pub fn with_correlation_id(mut self, correlation_id: impl Into<String>) -> Self {
        self.correlation_id = Some(correlation_id.into());
        self
    }

    /// Attach a free-text description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach a details object, replacing the default empty one.
    #[must_use]
    pub fn with_details(mut self, details: Map<String, Value>) -> Self {
        self.details = Value::Object(details).to_string();
        self
    }

    /// GUID assigned at construction.
    #[must_use]
    pub fn id(&self) -> &str { &self.id }

    pub(crate) fn validate(&self) -> Result<(), UplinkError> {
        item::require("event", "type", &self.event_type)?;
        item::require("event", "version", &self.type_version)?;
        item::validate_timestamp("event", "timestamp", &self.timestamp)?;
        if let Some(correlation_id) = &self.correlation_id {
            item::require("event", "correlationId", correlation_id)?;
        }
        if let Some(description) = &self.description {
            item::json_safe("event", "description", description)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Event {
        Event::new(
            EventSchema::V1,
            "thresholdViolation",
            "1.0.1",
            Severity::Error,
            "2018-04-26T08:06:25.317Z",
        )
    }

    #[test]
    fn construction_stamps_a_guid() {
        let event = sample();
        assert_eq!(event.id().len(), 36);
        assert_eq!(event.id().matches('-').count(), 4);
        assert_ne!(sample().id(), event.id());
    }

    #[test]
    fn severity_digit_width_follows_schema_version() {
        for severity in [Severity::Error, Severity::Warning, Severity::Information] {
            assert_eq!(severity.digits(EventSchema::V1).len(), 1);
            assert_eq!(severity.digits(EventSchema::V2).len(), 2);
        }
    }

    #[test]
    fn validate_rejects_malformed_timestamp() {
        let event = Event::new(
            EventSchema::V1,
            "thresholdViolation",
            "1.0.1",
            Severity::Error,
            "yesterday",
        );
        event.validate().expect_err("timestamp must be validated");
    }

    #[test]
    fn validate_accepts_fully_populated_event() {
        let mut details = Map::new();
        details.insert("message".to_owned(), Value::String("over limit".to_owned()));
        sample()
            .with_correlation_id("abc123")
            .with_description("threshold crossed")
            .with_details(details)
            .validate()
            .expect("populated event is valid");
    }
}
