//! Meta and payload JSON emission shared by sizing and rendering.
//!
//! Every hand-emitted JSON byte flows through [`Sink`]. The counting sink
//! computes exact lengths without materializing anything; the body cursor
//! writes the same pieces into the outbound buffer. One emission path for
//! both is what makes the exact-size guarantee hold by construction.

use std::convert::Infallible;

use crate::{
    error::CapacityError,
    item::{DataSourceConfiguration, Event, Item, Timeseries},
};

use super::cursor::BodyCursor;

/// Receives JSON text piece by piece.
pub(crate) trait Sink {
    type Error;

    fn put(&mut self, piece: &str) -> Result<(), Self::Error>;
}

/// Sink that measures instead of writing.
#[derive(Debug, Default)]
pub(crate) struct ByteCount(pub(crate) usize);

impl Sink for ByteCount {
    type Error = Infallible;

    fn put(&mut self, piece: &str) -> Result<(), Infallible> {
        self.0 += piece.len();
        Ok(())
    }
}

impl Sink for BodyCursor {
    type Error = CapacityError;

    fn put(&mut self, piece: &str) -> Result<(), CapacityError> { self.put_str(piece) }
}

/// Emit the meta JSON wrapper for `item`.
pub(crate) fn emit_meta<S: Sink>(item: &Item, sink: &mut S) -> Result<(), S::Error> {
    sink.put(r#"{"type":"item","version":"1.0","payload":{"type":""#)?;
    match item {
        Item::Event(event) => {
            sink.put("businessEvent")?;
            sink.put(r#"","version":""#)?;
            sink.put(event.schema.version_str())?;
            sink.put(r#""}"#)?;
        }
        Item::Timeseries(timeseries) => {
            sink.put("standardTimeSeries")?;
            sink.put(r#"","version":"1.0","configurationId":""#)?;
            sink.put(&timeseries.configuration_id)?;
            sink.put(r#""}"#)?;
        }
        Item::File(file) => {
            sink.put("file")?;
            sink.put(r#"","version":"1.0","details":{"fileName":""#)?;
            sink.put(&file.name)?;
            sink.put(r#"","creationDate":""#)?;
            sink.put(&file.creation_date)?;
            if let Some(file_type) = &file.file_type {
                sink.put(r#"","fileType":""#)?;
                sink.put(file_type)?;
            }
            sink.put(r#""}}"#)?;
        }
        Item::CustomData(custom) => {
            sink.put(&custom.payload_type)?;
            sink.put(r#"","version":""#)?;
            sink.put(&custom.version)?;
            if let Some(details) = &custom.details {
                sink.put(r#"","details":"#)?;
                sink.put(details)?;
                sink.put("}")?;
            } else {
                sink.put(r#""}"#)?;
            }
        }
        Item::DataSourceConfiguration(configuration) => {
            sink.put("dataSourceConfiguration")?;
            sink.put(r#"","version":"1.0","configurationId":""#)?;
            sink.put(&configuration.configuration_id)?;
            sink.put(r#""}"#)?;
        }
    }
    sink.put("}")
}

/// Emit the payload JSON of `item`.
///
/// File and custom data payloads are raw bytes and never pass through here;
/// they contribute nothing to the JSON emission.
pub(crate) fn emit_payload<S: Sink>(item: &Item, sink: &mut S) -> Result<(), S::Error> {
    match item {
        Item::Event(event) => emit_event_payload(event, sink),
        Item::Timeseries(timeseries) => emit_timeseries_payload(timeseries, sink),
        Item::DataSourceConfiguration(configuration) => {
            emit_configuration_payload(configuration, sink)
        }
        Item::File(_) | Item::CustomData(_) => Ok(()),
    }
}

fn emit_event_payload<S: Sink>(event: &Event, sink: &mut S) -> Result<(), S::Error> {
    sink.put(r#"[{"id":""#)?;
    sink.put(&event.id)?;
    if let Some(correlation_id) = &event.correlation_id {
        sink.put(r#"","correlationId":""#)?;
        sink.put(correlation_id)?;
    }
    sink.put(r#"","timestamp":""#)?;
    sink.put(&event.timestamp)?;
    sink.put(r#"","severity":"#)?;
    sink.put(event.severity.digits(event.schema))?;
    if let Some(description) = &event.description {
        sink.put(r#","description":""#)?;
        sink.put(description)?;
        sink.put("\"")?;
    }
    sink.put(r#","type":""#)?;
    sink.put(&event.event_type)?;
    sink.put(r#"","version":""#)?;
    sink.put(&event.type_version)?;
    sink.put(r#"","details":"#)?;
    sink.put(&event.details)?;
    sink.put("}]")
}

fn emit_timeseries_payload<S: Sink>(timeseries: &Timeseries, sink: &mut S) -> Result<(), S::Error> {
    sink.put("[")?;
    for (list_index, value_list) in timeseries.value_lists.iter().enumerate() {
        if list_index > 0 {
            sink.put(",")?;
        }
        sink.put(r#"{"timestamp":""#)?;
        sink.put(&value_list.timestamp)?;
        sink.put(r#"","values":["#)?;
        for (value_index, value) in value_list.values.iter().enumerate() {
            if value_index > 0 {
                sink.put(",")?;
            }
            sink.put(r#"{"dataPointId":""#)?;
            sink.put(&value.data_point_id)?;
            sink.put(r#"","value":""#)?;
            sink.put(&value.value)?;
            sink.put(r#"","qualityCode":""#)?;
            sink.put(&value.quality_code)?;
            sink.put(r#""}"#)?;
        }
        sink.put("]}")?;
    }
    sink.put("]")
}

fn emit_configuration_payload<S: Sink>(
    configuration: &DataSourceConfiguration,
    sink: &mut S,
) -> Result<(), S::Error> {
    sink.put(r#"{"configurationId":""#)?;
    sink.put(&configuration.configuration_id)?;
    sink.put(r#"","dataSources":["#)?;
    for (source_index, data_source) in configuration.data_sources.iter().enumerate() {
        if source_index > 0 {
            sink.put(",")?;
        }
        sink.put(r#"{"name":""#)?;
        sink.put(&data_source.name)?;
        if let Some(description) = &data_source.description {
            sink.put(r#"","description":""#)?;
            sink.put(description)?;
        }
        sink.put(r#"","dataPoints":["#)?;
        for (point_index, data_point) in data_source.data_points.iter().enumerate() {
            if point_index > 0 {
                sink.put(",")?;
            }
            sink.put(r#"{"id":""#)?;
            sink.put(&data_point.id)?;
            sink.put(r#"","name":""#)?;
            sink.put(&data_point.name)?;
            if let Some(description) = &data_point.description {
                sink.put(r#"","description":""#)?;
                sink.put(description)?;
            }
            sink.put(r#"","type":""#)?;
            sink.put(&data_point.data_type)?;
            sink.put(r#"","unit":""#)?;
            sink.put(&data_point.unit)?;
            if let Some(custom_data) = &data_point.custom_data {
                sink.put(r#"","customData":"#)?;
                sink.put(custom_data)?;
                sink.put("}")?;
            } else {
                sink.put(r#""}"#)?;
            }
        }
        sink.put("]")?;
        if let Some(custom_data) = &data_source.custom_data {
            sink.put(r#","customData":"#)?;
            sink.put(custom_data)?;
        }
        sink.put("}")?;
    }
    sink.put("]}")
}
