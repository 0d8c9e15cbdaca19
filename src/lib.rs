//! Bounded multipart assembly and store batching for IoT telemetry uploads.
//!
//! `uplink` packs typed telemetry items (events, timeseries, files, custom
//! data, data-source configurations) into `multipart/related` HTTP bodies
//! under a hard size ceiling. Sizes are computed exactly before allocation,
//! bodies are rendered into pre-sized buffers that never grow, and a batch
//! ([`Store`]) is drained across as many requests as its byte budget
//! demands, tracking per-entry status until everything sendable has been
//! sent.
//!
//! The HTTP transport itself is a caller-supplied [`Transport`]
//! implementation; this crate owns body assembly, request construction, and
//! drain-round bookkeeping.

pub mod assemble;
pub mod config;
pub mod error;
pub mod exchange;
pub mod item;
pub mod payload;
pub mod sizing;
pub mod store;
mod wire;

pub use assemble::{Body, assemble_item};
pub use config::{Config, MIN_HTTP_PAYLOAD_SIZE};
pub use error::{CapacityError, PayloadError, Result, TransportError, UplinkError};
pub use exchange::{Exchange, HttpRequest, HttpResponse, Transport};
pub use item::{
    CustomData, DataPoint, DataPointValue, DataSource, DataSourceConfiguration, Event,
    EventSchema, FileItem, Item, Severity, Timeseries, ValueList,
};
pub use payload::{FileSource, MemorySource, PayloadSource};
pub use sizing::size_of;
pub use store::{EntryId, EntryStatus, Store, StoreEntry};
