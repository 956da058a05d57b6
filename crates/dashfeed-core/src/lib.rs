//! dashfeed-core — shared types for the dashboard data pipeline.
//!
//! This crate holds everything that does not touch I/O: the source kinds and
//! descriptors, raw rows, the typed records and their schemas, the error
//! taxonomy, configuration, and chart series preparation.
//!
//! # Pipeline
//!
//! ```text
//! fetch ──► parse ──► drop degenerate rows ──► coerce (schema) ──► Dataset
//!                                                                   │
//!                                                      series ◄─────┘
//! ```

pub mod config;
pub mod error;
pub mod schema;
pub mod series;
pub mod types;

pub use error::{LoadError, UnknownSourceKind};
pub use schema::Record;
pub use types::{
    CustomerRecord, Dataset, GenreRecord, InventoryRecord, RawRow, SalesRecord, SourceDescriptor,
    SourceKind, TrackRecord,
};
