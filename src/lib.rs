//! dashfeed — loads and normalises the CSV sources behind the sales dashboard.
//!
//! Five CSV sources (daily sales, track purchases, customer demographics,
//! genre playback time, inventory) are fetched concurrently, cleaned and
//! coerced into typed records. The result is a [`Dashboard`] that a renderer
//! can draw from, or a single error naming the source that failed.
//!
//! # Architecture
//!
//! ```text
//! Config ──► Loader ──(fan-out: one task per source)──► Vec<Dataset>
//!                                                          │
//!                        Report ◄── Series ◄── Dashboard ◄─┘
//! ```
//!
//! The library crates are re-exported so integration tests and the binary
//! can import everything from here.

pub mod dashboard;
pub mod report;

pub use dashboard::{Dashboard, DashboardError, DashboardSeries};
pub use dashfeed_core::{
    config, schema, series, CustomerRecord, Dataset, GenreRecord, InventoryRecord, LoadError,
    RawRow, Record, SalesRecord, SourceDescriptor, SourceKind, TrackRecord,
};
pub use dashfeed_feeds::{
    parse_csv, Diagnosis, Fetch, FetchError, FileFetcher, HttpFetcher, Loader, ParsedTable,
    SourceFetcher,
};
