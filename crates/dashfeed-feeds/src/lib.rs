//! dashfeed-feeds — source retrieval and the loader for dashfeed.
//!
//! Each source reference is fetched (file or HTTP), parsed as CSV, stripped
//! of degenerate rows and coerced through its schema into a typed
//! [`dashfeed_core::Dataset`].

pub mod fetch;
pub mod loader;
pub mod parse;

pub use fetch::{Fetch, FetchError, FileFetcher, HttpFetcher, SourceFetcher};
pub use loader::{Diagnosis, Loader};
pub use parse::{parse_csv, ParsedTable};
