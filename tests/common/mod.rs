#![allow(dead_code)]
//! Shared test utilities for dashfeed integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file. The fakes are deterministic under
//! `#[tokio::test(start_paused = true)]`.

pub mod builders;
pub mod fake_csv_server;
pub mod fake_fetcher;
pub mod fixtures;

pub use builders::*;
pub use fake_fetcher::*;
pub use fixtures::*;
