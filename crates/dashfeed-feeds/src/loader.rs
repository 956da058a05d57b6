//! Loader — fetch, parse, clean and coerce sources into typed collections.
//!
//! [`Loader::load_source`] runs the whole pipeline for one source.
//! [`Loader::load_all`] spawns one task per source and waits for all of them,
//! returning the collections in input order or the first error. Tasks still
//! running when an error arrives are detached, not aborted; their results are
//! dropped.

use crate::fetch::{Fetch, SourceFetcher};
use crate::parse::{parse_csv, ParsedTable};
use dashfeed_core::schema::{self, Record};
use dashfeed_core::{
    CustomerRecord, Dataset, GenreRecord, InventoryRecord, LoadError, SalesRecord,
    SourceDescriptor, SourceKind, TrackRecord,
};
use std::sync::Arc;

/// Row counts observed while loading a single source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnosis {
    pub source: SourceDescriptor,
    /// Data rows the parser produced.
    pub raw_rows: usize,
    /// Rows left after dropping the degenerate ones.
    pub cleaned_rows: usize,
}

impl Diagnosis {
    pub fn dropped_rows(&self) -> usize {
        self.raw_rows - self.cleaned_rows
    }
}

/// Loads dashboard sources through a shared [`Fetch`] implementation.
#[derive(Debug)]
pub struct Loader<F = SourceFetcher> {
    fetcher: Arc<F>,
}

impl<F> Clone for Loader<F> {
    fn clone(&self) -> Self {
        Self {
            fetcher: Arc::clone(&self.fetcher),
        }
    }
}

impl Default for Loader<SourceFetcher> {
    fn default() -> Self {
        Self::new(SourceFetcher::new())
    }
}

impl<F: Fetch> Loader<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
        }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Load one source into the records of a statically known schema.
    pub async fn load_records<R: Record>(
        &self,
        source: &SourceDescriptor,
    ) -> Result<Vec<R>, LoadError> {
        debug_assert_eq!(source.kind, R::KIND, "descriptor kind must match the record schema");
        let table = fetch_table(&*self.fetcher, source).await?;
        normalize::<R>(source, table)
    }

    /// Load one source into the dataset its kind calls for.
    pub async fn load_source(&self, source: &SourceDescriptor) -> Result<Dataset, LoadError> {
        load_dataset(&*self.fetcher, source).await
    }

    /// Load every source concurrently. All or nothing: the first failure wins.
    pub async fn load_all(&self, sources: &[SourceDescriptor]) -> Result<Vec<Dataset>, LoadError> {
        if sources.is_empty() {
            return Err(LoadError::NoSources);
        }
        tracing::debug!(count = sources.len(), "starting load cycle");

        // Spawn everything up front so no load waits on another.
        let pending: Vec<_> = sources
            .iter()
            .cloned()
            .map(|source| {
                let fetcher = Arc::clone(&self.fetcher);
                let name = source.name();
                let handle = tokio::spawn(async move { load_dataset(&*fetcher, &source).await });
                async move {
                    match handle.await {
                        Ok(result) => result,
                        Err(err) => Err(LoadError::Join {
                            name: name.to_string(),
                            reason: err.to_string(),
                        }),
                    }
                }
            })
            .collect();

        match futures::future::try_join_all(pending).await {
            Ok(datasets) => {
                tracing::info!(count = datasets.len(), "load cycle complete");
                Ok(datasets)
            }
            Err(err) => {
                tracing::error!(error = %err, "load cycle failed");
                Err(err)
            }
        }
    }

    /// Load one source and report how many rows survived cleaning.
    pub async fn diagnose(&self, source: &SourceDescriptor) -> Result<Diagnosis, LoadError> {
        tracing::info!(source = source.name(), reference = %source.reference, "running diagnostic");
        let table = fetch_table(&*self.fetcher, source).await?;
        let raw_rows = table.rows.len();
        let dataset = dataset_from_table(source, table)?;

        let diagnosis = Diagnosis {
            source: source.clone(),
            raw_rows,
            cleaned_rows: dataset.len(),
        };
        tracing::info!(
            source = source.name(),
            raw_rows,
            cleaned_rows = diagnosis.cleaned_rows,
            "diagnostic complete; data is ready for charting"
        );
        Ok(diagnosis)
    }
}

// ---------------------------------------------------------------------------
// Pipeline stages
// ---------------------------------------------------------------------------

async fn fetch_table<F: Fetch>(
    fetcher: &F,
    source: &SourceDescriptor,
) -> Result<ParsedTable, LoadError> {
    tracing::debug!(source = source.name(), reference = %source.reference, "fetching source");

    let bytes = fetcher
        .fetch(&source.reference)
        .await
        .map_err(|e| LoadError::unavailable(source, e))?;
    let table = parse_csv(&bytes).map_err(|e| LoadError::parse(source, e))?;

    if table.rows.is_empty() {
        return Err(LoadError::unavailable(source, "no data rows found"));
    }
    Ok(table)
}

fn normalize<R: Record>(source: &SourceDescriptor, table: ParsedTable) -> Result<Vec<R>, LoadError> {
    let missing = schema::missing_columns::<R>(&table.headers);
    if !missing.is_empty() {
        tracing::warn!(
            source = source.name(),
            ?missing,
            "source is missing expected columns; their values will be null"
        );
    }

    let raw_rows = table.rows.len();
    let records: Vec<R> = table
        .rows
        .iter()
        .filter(|row| !row.is_degenerate())
        .map(schema::coerce::<R>)
        .collect();

    if records.is_empty() {
        return Err(LoadError::empty(source));
    }

    tracing::debug!(
        source = source.name(),
        raw_rows,
        records = records.len(),
        dropped = raw_rows - records.len(),
        "source normalised"
    );
    Ok(records)
}

fn typed<R: Record>(source: &SourceDescriptor, table: ParsedTable) -> Result<Dataset, LoadError> {
    debug_assert_eq!(source.kind, R::KIND);
    normalize::<R>(source, table).map(R::into_dataset)
}

fn dataset_from_table(source: &SourceDescriptor, table: ParsedTable) -> Result<Dataset, LoadError> {
    match source.kind {
        SourceKind::Sales => typed::<SalesRecord>(source, table),
        SourceKind::Tracks => typed::<TrackRecord>(source, table),
        SourceKind::Customers => typed::<CustomerRecord>(source, table),
        SourceKind::Genres => typed::<GenreRecord>(source, table),
        SourceKind::Inventory => typed::<InventoryRecord>(source, table),
    }
}

async fn load_dataset<F: Fetch>(
    fetcher: &F,
    source: &SourceDescriptor,
) -> Result<Dataset, LoadError> {
    let table = fetch_table(fetcher, source).await?;
    dataset_from_table(source, table)
}
