//! The five typed collections the dashboard charts are drawn from.

use dashfeed_core::series;
use dashfeed_core::{
    CustomerRecord, Dataset, GenreRecord, InventoryRecord, LoadError, SalesRecord,
    SourceDescriptor, SourceKind, TrackRecord,
};
use dashfeed_feeds::{Fetch, Loader};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Load(#[from] LoadError),

    /// The descriptor list did not include one of the five sources.
    #[error("no `{0}` source was configured")]
    Missing(SourceKind),
}

/// Every collection a dashboard page needs, handed out only when all loaded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub sales: Vec<SalesRecord>,
    pub tracks: Vec<TrackRecord>,
    pub customers: Vec<CustomerRecord>,
    pub genres: Vec<GenreRecord>,
    pub inventory: Vec<InventoryRecord>,
}

/// Chart-ready series derived from a [`Dashboard`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSeries {
    pub revenue: Vec<(String, f64)>,
    pub top_tracks: Vec<(String, Option<i64>)>,
    pub demographics: Vec<(u8, Option<i64>)>,
    pub genres: Vec<(String, Option<i64>)>,
    pub inventory: Vec<(String, Option<i64>)>,
}

impl Dashboard {
    /// Run one load cycle over `sources` and assemble the result.
    pub async fn load<F: Fetch>(
        loader: &Loader<F>,
        sources: &[SourceDescriptor],
    ) -> Result<Self, DashboardError> {
        let datasets = loader.load_all(sources).await?;
        Self::from_datasets(datasets)
    }

    /// Sort tagged datasets into their slots. A kind that appears twice keeps
    /// its last collection.
    pub fn from_datasets(datasets: Vec<Dataset>) -> Result<Self, DashboardError> {
        let (mut sales, mut tracks, mut customers, mut genres, mut inventory) =
            (None, None, None, None, None);

        for dataset in datasets {
            match dataset {
                Dataset::Sales(r) => sales = Some(r),
                Dataset::Tracks(r) => tracks = Some(r),
                Dataset::Customers(r) => customers = Some(r),
                Dataset::Genres(r) => genres = Some(r),
                Dataset::Inventory(r) => inventory = Some(r),
            }
        }

        Ok(Self {
            sales: sales.ok_or(DashboardError::Missing(SourceKind::Sales))?,
            tracks: tracks.ok_or(DashboardError::Missing(SourceKind::Tracks))?,
            customers: customers.ok_or(DashboardError::Missing(SourceKind::Customers))?,
            genres: genres.ok_or(DashboardError::Missing(SourceKind::Genres))?,
            inventory: inventory.ok_or(DashboardError::Missing(SourceKind::Inventory))?,
        })
    }

    pub fn record_counts(&self) -> [(SourceKind, usize); 5] {
        [
            (SourceKind::Sales, self.sales.len()),
            (SourceKind::Tracks, self.tracks.len()),
            (SourceKind::Customers, self.customers.len()),
            (SourceKind::Genres, self.genres.len()),
            (SourceKind::Inventory, self.inventory.len()),
        ]
    }

    pub fn series(&self, top_tracks: usize) -> DashboardSeries {
        DashboardSeries {
            revenue: series::sales_timeline(&self.sales),
            top_tracks: series::top_tracks(&self.tracks, top_tracks),
            demographics: series::demographic_points(&self.customers),
            genres: series::genre_shares(&self.genres),
            inventory: series::inventory_levels(&self.inventory),
        }
    }
}
