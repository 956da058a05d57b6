//! Core types for dashfeed-core.
//!
//! This module defines the data structures shared across the pipeline: the
//! [`SourceKind`] discriminant, the [`SourceDescriptor`] handed to the loader,
//! the transient [`RawRow`] produced by the CSV parser, and the five typed
//! records plus the [`Dataset`] that tags a collection of them.

use crate::error::UnknownSourceKind;
use serde::Serialize;
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

/// Which dashboard source a collection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Sales,
    Tracks,
    Customers,
    Genres,
    Inventory,
}

impl SourceKind {
    /// Every known source, in dashboard order.
    pub const ALL: [SourceKind; 5] = [
        SourceKind::Sales,
        SourceKind::Tracks,
        SourceKind::Customers,
        SourceKind::Genres,
        SourceKind::Inventory,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SourceKind::Sales => "sales",
            SourceKind::Tracks => "tracks",
            SourceKind::Customers => "customers",
            SourceKind::Genres => "genres",
            SourceKind::Inventory => "inventory",
        }
    }

    /// File name the dashboard expects for this source inside the data directory.
    pub fn default_file(self) -> &'static str {
        match self {
            SourceKind::Sales => "daily_sales_revenue.csv",
            SourceKind::Tracks => "track_purchase_counts.csv",
            SourceKind::Customers => "customer_demographics.csv",
            SourceKind::Genres => "genre_playback_time.csv",
            SourceKind::Inventory => "inventory_stock_levels.csv",
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for SourceKind {
    type Err = UnknownSourceKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SourceKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownSourceKind(s.to_string()))
    }
}

/// A source to load: which schema applies and where the CSV lives.
///
/// `reference` is either a filesystem path or an `http://` URL; the fetcher
/// decides how to retrieve it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceDescriptor {
    pub kind: SourceKind,
    pub reference: String,
}

impl SourceDescriptor {
    pub fn new(kind: SourceKind, reference: impl Into<String>) -> Self {
        Self {
            kind,
            reference: reference.into(),
        }
    }

    /// Identifier used in logs and error messages.
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }
}

impl std::fmt::Display for SourceDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.kind, self.reference)
    }
}

// ---------------------------------------------------------------------------
// Raw rows
// ---------------------------------------------------------------------------

/// One parsed CSV row, keyed by header name. `None` marks a null cell: an
/// empty value, or a column the row was too short to reach.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    fields: HashMap<String, Option<String>>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, column: impl Into<String>, value: Option<String>) {
        self.fields.insert(column.into(), value);
    }

    /// Value of `column`, or `None` when the cell is null or the column is absent.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).and_then(|v| v.as_deref())
    }

    pub fn contains_column(&self, column: &str) -> bool {
        self.fields.contains_key(column)
    }

    /// A row is degenerate when no field carries a value.
    pub fn is_degenerate(&self) -> bool {
        self.fields.values().all(Option::is_none)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, Option<V>)> for RawRow
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, Option<V>)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.map(Into::into)))
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Typed records
// ---------------------------------------------------------------------------
//
// Label columns are passed through untouched. Real columns hold `NaN` and
// integer columns hold `None` when the cell text is not a number.

/// One day of revenue from `daily_sales_revenue.csv`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesRecord {
    #[serde(rename = "Date")]
    pub date: Option<String>,
    #[serde(rename = "Revenue_USD")]
    pub revenue_usd: f64,
}

/// Purchase count for a single track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackRecord {
    #[serde(rename = "Track_ID")]
    pub track_id: Option<String>,
    #[serde(rename = "Purchase_Count")]
    pub purchase_count: Option<i64>,
}

/// Purchase total for one customer age bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerRecord {
    #[serde(rename = "Age_Group")]
    pub age_group: Option<String>,
    #[serde(rename = "Total_Purchases")]
    pub total_purchases: Option<i64>,
}

/// Minutes played for one genre.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenreRecord {
    #[serde(rename = "Genre")]
    pub genre: Option<String>,
    #[serde(rename = "Total_Minutes_Played")]
    pub total_minutes_played: Option<i64>,
}

/// Stock on hand for one product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryRecord {
    #[serde(rename = "Product_Category")]
    pub product_category: Option<String>,
    #[serde(rename = "Current_Stock")]
    pub current_stock: Option<i64>,
}

/// A typed collection tagged with the source it was loaded from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Dataset {
    Sales(Vec<SalesRecord>),
    Tracks(Vec<TrackRecord>),
    Customers(Vec<CustomerRecord>),
    Genres(Vec<GenreRecord>),
    Inventory(Vec<InventoryRecord>),
}

impl Dataset {
    pub fn kind(&self) -> SourceKind {
        match self {
            Dataset::Sales(_) => SourceKind::Sales,
            Dataset::Tracks(_) => SourceKind::Tracks,
            Dataset::Customers(_) => SourceKind::Customers,
            Dataset::Genres(_) => SourceKind::Genres,
            Dataset::Inventory(_) => SourceKind::Inventory,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Dataset::Sales(r) => r.len(),
            Dataset::Tracks(r) => r.len(),
            Dataset::Customers(r) => r.len(),
            Dataset::Genres(r) => r.len(),
            Dataset::Inventory(r) => r.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_kind_round_trips_through_its_name() {
        for kind in SourceKind::ALL {
            assert_eq!(kind.name().parse::<SourceKind>().unwrap(), kind);
        }
        assert_eq!(" Sales ".parse::<SourceKind>().unwrap(), SourceKind::Sales);
        assert!("albums".parse::<SourceKind>().is_err());
    }

    #[test]
    fn row_with_only_nulls_is_degenerate() {
        let row: RawRow = [("Date", None::<&str>), ("Revenue_USD", None)]
            .into_iter()
            .collect();
        assert!(row.is_degenerate());

        let row: RawRow = [("Date", None), ("Revenue_USD", Some("1.0"))]
            .into_iter()
            .collect();
        assert!(!row.is_degenerate());
        assert_eq!(row.get("Revenue_USD"), Some("1.0"));
        assert_eq!(row.get("Date"), None);
    }

    #[test]
    fn dataset_reports_its_kind() {
        let ds = Dataset::Inventory(vec![InventoryRecord {
            product_category: Some("Widgets".into()),
            current_stock: Some(42),
        }]);
        assert_eq!(ds.kind(), SourceKind::Inventory);
        assert_eq!(ds.len(), 1);
        assert!(!ds.is_empty());
    }
}
