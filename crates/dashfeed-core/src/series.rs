//! Chart series preparation.
//!
//! Pure shaping of typed records into the `(label, value)` series each chart
//! consumes. Nothing here mutates its input; the loader's row order is left
//! intact for any other consumer.

use crate::types::{CustomerRecord, GenreRecord, InventoryRecord, SalesRecord, TrackRecord};
use chrono::NaiveDate;
use std::cmp::Reverse;

/// Age brackets in axis order. A bracket's x coordinate is its 1-based index.
pub const AGE_GROUPS: [&str; 5] = ["18-25", "26-35", "36-45", "46-60", "60+"];

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
}

/// Revenue per day in chronological order.
///
/// Rows whose date does not parse keep their relative order after all dated rows.
pub fn sales_timeline(records: &[SalesRecord]) -> Vec<(String, f64)> {
    let mut keyed: Vec<_> = records
        .iter()
        .map(|r| {
            let date = r.date.as_deref().and_then(parse_date);
            (date.is_none(), date, r)
        })
        .collect();
    keyed.sort_by_key(|(undated, date, _)| (*undated, *date));

    keyed
        .into_iter()
        .map(|(_, _, r)| (r.date.clone().unwrap_or_default(), r.revenue_usd))
        .collect()
}

/// The `n` best-selling tracks, highest count first. Ties keep input order and
/// tracks without a count sort last.
pub fn top_tracks(records: &[TrackRecord], n: usize) -> Vec<(String, Option<i64>)> {
    let mut sorted: Vec<&TrackRecord> = records.iter().collect();
    sorted.sort_by_key(|r| Reverse(r.purchase_count));
    sorted
        .into_iter()
        .take(n)
        .map(|r| {
            let id = r.track_id.as_deref().unwrap_or("?");
            (format!("Track {id}"), r.purchase_count)
        })
        .collect()
}

/// Scatter points of `(age bracket ordinal, total purchases)`.
///
/// Rows whose bracket is not one of [`AGE_GROUPS`] have no x coordinate and
/// are left out.
pub fn demographic_points(records: &[CustomerRecord]) -> Vec<(u8, Option<i64>)> {
    records
        .iter()
        .filter_map(|r| {
            let group = r.age_group.as_deref()?.trim();
            match AGE_GROUPS.iter().position(|g| *g == group) {
                Some(idx) => Some((idx as u8 + 1, r.total_purchases)),
                None => {
                    tracing::debug!(age_group = group, "skipping unknown age group");
                    None
                }
            }
        })
        .collect()
}

/// Minutes played per genre, in input order.
pub fn genre_shares(records: &[GenreRecord]) -> Vec<(String, Option<i64>)> {
    records
        .iter()
        .map(|r| (r.genre.clone().unwrap_or_default(), r.total_minutes_played))
        .collect()
}

/// Stock on hand per category, in input order.
pub fn inventory_levels(records: &[InventoryRecord]) -> Vec<(String, Option<i64>)> {
    records
        .iter()
        .map(|r| {
            (
                r.product_category.clone().unwrap_or_default(),
                r.current_stock,
            )
        })
        .collect()
}
