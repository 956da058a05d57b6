//! Plain-text rendering of a loaded dashboard and of load failures.

use crate::dashboard::Dashboard;
use dashfeed_core::config::ReportConfig;
use dashfeed_core::series::AGE_GROUPS;
use std::fmt;

/// Prefix of the single line shown when a load cycle fails.
pub const BANNER_PREFIX: &str = "CRITICAL ERROR: Failed to load data";

/// One-line failure message naming the failing source and the reason.
pub fn error_banner(err: impl fmt::Display) -> String {
    format!("{BANNER_PREFIX}: {err}")
}

/// Per-source record counts followed by each chart's series.
pub struct Summary<'a> {
    dashboard: &'a Dashboard,
    top_tracks: usize,
}

impl<'a> Summary<'a> {
    pub fn new(dashboard: &'a Dashboard, config: &ReportConfig) -> Self {
        Self {
            dashboard,
            top_tracks: config.top_tracks,
        }
    }
}

struct Count(Option<i64>);

impl fmt::Display for Count {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(n) => fmt::Display::fmt(&n, f),
            None => f.pad("-"),
        }
    }
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let series = self.dashboard.series(self.top_tracks);

        writeln!(f, "Sources")?;
        for (kind, count) in self.dashboard.record_counts() {
            writeln!(f, "  {:<10} {count:>6} records", kind.name())?;
        }

        writeln!(f, "\nDaily revenue (USD)")?;
        for (date, revenue) in &series.revenue {
            writeln!(f, "  {date:<12} {revenue:>12.2}")?;
        }

        writeln!(f, "\nTop {} tracks by purchases", self.top_tracks)?;
        for (label, count) in &series.top_tracks {
            writeln!(f, "  {label:<20} {:>8}", Count(*count))?;
        }

        writeln!(f, "\nPurchases by age group")?;
        for (x, total) in &series.demographics {
            let group = AGE_GROUPS[usize::from(*x) - 1];
            writeln!(f, "  {group:<8} {:>8}", Count(*total))?;
        }

        writeln!(f, "\nMinutes played by genre")?;
        for (genre, minutes) in &series.genres {
            writeln!(f, "  {genre:<20} {:>10}", Count(*minutes))?;
        }

        writeln!(f, "\nStock by category")?;
        for (category, stock) in &series.inventory {
            writeln!(f, "  {category:<20} {:>8}", Count(*stock))?;
        }
        Ok(())
    }
}
