//! Configuration types for dashfeed.
//!
//! [`Config::load`] layers the embedded defaults, an optional TOML file
//! (`--config`, else `~/.config/dashfeed/config.toml` if present) and
//! `DASHFEED__*` environment variables. [`Config::defaults`] returns the
//! embedded defaults without touching the filesystem (useful in tests).

use crate::types::{SourceDescriptor, SourceKind};
use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[sources]
data_dir  = "data"
sales     = "daily_sales_revenue.csv"
tracks    = "track_purchase_counts.csv"
customers = "customer_demographics.csv"
genres    = "genre_playback_time.csv"
inventory = "inventory_stock_levels.csv"

[report]
top_tracks = 10
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

/// `[sources]` section: where each CSV lives.
///
/// Entries are resolved against `data_dir` unless they are already absolute
/// paths or URLs. `data_dir` may itself be an `http://` base URL.
#[derive(Debug, Clone, Deserialize)]
pub struct SourcesConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_sales")]
    pub sales: String,
    #[serde(default = "default_tracks")]
    pub tracks: String,
    #[serde(default = "default_customers")]
    pub customers: String,
    #[serde(default = "default_genres")]
    pub genres: String,
    #[serde(default = "default_inventory")]
    pub inventory: String,
}

fn default_data_dir() -> String { "data".to_string() }
fn default_sales() -> String { SourceKind::Sales.default_file().to_string() }
fn default_tracks() -> String { SourceKind::Tracks.default_file().to_string() }
fn default_customers() -> String { SourceKind::Customers.default_file().to_string() }
fn default_genres() -> String { SourceKind::Genres.default_file().to_string() }
fn default_inventory() -> String { SourceKind::Inventory.default_file().to_string() }

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            sales: default_sales(),
            tracks: default_tracks(),
            customers: default_customers(),
            genres: default_genres(),
            inventory: default_inventory(),
        }
    }
}

impl SourcesConfig {
    fn file_for(&self, kind: SourceKind) -> &str {
        match kind {
            SourceKind::Sales => &self.sales,
            SourceKind::Tracks => &self.tracks,
            SourceKind::Customers => &self.customers,
            SourceKind::Genres => &self.genres,
            SourceKind::Inventory => &self.inventory,
        }
    }

    /// Fully resolved reference for one source.
    pub fn descriptor(&self, kind: SourceKind) -> SourceDescriptor {
        SourceDescriptor::new(kind, resolve(&self.data_dir, self.file_for(kind)))
    }

    /// Descriptors for all five sources, in dashboard order.
    pub fn descriptors(&self) -> Vec<SourceDescriptor> {
        SourceKind::ALL
            .into_iter()
            .map(|kind| self.descriptor(kind))
            .collect()
    }
}

/// `[report]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_top_tracks")]
    pub top_tracks: usize,
}

fn default_top_tracks() -> usize { 10 }

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_tracks: default_top_tracks(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load configuration layered on top of the built-in defaults.
    ///
    /// An explicit `path` must exist; the per-user file is optional.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let (file, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (config_path(), false),
        };

        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(file.as_path()).required(required))
            .add_source(config::Environment::with_prefix("DASHFEED").separator("__"))
            .build()
            .and_then(|c| c.try_deserialize())
            .with_context(|| format!("failed to load config from {}", file.display()))
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("dashfeed")
        .join("config.toml")
}

/// Whether `reference` names a URL rather than a filesystem path.
pub fn is_url(reference: &str) -> bool {
    reference.contains("://")
}

fn resolve(base: &str, file: &str) -> String {
    if is_url(file) || Path::new(file).is_absolute() || base.is_empty() {
        file.to_string()
    } else if is_url(base) {
        format!("{}/{}", base.trim_end_matches('/'), file)
    } else {
        Path::new(base).join(file).to_string_lossy().into_owned()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
