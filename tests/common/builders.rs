//! Test builders — temporary data directories laid out like the dashboard's.
//!
//! These builders are designed for readability in tests, not for production
//! use. They panic on I/O errors rather than returning `Result`.

use super::fixtures::csv_for;
use dashfeed::{SourceDescriptor, SourceKind};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory holding source CSVs under their default file names.
///
/// ```rust
/// let data = DataDir::complete();
/// data.write(SourceKind::Sales, ALL_NULL_SALES_CSV);
/// let sources = data.descriptors();
/// ```
pub struct DataDir {
    dir: TempDir,
}

impl DataDir {
    /// A directory with no files in it.
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp data dir"),
        }
    }

    /// A directory with the well-formed fixture for every source.
    pub fn complete() -> Self {
        let data = Self::empty();
        for kind in SourceKind::ALL {
            data.write(kind, csv_for(kind));
        }
        data
    }

    pub fn write(&self, kind: SourceKind, body: &str) -> &Self {
        self.write_bytes(kind, body.as_bytes())
    }

    pub fn write_bytes(&self, kind: SourceKind, body: &[u8]) -> &Self {
        std::fs::write(self.file(kind), body).expect("write fixture");
        self
    }

    pub fn remove(&self, kind: SourceKind) -> &Self {
        std::fs::remove_file(self.file(kind)).expect("remove fixture");
        self
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, kind: SourceKind) -> PathBuf {
        self.dir.path().join(kind.default_file())
    }

    pub fn descriptor(&self, kind: SourceKind) -> SourceDescriptor {
        SourceDescriptor::new(kind, self.file(kind).to_string_lossy())
    }

    /// Descriptors for all five sources, in dashboard order.
    pub fn descriptors(&self) -> Vec<SourceDescriptor> {
        SourceKind::ALL
            .into_iter()
            .map(|kind| self.descriptor(kind))
            .collect()
    }
}

/// Descriptor with an in-memory reference, for use with [`super::FakeFetcher`].
pub fn source(kind: SourceKind, reference: &str) -> SourceDescriptor {
    SourceDescriptor::new(kind, reference)
}
