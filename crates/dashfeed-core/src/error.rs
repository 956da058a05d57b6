//! Error taxonomy for a load cycle.
//!
//! Every variant that concerns a single source carries the source name and
//! its reference so the caller can show one line naming what failed.

use crate::types::SourceDescriptor;
use thiserror::Error;

/// Why a load cycle failed. None of these are recovered locally.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Retrieval failed, or the parser produced no rows at all.
    #[error("source `{name}` is unavailable ({reference}): {reason}")]
    SourceUnavailable {
        name: String,
        reference: String,
        reason: String,
    },

    /// Rows were parsed but every one of them was entirely null.
    #[error("source `{name}` ({reference}) loaded but contained only empty rows")]
    EmptySource { name: String, reference: String },

    /// The CSV reader reported a structural problem (bad encoding, broken quoting).
    #[error("failed to parse source `{name}` ({reference}): {reason}")]
    Parse {
        name: String,
        reference: String,
        reason: String,
    },

    /// A fan-out was requested over an empty source list.
    #[error("no sources to load")]
    NoSources,

    /// The task loading a source died before producing a result.
    #[error("load task for source `{name}` failed: {reason}")]
    Join { name: String, reason: String },
}

impl LoadError {
    pub fn unavailable(source: &SourceDescriptor, reason: impl std::fmt::Display) -> Self {
        LoadError::SourceUnavailable {
            name: source.name().to_string(),
            reference: source.reference.clone(),
            reason: reason.to_string(),
        }
    }

    pub fn empty(source: &SourceDescriptor) -> Self {
        LoadError::EmptySource {
            name: source.name().to_string(),
            reference: source.reference.clone(),
        }
    }

    pub fn parse(source: &SourceDescriptor, reason: impl std::fmt::Display) -> Self {
        LoadError::Parse {
            name: source.name().to_string(),
            reference: source.reference.clone(),
            reason: reason.to_string(),
        }
    }

    /// Name of the failing source, if the error concerns one.
    pub fn source_name(&self) -> Option<&str> {
        match self {
            LoadError::SourceUnavailable { name, .. }
            | LoadError::EmptySource { name, .. }
            | LoadError::Parse { name, .. }
            | LoadError::Join { name, .. } => Some(name),
            LoadError::NoSources => None,
        }
    }
}

/// A source name that matches none of the known kinds.
#[derive(Debug, Error)]
#[error("unknown source `{0}` (expected one of: sales, tracks, customers, genres, inventory)")]
pub struct UnknownSourceKind(pub String);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SourceKind;

    #[test]
    fn messages_name_the_failing_source() {
        let src = SourceDescriptor::new(SourceKind::Genres, "data/genre_playback_time.csv");
        let err = LoadError::empty(&src);
        assert_eq!(err.source_name(), Some("genres"));
        assert_eq!(
            err.to_string(),
            "source `genres` (data/genre_playback_time.csv) loaded but contained only empty rows"
        );

        let err = LoadError::unavailable(&src, "No such file or directory");
        assert!(err.to_string().contains("`genres` is unavailable"));
        assert!(LoadError::NoSources.source_name().is_none());
    }
}
