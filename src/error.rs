//! Error types produced by the termbank crate.
//!
//! | Error | Category | Raised by |
//! |-------|----------|-----------|
//! | [`NoScoreTypes`](TermbankError::NoScoreTypes) | Configuration | store construction, aggregation |
//! | [`DuplicateScoreType`](TermbankError::DuplicateScoreType) | Configuration | store construction |
//! | [`NoDocuments`](TermbankError::NoDocuments) | Configuration | aggregation |
//! | [`InvalidConfig`](TermbankError::InvalidConfig) | Configuration | [`TermbankConfig::validate`](crate::TermbankConfig::validate) |
//! | [`Config`](TermbankError::Config) | Configuration | loading a JSON configuration file |
//! | [`Read`](TermbankError::Read) | I/O | opening a configuration or document file |
//! | [`Input`](TermbankError::Input) | Input | reading JSON-lines documents |
//! | [`Export`](TermbankError::Export) | I/O | CSV exporters |
//! | [`Io`](TermbankError::Io) | I/O | everything else touching the filesystem |
//!
//! Missing scores and missing documents are not errors: lookups return `0.0`
//! and an empty set respectively.
//!
//! Nothing here is retried. Aggregation input is deterministic, and retrying
//! a failed export is left to the caller. A partially written CSV file is left
//! on disk and must be treated as invalid when [`Export`](TermbankError::Export)
//! is returned.
use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TermbankError {
    /// A store or scorer declared no score dimension, so there is no default to rank by.
    #[error("no score types registered")]
    NoScoreTypes,

    #[error("score type registered twice: {0}")]
    DuplicateScoreType(String),

    /// Aggregation was asked to run over an empty document collection.
    #[error("no input documents given")]
    NoDocuments,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to read configuration from {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed document at {path}:{line}: {source}")]
    Input {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// Any failure while writing an export file, wrapped once.
    #[error("failed to export csv to {path}: {source}")]
    Export {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

impl TermbankError {
    /// Returns true for errors raised before any aggregation or export work starts.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            TermbankError::NoScoreTypes
                | TermbankError::DuplicateScoreType(_)
                | TermbankError::NoDocuments
                | TermbankError::InvalidConfig(_)
                | TermbankError::Config { .. }
        )
    }
}

pub type Result<T, E = TermbankError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_errors_are_classified() {
        assert!(TermbankError::NoScoreTypes.is_configuration_error());
        assert!(TermbankError::NoDocuments.is_configuration_error());
        assert!(TermbankError::InvalidConfig("x".into()).is_configuration_error());

        let io = TermbankError::from(io::Error::new(io::ErrorKind::Other, "disk full"));
        assert!(!io.is_configuration_error());
        assert_eq!(io.to_string(), "io error: disk full");
    }

    #[test]
    fn export_error_names_destination() {
        let err = TermbankError::Export {
            path: PathBuf::from("/tmp/out.csv"),
            source: csv::Error::from(io::Error::new(io::ErrorKind::PermissionDenied, "denied")),
        };
        assert!(err.to_string().starts_with("failed to export csv to /tmp/out.csv"));
    }
}
