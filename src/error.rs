use std::{io, path::PathBuf};

use thiserror::Error;

/// A problem with the group configuration.
///
/// All of these are fatal: group resolution stops at the first one and no
/// test runs, so no report is produced either.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigurationError {
    #[error("file or directory {} set in {group} group does not exist", path.display())]
    MissingPath { path: PathBuf, group: String },

    #[error("group {group} must be {expected}")]
    InvalidShape {
        group: String,
        expected: &'static str,
    },

    #[error("`{key}` must be a sequence")]
    NotASequence { key: String },

    #[error("group {group} uses more than one wildcard in `{pattern}`")]
    AmbiguousWildcard { group: String, pattern: String },

    #[error("group {group} needs a wildcard in the file name of `{pattern}`")]
    MissingWildcard { group: String, pattern: String },

    #[error("group {group} has an invalid file pattern `{pattern}`")]
    InvalidPattern {
        group: String,
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("could not read list file {} of group {group}", path.display())]
    ListFile {
        path: PathBuf,
        group: String,
        #[source]
        source: io::Error,
    },

    #[error("could not enumerate {} for group {group}", path.display())]
    Enumerate {
        path: PathBuf,
        group: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("could not read configuration {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A problem while collecting or emitting a report.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReportError {
    #[error("suite ended while no suite was open")]
    UnbalancedSuite,

    #[error("test ended outside of any suite")]
    NoOpenSuite,

    #[error("test ended without being started")]
    NoTestInProgress,

    #[error("report finalized with {depth} suite(s) still open")]
    UnclosedSuites { depth: usize },

    #[error("report collector hung up")]
    Disconnected,

    #[error("could not write report to {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Xml(#[from] io::Error),
}
