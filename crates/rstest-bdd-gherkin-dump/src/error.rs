//! Error types for the dump tool.

use std::path::PathBuf;

use rstest_bdd_gherkin::{KeywordError, ParseError};
use thiserror::Error;

/// Failures while configuring the tool or processing a feature file.
#[derive(Debug, Error)]
pub enum DumpError {
    /// An invalid configuration value was provided.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A keyword table file could not be loaded.
    #[error("cannot load keyword table {}: {source}", path.display())]
    Keywords {
        /// The table file.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: KeywordError,
    },

    /// A file or directory could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        /// The offending path.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: std::io::Error,
    },

    /// A feature file does not parse.
    #[error("{}: {source}", path.display())]
    Parse {
        /// The feature file.
        path: PathBuf,
        /// Underlying grammar error.
        #[source]
        source: ParseError,
    },
}

impl DumpError {
    /// Whether the error stems from configuration rather than input files.
    #[must_use]
    pub fn is_config(&self) -> bool {
        matches!(self, Self::InvalidConfig(_) | Self::Keywords { .. })
    }
}
