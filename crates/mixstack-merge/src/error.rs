//! Error types for the merge crate.
//!
//! Merging itself cannot fail; these errors only arise while loading or
//! validating a [`MergeConfig`](crate::MergeConfig).

use std::path::PathBuf;

/// Errors that can occur while building a merge engine from configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration was not valid TOML or had the wrong shape.
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The marker list was empty.
    #[error("no marker function names configured")]
    NoMarkers,

    /// A marker entry was the empty string.
    #[error("marker at index {0} is empty")]
    EmptyMarker(usize),
}

/// Convenience alias for configuration results.
pub type ConfigResult<T> = Result<T, ConfigError>;
