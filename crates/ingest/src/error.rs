//! Error types for source loading.

use std::path::PathBuf;

use trademart_primitives::Source;

/// Errors that can occur while reading input sources.
#[derive(Debug, thiserror::Error)]
pub enum SourceReadError {
    /// A required source file is absent.
    #[error("source `{source}` not found at {}", path.display())]
    Missing {
        /// The logical source that was requested.
        source: Source,
        /// Path that was probed.
        path: PathBuf,
    },

    /// A source file exists but could not be parsed.
    #[error("source `{source}` could not be parsed: {error}")]
    Parse {
        /// The logical source that was requested.
        source: Source,
        /// Underlying reader error.
        #[source]
        error: polars::error::PolarsError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_error_names_source_and_path() {
        let err = SourceReadError::Missing {
            source: Source::Trades,
            path: PathBuf::from("/data/trades.csv"),
        };
        let msg = err.to_string();
        assert!(msg.contains("trades"));
        assert!(msg.contains("/data/trades.csv"));
    }
}
