//! Error types for the enrichment pipeline.

/// Errors that can occur while enriching the trade fact table.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// A join's right side is not unique on its key (many-to-one violated).
    #[error(
        "join `{stage}`: right side has {duplicates} duplicate key(s) on ({key}); \
         many-to-one cardinality violated"
    )]
    CardinalityViolation {
        /// Which of the four join stages failed.
        stage: &'static str,
        /// Join key columns, comma separated.
        key: String,
        /// Number of surplus right-side rows.
        duplicates: usize,
    },

    /// One or more contract columns are absent after enrichment.
    #[error("missing expected columns after enrichment: {}", missing.join(", "))]
    SchemaViolation {
        /// Every absent contract column, in contract order.
        missing: Vec<String>,
    },

    /// A required input column is absent.
    #[error("missing column: {0}")]
    MissingColumn(String),

    /// Polars error.
    #[error("polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}
