//! Output-contract enforcement.

use polars::prelude::*;
use trademart_primitives::OUTPUT_COLUMNS;

use crate::PipelineError;

/// Gate the enriched batch on the fixed output contract.
///
/// Every contract column must be present; a null-valued column is fine, an
/// absent one is fatal. On success the batch is reordered to exactly the
/// contract columns, dropping everything else.
///
/// # Errors
/// Returns [`PipelineError::SchemaViolation`] listing every absent column.
pub fn enforce_contract(df: &DataFrame) -> Result<DataFrame, PipelineError> {
    let present: Vec<&str> = df.get_column_names().iter().map(|name| name.as_str()).collect();

    let missing: Vec<String> = OUTPUT_COLUMNS
        .iter()
        .filter(|name| !present.contains(name))
        .map(ToString::to_string)
        .collect();

    if !missing.is_empty() {
        return Err(PipelineError::SchemaViolation { missing });
    }

    Ok(df.select(OUTPUT_COLUMNS)?)
}
