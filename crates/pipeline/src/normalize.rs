//! Price-matrix normalization: forward filling and date coercion.

use polars::prelude::*;

use crate::PipelineError;

/// Forward-fill missing prices down the time axis.
///
/// Sorts the matrix by `date` so every gap is filled from the nearest prior
/// observation in the same column. Fill-forward only: a gap with no prior
/// observation stays missing.
///
/// # Errors
/// Returns [`PipelineError::MissingColumn`] if the matrix has no `date`
/// column.
pub fn forward_fill_prices(prices: &DataFrame) -> Result<DataFrame, PipelineError> {
    if prices.column("date").is_err() {
        return Err(PipelineError::MissingColumn("date".to_string()));
    }

    let fill_cols: Vec<String> = prices
        .get_column_names()
        .iter()
        .filter(|name| name.as_str() != "date")
        .map(|name| name.to_string())
        .collect();

    let sort_options = SortMultipleOptions::new().with_maintain_order(true);
    let mut lf = prices.clone().lazy().sort(["date"], sort_options);

    for name in &fill_cols {
        lf = lf.with_column(col(name.as_str()).forward_fill(None).alias(name.as_str()));
    }

    Ok(lf.collect()?)
}

/// Coerce date-bearing columns to calendar-date granularity.
///
/// `Date` columns pass through, `Datetime` columns are truncated to the day,
/// and string columns are parsed. Join keys downstream compare exactly once
/// every date column has been through here.
///
/// # Errors
/// Returns [`PipelineError::MissingColumn`] if a named column is absent.
pub fn coerce_dates(df: &DataFrame, columns: &[&str]) -> Result<DataFrame, PipelineError> {
    let mut lf = df.clone().lazy();

    for &name in columns {
        let dtype = df
            .column(name)
            .map_err(|_| PipelineError::MissingColumn(name.to_string()))?
            .dtype()
            .clone();

        let expr = match dtype {
            DataType::Date => col(name),
            DataType::String => col(name).str().to_date(StrptimeOptions::default()),
            _ => col(name).cast(DataType::Date),
        };
        lf = lf.with_column(expr.alias(name));
    }

    Ok(lf.collect()?)
}

/// Prepare the trade fact table for joining.
///
/// Renames the source `timestamp` column to the canonical `trade_date` and
/// coerces it to a calendar date. A batch that already carries `trade_date`
/// is only coerced.
pub fn prepare_trades(trades: &DataFrame) -> Result<DataFrame, PipelineError> {
    if trades.column("timestamp").is_err() {
        if trades.column("trade_date").is_ok() {
            return coerce_dates(trades, &["trade_date"]);
        }
        return Err(PipelineError::MissingColumn("timestamp".to_string()));
    }

    let renamed = trades.clone().lazy().rename(["timestamp"], ["trade_date"], true).collect()?;
    coerce_dates(&renamed, &["trade_date"])
}
