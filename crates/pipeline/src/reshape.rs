//! Wide-to-long reshape of the daily price matrix.

use polars::prelude::*;

use crate::PipelineError;

/// Convert the wide price matrix into long `(date, stock_ticker, stock_price)` form.
///
/// Every (date, instrument) cell becomes one row, including cells still
/// missing after the forward fill; those propagate as nulls rather than being
/// dropped. Ticker column headers are whitespace-trimmed so the long keys
/// join exactly against the fact table, and prices are cast to `Float64` so
/// the long column has one dtype across instruments.
pub fn to_long(prices: &DataFrame) -> Result<DataFrame, PipelineError> {
    if prices.column("date").is_err() {
        return Err(PipelineError::MissingColumn("date".to_string()));
    }

    let mut parts: Vec<LazyFrame> = Vec::new();
    for name in prices.get_column_names() {
        if name.as_str() == "date" {
            continue;
        }
        let ticker = name.trim().to_string();
        parts.push(prices.clone().lazy().select([
            col("date"),
            lit(ticker).alias("stock_ticker"),
            col(name.as_str()).cast(DataType::Float64).alias("stock_price"),
        ]));
    }

    // A matrix with no instrument columns reshapes to an empty long frame.
    if parts.is_empty() {
        return Ok(DataFrame::new(vec![
            Column::new_empty("date".into(), &DataType::Date),
            Column::new_empty("stock_ticker".into(), &DataType::String),
            Column::new_empty("stock_price".into(), &DataType::Float64),
        ])?);
    }

    Ok(concat(parts, UnionArgs::default())?.collect()?)
}
