//! Derived-field computation.

use polars::prelude::*;

use crate::PipelineError;

/// Append `cumulative_portfolio_value_log = ln(1 + cumulative_portfolio_value)`
/// to the fact table.
///
/// The transform is defined for non-negative inputs only; negative or
/// non-coercible values become null instead of raising.
pub fn with_portfolio_log(trades: &DataFrame) -> Result<DataFrame, PipelineError> {
    if trades.column("cumulative_portfolio_value").is_err() {
        return Err(PipelineError::MissingColumn("cumulative_portfolio_value".to_string()));
    }

    let value = col("cumulative_portfolio_value").cast(DataType::Float64);

    Ok(trades
        .clone()
        .lazy()
        .with_column(
            when(value.clone().lt(lit(0.0)))
                .then(lit(NULL))
                .otherwise(value.log1p())
                .alias("cumulative_portfolio_value_log"),
        )
        .collect()?)
}

/// Coerce price and quantity to numeric and compute the trade notional.
///
/// `total_trade_amount = stock_price * quantity`. Values that cannot be
/// coerced become null, and a null operand yields a null product (standard
/// propagation, never zero).
pub fn with_total_amount(trades: &DataFrame) -> Result<DataFrame, PipelineError> {
    for name in ["stock_price", "quantity"] {
        if trades.column(name).is_err() {
            return Err(PipelineError::MissingColumn(name.to_string()));
        }
    }

    Ok(trades
        .clone()
        .lazy()
        .with_columns([
            col("stock_price").cast(DataType::Float64).alias("stock_price"),
            col("quantity").cast(DataType::Float64).alias("quantity"),
        ])
        .with_column((col("stock_price") * col("quantity")).alias("total_trade_amount"))
        .collect()?)
}
