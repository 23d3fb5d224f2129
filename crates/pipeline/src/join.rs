//! Sequential cardinality-validated left joins against the dimension sources.
//!
//! Each stage takes the output of the previous one as its left side. The
//! right side's join key must be unique (many-to-one), so the fact table's
//! row count is preserved; a trade with no dimension match survives with
//! nulls for that dimension's attributes.

use polars::prelude::*;

use crate::PipelineError;

/// Assert the right side of a join is unique on its key columns.
fn ensure_many_to_one(
    right: &DataFrame,
    key: &[&str],
    stage: &'static str,
) -> Result<(), PipelineError> {
    let keys = right.select(key.iter().copied())?;
    let total = keys.height();
    let distinct = keys.lazy().unique(None, UniqueKeepStrategy::Any).collect()?.height();

    if distinct != total {
        return Err(PipelineError::CardinalityViolation {
            stage,
            key: key.join(", "),
            duplicates: total - distinct,
        });
    }
    Ok(())
}

/// Drop a join-artifact column that duplicates a canonical fact column.
fn drop_artifact(df: DataFrame, name: &str) -> PolarsResult<DataFrame> {
    if df.column(name).is_ok() { df.drop(name) } else { Ok(df) }
}

/// Stage 1: trades ⋈ long prices on (`trade_date` = `date`, `stock_ticker`).
///
/// The right-side `date` key is redundant after the join; `trade_date` stays
/// canonical.
pub fn join_prices(trades: &DataFrame, prices_long: &DataFrame) -> Result<DataFrame, PipelineError> {
    ensure_many_to_one(prices_long, &["date", "stock_ticker"], "prices")?;

    let joined = trades
        .clone()
        .lazy()
        .join(
            prices_long.clone().lazy(),
            [col("trade_date"), col("stock_ticker")],
            [col("date"), col("stock_ticker")],
            JoinArgs::new(JoinType::Left),
        )
        .collect()?;

    Ok(drop_artifact(joined, "date")?)
}

/// Stage 2: ⋈ customer dimension on `customer_id`.
///
/// Only `account_type` is taken, renamed `customer_account_type` to avoid
/// colliding with other account-type columns downstream.
pub fn join_customers(
    trades: &DataFrame,
    customers: &DataFrame,
) -> Result<DataFrame, PipelineError> {
    ensure_many_to_one(customers, &["customer_id"], "customers")?;

    let dim = customers
        .clone()
        .lazy()
        .select([col("customer_id"), col("account_type").alias("customer_account_type")]);

    Ok(trades
        .clone()
        .lazy()
        .join(dim, [col("customer_id")], [col("customer_id")], JoinArgs::new(JoinType::Left))
        .collect()?)
}

/// Stage 3: ⋈ date dimension on `trade_date` = `date`.
///
/// Selects only the calendar attributes; the right-side `date` key is
/// dropped in favor of `trade_date`.
pub fn join_dates(trades: &DataFrame, dates: &DataFrame) -> Result<DataFrame, PipelineError> {
    ensure_many_to_one(dates, &["date"], "dates")?;

    let dim = dates
        .clone()
        .lazy()
        .select([col("date"), col("day_name"), col("is_weekend"), col("is_holiday")]);

    let joined = trades
        .clone()
        .lazy()
        .join(dim, [col("trade_date")], [col("date")], JoinArgs::new(JoinType::Left))
        .collect()?;

    Ok(drop_artifact(joined, "date")?)
}

/// Stage 4: ⋈ stock dimension on `stock_ticker`.
///
/// Dimension attributes are renamed with a `stock_` prefix.
pub fn join_stocks(trades: &DataFrame, stocks: &DataFrame) -> Result<DataFrame, PipelineError> {
    ensure_many_to_one(stocks, &["stock_ticker"], "stocks")?;

    let dim = stocks.clone().lazy().select([
        col("stock_ticker"),
        col("liquidity_tier").alias("stock_liquidity_tier"),
        col("sector").alias("stock_sector"),
        col("industry").alias("stock_industry"),
    ]);

    Ok(trades
        .clone()
        .lazy()
        .join(dim, [col("stock_ticker")], [col("stock_ticker")], JoinArgs::new(JoinType::Left))
        .collect()?)
}
