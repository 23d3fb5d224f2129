//! Wholesale replacement of the destination table.

use polars::prelude::*;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, QueryBuilder};
use trademart_primitives::{Date, OUTPUT_COLUMNS};

use crate::error::sqlstate;
use crate::{DbConfig, StoreError, TableName};

/// SQLSTATE `duplicate_table`.
const DUPLICATE_TABLE: &str = "42P07";

/// Rows per INSERT statement. 16 binds per row keeps each statement well
/// under the 65535-parameter protocol limit.
const INSERT_BATCH: usize = 1000;

/// Outcome of [`replace_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The table was dropped, recreated and fully loaded.
    Replaced {
        /// Number of rows written.
        rows: usize,
    },
    /// A concurrent writer recreated the table between the drop and the
    /// create; nothing was loaded.
    Conflict,
}

/// One destination row, typed per the output contract.
#[derive(Debug, Clone)]
struct EnrichedRow {
    transaction_id: Option<i64>,
    trade_date: Option<Date>,
    customer_id: Option<String>,
    stock_ticker: Option<String>,
    transaction_type: Option<String>,
    quantity: Option<f64>,
    average_trade_size: Option<f64>,
    stock_price: Option<f64>,
    total_trade_amount: Option<f64>,
    customer_account_type: Option<String>,
    day_name: Option<String>,
    is_weekend: Option<bool>,
    is_holiday: Option<bool>,
    stock_liquidity_tier: Option<String>,
    stock_sector: Option<String>,
    stock_industry: Option<String>,
}

/// Replace the destination table's full contents with the enriched batch.
///
/// Drop-and-recreate semantics, not incremental: the previous contents are
/// gone once this returns. Replacement is not atomic with respect to
/// concurrent readers. The connection pool is closed on every exit path.
///
/// # Errors
/// [`StoreError::Connection`] if the target database cannot be reached;
/// [`StoreError::Extract`] if the batch does not match the contract's types;
/// [`StoreError::Sql`] for unexpected statement failures. A concurrent
/// recreate of the table is not an error; it surfaces as
/// [`LoadOutcome::Conflict`].
pub async fn replace_table(
    config: &DbConfig,
    table: &TableName,
    batch: &DataFrame,
) -> Result<LoadOutcome, StoreError> {
    let rows = extract_rows(batch)?;

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&config.url())
        .await
        .map_err(StoreError::Connection)?;

    let result = replace_inner(&pool, table, &rows).await;
    pool.close().await;
    result
}

async fn replace_inner(
    pool: &PgPool,
    table: &TableName,
    rows: &[EnrichedRow],
) -> Result<LoadOutcome, StoreError> {
    sqlx::query(&format!("DROP TABLE IF EXISTS {}", table.quoted())).execute(pool).await?;

    if let Err(err) = sqlx::query(&create_table_sql(table)).execute(pool).await {
        if sqlstate(&err).as_deref() == Some(DUPLICATE_TABLE) {
            return Ok(LoadOutcome::Conflict);
        }
        return Err(StoreError::Sql(err));
    }

    for chunk in rows.chunks(INSERT_BATCH) {
        let mut builder: QueryBuilder<'_, Postgres> = QueryBuilder::new(format!(
            "INSERT INTO {} ({}) ",
            table.quoted(),
            OUTPUT_COLUMNS.join(", ")
        ));
        builder.push_values(chunk, |mut b, row| {
            b.push_bind(row.transaction_id)
                .push_bind(row.trade_date)
                .push_bind(row.customer_id.as_deref())
                .push_bind(row.stock_ticker.as_deref())
                .push_bind(row.transaction_type.as_deref())
                .push_bind(row.quantity)
                .push_bind(row.average_trade_size)
                .push_bind(row.stock_price)
                .push_bind(row.total_trade_amount)
                .push_bind(row.customer_account_type.as_deref())
                .push_bind(row.day_name.as_deref())
                .push_bind(row.is_weekend)
                .push_bind(row.is_holiday)
                .push_bind(row.stock_liquidity_tier.as_deref())
                .push_bind(row.stock_sector.as_deref())
                .push_bind(row.stock_industry.as_deref());
        });
        builder.build().execute(pool).await?;
    }

    Ok(LoadOutcome::Replaced { rows: rows.len() })
}

/// DDL for the destination table: the 16 contract columns, all nullable.
fn create_table_sql(table: &TableName) -> String {
    format!(
        "CREATE TABLE {} (\
         transaction_id BIGINT, \
         trade_date DATE, \
         customer_id TEXT, \
         stock_ticker TEXT, \
         transaction_type TEXT, \
         quantity DOUBLE PRECISION, \
         average_trade_size DOUBLE PRECISION, \
         stock_price DOUBLE PRECISION, \
         total_trade_amount DOUBLE PRECISION, \
         customer_account_type TEXT, \
         day_name TEXT, \
         is_weekend BOOLEAN, \
         is_holiday BOOLEAN, \
         stock_liquidity_tier TEXT, \
         stock_sector TEXT, \
         stock_industry TEXT)",
        table.quoted()
    )
}

fn str_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, StoreError> {
    Ok(df
        .column(name)?
        .cast(&DataType::String)?
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect())
}

fn f64_column(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, StoreError> {
    Ok(df.column(name)?.cast(&DataType::Float64)?.f64()?.into_iter().collect())
}

fn bool_column(df: &DataFrame, name: &str) -> Result<Vec<Option<bool>>, StoreError> {
    Ok(df.column(name)?.cast(&DataType::Boolean)?.bool()?.into_iter().collect())
}

/// Convert the enriched batch into typed destination rows.
fn extract_rows(df: &DataFrame) -> Result<Vec<EnrichedRow>, StoreError> {
    let transaction_id: Vec<Option<i64>> =
        df.column("transaction_id")?.cast(&DataType::Int64)?.i64()?.into_iter().collect();
    let trade_date: Vec<Option<Date>> =
        df.column("trade_date")?.cast(&DataType::Date)?.date()?.as_date_iter().collect();
    let customer_id = str_column(df, "customer_id")?;
    let stock_ticker = str_column(df, "stock_ticker")?;
    let transaction_type = str_column(df, "transaction_type")?;
    let quantity = f64_column(df, "quantity")?;
    let average_trade_size = f64_column(df, "average_trade_size")?;
    let stock_price = f64_column(df, "stock_price")?;
    let total_trade_amount = f64_column(df, "total_trade_amount")?;
    let customer_account_type = str_column(df, "customer_account_type")?;
    let day_name = str_column(df, "day_name")?;
    let is_weekend = bool_column(df, "is_weekend")?;
    let is_holiday = bool_column(df, "is_holiday")?;
    let stock_liquidity_tier = str_column(df, "stock_liquidity_tier")?;
    let stock_sector = str_column(df, "stock_sector")?;
    let stock_industry = str_column(df, "stock_industry")?;

    Ok((0..df.height())
        .map(|i| EnrichedRow {
            transaction_id: transaction_id[i],
            trade_date: trade_date[i],
            customer_id: customer_id[i].clone(),
            stock_ticker: stock_ticker[i].clone(),
            transaction_type: transaction_type[i].clone(),
            quantity: quantity[i],
            average_trade_size: average_trade_size[i],
            stock_price: stock_price[i],
            total_trade_amount: total_trade_amount[i],
            customer_account_type: customer_account_type[i].clone(),
            day_name: day_name[i].clone(),
            is_weekend: is_weekend[i],
            is_holiday: is_holiday[i],
            stock_liquidity_tier: stock_liquidity_tier[i].clone(),
            stock_sector: stock_sector[i].clone(),
            stock_industry: stock_industry[i].clone(),
        })
        .collect())
}
