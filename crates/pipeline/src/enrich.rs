//! End-to-end enrichment: the ordered chain of pipeline stages.

use polars::prelude::*;

use crate::{derive, join, normalize, reshape, validate};
use crate::PipelineError;

/// Run the full enrichment pipeline over the five source batches.
///
/// Stages run strictly left to right: normalize → reshape → four joins →
/// derived fields → contract gate. Each stage materializes a new batch; no
/// input is mutated. Any failure aborts the run with no partial output.
///
/// # Errors
/// Propagates the first [`PipelineError`] any stage raises.
pub fn enrich(
    prices: &DataFrame,
    customers: &DataFrame,
    dates: &DataFrame,
    stocks: &DataFrame,
    trades: &DataFrame,
) -> Result<DataFrame, PipelineError> {
    let prices = normalize::coerce_dates(prices, &["date"])?;
    let prices = normalize::forward_fill_prices(&prices)?;
    let price_long = reshape::to_long(&prices)?;

    let trades = normalize::prepare_trades(trades)?;
    let trades = derive::with_portfolio_log(&trades)?;

    let dates = normalize::coerce_dates(dates, &["date"])?;

    let enriched = join::join_prices(&trades, &price_long)?;
    let enriched = join::join_customers(&enriched, customers)?;
    let enriched = join::join_dates(&enriched, &dates)?;
    let enriched = join::join_stocks(&enriched, stocks)?;

    let enriched = derive::with_total_amount(&enriched)?;
    validate::enforce_contract(&enriched)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use trademart_primitives::{Date, OUTPUT_COLUMNS};

    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd_opt(y, m, day).unwrap()
    }

    fn prices() -> DataFrame {
        DataFrame::new(vec![
            Column::new("date".into(), vec![d(2024, 1, 2), d(2024, 1, 3)]),
            Column::new("AAPL".into(), vec![Some(150.0), None]),
            Column::new("MSFT".into(), vec![Some(370.0), Some(372.0)]),
        ])
        .unwrap()
    }

    fn customers() -> DataFrame {
        df! {
            "customer_id" => &["C1", "C2"],
            "account_type" => &["retail", "institutional"],
        }
        .unwrap()
    }

    fn dates() -> DataFrame {
        DataFrame::new(vec![
            Column::new("date".into(), vec![d(2024, 1, 2), d(2024, 1, 3)]),
            Column::new("day_name".into(), vec!["Tuesday", "Wednesday"]),
            Column::new("is_weekend".into(), vec![false, false]),
            Column::new("is_holiday".into(), vec![false, false]),
        ])
        .unwrap()
    }

    fn stocks() -> DataFrame {
        df! {
            "stock_ticker" => &["AAPL", "MSFT"],
            "liquidity_tier" => &["High", "High"],
            "sector" => &["Tech", "Tech"],
            "industry" => &["Hardware", "Software"],
        }
        .unwrap()
    }

    fn trades() -> DataFrame {
        DataFrame::new(vec![
            Column::new("transaction_id".into(), vec![1i64, 2]),
            Column::new("timestamp".into(), vec![d(2024, 1, 2), d(2024, 1, 3)]),
            Column::new("customer_id".into(), vec!["C1", "C2"]),
            Column::new("stock_ticker".into(), vec!["AAPL", "AAPL"]),
            Column::new("transaction_type".into(), vec!["buy", "sell"]),
            Column::new("quantity".into(), vec![10i64, 4]),
            Column::new("average_trade_size".into(), vec![5.0, 2.0]),
            Column::new("cumulative_portfolio_value".into(), vec![1000.0, 2500.0]),
        ])
        .unwrap()
    }

    #[test]
    fn enriched_batch_matches_reference_scenario() {
        let out = enrich(&prices(), &customers(), &dates(), &stocks(), &trades()).unwrap();

        assert_eq!(out.height(), 2);
        let names: Vec<&str> = out.get_column_names().iter().map(|s| s.as_str()).collect();
        assert_eq!(names, OUTPUT_COLUMNS.to_vec());

        let price = out.column("stock_price").unwrap().f64().unwrap().get(0).unwrap();
        assert_relative_eq!(price, 150.0);

        let total = out.column("total_trade_amount").unwrap().f64().unwrap().get(0).unwrap();
        assert_relative_eq!(total, 1500.0);

        assert_eq!(
            out.column("customer_account_type").unwrap().str().unwrap().get(0),
            Some("retail")
        );
        assert_eq!(out.column("stock_sector").unwrap().str().unwrap().get(0), Some("Tech"));
        assert_eq!(out.column("is_weekend").unwrap().bool().unwrap().get(0), Some(false));
        assert_eq!(out.column("day_name").unwrap().str().unwrap().get(1), Some("Wednesday"));
    }

    #[test]
    fn forward_filled_price_reaches_the_joined_row() {
        // AAPL has no quote on 2024-01-03; the second trade must see the
        // filled 150.0 from the prior day.
        let out = enrich(&prices(), &customers(), &dates(), &stocks(), &trades()).unwrap();
        let price = out.column("stock_price").unwrap().f64().unwrap().get(1).unwrap();
        assert_relative_eq!(price, 150.0);
    }

    #[test]
    fn row_count_is_preserved_across_all_joins() {
        let out = enrich(&prices(), &customers(), &dates(), &stocks(), &trades()).unwrap();
        assert_eq!(out.height(), trades().height());
    }

    #[test]
    fn unknown_ticker_survives_with_missing_stock_attributes() {
        let mut trades = trades();
        trades
            .with_column(Series::new("stock_ticker".into(), vec!["AAPL", "ZZZ"]))
            .unwrap();

        let out = enrich(&prices(), &customers(), &dates(), &stocks(), &trades).unwrap();
        assert_eq!(out.height(), 2);
        assert_eq!(out.column("stock_liquidity_tier").unwrap().null_count(), 1);
        assert_eq!(out.column("stock_sector").unwrap().null_count(), 1);
        assert_eq!(out.column("stock_industry").unwrap().null_count(), 1);
        // The unmatched price lookup is also missing, as is the product.
        assert_eq!(out.column("stock_price").unwrap().null_count(), 1);
        assert_eq!(out.column("total_trade_amount").unwrap().null_count(), 1);
    }

    #[test]
    fn duplicate_dimension_key_aborts_the_run() {
        let customers = df! {
            "customer_id" => &["C1", "C1", "C2"],
            "account_type" => &["retail", "retail", "institutional"],
        }
        .unwrap();

        assert!(matches!(
            enrich(&prices(), &customers, &dates(), &stocks(), &trades()),
            Err(PipelineError::CardinalityViolation { stage: "customers", .. })
        ));
    }

    #[test]
    fn string_dates_in_sources_still_join() {
        // The calendar dimension arrives with string dates; coercion must
        // align the join keys anyway.
        let dates = df! {
            "date" => &["2024-01-02", "2024-01-03"],
            "day_name" => &["Tuesday", "Wednesday"],
            "is_weekend" => &[false, false],
            "is_holiday" => &[false, false],
        }
        .unwrap();

        let out = enrich(&prices(), &customers(), &dates, &stocks(), &trades()).unwrap();
        assert_eq!(out.column("day_name").unwrap().null_count(), 0);
    }
}
