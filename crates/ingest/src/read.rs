//! CSV source reading.

use std::path::Path;

use polars::prelude::*;
use trademart_primitives::Source;

use crate::SourceReadError;

/// The five input batches consumed by one pipeline run.
#[derive(Debug, Clone)]
pub struct SourceSet {
    /// Wide daily price matrix.
    pub prices: DataFrame,
    /// Customer dimension.
    pub customers: DataFrame,
    /// Calendar dimension.
    pub dates: DataFrame,
    /// Stock dimension.
    pub stocks: DataFrame,
    /// Trade fact table.
    pub trades: DataFrame,
}

/// Read a single source file into a DataFrame.
///
/// Types are inferred from the data; date-looking columns are parsed into
/// temporal dtypes so the pipeline's date coercion has less to do.
///
/// # Errors
/// Returns [`SourceReadError::Missing`] if the file is absent and
/// [`SourceReadError::Parse`] if the reader rejects it.
pub fn read_table(source: Source, dir: &Path) -> Result<DataFrame, SourceReadError> {
    let path = dir.join(source.file_name());
    if !path.is_file() {
        return Err(SourceReadError::Missing { source, path });
    }

    CsvReadOptions::default()
        .with_has_header(true)
        .with_parse_options(CsvParseOptions::default().with_try_parse_dates(true))
        .try_into_reader_with_file_path(Some(path))
        .and_then(CsvReader::finish)
        .map_err(|error| SourceReadError::Parse { source, error })
}

/// Load all five sources from `dir`.
///
/// Fails on the first absent or unparsable source; no partial set is
/// returned.
pub fn load_sources(dir: &Path) -> Result<SourceSet, SourceReadError> {
    Ok(SourceSet {
        prices: read_table(Source::DailyTradePrices, dir)?,
        customers: read_table(Source::DimCustomer, dir)?,
        dates: read_table(Source::DimDate, dir)?,
        stocks: read_table(Source::DimStock, dir)?,
        trades: read_table(Source::Trades, dir)?,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use super::*;

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("trademart-ingest-{tag}-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn read_table_parses_headers_and_types() {
        let dir = scratch_dir("parse");
        fs::write(
            dir.join("dim_customer.csv"),
            "customer_id,account_type\nC1,retail\nC2,institutional\n",
        )
        .unwrap();

        let df = read_table(Source::DimCustomer, &dir).unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.get_column_names()[0].as_str(), "customer_id");

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn read_table_parses_dates() {
        let dir = scratch_dir("dates");
        fs::write(dir.join("dim_date.csv"), "date,day_name\n2024-01-02,Tuesday\n").unwrap();

        let df = read_table(Source::DimDate, &dir).unwrap();
        assert_eq!(df.column("date").unwrap().dtype(), &DataType::Date);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_source_is_reported() {
        let dir = scratch_dir("missing");
        let err = read_table(Source::Trades, &dir).unwrap_err();
        assert!(matches!(err, SourceReadError::Missing { source: Source::Trades, .. }));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn load_sources_fails_fast_on_absent_input() {
        let dir = scratch_dir("partial");
        // Only one of the five sources present.
        fs::write(dir.join("daily_trade_prices.csv"), "date,AAPL\n2024-01-02,150.0\n").unwrap();

        assert!(load_sources(&dir).is_err());
        fs::remove_dir_all(&dir).unwrap();
    }
}
