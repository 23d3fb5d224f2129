//! Input source definitions.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Logical input sources consumed by a single pipeline run.
///
/// Each source is a tabular file with a header row; types are inferred at
/// read time. The variants are ordered the way the loader reads them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum Source {
    /// Wide daily price matrix: a `date` column plus one price column per ticker.
    #[display("daily_trade_prices")]
    DailyTradePrices,
    /// Customer dimension keyed by `customer_id`.
    #[display("dim_customer")]
    DimCustomer,
    /// Calendar dimension keyed by `date`.
    #[display("dim_date")]
    DimDate,
    /// Stock dimension keyed by `stock_ticker`.
    #[display("dim_stock")]
    DimStock,
    /// Trade fact table, the left anchor of every join.
    #[display("trades")]
    Trades,
}

impl std::error::Error for Source {}

impl Source {
    /// All sources, in load order.
    pub const ALL: [Self; 5] =
        [Self::DailyTradePrices, Self::DimCustomer, Self::DimDate, Self::DimStock, Self::Trades];

    /// Canonical file name of this source inside the input directory.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::DailyTradePrices => "daily_trade_prices.csv",
            Self::DimCustomer => "dim_customer.csv",
            Self::DimDate => "dim_date.csv",
            Self::DimStock => "dim_stock.csv",
            Self::Trades => "trades.csv",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_match_logical_names() {
        for source in Source::ALL {
            assert_eq!(source.file_name(), format!("{source}.csv"));
        }
    }

    #[test]
    fn all_sources_distinct() {
        let mut names: Vec<&str> = Source::ALL.iter().map(|s| s.file_name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Source::ALL.len());
    }
}
