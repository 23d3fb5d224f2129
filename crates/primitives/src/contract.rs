//! Output schema contract for the enriched trade dataset.

/// Ordered column set the destination table must carry.
///
/// Every column listed here must be present after enrichment; a null-valued
/// column is acceptable, an absent one is not. The persisted table uses
/// exactly this order.
pub const OUTPUT_COLUMNS: [&str; 16] = [
    "transaction_id",
    "trade_date",
    "customer_id",
    "stock_ticker",
    "transaction_type",
    "quantity",
    "average_trade_size",
    "stock_price",
    "total_trade_amount",
    "customer_account_type",
    "day_name",
    "is_weekend",
    "is_holiday",
    "stock_liquidity_tier",
    "stock_sector",
    "stock_industry",
];
