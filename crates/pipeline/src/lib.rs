#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/trademart/trademart-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod normalize;
pub use normalize::{coerce_dates, forward_fill_prices, prepare_trades};

mod reshape;
pub use reshape::to_long;

mod join;
pub use join::{join_customers, join_dates, join_prices, join_stocks};

mod derive;
pub use derive::{with_portfolio_log, with_total_amount};

mod validate;
pub use validate::enforce_contract;

mod enrich;
pub use enrich::enrich;

mod error;
pub use error::PipelineError;
