#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/trademart/trademart-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod config;
pub use config::DbConfig;

mod table;
pub use table::TableName;

mod provision;
pub use provision::{Provisioned, ensure_database};

mod load;
pub use load::{LoadOutcome, replace_table};

mod error;
pub use error::StoreError;
