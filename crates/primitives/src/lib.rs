#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/trademart/trademart-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod source;
pub use source::Source;

mod contract;
pub use contract::OUTPUT_COLUMNS;

/// Re-export common date type.
pub type Date = chrono::NaiveDate;
