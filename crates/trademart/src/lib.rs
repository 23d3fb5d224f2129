//! # trademart
//!
//! Batch ETL for trade enrichment: five CSV sources in, one analytics-ready
//! PostgreSQL table out.
//!
//! This crate provides a unified interface to the trademart ecosystem.
//! Individual components can be enabled via feature flags.
//!
//! ## Features
//!
//! - `full` (default): Enables all components
//! - `primitives`: Source registry, output contract and shared types
//! - `ingest`: CSV source loading
//! - `pipeline`: Forward-fill, reshape, joins, derived fields and the schema gate
//! - `store`: Database provisioning and wholesale table replacement
//! - `cli`: The `mart` binary running the full batch
//!
//! ## Example
//!
//! ```rust,ignore
//! use trademart::ingest::load_sources;
//! use trademart::pipeline::enrich;
//!
//! let sources = load_sources("data".as_ref())?;
//! let enriched = enrich(
//!     &sources.prices,
//!     &sources.customers,
//!     &sources.dates,
//!     &sources.stocks,
//!     &sources.trades,
//! )?;
//! ```

#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

#[cfg(feature = "primitives")]
#[doc(inline)]
pub use trademart_primitives as primitives;

#[cfg(feature = "ingest")]
#[doc(inline)]
pub use trademart_ingest as ingest;

#[cfg(feature = "pipeline")]
#[doc(inline)]
pub use trademart_pipeline as pipeline;

#[cfg(feature = "store")]
#[doc(inline)]
pub use trademart_store as store;
