//! Health, sustainability and price scoring for consumer products.
//!
//! The engine is pure: [`compute_dataset_stats`] derives normalization
//! bounds from a dataset snapshot, and [`score_product`] turns one product's
//! raw attributes into a [`Scores`](types::scoring::Scores) record against
//! those bounds. Loading, ranking and rendering live around it.

pub mod catalog;
pub mod config;
pub mod error;
pub mod rank;
pub mod report;
pub mod scoring;
pub mod snapshot;
pub mod types;

pub use scoring::stats::compute_dataset_stats;
pub use scoring::{score_catalog, score_product, score_product_with_stats};
