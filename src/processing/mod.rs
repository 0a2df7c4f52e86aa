//! Table processing module - cleaning and feature derivation
//!
//! - `dedup`: exact-duplicate removal with stable, dense reindexing
//! - `features`: physical-proxy features (temperature delta, power, wear rate)

mod dedup;
mod features;

pub use dedup::{deduplicate, DedupOutcome};
pub use features::{derive_features, enrich, wear_rate_proxy};
