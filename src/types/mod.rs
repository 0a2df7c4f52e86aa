//! Shared data structures for the risk scoring pipeline
//!
//! - `observation`: raw machine records, failure modes, derived features
//! - `kpi`: reliability KPIs (failure rates, Pareto, operating profiles)
//! - `risk`: risk components, scored rows, risk validation summary

mod kpi;
mod observation;
mod risk;

pub use kpi::*;
pub use observation::*;
pub use risk::*;
