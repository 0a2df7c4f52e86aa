//! Risk validation and reporting
//!
//! - `validation`: per-bucket failure rate and lift over the global baseline
//! - `independence`: chi-squared test of risk level vs. machine failure
//! - `console`: human-readable run summary

mod console;
mod independence;
mod validation;

pub use console::render_summary;
pub use independence::independence_test;
pub use validation::{round2, summarize_risk};
