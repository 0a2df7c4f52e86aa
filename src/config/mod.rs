//! Risk Configuration Module
//!
//! Input/output locations and scoring weights loaded from TOML files.
//!
//! ## Loading Order
//!
//! 1. `--config <path>` on the command line (errors are fatal)
//! 2. `PDM_RISK_CONFIG` environment variable (path to TOML file)
//! 3. `risk_config.toml` in the current working directory
//! 4. Built-in defaults (the reference analysis constants)
//!
//! ## Example
//!
//! ```toml
//! [data]
//! input_path = "ai4i2020.csv"
//!
//! [output]
//! export_dir = "export"
//! charts_dir = "outputs"
//!
//! [scoring]
//! torque_weight = 0.4
//! tool_wear_weight = 0.4
//! power_proxy_weight = 0.2
//! constant_column = "zero"
//! ```

mod risk_config;
pub mod defaults;
pub mod validation;

pub use risk_config::*;
