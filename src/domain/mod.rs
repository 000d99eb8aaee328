//! Core domain types and logic.

pub mod price_series;
pub mod generator;
pub mod indicator;
pub mod signal;
pub mod performance;
pub mod optimizer;
pub mod config_validation;
pub mod error;
