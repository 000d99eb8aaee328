//! Configuration validation.
//!
//! Validates all config fields before an optimization run.

use crate::domain::error::CrossoptError;
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;
use std::collections::BTreeSet;

pub fn validate_config(config: &dyn ConfigPort) -> Result<(), CrossoptError> {
    validate_generator_config(config)?;
    validate_grid_config(config)?;
    validate_data_config(config)?;
    validate_report_config(config)?;
    Ok(())
}

pub fn validate_generator_config(config: &dyn ConfigPort) -> Result<(), CrossoptError> {
    validate_length(config)?;
    validate_seed(config)?;
    validate_start_price(config)?;
    validate_volatility(config)?;
    optional_date(config, "generator", "end_date")?;
    Ok(())
}

pub fn validate_grid_config(config: &dyn ConfigPort) -> Result<(), CrossoptError> {
    required_periods(config, "short_period")?;
    required_periods(config, "long_period")?;
    Ok(())
}

pub fn validate_data_config(config: &dyn ConfigPort) -> Result<(), CrossoptError> {
    let start = optional_date(config, "data", "start_date")?;
    let end = optional_date(config, "data", "end_date")?;
    if let (Some(start), Some(end)) = (start, end) {
        if start > end {
            return Err(invalid("data", "start_date", "start_date must not be after end_date"));
        }
    }
    Ok(())
}

pub fn validate_report_config(config: &dyn ConfigPort) -> Result<(), CrossoptError> {
    if let Some(value) = config.get_string("report", "top") {
        match value.trim().parse::<usize>() {
            Ok(n) if n > 0 => {}
            _ => return Err(invalid("report", "top", "top must be a positive integer")),
        }
    }
    Ok(())
}

/// Parse a comma-separated list of positive window lengths into a set.
///
/// Duplicates collapse; empty tokens, zero and non-numeric values are errors.
pub fn parse_periods(section: &str, key: &str, input: &str) -> Result<BTreeSet<usize>, CrossoptError> {
    let mut periods = BTreeSet::new();
    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(invalid(section, key, "empty entry in period list"));
        }
        match trimmed.parse::<usize>() {
            Ok(0) => return Err(invalid(section, key, "periods must be positive")),
            Ok(period) => {
                periods.insert(period);
            }
            Err(_) => {
                return Err(invalid(
                    section,
                    key,
                    &format!("invalid period '{}'", trimmed),
                ));
            }
        }
    }
    Ok(periods)
}

pub fn required_periods(config: &dyn ConfigPort, key: &str) -> Result<BTreeSet<usize>, CrossoptError> {
    let raw = config
        .get_string("grid", key)
        .ok_or_else(|| CrossoptError::ConfigMissing {
            section: "grid".to_string(),
            key: key.to_string(),
        })?;
    parse_periods("grid", key, &raw)
}

pub fn optional_date(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<Option<NaiveDate>, CrossoptError> {
    match config.get_string(section, key) {
        None => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Some)
            .map_err(|_| {
                invalid(
                    section,
                    key,
                    &format!("invalid {} format, expected YYYY-MM-DD", key),
                )
            }),
    }
}

pub fn optional_seed(config: &dyn ConfigPort) -> Result<Option<u64>, CrossoptError> {
    match config.get_string("generator", "seed") {
        None => Ok(None),
        Some(s) => s
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| invalid("generator", "seed", "seed must be a non-negative integer")),
    }
}

fn validate_length(config: &dyn ConfigPort) -> Result<(), CrossoptError> {
    if let Some(value) = config.get_string("generator", "length") {
        match value.trim().parse::<usize>() {
            Ok(n) if n > 0 => {}
            _ => return Err(invalid("generator", "length", "length must be a positive integer")),
        }
    }
    Ok(())
}

fn validate_seed(config: &dyn ConfigPort) -> Result<(), CrossoptError> {
    optional_seed(config).map(|_| ())
}

fn validate_start_price(config: &dyn ConfigPort) -> Result<(), CrossoptError> {
    let value = config.get_double("generator", "start_price", 100.0);
    if !value.is_finite() || value <= 0.0 {
        return Err(invalid("generator", "start_price", "start_price must be positive"));
    }
    Ok(())
}

fn validate_volatility(config: &dyn ConfigPort) -> Result<(), CrossoptError> {
    let value = config.get_double("generator", "volatility", 0.015);
    if !(value > 0.0 && value < 1.0) {
        return Err(invalid(
            "generator",
            "volatility",
            "volatility must be between 0 and 1 (exclusive)",
        ));
    }
    Ok(())
}

fn invalid(section: &str, key: &str, reason: &str) -> CrossoptError {
    CrossoptError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}
