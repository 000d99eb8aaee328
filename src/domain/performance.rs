//! Strategy performance: positions, realized returns, total return and Sharpe ratio.

use crate::domain::error::CrossoptError;
use crate::domain::price_series::PriceSeries;
use crate::domain::signal::Signal;

pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Minimum number of price points needed to compute a single return.
pub const MIN_PRICE_POINTS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Performance {
    pub total_return: f64,
    pub sharpe_ratio: f64,
}

impl Performance {
    pub fn evaluate(series: &PriceSeries, signals: &[Signal]) -> Result<Self, CrossoptError> {
        let returns = strategy_returns(series, signals)?;
        Ok(Performance {
            total_return: compute_total_return(&returns),
            sharpe_ratio: compute_sharpe(&returns),
        })
    }
}

/// Forward-fill of the last non-`Hold` signal. Flat (`Hold`) until the first
/// decision.
pub fn derive_positions(signals: &[Signal]) -> Vec<Signal> {
    let mut positions = Vec::with_capacity(signals.len());
    let mut current = Signal::Hold;
    for &signal in signals {
        if !signal.is_hold() {
            current = signal;
        }
        positions.push(current);
    }
    positions
}

/// Per-step strategy returns for indices `1..n`.
///
/// The return at step `i` is the price return from `i - 1` to `i` scaled by
/// the position held at `i - 1`.
pub fn strategy_returns(
    series: &PriceSeries,
    signals: &[Signal],
) -> Result<Vec<f64>, CrossoptError> {
    if series.len() < MIN_PRICE_POINTS {
        return Err(CrossoptError::InsufficientData {
            points: series.len(),
            minimum: MIN_PRICE_POINTS,
        });
    }
    if signals.len() != series.len() {
        return Err(CrossoptError::LengthMismatch {
            series: series.len(),
            signals: signals.len(),
        });
    }

    let positions = derive_positions(signals);
    let points = series.points();

    Ok(points
        .windows(2)
        .zip(positions.iter())
        .map(|(w, position)| {
            let price_return = w[1].price / w[0].price - 1.0;
            price_return * f64::from(position.value())
        })
        .collect())
}

/// Running compounded return after each step.
pub fn cumulative_returns(returns: &[f64]) -> Vec<f64> {
    let mut growth = 1.0;
    returns
        .iter()
        .map(|r| {
            growth *= 1.0 + r;
            growth - 1.0
        })
        .collect()
}

pub fn compute_total_return(returns: &[f64]) -> f64 {
    cumulative_returns(returns).last().copied().unwrap_or(0.0)
}

/// Annualized Sharpe ratio using the sample standard deviation.
///
/// Zero when there are fewer than two returns or the returns have no
/// variance.
pub fn compute_sharpe(returns: &[f64]) -> f64 {
    if returns.len() < 2 {
        return 0.0;
    }
    if returns.iter().all(|&r| r == returns[0]) {
        return 0.0;
    }

    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1.0);
    let stddev = variance.sqrt();

    if stddev > 0.0 {
        mean / stddev * TRADING_DAYS_PER_YEAR.sqrt()
    } else {
        0.0
    }
}
