//! Moving-average crossover signal generation.
//!
//! # Semantics
//!
//! - `Buy` at index `i` when SMA(short) crosses above SMA(long): above at `i`,
//!   at or below at `i - 1`
//! - `Sell` at index `i` when SMA(short) crosses below SMA(long)
//! - `Hold` everywhere else, including every index where either average is
//!   still warming up at `i` or `i - 1`

use crate::domain::error::CrossoptError;
use crate::domain::indicator::sma::calculate_sma;
use crate::domain::price_series::PriceSeries;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(i8)]
pub enum Signal {
    Sell = -1,
    #[default]
    Hold = 0,
    Buy = 1,
}

impl Signal {
    pub fn value(self) -> i8 {
        self as i8
    }

    pub fn is_hold(self) -> bool {
        self == Signal::Hold
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+}", self.value())
    }
}

/// Crossover signals aligned index-for-index with `series`.
///
/// Both windows must be positive. Ordering (`short_window < long_window`) is
/// the caller's concern.
pub fn generate_signals(
    series: &PriceSeries,
    short_window: usize,
    long_window: usize,
) -> Result<Vec<Signal>, CrossoptError> {
    if short_window == 0 {
        return Err(CrossoptError::invalid_parameter("short_window", short_window));
    }
    if long_window == 0 {
        return Err(CrossoptError::invalid_parameter("long_window", long_window));
    }

    let short_ma = calculate_sma(series, short_window);
    let long_ma = calculate_sma(series, long_window);

    let mut signals = vec![Signal::Hold; series.len()];

    for i in 1..series.len() {
        let (Some(short_curr), Some(long_curr), Some(short_prev), Some(long_prev)) = (
            short_ma.value_at(i),
            long_ma.value_at(i),
            short_ma.value_at(i - 1),
            long_ma.value_at(i - 1),
        ) else {
            continue;
        };

        if short_curr > long_curr && short_prev <= long_prev {
            signals[i] = Signal::Buy;
        } else if short_curr < long_curr && short_prev >= long_prev {
            signals[i] = Signal::Sell;
        }
    }

    Ok(signals)
}
