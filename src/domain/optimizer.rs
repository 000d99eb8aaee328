//! Grid search over moving-average window pairs.
//!
//! Every `short x long` combination is enumerated, pairs that violate
//! `0 < short < long` are dropped, and the survivors are evaluated in
//! parallel. Results are ranked by Sharpe ratio (descending), then by
//! `short_window` and `long_window` (ascending), so the output order does
//! not depend on evaluation order.

use crate::domain::error::CrossoptError;
use crate::domain::performance::Performance;
use crate::domain::price_series::PriceSeries;
use crate::domain::signal::generate_signals;
use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParameterPair {
    pub short_window: usize,
    pub long_window: usize,
}

impl ParameterPair {
    pub fn new(short_window: usize, long_window: usize) -> Self {
        Self {
            short_window,
            long_window,
        }
    }

    /// Both windows positive and `short_window < long_window`.
    pub fn is_valid(&self) -> bool {
        self.short_window > 0 && self.short_window < self.long_window
    }
}

impl fmt::Display for ParameterPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SMA({})/SMA({})", self.short_window, self.long_window)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterGrid {
    pub short_periods: BTreeSet<usize>,
    pub long_periods: BTreeSet<usize>,
}

impl ParameterGrid {
    pub fn new<S, L>(short_periods: S, long_periods: L) -> Self
    where
        S: IntoIterator<Item = usize>,
        L: IntoIterator<Item = usize>,
    {
        Self {
            short_periods: short_periods.into_iter().collect(),
            long_periods: long_periods.into_iter().collect(),
        }
    }

    /// Full cartesian product, valid or not.
    pub fn pairs(&self) -> Vec<ParameterPair> {
        let mut pairs = Vec::with_capacity(self.short_periods.len() * self.long_periods.len());
        for &short in &self.short_periods {
            for &long in &self.long_periods {
                pairs.push(ParameterPair::new(short, long));
            }
        }
        pairs
    }

    pub fn valid_pairs(&self) -> Vec<ParameterPair> {
        self.pairs().into_iter().filter(|p| p.is_valid()).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BacktestResult {
    pub short_window: usize,
    pub long_window: usize,
    pub total_return: f64,
    pub sharpe_ratio: f64,
}

impl BacktestResult {
    pub fn pair(&self) -> ParameterPair {
        ParameterPair::new(self.short_window, self.long_window)
    }
}

/// Evaluate a single window pair against `series`.
pub fn evaluate_pair(
    series: &PriceSeries,
    pair: ParameterPair,
) -> Result<BacktestResult, CrossoptError> {
    let signals = generate_signals(series, pair.short_window, pair.long_window)?;
    let performance = Performance::evaluate(series, &signals)?;
    Ok(BacktestResult {
        short_window: pair.short_window,
        long_window: pair.long_window,
        total_return: performance.total_return,
        sharpe_ratio: performance.sharpe_ratio,
    })
}

pub fn optimize<S, L>(
    series: &PriceSeries,
    short_grid: S,
    long_grid: L,
) -> Result<Vec<BacktestResult>, CrossoptError>
where
    S: IntoIterator<Item = usize>,
    L: IntoIterator<Item = usize>,
{
    optimize_grid(series, &ParameterGrid::new(short_grid, long_grid))
}

pub fn optimize_grid(
    series: &PriceSeries,
    grid: &ParameterGrid,
) -> Result<Vec<BacktestResult>, CrossoptError> {
    let pairs = grid.valid_pairs();
    if pairs.is_empty() {
        return Ok(Vec::new());
    }

    let mut results = pairs
        .par_iter()
        .map(|&pair| evaluate_pair(series, pair))
        .collect::<Result<Vec<_>, _>>()?;

    rank_results(&mut results);
    Ok(results)
}

/// Sort best-first: Sharpe descending, then smaller short window, then
/// smaller long window.
pub fn rank_results(results: &mut [BacktestResult]) {
    results.sort_by(compare_results);
}

fn compare_results(a: &BacktestResult, b: &BacktestResult) -> Ordering {
    b.sharpe_ratio
        .total_cmp(&a.sharpe_ratio)
        .then_with(|| a.short_window.cmp(&b.short_window))
        .then_with(|| a.long_window.cmp(&b.long_window))
}
