//! Technical indicator series.
//!
//! - `IndicatorPoint`: a single indicator value, with a `valid` flag that is
//!   false during warmup
//! - `IndicatorSeries`: indicator values aligned index-for-index with the
//!   price series they were computed from

pub mod sma;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorPoint {
    pub valid: bool,
    pub value: f64,
}

#[derive(Debug, Clone, Default)]
pub struct IndicatorSeries {
    pub values: Vec<IndicatorPoint>,
}

impl IndicatorSeries {
    /// Value at `index`, or `None` during warmup / past the end.
    pub fn value_at(&self, index: usize) -> Option<f64> {
        self.values
            .get(index)
            .filter(|p| p.valid)
            .map(|p| p.value)
    }
}
