#![allow(dead_code)]

use chrono::NaiveDate;
use crossopt::domain::error::CrossoptError;
use crossopt::domain::generator::SeriesGenerator;
use crossopt::domain::optimizer::BacktestResult;
pub use crossopt::domain::price_series::{PricePoint, PriceSeries};
use crossopt::ports::data_port::DataPort;
use crossopt::ports::report_port::ReportPort;
use std::cell::RefCell;
use std::path::{Path, PathBuf};

pub struct MockDataPort {
    pub points: Vec<PricePoint>,
    pub error: Option<String>,
    pub requests: RefCell<Vec<(Option<NaiveDate>, Option<NaiveDate>)>>,
}

impl MockDataPort {
    pub fn new(series: &PriceSeries) -> Self {
        Self {
            points: series.points().to_vec(),
            error: None,
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn with_error(mut self, reason: &str) -> Self {
        self.error = Some(reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_series(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<PriceSeries, CrossoptError> {
        self.requests.borrow_mut().push((start_date, end_date));
        if let Some(reason) = &self.error {
            return Err(CrossoptError::DataSource {
                reason: reason.clone(),
            });
        }
        let points = self
            .points
            .iter()
            .filter(|p| start_date.is_none_or(|s| p.date >= s))
            .filter(|p| end_date.is_none_or(|e| p.date <= e))
            .copied()
            .collect();
        PriceSeries::new(points)
    }

    fn get_data_range(&self) -> Result<Option<(NaiveDate, NaiveDate, usize)>, CrossoptError> {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => Ok(Some((first.date, last.date, self.points.len()))),
            _ => Ok(None),
        }
    }
}

#[derive(Default)]
pub struct MockReportPort {
    pub written: RefCell<Vec<(PathBuf, Vec<BacktestResult>)>>,
}

impl ReportPort for MockReportPort {
    fn write(&self, results: &[BacktestResult], output_path: &Path) -> Result<(), CrossoptError> {
        self.written
            .borrow_mut()
            .push((output_path.to_path_buf(), results.to_vec()));
        Ok(())
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn make_series(prices: &[f64]) -> PriceSeries {
    let start = date(2024, 1, 1);
    let points = prices
        .iter()
        .enumerate()
        .map(|(i, &price)| PricePoint {
            date: start + chrono::Duration::days(i as i64),
            price,
        })
        .collect();
    PriceSeries::new(points).unwrap()
}

/// Oscillating series with a mild upward drift; produces plenty of crossovers.
pub fn wave_series(len: usize) -> PriceSeries {
    let prices: Vec<f64> = (0..len)
        .map(|i| 100.0 + 8.0 * (i as f64 / 9.0).sin() + 3.0 * (i as f64 / 2.3).cos() + i as f64 * 0.02)
        .collect();
    make_series(&prices)
}

pub fn generated_series(len: usize, seed: u64) -> PriceSeries {
    SeriesGenerator::new(seed)
        .with_end_date(date(2025, 1, 1))
        .generate(len)
        .unwrap()
}
