//! CSV report adapter implementing ReportPort.
//!
//! One row per evaluated pair, in ranked order, with a 1-based `rank` column.

use crate::domain::error::CrossoptError;
use crate::domain::optimizer::BacktestResult;
use crate::ports::report_port::ReportPort;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
struct ReportRow {
    rank: usize,
    short_window: usize,
    long_window: usize,
    total_return: f64,
    sharpe_ratio: f64,
}

impl ReportRow {
    fn new(rank: usize, result: &BacktestResult) -> Self {
        Self {
            rank,
            short_window: result.short_window,
            long_window: result.long_window,
            total_return: result.total_return,
            sharpe_ratio: result.sharpe_ratio,
        }
    }
}

#[derive(Debug, Default)]
pub struct CsvReportAdapter;

impl CsvReportAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl ReportPort for CsvReportAdapter {
    fn write(&self, results: &[BacktestResult], output_path: &Path) -> Result<(), CrossoptError> {
        let report_err = |e: csv::Error| CrossoptError::DataSource {
            reason: format!("failed to write report {}: {}", output_path.display(), e),
        };

        let mut writer = csv::Writer::from_path(output_path).map_err(report_err)?;
        for (i, result) in results.iter().enumerate() {
            writer
                .serialize(ReportRow::new(i + 1, result))
                .map_err(report_err)?;
        }
        writer.flush()?;
        Ok(())
    }
}
