//! Report generation port trait.

use crate::domain::error::CrossoptError;
use crate::domain::optimizer::BacktestResult;
use std::path::Path;

/// Port for writing ranked optimization results.
pub trait ReportPort {
    /// `results` are expected best-first, as returned by the optimizer.
    fn write(&self, results: &[BacktestResult], output_path: &Path) -> Result<(), CrossoptError>;
}
