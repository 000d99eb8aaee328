//! CSV file price data adapter.
//!
//! Expects a header row. The date column is `date` (or the first column when
//! no header matches); the price column is `price`, falling back to `close`.
//! Other columns are ignored, so plain OHLCV exports load as-is.

use crate::domain::error::CrossoptError;
use crate::domain::price_series::{PricePoint, PriceSeries};
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};

const DATE_FORMAT: &str = "%Y-%m-%d";

pub struct CsvAdapter {
    path: PathBuf,
}

impl CsvAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn read_points(&self) -> Result<Vec<PricePoint>, CrossoptError> {
        let content = fs::read_to_string(&self.path).map_err(|e| CrossoptError::DataSource {
            reason: format!("failed to read {}: {}", self.path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let headers = rdr
            .headers()
            .map_err(|e| CrossoptError::DataSource {
                reason: format!("CSV header error: {}", e),
            })?
            .clone();

        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        let date_idx = column("date").unwrap_or(0);
        let price_idx = column("price")
            .or_else(|| column("close"))
            .ok_or_else(|| CrossoptError::DataSource {
                reason: format!("{}: no price or close column", self.path.display()),
            })?;

        let mut points = Vec::new();
        for (row, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| CrossoptError::DataSource {
                reason: format!("CSV parse error: {}", e),
            })?;

            let date_str = record.get(date_idx).ok_or_else(|| CrossoptError::DataSource {
                reason: format!("row {}: missing date column", row + 1),
            })?;
            let date = NaiveDate::parse_from_str(date_str.trim(), DATE_FORMAT).map_err(|e| {
                CrossoptError::DataSource {
                    reason: format!("row {}: invalid date '{}': {}", row + 1, date_str, e),
                }
            })?;

            let price: f64 = record
                .get(price_idx)
                .ok_or_else(|| CrossoptError::DataSource {
                    reason: format!("row {}: missing price column", row + 1),
                })?
                .trim()
                .parse()
                .map_err(|e| CrossoptError::DataSource {
                    reason: format!("row {}: invalid price value: {}", row + 1, e),
                })?;

            points.push(PricePoint { date, price });
        }

        points.sort_by_key(|p| p.date);
        Ok(points)
    }
}

impl DataPort for CsvAdapter {
    fn fetch_series(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<PriceSeries, CrossoptError> {
        let points = self
            .read_points()?
            .into_iter()
            .filter(|p| start_date.is_none_or(|start| p.date >= start))
            .filter(|p| end_date.is_none_or(|end| p.date <= end))
            .collect();
        PriceSeries::new(points)
    }

    fn get_data_range(&self) -> Result<Option<(NaiveDate, NaiveDate, usize)>, CrossoptError> {
        let points = self.read_points()?;
        match (points.first(), points.last()) {
            (Some(first), Some(last)) => Ok(Some((first.date, last.date, points.len()))),
            _ => Ok(None),
        }
    }
}

/// Write `series` as `date,price` CSV.
pub fn write_series_csv(series: &PriceSeries, path: &Path) -> Result<(), CrossoptError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| CrossoptError::DataSource {
        reason: format!("failed to create {}: {}", path.display(), e),
    })?;
    let write_err = |e: csv::Error| CrossoptError::DataSource {
        reason: format!("failed to write {}: {}", path.display(), e),
    };

    writer.write_record(["date", "price"]).map_err(write_err)?;
    for point in series.points() {
        writer
            .write_record([
                point.date.format(DATE_FORMAT).to_string(),
                point.price.to_string(),
            ])
            .map_err(write_err)?;
    }
    writer.flush()?;
    Ok(())
}
