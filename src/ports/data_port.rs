//! Price data access port trait.

use crate::domain::error::CrossoptError;
use crate::domain::price_series::PriceSeries;
use chrono::NaiveDate;

/// Source of an externally recorded price series.
pub trait DataPort {
    /// Fetch the series, optionally restricted to an inclusive date range.
    fn fetch_series(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<PriceSeries, CrossoptError>;

    /// First date, last date and point count, or `None` when there is no data.
    fn get_data_range(&self) -> Result<Option<(NaiveDate, NaiveDate, usize)>, CrossoptError>;
}
