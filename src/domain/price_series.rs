//! Price time series representation.

use crate::domain::error::CrossoptError;
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

/// Ordered, validated `(date, price)` series. Immutable once built.
///
/// Dates are strictly increasing and every price is finite and positive.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(points: Vec<PricePoint>) -> Result<Self, CrossoptError> {
        for (index, point) in points.iter().enumerate() {
            if !point.price.is_finite() || point.price <= 0.0 {
                return Err(CrossoptError::InvalidSeries {
                    index,
                    reason: format!("price must be positive, got {}", point.price),
                });
            }
            if index > 0 && point.date <= points[index - 1].date {
                return Err(CrossoptError::InvalidSeries {
                    index,
                    reason: format!(
                        "date {} does not follow {}",
                        point.date,
                        points[index - 1].date
                    ),
                });
            }
        }
        Ok(Self { points })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn prices(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.price).collect()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }
}
