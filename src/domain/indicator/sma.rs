//! Simple Moving Average indicator.
//!
//! O(n) sliding window sum.
//! SMA(n)[i] = (P[i-n+1] + ... + P[i]) / n
//! Warmup: first (n-1) points are invalid.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries};
use crate::domain::price_series::PriceSeries;

pub fn calculate_sma(series: &PriceSeries, period: usize) -> IndicatorSeries {
    let points = series.points();
    if period == 0 || points.is_empty() {
        return IndicatorSeries::default();
    }

    let mut values = Vec::with_capacity(points.len());
    let mut window_sum: f64 = 0.0;

    for (i, point) in points.iter().enumerate() {
        window_sum += point.price;
        if i >= period {
            window_sum -= points[i - period].price;
        }

        let valid = i >= period - 1;
        let sma = if valid { window_sum / period as f64 } else { 0.0 };

        values.push(IndicatorPoint { valid, value: sma });
    }

    IndicatorSeries { values }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::price_series::PricePoint;
    use chrono::NaiveDate;

    fn make_series(prices: &[f64]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
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

    #[test]
    fn sma_warmup() {
        let series = make_series(&[10.0, 20.0, 30.0, 40.0, 50.0]);
        let sma = calculate_sma(&series, 3);

        assert_eq!(sma.values.len(), 5);
        assert!(!sma.values[0].valid);
        assert!(!sma.values[1].valid);
        assert!(sma.values[2].valid);
        assert!(sma.values[4].valid);
    }

    #[test]
    fn sma_known_values() {
        let series = make_series(&[10.0, 20.0, 30.0, 40.0, 50.0]);
        let sma = calculate_sma(&series, 3);

        assert!((sma.values[2].value - 20.0).abs() < 1e-10);
        assert!((sma.values[3].value - 30.0).abs() < 1e-10);
        assert!((sma.values[4].value - 40.0).abs() < 1e-10);
    }

    #[test]
    fn sma_period_one_is_price() {
        let prices = [3.0, 1.0, 4.0, 1.0, 5.0];
        let series = make_series(&prices);
        let sma = calculate_sma(&series, 1);

        for (point, &price) in sma.values.iter().zip(prices.iter()) {
            assert!(point.valid);
            assert!((point.value - price).abs() < 1e-10);
        }
    }

    #[test]
    fn sma_matches_naive_window_mean() {
        let prices: Vec<f64> = (0..40).map(|i| 100.0 + ((i * 7) % 11) as f64 * 0.37).collect();
        let series = make_series(&prices);
        let sma = calculate_sma(&series, 6);

        for i in 5..prices.len() {
            let naive = prices[i - 5..=i].iter().sum::<f64>() / 6.0;
            assert!((sma.values[i].value - naive).abs() < 1e-9);
        }
    }

    #[test]
    fn sma_period_longer_than_series_is_all_invalid() {
        let series = make_series(&[1.0, 2.0, 3.0]);
        let sma = calculate_sma(&series, 5);
        assert!(sma.values.iter().all(|p| !p.valid));
    }

    #[test]
    fn sma_zero_period_is_empty() {
        let series = make_series(&[1.0, 2.0, 3.0]);
        let sma = calculate_sma(&series, 0);
        assert!(sma.values.is_empty());
    }
}
