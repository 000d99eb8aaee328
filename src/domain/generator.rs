//! Synthetic price series generator.
//!
//! Geometric random walk: `price[i] = price[i-1] * (1 + r_i)` with
//! `r_i ~ Normal(0, volatility)`. The random source is an explicit seeded
//! `StdRng` owned by the generator.

use crate::domain::error::CrossoptError;
use crate::domain::price_series::{PricePoint, PriceSeries};
use chrono::{Duration, NaiveDate, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

pub const DEFAULT_START_PRICE: f64 = 100.0;
pub const DEFAULT_VOLATILITY: f64 = 0.015;
pub const DEFAULT_LENGTH: usize = 252;

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    pub length: usize,
    pub seed: Option<u64>,
    pub start_price: f64,
    pub volatility: f64,
    pub end_date: Option<NaiveDate>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            seed: None,
            start_price: DEFAULT_START_PRICE,
            volatility: DEFAULT_VOLATILITY,
            end_date: None,
        }
    }
}

pub struct SeriesGenerator {
    rng: StdRng,
    start_price: f64,
    volatility: f64,
    end_date: NaiveDate,
}

impl SeriesGenerator {
    /// Generator with default price and volatility, dated up to today.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            start_price: DEFAULT_START_PRICE,
            volatility: DEFAULT_VOLATILITY,
            end_date: Utc::now().date_naive(),
        }
    }

    pub fn from_config(config: &GeneratorConfig) -> Result<Self, CrossoptError> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::build(rng, config.start_price, config.volatility, config.end_date)
    }

    fn build(
        rng: StdRng,
        start_price: f64,
        volatility: f64,
        end_date: Option<NaiveDate>,
    ) -> Result<Self, CrossoptError> {
        if !start_price.is_finite() || start_price <= 0.0 {
            return Err(CrossoptError::invalid_parameter("start_price", start_price));
        }
        if !(volatility > 0.0 && volatility < 1.0) {
            return Err(CrossoptError::invalid_parameter("volatility", volatility));
        }

        Ok(Self {
            rng,
            start_price,
            volatility,
            end_date: end_date.unwrap_or_else(|| Utc::now().date_naive()),
        })
    }

    /// Pin the date anchor; the series ends the day before `end_date`.
    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = end_date;
        self
    }

    pub fn generate(&mut self, length: usize) -> Result<PriceSeries, CrossoptError> {
        if length == 0 {
            return Err(CrossoptError::InvalidLength { length });
        }

        // The first date must stay inside chrono's calendar range.
        let start = i64::try_from(length)
            .ok()
            .and_then(Duration::try_days)
            .and_then(|span| self.end_date.checked_sub_signed(span))
            .ok_or(CrossoptError::InvalidLength { length })?;

        let returns = Normal::new(0.0, self.volatility)
            .map_err(|_| CrossoptError::invalid_parameter("volatility", self.volatility))?;
        let mut points = Vec::with_capacity(length);
        let mut price = self.start_price;
        let mut date = start;

        for i in 0..length {
            if i > 0 {
                price *= 1.0 + self.draw_return(&returns);
                date = date
                    .succ_opt()
                    .ok_or(CrossoptError::InvalidLength { length })?;
            }
            points.push(PricePoint { date, price });
        }

        PriceSeries::new(points)
    }

    // Redraws anything that would take the price to zero or below.
    fn draw_return(&mut self, returns: &Normal<f64>) -> f64 {
        loop {
            let r = returns.sample(&mut self.rng);
            if 1.0 + r > 0.0 {
                return r;
            }
        }
    }
}

/// Generate a series with default parameters. `None` seeds from OS entropy.
pub fn generate(length: usize, seed: Option<u64>) -> Result<PriceSeries, CrossoptError> {
    let config = GeneratorConfig {
        length,
        seed,
        ..GeneratorConfig::default()
    };
    SeriesGenerator::from_config(&config)?.generate(length)
}
