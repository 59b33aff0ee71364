//! FX rate random walk.
//!
//! Daily returns are drawn from a zero-mean normal and compounded onto the
//! starting rate. The path is used to illustrate the realised P&L of the
//! funded FX position and to sanity-check volatility assumptions.

use crate::core::currency::{CurrencyPair, FxQuote};
use crate::core::error::{ensure_finite, ensure_positive, RiskError};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Parameters of a simulated FX path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FxPathConfig {
    pub pair: CurrencyPair,
    /// Rate the walk starts from (quote units per base unit).
    pub start_rate: f64,
    pub days: usize,
    /// Standard deviation of daily fractional returns.
    pub daily_vol: f64,
}

impl Default for FxPathConfig {
    fn default() -> Self {
        Self {
            pair: CurrencyPair::gbp_usd(),
            start_rate: 1.25,
            days: 100,
            daily_vol: 0.005,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FxPathPoint {
    /// Trading day, starting at 1.
    pub day: usize,
    pub daily_return: f64,
    pub rate: f64,
}

/// A simulated sequence of daily FX rates. Never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FxPath {
    pair: CurrencyPair,
    start_rate: f64,
    points: Vec<FxPathPoint>,
}

impl FxPath {
    pub fn pair(&self) -> &CurrencyPair {
        &self.pair
    }

    pub fn start_rate(&self) -> f64 {
        self.start_rate
    }

    pub fn points(&self) -> &[FxPathPoint] {
        &self.points
    }

    pub fn days(&self) -> usize {
        self.points.len()
    }

    pub fn returns(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.daily_return)
    }

    pub fn rates(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.rate)
    }

    /// Rate at the end of the first simulated day.
    pub fn first_rate(&self) -> f64 {
        self.points[0].rate
    }

    pub fn final_rate(&self) -> f64 {
        self.points[self.points.len() - 1].rate
    }

    /// P&L in the base currency of converting `position` at the first
    /// simulated rate and converting back at the last.
    pub fn realised_pnl(&self, position: f64) -> Result<f64, RiskError> {
        ensure_finite("position", position)?;
        let entry = FxQuote::new(self.pair.clone(), self.first_rate())?;
        let exit = FxQuote::new(self.pair.clone(), self.final_rate())?;
        let notional = entry.to_quote_currency(position);
        Ok(exit.to_base_currency(notional) - position)
    }

    /// Sample standard deviation of daily returns; `None` for a single day.
    pub fn estimated_daily_vol(&self) -> Option<f64> {
        let n = self.points.len();
        if n < 2 {
            return None;
        }
        let mean = self.returns().sum::<f64>() / n as f64;
        let ss: f64 = self.returns().map(|r| (r - mean).powi(2)).sum();
        Some((ss / (n - 1) as f64).sqrt())
    }

    /// Daily volatility scaled by `sqrt(252)`.
    pub fn annualised_vol(&self) -> Option<f64> {
        self.estimated_daily_vol()
            .map(|v| v * TRADING_DAYS_PER_YEAR.sqrt())
    }
}

/// Simulate `config.days` daily rates: `rate_d = start * prod(1 + r_k)`.
///
/// # Examples
///
/// ```
/// use fx_bond_risk::simulation::fx_path::{simulate_fx_path, FxPathConfig};
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let config = FxPathConfig { days: 200, daily_vol: 0.006, ..Default::default() };
/// let path = simulate_fx_path(&config, &mut StdRng::seed_from_u64(42)).unwrap();
/// assert_eq!(path.days(), 200);
/// assert!(path.final_rate() > 0.0);
/// ```
pub fn simulate_fx_path<R: Rng + ?Sized>(
    config: &FxPathConfig,
    rng: &mut R,
) -> Result<FxPath, RiskError> {
    let start_rate = FxQuote::new(config.pair.clone(), config.start_rate)?.rate();
    let daily_vol = ensure_positive("daily_vol", config.daily_vol)?;
    if config.days == 0 {
        return Err(RiskError::invalid("days", "must simulate at least one day"));
    }
    let returns = Normal::new(0.0, daily_vol)
        .map_err(|e| RiskError::invalid("daily_vol", e.to_string()))?;

    let mut rate = start_rate;
    let mut points = Vec::with_capacity(config.days);
    for day in 1..=config.days {
        let daily_return = returns.sample(rng);
        rate *= 1.0 + daily_return;
        if !(rate.is_finite() && rate > 0.0) {
            return Err(RiskError::NonFinite {
                context: "simulated FX rate",
            });
        }
        points.push(FxPathPoint {
            day,
            daily_return,
            rate,
        });
    }

    Ok(FxPath {
        pair: config.pair.clone(),
        start_rate,
        points,
    })
}
