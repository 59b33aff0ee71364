use crate::core::error::{ensure_positive, RiskError};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

/// Joint structure of the FX and yield shocks.
///
/// Only independent draws are modelled; the variant exists so a correlated
/// model has a place to go without changing callers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShockCorrelation {
    #[default]
    Independent,
}

/// One simulated market move: fractional FX move and absolute yield move.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShockSample {
    pub fx_shock: f64,
    pub rate_shock: f64,
}

/// Zero-mean normal shocks with the given volatilities.
#[derive(Debug, Clone, Copy)]
pub struct ShockModel {
    fx: Normal<f64>,
    rate: Normal<f64>,
    correlation: ShockCorrelation,
}

impl ShockModel {
    pub fn new(
        fx_vol: f64,
        rate_vol: f64,
        correlation: ShockCorrelation,
    ) -> Result<Self, RiskError> {
        Ok(Self {
            fx: normal("fx_vol", fx_vol)?,
            rate: normal("rate_vol", rate_vol)?,
            correlation,
        })
    }

    pub fn fx_vol(&self) -> f64 {
        self.fx.std_dev()
    }

    pub fn rate_vol(&self) -> f64 {
        self.rate.std_dev()
    }

    pub fn correlation(&self) -> ShockCorrelation {
        self.correlation
    }

    /// Draw `n` samples.
    ///
    /// All FX shocks are drawn first, then all yield shocks, so for a given
    /// seed the FX leg does not depend on how the yield leg is consumed.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R, n: usize) -> Vec<ShockSample> {
        match self.correlation {
            ShockCorrelation::Independent => {
                let fx: Vec<f64> = (0..n).map(|_| self.fx.sample(rng)).collect();
                let rate: Vec<f64> = (0..n).map(|_| self.rate.sample(rng)).collect();
                fx.into_iter()
                    .zip(rate)
                    .map(|(fx_shock, rate_shock)| ShockSample {
                        fx_shock,
                        rate_shock,
                    })
                    .collect()
            }
        }
    }
}

fn normal(name: &'static str, vol: f64) -> Result<Normal<f64>, RiskError> {
    let vol = ensure_positive(name, vol)?;
    Normal::new(0.0, vol).map_err(|e| RiskError::invalid(name, e.to_string()))
}
