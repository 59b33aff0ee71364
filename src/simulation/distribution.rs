use crate::core::error::RiskError;
use serde::{Deserialize, Serialize};

/// Simulated total P&L values, one per Monte Carlo path.
///
/// Only order statistics are exposed. The distribution is never empty and
/// holds finite values only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct PnlDistribution {
    values: Vec<f64>,
}

impl PnlDistribution {
    pub fn new(values: Vec<f64>) -> Result<Self, RiskError> {
        if values.is_empty() {
            return Err(RiskError::invalid(
                "n_sims",
                "a P&L distribution needs at least one simulation",
            ));
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(RiskError::NonFinite {
                context: "simulated P&L",
            });
        }
        Ok(Self { values })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Values in simulation order.
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.values
    }

    pub fn mean(&self) -> f64 {
        self.values.iter().sum::<f64>() / self.values.len() as f64
    }

    pub fn min(&self) -> f64 {
        self.values.iter().copied().fold(f64::INFINITY, f64::min)
    }

    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// The `q`-th percentile (`q` in `[0, 100]`), linearly interpolated
    /// between the two closest order statistics.
    ///
    /// Runs in linear time: the order statistics are found by selection on
    /// a scratch copy rather than a full sort.
    ///
    /// # Examples
    ///
    /// ```
    /// use fx_bond_risk::simulation::distribution::PnlDistribution;
    ///
    /// let pnl = PnlDistribution::new(vec![4.0, 1.0, 3.0, 2.0]).unwrap();
    /// assert_eq!(pnl.percentile(50.0).unwrap(), 2.5);
    /// assert_eq!(pnl.percentile(0.0).unwrap(), 1.0);
    /// assert_eq!(pnl.percentile(100.0).unwrap(), 4.0);
    /// ```
    pub fn percentile(&self, q: f64) -> Result<f64, RiskError> {
        if !(0.0..=100.0).contains(&q) {
            return Err(RiskError::invalid(
                "percentile",
                format!("must lie in [0, 100], got {}", q),
            ));
        }
        let rank = q / 100.0 * (self.values.len() - 1) as f64;
        let lo = rank.floor() as usize;
        let frac = rank - lo as f64;

        let mut scratch = self.values.clone();
        let (_, lo_value, above) = scratch.select_nth_unstable_by(lo, f64::total_cmp);
        let lo_value = *lo_value;
        if frac == 0.0 || above.is_empty() {
            return Ok(lo_value);
        }
        let hi_value = above.iter().copied().fold(f64::INFINITY, f64::min);
        Ok(lo_value + frac * (hi_value - lo_value))
    }
}

impl TryFrom<Vec<f64>> for PnlDistribution {
    type Error = RiskError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}

impl From<PnlDistribution> for Vec<f64> {
    fn from(distribution: PnlDistribution) -> Self {
        distribution.values
    }
}
