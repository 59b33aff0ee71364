//! Monte Carlo Value-at-Risk.
//!
//! Random FX and yield shocks are pushed through the portfolio's linear
//! sensitivities to build a P&L distribution; VaR is read off its lower
//! tail. Sensitivities are derived once per run (local linearisation), not
//! per shock.
//!
//! VaR is reported as a positive loss: the negated `(1 - confidence)`
//! percentile of simulated P&L.

use crate::core::error::RiskError;
use crate::core::portfolio::{BondHolding, Exposure, Portfolio};
use crate::pricing::bond::{DiscountedCashFlow, InstrumentValuation};
use crate::sensitivity::calculator::{portfolio_sensitivities, FxGrid};
use crate::sensitivity::linear::LinearRiskModel;
use crate::simulation::distribution::PnlDistribution;
use crate::simulation::shocks::{ShockCorrelation, ShockModel};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Below this many simulations the tail percentile rests on a handful of paths.
const THIN_TAIL_PATHS: f64 = 10.0;

/// Configuration for a Monte Carlo VaR run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonteCarloConfig {
    pub n_sims: usize,
    /// Standard deviation of the fractional FX move (0.01 = 1%).
    pub fx_vol: f64,
    /// Standard deviation of the absolute yield move (0.0025 = 25bp).
    pub rate_vol: f64,
    /// VaR confidence level, strictly between 0 and 1.
    pub confidence: f64,
    /// Direction the FX delta is applied in. Defaults to `Short`, the
    /// opposite of the scenario engine's default.
    pub exposure: Exposure,
    pub correlation: ShockCorrelation,
    pub fx_grid: FxGrid,
    /// Seed for [`MonteCarloEngine::run`]; ignored when a generator is passed in.
    pub seed: u64,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            n_sims: 10_000,
            fx_vol: 0.01,
            rate_vol: 0.0025,
            confidence: 0.95,
            exposure: Exposure::Short,
            correlation: ShockCorrelation::Independent,
            fx_grid: FxGrid::default(),
            seed: 42,
        }
    }
}

impl MonteCarloConfig {
    pub fn validate(&self) -> Result<(), RiskError> {
        if self.n_sims == 0 {
            return Err(RiskError::invalid(
                "n_sims",
                "at least one simulation is required",
            ));
        }
        if !(self.confidence > 0.0 && self.confidence < 1.0) {
            return Err(RiskError::invalid(
                "confidence",
                format!("must lie strictly between 0 and 1, got {}", self.confidence),
            ));
        }
        // Volatilities are checked when the shock model is built.
        ShockModel::new(self.fx_vol, self.rate_vol, self.correlation)?;
        Ok(())
    }

    /// Percentile of the P&L distribution that defines VaR.
    pub fn tail_percentile(&self) -> f64 {
        (1.0 - self.confidence) * 100.0
    }
}

/// Headline risk figures of a Monte Carlo run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskSummary {
    pub confidence: f64,
    /// Loss not exceeded at `confidence`, reported as a positive number
    /// when the tail is a loss.
    pub var: f64,
    /// Mean simulated P&L.
    pub expected_loss: f64,
    /// Minimum simulated P&L.
    pub worst_loss: f64,
    /// FX delta per 1% move, oriented by the run's exposure.
    pub fx_delta: f64,
    pub bond_dv01: f64,
    pub simulations: usize,
}

impl RiskSummary {
    /// The P&L percentile VaR was read from.
    pub fn var_threshold(&self) -> f64 {
        -self.var
    }
}

impl fmt::Display for RiskSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Monte Carlo VaR ({} paths) ===", self.simulations)?;
        writeln!(f, "Confidence:          {:.1}%", self.confidence * 100.0)?;
        writeln!(f, "VaR:                 {:.2}", self.var)?;
        writeln!(f, "Expected Loss:       {:.2}", self.expected_loss)?;
        writeln!(f, "Worst Loss:          {:.2}", self.worst_loss)?;
        writeln!(f, "FX Delta (per 1%):   {:.2}", self.fx_delta)?;
        writeln!(f, "Bond DV01 (per 1bp): {:.4}", self.bond_dv01)
    }
}

/// Monte Carlo VaR over independently drawn FX and yield shocks.
///
/// The engine owns no generator: [`run`](Self::run) seeds a fresh one from
/// the configuration and [`run_with`](Self::run_with) takes the caller's,
/// so concurrent runs never share random state.
#[derive(Debug, Clone, Default)]
pub struct MonteCarloEngine {
    config: MonteCarloConfig,
}

impl MonteCarloEngine {
    pub fn new(config: MonteCarloConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MonteCarloConfig {
        &self.config
    }

    pub fn run(&self, portfolio: &Portfolio) -> Result<(RiskSummary, PnlDistribution), RiskError> {
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        self.run_with(&DiscountedCashFlow, portfolio, &mut rng)
    }

    pub fn run_with<P, R>(
        &self,
        pricer: &P,
        portfolio: &Portfolio,
        rng: &mut R,
    ) -> Result<(RiskSummary, PnlDistribution), RiskError>
    where
        P: InstrumentValuation + ?Sized,
        R: Rng + ?Sized,
    {
        let config = &self.config;
        config.validate()?;
        let shocks = ShockModel::new(config.fx_vol, config.rate_vol, config.correlation)?;
        let sensitivities = portfolio_sensitivities(pricer, portfolio, &config.fx_grid)?;
        let model = LinearRiskModel::new(&sensitivities, config.exposure);

        let tail_paths = config.n_sims as f64 * (1.0 - config.confidence);
        if tail_paths < THIN_TAIL_PATHS {
            warn!(
                "only {:.1} of {} paths lie beyond the {:.1}% tail; VaR will be unstable",
                tail_paths,
                config.n_sims,
                config.tail_percentile()
            );
        }
        debug!(
            "monte carlo: n_sims={} fx_vol={} rate_vol={} confidence={} exposure={} fx_delta={:.4} dv01={:.6}",
            config.n_sims,
            config.fx_vol,
            config.rate_vol,
            config.confidence,
            config.exposure,
            model.fx_delta,
            model.dv01
        );

        let totals = shocks
            .sample(rng, config.n_sims)
            .into_iter()
            .map(|s| model.pnl(s.fx_shock, s.rate_shock).total)
            .collect();
        let distribution = PnlDistribution::new(totals)?;

        let threshold = distribution.percentile(config.tail_percentile())?;
        let summary = RiskSummary {
            confidence: config.confidence,
            var: -threshold,
            expected_loss: distribution.mean(),
            worst_loss: distribution.min(),
            fx_delta: model.fx_delta,
            bond_dv01: model.dv01,
            simulations: distribution.len(),
        };
        info!(
            "monte carlo VaR({:.1}%) = {:.2} over {} paths, worst {:.2}",
            config.confidence * 100.0,
            summary.var,
            summary.simulations,
            summary.worst_loss
        );
        Ok((summary, distribution))
    }
}

/// Monte Carlo VaR for `portfolio` using the caller's generator.
pub fn portfolio_var<R: Rng + ?Sized>(
    portfolio: &Portfolio,
    config: &MonteCarloConfig,
    rng: &mut R,
) -> Result<(RiskSummary, PnlDistribution), RiskError> {
    MonteCarloEngine::new(config.clone()).run_with(&DiscountedCashFlow, portfolio, rng)
}

/// Monte Carlo VaR for a GBP position plus a standard 4%, 5-year bond,
/// with the remaining settings at their defaults.
///
/// # Examples
///
/// ```
/// use fx_bond_risk::simulation::monte_carlo::monte_carlo_var;
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let (summary, pnl) = monte_carlo_var(
///     10_000, 10_000.0, 1.25, 1_000.0, 0.05, 0.01, 0.0025, 0.95, &mut rng,
/// )
/// .unwrap();
/// assert_eq!(pnl.len(), 10_000);
/// assert!(summary.var > 0.0);
/// assert!(summary.worst_loss <= summary.var_threshold());
/// ```
#[allow(clippy::too_many_arguments)]
pub fn monte_carlo_var<R: Rng + ?Sized>(
    n_sims: usize,
    position: f64,
    base_fx_rate: f64,
    face_value: f64,
    base_yield: f64,
    fx_vol: f64,
    rate_vol: f64,
    confidence: f64,
    rng: &mut R,
) -> Result<(RiskSummary, PnlDistribution), RiskError> {
    let portfolio = Portfolio {
        fx_position: position,
        base_fx_rate,
        bond: BondHolding::standard(face_value),
        base_yield,
        ..Default::default()
    };
    let config = MonteCarloConfig {
        n_sims,
        fx_vol,
        rate_vol,
        confidence,
        ..Default::default()
    };
    portfolio_var(&portfolio, &config, rng)
}
