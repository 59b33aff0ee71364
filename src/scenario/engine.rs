use crate::core::error::RiskError;
use crate::core::portfolio::{BondHolding, Exposure, Portfolio};
use crate::pricing::bond::{DiscountedCashFlow, InstrumentValuation};
use crate::scenario::catalogue::{standard_catalogue, ScenarioDefinition};
use crate::sensitivity::calculator::{portfolio_sensitivities, FxGrid, PortfolioSensitivities};
use crate::sensitivity::linear::LinearRiskModel;
use log::{debug, info};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Configuration for a scenario run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// Direction the FX delta is applied in.
    pub exposure: Exposure,
    /// Scenarios to evaluate, reported in this order.
    pub scenarios: Vec<ScenarioDefinition>,
    pub fx_grid: FxGrid,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            exposure: Exposure::Long,
            scenarios: standard_catalogue(),
            fx_grid: FxGrid::default(),
        }
    }
}

/// P&L of the portfolio under one scenario, rounded to 2 dp for reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub name: String,
    /// FX move in percent.
    pub fx_move_pct: f64,
    /// Yield move in percent.
    pub yield_move_pct: f64,
    pub fx_pnl: Decimal,
    pub bond_pnl: Decimal,
    pub total_pnl: Decimal,
}

/// Outcome of a scenario run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioReport {
    sensitivities: PortfolioSensitivities,
    exposure: Exposure,
    results: Vec<ScenarioResult>,
}

impl ScenarioReport {
    /// Per-scenario results in catalogue order.
    pub fn results(&self) -> &[ScenarioResult] {
        &self.results
    }

    pub fn into_results(self) -> Vec<ScenarioResult> {
        self.results
    }

    pub fn sensitivities(&self) -> &PortfolioSensitivities {
        &self.sensitivities
    }

    pub fn exposure(&self) -> Exposure {
        self.exposure
    }

    /// Look up a scenario's result by name.
    pub fn get(&self, name: &str) -> Option<&ScenarioResult> {
        self.results.iter().find(|r| r.name == name)
    }

    /// The scenario with the lowest total P&L.
    pub fn worst(&self) -> Option<&ScenarioResult> {
        self.results.iter().min_by_key(|r| r.total_pnl)
    }
}

impl fmt::Display for ScenarioReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Scenario Results ({} exposure) ===", self.exposure)?;
        writeln!(
            f,
            "{:<15} {:>8} {:>8} {:>12} {:>12} {:>12}",
            "Scenario", "FX %", "Rate %", "FX P&L", "Bond P&L", "Total P&L"
        )?;
        for r in &self.results {
            writeln!(
                f,
                "{:<15} {:>8.2} {:>8.2} {:>12} {:>12} {:>12}",
                r.name, r.fx_move_pct, r.yield_move_pct, r.fx_pnl, r.bond_pnl, r.total_pnl
            )?;
        }
        Ok(())
    }
}

/// Applies named market moves to the portfolio's linear sensitivities.
///
/// Deterministic: the same portfolio and configuration always produce
/// identical results.
#[derive(Debug, Clone, Default)]
pub struct ScenarioEngine {
    config: ScenarioConfig,
}

impl ScenarioEngine {
    pub fn new(config: ScenarioConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    /// Run every configured scenario with the discounted-cash-flow pricer.
    pub fn run(&self, portfolio: &Portfolio) -> Result<ScenarioReport, RiskError> {
        self.run_with(&DiscountedCashFlow, portfolio)
    }

    pub fn run_with<P: InstrumentValuation + ?Sized>(
        &self,
        pricer: &P,
        portfolio: &Portfolio,
    ) -> Result<ScenarioReport, RiskError> {
        let sensitivities = portfolio_sensitivities(pricer, portfolio, &self.config.fx_grid)?;
        let model = LinearRiskModel::new(&sensitivities, self.config.exposure);
        debug!(
            "scenario run: {} scenarios, exposure={}, fx_delta={:.4}",
            self.config.scenarios.len(),
            self.config.exposure,
            model.fx_delta
        );

        let results = self
            .config
            .scenarios
            .iter()
            .map(|scenario| evaluate(&model, scenario))
            .collect::<Result<Vec<_>, RiskError>>()?;

        let report = ScenarioReport {
            sensitivities,
            exposure: self.config.exposure,
            results,
        };
        if let Some(worst) = report.worst() {
            info!(
                "scenario run complete: worst scenario {} at {}",
                worst.name, worst.total_pnl
            );
        }
        Ok(report)
    }
}

fn evaluate(
    model: &LinearRiskModel,
    scenario: &ScenarioDefinition,
) -> Result<ScenarioResult, RiskError> {
    let pnl = model.pnl(scenario.fx_move, scenario.yield_move);
    Ok(ScenarioResult {
        name: scenario.name.clone(),
        fx_move_pct: scenario.fx_move * 100.0,
        yield_move_pct: scenario.yield_move * 100.0,
        fx_pnl: to_money(pnl.fx, "scenario FX P&L")?,
        bond_pnl: to_money(pnl.bond, "scenario bond P&L")?,
        total_pnl: to_money(pnl.total, "scenario total P&L")?,
    })
}

/// Round a P&L figure to pennies for reporting.
fn to_money(value: f64, context: &'static str) -> Result<Decimal, RiskError> {
    if !value.is_finite() {
        return Err(RiskError::NonFinite { context });
    }
    Decimal::from_f64_retain(value)
        .map(|d| d.round_dp(2))
        .ok_or_else(|| {
            RiskError::invalid(
                context,
                format!("{:e} exceeds the range of a monetary amount", value),
            )
        })
}

/// Standard catalogue for a GBP position plus a 4%, 5-year bond.
///
/// # Examples
///
/// ```
/// use fx_bond_risk::scenario::engine::simulate_scenarios;
///
/// let results = simulate_scenarios(10_000.0, 1.25, 1_000.0, 0.05).unwrap();
/// assert_eq!(results.len(), 6);
/// assert_eq!(results[0].name, "Mild_Positive");
/// ```
pub fn simulate_scenarios(
    position: f64,
    base_fx_rate: f64,
    face_value: f64,
    base_yield: f64,
) -> Result<Vec<ScenarioResult>, RiskError> {
    let portfolio = Portfolio {
        fx_position: position,
        base_fx_rate,
        bond: BondHolding::standard(face_value),
        base_yield,
        ..Default::default()
    };
    Ok(ScenarioEngine::default().run(&portfolio)?.into_results())
}
