use crate::core::currency::{CurrencyPair, FxQuote};
use crate::core::error::{ensure_finite, RiskError};
use crate::core::grid::symmetric_grid;
use crate::core::portfolio::{validate_base_yield, BondHolding, Portfolio};
use crate::pricing::bond::{DiscountedCashFlow, InstrumentValuation};
use crate::sensitivity::curve::{CurvePoint, RiskFactor, SensitivityCurve, ShiftUnit};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One basis point, as a decimal yield move.
pub const BASIS_POINT: f64 = 0.0001;

/// FX move (in percent) the linear delta is read at: one step of the
/// default 21-point, ±5% grid.
pub const FX_DELTA_SHIFT_PCT: f64 = 0.5;

/// Yield moves the DV01 curve is evaluated over: ±1% in 21 points.
const DV01_CURVE_BOUND: f64 = 0.01;
const DV01_CURVE_POINTS: usize = 21;

/// Discount yield used when only the face value of the bond is given.
pub const DEFAULT_BASE_YIELD: f64 = 0.05;

/// Shape of the FX shock ladder: `points` fractional moves over `[-bound, bound]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FxGrid {
    pub points: usize,
    pub bound: f64,
}

impl Default for FxGrid {
    fn default() -> Self {
        Self {
            points: 21,
            bound: 0.05,
        }
    }
}

impl FxGrid {
    /// The fractional moves of the ladder, exactly symmetric around zero.
    pub fn moves(&self) -> Result<Vec<f64>, RiskError> {
        symmetric_grid(self.bound, self.points)
    }
}

/// FX delta and bond DV01 for a portfolio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSensitivities {
    /// FX P&L per grid step, as read off the curve (long exposure).
    pub fx_delta: f64,
    /// Bond price change per one basis point rise in yield.
    pub bond_dv01: f64,
}

impl fmt::Display for PortfolioSensitivities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Portfolio Sensitivities ===")?;
        writeln!(f, "FX delta (per +1%):   {:.2}", self.fx_delta)?;
        writeln!(f, "Bond DV01 (per 1bp):  {:.4}", self.bond_dv01)
    }
}

/// P&L curve of a GBP-funded USD position across the default ±5% FX grid.
///
/// # Examples
///
/// ```
/// use fx_bond_risk::sensitivity::calculator::fx_delta;
///
/// let curve = fx_delta(10_000.0, 1.25).unwrap();
/// assert_eq!(curve.len(), 21);
/// assert_eq!(curve.value_at(0.0).unwrap(), 0.0);
/// ```
pub fn fx_delta(position: f64, base_fx_rate: f64) -> Result<SensitivityCurve, RiskError> {
    let quote = FxQuote::new(CurrencyPair::gbp_usd(), base_fx_rate)?;
    fx_sensitivity_curve(position, &quote, &FxGrid::default())
}

/// P&L of `position` (in the quote's base currency, converted at `quote`)
/// revalued at each move of `grid`. Shifts are reported in percent.
pub fn fx_sensitivity_curve(
    position: f64,
    quote: &FxQuote,
    grid: &FxGrid,
) -> Result<SensitivityCurve, RiskError> {
    ensure_finite("position", position)?;
    let notional = quote.to_quote_currency(position);
    debug!(
        "fx curve: position={} {} notional={} {} rate={}",
        position,
        quote.pair().base,
        notional,
        quote.pair().quote,
        quote.rate()
    );

    let points = grid
        .moves()?
        .into_iter()
        .map(|m| {
            let shocked = quote.shocked(m)?;
            // notional / shocked == position * (base / shocked); the ratio form
            // keeps the zero-move point exact.
            let value = position * (quote.rate() / shocked.rate());
            Ok(CurvePoint {
                shift: m * 100.0,
                value: value - position,
            })
        })
        .collect::<Result<Vec<_>, RiskError>>()?;

    SensitivityCurve::new(RiskFactor::FxRate, ShiftUnit::Percent, points)
}

/// Linear FX delta: the curve's P&L change from 0% to +0.5%.
///
/// Fails with a grid-contract error if the curve does not span both shifts.
pub fn fx_linear_delta(curve: &SensitivityCurve) -> Result<f64, RiskError> {
    if curve.factor() != RiskFactor::FxRate || curve.unit() != ShiftUnit::Percent {
        return Err(RiskError::GridContract(format!(
            "FX delta needs an FX curve in percent, got {:?} in {}",
            curve.factor(),
            curve.unit()
        )));
    }
    curve.difference(0.0, FX_DELTA_SHIFT_PCT)
}

/// DV01 of a standard-frequency (annual) bond.
///
/// # Examples
///
/// ```
/// use fx_bond_risk::sensitivity::calculator::bond_dv01;
///
/// let dv01 = bond_dv01(1_000.0, 0.04, 5, 0.05).unwrap();
/// assert!(dv01 > 0.41 && dv01 < 0.43);
/// ```
pub fn bond_dv01(
    face_value: f64,
    coupon_rate: f64,
    maturity: u32,
    base_yield: f64,
) -> Result<f64, RiskError> {
    let bond = BondHolding::new(face_value, coupon_rate, maturity, 1);
    bond_dv01_with(&DiscountedCashFlow, &bond, base_yield)
}

/// `price(base_yield) - price(base_yield + 1bp)` under any pricer.
pub fn bond_dv01_with<P: InstrumentValuation + ?Sized>(
    pricer: &P,
    bond: &BondHolding,
    base_yield: f64,
) -> Result<f64, RiskError> {
    validate_base_yield(base_yield)?;
    finite_difference_dv01(pricer, bond, base_yield)
}

fn finite_difference_dv01<P: InstrumentValuation + ?Sized>(
    pricer: &P,
    bond: &BondHolding,
    market_rate: f64,
) -> Result<f64, RiskError> {
    let base = pricer.price(bond, market_rate)?;
    let bumped = pricer.price(bond, market_rate + BASIS_POINT)?;
    Ok(base - bumped)
}

/// DV01 re-evaluated at the base yield plus each of 21 moves over ±1%.
/// Shifts are reported in basis points.
pub fn dv01_curve<P: InstrumentValuation + ?Sized>(
    pricer: &P,
    bond: &BondHolding,
    base_yield: f64,
) -> Result<SensitivityCurve, RiskError> {
    validate_base_yield(base_yield)?;
    let points = symmetric_grid(DV01_CURVE_BOUND, DV01_CURVE_POINTS)?
        .into_iter()
        .map(|m| {
            Ok(CurvePoint {
                shift: m / BASIS_POINT,
                value: finite_difference_dv01(pricer, bond, base_yield + m)?,
            })
        })
        .collect::<Result<Vec<_>, RiskError>>()?;
    SensitivityCurve::new(RiskFactor::Yield, ShiftUnit::BasisPoints, points)
}

/// FX delta and DV01 for a GBP position plus a standard 4%, 5-year bond.
pub fn portfolio_risk_summary(
    position: f64,
    base_fx_rate: f64,
    face_value: f64,
) -> Result<PortfolioSensitivities, RiskError> {
    let portfolio = Portfolio {
        fx_position: position,
        base_fx_rate,
        bond: BondHolding::standard(face_value),
        base_yield: DEFAULT_BASE_YIELD,
        ..Default::default()
    };
    portfolio_sensitivities(&DiscountedCashFlow, &portfolio, &FxGrid::default())
}

/// Sensitivities of a full portfolio description, shared by both engines.
pub fn portfolio_sensitivities<P: InstrumentValuation + ?Sized>(
    pricer: &P,
    portfolio: &Portfolio,
    grid: &FxGrid,
) -> Result<PortfolioSensitivities, RiskError> {
    portfolio.validate()?;
    let curve = fx_sensitivity_curve(portfolio.fx_position, &portfolio.fx_quote()?, grid)?;
    let fx_delta = fx_linear_delta(&curve)?;
    let bond_dv01 = bond_dv01_with(pricer, &portfolio.bond, portfolio.base_yield)?;
    debug!("sensitivities: fx_delta={:.4} dv01={:.6}", fx_delta, bond_dv01);
    Ok(PortfolioSensitivities {
        fx_delta,
        bond_dv01,
    })
}
