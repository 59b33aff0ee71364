//! Discounted-cash-flow pricing for fixed-coupon bullet bonds.
//!
//! The risk engine only needs a present value for a bond at a given market
//! rate; [`InstrumentValuation`] is that seam. Duration analytics and the
//! price-vs-rate curve are built on the same cash-flow schedule.

use crate::core::error::{ensure_finite, RiskError};
use crate::core::grid::linspace;
use crate::core::portfolio::BondHolding;
use serde::{Deserialize, Serialize};

/// Anything that can put a present value on a bond at a flat market rate.
pub trait InstrumentValuation {
    fn price(&self, bond: &BondHolding, market_rate: f64) -> Result<f64, RiskError>;
}

/// Flat-rate discounting of every coupon and the final redemption.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscountedCashFlow;

impl InstrumentValuation for DiscountedCashFlow {
    fn price(&self, bond: &BondHolding, market_rate: f64) -> Result<f64, RiskError> {
        price_bond(
            bond.face_value,
            bond.coupon_rate,
            bond.maturity_years,
            market_rate,
            bond.frequency,
        )
    }
}

/// Present value of a fixed-coupon bond.
///
/// # Examples
///
/// ```
/// use fx_bond_risk::pricing::bond::price_bond;
///
/// let pv = price_bond(1_000.0, 0.04, 5, 0.05, 1).unwrap();
/// assert!((pv - 956.71).abs() < 0.01);
/// ```
pub fn price_bond(
    face_value: f64,
    coupon_rate: f64,
    maturity_years: u32,
    market_rate: f64,
    frequency: u32,
) -> Result<f64, RiskError> {
    let bond = BondHolding::new(face_value, coupon_rate, maturity_years, frequency);
    let schedule = CashFlowSchedule::build(&bond, market_rate)?;
    let price = schedule.present_value();
    if !price.is_finite() {
        return Err(RiskError::NonFinite {
            context: "bond present value",
        });
    }
    Ok(price)
}

/// Macaulay duration in years.
pub fn macaulay_duration(bond: &BondHolding, market_rate: f64) -> Result<f64, RiskError> {
    let schedule = CashFlowSchedule::build(bond, market_rate)?;
    let pv = schedule.present_value();
    if pv == 0.0 {
        return Err(RiskError::DivisionByZero {
            context: "duration weighting",
        });
    }
    let weighted: f64 = schedule
        .flows
        .iter()
        .map(|flow| flow.period as f64 * flow.present_value())
        .sum();
    Ok(weighted / pv / bond.frequency as f64)
}

/// Modified duration: Macaulay duration over one period's growth factor.
pub fn modified_duration(bond: &BondHolding, market_rate: f64) -> Result<f64, RiskError> {
    let macaulay = macaulay_duration(bond, market_rate)?;
    Ok(macaulay / discount_base(market_rate, bond.frequency)?)
}

/// A point on the price-vs-rate curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub market_rate: f64,
    pub price: f64,
}

/// Price the bond across `points` evenly spaced market rates.
pub fn rate_sensitivity<P: InstrumentValuation + ?Sized>(
    pricer: &P,
    bond: &BondHolding,
    from_rate: f64,
    to_rate: f64,
    points: usize,
) -> Result<Vec<PricePoint>, RiskError> {
    linspace(from_rate, to_rate, points)?
        .into_iter()
        .map(|market_rate| {
            Ok(PricePoint {
                market_rate,
                price: pricer.price(bond, market_rate)?,
            })
        })
        .collect()
}

struct CashFlow {
    period: u32,
    amount: f64,
    discount_factor: f64,
}

impl CashFlow {
    fn present_value(&self) -> f64 {
        self.amount * self.discount_factor
    }
}

struct CashFlowSchedule {
    flows: Vec<CashFlow>,
}

impl CashFlowSchedule {
    fn build(bond: &BondHolding, market_rate: f64) -> Result<Self, RiskError> {
        bond.validate()?;
        ensure_finite("market_rate", market_rate)?;
        let base = discount_base(market_rate, bond.frequency)?;

        let coupon = bond.face_value * bond.coupon_rate / bond.frequency as f64;
        let periods = bond.periods();
        let flows = (1..=periods)
            .map(|t| {
                let redemption = if t == periods { bond.face_value } else { 0.0 };
                CashFlow {
                    period: t,
                    amount: coupon + redemption,
                    discount_factor: 1.0 / base.powi(t as i32),
                }
            })
            .collect();
        Ok(Self { flows })
    }

    fn present_value(&self) -> f64 {
        self.flows.iter().map(CashFlow::present_value).sum()
    }
}

/// One period's growth factor `1 + r / f`.
fn discount_base(market_rate: f64, frequency: u32) -> Result<f64, RiskError> {
    let base = 1.0 + market_rate / frequency as f64;
    if base == 0.0 {
        return Err(RiskError::DivisionByZero {
            context: "discount factor",
        });
    }
    if base < 0.0 {
        return Err(RiskError::invalid(
            "market_rate",
            format!("rate {} per {} periods gives a negative discount base", market_rate, frequency),
        ));
    }
    Ok(base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_reference_price() {
        let pv = price_bond(1_000.0, 0.04, 5, 0.05, 1).unwrap();
        assert_relative_eq!(pv, 956.705, epsilon = 1e-3);
    }

    #[test]
    fn test_par_bond_prices_at_face() {
        let pv = price_bond(1_000.0, 0.05, 10, 0.05, 2).unwrap();
        assert_relative_eq!(pv, 1_000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_rate_sums_cash_flows() {
        let pv = price_bond(1_000.0, 0.04, 5, 0.0, 1).unwrap();
        assert_relative_eq!(pv, 1_200.0, epsilon = 1e-9);
    }

    #[test]
    fn test_discount_base_zero() {
        let result = price_bond(1_000.0, 0.04, 5, -1.0, 1);
        assert!(matches!(result, Err(RiskError::DivisionByZero { .. })));
    }

    #[test]
    fn test_discount_base_negative() {
        let result = price_bond(1_000.0, 0.04, 5, -1.5, 1);
        assert!(matches!(result, Err(RiskError::InvalidParameter { .. })));
    }

    #[test]
    fn test_trait_matches_free_function() {
        let bond = BondHolding::standard(1_000.0);
        let via_trait = DiscountedCashFlow.price(&bond, 0.05).unwrap();
        let direct = price_bond(1_000.0, 0.04, 5, 0.05, 1).unwrap();
        assert_eq!(via_trait, direct);
    }

    #[test]
    fn test_durations() {
        let bond = BondHolding::standard(1_000.0);
        let macaulay = macaulay_duration(&bond, 0.05).unwrap();
        let modified = modified_duration(&bond, 0.05).unwrap();
        assert_relative_eq!(macaulay, 4.6204, epsilon = 1e-3);
        assert_relative_eq!(modified, macaulay / 1.05, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_coupon_duration_is_maturity() {
        let bond = BondHolding::new(1_000.0, 0.0, 7, 1);
        assert_relative_eq!(macaulay_duration(&bond, 0.03).unwrap(), 7.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rate_sensitivity_is_decreasing() {
        let bond = BondHolding::standard(1_000.0);
        let curve = rate_sensitivity(&DiscountedCashFlow, &bond, 0.01, 0.05, 50).unwrap();
        assert_eq!(curve.len(), 50);
        assert!(curve.windows(2).all(|w| w[1].price < w[0].price));
        assert_relative_eq!(curve[49].price, 956.705, epsilon = 1e-3);
    }
}
