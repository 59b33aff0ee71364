use crate::core::currency::{CurrencyPair, FxQuote};
use crate::core::error::{ensure_finite, ensure_positive, RiskError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction in which the FX sensitivity curve is read.
///
/// `Long` takes the P&L curve as quoted: the base-currency value of the
/// converted notional, which falls as the base currency strengthens.
/// `Short` is the opposite book and negates the curve-derived delta.
///
/// Both engines take this explicitly so their FX P&L is only ever of
/// opposite sign when they are configured with opposite exposures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Exposure {
    Long,
    Short,
}

impl Exposure {
    pub fn sign(self) -> f64 {
        match self {
            Exposure::Long => 1.0,
            Exposure::Short => -1.0,
        }
    }

    /// Orient a curve-derived delta for this exposure.
    pub fn orient(self, curve_delta: f64) -> f64 {
        self.sign() * curve_delta
    }
}

impl fmt::Display for Exposure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exposure::Long => write!(f, "long"),
            Exposure::Short => write!(f, "short"),
        }
    }
}

/// Terms of a fixed-coupon bullet bond.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BondHolding {
    pub face_value: f64,
    /// Annual coupon rate as a decimal (0.04 = 4%).
    pub coupon_rate: f64,
    pub maturity_years: u32,
    /// Coupon payments per year.
    pub frequency: u32,
}

impl BondHolding {
    /// Coupon rate used by the portfolio-level sensitivity summary.
    pub const STANDARD_COUPON: f64 = 0.04;
    /// Maturity used by the portfolio-level sensitivity summary.
    pub const STANDARD_MATURITY: u32 = 5;

    pub fn new(face_value: f64, coupon_rate: f64, maturity_years: u32, frequency: u32) -> Self {
        Self {
            face_value,
            coupon_rate,
            maturity_years,
            frequency,
        }
    }

    /// A 4% annual-pay 5-year bond with the given face value.
    pub fn standard(face_value: f64) -> Self {
        Self::new(face_value, Self::STANDARD_COUPON, Self::STANDARD_MATURITY, 1)
    }

    /// Number of coupon periods to maturity.
    pub fn periods(&self) -> u32 {
        self.maturity_years * self.frequency
    }

    pub fn validate(&self) -> Result<(), RiskError> {
        ensure_positive("face_value", self.face_value)?;
        ensure_finite("coupon_rate", self.coupon_rate)?;
        if self.maturity_years == 0 {
            return Err(RiskError::invalid("maturity_years", "must be at least one year"));
        }
        if self.frequency == 0 {
            return Err(RiskError::invalid("frequency", "must pay at least once a year"));
        }
        Ok(())
    }
}

impl Default for BondHolding {
    fn default() -> Self {
        Self::standard(1_000.0)
    }
}

/// The two-asset book: an FX position funded in the base currency plus a bond.
///
/// # Examples
///
/// ```
/// use fx_bond_risk::core::portfolio::Portfolio;
///
/// let portfolio = Portfolio::default();
/// assert_eq!(portfolio.fx_position, 10_000.0);
/// assert_eq!(portfolio.base_fx_rate, 1.25);
/// assert!(portfolio.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Portfolio {
    pub pair: CurrencyPair,
    /// Position size in the base currency of `pair`.
    pub fx_position: f64,
    pub base_fx_rate: f64,
    pub bond: BondHolding,
    /// Yield the bond is discounted at, as a decimal.
    pub base_yield: f64,
}

impl Portfolio {
    pub fn fx_quote(&self) -> Result<FxQuote, RiskError> {
        FxQuote::new(self.pair.clone(), self.base_fx_rate)
    }

    pub fn validate(&self) -> Result<(), RiskError> {
        ensure_finite("fx_position", self.fx_position)?;
        self.fx_quote()?;
        self.bond.validate()?;
        validate_base_yield(self.base_yield)?;
        Ok(())
    }
}

impl Default for Portfolio {
    fn default() -> Self {
        Self {
            pair: CurrencyPair::gbp_usd(),
            fx_position: 10_000.0,
            base_fx_rate: 1.25,
            bond: BondHolding::default(),
            base_yield: 0.05,
        }
    }
}

/// A zero base yield is rejected at the risk boundary; DV01 is quoted
/// relative to it.
pub(crate) fn validate_base_yield(base_yield: f64) -> Result<f64, RiskError> {
    if base_yield == 0.0 {
        return Err(RiskError::DivisionByZero {
            context: "base yield",
        });
    }
    ensure_finite("base_yield", base_yield)
}
