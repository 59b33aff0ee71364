use crate::core::error::RiskError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// ISO 4217-style currency code.
///
/// # Examples
///
/// ```
/// use fx_bond_risk::core::currency::CurrencyCode;
///
/// let gbp = CurrencyCode::new("GBP");
/// let usd = CurrencyCode::new("USD");
/// assert_ne!(gbp, usd);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CurrencyCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// A pair of currencies representing an exchange rate direction.
///
/// A rate quoted on `GBP/USD` is the number of USD per one GBP.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurrencyPair {
    pub base: CurrencyCode,
    pub quote: CurrencyCode,
}

impl CurrencyPair {
    pub fn new(base: CurrencyCode, quote: CurrencyCode) -> Self {
        Self { base, quote }
    }

    /// GBP/USD, the pair the portfolio is funded and valued in.
    pub fn gbp_usd() -> Self {
        Self::new(CurrencyCode::new("GBP"), CurrencyCode::new("USD"))
    }
}

impl Default for CurrencyPair {
    fn default() -> Self {
        Self::gbp_usd()
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

/// A validated exchange rate: 1 unit of `pair.base` = `rate` units of `pair.quote`.
///
/// A zero rate is rejected as a division-by-zero condition, since every
/// conversion back into the base currency divides by it.
///
/// # Examples
///
/// ```
/// use fx_bond_risk::core::currency::{CurrencyPair, FxQuote};
///
/// let quote = FxQuote::new(CurrencyPair::gbp_usd(), 1.25).unwrap();
/// assert_eq!(quote.to_quote_currency(10_000.0), 12_500.0);
/// assert_eq!(quote.to_base_currency(12_500.0), 10_000.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FxQuote {
    pair: CurrencyPair,
    rate: f64,
}

impl FxQuote {
    pub fn new(pair: CurrencyPair, rate: f64) -> Result<Self, RiskError> {
        if rate == 0.0 {
            return Err(RiskError::DivisionByZero {
                context: "fx rate",
            });
        }
        if !rate.is_finite() || rate < 0.0 {
            return Err(RiskError::invalid(
                "base_fx_rate",
                format!("FX rate must be positive and finite, got {} for {}", rate, pair),
            ));
        }
        Ok(Self { pair, rate })
    }

    pub fn pair(&self) -> &CurrencyPair {
        &self.pair
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// The quote after a fractional move, e.g. `0.01` for a 1% rise.
    pub fn shocked(&self, fractional_move: f64) -> Result<Self, RiskError> {
        Self::new(self.pair.clone(), self.rate * (1.0 + fractional_move))
    }

    /// Convert an amount of base currency into quote currency.
    pub fn to_quote_currency(&self, base_amount: f64) -> f64 {
        base_amount * self.rate
    }

    /// Convert an amount of quote currency into base currency.
    pub fn to_base_currency(&self, quote_amount: f64) -> f64 {
        quote_amount / self.rate
    }
}

impl fmt::Display for FxQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:.5}", self.pair, self.rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_currency_code_equality() {
        let a = CurrencyCode::new("GBP");
        let b = CurrencyCode::new("GBP");
        assert_eq!(a, b);
    }

    #[test]
    fn test_pair_display() {
        assert_eq!(CurrencyPair::gbp_usd().to_string(), "GBP/USD");
    }

    #[test]
    fn test_round_trip_conversion() {
        let quote = FxQuote::new(CurrencyPair::gbp_usd(), 1.25).unwrap();
        let usd = quote.to_quote_currency(10_000.0);
        assert_eq!(usd, 12_500.0);
        assert_eq!(quote.to_base_currency(usd), 10_000.0);
    }

    #[test]
    fn test_shocked_quote() {
        let quote = FxQuote::new(CurrencyPair::gbp_usd(), 1.25).unwrap();
        let up = quote.shocked(0.10).unwrap();
        assert_relative_eq!(up.rate(), 1.375, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_rate_is_division_by_zero() {
        let result = FxQuote::new(CurrencyPair::gbp_usd(), 0.0);
        assert!(matches!(result, Err(RiskError::DivisionByZero { .. })));
    }

    #[test]
    fn test_negative_rate_rejected() {
        let result = FxQuote::new(CurrencyPair::gbp_usd(), -1.25);
        assert!(matches!(result, Err(RiskError::InvalidParameter { .. })));
    }

    #[test]
    fn test_full_depreciation_shock_rejected() {
        let quote = FxQuote::new(CurrencyPair::gbp_usd(), 1.25).unwrap();
        assert!(quote.shocked(-1.0).is_err());
    }
}
