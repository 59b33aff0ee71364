use thiserror::Error;

/// Errors raised by the risk engine.
///
/// Every operation validates its inputs at the boundary and returns one of
/// these instead of letting NaN or infinity flow into aggregation.
#[derive(Debug, Error)]
pub enum RiskError {
    /// A parameter violated its precondition (zero simulations, non-positive
    /// volatility, confidence outside (0, 1), malformed grid, ...).
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// A sensitivity curve cannot support delta extraction.
    #[error("sensitivity grid contract violated: {0}")]
    GridContract(String),

    #[error("division by zero in {context}")]
    DivisionByZero { context: &'static str },

    /// A computation produced NaN or an infinite value.
    #[error("non-finite result in {context}")]
    NonFinite { context: &'static str },

    /// A configuration document could not be read.
    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("could not read configuration: {0}")]
    Io(#[from] std::io::Error),
}

impl RiskError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Reject NaN and infinite inputs.
pub(crate) fn ensure_finite(name: &'static str, value: f64) -> Result<f64, RiskError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(RiskError::invalid(name, format!("must be finite, got {}", value)))
    }
}

/// Reject values that are not strictly positive and finite.
pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<f64, RiskError> {
    let value = ensure_finite(name, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(RiskError::invalid(name, format!("must be positive, got {}", value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_names_parameter() {
        let err = ensure_positive("fx_vol", -0.01).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("fx_vol"), "message was: {}", msg);
    }

    #[test]
    fn test_nan_rejected() {
        assert!(ensure_finite("position", f64::NAN).is_err());
        assert!(ensure_finite("position", f64::INFINITY).is_err());
        assert_eq!(ensure_finite("position", -3.0).unwrap(), -3.0);
    }

    #[test]
    fn test_zero_is_not_positive() {
        assert!(matches!(
            ensure_positive("rate_vol", 0.0),
            Err(RiskError::InvalidParameter { name: "rate_vol", .. })
        ));
    }
}
