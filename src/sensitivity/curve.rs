use crate::core::error::RiskError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The market factor a curve was produced by shocking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactor {
    FxRate,
    Yield,
}

/// Units the curve's shifts are expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftUnit {
    Percent,
    BasisPoints,
}

impl fmt::Display for ShiftUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShiftUnit::Percent => write!(f, "%"),
            ShiftUnit::BasisPoints => write!(f, "bp"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Shift applied to the factor, in the curve's [`ShiftUnit`].
    pub shift: f64,
    /// Resulting P&L (or sensitivity) relative to the unshifted state.
    pub value: f64,
}

/// Values of one risk factor's shock ladder, ordered by shift.
///
/// Shifts are strictly increasing. Lookups go through [`value_at`], which
/// interpolates linearly between neighbouring points, so callers never
/// depend on where a shift sits in the ladder.
///
/// [`value_at`]: SensitivityCurve::value_at
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSensitivityCurve")]
pub struct SensitivityCurve {
    factor: RiskFactor,
    unit: ShiftUnit,
    points: Vec<CurvePoint>,
}

/// Unvalidated wire form; deserialisation goes through [`SensitivityCurve::new`].
#[derive(Deserialize)]
struct RawSensitivityCurve {
    factor: RiskFactor,
    unit: ShiftUnit,
    points: Vec<CurvePoint>,
}

impl TryFrom<RawSensitivityCurve> for SensitivityCurve {
    type Error = RiskError;

    fn try_from(raw: RawSensitivityCurve) -> Result<Self, Self::Error> {
        Self::new(raw.factor, raw.unit, raw.points)
    }
}

/// Relative tolerance for treating a queried shift as landing on a grid point.
const SHIFT_TOLERANCE: f64 = 1e-9;

impl SensitivityCurve {
    pub fn new(
        factor: RiskFactor,
        unit: ShiftUnit,
        points: Vec<CurvePoint>,
    ) -> Result<Self, RiskError> {
        if points.is_empty() {
            return Err(RiskError::GridContract("curve has no points".to_string()));
        }
        if let Some(bad) = points
            .iter()
            .find(|p| !p.shift.is_finite() || !p.value.is_finite())
        {
            let context = if bad.shift.is_finite() {
                "sensitivity curve value"
            } else {
                "sensitivity curve shift"
            };
            return Err(RiskError::NonFinite { context });
        }
        if let Some(w) = points.windows(2).find(|w| w[1].shift <= w[0].shift) {
            return Err(RiskError::GridContract(format!(
                "shifts must be strictly increasing, found {} after {}",
                w[1].shift, w[0].shift
            )));
        }
        Ok(Self {
            factor,
            unit,
            points,
        })
    }

    pub fn factor(&self) -> RiskFactor {
        self.factor
    }

    pub fn unit(&self) -> ShiftUnit {
        self.unit
    }

    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn shifts(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.shift)
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.value)
    }

    /// Whether the shift ladder mirrors itself around zero.
    pub fn is_symmetric(&self) -> bool {
        let n = self.points.len();
        (0..n).all(|i| {
            let a = self.points[i].shift;
            let b = -self.points[n - 1 - i].shift;
            close(a, b)
        })
    }

    /// The curve's value at `shift`, linearly interpolated between points.
    ///
    /// A shift that lands on a grid point (to within rounding) returns that
    /// point's value unchanged. Shifts outside the curve are a
    /// [`RiskError::GridContract`] violation; the curve never extrapolates.
    pub fn value_at(&self, shift: f64) -> Result<f64, RiskError> {
        let first = self.points[0];
        let last = self.points[self.points.len() - 1];
        let below = shift < first.shift && !close(shift, first.shift);
        let above = shift > last.shift && !close(shift, last.shift);
        if !shift.is_finite() || below || above {
            return Err(RiskError::GridContract(format!(
                "{:?} curve covers [{}{unit}, {}{unit}], cannot evaluate at {}{unit}",
                self.factor,
                first.shift,
                last.shift,
                shift,
                unit = self.unit
            )));
        }

        let idx = self.points.partition_point(|p| p.shift < shift);
        if idx < self.points.len() && close(self.points[idx].shift, shift) {
            return Ok(self.points[idx].value);
        }
        if idx > 0 && close(self.points[idx - 1].shift, shift) {
            return Ok(self.points[idx - 1].value);
        }
        if idx == 0 || idx == self.points.len() {
            // Only reachable for a shift within tolerance of an end point.
            let end = if idx == 0 { first } else { last };
            return Ok(end.value);
        }

        let lo = self.points[idx - 1];
        let hi = self.points[idx];
        let weight = (shift - lo.shift) / (hi.shift - lo.shift);
        Ok(lo.value + weight * (hi.value - lo.value))
    }

    /// Change in value between two shifts: a finite-difference sensitivity.
    pub fn difference(&self, from: f64, to: f64) -> Result<f64, RiskError> {
        Ok(self.value_at(to)? - self.value_at(from)?)
    }
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= SHIFT_TOLERANCE * a.abs().max(b.abs()).max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve(points: &[(f64, f64)]) -> SensitivityCurve {
        SensitivityCurve::new(
            RiskFactor::FxRate,
            ShiftUnit::Percent,
            points
                .iter()
                .map(|&(shift, value)| CurvePoint { shift, value })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_exact_grid_point() {
        let c = curve(&[(-1.0, 10.0), (0.0, 0.0), (1.0, -9.0)]);
        assert_eq!(c.value_at(1.0).unwrap(), -9.0);
        assert_eq!(c.value_at(0.0).unwrap(), 0.0);
    }

    #[test]
    fn test_grid_point_within_rounding() {
        let c = curve(&[(0.0, 0.0), (0.5000000000000001, -49.75)]);
        assert_eq!(c.value_at(0.5).unwrap(), -49.75);
    }

    #[test]
    fn test_interpolates_between_points() {
        let c = curve(&[(0.0, 0.0), (1.0, -10.0)]);
        assert_eq!(c.value_at(0.25).unwrap(), -2.5);
    }

    #[test]
    fn test_out_of_range_is_contract_violation() {
        let c = curve(&[(-0.4, 4.0), (0.0, 0.0), (0.4, -4.0)]);
        assert!(matches!(c.value_at(0.5), Err(RiskError::GridContract(_))));
        assert!(matches!(c.value_at(-0.41), Err(RiskError::GridContract(_))));
    }

    #[test]
    fn test_rejects_unordered_shifts() {
        let result = SensitivityCurve::new(
            RiskFactor::Yield,
            ShiftUnit::BasisPoints,
            vec![
                CurvePoint { shift: 1.0, value: 0.0 },
                CurvePoint { shift: 1.0, value: 1.0 },
            ],
        );
        assert!(matches!(result, Err(RiskError::GridContract(_))));
    }

    #[test]
    fn test_rejects_nan_value() {
        let result = SensitivityCurve::new(
            RiskFactor::Yield,
            ShiftUnit::BasisPoints,
            vec![CurvePoint { shift: 0.0, value: f64::NAN }],
        );
        assert!(matches!(result, Err(RiskError::NonFinite { .. })));
    }

    #[test]
    fn test_symmetry() {
        assert!(curve(&[(-1.0, 1.0), (0.0, 0.0), (1.0, -1.0)]).is_symmetric());
        assert!(!curve(&[(-1.0, 1.0), (0.0, 0.0), (2.0, -1.0)]).is_symmetric());
    }

    #[test]
    fn test_deserialise_validates() {
        let empty = serde_json::from_str::<SensitivityCurve>(
            r#"{ "factor": "fx_rate", "unit": "percent", "points": [] }"#,
        );
        assert!(empty.is_err());

        let descending = serde_json::from_str::<SensitivityCurve>(
            r#"{ "factor": "fx_rate", "unit": "percent", "points": [
                { "shift": 1.0, "value": -10.0 },
                { "shift": 0.0, "value": 0.0 },
                { "shift": -1.0, "value": 10.0 }
            ] }"#,
        );
        assert!(descending.is_err());

        let original = curve(&[(-1.0, 10.0), (0.0, 0.0), (1.0, -9.0)]);
        let json = serde_json::to_string(&original).unwrap();
        let restored: SensitivityCurve = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, original);
    }

    #[test]
    fn test_difference() {
        let c = curve(&[(0.0, 0.0), (0.5, -49.75), (1.0, -99.0)]);
        assert_eq!(c.difference(0.0, 0.5).unwrap(), -49.75);
    }
}
