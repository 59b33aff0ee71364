use crate::core::error::{ensure_finite, RiskError};

/// `points` evenly spaced values from `start` to `end`, both inclusive.
pub fn linspace(start: f64, end: f64, points: usize) -> Result<Vec<f64>, RiskError> {
    ensure_finite("grid start", start)?;
    ensure_finite("grid end", end)?;
    if points < 2 {
        return Err(RiskError::invalid("grid points", format!("need at least 2, got {}", points)));
    }
    if end <= start {
        return Err(RiskError::invalid(
            "grid bounds",
            format!("end {} must exceed start {}", end, start),
        ));
    }
    let last = (points - 1) as f64;
    Ok((0..points)
        .map(|i| start + (end - start) * (i as f64) / last)
        .collect())
}

/// An odd number of points spaced evenly over `[-bound, bound]`.
///
/// Each point is computed as `bound * (k / half)` with integer `k`, so the
/// grid is exactly symmetric and its middle point is exactly zero.
pub fn symmetric_grid(bound: f64, points: usize) -> Result<Vec<f64>, RiskError> {
    ensure_finite("grid bound", bound)?;
    if bound <= 0.0 {
        return Err(RiskError::invalid("grid bound", format!("must be positive, got {}", bound)));
    }
    if points < 3 || points % 2 == 0 {
        return Err(RiskError::invalid(
            "grid points",
            format!("symmetric grid needs an odd count of at least 3, got {}", points),
        ));
    }
    let half = (points / 2) as i64;
    Ok((-half..=half)
        .map(|k| bound * ((k as f64) / (half as f64)))
        .collect())
}
