use serde::{Deserialize, Serialize};

/// A named hypothetical market state.
///
/// Moves are fractional: `fx_move = 0.01` is a 1% rise in the FX rate,
/// `yield_move = -0.002` a 20bp fall in yield.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioDefinition {
    pub name: String,
    pub fx_move: f64,
    pub yield_move: f64,
}

impl ScenarioDefinition {
    pub fn new(name: impl Into<String>, fx_move: f64, yield_move: f64) -> Self {
        Self {
            name: name.into(),
            fx_move,
            yield_move,
        }
    }

    /// The same scenario with both moves multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            name: format!("{}x{}", self.name, factor),
            fx_move: self.fx_move * factor,
            yield_move: self.yield_move * factor,
        }
    }
}

/// The six standard stress points, in reporting order.
///
/// A rising FX rate (GBP strengthening) is paired with falling yields and
/// vice versa.
pub fn standard_catalogue() -> Vec<ScenarioDefinition> {
    vec![
        ScenarioDefinition::new("Mild_Positive", 0.01, -0.002),
        ScenarioDefinition::new("Mild_Negative", -0.01, 0.002),
        ScenarioDefinition::new("Moderate_Pos", 0.05, -0.005),
        ScenarioDefinition::new("Moderate_Neg", -0.05, 0.005),
        ScenarioDefinition::new("Severe_Pos", 0.10, -0.02),
        ScenarioDefinition::new("Severe_Neg", -0.10, 0.02),
    ]
}
