//! Run configuration.
//!
//! Every section has defaults matching the reference book (10,000 GBP
//! funding a USD position at 1.25, a 1,000 face 4% 5-year bond at 5%), so a
//! configuration file only needs the fields it changes:
//!
//! ```json
//! {
//!   "portfolio": { "fx_position": 25000, "base_yield": 0.045 },
//!   "monte_carlo": { "n_sims": 100000, "confidence": 0.99, "seed": 7 }
//! }
//! ```

use crate::core::error::{ensure_finite, RiskError};
use crate::core::portfolio::Portfolio;
use crate::scenario::engine::ScenarioConfig;
use crate::simulation::fx_path::FxPathConfig;
use crate::simulation::monte_carlo::MonteCarloConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    pub portfolio: Portfolio,
    pub scenarios: ScenarioConfig,
    pub monte_carlo: MonteCarloConfig,
    pub fx_path: FxPathConfig,
}

impl RiskConfig {
    /// Parse and validate a JSON configuration document.
    pub fn from_json_str(json: &str) -> Result<Self, RiskError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RiskError> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn validate(&self) -> Result<(), RiskError> {
        self.portfolio.validate()?;
        self.monte_carlo.validate()?;
        for scenario in &self.scenarios.scenarios {
            ensure_finite("scenario fx_move", scenario.fx_move)?;
            ensure_finite("scenario yield_move", scenario.yield_move)?;
        }
        self.scenarios.fx_grid.moves()?;
        Ok(())
    }
}
