use crate::core::portfolio::Exposure;
use crate::sensitivity::calculator::PortfolioSensitivities;
use serde::{Deserialize, Serialize};

/// P&L of one market move, split by asset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PnlBreakdown {
    pub fx: f64,
    pub bond: f64,
    pub total: f64,
}

/// First-order P&L model: deltas fixed at the base state and applied to
/// every move of a run without revaluation.
///
/// # Examples
///
/// ```
/// use fx_bond_risk::core::portfolio::Exposure;
/// use fx_bond_risk::sensitivity::calculator::PortfolioSensitivities;
/// use fx_bond_risk::sensitivity::linear::LinearRiskModel;
///
/// let sens = PortfolioSensitivities { fx_delta: -50.0, bond_dv01: 0.4 };
/// let model = LinearRiskModel::new(&sens, Exposure::Long);
/// let pnl = model.pnl(0.01, 0.002);
/// assert_eq!(pnl.fx, -50.0);
/// assert!(pnl.bond < 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearRiskModel {
    /// FX delta per 1% move, oriented by the book's exposure.
    pub fx_delta: f64,
    /// Price change per 1bp rise in yield.
    pub dv01: f64,
    pub exposure: Exposure,
}

impl LinearRiskModel {
    pub fn new(sensitivities: &PortfolioSensitivities, exposure: Exposure) -> Self {
        Self {
            fx_delta: exposure.orient(sensitivities.fx_delta),
            dv01: sensitivities.bond_dv01,
            exposure,
        }
    }

    /// P&L for fractional moves: `fx_move` of the FX rate, `yield_move` of the yield.
    ///
    /// The FX move is rescaled to percent and the yield move to basis
    /// points; rising yields on a positive DV01 lose money.
    pub fn pnl(&self, fx_move: f64, yield_move: f64) -> PnlBreakdown {
        let fx = self.fx_delta * (fx_move * 100.0);
        let bond = -self.dv01 * (yield_move * 10_000.0);
        PnlBreakdown {
            fx,
            bond,
            total: fx + bond,
        }
    }
}
