//! # fx-bond-risk
//!
//! Risk engine for a two-asset book: a GBP-funded USD position and a
//! fixed-coupon bond.
//!
//! Given the portfolio, the engine derives linear sensitivities (FX delta,
//! bond DV01) and applies them to deterministic stress scenarios and to
//! randomly sampled market shocks to estimate Value-at-Risk.
//!
//! ## Architecture
//!
//! - **core** — Currencies, FX quotes, the portfolio, grids and errors
//! - **pricing** — Discounted-cash-flow bond valuation and duration
//! - **sensitivity** — FX P&L curves, FX delta, DV01, linear P&L model
//! - **scenario** — Named stress scenarios and their P&L
//! - **simulation** — Monte Carlo VaR and FX rate random walks
//! - **config** — JSON-loadable run configuration

pub mod config;
pub mod core;
pub mod pricing;
pub mod scenario;
pub mod sensitivity;
pub mod simulation;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::config::RiskConfig;
    pub use crate::core::error::RiskError;
    pub use crate::core::portfolio::{BondHolding, Exposure, Portfolio};
    pub use crate::pricing::bond::{DiscountedCashFlow, InstrumentValuation};
    pub use crate::scenario::engine::{ScenarioEngine, ScenarioReport, ScenarioResult};
    pub use crate::sensitivity::calculator::{
        bond_dv01, fx_delta, portfolio_risk_summary, PortfolioSensitivities,
    };
    pub use crate::simulation::distribution::PnlDistribution;
    pub use crate::simulation::monte_carlo::{MonteCarloConfig, MonteCarloEngine, RiskSummary};
}
