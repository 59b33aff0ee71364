//! Randomised risk: Monte Carlo VaR over sampled market shocks and
//! FX rate random walks.

pub mod distribution;
pub mod fx_path;
pub mod monte_carlo;
pub mod shocks;
