//! Sensitivity calculation: FX P&L curves, linear FX delta and bond DV01,
//! and the first-order P&L model both engines apply them through.

pub mod calculator;
pub mod curve;
pub mod linear;
