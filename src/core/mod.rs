//! Foundational types: currencies and FX quotes, the portfolio, grids and errors.

pub mod currency;
pub mod error;
pub mod grid;
pub mod portfolio;
