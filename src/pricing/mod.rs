//! Instrument valuation used as input to the sensitivity calculator.

pub mod bond;
