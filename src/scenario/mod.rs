//! Deterministic stress testing over a catalogue of named market moves.

pub mod catalogue;
pub mod engine;
