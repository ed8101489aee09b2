//! scorepad engine library.
//!
//! Exposes the game model, placement rules, score resolution, and protocol
//! modules for use by integration tests and the binary entry point.

pub mod engine;
pub mod game;
pub mod protocol;
pub mod resolve;
pub mod rules;
