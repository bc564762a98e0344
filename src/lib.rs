//! Yutnori movement engine library.
//!
//! Exposes the board graph, move generation, move resolution, rule
//! configuration and protocol modules for use by integration tests and the
//! binary entry points.

pub mod board;
pub mod config;
pub mod engine;
pub mod movegen;
pub mod protocol;
pub mod resolve;
pub mod selfplay;
