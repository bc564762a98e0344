//! Move resolution.
//!
//! Applies a chosen move to a game in progress: consumes the roll, settles
//! captures, piggybacks and scoring on the ledger, and advances the turn.

pub mod game;

pub use game::{Choice, Effect, Game, MoveError, MoveOutcome, Phase, Selection, Turn};
