//! Text protocol handling.
//!
//! Parsing and formatting for the line-oriented engine protocol: the
//! command parser for the main loop and the compact notation used for
//! selections, targets, routes and game state.

pub mod notation;
pub mod parser;

pub use notation::{
    format_outcome, format_route, format_selection, format_state, format_target, format_targets,
    parse_position, parse_roll, parse_selection, NotationError,
};
pub use parser::{parse_command, Command};
