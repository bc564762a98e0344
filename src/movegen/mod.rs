//! Legal move generation.
//!
//! Computes where a selected piece may go with the unused rolls and the
//! path it travels to get there. Both searches share one set of direction
//! rules, so every target found has a matching route.

pub mod route;
pub mod rules;
pub mod targets;

pub use route::{find_route, find_route_avoiding, Route};
pub use rules::{legal_next, may_enter, FinishRule};
pub use targets::{
    cheapest_scoring_target, cheapest_target, compute_targets, compute_targets_with, TargetNode,
};
