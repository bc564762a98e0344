//! Direction rules shared by target generation and routing.
//!
//! Every filter is evaluated against the station the piece stood on when the
//! roll started (its origin), not the station currently being expanded.
//! Together they make a piece follow exactly one line through the board:
//!
//! - Pieces starting on the perimeter stay on the perimeter.
//! - Pieces starting on a top hub leave it through the diagonal.
//! - A diagonal crossed through the center is crossed in a straight line:
//!   the top-right diagonal continues to the bottom-left one, the top-left
//!   diagonal to the bottom-right one.
//! - Pieces starting on the center take the bottom-right diagonal home.

use serde::{Deserialize, Serialize};

use crate::board::{next, Position};

/// How arrivals at the finishing hub are scored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FinishRule {
    /// A piece landing exactly on the hub waits there; passing it scores.
    #[default]
    Pass,
    /// Any arrival at the hub scores.
    Reach,
    /// Only an exact landing scores; a roll that would overshoot goes nowhere.
    Exact,
}

impl FinishRule {
    /// True if landing with no steps left finishes the piece.
    pub const fn scores_on_landing(self) -> bool {
        matches!(self, FinishRule::Reach | FinishRule::Exact)
    }

    /// True if reaching the hub with steps left finishes the piece.
    pub const fn scores_on_passing(self) -> bool {
        matches!(self, FinishRule::Pass | FinishRule::Reach)
    }

    pub const fn name(self) -> &'static str {
        match self {
            FinishRule::Pass => "pass",
            FinishRule::Reach => "reach",
            FinishRule::Exact => "exact",
        }
    }

    pub fn from_name(s: &str) -> Option<FinishRule> {
        match s {
            "pass" => Some(FinishRule::Pass),
            "reach" => Some(FinishRule::Reach),
            "exact" => Some(FinishRule::Exact),
            _ => None,
        }
    }
}

/// Returns whether a piece whose roll started at `origin` may step onto `to`.
pub fn may_enter(to: Position, origin: Position) -> bool {
    // Shortcuts open only to pieces starting on them or on a top hub.
    if to.is_inner() && !(origin.is_inner() || origin.is_top_hub()) {
        return false;
    }
    // A roll started on a top hub never continues along the perimeter.
    if origin.is_top_hub() && to.is_perimeter() {
        return false;
    }
    if (origin == Position::TopRight || origin.is_top_right_diagonal())
        && to.is_bottom_right_diagonal()
    {
        return false;
    }
    if (origin == Position::TopLeft || origin.is_top_left_diagonal())
        && to.is_bottom_left_diagonal()
    {
        return false;
    }
    if origin.is_center() && to.is_bottom_left_diagonal() {
        return false;
    }
    true
}

/// Iterates over the stations a piece may step to from `current`, for a roll
/// that started at `origin`.
pub fn legal_next(current: Position, origin: Position) -> impl Iterator<Item = Position> {
    next(current)
        .iter()
        .copied()
        .filter(move |to| may_enter(*to, origin))
}
