//! Reachable destinations for a selected piece and a set of unused rolls.
//!
//! For each roll the search walks exactly `roll.steps()` edges from the
//! origin, branching wherever the direction rules leave more than one exit,
//! and records every station reached with no steps left. The finishing hub
//! ends a walk early: reaching it with steps to spare is a scoring move.

use std::collections::BTreeSet;

use crate::board::{Position, Roll, FINISH};

use super::rules::{legal_next, FinishRule};

/// A destination the selected piece can reach with one of the unused rolls.
///
/// Equality, hashing and ordering consider only `(position, roll)`.
#[derive(Debug, Clone, Copy)]
pub struct TargetNode {
    pub position: Position,
    pub roll: Roll,
    /// True if taking this target finishes the piece.
    pub scoring: bool,
}

impl TargetNode {
    fn key(&self) -> (Position, Roll) {
        (self.position, self.roll)
    }
}

impl PartialEq for TargetNode {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for TargetNode {}

impl std::hash::Hash for TargetNode {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for TargetNode {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TargetNode {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key().cmp(&other.key())
    }
}

/// Fixed inputs of one roll's walk.
#[derive(Debug, Clone, Copy)]
struct Walk {
    origin: Position,
    roll: Roll,
    /// The piece comes from the reserve rather than standing on `origin`.
    entering: bool,
    finish: FinishRule,
}

/// Computes every destination reachable from `origin` with one of `rolls`,
/// scoring arrivals at the finishing hub under the traditional rule.
///
/// `origin = None` places a new piece, which starts from the finishing hub.
pub fn compute_targets(origin: Option<Position>, rolls: &[Roll]) -> BTreeSet<TargetNode> {
    compute_targets_with(origin, rolls, FinishRule::default())
}

/// Computes every destination reachable from `origin` with one of `rolls`.
pub fn compute_targets_with(
    origin: Option<Position>,
    rolls: &[Roll],
    finish: FinishRule,
) -> BTreeSet<TargetNode> {
    let start = origin.unwrap_or(FINISH);
    let mut targets = BTreeSet::new();
    for &roll in rolls {
        let walk = Walk {
            origin: start,
            roll,
            entering: origin.is_none(),
            finish,
        };
        targets.extend(expand(&walk, start, roll.steps()));
    }
    tracing::trace!(?origin, ?rolls, count = targets.len(), "computed targets");
    targets
}

/// Collects the targets of one branch of the walk.
fn expand(walk: &Walk, current: Position, remaining: u8) -> BTreeSet<TargetNode> {
    if remaining == 0 {
        return BTreeSet::from([TargetNode {
            position: current,
            roll: walk.roll,
            scoring: current.is_finish() && walk.finish.scores_on_landing(),
        }]);
    }

    let standing = remaining == walk.roll.steps();
    if current.is_finish() && !(standing && walk.entering) {
        // A piece waiting on the hub always leaves the board; one running
        // into it with steps left depends on the finish rule.
        return if standing || walk.finish.scores_on_passing() {
            BTreeSet::from([TargetNode {
                position: FINISH,
                roll: walk.roll,
                scoring: true,
            }])
        } else {
            BTreeSet::new()
        };
    }

    legal_next(current, walk.origin)
        .flat_map(|to| expand(walk, to, remaining - 1))
        .collect()
}

/// Picks the target at `position` using the smallest roll.
pub fn cheapest_target(targets: &BTreeSet<TargetNode>, position: Position) -> Option<TargetNode> {
    targets
        .iter()
        .filter(|t| t.position == position)
        .min_by_key(|t| t.roll)
        .copied()
}

/// Picks the smallest roll that takes the piece off the board.
///
/// Once any roll scores, every arrival at the finishing hub may score, so an
/// exact landing that would otherwise wait there competes on roll size too.
pub fn cheapest_scoring_target(targets: &BTreeSet<TargetNode>) -> Option<TargetNode> {
    if !targets.iter().any(|t| t.scoring) {
        return None;
    }
    cheapest_target(targets, FINISH).map(|t| TargetNode { scoring: true, ..t })
}
