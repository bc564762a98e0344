//! Rule-level properties of target generation and routing, checked over
//! every station and every roll.

use yutnori::board::{
    is_edge, Ledger, PieceId, Player, Position, Roll, ALL_POSITIONS, ALL_ROLLS, FINISH,
};
use yutnori::movegen::{
    cheapest_scoring_target, cheapest_target, compute_targets, compute_targets_with, find_route,
    FinishRule,
};
use Position::*;

/// Every origin a selection can have: each station, plus a new piece.
fn all_origins() -> impl Iterator<Item = Option<Position>> {
    std::iter::once(None).chain(ALL_POSITIONS.into_iter().map(Some))
}

const ALL_RULES: [FinishRule; 3] = [FinishRule::Pass, FinishRule::Reach, FinishRule::Exact];

#[test]
fn one_target_per_roll_unless_overshoot_is_forbidden() {
    for origin in all_origins() {
        for roll in ALL_ROLLS {
            for rule in [FinishRule::Pass, FinishRule::Reach] {
                let targets = compute_targets_with(origin, &[roll], rule);
                assert_eq!(targets.len(), 1, "{:?} {:?} {:?}", origin, roll, rule);
            }
            let exact = compute_targets_with(origin, &[roll], FinishRule::Exact);
            assert!(exact.len() <= 1, "{:?} {:?}", origin, roll);
        }
    }
}

#[test]
fn targets_are_idempotent() {
    for origin in all_origins() {
        let first = compute_targets(origin, &ALL_ROLLS);
        let second = compute_targets(origin, &ALL_ROLLS);
        assert_eq!(first, second);
        let flags: Vec<bool> = first.iter().map(|t| t.scoring).collect();
        let again: Vec<bool> = second.iter().map(|t| t.scoring).collect();
        assert_eq!(flags, again);
    }
}

#[test]
fn every_target_has_a_route_of_its_roll_length() {
    for rule in ALL_RULES {
        for origin in all_origins() {
            let start = origin.unwrap_or(FINISH);
            for t in compute_targets_with(origin, &ALL_ROLLS, rule) {
                let route = find_route(start, t.position, start).unwrap_or_else(|| {
                    panic!("no route {:?} -> {:?} ({:?})", origin, t.position, rule)
                });
                assert_eq!(route.start(), start);
                assert_eq!(route.destination(), t.position);
                let steps = usize::from(t.roll.steps());
                if t.scoring {
                    assert_eq!(t.position, FINISH);
                    assert!(route.len() <= steps, "{:?} {:?}", origin, t);
                } else {
                    assert_eq!(route.path.len(), steps + 1, "{:?} {:?}", origin, t);
                }
                for pair in route.path.windows(2) {
                    assert!(is_edge(pair[0], pair[1]));
                }
            }
        }
    }
}

#[test]
fn routes_never_revisit_a_station() {
    for origin in ALL_POSITIONS {
        for t in compute_targets(Some(origin), &ALL_ROLLS) {
            let route = find_route(origin, t.position, origin).unwrap();
            let mut seen = route.path.clone();
            seen.sort();
            seen.dedup();
            assert_eq!(seen.len(), route.path.len());
        }
    }
}

#[test]
fn perimeter_origins_never_reach_inner_stations() {
    for origin in ALL_POSITIONS.into_iter().filter(|p| p.is_perimeter() && !p.is_top_hub()) {
        for t in compute_targets(Some(origin), &ALL_ROLLS) {
            assert!(!t.position.is_inner(), "{} reached {}", origin, t.position);
        }
    }
}

#[test]
fn new_piece_with_smallest_roll_enters_first_cell() {
    let targets = compute_targets(None, &[Roll::Do]);
    assert_eq!(targets.len(), 1);
    let t = targets.iter().next().unwrap();
    assert_eq!(t.position, Right1);
    assert!(!t.scoring);
}

#[test]
fn piece_on_the_finish_only_scores() {
    for rule in ALL_RULES {
        for roll in ALL_ROLLS {
            let targets = compute_targets_with(Some(FINISH), &[roll], rule);
            assert_eq!(targets.len(), 1);
            assert!(targets.iter().all(|t| t.scoring && t.position == FINISH));
        }
    }
}

#[test]
fn scenario_new_piece_with_yut() {
    let targets = compute_targets(None, &[Roll::Yut]);
    let t = targets.iter().next().unwrap();
    assert_eq!(targets.len(), 1);
    assert_eq!(t.position, Right4);
    assert!(!t.scoring);
}

#[test]
fn scenario_top_right_hub_takes_shortcut() {
    let targets = compute_targets(Some(TopRight), &[Roll::Do]);
    let positions: Vec<Position> = targets.iter().map(|t| t.position).collect();
    assert_eq!(positions, vec![TopRightDiag1]);
}

#[test]
fn scenario_center_exits_toward_home() {
    let targets = compute_targets(Some(Center), &[Roll::Do]);
    let positions: Vec<Position> = targets.iter().map(|t| t.position).collect();
    assert_eq!(positions, vec![BottomRightDiag1]);
}

#[test]
fn scenario_exact_and_overshoot_arrivals() {
    // Bottom2 is three steps from home.
    let targets = compute_targets(Some(Bottom2), &[Roll::Geol, Roll::Mo]);
    let home: Vec<_> = targets.iter().filter(|t| t.position == FINISH).collect();
    assert_eq!(home.len(), 2);
    assert_eq!(home[0].roll, Roll::Geol);
    assert_eq!(home[1].roll, Roll::Mo);
    assert!(home[1].scoring);
    assert_eq!(cheapest_target(&targets, FINISH).map(|t| t.roll), Some(Roll::Geol));
    assert_eq!(cheapest_scoring_target(&targets).map(|t| t.roll), Some(Roll::Geol));

    let reach = compute_targets_with(Some(Bottom2), &[Roll::Geol, Roll::Mo], FinishRule::Reach);
    assert!(reach.iter().all(|t| t.scoring));
    assert_eq!(cheapest_scoring_target(&reach).map(|t| t.roll), Some(Roll::Geol));
}

#[test]
fn diagonal_lines_stay_straight() {
    let route = find_route(TopRightDiag1, BottomLeft, TopRightDiag1).unwrap();
    assert_eq!(
        route.steps(),
        &[TopRightDiag2, Center, BottomLeftDiag1, BottomLeftDiag2, BottomLeft]
    );
    let targets = compute_targets(Some(TopLeftDiag2), &[Roll::Yut]);
    let t = targets.iter().next().unwrap();
    assert_eq!(t.position, FINISH);
    assert!(!t.scoring);
}

#[test]
fn ledger_merge_sums_levels() {
    let mut ledger = Ledger::new();
    let carrier = PieceId(1);
    let rider = PieceId(2);
    ledger.assign(carrier, Top3, Player::Red).unwrap();
    ledger.assign(rider, Top1, Player::Red).unwrap();
    ledger.merge(rider, carrier).unwrap();

    let (owner, stack) = ledger.find_piece(Top3).unwrap();
    assert_eq!(owner, Player::Red);
    assert_eq!(stack.id, carrier);
    assert_eq!(stack.level, 2);
    assert_eq!(ledger.find_position(rider), None);
    assert_eq!(ledger.find_piece(Top1), None);
    assert_eq!(ledger.stack_count(Player::Red), 2);
    assert_eq!(ledger.reserve(Player::Red, 4, 0), 2);
}
