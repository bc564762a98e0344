//! Self-play game generation.
//!
//! Plays complete games between two scripted policies, throwing the sticks
//! with a seeded generator and committing moves through the same `Game` the
//! protocol uses. Every committed move is checked against its route: a
//! non-scoring move travels exactly as many edges as its roll, a scoring
//! move no more. Records are written as JSON lines for offline analysis.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::board::{Player, Roll, ALL_PLAYERS};
use crate::config::RulesConfig;
use crate::movegen::TargetNode;
use crate::protocol::notation::format_selection;
use crate::resolve::{Effect, Game, MoveError, MoveOutcome, Phase, Selection};

/// How a scripted player picks among its legal moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    /// Uniformly random legal move.
    Random,
    /// Capture if possible, else score if possible, else random.
    Aggressive,
}

impl Policy {
    pub const fn name(self) -> &'static str {
        match self {
            Policy::Random => "random",
            Policy::Aggressive => "aggressive",
        }
    }

    pub fn from_name(name: &str) -> Option<Policy> {
        match name {
            "random" => Some(Policy::Random),
            "aggressive" => Some(Policy::Aggressive),
            _ => None,
        }
    }

    /// Picks a move from `moves`, or `None` if there are none.
    pub fn choose(
        self,
        game: &Game,
        moves: &[(Selection, TargetNode)],
        rng: &mut SmallRng,
    ) -> Option<(Selection, TargetNode)> {
        if self == Policy::Aggressive {
            let player = game.turn().player;
            let captures: Vec<_> = moves
                .iter()
                .filter(|(_, t)| {
                    !t.scoring
                        && matches!(game.ledger().find_piece(t.position), Some((owner, _)) if owner != player)
                })
                .copied()
                .collect();
            if let Some(m) = captures.choose(rng) {
                return Some(*m);
            }
            let scores: Vec<_> = moves.iter().filter(|(_, t)| t.scoring).copied().collect();
            if let Some(m) = scores.choose(rng) {
                return Some(*m);
            }
        }
        moves.choose(rng).copied()
    }
}

/// Configuration for self-play game generation.
#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    /// Number of games to play.
    pub num_games: usize,
    pub rules: RulesConfig,
    /// Policy for each player, indexed by `Player::index`.
    pub policies: [Policy; 2],
    /// Throws plus moves before a game is abandoned unfinished.
    pub max_actions: usize,
    /// Number of parallel threads for concurrent games.
    pub threads: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
    /// Suppress per-game progress output.
    pub quiet: bool,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            num_games: 10,
            rules: RulesConfig::default(),
            policies: [Policy::Aggressive, Policy::Random],
            max_actions: 2000,
            threads: 4,
            seed: 0,
            quiet: false,
        }
    }
}

/// Errors that abort a self-play run or game.
#[derive(Debug, thiserror::Error)]
pub enum SelfPlayError {
    #[error("illegal move chosen: {0}")]
    Move(#[from] MoveError),

    #[error("{player} has rolls left but no legal move")]
    Stuck { player: Player },

    #[error("route of {edges} edges for a {roll} move (scoring: {scoring})")]
    RouteMismatch { roll: Roll, edges: usize, scoring: bool },

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// One committed move.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveRecord {
    pub player: Player,
    /// `new` or the station the stack left.
    pub from: String,
    pub to: String,
    pub roll: String,
    pub path: Vec<String>,
    pub effect: String,
}

impl MoveRecord {
    fn from_outcome(outcome: &MoveOutcome) -> Self {
        let effect = match outcome.effect {
            Effect::Advance => "advance",
            Effect::Capture { .. } => "capture",
            Effect::Piggyback { .. } => "stack",
            Effect::Score { .. } => "score",
        };
        MoveRecord {
            player: outcome.player,
            from: format_selection(outcome.selection),
            to: outcome.target.position.abbr().to_string(),
            roll: outcome.target.roll.name().to_string(),
            path: outcome.route.path.iter().map(|p| p.abbr().to_string()).collect(),
            effect: effect.to_string(),
        }
    }
}

/// A complete self-play game record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecord {
    pub game_id: usize,
    pub winner: Option<Player>,
    /// Pieces each player brought home, red first.
    pub finished: [u32; 2],
    pub throws: usize,
    pub captures: usize,
    pub moves: Vec<MoveRecord>,
}

/// Checks that a committed move travelled as far as its roll allows.
pub fn check_route(outcome: &MoveOutcome) -> Result<(), SelfPlayError> {
    let steps = usize::from(outcome.target.roll.steps());
    let edges = outcome.route.len();
    let ok = if outcome.target.scoring {
        edges <= steps
    } else {
        edges == steps
    };
    if ok {
        Ok(())
    } else {
        Err(SelfPlayError::RouteMismatch {
            roll: outcome.target.roll,
            edges,
            scoring: outcome.target.scoring,
        })
    }
}

/// Plays a single self-play game and returns the game record.
pub fn play_game(
    config: &SelfPlayConfig,
    game_id: usize,
    rng: &mut SmallRng,
) -> Result<GameRecord, SelfPlayError> {
    let mut game = Game::new(config.rules.clone());
    let mut moves = Vec::new();
    let mut throws = 0usize;
    let mut captures = 0usize;

    for _ in 0..config.max_actions {
        if game.winner().is_some() {
            break;
        }
        let player = game.turn().player;
        match game.turn().phase {
            Phase::Throw => {
                let roll = Roll::throw(rng, game.rules().flat_probability);
                game.throw(roll)?;
                throws += 1;
            }
            Phase::Move => {
                let legal = game.legal_moves();
                let policy = config.policies[player.index()];
                let (selection, target) = policy
                    .choose(&game, &legal, rng)
                    .ok_or(SelfPlayError::Stuck { player })?;
                let outcome = game.play_target(selection, target)?;
                check_route(&outcome)?;
                if matches!(outcome.effect, Effect::Capture { .. }) {
                    captures += 1;
                }
                moves.push(MoveRecord::from_outcome(&outcome));
            }
        }
    }

    let winner = game.winner();
    if winner.is_none() {
        tracing::debug!(game_id, "game abandoned after {} actions", config.max_actions);
    }
    Ok(GameRecord {
        game_id,
        winner,
        finished: ALL_PLAYERS.map(|p| game.finished(p)),
        throws,
        captures,
        moves,
    })
}

fn game_rng(seed: u64, game_id: usize) -> SmallRng {
    if seed != 0 {
        SmallRng::seed_from_u64(seed.wrapping_add(game_id as u64))
    } else {
        SmallRng::from_entropy()
    }
}

fn report(config: &SelfPlayConfig, n: usize, game: &GameRecord, started: Instant) {
    if config.quiet {
        return;
    }
    let outcome = match game.winner {
        Some(w) => format!("{} wins", w),
        None => "unfinished".to_string(),
    };
    eprintln!(
        "Game {}/{}: {} after {} moves ({:.3}s)",
        n,
        config.num_games,
        outcome,
        game.moves.len(),
        started.elapsed().as_secs_f64(),
    );
}

/// Runs self-play generation, producing multiple game records.
///
/// When `config.threads > 1`, games are played concurrently using rayon.
pub fn run_self_play(config: &SelfPlayConfig) -> Result<Vec<GameRecord>, SelfPlayError> {
    let mut games = Vec::with_capacity(config.num_games);
    run_self_play_with_callback(config, |game| games.push(game))?;
    games.sort_by_key(|g| g.game_id);
    Ok(games)
}

/// Runs self-play generation, calling `on_game` with each completed game
/// record. Games that fail are logged and skipped.
pub fn run_self_play_with_callback<F>(config: &SelfPlayConfig, on_game: F) -> Result<(), SelfPlayError>
where
    F: FnMut(GameRecord) + Send,
{
    if config.threads > 1 {
        run_self_play_parallel(config, on_game)
    } else {
        run_self_play_sequential(config, on_game);
        Ok(())
    }
}

fn run_self_play_sequential<F>(config: &SelfPlayConfig, mut on_game: F)
where
    F: FnMut(GameRecord),
{
    for i in 0..config.num_games {
        let started = Instant::now();
        let mut rng = game_rng(config.seed, i);
        match play_game(config, i, &mut rng) {
            Ok(game) => {
                report(config, i + 1, &game, started);
                on_game(game);
            }
            Err(e) => tracing::error!(game_id = i, "self-play game failed: {}", e),
        }
    }
}

/// Plays games concurrently on a rayon pool and delivers them to `on_game`
/// on the calling thread through a channel.
fn run_self_play_parallel<F>(config: &SelfPlayConfig, mut on_game: F) -> Result<(), SelfPlayError>
where
    F: FnMut(GameRecord) + Send,
{
    use rayon::prelude::*;
    use std::sync::mpsc;

    let completed = AtomicUsize::new(0);
    let (tx, rx) = mpsc::channel::<GameRecord>();
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()?;

    std::thread::scope(|s| {
        let completed = &completed;
        s.spawn(move || {
            pool.install(|| {
                (0..config.num_games)
                    .into_par_iter()
                    .for_each_with(tx, |tx, i| {
                        let started = Instant::now();
                        let mut rng = game_rng(config.seed, i);
                        match play_game(config, i, &mut rng) {
                            Ok(game) => {
                                let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
                                report(config, n, &game, started);
                                let _ = tx.send(game);
                            }
                            Err(e) => tracing::error!(game_id = i, "self-play game failed: {}", e),
                        }
                    });
            });
        });

        for game in rx {
            on_game(game);
        }
    });
    Ok(())
}

/// Writes game records as JSONL (one JSON object per game, one per line).
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> std::io::Result<()> {
    for game in games {
        serde_json::to_writer(&mut *out, game)?;
        writeln!(out)?;
    }
    out.flush()
}

/// Prints a summary of self-play results to stderr.
pub fn print_summary(games: &[GameRecord]) {
    let total = games.len();
    let mut wins = [0usize; 2];
    let mut unfinished = 0usize;
    let mut moves = 0usize;
    let mut captures = 0usize;

    for game in games {
        moves += game.moves.len();
        captures += game.captures;
        match game.winner {
            Some(w) => wins[w.index()] += 1,
            None => unfinished += 1,
        }
    }

    let per_game = |n: usize| n as f64 / total.max(1) as f64;
    eprintln!("=== Self-Play Summary ===");
    eprintln!("Games: {}", total);
    eprintln!("Avg moves/game: {:.1}", per_game(moves));
    eprintln!("Avg captures/game: {:.1}", per_game(captures));
    eprintln!("Unfinished: {}", unfinished);
    eprintln!("Win distribution:");
    for player in ALL_PLAYERS {
        let pct = 100.0 * per_game(wins[player.index()]);
        eprintln!("  {:>5}: {} ({:.1}%)", player, wins[player.index()], pct);
    }
}
