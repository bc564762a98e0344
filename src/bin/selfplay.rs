//! Self-play game generation CLI.
//!
//! Plays scripted games and outputs the records as JSONL.
//!
//! Usage:
//!   cargo run --release --bin selfplay -- [OPTIONS]
//!
//! Options:
//!   --games N          Number of games to play (default: 10)
//!   --red POLICY       Red's policy: random or aggressive (default: aggressive)
//!   --blue POLICY      Blue's policy (default: random)
//!   --rules FILE       JSON rules file (default: traditional rules)
//!   --max-actions N    Throws plus moves before a game is abandoned (default: 2000)
//!   --threads N        Number of parallel threads (default: 4)
//!   --seed N           Random seed, 0 for entropy (default: 0)
//!   --output FILE      Output file path (default: stdout)
//!   --quiet            Suppress summary output

use std::env;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;
use std::process;
use std::str::FromStr;
use std::time::Instant;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use yutnori::board::Player;
use yutnori::config::RulesConfig;
use yutnori::selfplay::{self, Policy, SelfPlayConfig};

/// Returns the value following the flag at `i`, parsed.
fn flag_value<T: FromStr>(args: &[String], i: usize) -> Result<T, String> {
    let flag = &args[i - 1];
    let raw = args
        .get(i)
        .ok_or_else(|| format!("{} requires a value", flag))?;
    raw.parse()
        .map_err(|_| format!("invalid {} value: '{}'", flag, raw))
}

fn policy_value(args: &[String], i: usize) -> Result<Policy, String> {
    let name: String = flag_value(args, i)?;
    Policy::from_name(&name).ok_or_else(|| format!("unknown policy: '{}'", name))
}

fn parse_args(config: &mut SelfPlayConfig) -> Result<Option<String>, String> {
    let args: Vec<String> = env::args().collect();
    let mut output_path = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--games" => {
                i += 1;
                config.num_games = flag_value(&args, i)?;
            }
            "--red" => {
                i += 1;
                config.policies[Player::Red.index()] = policy_value(&args, i)?;
            }
            "--blue" => {
                i += 1;
                config.policies[Player::Blue.index()] = policy_value(&args, i)?;
            }
            "--rules" => {
                i += 1;
                let path: String = flag_value(&args, i)?;
                config.rules = RulesConfig::from_json_file(Path::new(&path))
                    .map_err(|e| format!("{}: {}", path, e))?;
            }
            "--max-actions" => {
                i += 1;
                config.max_actions = flag_value(&args, i)?;
            }
            "--threads" => {
                i += 1;
                config.threads = flag_value(&args, i)?;
            }
            "--seed" => {
                i += 1;
                config.seed = flag_value(&args, i)?;
            }
            "--output" => {
                i += 1;
                output_path = Some(flag_value(&args, i)?);
            }
            "--quiet" => {
                config.quiet = true;
            }
            "--help" | "-h" => {
                print_usage();
                process::exit(0);
            }
            other => return Err(format!("Unknown argument: {}", other)),
        }
        i += 1;
    }
    Ok(output_path)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_writer(io::stderr)
        .init();

    let mut config = SelfPlayConfig::default();
    let output_path = match parse_args(&mut config) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{}", e);
            print_usage();
            process::exit(1);
        }
    };

    if !config.quiet {
        eprintln!(
            "Self-play: {} games, red {} vs blue {}, finish rule {}, {} threads",
            config.num_games,
            config.policies[Player::Red.index()].name(),
            config.policies[Player::Blue.index()].name(),
            config.rules.finish_rule.name(),
            config.threads
        );
    }

    let start = Instant::now();
    let games = match selfplay::run_self_play(&config) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("Self-play failed: {}", e);
            process::exit(1);
        }
    };
    let elapsed = start.elapsed();

    if !config.quiet {
        eprintln!(
            "Completed {} games in {:.1}s",
            games.len(),
            elapsed.as_secs_f64()
        );
        selfplay::print_summary(&games);
    }

    let written = match &output_path {
        Some(path) => File::create(path)
            .and_then(|file| selfplay::write_jsonl(&games, &mut BufWriter::new(file))),
        None => {
            let stdout = io::stdout();
            selfplay::write_jsonl(&games, &mut BufWriter::new(stdout.lock()))
        }
    };
    if let Err(e) = written {
        eprintln!("failed to write output: {}", e);
        process::exit(1);
    }
    if let (Some(path), false) = (&output_path, config.quiet) {
        eprintln!("Wrote {} games to {}", games.len(), path);
    }
}

fn print_usage() {
    eprintln!("Usage: selfplay [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --games N        Number of games to play (default: 10)");
    eprintln!("  --red POLICY     Red's policy: random or aggressive (default: aggressive)");
    eprintln!("  --blue POLICY    Blue's policy (default: random)");
    eprintln!("  --rules FILE     JSON rules file (default: traditional rules)");
    eprintln!("  --max-actions N  Throws plus moves before a game is abandoned (default: 2000)");
    eprintln!("  --threads N      Number of parallel threads (default: 4)");
    eprintln!("  --seed N         Random seed, 0 for entropy (default: 0)");
    eprintln!("  --output FILE    Output file path (default: stdout)");
    eprintln!("  --quiet          Suppress summary output");
    eprintln!("  --help           Show this help");
}
