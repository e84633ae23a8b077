use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use clap::Parser;
use maze_chase::board::Board;
use maze_chase::config::{EngineOptions, SessionConfig};
use maze_chase::engine::GameEngine;
use maze_chase::error::GameError;
use maze_chase::types::{BoardInit, Direction, SessionSummary, Snapshot};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info};

const DEFAULT_FRAMES: u64 = 60 * 60 * 3;
const MOVE_CHOICES: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

#[derive(Parser, Debug)]
#[command(author, version, about = "Runs a headless maze-chase session and prints JSON lines")]
struct Cli {
    #[arg(long, default_value = "config.json")]
    config: PathBuf,
    #[arg(long)]
    map: Option<PathBuf>,
    #[arg(long, default_value_t = DEFAULT_FRAMES)]
    frames: u64,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, value_delimiter = ',', value_parser = parse_move)]
    moves: Vec<Direction>,
    #[arg(long, default_value_t = 24)]
    turn_every: u64,
    #[arg(long, default_value_t = 60)]
    snapshot_every: u64,
    #[arg(long)]
    debug: bool,
    #[arg(long)]
    summary_out: Option<PathBuf>,
}

#[derive(Debug, Error)]
enum SimulateError {
    #[error(transparent)]
    Game(#[from] GameError),
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum OutputLine<'a> {
    Init { board: BoardInit },
    Snapshot(&'a Snapshot),
    Summary(&'a SessionSummary),
}

#[derive(Clone, Debug, Serialize)]
struct RunSummary {
    #[serde(rename = "startedAt")]
    started_at: String,
    #[serde(rename = "finishedAt")]
    finished_at: String,
    seed: u64,
    config: String,
    map: String,
    session: SessionSummary,
}

#[derive(Debug)]
enum InputPolicy {
    Scripted { moves: Vec<Direction>, every: u64 },
    Random { rng: StdRng, every: u64 },
}

impl InputPolicy {
    fn new(moves: Vec<Direction>, every: u64, seed: u64) -> Self {
        let every = every.max(1);
        if moves.is_empty() {
            Self::Random {
                rng: StdRng::seed_from_u64(seed.wrapping_add(1)),
                every,
            }
        } else {
            Self::Scripted { moves, every }
        }
    }

    fn next(&mut self, frame: u64) -> Option<Direction> {
        match self {
            Self::Scripted { moves, every } => {
                if (frame - 1) % *every != 0 {
                    return None;
                }
                let turn = ((frame - 1) / *every) as usize;
                Some(moves[turn % moves.len()])
            }
            Self::Random { rng, every } => {
                if (frame - 1) % *every != 0 {
                    return None;
                }
                Some(MOVE_CHOICES[rng.random_range(0..MOVE_CHOICES.len())])
            }
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(error) = run(&cli) {
        error!(%error, "simulation failed");
        std::process::exit(2);
    }
}

fn run(cli: &Cli) -> Result<(), SimulateError> {
    let config = SessionConfig::load(&cli.config)?;
    let map_path = cli
        .map
        .clone()
        .unwrap_or_else(|| config.map_path_relative_to(&cli.config));
    let board = Board::load(&map_path)?;
    let seed = cli.seed.unwrap_or_else(seed_from_clock);

    let options = EngineOptions {
        seed: Some(seed),
        debug: cli.debug,
        ..EngineOptions::default()
    };
    let mut engine = GameEngine::new(board, &config, options)?;
    let mut policy = InputPolicy::new(cli.moves.clone(), cli.turn_every, seed);

    let started_at = Utc::now();
    info!(seed, frames = cli.frames, map = %map_path.display(), "simulation started");
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let session = run_session(
        &mut engine,
        &mut policy,
        cli.frames,
        cli.snapshot_every,
        &mut out,
    )?;
    let finished_at = Utc::now();
    info!(
        status = ?session.status,
        frames = session.frames,
        pickups_eaten = session.pickups_eaten,
        elapsed_ms = (finished_at - started_at).num_milliseconds(),
        "simulation finished"
    );

    if let Some(path) = cli.summary_out.as_ref() {
        let summary = RunSummary {
            started_at: started_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            finished_at: finished_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            seed,
            config: cli.config.display().to_string(),
            map: map_path.display().to_string(),
            session,
        };
        write_summary(path, &summary)?;
        info!(path = %path.display(), "summary written");
    }
    Ok(())
}

fn run_session<W: Write>(
    engine: &mut GameEngine,
    policy: &mut InputPolicy,
    frames: u64,
    snapshot_every: u64,
    out: &mut W,
) -> Result<SessionSummary, SimulateError> {
    write_line(
        out,
        &OutputLine::Init {
            board: engine.board_init(),
        },
    )?;

    let mut printed_last = true;
    for frame in 1..=frames {
        engine.step(frame, policy.next(frame))?;
        let due = snapshot_every > 0 && frame % snapshot_every == 0;
        printed_last = due || engine.is_ended();
        if printed_last {
            write_line(out, &OutputLine::Snapshot(&engine.build_snapshot(true)))?;
        }
        if engine.is_ended() {
            break;
        }
    }
    if !printed_last {
        write_line(out, &OutputLine::Snapshot(&engine.build_snapshot(true)))?;
    }

    let summary = engine.build_summary();
    write_line(out, &OutputLine::Summary(&summary))?;
    out.flush()?;
    Ok(summary)
}

fn write_line<W: Write>(out: &mut W, line: &OutputLine<'_>) -> Result<(), SimulateError> {
    serde_json::to_writer(&mut *out, line)?;
    out.write_all(b"\n")?;
    Ok(())
}

fn write_summary(path: &Path, summary: &RunSummary) -> Result<(), SimulateError> {
    let summary_text = serde_json::to_string_pretty(summary)?;
    std::fs::write(path, summary_text)?;
    Ok(())
}

fn parse_move(value: &str) -> Result<Direction, String> {
    match Direction::parse_move(&value.trim().to_ascii_lowercase()) {
        Some(Direction::Neutral) | None => Err(format!(
            "unknown move {value:?}, expected up, down, left or right"
        )),
        Some(dir) => Ok(dir),
    }
}

fn seed_from_clock() -> u64 {
    Utc::now().timestamp_millis().unsigned_abs()
}
