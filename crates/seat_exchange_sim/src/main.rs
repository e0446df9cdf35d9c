//! Seat Exchange simulator - command-line driver for the rules engine.
//!
//! Deals boards, evaluates hand-written layouts and plays seeded games of
//! random swaps. All I/O lives here; the engine itself performs none.

#![warn(missing_docs)]

mod cli;
mod report;
mod simulate;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use rand::SeedableRng;
use rand::rngs::StdRng;
use report::BoardReport;
use seat_exchange::{SeatGame, SeatOptions};
use serde::Serialize;
use std::fmt::Display;
use std::path::Path;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Deal {
            players,
            seed,
            config,
            json,
        } => run_deal(players, seed, config.as_deref(), json),
        Command::Evaluate {
            layout,
            round,
            x_count,
            win_streak_length,
            config,
            json,
        } => {
            let mut options = load_options(config.as_deref())?;
            if let Some(count) = x_count {
                options = options.with_x_count(count);
            }
            if let Some(length) = win_streak_length {
                options = options.with_win_streak_length(length);
            }
            run_evaluate(&layout, round, options, json)
        }
        Command::Play {
            players,
            seed,
            max_rounds,
            swaps_per_round,
            config,
            json,
        } => run_play(players, seed, max_rounds, swaps_per_round, config.as_deref(), json),
    }
}

/// Options from `path`, or the defaults when no file is given.
fn load_options(path: Option<&Path>) -> Result<SeatOptions> {
    match path {
        Some(path) => SeatOptions::from_file(path)
            .with_context(|| format!("Failed to load options from {}", path.display())),
        None => Ok(SeatOptions::default()),
    }
}

fn rng_for(seed: Option<u64>) -> StdRng {
    seed.map(StdRng::seed_from_u64)
        .unwrap_or_else(StdRng::from_entropy)
}

fn emit<T: Serialize + Display>(value: &T, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{value}");
    }
    Ok(())
}

/// Seat a table and print the shuffled board.
#[instrument(skip(config))]
fn run_deal(players: usize, seed: Option<u64>, config: Option<&Path>, json: bool) -> Result<()> {
    let options = load_options(config)?;
    let game = SeatGame::with_seats(players, options, rng_for(seed))
        .with_context(|| format!("Failed to seat {players} players"))?;

    info!(players, "Dealt board");
    emit(&BoardReport::from_game(&game), json)
}

/// Evaluate a hand-written board.
#[instrument(skip(options))]
fn run_evaluate(layout: &[usize], round: usize, options: SeatOptions, json: bool) -> Result<()> {
    let game = SeatGame::from_layout(layout, round, options, StdRng::seed_from_u64(0))
        .context("Invalid layout")?;
    emit(&BoardReport::from_game(&game), json)
}

/// Simulate a game of random swaps.
#[instrument(skip(config))]
fn run_play(
    players: usize,
    seed: Option<u64>,
    max_rounds: usize,
    swaps_per_round: usize,
    config: Option<&Path>,
    json: bool,
) -> Result<()> {
    let options = load_options(config)?;
    let mut game = SeatGame::with_seats(players, options, rng_for(seed))
        .with_context(|| format!("Failed to seat {players} players"))?;
    let mut swap_rng = rng_for(seed.map(|s| s.wrapping_add(1)));

    let outcome = simulate::play(&mut game, &mut swap_rng, max_rounds, swaps_per_round)?;
    emit(&outcome, json)
}
