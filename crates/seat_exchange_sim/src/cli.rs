//! Command-line interface for seat_exchange_sim.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Seat Exchange simulator - deal, evaluate and play seat-swapping games
#[derive(Parser, Debug)]
#[command(name = "seat_exchange_sim")]
#[command(about = "Drive the seat-exchange rules engine from the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Seat a table and print the shuffled board
    Deal {
        /// Number of players at the table
        #[arg(short, long)]
        players: usize,

        /// Seed for a reproducible board
        #[arg(long)]
        seed: Option<u64>,

        /// TOML file with rule overrides
        #[arg(long)]
        config: Option<PathBuf>,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Evaluate a hand-written board
    Evaluate {
        /// Number in each seat, starting at seat A (e.g. 6,0,1,2,3,4,7,5)
        #[arg(long, value_delimiter = ',', required = true)]
        layout: Vec<usize>,

        /// Round whose X numbers apply
        #[arg(long, default_value = "1")]
        round: usize,

        /// Override the number of X numbers
        #[arg(long)]
        x_count: Option<usize>,

        /// Override the streak length that wins
        #[arg(long)]
        win_streak_length: Option<usize>,

        /// TOML file with rule overrides (flags take precedence)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Simulate a game of random swaps until someone wins
    Play {
        /// Number of players at the table
        #[arg(short, long)]
        players: usize,

        /// Seed for a reproducible game
        #[arg(long)]
        seed: Option<u64>,

        /// Give up after this many rounds
        #[arg(long, default_value = "100")]
        max_rounds: usize,

        /// Random swaps made in each round
        #[arg(long, default_value = "1")]
        swaps_per_round: usize,

        /// TOML file with rule overrides
        #[arg(long)]
        config: Option<PathBuf>,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}
