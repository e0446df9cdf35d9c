//! Printable and serializable snapshots of a game.

use rand::Rng;
use seat_exchange::{PrivateNumber, Seat, SeatGame, StreakResult, XSet};
use serde::Serialize;
use std::fmt;

/// One row of the seating table.
#[derive(Debug, Clone, Serialize)]
pub struct SeatRow {
    /// Seat index.
    pub seat: Seat,
    /// Seat letter.
    pub label: String,
    /// Number held in the seat.
    pub number: PrivateNumber,
    /// Whether the number is X this round.
    pub x: bool,
}

/// Snapshot of the board and its evaluation.
#[derive(Debug, Clone, Serialize)]
pub struct BoardReport {
    /// Current round.
    pub round: usize,
    /// Seats at the table.
    pub players: usize,
    /// Streak length that wins.
    pub win_streak_length: usize,
    /// Numbers currently X.
    pub x: XSet,
    /// Seating table, in seat order.
    pub seats: Vec<SeatRow>,
    /// Longest streak on the board.
    pub streak: StreakResult,
    /// Whether the game has ended.
    pub game_over: bool,
    /// Winning seats, when the game has a unique winning run.
    pub winners: Option<Vec<Seat>>,
}

impl BoardReport {
    /// Captures the current state of `game`.
    pub fn from_game<R: Rng>(game: &SeatGame<R>) -> Self {
        let seats = Seat::all(game.player_count())
            .zip(game.layout().iter().copied())
            .map(|(seat, number)| SeatRow {
                seat,
                label: seat.label(),
                number,
                x: game.is_x(number),
            })
            .collect();

        Self {
            round: game.round(),
            players: game.player_count(),
            win_streak_length: game.win_streak_length(),
            x: game.current_x().clone(),
            seats,
            streak: game.longest_streak(),
            game_over: game.game_over(),
            winners: game.winners().ok(),
        }
    }
}

impl fmt::Display for BoardReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Round {}, {} players, X {}, {} in a row wins",
            self.round, self.players, self.x, self.win_streak_length
        )?;
        writeln!(f, "  {:<5} {:>6}", "Seat", "Number")?;
        for row in &self.seats {
            let marker = if row.x { "  X" } else { "" };
            writeln!(f, "  {:<5} {:>6}{}", row.seat, row.number.to_string(), marker)?;
        }
        writeln!(f, "{}", self.streak)?;

        match &self.winners {
            Some(winners) => {
                let names: Vec<String> = winners.iter().map(|seat| seat.label()).collect();
                write!(f, "Game over: seats {} win", names.join(", "))
            }
            None if self.game_over => write!(f, "Game over: table too small to play"),
            None => write!(f, "Game continues"),
        }
    }
}
