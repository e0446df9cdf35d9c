//! Policy table for the seat game.
//!
//! Pure functions from player count to the rule parameters. Explicit
//! overrides in [`SeatOptions`](crate::SeatOptions) take precedence.

use crate::types::StreakResult;

/// Below this many seats the game is degenerate and counts as over.
pub const MIN_PLAYERS: usize = 4;

/// Streak length that ends a game with `seats` players.
pub fn win_streak_length(seats: usize) -> usize {
    match seats {
        0..5 => seats,
        5..=7 => 3,
        8 => 4,
        _ => (seats - 1) / 2,
    }
}

/// Number of X numbers in a game with `seats` players.
pub fn x_count(seats: usize) -> usize {
    if seats < 6 { 0 } else { 1 }
}

/// Whether a ring evaluated to `result` ends the game.
///
/// A ring that is one unbroken run of the required length has no unique
/// start, so it ends the game regardless of how many instances were counted.
pub fn is_game_over(seats: usize, win_streak_length: usize, result: &StreakResult) -> bool {
    if seats < MIN_PLAYERS {
        return true;
    }

    if seats == win_streak_length && result.longest_streak() == win_streak_length {
        return true;
    }

    result.longest_streak() == win_streak_length && result.instances() == 1
}
