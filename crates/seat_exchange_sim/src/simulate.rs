//! Seeded play-through of a game made of random swaps.

use crate::report::BoardReport;
use rand::Rng;
use seat_exchange::{Seat, SeatError, SeatGame};
use serde::Serialize;
use std::fmt;
use tracing::{debug, info, instrument};

/// Result of a simulated game.
#[derive(Debug, Clone, Serialize)]
pub struct PlayOutcome {
    /// Rounds whose swaps were made before the game ended or the limit was hit.
    pub rounds_played: usize,
    /// Swaps made in total.
    pub swaps: usize,
    /// Whether the game ended.
    pub finished: bool,
    /// Whether the game ended when the X numbers moved on, with no swap.
    pub ended_on_rotation: bool,
    /// The board as it was left.
    pub board: BoardReport,
}

impl fmt::Display for PlayOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ended_on_rotation {
            writeln!(
                f,
                "Game ended by the X rotation into round {} after {} swaps",
                self.board.round, self.swaps
            )?;
        } else if self.finished {
            writeln!(
                f,
                "Game ended in round {} after {} swaps",
                self.board.round, self.swaps
            )?;
        } else {
            writeln!(
                f,
                "No winner after {} rounds ({} swaps)",
                self.rounds_played, self.swaps
            )?;
        }
        write!(f, "{}", self.board)
    }
}

/// Plays `game` until it ends or `max_rounds` rounds have passed.
///
/// Each round makes `swaps_per_round` swaps between uniformly chosen seats
/// drawn from `rng`, then checks for a winner before moving to the next
/// round. Moving the X numbers can itself complete a streak; such a game
/// ends at the start of the new round without any swap.
#[instrument(skip(game, rng), fields(players = game.player_count()))]
pub fn play<G: Rng, R: Rng>(
    game: &mut SeatGame<G>,
    rng: &mut R,
    max_rounds: usize,
    swaps_per_round: usize,
) -> Result<PlayOutcome, SeatError> {
    let players = game.player_count();
    let mut swaps = 0;
    let mut rounds_played = 0;
    let mut ended_on_rotation = false;

    while !game.game_over() && rounds_played < max_rounds {
        for _ in 0..swaps_per_round {
            let a = Seat::new(rng.gen_range(0..players));
            let b = Seat::new(rng.gen_range(0..players));
            game.swap_seats(a, b)?;
            swaps += 1;
        }
        rounds_played += 1;

        if game.game_over() {
            break;
        }
        debug!(round = game.round(), streak = %game.longest_streak(), "Round complete");
        game.new_round();
        if game.game_over() {
            ended_on_rotation = true;
            break;
        }
    }

    let finished = game.game_over();
    if finished {
        info!(round = game.round(), swaps, ended_on_rotation, "Game ended");
    } else {
        info!(rounds_played, swaps, "Round limit reached");
    }

    Ok(PlayOutcome {
        rounds_played,
        swaps,
        finished,
        ended_on_rotation,
        board: BoardReport::from_game(game),
    })
}
