//! Bijection invariant: every number `0..N` sits in exactly one seat.

use super::Invariant;
use crate::SeatGame;
use rand::Rng;

/// Invariant: the seat→number list is a permutation of `0..N`.
pub struct BijectionInvariant;

impl<R: Rng> Invariant<SeatGame<R>> for BijectionInvariant {
    fn holds(game: &SeatGame<R>) -> bool {
        let mut seen = vec![false; game.numbers.len()];
        for number in &game.numbers {
            match seen.get_mut(number.value()) {
                Some(slot) if !*slot => *slot = true,
                _ => return false,
            }
        }
        true
    }

    fn description() -> &'static str {
        "Seats hold each number 0..N exactly once"
    }
}
