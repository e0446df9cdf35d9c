//! Cache coherence invariant: a cached streak result is never stale.

use super::Invariant;
use crate::SeatGame;
use crate::streak::longest_streak;
use rand::Rng;

/// Invariant: a populated streak cache equals a fresh evaluation.
pub struct CacheCoherentInvariant;

impl<R: Rng> Invariant<SeatGame<R>> for CacheCoherentInvariant {
    fn holds(game: &SeatGame<R>) -> bool {
        match game.cached_streak() {
            Some(cached) => cached == longest_streak(&game.numbers, &game.x),
            None => true,
        }
    }

    fn description() -> &'static str {
        "Cached streak result matches the board"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SeatOptions, Seat};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_cache_stays_coherent_through_mutations() {
        let mut game =
            SeatGame::from_layout(&[0, 2, 4, 6, 1, 3, 5, 7], 1, SeatOptions::default(), StdRng::seed_from_u64(0))
                .unwrap();
        let _ = game.longest_streak();
        assert!(CacheCoherentInvariant::holds(&game));

        game.swap_seats(Seat::new(0), Seat::new(3)).unwrap();
        let _ = game.longest_streak();
        assert!(CacheCoherentInvariant::holds(&game));

        game.new_round();
        let _ = game.longest_streak();
        assert!(CacheCoherentInvariant::holds(&game));
    }

    #[test]
    fn test_stale_cache_violates() {
        let mut game =
            SeatGame::from_layout(&[6, 0, 1, 2, 3, 4, 7, 5], 7, SeatOptions::default(), StdRng::seed_from_u64(0))
                .unwrap();
        let _ = game.longest_streak();
        // Bypass swap_seats so the cache is not cleared.
        game.numbers.swap(1, 6);
        assert!(!CacheCoherentInvariant::holds(&game));
    }
}
