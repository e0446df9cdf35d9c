//! X set invariant: the right number of distinct, in-range X numbers.

use super::Invariant;
use crate::SeatGame;
use rand::Rng;

/// Invariant: X numbers are in `0..N`, distinct, and as many as `x_count`.
pub struct XSetInvariant;

impl<R: Rng> Invariant<SeatGame<R>> for XSetInvariant {
    fn holds(game: &SeatGame<R>) -> bool {
        let seats = game.player_count();
        let numbers: Vec<_> = game.x.iter().collect();

        let in_range = numbers.iter().all(|x| x.value() < seats);
        let distinct = numbers
            .iter()
            .enumerate()
            .all(|(i, x)| !numbers[..i].contains(x));

        in_range && distinct && numbers.len() == game.x_count()
    }

    fn description() -> &'static str {
        "X numbers are distinct, in range and match the X count"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PrivateNumber, SeatOptions, XSet};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn game(layout: &[usize], options: SeatOptions) -> SeatGame {
        SeatGame::from_layout(layout, 1, options, StdRng::seed_from_u64(0)).unwrap()
    }

    #[test]
    fn test_fresh_games_hold() {
        assert!(XSetInvariant::holds(&game(&[0, 2, 4, 1, 3], SeatOptions::default())));
        assert!(XSetInvariant::holds(&game(&[0, 2, 4, 1, 3, 5], SeatOptions::default())));
        assert!(XSetInvariant::holds(&game(
            &[0, 2, 4, 1, 3, 5],
            SeatOptions::default().with_x_count(2)
        )));
    }

    #[test]
    fn test_wrong_size_violates() {
        let mut game = game(&[0, 2, 4, 1, 3, 5], SeatOptions::default());
        game.x = XSet::new();
        assert!(!XSetInvariant::holds(&game));
    }

    #[test]
    fn test_out_of_range_violates() {
        let mut game = game(&[0, 2, 4, 1, 3, 5], SeatOptions::default());
        game.x = XSet::from_numbers([PrivateNumber::new(6)]);
        assert!(!XSetInvariant::holds(&game));
    }
}
