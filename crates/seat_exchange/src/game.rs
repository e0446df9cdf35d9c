//! The seat game engine.
//!
//! Holds the seat→number bijection, the X set and the round counter, and
//! answers streak and win queries. Knows nothing about players: callers map
//! seats to whoever sits in them.

use crate::config::SeatOptions;
use crate::error::SeatError;
use crate::invariants::{InvariantSet, SeatInvariants};
use crate::placement;
use crate::rules::{self, MIN_PLAYERS};
use crate::streak;
use crate::types::{PrivateNumber, Seat, StreakResult};
use crate::xset::XSet;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::cell::Cell;
use tracing::{debug, info, instrument};

/// A ring of seats, each holding a distinct secret number.
///
/// Every mutating operation clears the streak cache before returning, so the
/// next query always sees the current board. Failed operations leave the
/// game untouched.
#[derive(Debug, Clone)]
pub struct SeatGame<R: Rng = StdRng> {
    /// Number held in each seat, indexed by seat.
    pub(crate) numbers: Vec<PrivateNumber>,
    /// Numbers currently X.
    pub(crate) x: XSet,
    /// Current round, starting at 1.
    pub(crate) round: usize,
    /// Rule overrides.
    pub(crate) options: SeatOptions,
    /// Source of randomness for shuffles and seat insertion.
    pub(crate) rng: R,
    /// Lazily computed streak evaluation.
    pub(crate) cached_streak: Cell<Option<StreakResult>>,
}

impl SeatGame<StdRng> {
    /// Creates an empty game seeded from system entropy.
    #[instrument]
    pub fn new(options: SeatOptions) -> Self {
        Self::with_rng(options, StdRng::from_entropy())
    }

    /// Creates an empty game with a deterministic generator.
    #[instrument]
    pub fn seeded(options: SeatOptions, seed: u64) -> Self {
        Self::with_rng(options, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> SeatGame<R> {
    /// Creates an empty game using `rng` for all random choices.
    pub fn with_rng(options: SeatOptions, rng: R) -> Self {
        Self {
            numbers: Vec::new(),
            x: XSet::new(),
            round: 1,
            options,
            rng,
            cached_streak: Cell::new(None),
        }
    }

    /// Creates a game with `seats` seats and a freshly shuffled board.
    #[instrument(skip(rng))]
    pub fn with_seats(seats: usize, options: SeatOptions, rng: R) -> Result<Self, SeatError> {
        let mut game = Self::with_rng(options, rng);
        game.numbers = PrivateNumber::all(seats).collect();
        game.x = game.initial_x();
        game.shuffle()?;
        Ok(game)
    }

    /// Creates a game from an explicit board: `layout[seat]` is the number in that seat.
    ///
    /// The X set is the one belonging to `round`. Fails with
    /// `InvalidArgument` if `layout` is not a permutation of `0..N` or
    /// `round` is 0.
    ///
    /// ```
    /// use seat_exchange::{SeatGame, SeatOptions};
    /// use rand::{SeedableRng, rngs::StdRng};
    ///
    /// let game = SeatGame::from_layout(&[6, 0, 1, 2, 3, 4, 7, 5], 7, SeatOptions::default(), StdRng::seed_from_u64(0))?;
    /// assert_eq!(game.current_x().to_string(), "{6}");
    /// assert_eq!(game.longest_streak().longest_streak(), 5);
    /// # Ok::<(), seat_exchange::SeatError>(())
    /// ```
    #[instrument(skip(options, rng))]
    pub fn from_layout(
        layout: &[usize],
        round: usize,
        options: SeatOptions,
        rng: R,
    ) -> Result<Self, SeatError> {
        if round == 0 {
            return Err(SeatError::invalid_argument("rounds start at 1"));
        }

        let mut seen = vec![false; layout.len()];
        for &value in layout {
            match seen.get_mut(value) {
                Some(slot) if !*slot => *slot = true,
                Some(_) => {
                    return Err(SeatError::invalid_argument(format!(
                        "number {value} appears more than once"
                    )));
                }
                None => {
                    return Err(SeatError::invalid_argument(format!(
                        "number {value} out of range for {} seats",
                        layout.len()
                    )));
                }
            }
        }

        let mut game = Self::with_rng(options, rng);
        game.numbers = layout.iter().copied().map(PrivateNumber::new).collect();
        game.round = round;
        game.x = game.initial_x();
        game.assert_invariants();
        Ok(game)
    }

    // ─────────────────────────────────────────────────────────────
    //  Queries
    // ─────────────────────────────────────────────────────────────

    /// Number of seats.
    pub fn player_count(&self) -> usize {
        self.numbers.len()
    }

    /// Current round, starting at 1.
    pub fn round(&self) -> usize {
        self.round
    }

    /// Rule overrides in effect.
    pub fn options(&self) -> &SeatOptions {
        &self.options
    }

    /// Streak length that ends the game at the current size.
    pub fn win_streak_length(&self) -> usize {
        self.options.win_streak_length_for(self.player_count())
    }

    /// Number of X numbers at the current size.
    pub fn x_count(&self) -> usize {
        self.options.x_count_for(self.player_count())
    }

    /// The whole board: entry `i` is the number in seat `i`.
    pub fn layout(&self) -> &[PrivateNumber] {
        &self.numbers
    }

    /// The number held in `seat`.
    pub fn number_in_seat(&self, seat: Seat) -> Result<PrivateNumber, SeatError> {
        self.numbers.get(seat.index()).copied().ok_or_else(|| {
            SeatError::invalid_argument(format!(
                "seat {seat} out of range for {} seats",
                self.player_count()
            ))
        })
    }

    /// The seat holding `number`.
    pub fn seat_of_number(&self, number: PrivateNumber) -> Result<Seat, SeatError> {
        self.numbers
            .iter()
            .position(|&n| n == number)
            .map(Seat::new)
            .ok_or_else(|| {
                SeatError::invalid_argument(format!(
                    "number {number} out of range for {} seats",
                    self.player_count()
                ))
            })
    }

    /// Numbers currently X.
    pub fn current_x(&self) -> &XSet {
        &self.x
    }

    /// Whether `number` is currently X.
    pub fn is_x(&self, number: PrivateNumber) -> bool {
        self.x.contains(number)
    }

    /// Seats whose number is currently X, in seat order.
    pub fn x_seats(&self) -> Vec<Seat> {
        Seat::all(self.player_count())
            .filter(|seat| self.is_x(self.numbers[seat.index()]))
            .collect()
    }

    /// Longest streak on the board, computed on first use after a change.
    pub fn longest_streak(&self) -> StreakResult {
        if let Some(result) = self.cached_streak.get() {
            return result;
        }
        let result = streak::longest_streak(&self.numbers, &self.x);
        self.cached_streak.set(Some(result));
        result
    }

    /// Whether the game has ended.
    pub fn game_over(&self) -> bool {
        rules::is_game_over(
            self.player_count(),
            self.win_streak_length(),
            &self.longest_streak(),
        )
    }

    /// Seats of the winning run, in walking order.
    ///
    /// Fails with `InvalidState` unless exactly one run has the winning
    /// length. A ring that is entirely one winning run returns every seat.
    pub fn winners(&self) -> Result<Vec<Seat>, SeatError> {
        let result = self.longest_streak();
        let seats = self.player_count();
        let length = self.win_streak_length();

        let full_ring = seats > 0 && seats == length && result.longest_streak() == seats;
        if !full_ring && (result.longest_streak() != length || result.instances() != 1) {
            return Err(SeatError::invalid_state(format!(
                "no unique winning streak: need {length}, found {result}"
            )));
        }

        Ok(result.seats(seats))
    }

    // ─────────────────────────────────────────────────────────────
    //  Mutations
    // ─────────────────────────────────────────────────────────────

    /// Exchanges the numbers held in seats `a` and `b`.
    #[instrument(skip(self), fields(round = self.round))]
    pub fn swap_seats(&mut self, a: Seat, b: Seat) -> Result<(), SeatError> {
        self.number_in_seat(a)?;
        self.number_in_seat(b)?;

        self.numbers.swap(a.index(), b.index());
        self.invalidate();
        debug!(%a, %b, "Swapped seats");
        self.assert_invariants();
        Ok(())
    }

    /// Advances to the next round, moving every X up by one number.
    #[instrument(skip(self), fields(round = self.round))]
    pub fn new_round(&mut self) {
        self.round += 1;
        let seats = self.player_count();
        self.x = if self.x.len() == self.x_count() {
            self.x.rotated(seats)
        } else {
            self.initial_x()
        };
        self.invalidate();
        info!(round = self.round, x = %self.x, "New round");
        self.assert_invariants();
    }

    /// Re-places every number (see [`placement`]) so the board is not already won.
    #[instrument(skip(self), fields(seats = self.player_count()))]
    pub fn shuffle(&mut self) -> Result<(), SeatError> {
        let seats = self.player_count();
        let length = self.win_streak_length();
        let x = self.x.clone();

        let layout = placement::place(
            seats,
            &x,
            |layout| {
                seats < MIN_PLAYERS
                    || !rules::is_game_over(seats, length, &streak::longest_streak(layout, &x))
            },
            &mut self.rng,
        )?;

        self.numbers = layout;
        self.invalidate();
        info!(seats, "Shuffled board");
        self.assert_invariants();
        Ok(())
    }

    /// Seats a newcomer at a random seat with a random number.
    ///
    /// Seats and numbers at or above the chosen ones move up by one. Among
    /// all (number, seat) choices, tried in random order, the first that
    /// does not end the game and does not lengthen the longest streak is
    /// taken; failing that, the first that does not end the game. Below
    /// four seats the game is degenerate and the first choice is taken.
    ///
    /// Fails with `ConstraintUnsatisfiable`, leaving the game unchanged, if
    /// every choice would end the game.
    #[instrument(skip(self), fields(seats = self.player_count()))]
    pub fn add_seat(&mut self) -> Result<Seat, SeatError> {
        let seats = self.player_count() + 1;
        let length = self.options.win_streak_length_for(seats);
        let x = XSet::initial(self.options.x_count_for(seats), seats, self.round);
        let longest_before = self.longest_streak().longest_streak().max(1);

        let mut numbers: Vec<PrivateNumber> = PrivateNumber::all(seats).collect();
        let mut targets: Vec<Seat> = Seat::all(seats).collect();
        numbers.shuffle(&mut self.rng);
        targets.shuffle(&mut self.rng);

        let mut fallback = None;
        for &number in &numbers {
            for &seat in &targets {
                let layout = self.layout_with(seat, number);
                if seats < MIN_PLAYERS {
                    return Ok(self.commit_insert(seat, number, layout, x, None));
                }

                let result = streak::longest_streak(&layout, &x);
                if rules::is_game_over(seats, length, &result) {
                    continue;
                }
                if result.longest_streak() <= longest_before {
                    return Ok(self.commit_insert(seat, number, layout, x, Some(result)));
                }
                if fallback.is_none() {
                    fallback = Some((seat, number, layout, result));
                }
            }
        }

        match fallback {
            Some((seat, number, layout, result)) => {
                Ok(self.commit_insert(seat, number, layout, x, Some(result)))
            }
            None => Err(SeatError::constraint_unsatisfiable(format!(
                "every insertion into {} seats ends the game",
                seats - 1
            ))),
        }
    }

    /// Removes `seat`, closing the gaps in seat indices and numbers.
    ///
    /// Returns the number that left with the seat. X numbers above it move
    /// down with everyone else; an X on the removed number passes to the
    /// number that takes its value.
    #[instrument(skip(self), fields(seats = self.player_count()))]
    pub fn remove_seat(&mut self, seat: Seat) -> Result<PrivateNumber, SeatError> {
        let removed = self.number_in_seat(seat)?;

        self.numbers.remove(seat.index());
        for number in &mut self.numbers {
            *number = number.shifted_down_past(removed);
        }

        let seats = self.player_count();
        let x = self.x.compacted_after_removal(removed, seats);
        self.x = if x.len() == self.x_count() {
            x
        } else {
            self.initial_x()
        };
        self.invalidate();
        info!(%seat, seats, "Removed seat");
        self.assert_invariants();
        Ok(removed)
    }

    /// Empties the table and returns to round 1.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.numbers.clear();
        self.x = XSet::new();
        self.round = 1;
        self.invalidate();
        debug!("Reset game");
    }

    // ─────────────────────────────────────────────────────────────
    //  Internals
    // ─────────────────────────────────────────────────────────────

    pub(crate) fn cached_streak(&self) -> Option<StreakResult> {
        self.cached_streak.get()
    }

    fn invalidate(&self) {
        self.cached_streak.set(None);
    }

    fn initial_x(&self) -> XSet {
        XSet::initial(self.x_count(), self.player_count(), self.round)
    }

    /// Board after inserting `number` at `seat`, everything at or above both moved up.
    fn layout_with(&self, seat: Seat, number: PrivateNumber) -> Vec<PrivateNumber> {
        let mut layout: Vec<PrivateNumber> = self
            .numbers
            .iter()
            .map(|n| n.shifted_up_from(number))
            .collect();
        layout.insert(seat.index(), number);
        layout
    }

    fn commit_insert(
        &mut self,
        seat: Seat,
        number: PrivateNumber,
        layout: Vec<PrivateNumber>,
        x: XSet,
        result: Option<StreakResult>,
    ) -> Seat {
        self.numbers = layout;
        self.x = x;
        self.cached_streak.set(result);
        info!(%seat, %number, seats = self.player_count(), "Added seat");
        self.assert_invariants();
        seat
    }

    fn assert_invariants(&self) {
        debug_assert!(
            SeatInvariants::check_all(self).is_ok(),
            "Seat invariants violated: {:?}",
            SeatInvariants::check_all(self)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(layout: &[usize], round: usize) -> SeatGame {
        SeatGame::from_layout(layout, round, SeatOptions::default(), StdRng::seed_from_u64(7))
            .unwrap()
    }

    fn values(game: &SeatGame) -> Vec<usize> {
        game.layout().iter().map(|n| n.value()).collect()
    }

    #[test]
    fn test_from_layout_rejects_non_bijection() {
        let rng = StdRng::seed_from_u64(0);
        assert!(SeatGame::from_layout(&[0, 1, 1], 1, SeatOptions::default(), rng.clone()).is_err());
        assert!(SeatGame::from_layout(&[0, 1, 3], 1, SeatOptions::default(), rng.clone()).is_err());
        assert!(SeatGame::from_layout(&[0, 1, 2], 0, SeatOptions::default(), rng).is_err());
    }

    #[test]
    fn test_cache_cleared_by_swap() {
        let mut game = game(&[6, 0, 1, 2, 3, 4, 7, 5], 7);
        assert_eq!(game.longest_streak().longest_streak(), 5);
        assert!(game.cached_streak().is_some());

        game.swap_seats(Seat::new(1), Seat::new(6)).unwrap();
        assert!(game.cached_streak().is_none());
        assert!(game.longest_streak().longest_streak() < 5);
    }

    #[test]
    fn test_failed_swap_leaves_board_alone() {
        let mut game = game(&[1, 3, 0, 2], 1);
        let _ = game.longest_streak();
        assert!(game.swap_seats(Seat::new(0), Seat::new(4)).is_err());
        assert_eq!(values(&game), vec![1, 3, 0, 2]);
        assert!(game.cached_streak().is_some());
    }

    #[test]
    fn test_new_round_rotates_and_clears_cache() {
        let mut game = game(&[0, 2, 4, 6, 1, 3, 5, 7], 1);
        assert_eq!(game.current_x().iter().collect::<Vec<_>>(), vec![PrivateNumber::new(0)]);
        let _ = game.longest_streak();

        game.new_round();
        assert_eq!(game.round(), 2);
        assert_eq!(game.current_x().iter().collect::<Vec<_>>(), vec![PrivateNumber::new(1)]);
        assert!(game.cached_streak().is_none());
    }

    #[test]
    fn test_remove_seat_renumbers() {
        let mut game = game(&[4, 0, 6, 2, 5, 1, 3], 4);
        assert_eq!(game.current_x().iter().collect::<Vec<_>>(), vec![PrivateNumber::new(3)]);

        let removed = game.remove_seat(Seat::new(3)).unwrap();
        assert_eq!(removed, PrivateNumber::new(2));
        assert_eq!(values(&game), vec![3, 0, 5, 4, 1, 2]);
        // X was 3, which slid down to 2.
        assert_eq!(game.current_x().iter().collect::<Vec<_>>(), vec![PrivateNumber::new(2)]);
    }

    #[test]
    fn test_remove_below_x_threshold_clears_x() {
        let mut game = game(&[0, 2, 4, 1, 3, 5], 2);
        assert_eq!(game.x_count(), 1);
        game.remove_seat(Seat::new(0)).unwrap();
        assert_eq!(game.x_count(), 0);
        assert!(game.current_x().is_empty());
    }

    #[test]
    fn test_layout_with_shifts_everything_at_or_above() {
        let game = game(&[2, 0, 1], 1);
        let layout = game.layout_with(Seat::new(1), PrivateNumber::new(1));
        let values: Vec<usize> = layout.iter().map(|n| n.value()).collect();
        assert_eq!(values, vec![3, 1, 0, 2]);
    }

    #[test]
    fn test_add_seat_grows_to_bijection() {
        let mut game = SeatGame::seeded(SeatOptions::default(), 11);
        for expected in 1..=12 {
            let seat = game.add_seat().unwrap();
            assert!(seat.index() < expected);
            assert_eq!(game.player_count(), expected);
            let mut sorted = values(&game);
            sorted.sort_unstable();
            assert!(sorted.into_iter().eq(0..expected));
            if expected >= MIN_PLAYERS {
                assert!(!game.game_over(), "game over after growing to {expected}");
            }
        }
    }

    #[test]
    fn test_reset() {
        let mut game = game(&[0, 2, 4, 1, 3, 5], 3);
        game.reset();
        assert_eq!(game.player_count(), 0);
        assert_eq!(game.round(), 1);
        assert!(game.current_x().is_empty());
    }
}
