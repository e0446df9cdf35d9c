//! Streak detection around the ring.
//!
//! A streak is a run of seats, walked in one direction, whose numbers go up
//! by one at each step. X numbers are transparent in number space (4 and 6
//! are consecutive when 5 is X) but a seat holding an X breaks any streak.

use crate::types::{Direction, PrivateNumber, Seat, StreakResult};
use crate::xset::XSet;
use strum::IntoEnumIterator;
use tracing::{instrument, trace};

/// Whether `second` directly follows `first` in number space, skipping X numbers.
///
/// Neither endpoint may itself be X.
pub fn adjacent_numbers(
    first: PrivateNumber,
    second: PrivateNumber,
    x: &XSet,
    count: usize,
) -> bool {
    if x.contains(first) || x.contains(second) {
        return false;
    }

    let mut number = first;
    for _ in 1..count {
        number = number.next(count);
        if number == second {
            return true;
        }
        if !x.contains(number) {
            return false;
        }
    }
    false
}

/// Whether two seat neighbours form a streak in either walking direction.
pub fn numbers_clash(a: PrivateNumber, b: PrivateNumber, x: &XSet, count: usize) -> bool {
    adjacent_numbers(a, b, x, count) || adjacent_numbers(b, a, x, count)
}

/// Longest streak in the ring, with the number of runs tying for it.
///
/// Every seat is tried as a start in both directions; clockwise starts are
/// visited first (seat A upward), then counterclockwise starts (last seat
/// downward). The first run reaching the maximum is the representative one.
#[instrument(skip_all, fields(seats = numbers.len(), x = %x))]
pub fn longest_streak(numbers: &[PrivateNumber], x: &XSet) -> StreakResult {
    let seats = numbers.len();
    let number_at = |seat: Seat| numbers[seat.index()];

    let mut longest = 0;
    let mut instances = 0;
    let mut starting_seat = Seat::new(0);
    let mut best_direction = Direction::Clockwise;

    for direction in Direction::iter() {
        let starts: Vec<Seat> = match direction {
            Direction::Clockwise => Seat::all(seats).collect(),
            Direction::CounterClockwise => Seat::all(seats).rev().collect(),
        };

        for start in starts {
            if x.contains(number_at(start)) {
                continue;
            }

            let mut streak = 1;
            while streak < seats
                && adjacent_numbers(
                    number_at(start.step(direction, streak - 1, seats)),
                    number_at(start.step(direction, streak, seats)),
                    x,
                    seats,
                )
            {
                streak += 1;
            }

            if streak > longest {
                longest = streak;
                instances = 1;
                starting_seat = start;
                best_direction = direction;
            } else if streak == longest {
                instances += 1;
            }
        }
    }

    let result = StreakResult::new(longest, instances, starting_seat, best_direction);
    trace!(%result, "Evaluated streaks");
    result
}
