//! Core domain types for the seat ring.
//!
//! `Seat` and `PrivateNumber` are both small integers in `0..N`, but they
//! mean different things and are never interchangeable. Each is a newtype
//! with its own wrapping arithmetic scoped to the ring size, and the raw
//! integer is only reachable through an explicit accessor.

use crate::error::SeatError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum::EnumIter;

/// Direction of travel around the ring.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, derive_more::Display,
)]
pub enum Direction {
    /// Increasing seat index (A, B, C, ...).
    #[display("clockwise")]
    Clockwise,
    /// Decreasing seat index (C, B, A, ...).
    #[display("counterclockwise")]
    CounterClockwise,
}

/// Index moved `steps` places around a ring of `modulus`; an empty ring leaves it alone.
fn wrap(index: usize, direction: Direction, steps: usize, modulus: usize) -> usize {
    if modulus == 0 {
        return index;
    }
    let index = index % modulus;
    let steps = steps % modulus;
    match direction {
        Direction::Clockwise => (index + steps) % modulus,
        Direction::CounterClockwise => (index + modulus - steps) % modulus,
    }
}

// ─────────────────────────────────────────────────────────────
//  Seat
// ─────────────────────────────────────────────────────────────

/// A position around the table, `0..N`.
///
/// Seats render as letters: `A` for seat 0, `Z` for seat 25, then `AA`,
/// `AB` and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Seat(usize);

impl Seat {
    /// Creates a seat from its index.
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the seat index.
    pub const fn index(self) -> usize {
        self.0
    }

    /// Walks `steps` seats in `direction` around a ring of `seats` seats.
    pub fn step(self, direction: Direction, steps: usize, seats: usize) -> Self {
        Self(wrap(self.0, direction, steps, seats))
    }

    /// The clockwise neighbour.
    pub fn next(self, seats: usize) -> Self {
        self.step(Direction::Clockwise, 1, seats)
    }

    /// The counterclockwise neighbour.
    pub fn prev(self, seats: usize) -> Self {
        self.step(Direction::CounterClockwise, 1, seats)
    }

    /// All seats of a ring of `seats` seats, in order.
    pub fn all(seats: usize) -> impl DoubleEndedIterator<Item = Seat> {
        (0..seats).map(Seat)
    }

    /// Letter label for the seat.
    pub fn label(self) -> String {
        let mut letters = Vec::new();
        let mut n = self.0 + 1;
        while n > 0 {
            n -= 1;
            letters.push(char::from(b'A' + (n % 26) as u8));
            n /= 26;
        }
        letters.iter().rev().collect()
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.label())
    }
}

impl FromStr for Seat {
    type Err = SeatError;

    /// Parses a seat from its letter label (`"C"`, `"ab"`) or a decimal index.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(SeatError::invalid_argument("empty seat label"));
        }

        if s.chars().all(|c| c.is_ascii_digit()) {
            return s
                .parse::<usize>()
                .map(Seat)
                .map_err(|e| SeatError::invalid_argument(format!("bad seat index {s:?}: {e}")));
        }

        let mut n: usize = 0;
        for c in s.chars() {
            if !c.is_ascii_alphabetic() {
                return Err(SeatError::invalid_argument(format!("bad seat label {s:?}")));
            }
            let digit = (c.to_ascii_uppercase() as u8 - b'A') as usize + 1;
            n = n
                .checked_mul(26)
                .and_then(|n| n.checked_add(digit))
                .ok_or_else(|| SeatError::invalid_argument(format!("seat label {s:?} too long")))?;
        }
        Ok(Seat(n - 1))
    }
}

// ─────────────────────────────────────────────────────────────
//  PrivateNumber
// ─────────────────────────────────────────────────────────────

/// The secret number held in a seat, `0..N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrivateNumber(usize);

impl PrivateNumber {
    /// Creates a number from its value.
    pub const fn new(value: usize) -> Self {
        Self(value)
    }

    /// Returns the numeric value.
    pub const fn value(self) -> usize {
        self.0
    }

    /// Walks `steps` numbers in `direction` through a number space of size `count`.
    pub fn step(self, direction: Direction, steps: usize, count: usize) -> Self {
        Self(wrap(self.0, direction, steps, count))
    }

    /// The next number up, wrapping to 0 after `count - 1`.
    pub fn next(self, count: usize) -> Self {
        self.step(Direction::Clockwise, 1, count)
    }

    /// All numbers `0..count`, in order.
    pub fn all(count: usize) -> impl DoubleEndedIterator<Item = PrivateNumber> {
        (0..count).map(PrivateNumber)
    }

    /// Makes room for an inserted `value`: numbers at or above it move up by one.
    pub(crate) fn shifted_up_from(self, value: PrivateNumber) -> Self {
        if self >= value { Self(self.0 + 1) } else { self }
    }

    /// Closes the gap left by a removed `value`: numbers above it move down by one.
    pub(crate) fn shifted_down_past(self, value: PrivateNumber) -> Self {
        if self > value { Self(self.0 - 1) } else { self }
    }
}

impl fmt::Display for PrivateNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

// ─────────────────────────────────────────────────────────────
//  StreakResult
// ─────────────────────────────────────────────────────────────

/// Outcome of one streak evaluation over the ring.
///
/// Walking from `starting_seat` in `direction`, the numbers of the
/// representative longest run increase (skipping X numbers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StreakResult {
    longest_streak: usize,
    instances: usize,
    starting_seat: Seat,
    direction: Direction,
}

impl StreakResult {
    /// Result for a ring with no streaks at all (every seat holds an X, or no seats).
    pub const EMPTY: StreakResult = StreakResult {
        longest_streak: 0,
        instances: 0,
        starting_seat: Seat(0),
        direction: Direction::Clockwise,
    };

    /// Creates a streak result.
    pub const fn new(
        longest_streak: usize,
        instances: usize,
        starting_seat: Seat,
        direction: Direction,
    ) -> Self {
        Self {
            longest_streak,
            instances,
            starting_seat,
            direction,
        }
    }

    /// Length of the longest run.
    pub const fn longest_streak(&self) -> usize {
        self.longest_streak
    }

    /// How many runs tie for the longest length.
    pub const fn instances(&self) -> usize {
        self.instances
    }

    /// First seat of the representative longest run.
    pub const fn starting_seat(&self) -> Seat {
        self.starting_seat
    }

    /// Direction in which the representative run is walked.
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Ordered seats of the representative run in a ring of `seats` seats.
    pub fn seats(&self, seats: usize) -> Vec<Seat> {
        if seats == 0 {
            return Vec::new();
        }
        (0..self.longest_streak)
            .map(|i| self.starting_seat.step(self.direction, i, seats))
            .collect()
    }
}

impl fmt::Display for StreakResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "longest streak {} ({} instance{}) from seat {} going {}",
            self.longest_streak,
            self.instances,
            if self.instances == 1 { "" } else { "s" },
            self.starting_seat,
            self.direction
        )
    }
}
