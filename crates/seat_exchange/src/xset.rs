//! The set of numbers currently designated X.

use crate::types::PrivateNumber;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Numbers excluded from streak formation this round.
///
/// Slots are kept in assignment order so that rotation moves each slot
/// independently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct XSet(Vec<PrivateNumber>);

impl XSet {
    /// An empty X set.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// X set built from explicit numbers, dropping duplicates.
    pub fn from_numbers(numbers: impl IntoIterator<Item = PrivateNumber>) -> Self {
        let mut slots = Vec::new();
        for number in numbers {
            if !slots.contains(&number) {
                slots.push(number);
            }
        }
        Self(slots)
    }

    /// Evenly spaced X numbers for `round` (1-based).
    ///
    /// The number space is divided into `x_count` parts; each X is the start
    /// of a part, offset by `round - 1`. With one X every number is X exactly
    /// once per `seats` rounds.
    pub fn initial(x_count: usize, seats: usize, round: usize) -> Self {
        if seats == 0 || x_count == 0 {
            return Self::new();
        }
        let x_count = x_count.min(seats);
        let offset = round.saturating_sub(1);
        Self::from_numbers(
            (0..x_count).map(|i| PrivateNumber::new((i * seats / x_count + offset) % seats)),
        )
    }

    /// Whether `number` is X.
    pub fn contains(&self, number: PrivateNumber) -> bool {
        self.0.contains(&number)
    }

    /// Number of X slots.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no X numbers.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The X numbers, in slot order.
    pub fn iter(&self) -> impl Iterator<Item = PrivateNumber> + '_ {
        self.0.iter().copied()
    }

    /// Every slot advanced by one number, wrapping at `seats`.
    pub fn rotated(&self, seats: usize) -> Self {
        if seats == 0 {
            return Self::new();
        }
        Self(self.0.iter().map(|x| x.next(seats)).collect())
    }

    /// The set after `removed` left the game and the numbers above it closed the gap.
    ///
    /// A slot on the removed number stays where it is, which makes the number
    /// that slid into that value X. Slots that collide are merged.
    pub(crate) fn compacted_after_removal(&self, removed: PrivateNumber, seats: usize) -> Self {
        if seats == 0 {
            return Self::new();
        }
        Self::from_numbers(self.0.iter().map(|&x| {
            if x == removed {
                PrivateNumber::new(x.value() % seats)
            } else {
                x.shifted_down_past(removed)
            }
        }))
    }
}

impl fmt::Display for XSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, x) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", x)?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(set: &XSet) -> Vec<usize> {
        set.iter().map(PrivateNumber::value).collect()
    }

    #[test]
    fn test_initial_single_x_follows_round() {
        assert_eq!(numbers(&XSet::initial(1, 8, 1)), vec![0]);
        assert_eq!(numbers(&XSet::initial(1, 8, 3)), vec![2]);
        assert_eq!(numbers(&XSet::initial(1, 8, 9)), vec![0]);
    }

    #[test]
    fn test_initial_multiple_x_evenly_spaced() {
        assert_eq!(numbers(&XSet::initial(2, 10, 1)), vec![0, 5]);
        assert_eq!(numbers(&XSet::initial(3, 9, 2)), vec![1, 4, 7]);
    }

    #[test]
    fn test_initial_empty_cases() {
        assert!(XSet::initial(0, 8, 1).is_empty());
        assert!(XSet::initial(1, 0, 1).is_empty());
    }

    #[test]
    fn test_rotation_wraps() {
        let set = XSet::from_numbers([PrivateNumber::new(6), PrivateNumber::new(2)]);
        assert_eq!(numbers(&set.rotated(7)), vec![0, 3]);
    }

    #[test]
    fn test_compaction() {
        let set = XSet::from_numbers([PrivateNumber::new(1), PrivateNumber::new(5)]);
        // 3 leaves an 8-seat game: 5 slides down to 4, 1 is untouched.
        assert_eq!(numbers(&set.compacted_after_removal(PrivateNumber::new(3), 7)), vec![1, 4]);
        // The top number leaves while X: the slot wraps to 0.
        let top = XSet::from_numbers([PrivateNumber::new(7)]);
        assert_eq!(numbers(&top.compacted_after_removal(PrivateNumber::new(7), 7)), vec![0]);
    }

    #[test]
    fn test_display() {
        let set = XSet::from_numbers([PrivateNumber::new(0), PrivateNumber::new(4)]);
        assert_eq!(set.to_string(), "{0, 4}");
        assert_eq!(XSet::new().to_string(), "{}");
    }
}
