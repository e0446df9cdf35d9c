//! Initial placement of numbers around the ring.
//!
//! A uniformly random permutation often hands small tables an already won
//! (or nearly won) board, while for large tables the chance is small. The
//! strategy is therefore tiered by seat count:
//!
//! - fewer than 6 seats: plain random permutation;
//! - 6 to 8 seats: randomized backtracking that places the non-X numbers so
//!   no two neighbours are consecutive, then drops the X numbers in;
//! - more than 8 seats: random permutation followed by a greedy local repair.
//!
//! Every candidate is then checked by the caller's acceptance test and
//! redrawn a bounded number of times.

use crate::error::SeatError;
use crate::streak::numbers_clash;
use crate::types::PrivateNumber;
use crate::xset::XSet;
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, instrument};

/// How many candidate boards are drawn before giving up.
pub const PLACEMENT_ATTEMPTS: usize = 64;

/// Upper bound on search nodes visited by one backtracking run.
pub const BACKTRACK_NODE_LIMIT: usize = 100_000;

/// Placement strategy for a table size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum PlacementStrategy {
    /// Plain random permutation.
    #[display("random")]
    Random,
    /// Backtracking construction with no consecutive neighbours.
    #[display("backtracking")]
    Backtracking,
    /// Random permutation with greedy neighbour repair.
    #[display("repair")]
    Repair,
}

impl PlacementStrategy {
    /// Strategy used for `seats` seats.
    pub fn for_seats(seats: usize) -> Self {
        match seats {
            0..6 => PlacementStrategy::Random,
            6..=8 => PlacementStrategy::Backtracking,
            _ => PlacementStrategy::Repair,
        }
    }
}

/// Draws a seat→number layout for `seats` seats that `acceptable` agrees to.
///
/// Fails with `ConstraintUnsatisfiable` if the backtracking search has no
/// solution, or if no acceptable layout turned up within
/// [`PLACEMENT_ATTEMPTS`] draws.
#[instrument(skip(x, acceptable, rng), fields(x = %x))]
pub fn place<R, F>(
    seats: usize,
    x: &XSet,
    acceptable: F,
    rng: &mut R,
) -> Result<Vec<PrivateNumber>, SeatError>
where
    R: Rng + ?Sized,
    F: Fn(&[PrivateNumber]) -> bool,
{
    let strategy = PlacementStrategy::for_seats(seats);

    for attempt in 1..=PLACEMENT_ATTEMPTS {
        let layout = match strategy {
            PlacementStrategy::Random => random_permutation(seats, rng),
            PlacementStrategy::Backtracking => backtracking(seats, x, rng)?,
            PlacementStrategy::Repair => repaired_permutation(seats, x, rng),
        };

        if acceptable(&layout) {
            debug!(%strategy, attempt, "Placement accepted");
            return Ok(layout);
        }
    }

    Err(SeatError::constraint_unsatisfiable(format!(
        "no acceptable {strategy} placement for {seats} seats in {PLACEMENT_ATTEMPTS} attempts"
    )))
}

/// Uniformly random permutation of `0..seats`.
pub fn random_permutation<R: Rng + ?Sized>(seats: usize, rng: &mut R) -> Vec<PrivateNumber> {
    let mut layout: Vec<PrivateNumber> = PrivateNumber::all(seats).collect();
    layout.shuffle(rng);
    layout
}

// ─────────────────────────────────────────────────────────────
//  Backtracking
// ─────────────────────────────────────────────────────────────

/// Whether two positions in a `count`-long cycle of values are neighbours.
fn cyclic_neighbours(a: usize, b: usize, count: usize) -> bool {
    let diff = (a + count - b) % count;
    diff == 1 || diff == count - 1
}

struct Search<'a, R: Rng + ?Sized> {
    count: usize,
    partial: Vec<usize>,
    used: Vec<bool>,
    nodes: usize,
    rng: &'a mut R,
}

impl<R: Rng + ?Sized> Search<'_, R> {
    fn extend(&mut self) -> Result<bool, SeatError> {
        self.nodes += 1;
        if self.nodes > BACKTRACK_NODE_LIMIT {
            return Err(SeatError::constraint_unsatisfiable(format!(
                "backtracking over {} numbers exceeded {BACKTRACK_NODE_LIMIT} nodes",
                self.count
            )));
        }

        if self.partial.len() == self.count {
            // The ring closes: last and first are neighbours too.
            return Ok(self.count < 2
                || !cyclic_neighbours(self.partial[self.count - 1], self.partial[0], self.count));
        }

        let mut candidates: Vec<usize> = (0..self.count).filter(|&v| !self.used[v]).collect();
        candidates.shuffle(&mut *self.rng);

        for value in candidates {
            if let Some(&last) = self.partial.last()
                && cyclic_neighbours(last, value, self.count)
            {
                continue;
            }

            self.used[value] = true;
            self.partial.push(value);
            if self.extend()? {
                return Ok(true);
            }
            self.partial.pop();
            self.used[value] = false;
        }

        Ok(false)
    }
}

/// Builds a layout in which no two non-X seat neighbours hold consecutive numbers.
///
/// The non-X numbers are ranked `0..m` (X numbers are transparent, so ranks
/// that differ by one are consecutive in play), arranged around a circle with
/// no neighbouring ranks, mapped back to real numbers, and the X numbers are
/// then inserted at random positions.
pub fn backtracking<R: Rng + ?Sized>(
    seats: usize,
    x: &XSet,
    rng: &mut R,
) -> Result<Vec<PrivateNumber>, SeatError> {
    let content: Vec<PrivateNumber> = PrivateNumber::all(seats).filter(|&n| !x.contains(n)).collect();
    let count = content.len();

    let mut search = Search {
        count,
        partial: Vec::with_capacity(count),
        used: vec![false; count],
        nodes: 0,
        rng: &mut *rng,
    };

    if !search.extend()? {
        return Err(SeatError::constraint_unsatisfiable(format!(
            "no arrangement of {count} numbers without consecutive neighbours"
        )));
    }

    let mut layout: Vec<PrivateNumber> =
        search.partial.into_iter().map(|rank| content[rank]).collect();

    let mut xs: Vec<PrivateNumber> = x.iter().collect();
    xs.shuffle(rng);
    for number in xs {
        let position = rng.gen_range(0..=layout.len());
        layout.insert(position, number);
    }

    Ok(layout)
}

// ─────────────────────────────────────────────────────────────
//  Repair
// ─────────────────────────────────────────────────────────────

fn clash_at(layout: &[PrivateNumber], seat: usize, x: &XSet) -> bool {
    let seats = layout.len();
    numbers_clash(layout[seat % seats], layout[(seat + 1) % seats], x, seats)
}

/// Random permutation with consecutive neighbours greedily swapped apart.
///
/// For each seat whose clockwise neighbour holds a consecutive number, the
/// first swap partner (scanning from a random offset) that leaves all four
/// affected neighbour pairs clean is taken. Seats with no such partner are
/// left as they are.
pub fn repaired_permutation<R: Rng + ?Sized>(
    seats: usize,
    x: &XSet,
    rng: &mut R,
) -> Vec<PrivateNumber> {
    let mut layout = random_permutation(seats, rng);
    if seats < 4 {
        return layout;
    }

    for i in 0..seats {
        if !clash_at(&layout, i, x) {
            continue;
        }

        let before = (i + seats - 1) % seats;
        let after = (i + 1) % seats;
        let offset = rng.gen_range(0..seats);

        for k in 0..seats {
            let j = (offset + k) % seats;
            if j == i || j == after || j == before {
                continue;
            }

            layout.swap(i, j);
            let j_before = (j + seats - 1) % seats;
            let clean = [before, i, j_before, j]
                .iter()
                .all(|&seat| !clash_at(&layout, seat, x));
            if clean {
                break;
            }
            layout.swap(i, j);
        }
    }

    layout
}
