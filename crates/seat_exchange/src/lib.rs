//! Seat Exchange - rules engine for a seat-swapping party game
//!
//! Players sit in a ring, each holding a secret number. Between rounds they
//! swap seats; the game ends when exactly one run of neighbouring seats
//! holds consecutive numbers of the winning length, read in either
//! direction. A handful of numbers each round are X: they never count as
//! part of a streak and consecutive numbers are judged as if they were gone.
//!
//! # Architecture
//!
//! - **Game**: [`SeatGame`] owns the board, the X set and the round counter
//! - **Rules**: policy table from player count to streak length and X count
//! - **Streaks**: X-aware adjacency and longest-run evaluation
//! - **Placement**: tiered shuffle that never hands out a won board
//! - **Invariants**: properties checked after every mutation in debug builds
//!
//! # Example
//!
//! ```
//! use seat_exchange::{SeatGame, SeatOptions, Seat};
//!
//! let mut game = SeatGame::seeded(SeatOptions::default(), 42);
//! for _ in 0..8 {
//!     game.add_seat()?;
//! }
//! assert!(!game.game_over());
//!
//! game.swap_seats(Seat::new(0), Seat::new(5))?;
//! game.new_round();
//! println!("{}", game.longest_streak());
//! # Ok::<(), seat_exchange::SeatError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod error;
mod game;
mod invariants;
mod placement;
mod rules;
mod streak;
mod types;
mod xset;

// Crate-level exports - Configuration
pub use config::{ConfigError, SeatOptions};

// Crate-level exports - Errors
pub use error::{SeatError, SeatErrorKind};

// Crate-level exports - Game engine
pub use game::SeatGame;

// Crate-level exports - Invariants
pub use invariants::{
    BijectionInvariant, CacheCoherentInvariant, Invariant, InvariantSet, InvariantViolation,
    SeatInvariants, XSetInvariant,
};

// Crate-level exports - Placement
pub use placement::{BACKTRACK_NODE_LIMIT, PLACEMENT_ATTEMPTS, PlacementStrategy};

// Crate-level exports - Rules
pub use rules::{MIN_PLAYERS, is_game_over, win_streak_length, x_count};

// Crate-level exports - Streak evaluation
pub use streak::{adjacent_numbers, longest_streak, numbers_clash};

// Crate-level exports - Core types
pub use types::{Direction, PrivateNumber, Seat, StreakResult};
pub use xset::XSet;
