//! Error types for the seat engine.

use derive_more::{Display, Error};

/// What went wrong in a seat operation.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum SeatErrorKind {
    /// A seat or number index was out of range, or the input was malformed.
    #[display("Invalid argument: {}", _0)]
    InvalidArgument(String),

    /// The game is not in a state that allows the operation.
    #[display("Invalid state: {}", _0)]
    InvalidState(String),

    /// Placement could not find an arrangement satisfying its constraints.
    #[display("Constraint unsatisfiable: {}", _0)]
    ConstraintUnsatisfiable(String),
}

/// Seat engine error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Seat error: {} at {}:{}", kind, file, line)]
pub struct SeatError {
    /// Error kind.
    pub kind: SeatErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl SeatError {
    /// Creates a new error with caller location tracking.
    #[track_caller]
    pub fn new(kind: SeatErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Out-of-range index or malformed input.
    #[track_caller]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(SeatErrorKind::InvalidArgument(message.into()))
    }

    /// Operation not allowed in the current state.
    #[track_caller]
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::new(SeatErrorKind::InvalidState(message.into()))
    }

    /// Search exhausted without a valid arrangement.
    #[track_caller]
    pub fn constraint_unsatisfiable(message: impl Into<String>) -> Self {
        Self::new(SeatErrorKind::ConstraintUnsatisfiable(message.into()))
    }

    /// Returns the error kind.
    pub fn kind(&self) -> &SeatErrorKind {
        &self.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_records_caller_location() {
        let err = SeatError::invalid_state("no winner");
        assert_eq!(err.file, file!());
        assert!(err.to_string().contains("Invalid state: no winner"));
    }
}
