//! Error codes for the Chess Teams backend API.
//!
//! This module defines all error codes used throughout the application.
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the Chess Teams backend API.
///
/// Each variant maps to a canonical SCREAMING_SNAKE_CASE string that appears
/// in HTTP responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Turn machine rejections
    /// Not this player's turn (wrong team or wrong rotation slot)
    OutOfTurn,
    /// Turn deadline passed; route to timeout handling
    TurnExpired,
    /// Timeout claimed before the deadline
    TurnNotExpired,
    /// Game already concluded
    GameFinished,
    /// Hand-brain role or piece-hint violation
    HandBrainViolation,
    /// Move token failed to parse
    MalformedMove,
    /// Move is not legal in the current position
    IllegalMove,

    // Request validation
    /// Invalid team side token
    InvalidSide,
    /// Invalid piece-type token
    InvalidPiece,
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,

    // Resource not found
    /// Game not found
    GameNotFound,
    /// Team not found
    TeamNotFound,
    /// Membership not found
    MembershipNotFound,
    /// User not found
    UserNotFound,
    /// General not found error
    NotFound,

    // Business logic conflicts
    /// User already has an active membership in this game
    AlreadyJoined,
    /// Optimistic lock conflict
    OptimisticLock,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // System errors
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Database timeout (gateway timeout)
    DbTimeout,
    /// Data corruption detected
    DataCorruption,
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    ///
    /// This is the exact string that appears in HTTP responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OutOfTurn => "OUT_OF_TURN",
            Self::TurnExpired => "TURN_EXPIRED",
            Self::TurnNotExpired => "TURN_NOT_EXPIRED",
            Self::GameFinished => "GAME_FINISHED",
            Self::HandBrainViolation => "HAND_BRAIN_VIOLATION",
            Self::MalformedMove => "MALFORMED_MOVE",
            Self::IllegalMove => "ILLEGAL_MOVE",

            Self::InvalidSide => "INVALID_SIDE",
            Self::InvalidPiece => "INVALID_PIECE",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::TeamNotFound => "TEAM_NOT_FOUND",
            Self::MembershipNotFound => "MEMBERSHIP_NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::AlreadyJoined => "ALREADY_JOINED",
            Self::OptimisticLock => "OPTIMISTIC_LOCK",
            Self::Conflict => "CONFLICT",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::DataCorruption => "DATA_CORRUPTION",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_strings() {
        assert_eq!(ErrorCode::OutOfTurn.as_str(), "OUT_OF_TURN");
        assert_eq!(ErrorCode::TurnExpired.as_str(), "TURN_EXPIRED");
        assert_eq!(ErrorCode::TurnNotExpired.as_str(), "TURN_NOT_EXPIRED");
        assert_eq!(ErrorCode::GameFinished.as_str(), "GAME_FINISHED");
        assert_eq!(
            ErrorCode::HandBrainViolation.as_str(),
            "HAND_BRAIN_VIOLATION"
        );
        assert_eq!(ErrorCode::MalformedMove.as_str(), "MALFORMED_MOVE");
        assert_eq!(ErrorCode::IllegalMove.as_str(), "ILLEGAL_MOVE");
        assert_eq!(ErrorCode::GameNotFound.as_str(), "GAME_NOT_FOUND");
        assert_eq!(ErrorCode::MembershipNotFound.as_str(), "MEMBERSHIP_NOT_FOUND");
        assert_eq!(ErrorCode::AlreadyJoined.as_str(), "ALREADY_JOINED");
        assert_eq!(ErrorCode::OptimisticLock.as_str(), "OPTIMISTIC_LOCK");
        assert_eq!(ErrorCode::DbError.as_str(), "DB_ERROR");
        assert_eq!(ErrorCode::DbUnavailable.as_str(), "DB_UNAVAILABLE");
        assert_eq!(ErrorCode::DataCorruption.as_str(), "DATA_CORRUPTION");
        assert_eq!(ErrorCode::Internal.as_str(), "INTERNAL");
        assert_eq!(ErrorCode::ConfigError.as_str(), "CONFIG_ERROR");
    }

    #[test]
    fn test_display_trait() {
        assert_eq!(format!("{}", ErrorCode::OutOfTurn), "OUT_OF_TURN");
        assert_eq!(
            format!("{}", ErrorCode::HandBrainViolation),
            "HAND_BRAIN_VIOLATION"
        );
        assert_eq!(format!("{}", ErrorCode::TurnNotExpired), "TURN_NOT_EXPIRED");
    }
}
