//! Turn clock: whose turn it is, the deadline, and how both advance.
//!
//! `turn_team` strictly alternates on every accepted move, pass, or timeout,
//! and `ply` increases by exactly 1 per accepted event. There is no skip-ply
//! path.

use time::{Duration, OffsetDateTime};

use crate::errors::domain::{DomainError, ValidationKind};

/// One of the two sides in a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamSide {
    A,
    B,
}

impl TeamSide {
    pub fn opponent(&self) -> TeamSide {
        match self {
            TeamSide::A => TeamSide::B,
            TeamSide::B => TeamSide::A,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            TeamSide::A => "A",
            TeamSide::B => "B",
        }
    }
}

/// Clock state for the turn in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnClock {
    pub turn_team: TeamSide,
    pub ply: i32,
    pub deadline: OffsetDateTime,
}

impl TurnClock {
    pub fn is_expired(&self, now: OffsetDateTime) -> bool {
        now > self.deadline
    }
}

/// Deadline for a turn starting at `now` with a fixed per-move budget.
pub fn deadline_after(now: OffsetDateTime, turn_seconds: i32) -> OffsetDateTime {
    now + Duration::seconds(turn_seconds as i64)
}

/// Gate for a normal move attempt by `actor_side`.
pub fn check_move(clock: &TurnClock, actor_side: TeamSide, now: OffsetDateTime) -> Result<(), DomainError> {
    if actor_side != clock.turn_team {
        return Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            format!("It is team {}'s turn", clock.turn_team.as_str()),
        ));
    }
    if clock.is_expired(now) {
        return Err(DomainError::validation(
            ValidationKind::TurnExpired,
            "Turn deadline has passed; claim the timeout instead",
        ));
    }
    Ok(())
}

/// Gate for a timeout claim. A second claim after the turn already advanced
/// fails here too, because the fresh deadline is not expired yet.
pub fn check_timeout(clock: &TurnClock, now: OffsetDateTime) -> Result<(), DomainError> {
    if !clock.is_expired(now) {
        return Err(DomainError::validation(
            ValidationKind::TurnNotExpired,
            "Turn deadline has not passed",
        ));
    }
    Ok(())
}

/// Clock state after an accepted move, pass, or timeout: flipped team,
/// ply + 1, fresh deadline.
pub fn advanced(clock: &TurnClock, now: OffsetDateTime, turn_seconds: i32) -> TurnClock {
    TurnClock {
        turn_team: clock.turn_team.opponent(),
        ply: clock.ply + 1,
        deadline: deadline_after(now, turn_seconds),
    }
}
