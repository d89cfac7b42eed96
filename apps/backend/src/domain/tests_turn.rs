#![cfg(test)]

use time::macros::datetime;
use time::Duration;

use crate::domain::turn::{advanced, check_move, check_timeout, deadline_after, TeamSide, TurnClock};
use crate::errors::domain::{DomainError, ValidationKind};

fn clock_at(team: TeamSide, ply: i32, deadline: time::OffsetDateTime) -> TurnClock {
    TurnClock {
        turn_team: team,
        ply,
        deadline,
    }
}

fn kind_of(result: Result<(), DomainError>) -> ValidationKind {
    match result {
        Err(DomainError::Validation(kind, _)) => kind,
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn move_by_the_other_team_is_out_of_turn() {
    let now = datetime!(2025-09-01 12:00 UTC);
    let clock = clock_at(TeamSide::A, 0, now + Duration::minutes(5));
    assert!(check_move(&clock, TeamSide::A, now).is_ok());
    assert_eq!(
        kind_of(check_move(&clock, TeamSide::B, now)),
        ValidationKind::OutOfTurn
    );
}

#[test]
fn expired_turn_rejects_the_move_and_admits_the_timeout() {
    let now = datetime!(2025-09-01 12:00 UTC);
    let clock = clock_at(TeamSide::A, 4, now - Duration::seconds(1));
    assert_eq!(
        kind_of(check_move(&clock, TeamSide::A, now)),
        ValidationKind::TurnExpired
    );
    assert!(check_timeout(&clock, now).is_ok());
}

#[test]
fn deadline_boundary_is_not_yet_expired() {
    let now = datetime!(2025-09-01 12:00 UTC);
    let clock = clock_at(TeamSide::A, 0, now);
    assert!(!clock.is_expired(now));
    assert!(check_move(&clock, TeamSide::A, now).is_ok());
    assert_eq!(
        kind_of(check_timeout(&clock, now)),
        ValidationKind::TurnNotExpired
    );
}

#[test]
fn advance_flips_team_and_increments_ply() {
    let now = datetime!(2025-09-01 12:00 UTC);
    let clock = clock_at(TeamSide::A, 7, now - Duration::seconds(1));
    let next = advanced(&clock, now, 60);
    assert_eq!(next.turn_team, TeamSide::B);
    assert_eq!(next.ply, 8);
    assert_eq!(next.deadline, now + Duration::seconds(60));
}

#[test]
fn second_timeout_claim_fails_on_the_fresh_deadline() {
    let now = datetime!(2025-09-01 12:00 UTC);
    let clock = clock_at(TeamSide::B, 3, now - Duration::seconds(30));
    assert!(check_timeout(&clock, now).is_ok());

    let after = advanced(&clock, now, 120);
    assert_eq!(
        kind_of(check_timeout(&after, now)),
        ValidationKind::TurnNotExpired
    );
}

#[test]
fn deadline_after_adds_the_turn_budget() {
    let now = datetime!(2025-09-01 12:00 UTC);
    assert_eq!(deadline_after(now, 90), now + Duration::seconds(90));
}
