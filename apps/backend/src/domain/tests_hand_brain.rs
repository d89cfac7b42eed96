#![cfg(test)]

use crate::domain::hand_brain::{
    assignment_for, validate_hint, validate_move, with_hint, HbRole,
};
use crate::domain::pieces::PieceType;
use crate::domain::roster::RosterMember;
use crate::errors::domain::{DomainError, ValidationKind};

fn two_member_team() -> Vec<RosterMember> {
    vec![
        RosterMember {
            membership_id: 100,
            user_id: 1,
            position: 0,
        },
        RosterMember {
            membership_id: 101,
            user_id: 2,
            position: 1,
        },
    ]
}

fn assert_violation(result: Result<(), DomainError>) {
    match result {
        Err(DomainError::Validation(ValidationKind::HandBrainViolation, _)) => {}
        other => panic!("expected HandBrainViolation, got {other:?}"),
    }
}

#[test]
fn fresh_assignment_starts_with_brain_and_no_hint() {
    // Members at positions [0, 1], current_index = 0
    let assignment = assignment_for(0, &two_member_team()).unwrap();
    assert_eq!(assignment.current_role, HbRole::Brain);
    assert_eq!(assignment.piece_hint, None);
    assert_eq!(assignment.hand_member_id, 100);
    assert_eq!(assignment.brain_member_id, 101);
}

#[test]
fn brain_may_not_move_even_without_hint() {
    let assignment = assignment_for(0, &two_member_team()).unwrap();
    assert_violation(validate_move(&assignment, 101, PieceType::Pawn));
}

#[test]
fn hand_moves_freely_while_hint_is_unset() {
    let assignment = assignment_for(0, &two_member_team()).unwrap();
    assert!(validate_move(&assignment, 100, PieceType::Pawn).is_ok());
    assert!(validate_move(&assignment, 100, PieceType::Queen).is_ok());
}

#[test]
fn hint_binds_the_hand_to_the_announced_piece() {
    let assignment = assignment_for(0, &two_member_team()).unwrap();
    let hinted = with_hint(&assignment, PieceType::Rook);
    assert_eq!(hinted.current_role, HbRole::Hand);
    assert_eq!(hinted.piece_hint, Some(PieceType::Rook));

    assert!(validate_move(&hinted, 100, PieceType::Rook).is_ok());
    assert_violation(validate_move(&hinted, 100, PieceType::Knight));
    // The brain is still rejected regardless of piece type
    assert_violation(validate_move(&hinted, 101, PieceType::Rook));
}

#[test]
fn spectator_is_rejected() {
    let assignment = assignment_for(0, &two_member_team()).unwrap();
    let hinted = with_hint(&assignment, PieceType::Rook);
    assert_violation(validate_move(&hinted, 999, PieceType::Rook));
}

#[test]
fn only_brain_may_announce_and_only_once() {
    let assignment = assignment_for(0, &two_member_team()).unwrap();
    assert!(validate_hint(&assignment, 101).is_ok());
    assert_violation(validate_hint(&assignment, 100));

    let hinted = with_hint(&assignment, PieceType::Bishop);
    assert_violation(validate_hint(&hinted, 101));
}

#[test]
fn single_member_is_both_brain_and_hand() {
    let order = vec![RosterMember {
        membership_id: 55,
        user_id: 9,
        position: 0,
    }];
    let assignment = assignment_for(0, &order).unwrap();
    assert_eq!(assignment.brain_member_id, 55);
    assert_eq!(assignment.hand_member_id, 55);
    assert!(validate_hint(&assignment, 55).is_ok());
    assert!(validate_move(&assignment, 55, PieceType::Knight).is_ok());
}

#[test]
fn empty_roster_has_no_assignment() {
    assert_eq!(assignment_for(0, &[]), None);
}
