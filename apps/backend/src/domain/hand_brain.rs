//! Hand & Brain role assignment and move validation.
//!
//! When a game runs in hand-brain mode, the team to move carries an
//! assignment: one member is the brain (announces a piece type), the next in
//! rotation is the hand (must move a piece of that type). The assignment is
//! recomputed at the start of each of that team's turns and cleared for the
//! team that just moved.

use crate::domain::pieces::PieceType;
use crate::domain::roster::{self, RosterMember};
use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HbRole {
    Brain,
    Hand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandBrainAssignment {
    pub current_role: HbRole,
    /// None until the brain announces a piece type.
    pub piece_hint: Option<PieceType>,
    pub brain_member_id: i64,
    pub hand_member_id: i64,
}

/// Fresh assignment for a team at the start of its turn.
///
/// Returns `None` on an empty roster; the caller must null out the game's
/// hand-brain fields instead.
pub fn assignment_for(current_index: i32, order: &[RosterMember]) -> Option<HandBrainAssignment> {
    let roles = roster::resolve_assignment(current_index, order)?;
    Some(HandBrainAssignment {
        current_role: HbRole::Brain,
        piece_hint: None,
        brain_member_id: roles.brain_member_id,
        hand_member_id: roles.hand_member_id,
    })
}

/// Reject actors other than the hand member (spectators and the brain alike).
pub fn validate_actor(
    assignment: &HandBrainAssignment,
    membership_id: i64,
) -> Result<(), DomainError> {
    if membership_id != assignment.hand_member_id {
        return Err(DomainError::validation(
            ValidationKind::HandBrainViolation,
            "Only the hand member may move",
        ));
    }
    Ok(())
}

/// Enforce the announced piece hint against the piece actually moved.
///
/// An unset hint admits any piece at this layer; the brain's announcement is
/// a UI step and the state machine only enforces it once present.
pub fn validate_piece(
    assignment: &HandBrainAssignment,
    moved_piece: PieceType,
) -> Result<(), DomainError> {
    match assignment.piece_hint {
        Some(hint) if hint != moved_piece => Err(DomainError::validation(
            ValidationKind::HandBrainViolation,
            format!("Hint is {hint}, but a {moved_piece} was moved"),
        )),
        _ => Ok(()),
    }
}

/// Full move validation: actor must be the hand, and the moved piece must
/// match the hint when one is set.
pub fn validate_move(
    assignment: &HandBrainAssignment,
    membership_id: i64,
    moved_piece: PieceType,
) -> Result<(), DomainError> {
    validate_actor(assignment, membership_id)?;
    validate_piece(assignment, moved_piece)
}

/// Only the brain member may announce the hint, and only once per turn.
pub fn validate_hint(
    assignment: &HandBrainAssignment,
    membership_id: i64,
) -> Result<(), DomainError> {
    if membership_id != assignment.brain_member_id {
        return Err(DomainError::validation(
            ValidationKind::HandBrainViolation,
            "Only the brain member may announce a piece type",
        ));
    }
    if assignment.current_role != HbRole::Brain {
        return Err(DomainError::validation(
            ValidationKind::HandBrainViolation,
            "Piece type already announced for this turn",
        ));
    }
    Ok(())
}

/// Assignment state after the brain announces `piece`.
pub fn with_hint(assignment: &HandBrainAssignment, piece: PieceType) -> HandBrainAssignment {
    HandBrainAssignment {
        current_role: HbRole::Hand,
        piece_hint: Some(piece),
        ..*assignment
    }
}
