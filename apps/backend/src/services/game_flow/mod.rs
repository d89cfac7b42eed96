//! Turn orchestration service: bridges pure domain logic with DB persistence.
//!
//! Every mutating method runs inside a caller-provided transaction and is
//! expected to be called under the per-game lock (`services::game_locks`).

mod clock;
mod player_actions;
mod seats;
mod snapshot;

use std::sync::Arc;

use crate::domain::hand_brain::{HandBrainAssignment, HbRole};
use crate::domain::pieces::PieceType;
use crate::engine::MoveEngine;
use crate::entities::games;
use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::repos::games::HandBrainColumns;

pub use player_actions::MoveOutcome;
pub use snapshot::{GameSnapshot, GameView, MemberView, MoveView, TeamView};

#[derive(Clone)]
pub struct GameFlowService {
    engine: Arc<dyn MoveEngine>,
}

impl GameFlowService {
    pub fn new(engine: Arc<dyn MoveEngine>) -> Self {
        Self { engine }
    }
}

impl From<HbRole> for games::HbRole {
    fn from(role: HbRole) -> Self {
        match role {
            HbRole::Brain => games::HbRole::Brain,
            HbRole::Hand => games::HbRole::Hand,
        }
    }
}

impl From<games::HbRole> for HbRole {
    fn from(role: games::HbRole) -> Self {
        match role {
            games::HbRole::Brain => HbRole::Brain,
            games::HbRole::Hand => HbRole::Hand,
        }
    }
}

/// Read the hand-brain assignment out of the games row.
///
/// The four hb_* columns are jointly null or jointly populated; anything in
/// between is data corruption.
fn stored_assignment(game: &games::Model) -> Result<Option<HandBrainAssignment>, DomainError> {
    let (role, brain, hand) = match (
        game.hb_current_role.clone(),
        game.hb_brain_member_id,
        game.hb_hand_member_id,
    ) {
        (None, None, None) => return Ok(None),
        (Some(role), Some(brain), Some(hand)) => (role, brain, hand),
        _ => {
            return Err(DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("Game {} has partially set hand-brain columns", game.id),
            ))
        }
    };

    let piece_hint = match &game.hb_piece_hint {
        None => None,
        Some(token) => Some(token.parse::<PieceType>().map_err(|_| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("Game {} stores unknown piece hint '{token}'", game.id),
            )
        })?),
    };

    Ok(Some(HandBrainAssignment {
        current_role: role.into(),
        piece_hint,
        brain_member_id: brain,
        hand_member_id: hand,
    }))
}

/// Project an assignment (or its absence) onto the hb_* columns.
fn hb_columns(assignment: Option<&HandBrainAssignment>) -> Option<HandBrainColumns> {
    assignment.map(|a| HandBrainColumns {
        role: Some(a.current_role.into()),
        piece_hint: a.piece_hint.map(|p| p.as_str().to_string()),
        brain_member_id: Some(a.brain_member_id),
        hand_member_id: Some(a.hand_member_id),
    })
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::{hb_columns, stored_assignment};
    use crate::domain::hand_brain::{HandBrainAssignment, HbRole};
    use crate::domain::pieces::PieceType;
    use crate::engine::STARTPOS;
    use crate::entities::games::{self, GameMode, GameStatus};
    use crate::entities::teams::Side;
    use crate::errors::domain::DomainError;

    fn game_with_hb(
        role: Option<games::HbRole>,
        hint: Option<&str>,
        brain: Option<i64>,
        hand: Option<i64>,
    ) -> games::Model {
        let at = datetime!(2025-09-01 12:00 UTC);
        games::Model {
            id: 1,
            created_by: None,
            status: GameStatus::Live,
            result: None,
            mode: GameMode::HandBrain,
            position: STARTPOS.to_string(),
            ply: 0,
            turn_team: Side::A,
            turn_started_at: at,
            turn_deadline_at: at + time::Duration::seconds(60),
            turn_seconds: 60,
            hb_current_role: role,
            hb_piece_hint: hint.map(str::to_string),
            hb_brain_member_id: brain,
            hb_hand_member_id: hand,
            created_at: at,
            updated_at: at,
            lock_version: 1,
        }
    }

    #[test]
    fn assignment_round_trips_through_the_columns() {
        let assignment = HandBrainAssignment {
            current_role: HbRole::Hand,
            piece_hint: Some(PieceType::Knight),
            brain_member_id: 10,
            hand_member_id: 11,
        };
        let columns = hb_columns(Some(&assignment)).unwrap();
        let game = game_with_hb(
            columns.role,
            columns.piece_hint.as_deref(),
            columns.brain_member_id,
            columns.hand_member_id,
        );
        assert_eq!(stored_assignment(&game).unwrap(), Some(assignment));
    }

    #[test]
    fn jointly_null_columns_read_back_as_no_assignment() {
        let game = game_with_hb(None, None, None, None);
        assert_eq!(stored_assignment(&game).unwrap(), None);
        assert!(hb_columns(None).is_none());
    }

    #[test]
    fn partially_set_columns_are_corruption() {
        let game = game_with_hb(Some(games::HbRole::Brain), None, Some(10), None);
        assert!(matches!(
            stored_assignment(&game),
            Err(DomainError::Infra(..))
        ));
    }

    #[test]
    fn unknown_hint_token_is_corruption() {
        let game = game_with_hb(Some(games::HbRole::Hand), Some("archer"), Some(10), Some(11));
        assert!(matches!(
            stored_assignment(&game),
            Err(DomainError::Infra(..))
        ));
    }
}
