//! Move submission and hint announcement.

use sea_orm::DatabaseTransaction;
use time::OffsetDateTime;
use tracing::{debug, info};

use super::{hb_columns, stored_assignment, GameFlowService};
use crate::domain::turn::{self, TeamSide, TurnClock};
use crate::domain::{game_end, hand_brain, roster};
use crate::entities::games::{GameMode, GameStatus};
use crate::entities::moves::MoveKind;
use crate::entities::{games, moves};
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, ValidationKind};
use crate::repos::games::GameUpdate;
use crate::repos::moves::MoveCreate;
use crate::repos::{games as games_repo, memberships, moves as moves_repo, teams as teams_repo};

/// What a successful submission produced.
#[derive(Debug, Clone)]
pub struct MoveOutcome {
    pub game: games::Model,
    pub move_row: moves::Model,
}

/// Decide who may act on the turn slot. Standard mode admits only the
/// rotation slot owner. Hand-brain mode admits only the hand member of the
/// stored assignment (deriving a fresh one when the columns are null) and
/// returns that assignment for hint enforcement.
fn gate_slot_actor(
    game: &games::Model,
    current_index: i32,
    order: &[roster::RosterMember],
    roles: &roster::RoleAssignment,
    member_id: i64,
) -> Result<Option<hand_brain::HandBrainAssignment>, DomainError> {
    if game.mode == GameMode::HandBrain {
        let assignment = match stored_assignment(game)? {
            Some(a) => a,
            None => hand_brain::assignment_for(current_index, order).ok_or_else(|| {
                DomainError::infra(
                    InfraErrorKind::DataCorruption,
                    format!("Game {} to move with an empty roster", game.id),
                )
            })?,
        };
        hand_brain::validate_actor(&assignment, member_id)?;
        Ok(Some(assignment))
    } else if member_id != roles.hand_member_id {
        Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            "It is another member's turn in the rotation",
        ))
    } else {
        Ok(None)
    }
}

impl GameFlowService {
    /// Submit one move. All validation, the engine call and every write
    /// happen in the caller's transaction; a rejection leaves no trace.
    pub async fn submit_move(
        &self,
        txn: &DatabaseTransaction,
        game_id: i64,
        user_id: i64,
        uci: &str,
        expected_lock_version: Option<i32>,
    ) -> Result<MoveOutcome, AppError> {
        debug!(game_id, user_id, uci, "submitting move");
        let now = OffsetDateTime::now_utc();
        let game = games_repo::require_game(txn, game_id).await?;

        if let Some(expected) = expected_lock_version {
            if game.lock_version != expected {
                return Err(DomainError::conflict(
                    ConflictKind::OptimisticLock,
                    format!(
                        "Game was modified concurrently (expected version {expected}, actual {})",
                        game.lock_version
                    ),
                )
                .into());
            }
        }
        if game.status != GameStatus::Live {
            return Err(DomainError::validation(
                ValidationKind::GameFinished,
                "Game has concluded",
            )
            .into());
        }

        let member = memberships::require_active_by_game_and_user(txn, game_id, user_id).await?;
        let team = teams_repo::require_by_id(txn, member.team_id).await?;
        let actor_side: TeamSide = team.side.clone().into();

        let clock = TurnClock {
            turn_team: game.turn_team.clone().into(),
            ply: game.ply,
            deadline: game.turn_deadline_at,
        };
        turn::check_move(&clock, actor_side, now)?;

        let order = memberships::roster(txn, team.id).await?;
        let roles = roster::resolve_assignment(team.current_index, &order).ok_or_else(|| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("Active member of game {game_id} not in team {} roster", team.id),
            )
        })?;

        let assignment = gate_slot_actor(&game, team.current_index, &order, &roles, member.id)?;

        let applied = self.engine.apply(&game.position, uci).map_err(DomainError::from)?;

        if let Some(assignment) = &assignment {
            hand_brain::validate_piece(assignment, applied.moved_piece)?;
        }

        let next = turn::advanced(&clock, now, game.turn_seconds);
        let move_row = moves_repo::create_move(
            txn,
            MoveCreate {
                game_id,
                team_id: team.id,
                ply: next.ply,
                kind: MoveKind::Normal,
                uci: Some(uci.to_string()),
                san: Some(applied.san.clone()),
                position_after: applied.position_after.clone(),
            },
            now,
        )
        .await?;

        // Consume the mover's rotation slot. The mover is an active member,
        // so the seat lookup inside consumed_slot cannot miss.
        let slot = roster::consumed_slot(Some(member.id), team.current_index, &order)
            .unwrap_or(roles.hand_index);
        teams_repo::set_current_index(
            txn,
            team.id,
            roster::next_index_after(slot, order.len()),
            now,
        )
        .await?;

        let result = game_end::evaluate(&applied.end, actor_side);
        let mut update = GameUpdate::new(game.id, game.lock_version)
            .with_position(applied.position_after)
            .with_turn(next.turn_team.into(), next.ply, now, next.deadline);

        update = match &result {
            Some(result) => update
                .with_status(GameStatus::Finished)
                .with_result(Some(result.as_str().to_string()))
                .with_hand_brain(None),
            None if game.mode == GameMode::HandBrain => {
                let opposing =
                    teams_repo::require_by_game_and_side(txn, game_id, next.turn_team.into())
                        .await?;
                let opposing_order = memberships::roster(txn, opposing.id).await?;
                let refreshed =
                    hand_brain::assignment_for(opposing.current_index, &opposing_order);
                update.with_hand_brain(hb_columns(refreshed.as_ref()))
            }
            None => update,
        };

        let updated = games_repo::update_game(txn, update, now).await?;
        info!(
            game_id,
            ply = next.ply,
            san = %move_row.san.as_deref().unwrap_or(""),
            finished = result.is_some(),
            "move accepted"
        );
        Ok(MoveOutcome {
            game: updated,
            move_row,
        })
    }

    /// Forfeit the turn without moving a piece.
    ///
    /// Same gates as a move: live game, unexpired deadline, slot owner only
    /// (the hand member in hand-brain mode). Records a pass marker at the
    /// next ply with the position unchanged and rotates the passer's slot
    /// forward.
    pub async fn pass_turn(
        &self,
        txn: &DatabaseTransaction,
        game_id: i64,
        user_id: i64,
    ) -> Result<MoveOutcome, AppError> {
        let now = OffsetDateTime::now_utc();
        let game = games_repo::require_game(txn, game_id).await?;

        if game.status != GameStatus::Live {
            return Err(DomainError::validation(
                ValidationKind::GameFinished,
                "Game has concluded",
            )
            .into());
        }

        let member = memberships::require_active_by_game_and_user(txn, game_id, user_id).await?;
        let team = teams_repo::require_by_id(txn, member.team_id).await?;
        let actor_side: TeamSide = team.side.clone().into();

        let clock = TurnClock {
            turn_team: game.turn_team.clone().into(),
            ply: game.ply,
            deadline: game.turn_deadline_at,
        };
        turn::check_move(&clock, actor_side, now)?;

        let order = memberships::roster(txn, team.id).await?;
        let roles = roster::resolve_assignment(team.current_index, &order).ok_or_else(|| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("Active member of game {game_id} not in team {} roster", team.id),
            )
        })?;
        gate_slot_actor(&game, team.current_index, &order, &roles, member.id)?;

        let next = turn::advanced(&clock, now, game.turn_seconds);
        let move_row = moves_repo::create_move(
            txn,
            MoveCreate {
                game_id,
                team_id: team.id,
                ply: next.ply,
                kind: MoveKind::Pass,
                uci: None,
                san: None,
                position_after: game.position.clone(),
            },
            now,
        )
        .await?;

        let slot = roster::consumed_slot(Some(member.id), team.current_index, &order)
            .unwrap_or(roles.hand_index);
        teams_repo::set_current_index(
            txn,
            team.id,
            roster::next_index_after(slot, order.len()),
            now,
        )
        .await?;

        let mut update = GameUpdate::new(game.id, game.lock_version).with_turn(
            next.turn_team.into(),
            next.ply,
            now,
            next.deadline,
        );
        if game.mode == GameMode::HandBrain {
            let opposing =
                teams_repo::require_by_game_and_side(txn, game_id, next.turn_team.into()).await?;
            let opposing_order = memberships::roster(txn, opposing.id).await?;
            let refreshed = hand_brain::assignment_for(opposing.current_index, &opposing_order);
            update = update.with_hand_brain(hb_columns(refreshed.as_ref()));
        }

        let updated = games_repo::update_game(txn, update, now).await?;
        info!(
            game_id,
            ply = next.ply,
            side = actor_side.as_str(),
            "turn passed"
        );
        Ok(MoveOutcome {
            game: updated,
            move_row,
        })
    }

    /// The brain announces the piece type the hand must move this turn.
    pub async fn set_piece_hint(
        &self,
        txn: &DatabaseTransaction,
        game_id: i64,
        user_id: i64,
        piece: &str,
    ) -> Result<games::Model, AppError> {
        let now = OffsetDateTime::now_utc();
        let game = games_repo::require_game(txn, game_id).await?;

        if game.status != GameStatus::Live {
            return Err(DomainError::validation(
                ValidationKind::GameFinished,
                "Game has concluded",
            )
            .into());
        }
        if game.mode != GameMode::HandBrain {
            return Err(DomainError::validation(
                ValidationKind::HandBrainViolation,
                "Game is not in hand-brain mode",
            )
            .into());
        }

        let piece = piece.parse()?;

        let member = memberships::require_active_by_game_and_user(txn, game_id, user_id).await?;
        let team = teams_repo::require_by_id(txn, member.team_id).await?;
        let clock = TurnClock {
            turn_team: game.turn_team.clone().into(),
            ply: game.ply,
            deadline: game.turn_deadline_at,
        };
        turn::check_move(&clock, team.side.clone().into(), now)?;

        let assignment = match stored_assignment(&game)? {
            Some(a) => a,
            None => {
                let order = memberships::roster(txn, team.id).await?;
                hand_brain::assignment_for(team.current_index, &order).ok_or_else(|| {
                    DomainError::infra(
                        InfraErrorKind::DataCorruption,
                        format!("Game {game_id} to move with an empty roster"),
                    )
                })?
            }
        };
        hand_brain::validate_hint(&assignment, member.id)?;
        let announced = hand_brain::with_hint(&assignment, piece);

        let updated = games_repo::update_game(
            txn,
            GameUpdate::new(game.id, game.lock_version)
                .with_hand_brain(hb_columns(Some(&announced))),
            now,
        )
        .await?;
        info!(game_id, user_id, piece = %piece, "piece hint announced");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::gate_slot_actor;
    use crate::domain::roster::{resolve_assignment, RosterMember};
    use crate::engine::STARTPOS;
    use crate::entities::games::{self, GameMode, GameStatus, HbRole};
    use crate::entities::teams::Side;
    use crate::errors::domain::{DomainError, ValidationKind};

    fn live_game(mode: GameMode) -> games::Model {
        let at = datetime!(2025-09-01 12:00 UTC);
        games::Model {
            id: 1,
            created_by: None,
            status: GameStatus::Live,
            result: None,
            mode,
            position: STARTPOS.to_string(),
            ply: 0,
            turn_team: Side::A,
            turn_started_at: at,
            turn_deadline_at: at + time::Duration::seconds(60),
            turn_seconds: 60,
            hb_current_role: None,
            hb_piece_hint: None,
            hb_brain_member_id: None,
            hb_hand_member_id: None,
            created_at: at,
            updated_at: at,
            lock_version: 1,
        }
    }

    fn order3() -> Vec<RosterMember> {
        (0..3)
            .map(|i| RosterMember {
                membership_id: 10 + i as i64,
                user_id: 100 + i as i64,
                position: i,
            })
            .collect()
    }

    fn assert_rejected(result: Result<impl std::fmt::Debug, DomainError>, kind: ValidationKind) {
        match result {
            Err(DomainError::Validation(got, _)) if got == kind => {}
            other => panic!("expected {kind:?}, got {other:?}"),
        }
    }

    #[test]
    fn standard_mode_admits_only_the_slot_owner() {
        let game = live_game(GameMode::Standard);
        let order = order3();
        let roles = resolve_assignment(0, &order).unwrap();

        assert!(gate_slot_actor(&game, 0, &order, &roles, 10).unwrap().is_none());
        assert_rejected(
            gate_slot_actor(&game, 0, &order, &roles, 11),
            ValidationKind::OutOfTurn,
        );
    }

    #[test]
    fn hand_brain_mode_follows_the_stored_assignment() {
        // The stored hand sits at the head while the cursor clamps to the
        // tail; the stored columns win.
        let mut game = live_game(GameMode::HandBrain);
        game.hb_current_role = Some(HbRole::Brain);
        game.hb_brain_member_id = Some(11);
        game.hb_hand_member_id = Some(10);
        let order = order3();
        let roles = resolve_assignment(5, &order).unwrap();

        let assignment = gate_slot_actor(&game, 5, &order, &roles, 10)
            .unwrap()
            .unwrap();
        assert_eq!(assignment.hand_member_id, 10);
        assert_rejected(
            gate_slot_actor(&game, 5, &order, &roles, 12),
            ValidationKind::HandBrainViolation,
        );
    }

    #[test]
    fn hand_brain_mode_derives_from_the_cursor_when_columns_are_null() {
        let game = live_game(GameMode::HandBrain);
        let order = order3();
        let roles = resolve_assignment(1, &order).unwrap();

        let assignment = gate_slot_actor(&game, 1, &order, &roles, 11)
            .unwrap()
            .unwrap();
        assert_eq!(assignment.hand_member_id, 11);
        assert_eq!(assignment.brain_member_id, 12);
        assert_rejected(
            gate_slot_actor(&game, 1, &order, &roles, 10),
            ValidationKind::HandBrainViolation,
        );
    }
}
