//! Lobby operations: game creation, joining, leaving, readiness.

use sea_orm::DatabaseTransaction;
use time::OffsetDateTime;
use tracing::info;

use super::{hb_columns, GameFlowService};
use crate::domain::hand_brain;
use crate::entities::games::{GameMode, GameStatus};
use crate::entities::teams::Side;
use crate::entities::{games, team_members, teams};
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};
use crate::repos::games::{GameCreate, GameUpdate};
use crate::repos::{games as games_repo, memberships, teams as teams_repo, users};

pub(super) const DEFAULT_TURN_SECONDS: i32 = 60;

impl GameFlowService {
    /// Create a game and its two teams. The clock starts immediately;
    /// team A is to move from an empty board.
    pub async fn create_game(
        &self,
        txn: &DatabaseTransaction,
        created_by: Option<i64>,
        mode: GameMode,
        turn_seconds: Option<i32>,
    ) -> Result<(games::Model, Vec<teams::Model>), AppError> {
        let turn_seconds = turn_seconds.unwrap_or(DEFAULT_TURN_SECONDS);
        if turn_seconds <= 0 {
            return Err(DomainError::validation(
                ValidationKind::Other("InvalidTurnSeconds".into()),
                "turn_seconds must be positive",
            )
            .into());
        }

        let now = OffsetDateTime::now_utc();
        let game = games_repo::create_game(
            txn,
            GameCreate {
                created_by,
                mode,
                turn_seconds,
            },
            now,
        )
        .await?;

        let team_a = teams_repo::create_team(txn, game.id, Side::A, now).await?;
        let team_b = teams_repo::create_team(txn, game.id, Side::B, now).await?;

        info!(game_id = game.id, mode = ?game.mode, turn_seconds, "game created");
        Ok((game, vec![team_a, team_b]))
    }

    /// Join a team at the tail of its rotation order.
    ///
    /// A returning member gets a fresh tail position rather than their old
    /// slot. Joining the team to move while its roster was empty restores the
    /// hand-brain assignment.
    pub async fn join_team(
        &self,
        txn: &DatabaseTransaction,
        game_id: i64,
        side: Side,
        user_id: i64,
    ) -> Result<team_members::Model, AppError> {
        let now = OffsetDateTime::now_utc();
        let game = games_repo::require_game(txn, game_id).await?;
        if game.status != GameStatus::Live {
            return Err(DomainError::validation(
                ValidationKind::GameFinished,
                "Cannot join a finished game",
            )
            .into());
        }
        users::require_user(txn, user_id).await?;

        if memberships::find_active_by_game_and_user(txn, game_id, user_id)
            .await?
            .is_some()
        {
            return Err(DomainError::conflict(
                ConflictKind::AlreadyJoined,
                format!("User {user_id} is already a member of game {game_id}"),
            )
            .into());
        }

        let team = teams_repo::require_by_game_and_side(txn, game_id, side).await?;
        let tail = memberships::max_position(txn, team.id).await?.map_or(0, |p| p + 1);

        let member = match memberships::find_by_team_and_user(txn, team.id, user_id).await? {
            Some(previous) => memberships::reactivate(txn, previous.id, tail, now).await?,
            None => memberships::create_member(txn, team.id, game_id, user_id, tail, now).await?,
        };

        self.refresh_hand_brain_if_to_move(txn, &game, &team, now)
            .await?;

        info!(game_id, team_id = team.id, user_id, position = tail, "member joined");
        Ok(member)
    }

    /// Leave a game. The membership row stays, flagged inactive; a stale
    /// rotation cursor is clamped on the next read.
    pub async fn leave_team(
        &self,
        txn: &DatabaseTransaction,
        game_id: i64,
        user_id: i64,
    ) -> Result<(), AppError> {
        let now = OffsetDateTime::now_utc();
        let game = games_repo::require_game(txn, game_id).await?;
        let member = memberships::require_active_by_game_and_user(txn, game_id, user_id).await?;
        memberships::set_active(txn, member.id, false, now).await?;

        if game.status == GameStatus::Live {
            let team = teams_repo::require_by_id(txn, member.team_id).await?;
            self.refresh_hand_brain_if_to_move(txn, &game, &team, now)
                .await?;
        }

        info!(game_id, user_id, "member left");
        Ok(())
    }

    /// Flip the caller's ready flag.
    pub async fn set_ready(
        &self,
        txn: &DatabaseTransaction,
        game_id: i64,
        user_id: i64,
        ready: bool,
    ) -> Result<(), AppError> {
        let now = OffsetDateTime::now_utc();
        games_repo::require_game(txn, game_id).await?;
        let member = memberships::require_active_by_game_and_user(txn, game_id, user_id).await?;
        memberships::set_ready(txn, member.id, ready, now).await?;
        Ok(())
    }

    /// Recompute the hand-brain assignment when `team` is the team to move
    /// and its roster just changed. An empty roster clears the assignment;
    /// the games row is touched either way so snapshot versions advance.
    async fn refresh_hand_brain_if_to_move(
        &self,
        txn: &DatabaseTransaction,
        game: &games::Model,
        team: &teams::Model,
        now: OffsetDateTime,
    ) -> Result<(), AppError> {
        let to_move = game.turn_team == team.side;
        if game.mode != GameMode::HandBrain || !to_move {
            games_repo::touch_game(txn, game.id, game.lock_version, now).await?;
            return Ok(());
        }

        let roster = memberships::roster(txn, team.id).await?;

        // A join that leaves the current hand and brain seated must not
        // discard an announced hint; anything else re-derives.
        let stored = super::stored_assignment(game)?;
        let assignment = match stored {
            Some(a)
                if roster.iter().any(|m| m.membership_id == a.hand_member_id)
                    && roster.iter().any(|m| m.membership_id == a.brain_member_id) =>
            {
                Some(a)
            }
            _ => hand_brain::assignment_for(team.current_index, &roster),
        };
        games_repo::update_game(
            txn,
            GameUpdate::new(game.id, game.lock_version)
                .with_hand_brain(hb_columns(assignment.as_ref())),
            now,
        )
        .await?;
        Ok(())
    }
}
