//! Reactive timeout handling.
//!
//! Nothing fires when a deadline passes; the expiry is acted on when some
//! caller claims it. The not-expired guard makes a second claim for the same
//! turn fail, so claims are idempotent.

use sea_orm::DatabaseTransaction;
use time::OffsetDateTime;
use tracing::info;

use super::{hb_columns, stored_assignment, GameFlowService};
use crate::domain::turn::{self, TeamSide, TurnClock};
use crate::domain::{hand_brain, roster};
use crate::entities::games::{GameMode, GameStatus};
use crate::entities::moves::MoveKind;
use crate::entities::games;
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::repos::games::GameUpdate;
use crate::repos::moves::MoveCreate;
use crate::repos::{games as games_repo, memberships, moves as moves_repo, teams as teams_repo};

impl GameFlowService {
    /// Claim that the current turn's deadline has passed.
    ///
    /// The defaulting team's slot is skipped: a timeout marker is logged, the
    /// turn flips with a fresh deadline, and the defaulting team's rotation
    /// advances so the same member is not on the hook again next turn.
    pub async fn claim_timeout(
        &self,
        txn: &DatabaseTransaction,
        game_id: i64,
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

        let clock = TurnClock {
            turn_team: game.turn_team.clone().into(),
            ply: game.ply,
            deadline: game.turn_deadline_at,
        };
        turn::check_timeout(&clock, now)?;

        let defaulting_side: TeamSide = game.turn_team.clone().into();
        let team =
            teams_repo::require_by_game_and_side(txn, game_id, game.turn_team.clone()).await?;
        let order = memberships::roster(txn, team.id).await?;

        let next = turn::advanced(&clock, now, game.turn_seconds);
        moves_repo::create_move(
            txn,
            MoveCreate {
                game_id,
                team_id: team.id,
                ply: next.ply,
                kind: MoveKind::Timeout,
                uci: None,
                san: None,
                position_after: game.position.clone(),
            },
            now,
        )
        .await?;

        // Skip the slot of the member who was on the hook: the stored hand
        // when one is still seated, otherwise the clamped cursor. An empty
        // roster has no slot to skip.
        let on_the_hook = stored_assignment(&game)?.map(|a| a.hand_member_id);
        if let Some(slot) = roster::consumed_slot(on_the_hook, team.current_index, &order) {
            teams_repo::set_current_index(
                txn,
                team.id,
                roster::next_index_after(slot, order.len()),
                now,
            )
            .await?;
        }

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
            defaulting = defaulting_side.as_str(),
            "timeout claimed"
        );
        Ok(updated)
    }
}
