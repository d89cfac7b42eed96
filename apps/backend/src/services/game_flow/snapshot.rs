//! Read-only game view for polling clients.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;

use super::GameFlowService;
use crate::entities::games::{GameMode, GameStatus, HbRole};
use crate::entities::moves::MoveKind;
use crate::entities::teams::Side;
use crate::error::AppError;
use crate::repos::{games as games_repo, memberships, moves as moves_repo, teams as teams_repo};

#[derive(Debug, Clone, Serialize)]
pub struct GameSnapshot {
    pub game: GameView,
    pub teams: Vec<TeamView>,
    pub moves: Vec<MoveView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameView {
    pub id: i64,
    pub status: GameStatus,
    pub result: Option<String>,
    pub mode: GameMode,
    pub position: String,
    pub ply: i32,
    pub turn_team: Side,
    pub turn_deadline_at: OffsetDateTime,
    pub turn_seconds: i32,
    pub hb_current_role: Option<HbRole>,
    pub hb_piece_hint: Option<String>,
    pub hb_brain_member_id: Option<i64>,
    pub hb_hand_member_id: Option<i64>,
    pub lock_version: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamView {
    pub id: i64,
    pub side: Side,
    pub current_index: i32,
    pub members: Vec<MemberView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MemberView {
    pub membership_id: i64,
    pub user_id: i64,
    pub position: i32,
    pub active: bool,
    pub ready_to_start: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct MoveView {
    pub ply: i32,
    pub team_id: i64,
    pub kind: MoveKind,
    pub uci: Option<String>,
    pub san: Option<String>,
    pub created_at: OffsetDateTime,
}

impl GameFlowService {
    /// Assemble the full game view. Read-only; any connection will do.
    pub async fn snapshot<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        game_id: i64,
    ) -> Result<GameSnapshot, AppError> {
        let game = games_repo::require_game(conn, game_id).await?;
        let teams = teams_repo::find_by_game(conn, game_id).await?;
        let members = memberships::find_by_game(conn, game_id).await?;
        let moves = moves_repo::find_by_game(conn, game_id).await?;

        let teams = teams
            .into_iter()
            .map(|team| {
                let members = members
                    .iter()
                    .filter(|m| m.team_id == team.id)
                    .map(|m| MemberView {
                        membership_id: m.id,
                        user_id: m.user_id,
                        position: m.position,
                        active: m.active,
                        ready_to_start: m.ready_to_start,
                    })
                    .collect();
                TeamView {
                    id: team.id,
                    side: team.side,
                    current_index: team.current_index,
                    members,
                }
            })
            .collect();

        Ok(GameSnapshot {
            game: GameView {
                id: game.id,
                status: game.status,
                result: game.result,
                mode: game.mode,
                position: game.position,
                ply: game.ply,
                turn_team: game.turn_team,
                turn_deadline_at: game.turn_deadline_at,
                turn_seconds: game.turn_seconds,
                hb_current_role: game.hb_current_role,
                hb_piece_hint: game.hb_piece_hint,
                hb_brain_member_id: game.hb_brain_member_id,
                hb_hand_member_id: game.hb_hand_member_id,
                lock_version: game.lock_version,
            },
            teams,
            moves: moves
                .into_iter()
                .map(|m| MoveView {
                    ply: m.ply,
                    team_id: m.team_id,
                    kind: m.kind,
                    uci: m.uci,
                    san: m.san,
                    created_at: m.created_at,
                })
                .collect(),
        })
    }
}
