//! Game repository functions.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait, NotSet,
    QueryFilter, Set,
};
use time::OffsetDateTime;

use crate::engine::STARTPOS;
use crate::entities::games::{self, GameMode, GameStatus, HbRole};
use crate::entities::teams::Side;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use crate::infra::db_errors::map_db_err;

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Option<games::Model>, DomainError> {
    games::Entity::find_by_id(game_id)
        .one(conn)
        .await
        .map_err(map_db_err)
}

/// Find game by ID or return a NotFound domain error.
pub async fn require_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<games::Model, DomainError> {
    find_by_id(conn, game_id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Game, format!("Game {game_id} not found"))
    })
}

pub struct GameCreate {
    pub created_by: Option<i64>,
    pub mode: GameMode,
    pub turn_seconds: i32,
}

pub async fn create_game(
    txn: &DatabaseTransaction,
    dto: GameCreate,
    now: OffsetDateTime,
) -> Result<games::Model, DomainError> {
    let active = games::ActiveModel {
        id: NotSet,
        created_by: Set(dto.created_by),
        status: Set(GameStatus::Live),
        result: Set(None),
        mode: Set(dto.mode),
        position: Set(STARTPOS.to_string()),
        ply: Set(0),
        turn_team: Set(Side::A),
        turn_started_at: Set(now),
        turn_deadline_at: Set(now + time::Duration::seconds(dto.turn_seconds.into())),
        turn_seconds: Set(dto.turn_seconds),
        hb_current_role: Set(None),
        hb_piece_hint: Set(None),
        hb_brain_member_id: Set(None),
        hb_hand_member_id: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        lock_version: Set(1),
    };
    active.insert(txn).await.map_err(map_db_err)
}

/// Hand-brain columns, always written as one unit. `None` clears all four.
#[derive(Debug, Clone, Default)]
pub struct HandBrainColumns {
    pub role: Option<HbRole>,
    pub piece_hint: Option<String>,
    pub brain_member_id: Option<i64>,
    pub hand_member_id: Option<i64>,
}

/// Builder for an optimistic-lock game update.
///
/// Only the fields set via `with_*` are written; `lock_version` is always
/// compared against `expected_lock_version` and incremented.
pub struct GameUpdate {
    id: i64,
    expected_lock_version: i32,
    status: Option<GameStatus>,
    result: Option<Option<String>>,
    position: Option<String>,
    ply: Option<i32>,
    turn_team: Option<Side>,
    turn_started_at: Option<OffsetDateTime>,
    turn_deadline_at: Option<OffsetDateTime>,
    hand_brain: Option<Option<HandBrainColumns>>,
}

impl GameUpdate {
    pub fn new(id: i64, expected_lock_version: i32) -> Self {
        Self {
            id,
            expected_lock_version,
            status: None,
            result: None,
            position: None,
            ply: None,
            turn_team: None,
            turn_started_at: None,
            turn_deadline_at: None,
            hand_brain: None,
        }
    }

    pub fn with_status(mut self, status: GameStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_result(mut self, result: Option<String>) -> Self {
        self.result = Some(result);
        self
    }

    pub fn with_position(mut self, position: String) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_turn(
        mut self,
        team: Side,
        ply: i32,
        started_at: OffsetDateTime,
        deadline_at: OffsetDateTime,
    ) -> Self {
        self.turn_team = Some(team);
        self.ply = Some(ply);
        self.turn_started_at = Some(started_at);
        self.turn_deadline_at = Some(deadline_at);
        self
    }

    pub fn with_hand_brain(mut self, columns: Option<HandBrainColumns>) -> Self {
        self.hand_brain = Some(columns);
        self
    }
}

pub async fn update_game(
    txn: &DatabaseTransaction,
    dto: GameUpdate,
    now: OffsetDateTime,
) -> Result<games::Model, DomainError> {
    let mut active = games::ActiveModel {
        updated_at: Set(now),
        lock_version: Set(dto.expected_lock_version + 1),
        ..Default::default()
    };
    if let Some(status) = dto.status {
        active.status = Set(status);
    }
    if let Some(result) = dto.result {
        active.result = Set(result);
    }
    if let Some(position) = dto.position {
        active.position = Set(position);
    }
    if let Some(ply) = dto.ply {
        active.ply = Set(ply);
    }
    if let Some(team) = dto.turn_team {
        active.turn_team = Set(team);
    }
    if let Some(at) = dto.turn_started_at {
        active.turn_started_at = Set(at);
    }
    if let Some(at) = dto.turn_deadline_at {
        active.turn_deadline_at = Set(at);
    }
    if let Some(hb) = dto.hand_brain {
        let columns = hb.unwrap_or_default();
        active.hb_current_role = Set(columns.role);
        active.hb_piece_hint = Set(columns.piece_hint);
        active.hb_brain_member_id = Set(columns.brain_member_id);
        active.hb_hand_member_id = Set(columns.hand_member_id);
    }

    let res = games::Entity::update_many()
        .set(active)
        .filter(games::Column::Id.eq(dto.id))
        .filter(games::Column::LockVersion.eq(dto.expected_lock_version))
        .exec(txn)
        .await
        .map_err(map_db_err)?;

    if res.rows_affected == 0 {
        let game = find_by_id(txn, dto.id).await?;
        return match game {
            Some(game) => Err(DomainError::conflict(
                ConflictKind::OptimisticLock,
                format!(
                    "Game lock version mismatch: expected {}, found {}",
                    dto.expected_lock_version, game.lock_version
                ),
            )),
            None => Err(DomainError::not_found(
                NotFoundKind::Game,
                format!("Game {} not found", dto.id),
            )),
        };
    }

    require_game(txn, dto.id).await
}

/// Bump lock_version without changing game fields. Used when membership
/// changes affect the snapshot but not the games row itself.
pub async fn touch_game(
    txn: &DatabaseTransaction,
    id: i64,
    expected_lock_version: i32,
    now: OffsetDateTime,
) -> Result<games::Model, DomainError> {
    update_game(txn, GameUpdate::new(id, expected_lock_version), now).await
}
