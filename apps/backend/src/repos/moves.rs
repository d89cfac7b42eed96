//! Move log repository functions. Rows are insert-only.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait, NotSet,
    QueryFilter, QueryOrder, Set,
};
use time::OffsetDateTime;

use crate::entities::moves::{self, MoveKind};
use crate::errors::domain::DomainError;
use crate::infra::db_errors::map_db_err;

pub struct MoveCreate {
    pub game_id: i64,
    pub team_id: i64,
    pub ply: i32,
    pub kind: MoveKind,
    pub uci: Option<String>,
    pub san: Option<String>,
    pub position_after: String,
}

pub async fn create_move(
    txn: &DatabaseTransaction,
    dto: MoveCreate,
    now: OffsetDateTime,
) -> Result<moves::Model, DomainError> {
    let active = moves::ActiveModel {
        id: NotSet,
        game_id: Set(dto.game_id),
        team_id: Set(dto.team_id),
        ply: Set(dto.ply),
        kind: Set(dto.kind),
        uci: Set(dto.uci),
        san: Set(dto.san),
        position_after: Set(dto.position_after),
        created_at: Set(now),
    };
    active.insert(txn).await.map_err(map_db_err)
}

/// Full move history of a game in ply order.
pub async fn find_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Vec<moves::Model>, DomainError> {
    moves::Entity::find()
        .filter(moves::Column::GameId.eq(game_id))
        .order_by_asc(moves::Column::Ply)
        .all(conn)
        .await
        .map_err(map_db_err)
}
