//! Team repository functions, plus the Side <-> TeamSide conversions.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait, NotSet,
    QueryFilter, QueryOrder, Set,
};
use time::OffsetDateTime;

use crate::domain::turn::TeamSide;
use crate::entities::teams::{self, Side};
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::infra::db_errors::map_db_err;

impl From<TeamSide> for Side {
    fn from(side: TeamSide) -> Self {
        match side {
            TeamSide::A => Side::A,
            TeamSide::B => Side::B,
        }
    }
}

impl From<Side> for TeamSide {
    fn from(side: Side) -> Self {
        match side {
            Side::A => TeamSide::A,
            Side::B => TeamSide::B,
        }
    }
}

pub async fn find_by_game_and_side<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    side: Side,
) -> Result<Option<teams::Model>, DomainError> {
    teams::Entity::find()
        .filter(teams::Column::GameId.eq(game_id))
        .filter(teams::Column::Side.eq(side))
        .one(conn)
        .await
        .map_err(map_db_err)
}

pub async fn require_by_game_and_side<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    side: Side,
) -> Result<teams::Model, DomainError> {
    find_by_game_and_side(conn, game_id, side.clone())
        .await?
        .ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::Team,
                format!("Game {game_id} has no team {side:?}"),
            )
        })
}

pub async fn require_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
) -> Result<teams::Model, DomainError> {
    teams::Entity::find_by_id(team_id)
        .one(conn)
        .await
        .map_err(map_db_err)?
        .ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Team, format!("Team {team_id} not found"))
        })
}

/// Both teams of a game, ordered A then B.
pub async fn find_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Vec<teams::Model>, DomainError> {
    teams::Entity::find()
        .filter(teams::Column::GameId.eq(game_id))
        .order_by_asc(teams::Column::Side)
        .all(conn)
        .await
        .map_err(map_db_err)
}

pub async fn create_team(
    txn: &DatabaseTransaction,
    game_id: i64,
    side: Side,
    now: OffsetDateTime,
) -> Result<teams::Model, DomainError> {
    let active = teams::ActiveModel {
        id: NotSet,
        game_id: Set(game_id),
        side: Set(side),
        current_index: Set(0),
        created_at: Set(now),
        updated_at: Set(now),
    };
    active.insert(txn).await.map_err(map_db_err)
}

pub async fn set_current_index(
    txn: &DatabaseTransaction,
    team_id: i64,
    current_index: i32,
    now: OffsetDateTime,
) -> Result<(), DomainError> {
    let active = teams::ActiveModel {
        id: Set(team_id),
        current_index: Set(current_index),
        updated_at: Set(now),
        ..Default::default()
    };
    active.update(txn).await.map_err(map_db_err)?;
    Ok(())
}
