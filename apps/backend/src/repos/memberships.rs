//! Team membership repository functions.
//!
//! Membership rows are never deleted; leaving flips `active` to false so join
//! order (`position`) is never reused.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait, NotSet,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use time::OffsetDateTime;

use crate::domain::roster::RosterMember;
use crate::entities::team_members;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::infra::db_errors::map_db_err;

/// Active members of a team ordered by join position. This ordering is the
/// rotation order everywhere in the crate.
pub async fn find_active_ordered<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
) -> Result<Vec<team_members::Model>, DomainError> {
    team_members::Entity::find()
        .filter(team_members::Column::TeamId.eq(team_id))
        .filter(team_members::Column::Active.eq(true))
        .order_by_asc(team_members::Column::Position)
        .all(conn)
        .await
        .map_err(map_db_err)
}

/// Same roster, projected into the domain shape.
pub async fn roster<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
) -> Result<Vec<RosterMember>, DomainError> {
    let members = find_active_ordered(conn, team_id).await?;
    Ok(members.into_iter().map(RosterMember::from).collect())
}

impl From<team_members::Model> for RosterMember {
    fn from(model: team_members::Model) -> Self {
        Self {
            membership_id: model.id,
            user_id: model.user_id,
            position: model.position,
        }
    }
}

/// The actor's active membership in a game, whichever team they sit on.
pub async fn find_active_by_game_and_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    user_id: i64,
) -> Result<Option<team_members::Model>, DomainError> {
    team_members::Entity::find()
        .filter(team_members::Column::GameId.eq(game_id))
        .filter(team_members::Column::UserId.eq(user_id))
        .filter(team_members::Column::Active.eq(true))
        .one(conn)
        .await
        .map_err(map_db_err)
}

pub async fn require_active_by_game_and_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    user_id: i64,
) -> Result<team_members::Model, DomainError> {
    find_active_by_game_and_user(conn, game_id, user_id)
        .await?
        .ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::Membership,
                format!("User {user_id} is not an active member of game {game_id}"),
            )
        })
}

/// Highest position ever assigned on a team, including inactive rows.
/// New joiners always get max + 1.
pub async fn max_position<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
) -> Result<Option<i32>, DomainError> {
    let member = team_members::Entity::find()
        .filter(team_members::Column::TeamId.eq(team_id))
        .order_by_desc(team_members::Column::Position)
        .limit(1)
        .one(conn)
        .await
        .map_err(map_db_err)?;
    Ok(member.map(|m| m.position))
}

pub async fn create_member(
    txn: &DatabaseTransaction,
    team_id: i64,
    game_id: i64,
    user_id: i64,
    position: i32,
    now: OffsetDateTime,
) -> Result<team_members::Model, DomainError> {
    let active = team_members::ActiveModel {
        id: NotSet,
        team_id: Set(team_id),
        game_id: Set(game_id),
        user_id: Set(user_id),
        position: Set(position),
        active: Set(true),
        ready_to_start: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
    };
    active.insert(txn).await.map_err(map_db_err)
}

/// Any membership row for this user on this team, active or not.
pub async fn find_by_team_and_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
    user_id: i64,
) -> Result<Option<team_members::Model>, DomainError> {
    team_members::Entity::find()
        .filter(team_members::Column::TeamId.eq(team_id))
        .filter(team_members::Column::UserId.eq(user_id))
        .one(conn)
        .await
        .map_err(map_db_err)
}

/// Re-activate a previous membership at a fresh tail position.
pub async fn reactivate(
    txn: &DatabaseTransaction,
    membership_id: i64,
    position: i32,
    now: OffsetDateTime,
) -> Result<team_members::Model, DomainError> {
    let model = team_members::ActiveModel {
        id: Set(membership_id),
        position: Set(position),
        active: Set(true),
        ready_to_start: Set(false),
        updated_at: Set(now),
        ..Default::default()
    };
    model.update(txn).await.map_err(map_db_err)
}

pub async fn set_active(
    txn: &DatabaseTransaction,
    membership_id: i64,
    active: bool,
    now: OffsetDateTime,
) -> Result<(), DomainError> {
    let model = team_members::ActiveModel {
        id: Set(membership_id),
        active: Set(active),
        updated_at: Set(now),
        ..Default::default()
    };
    model.update(txn).await.map_err(map_db_err)?;
    Ok(())
}

pub async fn set_ready(
    txn: &DatabaseTransaction,
    membership_id: i64,
    ready: bool,
    now: OffsetDateTime,
) -> Result<(), DomainError> {
    let model = team_members::ActiveModel {
        id: Set(membership_id),
        ready_to_start: Set(ready),
        updated_at: Set(now),
        ..Default::default()
    };
    model.update(txn).await.map_err(map_db_err)?;
    Ok(())
}

/// All memberships of a game, active or not, for snapshots.
pub async fn find_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Vec<team_members::Model>, DomainError> {
    team_members::Entity::find()
        .filter(team_members::Column::GameId.eq(game_id))
        .order_by_asc(team_members::Column::TeamId)
        .order_by_asc(team_members::Column::Position)
        .all(conn)
        .await
        .map_err(map_db_err)
}
