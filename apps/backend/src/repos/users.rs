//! User repository functions.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait, NotSet,
    QueryFilter, Set,
};
use time::OffsetDateTime;

use crate::entities::users;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::infra::db_errors::map_db_err;

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Option<users::Model>, DomainError> {
    users::Entity::find_by_id(user_id)
        .one(conn)
        .await
        .map_err(map_db_err)
}

pub async fn require_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<users::Model, DomainError> {
    find_by_id(conn, user_id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::User, format!("User {user_id} not found"))
    })
}

pub async fn find_by_sub<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    sub: &str,
) -> Result<Option<users::Model>, DomainError> {
    users::Entity::find()
        .filter(users::Column::Sub.eq(sub))
        .one(conn)
        .await
        .map_err(map_db_err)
}

/// Find or create a user keyed by external subject identifier.
pub async fn ensure_user(
    txn: &DatabaseTransaction,
    sub: &str,
    username: Option<&str>,
    now: OffsetDateTime,
) -> Result<users::Model, DomainError> {
    if let Some(user) = find_by_sub(txn, sub).await? {
        return Ok(user);
    }
    let active = users::ActiveModel {
        id: NotSet,
        sub: Set(sub.to_string()),
        username: Set(username.map(str::to_string)),
        created_at: Set(now),
        updated_at: Set(now),
    };
    active.insert(txn).await.map_err(map_db_err)
}
