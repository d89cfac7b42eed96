//! User HTTP routes. Just enough account surface to seat players.

use actix_web::{web, HttpResponse, Result};
use serde::Deserialize;

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::repos::users;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct EnsureUserRequest {
    sub: String,
    #[serde(default)]
    username: Option<String>,
}

/// POST /api/users
///
/// Find-or-create by external subject identifier. Idempotent.
async fn ensure_user(
    state: web::Data<AppState>,
    body: web::Json<EnsureUserRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let now = time::OffsetDateTime::now_utc();

    let user = with_txn(&state.db, |txn| {
        Box::pin(async move {
            users::ensure_user(txn, &body.sub, body.username.as_deref(), now)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(user))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/users").route(web::post().to(ensure_user)));
}
