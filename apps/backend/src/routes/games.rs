//! Game HTTP routes.
//!
//! Authentication is out of scope; the acting user is named explicitly in
//! request bodies. Every turn-advancing handler takes the per-game lock
//! before opening its transaction.

use actix_web::{web, HttpResponse, Result};
use serde::Deserialize;

use crate::db::txn::with_txn;
use crate::entities::games::GameMode;
use crate::entities::teams::Side;
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct CreateGameRequest {
    #[serde(default)]
    created_by: Option<i64>,
    /// "STANDARD" or "HAND_BRAIN"; standard when omitted.
    #[serde(default)]
    mode: Option<String>,
    #[serde(default)]
    turn_seconds: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct JoinTeamRequest {
    user_id: i64,
    /// "A" or "B".
    side: String,
}

#[derive(Debug, Deserialize)]
struct UserActionRequest {
    user_id: i64,
}

#[derive(Debug, Deserialize)]
struct SetReadyRequest {
    user_id: i64,
    #[serde(default = "default_true")]
    ready: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct SubmitMoveRequest {
    user_id: i64,
    uci: String,
    #[serde(default)]
    expected_version: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct PieceHintRequest {
    user_id: i64,
    piece: String,
}

fn parse_mode(mode: Option<&str>) -> Result<GameMode, AppError> {
    match mode {
        None | Some("STANDARD") => Ok(GameMode::Standard),
        Some("HAND_BRAIN") => Ok(GameMode::HandBrain),
        Some(other) => Err(DomainError::validation(
            ValidationKind::Other("InvalidMode".into()),
            format!("Unknown game mode '{other}'"),
        )
        .into()),
    }
}

fn parse_side(side: &str) -> Result<Side, AppError> {
    match side {
        "A" => Ok(Side::A),
        "B" => Ok(Side::B),
        other => Err(DomainError::validation(
            ValidationKind::InvalidSide,
            format!("Unknown team side '{other}'"),
        )
        .into()),
    }
}

/// POST /api/games
async fn create_game(
    state: web::Data<AppState>,
    body: web::Json<CreateGameRequest>,
) -> Result<HttpResponse, AppError> {
    let mode = parse_mode(body.mode.as_deref())?;
    let flow = state.flow.clone();
    let (created_by, turn_seconds) = (body.created_by, body.turn_seconds);

    let (game, _teams) = with_txn(&state.db, |txn| {
        Box::pin(async move { flow.create_game(txn, created_by, mode, turn_seconds).await })
    })
    .await?;

    let snapshot = state.flow.snapshot(&state.db, game.id).await?;
    Ok(HttpResponse::Created().json(snapshot))
}

/// GET /api/games/{game_id}
async fn get_snapshot(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let game_id = path.into_inner();
    let snapshot = state.flow.snapshot(&state.db, game_id).await?;
    Ok(HttpResponse::Ok().json(snapshot))
}

/// POST /api/games/{game_id}/join
async fn join_team(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<JoinTeamRequest>,
) -> Result<HttpResponse, AppError> {
    let game_id = path.into_inner();
    let side = parse_side(&body.side)?;
    let user_id = body.user_id;
    let flow = state.flow.clone();

    let _guard = state.locks.acquire(game_id).await;
    let member = with_txn(&state.db, |txn| {
        Box::pin(async move { flow.join_team(txn, game_id, side, user_id).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(member))
}

/// POST /api/games/{game_id}/leave
async fn leave_team(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<UserActionRequest>,
) -> Result<HttpResponse, AppError> {
    let game_id = path.into_inner();
    let user_id = body.user_id;
    let flow = state.flow.clone();

    let _guard = state.locks.acquire(game_id).await;
    with_txn(&state.db, |txn| {
        Box::pin(async move { flow.leave_team(txn, game_id, user_id).await })
    })
    .await?;

    Ok(HttpResponse::NoContent().finish())
}

/// POST /api/games/{game_id}/ready
async fn set_ready(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<SetReadyRequest>,
) -> Result<HttpResponse, AppError> {
    let game_id = path.into_inner();
    let (user_id, ready) = (body.user_id, body.ready);
    let flow = state.flow.clone();

    let _guard = state.locks.acquire(game_id).await;
    with_txn(&state.db, |txn| {
        Box::pin(async move { flow.set_ready(txn, game_id, user_id, ready).await })
    })
    .await?;

    Ok(HttpResponse::NoContent().finish())
}

/// POST /api/games/{game_id}/moves
async fn submit_move(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<SubmitMoveRequest>,
) -> Result<HttpResponse, AppError> {
    let game_id = path.into_inner();
    let body = body.into_inner();
    let flow = state.flow.clone();

    let _guard = state.locks.acquire(game_id).await;
    let outcome = with_txn(&state.db, |txn| {
        Box::pin(async move {
            flow.submit_move(txn, game_id, body.user_id, &body.uci, body.expected_version)
                .await
        })
    })
    .await?;

    let snapshot = state.flow.snapshot(&state.db, outcome.game.id).await?;
    Ok(HttpResponse::Ok().json(snapshot))
}

/// POST /api/games/{game_id}/pass
async fn pass_turn(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<UserActionRequest>,
) -> Result<HttpResponse, AppError> {
    let game_id = path.into_inner();
    let user_id = body.user_id;
    let flow = state.flow.clone();

    let _guard = state.locks.acquire(game_id).await;
    let outcome = with_txn(&state.db, |txn| {
        Box::pin(async move { flow.pass_turn(txn, game_id, user_id).await })
    })
    .await?;

    let snapshot = state.flow.snapshot(&state.db, outcome.game.id).await?;
    Ok(HttpResponse::Ok().json(snapshot))
}

/// POST /api/games/{game_id}/hint
async fn set_piece_hint(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<PieceHintRequest>,
) -> Result<HttpResponse, AppError> {
    let game_id = path.into_inner();
    let body = body.into_inner();
    let flow = state.flow.clone();

    let _guard = state.locks.acquire(game_id).await;
    let game = with_txn(&state.db, |txn| {
        Box::pin(async move {
            flow.set_piece_hint(txn, game_id, body.user_id, &body.piece)
                .await
        })
    })
    .await?;

    let snapshot = state.flow.snapshot(&state.db, game.id).await?;
    Ok(HttpResponse::Ok().json(snapshot))
}

/// POST /api/games/{game_id}/timeout
async fn claim_timeout(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let game_id = path.into_inner();
    let flow = state.flow.clone();

    let _guard = state.locks.acquire(game_id).await;
    let game = with_txn(&state.db, |txn| {
        Box::pin(async move { flow.claim_timeout(txn, game_id).await })
    })
    .await?;

    let snapshot = state.flow.snapshot(&state.db, game.id).await?;
    Ok(HttpResponse::Ok().json(snapshot))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/games").route(web::post().to(create_game)));
    cfg.service(web::resource("/api/games/{game_id}").route(web::get().to(get_snapshot)));
    cfg.service(web::resource("/api/games/{game_id}/join").route(web::post().to(join_team)));
    cfg.service(web::resource("/api/games/{game_id}/leave").route(web::post().to(leave_team)));
    cfg.service(web::resource("/api/games/{game_id}/ready").route(web::post().to(set_ready)));
    cfg.service(web::resource("/api/games/{game_id}/moves").route(web::post().to(submit_move)));
    cfg.service(web::resource("/api/games/{game_id}/pass").route(web::post().to(pass_turn)));
    cfg.service(web::resource("/api/games/{game_id}/hint").route(web::post().to(set_piece_hint)));
    cfg.service(web::resource("/api/games/{game_id}/timeout").route(web::post().to(claim_timeout)));
}
