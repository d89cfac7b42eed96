// Unit tests for error mapping - pure domain logic without HTTP or database dependencies
use crate::errors::domain::{
    ConflictKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind,
};
use crate::{AppError, ErrorCode};

#[test]
fn maps_turn_rejections_to_422() {
    let cases = [
        (ValidationKind::OutOfTurn, ErrorCode::OutOfTurn),
        (ValidationKind::TurnExpired, ErrorCode::TurnExpired),
        (ValidationKind::TurnNotExpired, ErrorCode::TurnNotExpired),
        (ValidationKind::GameFinished, ErrorCode::GameFinished),
        (
            ValidationKind::HandBrainViolation,
            ErrorCode::HandBrainViolation,
        ),
        (ValidationKind::MalformedMove, ErrorCode::MalformedMove),
        (ValidationKind::IllegalMove, ErrorCode::IllegalMove),
    ];

    for (kind, code) in cases {
        let app: AppError = DomainError::validation(kind.clone(), "rejected").into();
        assert_eq!(app.code(), code, "kind {kind:?}");
        assert_eq!(app.status().as_u16(), 422, "kind {kind:?}");
    }
}

#[test]
fn maps_validation_fallback() {
    let de = DomainError::validation(ValidationKind::Other("X".into()), "bad field");
    let app: AppError = de.into();
    assert_eq!(app.code(), ErrorCode::ValidationError);
    assert_eq!(app.status().as_u16(), 422);
}

#[test]
fn maps_conflicts() {
    let joined = DomainError::conflict(ConflictKind::AlreadyJoined, "already in game");
    let app: AppError = joined.into();
    assert_eq!(app.code().as_str(), "ALREADY_JOINED");
    assert_eq!(app.status().as_u16(), 409);

    let lock = DomainError::conflict(ConflictKind::OptimisticLock, "stale version");
    let app: AppError = lock.into();
    assert_eq!(app.code().as_str(), "OPTIMISTIC_LOCK");
    assert_eq!(app.status().as_u16(), 409);

    // Generic conflict fallback
    let other = DomainError::conflict(ConflictKind::Other("x".to_string()), "generic conflict");
    let app: AppError = other.into();
    assert_eq!(app.code().as_str(), "CONFLICT");
    assert_eq!(app.status().as_u16(), 409);
}

#[test]
fn maps_not_found() {
    let nf = DomainError::not_found(NotFoundKind::Game, "no game");
    let app: AppError = nf.into();
    assert_eq!(app.code().as_str(), "GAME_NOT_FOUND");
    assert_eq!(app.status().as_u16(), 404);

    let nf = DomainError::not_found(NotFoundKind::Membership, "not a member");
    let app: AppError = nf.into();
    assert_eq!(app.code().as_str(), "MEMBERSHIP_NOT_FOUND");
    assert_eq!(app.status().as_u16(), 404);
}

#[test]
fn maps_infra() {
    let t = DomainError::infra(InfraErrorKind::Timeout, "timeout");
    let app: AppError = t.into();
    assert_eq!(app.code().as_str(), "DB_TIMEOUT");
    assert_eq!(app.status().as_u16(), 504);
    assert!(matches!(app, AppError::Timeout { .. }));

    let down = DomainError::infra(InfraErrorKind::DbUnavailable, "down");
    let app: AppError = down.into();
    assert_eq!(app.code().as_str(), "DB_UNAVAILABLE");
    assert_eq!(app.status().as_u16(), 503);

    let corrupt = DomainError::infra(InfraErrorKind::DataCorruption, "bad stored position");
    let app: AppError = corrupt.into();
    assert_eq!(app.code().as_str(), "DATA_CORRUPTION");
    assert_eq!(app.status().as_u16(), 500);
}
