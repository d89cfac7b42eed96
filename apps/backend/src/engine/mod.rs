//! Chess-move collaborator: given a position and a coordinate move, apply it
//! or report why it cannot be applied. Legality itself is delegated to a
//! third-party rules library behind the [`MoveEngine`] trait.

mod shakmaty_engine;

use thiserror::Error;

use crate::domain::game_end::EndReport;
use crate::domain::pieces::PieceType;
use crate::errors::domain::{DomainError, InfraErrorKind, ValidationKind};

pub use shakmaty_engine::ShakmatyEngine;

/// Sentinel for the canonical initial position.
pub const STARTPOS: &str = "startpos";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The move token does not parse as coordinate notation.
    #[error("malformed move: {0}")]
    MalformedMove(String),
    /// The move parses but is not legal in this position.
    #[error("illegal move: {0}")]
    IllegalMove(String),
    /// The stored position string could not be read back. This is data
    /// corruption, not a user error.
    #[error("invalid position: {0}")]
    InvalidPosition(String),
}

impl From<EngineError> for DomainError {
    fn from(e: EngineError) -> Self {
        match e {
            EngineError::MalformedMove(detail) => {
                DomainError::validation(ValidationKind::MalformedMove, detail)
            }
            EngineError::IllegalMove(detail) => {
                DomainError::validation(ValidationKind::IllegalMove, detail)
            }
            EngineError::InvalidPosition(detail) => {
                DomainError::infra(InfraErrorKind::DataCorruption, detail)
            }
        }
    }
}

/// Outcome of applying one move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedMove {
    /// FEN of the resulting position.
    pub position_after: String,
    /// Human-readable notation, with check/checkmate suffix.
    pub san: String,
    /// Piece type that was moved, for hand-brain hint enforcement.
    pub moved_piece: PieceType,
    /// End-of-game observations for the resulting position.
    pub end: EndReport,
}

/// The legality/application capability consumed by the turn orchestrator.
///
/// The call is synchronous; it must complete or fail before the orchestrator
/// proceeds.
pub trait MoveEngine: Send + Sync {
    fn apply(&self, position: &str, uci: &str) -> Result<AppliedMove, EngineError>;
}
