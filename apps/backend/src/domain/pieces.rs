use std::fmt;
use std::str::FromStr;

use crate::errors::domain::{DomainError, ValidationKind};

/// Piece-type token used for hand-brain hints and engine move reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            PieceType::Pawn => "pawn",
            PieceType::Knight => "knight",
            PieceType::Bishop => "bishop",
            PieceType::Rook => "rook",
            PieceType::Queen => "queen",
            PieceType::King => "king",
        }
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PieceType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pawn" => Ok(PieceType::Pawn),
            "knight" => Ok(PieceType::Knight),
            "bishop" => Ok(PieceType::Bishop),
            "rook" => Ok(PieceType::Rook),
            "queen" => Ok(PieceType::Queen),
            "king" => Ok(PieceType::King),
            other => Err(DomainError::validation(
                ValidationKind::InvalidPiece,
                format!("Unknown piece type: {other}"),
            )),
        }
    }
}
