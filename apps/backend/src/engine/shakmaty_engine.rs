//! `shakmaty`-backed implementation of [`MoveEngine`].

use shakmaty::fen::Fen;
use shakmaty::san::SanPlus;
use shakmaty::uci::UciMove;
use shakmaty::{CastlingMode, Chess, EnPassantMode, Position, Role};

use super::{AppliedMove, EngineError, MoveEngine, STARTPOS};
use crate::domain::game_end::EndReport;
use crate::domain::pieces::PieceType;

#[derive(Debug, Default, Clone)]
pub struct ShakmatyEngine;

impl ShakmatyEngine {
    pub fn new() -> Self {
        Self
    }
}

fn parse_position(position: &str) -> Result<Chess, EngineError> {
    if position == STARTPOS {
        return Ok(Chess::default());
    }
    let fen: Fen = position
        .parse()
        .map_err(|e| EngineError::InvalidPosition(format!("unreadable FEN '{position}': {e}")))?;
    fen.into_position(CastlingMode::Standard)
        .map_err(|e| EngineError::InvalidPosition(format!("unplayable position '{position}': {e}")))
}

fn piece_type_of(role: Role) -> PieceType {
    match role {
        Role::Pawn => PieceType::Pawn,
        Role::Knight => PieceType::Knight,
        Role::Bishop => PieceType::Bishop,
        Role::Rook => PieceType::Rook,
        Role::Queen => PieceType::Queen,
        Role::King => PieceType::King,
    }
}

impl MoveEngine for ShakmatyEngine {
    fn apply(&self, position: &str, uci: &str) -> Result<AppliedMove, EngineError> {
        let pos = parse_position(position)?;

        let uci_move: UciMove = uci
            .parse()
            .map_err(|e| EngineError::MalformedMove(format!("'{uci}': {e}")))?;
        let m = uci_move
            .to_move(&pos)
            .map_err(|e| EngineError::IllegalMove(format!("'{uci}': {e}")))?;

        let moved_piece = piece_type_of(m.role());
        let san = SanPlus::from_move(pos.clone(), m).to_string();
        let next = pos
            .play(m)
            .map_err(|e| EngineError::IllegalMove(format!("'{uci}': {e}")))?;

        let end = EndReport {
            checkmate: next.is_checkmate(),
            stalemate: next.is_stalemate(),
            insufficient_material: next.is_insufficient_material(),
            halfmove_clock: next.halfmoves(),
        };
        let position_after = Fen::from_position(&next, EnPassantMode::Legal).to_string();

        Ok(AppliedMove {
            position_after,
            san,
            moved_piece,
            end,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applies_the_first_move_from_startpos() {
        let engine = ShakmatyEngine::new();
        let applied = engine.apply(STARTPOS, "e2e4").unwrap();
        assert_eq!(applied.san, "e4");
        assert_eq!(applied.moved_piece, PieceType::Pawn);
        assert!(applied
            .position_after
            .starts_with("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b"));
        assert!(!applied.end.checkmate);
        assert_eq!(applied.end.halfmove_clock, 0);
    }

    #[test]
    fn continues_from_a_stored_fen() {
        let engine = ShakmatyEngine::new();
        let first = engine.apply(STARTPOS, "e2e4").unwrap();
        let second = engine.apply(&first.position_after, "e7e5").unwrap();
        assert_eq!(second.san, "e5");
        assert!(second.position_after.contains(" w "));
    }

    #[test]
    fn rejects_a_malformed_token() {
        let engine = ShakmatyEngine::new();
        match engine.apply(STARTPOS, "zz9") {
            Err(EngineError::MalformedMove(_)) => {}
            other => panic!("expected MalformedMove, got {other:?}"),
        }
    }

    #[test]
    fn rejects_an_illegal_move() {
        let engine = ShakmatyEngine::new();
        match engine.apply(STARTPOS, "e2e5") {
            Err(EngineError::IllegalMove(_)) => {}
            other => panic!("expected IllegalMove, got {other:?}"),
        }
    }

    #[test]
    fn rejects_a_corrupt_position() {
        let engine = ShakmatyEngine::new();
        match engine.apply("not a fen", "e2e4") {
            Err(EngineError::InvalidPosition(_)) => {}
            other => panic!("expected InvalidPosition, got {other:?}"),
        }
    }

    #[test]
    fn reports_checkmate() {
        // Fool's mate
        let engine = ShakmatyEngine::new();
        let mut position = STARTPOS.to_string();
        for uci in ["f2f3", "e7e5", "g2g4"] {
            position = engine.apply(&position, uci).unwrap().position_after;
        }
        let mate = engine.apply(&position, "d8h4").unwrap();
        assert_eq!(mate.san, "Qh4#");
        assert_eq!(mate.moved_piece, PieceType::Queen);
        assert!(mate.end.checkmate);
    }

    #[test]
    fn reports_the_halfmove_clock() {
        let engine = ShakmatyEngine::new();
        let first = engine.apply(STARTPOS, "g1f3").unwrap();
        assert_eq!(first.end.halfmove_clock, 1);
        let second = engine.apply(&first.position_after, "g8f6").unwrap();
        assert_eq!(second.end.halfmove_clock, 2);
    }

    #[test]
    fn handles_promotion_tokens() {
        let engine = ShakmatyEngine::new();
        // White pawn on a7, kings far apart
        let applied = engine
            .apply("8/P6k/8/8/8/8/8/K7 w - - 0 1", "a7a8q")
            .unwrap();
        assert_eq!(applied.san, "a8=Q");
        assert_eq!(applied.moved_piece, PieceType::Pawn);
    }
}
