//! End-of-game policy applied to the engine's post-move report.

use crate::domain::turn::TeamSide;

/// Halfmove-clock threshold for the no-progress draw (100 half-moves without
/// a capture or pawn move).
pub const NO_PROGRESS_HALFMOVES: u32 = 100;

/// What the engine observed about the position after a move was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EndReport {
    pub checkmate: bool,
    pub stalemate: bool,
    pub insufficient_material: bool,
    pub halfmove_clock: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    WhiteWins,
    BlackWins,
    Draw,
}

impl GameResult {
    pub const fn as_str(&self) -> &'static str {
        match self {
            GameResult::WhiteWins => "1-0",
            GameResult::BlackWins => "0-1",
            GameResult::Draw => "1/2-1/2",
        }
    }
}

/// Evaluate whether the game concluded with this move.
///
/// `mover` is the side that just moved; team A plays the white pieces.
/// Checkmate wins for the mover; stalemate, insufficient material, and the
/// no-progress rule draw.
pub fn evaluate(report: &EndReport, mover: TeamSide) -> Option<GameResult> {
    if report.checkmate {
        return Some(match mover {
            TeamSide::A => GameResult::WhiteWins,
            TeamSide::B => GameResult::BlackWins,
        });
    }
    if report.stalemate || report.insufficient_material {
        return Some(GameResult::Draw);
    }
    if report.halfmove_clock >= NO_PROGRESS_HALFMOVES {
        return Some(GameResult::Draw);
    }
    None
}
