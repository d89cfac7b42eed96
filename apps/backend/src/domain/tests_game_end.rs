#![cfg(test)]

use crate::domain::game_end::{evaluate, EndReport, GameResult, NO_PROGRESS_HALFMOVES};
use crate::domain::turn::TeamSide;

#[test]
fn checkmate_wins_for_the_mover() {
    let report = EndReport {
        checkmate: true,
        ..Default::default()
    };
    assert_eq!(evaluate(&report, TeamSide::A), Some(GameResult::WhiteWins));
    assert_eq!(evaluate(&report, TeamSide::B), Some(GameResult::BlackWins));
}

#[test]
fn stalemate_and_bare_kings_draw() {
    let stalemate = EndReport {
        stalemate: true,
        ..Default::default()
    };
    assert_eq!(evaluate(&stalemate, TeamSide::A), Some(GameResult::Draw));

    let bare = EndReport {
        insufficient_material: true,
        ..Default::default()
    };
    assert_eq!(evaluate(&bare, TeamSide::B), Some(GameResult::Draw));
}

#[test]
fn no_progress_rule_draws_at_the_threshold() {
    let below = EndReport {
        halfmove_clock: NO_PROGRESS_HALFMOVES - 1,
        ..Default::default()
    };
    assert_eq!(evaluate(&below, TeamSide::A), None);

    let at = EndReport {
        halfmove_clock: NO_PROGRESS_HALFMOVES,
        ..Default::default()
    };
    assert_eq!(evaluate(&at, TeamSide::A), Some(GameResult::Draw));
}

#[test]
fn ordinary_positions_do_not_conclude() {
    assert_eq!(evaluate(&EndReport::default(), TeamSide::A), None);
}

#[test]
fn result_strings() {
    assert_eq!(GameResult::WhiteWins.as_str(), "1-0");
    assert_eq!(GameResult::BlackWins.as_str(), "0-1");
    assert_eq!(GameResult::Draw.as_str(), "1/2-1/2");
}
