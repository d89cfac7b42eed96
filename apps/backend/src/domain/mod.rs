//! Domain layer: pure turn-machine logic, no I/O and no async.
//!
//! Services load entities inside a transaction, project them into these
//! types, run the checks and transitions here, then persist the outcome.

pub mod game_end;
pub mod hand_brain;
pub mod pieces;
pub mod roster;
pub mod turn;

#[cfg(test)]
mod tests_game_end;
#[cfg(test)]
mod tests_hand_brain;
#[cfg(test)]
mod tests_props_alternation;
#[cfg(test)]
mod tests_roster;
#[cfg(test)]
mod tests_turn;

// Re-exports for ergonomics
pub use hand_brain::{HandBrainAssignment, HbRole};
pub use pieces::PieceType;
pub use roster::{RoleAssignment, RosterMember};
pub use turn::{TeamSide, TurnClock};
