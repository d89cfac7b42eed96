pub mod game_flow;
pub mod game_locks;
