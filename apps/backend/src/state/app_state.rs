use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::engine::{MoveEngine, ShakmatyEngine};
use crate::services::game_flow::GameFlowService;
use crate::services::game_locks::GameLocks;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub flow: GameFlowService,
    pub locks: GameLocks,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        Self::with_engine(db, Arc::new(ShakmatyEngine::new()))
    }

    pub fn with_engine(db: DatabaseConnection, engine: Arc<dyn MoveEngine>) -> Self {
        Self {
            db,
            flow: GameFlowService::new(engine),
            locks: GameLocks::new(),
        }
    }
}
