//! Per-game mutual exclusion.
//!
//! Every turn-advancing operation for one game holds this lock for the whole
//! transaction, so concurrent submissions for the same game serialize. The
//! optimistic `lock_version` check in the games repo backstops this across
//! processes.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Debug, Clone, Default)]
pub struct GameLocks {
    locks: Arc<DashMap<i64, Arc<Mutex<()>>>>,
}

impl GameLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for one game, waiting behind earlier holders.
    pub async fn acquire(&self, game_id: i64) -> OwnedMutexGuard<()> {
        let lock = self
            .locks
            .entry(game_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        lock.lock_owned().await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use super::GameLocks;

    #[tokio::test]
    async fn serializes_holders_of_the_same_game() {
        let locks = GameLocks::new();
        let counter = Arc::new(AtomicU32::new(0));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let locks = locks.clone();
            let counter = counter.clone();
            handles.push(tokio::spawn(async move {
                let _guard = locks.acquire(7).await;
                let inside = counter.fetch_add(1, Ordering::SeqCst);
                assert_eq!(inside, 0, "two holders inside the critical section");
                tokio::task::yield_now().await;
                counter.fetch_sub(1, Ordering::SeqCst);
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
    }

    #[tokio::test]
    async fn different_games_do_not_block_each_other() {
        let locks = GameLocks::new();
        let _a = locks.acquire(1).await;
        // Completes immediately even while game 1 is held.
        let _b = locks.acquire(2).await;
    }
}
