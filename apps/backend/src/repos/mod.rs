//! Persistence layer: free async functions generic over a SeaORM connection.
//!
//! Functions that only read take any `ConnectionTrait`; functions that write
//! take a `DatabaseTransaction` so callers are forced to go through
//! `db::txn::with_txn`.

pub mod games;
pub mod memberships;
pub mod moves;
pub mod teams;
pub mod users;
