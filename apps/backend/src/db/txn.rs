use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};

use crate::error::AppError;

/// Execute a closure within a database transaction.
///
/// Commits on Ok, rolls back on Err. A rollback failure is swallowed so the
/// original error is preserved.
pub async fn with_txn<R, F>(db: &DatabaseConnection, f: F) -> Result<R, AppError>
where
    F: for<'a> FnOnce(
        &'a DatabaseTransaction,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<R, AppError>> + Send + 'a>,
    >,
{
    let txn = db.begin().await?;
    let out = f(&txn).await;

    match out {
        Ok(val) => {
            txn.commit().await?;
            Ok(val)
        }
        Err(err) => {
            let _ = txn.rollback().await;
            Err(err)
        }
    }
}
