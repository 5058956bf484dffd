//! Database connection management

use sqlx::{PgPool, Postgres, Transaction, query};
use uuid::Uuid;

/// SQL used to serialise writes that belong to a single owner (user or restaurant).
pub const LOCK_OWNER_SQL: &str = "SELECT pg_advisory_xact_lock(hashtextextended($1, 0))";

#[derive(Debug, Clone)]
pub struct Db {
    pool: PgPool,
}

impl Db {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Begin a transaction.
    ///
    /// # Errors
    ///
    /// Returns an error when starting the transaction fails.
    pub async fn begin(&self) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        self.pool.begin().await
    }

    /// Begin a transaction holding the advisory lock for `owner`.
    ///
    /// The lock is released when the transaction commits or rolls back.
    ///
    /// # Errors
    ///
    /// Returns an error when starting the transaction or taking the lock fails.
    pub async fn begin_owner_transaction(
        &self,
        owner: Uuid,
    ) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        lock_owner(&mut tx, owner).await?;

        Ok(tx)
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Take the transaction-scoped advisory lock for `owner`.
///
/// # Errors
///
/// Returns an error when the lock query fails.
pub async fn lock_owner(
    tx: &mut Transaction<'_, Postgres>,
    owner: Uuid,
) -> Result<(), sqlx::Error> {
    query(LOCK_OWNER_SQL)
        .bind(owner.to_string())
        .execute(&mut **tx)
        .await?;

    Ok(())
}

/// Connect to `PostgreSQL`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPool::connect(database_url).await
}
