//! Transaction boundary.
//!
//! DAOs and repositories never open or finish a transaction themselves;
//! they receive `&mut Tx` from the caller. The service layer owns the
//! lifecycle through a [`Database`].

use async_trait::async_trait;
use catalog_core::CatalogResult;
use sqlx::Postgres;

/// A Postgres transaction that is not tied to a borrowed connection.
pub type PgTransaction = sqlx::Transaction<'static, Postgres>;

/// Source of transactions.
///
/// Dropping a `Tx` without passing it to [`commit`](Self::commit) must
/// roll it back.
#[async_trait]
pub trait Database: Send + Sync + 'static {
    /// Transaction handle threaded through DAO and repository calls.
    type Tx: Send + 'static;

    /// Opens a new transaction.
    async fn begin(&self) -> CatalogResult<Self::Tx>;

    /// Commits the transaction.
    async fn commit(&self, tx: Self::Tx) -> CatalogResult<()>;

    /// Rolls the transaction back.
    async fn rollback(&self, tx: Self::Tx) -> CatalogResult<()>;
}
