//! PostgreSQL category DAO.

use crate::dao::CategoryDao;
use crate::transaction::PgTransaction;
use async_trait::async_trait;
use catalog_core::{CatalogResult, Category, CategoryId};
use sqlx::FromRow;
use tracing::debug;

/// Category DAO backed by PostgreSQL.
#[derive(Debug, Clone, Copy, Default)]
pub struct PgCategoryDao;

impl PgCategoryDao {
    /// Creates a new PostgreSQL category DAO.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[derive(Debug, FromRow)]
struct CategoryRow {
    id: i32,
    name: String,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self::new(CategoryId::new(row.id), row.name)
    }
}

#[async_trait]
impl CategoryDao<PgTransaction> for PgCategoryDao {
    async fn insert(&self, tx: &mut PgTransaction, name: &str) -> CatalogResult<Category> {
        debug!("Inserting category '{}'", name);

        let row = sqlx::query_as::<_, CategoryRow>("INSERT INTO category (name) VALUES ($1) RETURNING id, name")
            .bind(name)
            .fetch_one(&mut **tx)
            .await?;

        Ok(row.into())
    }

    async fn update(&self, tx: &mut PgTransaction, id: CategoryId, name: &str) -> CatalogResult<Option<Category>> {
        debug!("Renaming category {}", id);

        let row = sqlx::query_as::<_, CategoryRow>("UPDATE category SET name = $1 WHERE id = $2 RETURNING id, name")
            .bind(name)
            .bind(id.into_inner())
            .fetch_optional(&mut **tx)
            .await?;

        Ok(row.map(Category::from))
    }

    async fn delete(&self, tx: &mut PgTransaction, id: CategoryId) -> CatalogResult<u64> {
        debug!("Deleting category {}", id);

        let result = sqlx::query("DELETE FROM category WHERE id = $1")
            .bind(id.into_inner())
            .execute(&mut **tx)
            .await?;

        Ok(result.rows_affected())
    }

    async fn fetch_by_id(&self, tx: &mut PgTransaction, id: CategoryId) -> CatalogResult<Option<Category>> {
        debug!("Finding category by id: {}", id);

        let row = sqlx::query_as::<_, CategoryRow>("SELECT id, name FROM category WHERE id = $1")
            .bind(id.into_inner())
            .fetch_optional(&mut **tx)
            .await?;

        Ok(row.map(Category::from))
    }

    async fn fetch_all(&self, tx: &mut PgTransaction) -> CatalogResult<Vec<Category>> {
        debug!("Listing all categories");

        let rows = sqlx::query_as::<_, CategoryRow>("SELECT id, name FROM category ORDER BY id")
            .fetch_all(&mut **tx)
            .await?;

        Ok(rows.into_iter().map(Category::from).collect())
    }
}
