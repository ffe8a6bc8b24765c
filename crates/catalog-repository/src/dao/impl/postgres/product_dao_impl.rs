//! PostgreSQL product DAO.

use crate::dao::ProductDao;
use crate::transaction::PgTransaction;
use async_trait::async_trait;
use catalog_core::{CatalogResult, CategoryId, Product, ProductId};
use sqlx::FromRow;
use tracing::debug;

/// Product DAO backed by PostgreSQL.
#[derive(Debug, Clone, Copy, Default)]
pub struct PgProductDao;

impl PgProductDao {
    /// Creates a new PostgreSQL product DAO.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

/// Product row joined with its category.
#[derive(Debug, FromRow)]
struct ProductRow {
    id: i32,
    name: String,
    category_id: i32,
    category_name: String,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: ProductId::new(row.id),
            name: row.name,
            category_id: CategoryId::new(row.category_id),
            category_name: row.category_name,
        }
    }
}

#[async_trait]
impl ProductDao<PgTransaction> for PgProductDao {
    async fn insert(&self, tx: &mut PgTransaction, name: &str, category_id: CategoryId) -> CatalogResult<Product> {
        debug!("Inserting product '{}' in category {}", name, category_id);

        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            WITH inserted AS (
                INSERT INTO product (name, category_id)
                VALUES ($1, $2)
                RETURNING id, name, category_id
            )
            SELECT inserted.id, inserted.name, inserted.category_id, category.name AS category_name
            FROM inserted
            INNER JOIN category ON category.id = inserted.category_id
            "#,
        )
        .bind(name)
        .bind(category_id.into_inner())
        .fetch_one(&mut **tx)
        .await?;

        Ok(row.into())
    }

    async fn update_name_and_category(
        &self,
        tx: &mut PgTransaction,
        id: ProductId,
        name: &str,
        category_id: CategoryId,
    ) -> CatalogResult<Option<ProductId>> {
        debug!("Updating name and category of product {}", id);

        let updated: Option<i32> =
            sqlx::query_scalar("UPDATE product SET name = $1, category_id = $2 WHERE id = $3 RETURNING id")
                .bind(name)
                .bind(category_id.into_inner())
                .bind(id.into_inner())
                .fetch_optional(&mut **tx)
                .await?;

        Ok(updated.map(ProductId::new))
    }

    async fn update_category(
        &self,
        tx: &mut PgTransaction,
        id: ProductId,
        category_id: CategoryId,
    ) -> CatalogResult<Option<ProductId>> {
        debug!("Updating category of product {}", id);

        let updated: Option<i32> = sqlx::query_scalar("UPDATE product SET category_id = $1 WHERE id = $2 RETURNING id")
            .bind(category_id.into_inner())
            .bind(id.into_inner())
            .fetch_optional(&mut **tx)
            .await?;

        Ok(updated.map(ProductId::new))
    }

    async fn update_name(&self, tx: &mut PgTransaction, id: ProductId, name: &str) -> CatalogResult<Option<ProductId>> {
        debug!("Updating name of product {}", id);

        let updated: Option<i32> = sqlx::query_scalar("UPDATE product SET name = $1 WHERE id = $2 RETURNING id")
            .bind(name)
            .bind(id.into_inner())
            .fetch_optional(&mut **tx)
            .await?;

        Ok(updated.map(ProductId::new))
    }

    async fn fetch_by_id(&self, tx: &mut PgTransaction, id: ProductId) -> CatalogResult<Option<Product>> {
        debug!("Finding product by id: {}", id);

        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT product.id, product.name, product.category_id, category.name AS category_name
            FROM product
            INNER JOIN category ON category.id = product.category_id
            WHERE product.id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&mut **tx)
        .await?;

        Ok(row.map(Product::from))
    }

    async fn fetch_all(&self, tx: &mut PgTransaction) -> CatalogResult<Vec<Product>> {
        debug!("Listing all products");

        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT product.id, product.name, product.category_id, category.name AS category_name
            FROM product
            INNER JOIN category ON category.id = product.category_id
            ORDER BY product.id
            "#,
        )
        .fetch_all(&mut **tx)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn delete(&self, tx: &mut PgTransaction, id: ProductId) -> CatalogResult<u64> {
        debug!("Deleting product {}", id);

        let result = sqlx::query("DELETE FROM product WHERE id = $1")
            .bind(id.into_inner())
            .execute(&mut **tx)
            .await?;

        Ok(result.rows_affected())
    }
}
