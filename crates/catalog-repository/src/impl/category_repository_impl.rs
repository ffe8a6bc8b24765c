//! `CategoryRepositoryImpl`: thin coordinator over [`CategoryDao`].
//!
//! [`CategoryDao`]: crate::dao::CategoryDao

use crate::dao::CategoryDao;
use crate::traits::CategoryRepository;
use async_trait::async_trait;
use catalog_core::{CatalogError, CatalogResult, Category, CategoryId};
use std::sync::Arc;
use tracing::{debug, info};

/// Repository implementation that orchestrates [`CategoryDao`] access.
pub struct CategoryRepositoryImpl<Tx> {
    category_dao: Arc<dyn CategoryDao<Tx>>,
}

impl<Tx> CategoryRepositoryImpl<Tx> {
    /// Creates a new `CategoryRepositoryImpl` with the given DAO.
    #[must_use]
    pub fn new(category_dao: Arc<dyn CategoryDao<Tx>>) -> Self {
        Self { category_dao }
    }
}

#[async_trait]
impl<Tx: Send + 'static> CategoryRepository<Tx> for CategoryRepositoryImpl<Tx> {
    async fn save(&self, tx: &mut Tx, name: &str) -> CatalogResult<Category> {
        debug!("Repository: save category {}", name);
        let category = self.category_dao.insert(tx, name).await?;
        info!("Created category {}", category.id);
        Ok(category)
    }

    async fn update(&self, tx: &mut Tx, id: CategoryId, name: &str) -> CatalogResult<Category> {
        debug!("Repository: update category {}", id);
        self.category_dao
            .update(tx, id, name)
            .await?
            .ok_or_else(|| CatalogError::not_found("Category", id))
    }

    async fn delete(&self, tx: &mut Tx, id: CategoryId) -> CatalogResult<()> {
        debug!("Repository: delete category {}", id);
        match self.category_dao.delete(tx, id).await? {
            0 => Err(CatalogError::not_found("Category", id)),
            _ => Ok(()),
        }
    }

    async fn find_all(&self, tx: &mut Tx) -> CatalogResult<Vec<Category>> {
        debug!("Repository: find_all categories");
        self.category_dao.fetch_all(tx).await
    }

    async fn find_by_id(&self, tx: &mut Tx, id: CategoryId) -> CatalogResult<Category> {
        debug!("Repository: find_by_id category {}", id);
        self.category_dao
            .fetch_by_id(tx, id)
            .await?
            .ok_or_else(|| CatalogError::not_found("Category", id))
    }
}

impl<Tx> std::fmt::Debug for CategoryRepositoryImpl<Tx> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CategoryRepositoryImpl").finish_non_exhaustive()
    }
}
