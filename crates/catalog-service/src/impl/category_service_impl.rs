//! Category service implementation.

use crate::category_service::CategoryService;
use crate::dto::{CategoryRequest, CategoryResponse};
use crate::unit_of_work::UnitOfWork;
use async_trait::async_trait;
use catalog_config::ExecutionMode;
use catalog_core::{CatalogResult, Category, CategoryId, ValidateExt};
use catalog_repository::{CategoryRepository, Database, ProductRepository};
use std::sync::Arc;
use tracing::{debug, info};

/// Category service over any [`Database`].
///
/// Product listings embed the category name, so rename and delete rebuild
/// the cached product listing in the same transaction.
pub struct CategoryServiceImpl<D: Database> {
    db: Arc<D>,
    categories: Arc<dyn CategoryRepository<D::Tx>>,
    products: Arc<dyn ProductRepository<D::Tx>>,
    mode: ExecutionMode,
}

impl<D: Database> CategoryServiceImpl<D> {
    /// Creates a new category service.
    pub fn new(
        db: Arc<D>,
        categories: Arc<dyn CategoryRepository<D::Tx>>,
        products: Arc<dyn ProductRepository<D::Tx>>,
        mode: ExecutionMode,
    ) -> Self {
        Self {
            db,
            categories,
            products,
            mode,
        }
    }

    async fn refresh_listing(&self, uow: &mut UnitOfWork<D>) -> CatalogResult<()> {
        let products = Arc::clone(&self.products);
        uow.run(move |tx| async move {
            let mut tx = tx.lock().await;
            products.refresh_cache(&mut *tx).await?;
            Ok(())
        })
        .await
    }

    async fn rename_in(&self, uow: &mut UnitOfWork<D>, id: CategoryId, name: String) -> CatalogResult<Category> {
        let categories = Arc::clone(&self.categories);
        let category = uow
            .run(move |tx| async move {
                let mut tx = tx.lock().await;
                let category = categories.update(&mut *tx, id, &name).await?;
                Ok(category)
            })
            .await?;
        self.refresh_listing(uow).await?;
        Ok(category)
    }

    async fn delete_in(&self, uow: &mut UnitOfWork<D>, id: CategoryId) -> CatalogResult<()> {
        let categories = Arc::clone(&self.categories);
        uow.run(move |tx| async move {
            let mut tx = tx.lock().await;
            categories.delete(&mut *tx, id).await?;
            Ok(())
        })
        .await?;
        self.refresh_listing(uow).await
    }
}

#[async_trait]
impl<D: Database> CategoryService for CategoryServiceImpl<D> {
    async fn create(&self, request: CategoryRequest) -> CatalogResult<CategoryResponse> {
        debug!("Creating category: {}", request.name);

        request.validate_request()?;

        let mut uow = UnitOfWork::begin(Arc::clone(&self.db), self.mode).await?;
        let categories = Arc::clone(&self.categories);
        let result = uow
            .run(move |tx| async move {
                let mut tx = tx.lock().await;
                let category = categories.save(&mut *tx, &request.name).await?;
                Ok(category)
            })
            .await;
        let category = uow.finish(result).await?;

        info!("Category created: {}", category.id);
        Ok(CategoryResponse::from(category))
    }

    async fn update(&self, id: CategoryId, request: CategoryRequest) -> CatalogResult<CategoryResponse> {
        debug!("Renaming category: {}", id);

        request.validate_request()?;

        let mut uow = UnitOfWork::begin(Arc::clone(&self.db), self.mode).await?;
        let result = self.rename_in(&mut uow, id, request.name).await;
        let category = uow.finish(result).await?;

        info!("Category renamed: {}", id);
        Ok(CategoryResponse::from(category))
    }

    async fn delete(&self, id: CategoryId) -> CatalogResult<()> {
        debug!("Deleting category: {}", id);

        let mut uow = UnitOfWork::begin(Arc::clone(&self.db), self.mode).await?;
        let result = self.delete_in(&mut uow, id).await;
        uow.finish(result).await?;

        info!("Category deleted: {}", id);
        Ok(())
    }

    async fn find_by_id(&self, id: CategoryId) -> CatalogResult<CategoryResponse> {
        debug!("Getting category: {}", id);

        let mut uow = UnitOfWork::begin(Arc::clone(&self.db), self.mode).await?;
        let categories = Arc::clone(&self.categories);
        let result = uow
            .run(move |tx| async move {
                let mut tx = tx.lock().await;
                let category = categories.find_by_id(&mut *tx, id).await?;
                Ok(category)
            })
            .await;
        let category = uow.finish(result).await?;

        Ok(CategoryResponse::from(category))
    }

    async fn find_all(&self) -> CatalogResult<Vec<CategoryResponse>> {
        debug!("Listing categories");

        let mut uow = UnitOfWork::begin(Arc::clone(&self.db), self.mode).await?;
        let categories = Arc::clone(&self.categories);
        let result = uow
            .run(move |tx| async move {
                let mut tx = tx.lock().await;
                let all = categories.find_all(&mut *tx).await?;
                Ok(all)
            })
            .await;
        let all = uow.finish(result).await?;

        Ok(all.into_iter().map(CategoryResponse::from).collect())
    }
}

impl<D: Database> std::fmt::Debug for CategoryServiceImpl<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CategoryServiceImpl")
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}
