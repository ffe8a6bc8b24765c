//! Product service implementation.

use crate::dto::{CreateProductRequest, ProductResponse, UpdateProductRequest};
use crate::product_service::ProductService;
use crate::unit_of_work::UnitOfWork;
use async_trait::async_trait;
use catalog_config::ExecutionMode;
use catalog_core::{CatalogResult, CategoryId, NewProduct, Product, ProductChanges, ProductId, ValidateExt};
use catalog_repository::{CategoryRepository, Database, ProductRepository};
use std::sync::Arc;
use tracing::{debug, info};

type DynProductRepository<D> = Arc<dyn ProductRepository<<D as Database>::Tx>>;
type DynCategoryRepository<D> = Arc<dyn CategoryRepository<<D as Database>::Tx>>;

/// Product service over any [`Database`].
///
/// Each public operation opens one [`UnitOfWork`], runs its repository calls
/// through it, and finishes it exactly once with the operation's result.
pub struct ProductServiceImpl<D: Database> {
    db: Arc<D>,
    products: DynProductRepository<D>,
    categories: DynCategoryRepository<D>,
    mode: ExecutionMode,
}

impl<D: Database> ProductServiceImpl<D> {
    /// Creates a new product service.
    pub fn new(
        db: Arc<D>,
        products: DynProductRepository<D>,
        categories: DynCategoryRepository<D>,
        mode: ExecutionMode,
    ) -> Self {
        Self {
            db,
            products,
            categories,
            mode,
        }
    }

    async fn begin(&self) -> CatalogResult<UnitOfWork<D>> {
        UnitOfWork::begin(Arc::clone(&self.db), self.mode).await
    }

    async fn find_product(&self, uow: &mut UnitOfWork<D>, id: ProductId) -> CatalogResult<Product> {
        let products = Arc::clone(&self.products);
        uow.run(move |tx| async move {
            let mut tx = tx.lock().await;
            let product = products.find_by_id(&mut *tx, id).await?;
            Ok(product)
        })
        .await
    }

    async fn require_category(&self, uow: &mut UnitOfWork<D>, id: CategoryId) -> CatalogResult<()> {
        let categories = Arc::clone(&self.categories);
        uow.run(move |tx| async move {
            let mut tx = tx.lock().await;
            categories.find_by_id(&mut *tx, id).await?;
            Ok(())
        })
        .await
    }

    async fn create_in(&self, uow: &mut UnitOfWork<D>, request: CreateProductRequest) -> CatalogResult<Product> {
        self.require_category(uow, request.category_id).await?;

        let products = Arc::clone(&self.products);
        let new_product = NewProduct::new(request.name, request.category_id);
        uow.run(move |tx| async move {
            let mut tx = tx.lock().await;
            let product = products.save(&mut *tx, new_product).await?;
            Ok(product)
        })
        .await
    }

    async fn update_in(
        &self,
        uow: &mut UnitOfWork<D>,
        id: ProductId,
        request: UpdateProductRequest,
    ) -> CatalogResult<Product> {
        let existing = self.find_product(uow, id).await?;

        let category_id = request.category_id.filter(|c| !c.is_unset());
        if let Some(category_id) = category_id {
            self.require_category(uow, category_id).await?;
        }

        let changes = ProductChanges::new(id, request.name, category_id);
        if changes.is_empty() {
            debug!("Nothing to update for product {}", id);
            return Ok(existing);
        }

        let products = Arc::clone(&self.products);
        let updated = uow
            .run(move |tx| async move {
                let mut tx = tx.lock().await;
                let updated = products.update(&mut *tx, changes).await?;
                Ok(updated)
            })
            .await?;

        Ok(updated.unwrap_or(existing))
    }

    async fn delete_in(&self, uow: &mut UnitOfWork<D>, id: ProductId) -> CatalogResult<()> {
        self.find_product(uow, id).await?;

        let products = Arc::clone(&self.products);
        uow.run(move |tx| async move {
            let mut tx = tx.lock().await;
            products.delete(&mut *tx, id).await?;
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl<D: Database> ProductService for ProductServiceImpl<D> {
    async fn create(&self, request: CreateProductRequest) -> CatalogResult<ProductResponse> {
        debug!("Creating product: {}", request.name);

        request.validate_request()?;

        let mut uow = self.begin().await?;
        let result = self.create_in(&mut uow, request).await;
        let product = uow.finish(result).await?;

        info!("Product created: {}", product.id);
        Ok(ProductResponse::from(product))
    }

    async fn update(&self, id: ProductId, request: UpdateProductRequest) -> CatalogResult<ProductResponse> {
        debug!("Updating product: {}", id);

        request.validate_request()?;

        let mut uow = self.begin().await?;
        let result = self.update_in(&mut uow, id, request).await;
        let product = uow.finish(result).await?;

        info!("Product updated: {}", id);
        Ok(ProductResponse::from(product))
    }

    async fn delete(&self, id: ProductId) -> CatalogResult<()> {
        debug!("Deleting product: {}", id);

        let mut uow = self.begin().await?;
        let result = self.delete_in(&mut uow, id).await;
        uow.finish(result).await?;

        info!("Product deleted: {}", id);
        Ok(())
    }

    async fn find_by_id(&self, id: ProductId) -> CatalogResult<ProductResponse> {
        debug!("Getting product: {}", id);

        let mut uow = self.begin().await?;
        let result = self.find_product(&mut uow, id).await;
        let product = uow.finish(result).await?;

        Ok(ProductResponse::from(product))
    }

    async fn find_all(&self) -> CatalogResult<Vec<ProductResponse>> {
        debug!("Listing products");

        let mut uow = self.begin().await?;
        let products = Arc::clone(&self.products);
        let result = uow
            .run(move |tx| async move {
                let mut tx = tx.lock().await;
                let listing = products.find_all(&mut *tx).await?;
                Ok(listing)
            })
            .await;
        let listing = uow.finish(result).await?;

        Ok(listing.into_iter().map(ProductResponse::from).collect())
    }
}

impl<D: Database> std::fmt::Debug for ProductServiceImpl<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductServiceImpl")
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::CatalogError;
    use catalog_repository::cache::cache_keys;
    use catalog_repository::memory::{MemoryBackend, MemoryDatabase, MemoryTransaction};
    use catalog_repository::{CategoryRepositoryImpl, ProductRepositoryImpl};
    use std::time::Duration;

    const MODES: [ExecutionMode; 2] = [ExecutionMode::Inline, ExecutionMode::Spawned];
    const TTL: Duration = Duration::from_secs(600);

    fn service(backend: &MemoryBackend, mode: ExecutionMode) -> ProductServiceImpl<MemoryDatabase> {
        let products = ProductRepositoryImpl::<MemoryTransaction>::new(
            backend.product_dao.clone(),
            backend.cache.clone(),
            TTL,
        );
        let categories = CategoryRepositoryImpl::<MemoryTransaction>::new(backend.category_dao.clone());
        ProductServiceImpl::<MemoryDatabase>::new(
            Arc::clone(&backend.database),
            Arc::new(products),
            Arc::new(categories),
            mode,
        )
    }

    fn create_request(name: &str, category_id: CategoryId) -> CreateProductRequest {
        CreateProductRequest {
            name: name.to_string(),
            category_id,
        }
    }

    #[tokio::test]
    async fn test_create_returns_projection_and_caches_listing() {
        for mode in MODES {
            let backend = MemoryBackend::new();
            let furniture = backend.database.seed_category("Furniture");

            let created = service(&backend, mode)
                .create(create_request("Table", furniture.id))
                .await
                .unwrap();

            assert_eq!(created.name, "Table");
            assert_eq!(created.category_name, "Furniture");
            assert_eq!(backend.database.products().len(), 1);
            assert_eq!(backend.database.commits(), 1);

            let cached = backend.cache.peek(cache_keys::PRODUCT_LIST).unwrap();
            let listing: Vec<ProductResponse> = serde_json::from_str(&cached).unwrap();
            assert_eq!(listing, vec![created]);
            let ttl = backend.cache.ttl(cache_keys::PRODUCT_LIST).unwrap();
            assert!(ttl > TTL - Duration::from_secs(5) && ttl <= TTL);
        }
    }

    #[tokio::test]
    async fn test_create_with_unknown_category_inserts_nothing() {
        for mode in MODES {
            let backend = MemoryBackend::new();

            let err = service(&backend, mode)
                .create(create_request("Table", CategoryId::new(42)))
                .await
                .unwrap_err();

            assert_eq!(err.to_string(), "Category with id 42 not found");
            assert!(backend.database.products().is_empty());
            assert_eq!(backend.cache.writes(), 0);
            assert_eq!((backend.database.commits(), backend.database.rollbacks()), (0, 1));
        }
    }

    #[tokio::test]
    async fn test_create_rejects_blank_name_before_opening_transaction() {
        let backend = MemoryBackend::new();
        let furniture = backend.database.seed_category("Furniture");

        let err = service(&backend, ExecutionMode::Inline)
            .create(create_request("", furniture.id))
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::Validation(_)));
        assert_eq!((backend.database.commits(), backend.database.rollbacks()), (0, 0));
    }

    #[tokio::test]
    async fn test_create_succeeds_when_cache_unavailable() {
        let backend = MemoryBackend::new();
        let furniture = backend.database.seed_category("Furniture");
        backend.cache.set_failing(true);

        let created = service(&backend, ExecutionMode::Spawned)
            .create(create_request("Table", furniture.id))
            .await
            .unwrap();

        assert_eq!(created.category_name, "Furniture");
        assert_eq!(backend.database.commits(), 1);
    }

    #[tokio::test]
    async fn test_find_all_serves_cached_listing() {
        for mode in MODES {
            let backend = MemoryBackend::new();
            let furniture = backend.database.seed_category("Furniture");
            let service = service(&backend, mode);
            service.create(create_request("Table", furniture.id)).await.unwrap();
            service.create(create_request("Chair", furniture.id)).await.unwrap();
            let store_reads = backend.product_dao.fetch_all_calls();

            let names: Vec<String> = service
                .find_all()
                .await
                .unwrap()
                .into_iter()
                .map(|p| p.name)
                .collect();

            assert_eq!(names, vec!["Table", "Chair"]);
            assert_eq!(backend.product_dao.fetch_all_calls(), store_reads);
        }
    }

    #[tokio::test]
    async fn test_find_all_without_cache_reads_store() {
        let backend = MemoryBackend::new();
        let furniture = backend.database.seed_category("Furniture");
        backend.database.seed_product("Table", furniture.id).unwrap();
        backend.cache.set_failing(true);

        let listing = service(&backend, ExecutionMode::Inline).find_all().await.unwrap();

        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].category_name, "Furniture");
    }

    #[tokio::test]
    async fn test_find_by_id_not_found() {
        for mode in MODES {
            let backend = MemoryBackend::new();

            let err = service(&backend, mode).find_by_id(ProductId::new(7)).await.unwrap_err();

            assert!(err.is_not_found());
            assert_eq!(backend.database.rollbacks(), 1);
        }
    }

    #[tokio::test]
    async fn test_update_moves_and_renames() {
        for mode in MODES {
            let backend = MemoryBackend::new();
            let furniture = backend.database.seed_category("Furniture");
            let lighting = backend.database.seed_category("Lighting");
            let table = backend.database.seed_product("Table", furniture.id).unwrap();
            let service = service(&backend, mode);

            let moved = service
                .update(
                    table.id,
                    UpdateProductRequest {
                        name: None,
                        category_id: Some(lighting.id),
                    },
                )
                .await
                .unwrap();
            assert_eq!((moved.name.as_str(), moved.category_name.as_str()), ("Table", "Lighting"));

            let renamed = service
                .update(
                    table.id,
                    UpdateProductRequest {
                        name: Some("Lamp".into()),
                        category_id: None,
                    },
                )
                .await
                .unwrap();
            assert_eq!((renamed.name.as_str(), renamed.category_name.as_str()), ("Lamp", "Lighting"));

            let listing = service.find_all().await.unwrap();
            assert_eq!(listing, vec![renamed]);
        }
    }

    #[tokio::test]
    async fn test_empty_update_returns_existing_row() {
        let backend = MemoryBackend::new();
        let furniture = backend.database.seed_category("Furniture");
        let table = backend.database.seed_product("Table", furniture.id).unwrap();

        let unchanged = service(&backend, ExecutionMode::Inline)
            .update(
                table.id,
                UpdateProductRequest {
                    name: Some(String::new()),
                    category_id: Some(CategoryId::new(0)),
                },
            )
            .await
            .unwrap();

        assert_eq!(unchanged, ProductResponse::from(table));
        assert_eq!(backend.cache.writes(), 0);
        assert_eq!(backend.database.commits(), 1);
    }

    #[tokio::test]
    async fn test_blank_name_update_keeps_current_name() {
        for mode in MODES {
            let backend = MemoryBackend::new();
            let furniture = backend.database.seed_category("Furniture");
            let table = backend.database.seed_product("Table", furniture.id).unwrap();

            let unchanged = service(&backend, mode)
                .update(
                    table.id,
                    UpdateProductRequest {
                        name: Some("   ".to_string()),
                        category_id: None,
                    },
                )
                .await
                .unwrap();

            assert_eq!(unchanged.name, "Table");
            assert_eq!(backend.database.products()[0].name, "Table");
            assert_eq!(backend.cache.writes(), 0);
        }
    }

    #[tokio::test]
    async fn test_update_unknown_product_or_category() {
        for mode in MODES {
            let backend = MemoryBackend::new();
            let furniture = backend.database.seed_category("Furniture");
            let table = backend.database.seed_product("Table", furniture.id).unwrap();
            let service = service(&backend, mode);

            let err = service
                .update(ProductId::new(99), UpdateProductRequest::default())
                .await
                .unwrap_err();
            assert_eq!(err.to_string(), "Product with id 99 not found");

            let err = service
                .update(
                    table.id,
                    UpdateProductRequest {
                        name: Some("Desk".into()),
                        category_id: Some(CategoryId::new(99)),
                    },
                )
                .await
                .unwrap_err();
            assert_eq!(err.to_string(), "Category with id 99 not found");

            assert_eq!(backend.database.products(), vec![table]);
            assert_eq!(backend.database.rollbacks(), 2);
        }
    }

    #[tokio::test]
    async fn test_delete_removes_row_and_refreshes_listing() {
        for mode in MODES {
            let backend = MemoryBackend::new();
            let furniture = backend.database.seed_category("Furniture");
            let service = service(&backend, mode);
            let table = service.create(create_request("Table", furniture.id)).await.unwrap();

            service.delete(table.id).await.unwrap();

            assert!(backend.database.products().is_empty());
            assert_eq!(backend.cache.peek(cache_keys::PRODUCT_LIST).as_deref(), Some("[]"));
            assert!(service.find_all().await.unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn test_delete_missing_product_rolls_back() {
        for mode in MODES {
            let backend = MemoryBackend::new();

            let err = service(&backend, mode).delete(ProductId::new(5)).await.unwrap_err();

            assert!(err.is_not_found());
            assert_eq!(backend.cache.writes(), 0);
            assert_eq!((backend.database.commits(), backend.database.rollbacks()), (0, 1));
        }
    }
}
