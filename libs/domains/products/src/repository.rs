use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, ProductPage, UpdateProduct};

/// Repository trait for Product persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All products ordered by id
    async fn find_all(&self) -> ProductResult<Vec<Product>>;

    /// Zero-based page of `size` products ordered by id
    async fn find_page(&self, page: u64, size: u64) -> ProductResult<ProductPage>;

    async fn find_by_id(&self, id: i64) -> ProductResult<Option<Product>>;

    async fn find_by_name(&self, name: &str) -> ProductResult<Option<Product>>;

    /// Insert a product; fails with `AlreadyExists` if the name is taken
    async fn create(&self, input: CreateProduct) -> ProductResult<Product>;

    /// Replace the mutable fields of product `id`
    async fn update(&self, id: i64, input: UpdateProduct) -> ProductResult<Product>;

    /// Returns false when no row matched
    async fn delete(&self, id: i64) -> ProductResult<bool>;
}

#[derive(Debug, Default)]
struct Store {
    last_id: i64,
    products: BTreeMap<i64, Product>,
}

/// In-memory implementation of ProductRepository (for development/testing)
///
/// Name uniqueness is checked and enforced under the same write lock, so
/// concurrent creates with one name cannot both succeed.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_all(&self) -> ProductResult<Vec<Product>> {
        let store = self.store.read().await;
        Ok(store.products.values().cloned().collect())
    }

    async fn find_page(&self, page: u64, size: u64) -> ProductResult<ProductPage> {
        let store = self.store.read().await;
        let total = store.products.len() as u64;

        let content = store
            .products
            .values()
            .skip(usize::try_from(page.saturating_mul(size)).unwrap_or(usize::MAX))
            .take(usize::try_from(size).unwrap_or(usize::MAX))
            .cloned()
            .collect();

        Ok(ProductPage::new(content, page, size, total))
    }

    async fn find_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let store = self.store.read().await;
        Ok(store.products.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> ProductResult<Option<Product>> {
        let store = self.store.read().await;
        Ok(store.products.values().find(|p| p.name == name).cloned())
    }

    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let mut store = self.store.write().await;

        if store.products.values().any(|p| p.name == input.name) {
            return Err(ProductError::AlreadyExists(input.name));
        }

        store.last_id += 1;
        let product = Product::new(store.last_id, input);
        store.products.insert(product.id, product.clone());

        tracing::info!(product_id = product.id, "Created product");
        Ok(product)
    }

    async fn update(&self, id: i64, input: UpdateProduct) -> ProductResult<Product> {
        let mut store = self.store.write().await;

        if store
            .products
            .values()
            .any(|p| p.id != id && p.name == input.name)
        {
            return Err(ProductError::AlreadyExists(input.name));
        }

        let product = store
            .products
            .get_mut(&id)
            .ok_or(ProductError::NotFound(id))?;
        product.apply_update(input);

        tracing::info!(product_id = id, "Updated product");
        Ok(product.clone())
    }

    async fn delete(&self, id: i64) -> ProductResult<bool> {
        let mut store = self.store.write().await;

        if store.products.remove(&id).is_some() {
            tracing::info!(product_id = id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
