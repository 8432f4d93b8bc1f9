//! Product Service - Business logic layer

use axum_helpers::errors::field_messages;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, PAGE_SIZE, Product, ProductPage, UpdateProduct};
use crate::repository::ProductRepository;

/// Product service providing business logic operations
///
/// Validation runs before any repository call, so a rejected payload never
/// causes a partial mutation.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// All products ordered by id. An empty store is reported as `NoProducts`.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> ProductResult<Vec<Product>> {
        let products = self.repository.find_all().await?;

        if products.is_empty() {
            return Err(ProductError::NoProducts);
        }

        Ok(products)
    }

    /// Zero-based page of [`PAGE_SIZE`] products. A page past the end is `EmptyPage`.
    #[instrument(skip(self))]
    pub async fn list_page(&self, page: u64) -> ProductResult<ProductPage> {
        let result = self.repository.find_page(page, PAGE_SIZE).await?;

        if result.content.is_empty() {
            return Err(ProductError::EmptyPage(page));
        }

        Ok(result)
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: i64) -> ProductResult<Product> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(field_messages(&e)))?;

        // The unique index still decides races; this only answers early.
        if self.repository.find_by_name(&input.name).await?.is_some() {
            return Err(ProductError::AlreadyExists(input.name));
        }

        self.repository.create(input).await
    }

    #[instrument(skip(self, input), fields(product_id = ?input.id))]
    pub async fn update_product(&self, input: UpdateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(field_messages(&e)))?;
        let id = input.required_id()?;

        if self.repository.find_by_id(id).await?.is_none() {
            return Err(ProductError::NotFound(id));
        }

        if let Some(owner) = self.repository.find_by_name(&input.name).await?
            && owner.id != id
        {
            return Err(ProductError::AlreadyExists(input.name));
        }

        self.repository.update(id, input).await
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i64) -> ProductResult<()> {
        if self.repository.find_by_id(id).await?.is_none() {
            return Err(ProductError::NotFound(id));
        }

        // Removed by someone else between the lookup and the delete
        if !self.repository.delete(id).await? {
            return Err(ProductError::NotFound(id));
        }

        Ok(())
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockProductRepository;
    use mockall::predicate::eq;

    fn product(id: i64, name: &str) -> Product {
        Product::new(
            id,
            CreateProduct {
                name: name.to_string(),
                description: None,
                price: 5.0,
                stock: 1,
            },
        )
    }

    fn create_input(name: &str) -> CreateProduct {
        CreateProduct {
            name: name.to_string(),
            description: None,
            price: 5.0,
            stock: 1,
        }
    }

    fn update_input(id: Option<i64>, name: &str) -> UpdateProduct {
        UpdateProduct {
            id,
            name: name.to_string(),
            description: Some("updated".to_string()),
            price: 7.5,
            stock: 2,
        }
    }

    #[tokio::test]
    async fn test_list_products_empty_store_is_no_products() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_find_all().returning(|| Ok(vec![]));

        let service = ProductService::new(mock_repo);
        let result = service.list_products().await;

        assert!(matches!(result, Err(ProductError::NoProducts)));
    }

    #[tokio::test]
    async fn test_list_page_uses_fixed_page_size() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find_page()
            .with(eq(1), eq(PAGE_SIZE))
            .returning(|page, size| Ok(ProductPage::new(vec![product(5, "Lamp")], page, size, 5)));

        let service = ProductService::new(mock_repo);
        let page = service.list_page(1).await.unwrap();

        assert_eq!(page.content.len(), 1);
        assert_eq!(page.size, 4);
        assert_eq!(page.total_pages, 2);
    }

    #[tokio::test]
    async fn test_list_page_past_end_is_empty_page() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find_page()
            .returning(|page, size| Ok(ProductPage::new(vec![], page, size, 3)));

        let service = ProductService::new(mock_repo);
        let result = service.list_page(7).await;

        assert!(matches!(result, Err(ProductError::EmptyPage(7))));
    }

    #[tokio::test]
    async fn test_get_product_not_found() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find_by_id()
            .with(eq(9))
            .returning(|_| Ok(None));

        let service = ProductService::new(mock_repo);
        assert!(matches!(
            service.get_product(9).await,
            Err(ProductError::NotFound(9))
        ));
    }

    #[tokio::test]
    async fn test_create_invalid_input_never_reaches_repository() {
        let mock_repo = MockProductRepository::new();
        let service = ProductService::new(mock_repo);

        match service.create_product(create_input("L")).await {
            Err(ProductError::Validation(errors)) => {
                assert_eq!(errors, vec!["Field 'name' size must be between 2 and 20"])
            }
            other => panic!("expected Validation, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_existing_name_is_rejected_before_insert() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find_by_name()
            .returning(|name| Ok(Some(product(1, name))));
        mock_repo.expect_create().never();

        let service = ProductService::new(mock_repo);
        let result = service.create_product(create_input("Lamp")).await;

        assert!(matches!(result, Err(ProductError::AlreadyExists(name)) if name == "Lamp"));
    }

    #[tokio::test]
    async fn test_create_success() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_find_by_name().returning(|_| Ok(None));
        mock_repo
            .expect_create()
            .times(1)
            .returning(|input| Ok(Product::new(1, input)));

        let service = ProductService::new(mock_repo);
        let created = service.create_product(create_input("Lamp")).await.unwrap();

        assert_eq!(created.id, 1);
        assert_eq!(created.name, "Lamp");
    }

    #[tokio::test]
    async fn test_update_without_id_is_validation_error() {
        let mock_repo = MockProductRepository::new();
        let service = ProductService::new(mock_repo);

        match service.update_product(update_input(None, "Lamp")).await {
            Err(ProductError::Validation(errors)) => {
                assert_eq!(errors, vec!["Field 'id' must not be null"])
            }
            other => panic!("expected Validation, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_update_missing_product_skips_mutation() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_find_by_id().returning(|_| Ok(None));
        mock_repo.expect_update().never();

        let service = ProductService::new(mock_repo);
        let result = service.update_product(update_input(Some(3), "Lamp")).await;

        assert!(matches!(result, Err(ProductError::NotFound(3))));
    }

    #[tokio::test]
    async fn test_update_to_name_of_other_product_is_rejected() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find_by_id()
            .returning(|id| Ok(Some(product(id, "Desk"))));
        mock_repo
            .expect_find_by_name()
            .returning(|name| Ok(Some(product(1, name))));
        mock_repo.expect_update().never();

        let service = ProductService::new(mock_repo);
        let result = service.update_product(update_input(Some(2), "Lamp")).await;

        assert!(matches!(result, Err(ProductError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_update_keeping_own_name() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find_by_id()
            .returning(|id| Ok(Some(product(id, "Lamp"))));
        mock_repo
            .expect_find_by_name()
            .returning(|name| Ok(Some(product(2, name))));
        mock_repo
            .expect_update()
            .with(eq(2), mockall::predicate::always())
            .times(1)
            .returning(|id, input| {
                let mut updated = product(id, "Lamp");
                updated.apply_update(input);
                Ok(updated)
            });

        let service = ProductService::new(mock_repo);
        let updated = service
            .update_product(update_input(Some(2), "Lamp"))
            .await
            .unwrap();

        assert_eq!(updated.price, 7.5);
        assert_eq!(updated.description.as_deref(), Some("updated"));
    }

    #[tokio::test]
    async fn test_delete_missing_product_skips_mutation() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_find_by_id().returning(|_| Ok(None));
        mock_repo.expect_delete().never();

        let service = ProductService::new(mock_repo);
        assert!(matches!(
            service.delete_product(4).await,
            Err(ProductError::NotFound(4))
        ));
    }

    #[tokio::test]
    async fn test_delete_success() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find_by_id()
            .returning(|id| Ok(Some(product(id, "Lamp"))));
        mock_repo
            .expect_delete()
            .with(eq(4))
            .times(1)
            .returning(|_| Ok(true));

        let service = ProductService::new(mock_repo);
        assert!(service.delete_product(4).await.is_ok());
    }

    #[tokio::test]
    async fn test_repository_failure_propagates() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_find_all().returning(|| {
            Err(ProductError::DataAccess {
                message: "Connection Error: refused".to_string(),
                cause: "refused".to_string(),
            })
        });

        let service = ProductService::new(mock_repo);
        assert!(matches!(
            service.list_products().await,
            Err(ProductError::DataAccess { .. })
        ));
    }
}
