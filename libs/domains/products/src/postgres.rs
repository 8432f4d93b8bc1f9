use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    ItemsAndPagesNumber, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::{
    entity,
    error::{ProductError, ProductResult},
    models::{CreateProduct, Product, ProductPage, UpdateProduct},
    repository::ProductRepository,
};

/// PostgreSQL-backed repository.
///
/// Name uniqueness is enforced by the `products.name` unique index; a
/// violation on insert or update surfaces as `AlreadyExists`.
pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn find_all(&self) -> ProductResult<Vec<Product>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Product::from).collect())
    }

    async fn find_page(&self, page: u64, size: u64) -> ProductResult<ProductPage> {
        let paginator = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .paginate(&self.db, size);

        let ItemsAndPagesNumber {
            number_of_items,
            number_of_pages,
        } = paginator.num_items_and_pages().await?;

        // The paginator computes `page * size` unchecked
        if page >= number_of_pages || page.checked_mul(size).is_none() {
            return Ok(ProductPage::new(Vec::new(), page, size, number_of_items));
        }

        let models = paginator.fetch_page(page).await?;

        Ok(ProductPage::new(
            models.into_iter().map(Product::from).collect(),
            page,
            size,
            number_of_items,
        ))
    }

    async fn find_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Product::from))
    }

    async fn find_by_name(&self, name: &str) -> ProductResult<Option<Product>> {
        let model = entity::Entity::find()
            .filter(entity::Column::Name.eq(name))
            .one(&self.db)
            .await?;
        Ok(model.map(Product::from))
    }

    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let name = input.name.clone();
        let active_model: entity::ActiveModel = input.into();

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| ProductError::from_write(e, &name))?;

        tracing::info!(product_id = model.id, "Created product");
        Ok(model.into())
    }

    async fn update(&self, id: i64, input: UpdateProduct) -> ProductResult<Product> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(ProductError::NotFound(id))?;

        let name = input.name.clone();
        let mut active_model = model.into_active_model();
        active_model.apply_update(input);

        let updated = active_model
            .update(&self.db)
            .await
            .map_err(|e| ProductError::from_write(e, &name))?;

        tracing::info!(product_id = id, "Updated product");
        Ok(updated.into())
    }

    async fn delete(&self, id: i64) -> ProductResult<bool> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(product_id = id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, Value};
    use std::collections::BTreeMap;

    fn model(id: i64, name: &str) -> entity::Model {
        let now = chrono::Utc::now().into();
        entity::Model {
            id,
            name: name.to_string(),
            description: None,
            price: 12.5,
            stock: 2,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_find_all_maps_rows() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(1, "Lamp"), model(2, "Desk")]])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let products = repo.find_all().await.unwrap();
        let names: Vec<&str> = products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Lamp", "Desk"]);
    }

    #[tokio::test]
    async fn test_find_by_id_missing_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<entity::Model>::new()])
            .into_connection();
        let repo = PgProductRepository::new(db);

        assert!(repo.find_by_id(5).await.unwrap().is_none());
    }

    fn count_row(total: i64) -> BTreeMap<String, Value> {
        BTreeMap::from([("num_items".to_string(), Value::BigInt(Some(total)))])
    }

    #[tokio::test]
    async fn test_page_past_end_skips_fetch() {
        // only the count query is answered; a fetch would find no result queued
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![count_row(3)]])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let page = repo.find_page(1 << 62, 4).await.unwrap();

        assert!(page.content.is_empty());
        assert_eq!(page.page, 1 << 62);
        assert_eq!(page.total_elements, 3);
        assert!(!page.has_next);
    }

    #[tokio::test]
    async fn test_page_within_range_fetches_rows() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![count_row(5)]])
            .append_query_results([vec![model(5, "Lamp")]])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let page = repo.find_page(1, 4).await.unwrap();

        assert_eq!(page.content.len(), 1);
        assert_eq!(page.content[0].id, 5);
        assert_eq!(page.total_pages, 2);
    }

    #[tokio::test]
    async fn test_query_failure_becomes_data_access() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection lost".to_string())])
            .into_connection();
        let repo = PgProductRepository::new(db);

        match repo.find_all().await {
            Err(ProductError::DataAccess { message, .. }) => {
                assert!(message.contains("connection lost"), "{}", message)
            }
            other => panic!("expected DataAccess, got {:?}", other),
        }
    }
}
