use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{ProductError, ProductResult};
use crate::models::{BaseProductDto, Product, ProductPatchDto, StockAdjustment, StockOutcome};

/// Repository trait for Product persistence
///
/// Every method that reads and then writes a row does so atomically: no
/// concurrent call can observe or overwrite the row between the two steps.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Store a new product; fails with `DuplicateId` when the id is taken
    async fn insert(&self, product: Product) -> ProductResult<Product>;

    /// Get a product by ID
    async fn find_by_id(&self, id: &str) -> ProductResult<Option<Product>>;

    /// One page ordered by creation time, plus the total number of products
    async fn list(&self, offset: u64, limit: u64) -> ProductResult<(Vec<Product>, u64)>;

    /// Overwrite all mutable fields; `None` when the product does not exist
    async fn replace(
        &self,
        id: &str,
        input: BaseProductDto,
        now: DateTime<Utc>,
    ) -> ProductResult<Option<Product>>;

    /// Overwrite the fields present in `input`; `None` when the product does not exist
    async fn patch(
        &self,
        id: &str,
        input: ProductPatchDto,
        now: DateTime<Utc>,
    ) -> ProductResult<Option<Product>>;

    /// Delete a product by ID, reporting whether a row was removed
    async fn delete(&self, id: &str) -> ProductResult<bool>;

    /// Check and apply a stock change in one step
    async fn adjust_stock(
        &self,
        id: &str,
        adjustment: StockAdjustment,
        now: DateTime<Utc>,
    ) -> ProductResult<StockOutcome>;
}

/// In-memory implementation of ProductRepository (for development/testing)
///
/// Mutations take the write lock for their whole read-modify-write cycle.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<String, Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn insert(&self, product: Product) -> ProductResult<Product> {
        let mut products = self.products.write().await;

        if products.contains_key(&product.product_id) {
            return Err(ProductError::DuplicateId(product.product_id));
        }

        products.insert(product.product_id.clone(), product.clone());
        Ok(product)
    }

    async fn find_by_id(&self, id: &str) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(id).cloned())
    }

    async fn list(&self, offset: u64, limit: u64) -> ProductResult<(Vec<Product>, u64)> {
        let products = self.products.read().await;

        let mut all: Vec<&Product> = products.values().collect();
        all.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.product_id.cmp(&b.product_id))
        });

        let page = all
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .cloned()
            .collect();

        Ok((page, products.len() as u64))
    }

    async fn replace(
        &self,
        id: &str,
        input: BaseProductDto,
        now: DateTime<Utc>,
    ) -> ProductResult<Option<Product>> {
        let mut products = self.products.write().await;

        Ok(products.get_mut(id).map(|product| {
            product.apply_replace(input, now);
            product.clone()
        }))
    }

    async fn patch(
        &self,
        id: &str,
        input: ProductPatchDto,
        now: DateTime<Utc>,
    ) -> ProductResult<Option<Product>> {
        let mut products = self.products.write().await;

        Ok(products.get_mut(id).map(|product| {
            product.apply_patch(input, now);
            product.clone()
        }))
    }

    async fn delete(&self, id: &str) -> ProductResult<bool> {
        let mut products = self.products.write().await;
        Ok(products.remove(id).is_some())
    }

    async fn adjust_stock(
        &self,
        id: &str,
        adjustment: StockAdjustment,
        now: DateTime<Utc>,
    ) -> ProductResult<StockOutcome> {
        let mut products = self.products.write().await;

        let Some(product) = products.get_mut(id) else {
            return Ok(StockOutcome::NotFound);
        };

        match adjustment.apply(product.stock_available) {
            Ok(level) => {
                product.stock_available = level;
                product.touch(now);
                Ok(StockOutcome::Updated(product.clone()))
            }
            Err(outcome) => Ok(outcome),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn product(id: &str, created_at: DateTime<Utc>) -> Product {
        Product::new(
            id.to_string(),
            BaseProductDto {
                name: format!("product-{}", id),
                description: String::new(),
                stock_available: 10,
                price: Decimal::new(999, 2),
            },
            created_at,
        )
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let repo = InMemoryProductRepository::new();
        repo.insert(product("123456", Utc::now())).await.unwrap();

        let found = repo.find_by_id("123456").await.unwrap();
        assert_eq!(found.unwrap().name, "product-123456");
        assert!(repo.find_by_id("654321").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_duplicate_id() {
        let repo = InMemoryProductRepository::new();
        repo.insert(product("123456", Utc::now())).await.unwrap();

        let err = repo.insert(product("123456", Utc::now())).await.unwrap_err();
        assert!(matches!(err, ProductError::DuplicateId(id) if id == "123456"));
    }

    #[tokio::test]
    async fn test_list_pages_in_creation_order() {
        let repo = InMemoryProductRepository::new();
        let start = Utc::now();
        for (i, id) in ["300000", "100000", "200000"].iter().enumerate() {
            let created_at = start + chrono::Duration::seconds(i as i64);
            repo.insert(product(id, created_at)).await.unwrap();
        }

        let (first, total) = repo.list(0, 2).await.unwrap();
        assert_eq!(total, 3);
        let ids: Vec<_> = first.iter().map(|p| p.product_id.as_str()).collect();
        assert_eq!(ids, ["300000", "100000"]);

        let (second, _) = repo.list(2, 2).await.unwrap();
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].product_id, "200000");

        let (beyond, total) = repo.list(10, 2).await.unwrap();
        assert!(beyond.is_empty());
        assert_eq!(total, 3);
    }

    #[tokio::test]
    async fn test_adjust_stock_outcomes() {
        let repo = InMemoryProductRepository::new();
        repo.insert(product("123456", Utc::now())).await.unwrap();

        let outcome = repo
            .adjust_stock("123456", StockAdjustment::Decrement(4), Utc::now())
            .await
            .unwrap();
        assert!(matches!(outcome, StockOutcome::Updated(p) if p.stock_available == 6));

        let outcome = repo
            .adjust_stock("123456", StockAdjustment::Decrement(7), Utc::now())
            .await
            .unwrap();
        assert_eq!(outcome, StockOutcome::Insufficient { available: 6 });

        let outcome = repo
            .adjust_stock("999999", StockAdjustment::Add(1), Utc::now())
            .await
            .unwrap();
        assert_eq!(outcome, StockOutcome::NotFound);
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = InMemoryProductRepository::new();
        repo.insert(product("123456", Utc::now())).await.unwrap();

        assert!(repo.delete("123456").await.unwrap());
        assert!(!repo.delete("123456").await.unwrap());
    }
}
