use chrono::Utc;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::id_generator::{ProductIdGenerator, RandomIdGenerator};
use crate::models::{
    BaseProductDto, Paged, Product, ProductPatchDto, ProductQuery, StockAdjustment, StockOutcome,
};
use crate::repository::ProductRepository;

/// Fresh identifiers tried before `create_product` gives up
pub const MAX_ID_ATTEMPTS: usize = 5;

/// Service layer for Product business logic
#[derive(Clone)]
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
    id_generator: Arc<dyn ProductIdGenerator>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self::with_id_generator(repository, RandomIdGenerator)
    }

    pub fn with_id_generator(
        repository: R,
        id_generator: impl ProductIdGenerator + 'static,
    ) -> Self {
        Self {
            repository: Arc::new(repository),
            id_generator: Arc::new(id_generator),
        }
    }

    /// List one page of products
    #[instrument(skip(self))]
    pub async fn list_products(&self, query: ProductQuery) -> ProductResult<Paged<Product>> {
        query.validate()?;

        let (items, total_count) = self
            .repository
            .list(query.offset(), query.page_size)
            .await?;

        Ok(Paged {
            items,
            page: query.page,
            page_size: query.page_size,
            total_count,
        })
    }

    /// Get a product by ID
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: &str) -> ProductResult<Product> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))
    }

    /// Create a product under a freshly generated ID
    #[instrument(skip(self, input))]
    pub async fn create_product(&self, input: BaseProductDto) -> ProductResult<Product> {
        input.validate()?;

        let now = Utc::now();
        for attempt in 1..=MAX_ID_ATTEMPTS {
            let product = Product::new(self.id_generator.next_id(), input.clone(), now);

            match self.repository.insert(product).await {
                Ok(created) => {
                    info!(product_id = %created.product_id, "Created product");
                    return Ok(created);
                }
                Err(ProductError::DuplicateId(id)) => {
                    warn!(product_id = %id, attempt, "Generated product ID already in use");
                }
                Err(e) => return Err(e),
            }
        }

        Err(ProductError::IdExhausted)
    }

    /// Replace every mutable field of a product
    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: &str, input: BaseProductDto) -> ProductResult<Product> {
        input.validate()?;

        let product = self
            .repository
            .replace(id, input, Utc::now())
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))?;

        info!(product_id = %id, "Updated product");
        Ok(product)
    }

    /// Change only the fields present in the patch
    #[instrument(skip(self, input))]
    pub async fn patch_product(&self, id: &str, input: ProductPatchDto) -> ProductResult<Product> {
        input.validate()?;

        let product = self
            .repository
            .patch(id, input, Utc::now())
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))?;

        info!(product_id = %id, "Patched product");
        Ok(product)
    }

    /// Delete a product
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: &str) -> ProductResult<bool> {
        if !self.repository.delete(id).await? {
            return Err(ProductError::NotFound(id.to_string()));
        }

        info!(product_id = %id, "Deleted product");
        Ok(true)
    }

    /// Remove `quantity` units; fails without changes when stock is short
    #[instrument(skip(self))]
    pub async fn decrement_stock(&self, id: &str, quantity: i32) -> ProductResult<bool> {
        self.adjust_stock(id, StockAdjustment::Decrement(quantity))
            .await
    }

    /// Add `quantity` units
    #[instrument(skip(self))]
    pub async fn add_to_stock(&self, id: &str, quantity: i32) -> ProductResult<bool> {
        self.adjust_stock(id, StockAdjustment::Add(quantity)).await
    }

    async fn adjust_stock(&self, id: &str, adjustment: StockAdjustment) -> ProductResult<bool> {
        let requested = adjustment.quantity();
        if requested < 1 {
            return Err(ProductError::InvalidQuantity(requested));
        }

        match self
            .repository
            .adjust_stock(id, adjustment, Utc::now())
            .await?
        {
            StockOutcome::Updated(product) => {
                info!(
                    product_id = %id,
                    ?adjustment,
                    stock_available = product.stock_available,
                    "Adjusted stock"
                );
                Ok(true)
            }
            StockOutcome::NotFound => Err(ProductError::NotFound(id.to_string())),
            StockOutcome::Insufficient { available } => Err(ProductError::InsufficientStock {
                available,
                requested,
            }),
            StockOutcome::Overflow { available } => Err(ProductError::StockOverflow {
                available,
                requested,
            }),
        }
    }
}
