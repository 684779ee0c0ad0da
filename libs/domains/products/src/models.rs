use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

/// Recorded as `created_by` / `updated_by` until requests carry an identity
pub const SYSTEM_USER: &str = "system";

pub const MIN_PRICE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);
pub const MAX_PRICE: Decimal = Decimal::from_parts(99_999_999, 0, 0, false, 2);

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const MAX_PAGE_SIZE: u64 = 100;

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::new("required").with_message("Name is required.".into()));
    }
    Ok(())
}

fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price < MIN_PRICE || *price > MAX_PRICE {
        let mut err = ValidationError::new("range")
            .with_message("Price must be between 0.01 and 999999.99.".into());
        err.add_param("min".into(), &MIN_PRICE);
        err.add_param("max".into(), &MAX_PRICE);
        err.add_param("value".into(), price);
        return Err(err);
    }

    if price.normalize().scale() > 2 {
        return Err(ValidationError::new("precision")
            .with_message("Price cannot have more than 2 decimal places.".into()));
    }

    Ok(())
}

/// Product entity - a row of the inventory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Six digit identifier
    #[schema(example = "482913")]
    pub product_id: String,
    #[schema(example = "Widget")]
    pub name: String,
    pub description: String,
    /// Units on hand, never negative
    #[schema(example = 10)]
    pub stock_available: i32,
    #[schema(example = 9.99)]
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<String>,
}

impl Product {
    pub fn new(product_id: String, input: BaseProductDto, now: DateTime<Utc>) -> Self {
        Self {
            product_id,
            name: input.name,
            description: input.description,
            stock_available: input.stock_available,
            price: input.price,
            created_at: now,
            created_by: SYSTEM_USER.to_string(),
            updated_at: None,
            updated_by: None,
        }
    }

    /// Overwrite every mutable field (PUT semantics)
    pub fn apply_replace(&mut self, input: BaseProductDto, now: DateTime<Utc>) {
        self.name = input.name;
        self.description = input.description;
        self.stock_available = input.stock_available;
        self.price = input.price;
        self.touch(now);
    }

    /// Overwrite only the fields present in the patch
    pub fn apply_patch(&mut self, patch: ProductPatchDto, now: DateTime<Utc>) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(stock_available) = patch.stock_available {
            self.stock_available = stock_available;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        self.touch(now);
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = Some(now);
        self.updated_by = Some(SYSTEM_USER.to_string());
    }
}

/// Full product payload for create (POST) and replace (PUT)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BaseProductDto {
    #[validate(
        length(max = 100, message = "Name cannot exceed 100 characters."),
        custom(function = "validate_name")
    )]
    #[schema(example = "Widget", max_length = 100)]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 500, message = "Description cannot exceed 500 characters."))]
    #[schema(max_length = 500)]
    pub description: String,
    #[validate(range(min = 0, message = "Stock available cannot be negative."))]
    #[schema(example = 10, minimum = 0)]
    pub stock_available: i32,
    #[validate(custom(function = "validate_price"))]
    #[schema(example = 9.99)]
    pub price: Decimal,
}

/// Partial product payload for PATCH; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatchDto {
    #[validate(
        length(max = 100, message = "Name cannot exceed 100 characters."),
        custom(function = "validate_name")
    )]
    pub name: Option<String>,
    #[validate(length(max = 500, message = "Description cannot exceed 500 characters."))]
    pub description: Option<String>,
    #[validate(range(min = 0, message = "Stock available cannot be negative."))]
    pub stock_available: Option<i32>,
    #[validate(custom(function = "validate_price"))]
    pub price: Option<Decimal>,
}

fn default_page() -> u64 {
    DEFAULT_PAGE
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

/// Paging parameters for listing products
#[derive(Debug, Clone, PartialEq, Deserialize, Validate, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct ProductQuery {
    /// 1-based page number
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "Page must be 1 or greater."))]
    #[param(default = 1, minimum = 1)]
    pub page: u64,
    /// Items per page
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100, message = "Page size must be between 1 and 100."))]
    #[param(default = 10, minimum = 1, maximum = 100)]
    pub page_size: u64,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ProductQuery {
    pub fn new(page: u64, page_size: u64) -> Self {
        Self { page, page_size }
    }

    /// Rows to skip before this page starts
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }
}

/// One page of results plus the total the page was cut from
#[derive(Debug, Clone, PartialEq)]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub page_size: u64,
    pub total_count: u64,
}

impl<T> Paged<T> {
    pub fn total_pages(&self) -> u64 {
        axum_helpers::envelope::total_pages(self.total_count, self.page_size)
    }
}

/// A requested change to `stock_available`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockAdjustment {
    Decrement(i32),
    Add(i32),
}

/// What a stock adjustment did to the stored row
#[derive(Debug, Clone, PartialEq)]
pub enum StockOutcome {
    NotFound,
    Insufficient { available: i32 },
    Overflow { available: i32 },
    Updated(Product),
}

impl StockAdjustment {
    pub fn quantity(self) -> i32 {
        match self {
            StockAdjustment::Decrement(q) | StockAdjustment::Add(q) => q,
        }
    }

    /// New stock level, or the outcome that prevents the change
    pub fn apply(self, available: i32) -> Result<i32, StockOutcome> {
        match self {
            StockAdjustment::Decrement(quantity) if quantity > available => {
                Err(StockOutcome::Insufficient { available })
            }
            StockAdjustment::Decrement(quantity) => Ok(available - quantity),
            StockAdjustment::Add(quantity) => available
                .checked_add(quantity)
                .ok_or(StockOutcome::Overflow { available }),
        }
    }
}
