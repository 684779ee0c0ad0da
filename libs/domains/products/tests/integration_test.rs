//! Integration tests for Products domain
//!
//! These tests use real PostgreSQL via testcontainers to ensure:
//! - Rows map to and from the entity correctly
//! - Primary key and CHECK constraints are enforced
//! - Stock changes lock the row so concurrent requests never lose updates

use chrono::Utc;
use domain_products::*;
use rust_decimal::Decimal;
use sea_orm::ConnectionTrait;
use std::sync::Arc;
use test_utils::{TestDataBuilder, TestDatabase, assertions::*};

fn input(builder: &TestDataBuilder, stock_available: i32) -> BaseProductDto {
    BaseProductDto {
        name: builder.name("product", "main"),
        description: "Integration test product".to_string(),
        stock_available,
        price: Decimal::new(999, 2),
    }
}

// ============================================================================
// Repository Tests
// ============================================================================

#[tokio::test]
async fn test_create_and_get_product() {
    let db = TestDatabase::new().await;
    let service = ProductService::new(PgProductRepository::new(db.connection()));
    let builder = TestDataBuilder::from_test_name("create_and_get");

    let created = service.create_product(input(&builder, 10)).await.unwrap();
    assert_product_id(&created.product_id);
    assert_eq!(created.created_by, "system");

    let retrieved = PgProductRepository::new(db.connection())
        .find_by_id(&created.product_id)
        .await
        .unwrap();
    let retrieved = assert_some(retrieved, "product should exist");

    assert_eq!(retrieved.name, builder.name("product", "main"));
    assert_eq!(retrieved.price, Decimal::new(999, 2));
    assert_eq!(retrieved.stock_available, 10);
    assert!(retrieved.updated_at.is_none());
}

#[tokio::test]
async fn test_duplicate_id_is_rejected() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("duplicate_id");

    let product = Product::new("123456".to_string(), input(&builder, 1), Utc::now());
    repo.insert(product.clone()).await.unwrap();

    let err = repo.insert(product).await.unwrap_err();
    assert!(matches!(err, ProductError::DuplicateId(id) if id == "123456"));
}

#[tokio::test]
async fn test_negative_stock_check_constraint() {
    let db = TestDatabase::new().await;

    let result = db
        .connection()
        .execute_unprepared(
            "INSERT INTO products (product_id, name, description, stock_available, price, created_at, created_by) \
             VALUES ('123456', 'x', '', -1, 1.00, now(), 'system')",
        )
        .await;

    assert!(result.is_err(), "negative stock should violate the CHECK");
}

#[tokio::test]
async fn test_list_pages() {
    let db = TestDatabase::new().await;
    let service = ProductService::new(PgProductRepository::new(db.connection()));
    let builder = TestDataBuilder::from_test_name("list_pages");

    for stock in 0..5 {
        service
            .create_product(input(&builder, stock))
            .await
            .unwrap();
    }

    let page = service
        .list_products(ProductQuery::new(2, 2))
        .await
        .unwrap();
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.total_count, 5);
    assert_eq!(page.total_pages(), 3);

    let beyond = service
        .list_products(ProductQuery::new(4, 2))
        .await
        .unwrap();
    assert!(beyond.items.is_empty());
    assert_eq!(beyond.total_count, 5);
}

#[tokio::test]
async fn test_list_page_beyond_bigint_offset_is_empty() {
    let db = TestDatabase::new().await;
    let service = ProductService::new(PgProductRepository::new(db.connection()));
    let builder = TestDataBuilder::from_test_name("huge_page");

    service.create_product(input(&builder, 1)).await.unwrap();

    for page in [1_000_000_000_000_000_000, u64::MAX] {
        let query = ProductQuery::new(page, 10);
        assert!(query.offset() > i64::MAX as u64);

        let result = service.list_products(query).await.unwrap();
        assert!(result.items.is_empty());
        assert_eq!(result.total_count, 1);
    }
}

#[tokio::test]
async fn test_replace_patch_and_delete() {
    let db = TestDatabase::new().await;
    let service = ProductService::new(PgProductRepository::new(db.connection()));
    let builder = TestDataBuilder::from_test_name("replace_patch_delete");

    let created = service.create_product(input(&builder, 10)).await.unwrap();
    let id = created.product_id.as_str();

    let replaced = service
        .update_product(
            id,
            BaseProductDto {
                name: "Gadget".to_string(),
                description: String::new(),
                stock_available: 3,
                price: Decimal::new(2000, 2),
            },
        )
        .await
        .unwrap();
    assert_eq!(replaced.name, "Gadget");
    assert_eq!(replaced.created_at, created.created_at);
    assert_eq!(replaced.updated_by.as_deref(), Some("system"));

    let patched = service
        .patch_product(
            id,
            ProductPatchDto {
                price: Some(Decimal::new(1250, 2)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(patched.name, "Gadget");
    assert_eq!(patched.price, Decimal::new(1250, 2));

    assert!(service.delete_product(id).await.unwrap());
    assert!(matches!(
        service.get_product(id).await,
        Err(ProductError::NotFound(_))
    ));
}

// ============================================================================
// Stock Tests
// ============================================================================

#[tokio::test]
async fn test_insufficient_stock_leaves_row_unchanged() {
    let db = TestDatabase::new().await;
    let service = ProductService::new(PgProductRepository::new(db.connection()));
    let builder = TestDataBuilder::from_test_name("insufficient_stock");

    let created = service.create_product(input(&builder, 10)).await.unwrap();
    let id = created.product_id.as_str();

    assert!(service.decrement_stock(id, 5).await.unwrap());

    let err = service.decrement_stock(id, 999).await.unwrap_err();
    assert!(matches!(
        err,
        ProductError::InsufficientStock {
            available: 5,
            requested: 999
        }
    ));

    let product = service.get_product(id).await.unwrap();
    assert_eq!(product.stock_available, 5);
    assert!(product.updated_at.is_some());
}

#[tokio::test]
async fn test_concurrent_decrements_serialize_on_row() {
    let db = TestDatabase::new().await;
    let service = Arc::new(ProductService::new(PgProductRepository::new(
        db.connection(),
    )));
    let builder = TestDataBuilder::from_test_name("concurrent_decrements");

    let created = service.create_product(input(&builder, 20)).await.unwrap();
    let id = created.product_id.clone();

    // 25 decrements of 1 against 20 units: exactly 20 succeed
    let tasks = (0..25).map(|_| {
        let service = Arc::clone(&service);
        let id = id.clone();
        tokio::spawn(async move { service.decrement_stock(&id, 1).await })
    });
    let results = futures::future::join_all(tasks).await;

    let succeeded = results
        .into_iter()
        .filter(|r| matches!(r, Ok(Ok(true))))
        .count();
    assert_eq!(succeeded, 20);

    let product = service.get_product(&id).await.unwrap();
    assert_eq!(product.stock_available, 0);
}

#[tokio::test]
async fn test_concurrent_adds_and_decrements_balance() {
    let db = TestDatabase::new().await;
    let service = Arc::new(ProductService::new(PgProductRepository::new(
        db.connection(),
    )));
    let builder = TestDataBuilder::from_test_name("concurrent_mixed");

    let created = service
        .create_product(input(&builder, builder.stock() + 10))
        .await
        .unwrap();
    let id = created.product_id.clone();

    let tasks = (0..10).map(|i| {
        let service = Arc::clone(&service);
        let id = id.clone();
        tokio::spawn(async move {
            if i % 2 == 0 {
                service.add_to_stock(&id, 3).await
            } else {
                service.decrement_stock(&id, 2).await
            }
        })
    });
    for result in futures::future::join_all(tasks).await {
        assert!(result.unwrap().unwrap());
    }

    let product = service.get_product(&id).await.unwrap();
    assert_eq!(product.stock_available, builder.stock() + 10 + 5 * 3 - 5 * 2);
}
