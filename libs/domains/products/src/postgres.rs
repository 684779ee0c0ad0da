use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    AccessMode, ActiveModelTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    IsolationLevel, PaginatorTrait, QueryOrder, QuerySelect, SqlErr, TransactionTrait,
};

use crate::{
    entity,
    error::{ProductError, ProductResult},
    models::{BaseProductDto, Product, ProductPatchDto, StockAdjustment, StockOutcome},
    repository::ProductRepository,
};

/// PostgreSQL-backed product repository.
///
/// Read-modify-write operations run in a transaction that locks the row with
/// `SELECT ... FOR UPDATE`, so concurrent stock changes serialize on the row.
#[derive(Clone)]
pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Run `mutate` against the locked row and persist the result
    async fn update_locked<F>(&self, id: &str, mutate: F) -> ProductResult<Option<Product>>
    where
        F: FnOnce(&mut Product) + Send,
    {
        let txn = self.db.begin().await?;

        let Some(model) = lock_row(&txn, id).await? else {
            txn.rollback().await?;
            return Ok(None);
        };

        let mut product: Product = model.clone().into();
        mutate(&mut product);

        let mut active: entity::ActiveModel = model.into();
        active.assign(&product);
        let updated = active.update(&txn).await?;
        txn.commit().await?;

        Ok(Some(updated.into()))
    }
}

async fn lock_row(txn: &DatabaseTransaction, id: &str) -> Result<Option<entity::Model>, DbErr> {
    entity::Entity::find_by_id(id.to_string())
        .lock_exclusive()
        .one(txn)
        .await
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn insert(&self, product: Product) -> ProductResult<Product> {
        let id = product.product_id.clone();
        let active: entity::ActiveModel = product.into();

        let model = active.insert(&self.db).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => ProductError::DuplicateId(id),
            _ => ProductError::from(e),
        })?;

        Ok(model.into())
    }

    async fn find_by_id(&self, id: &str) -> ProductResult<Option<Product>> {
        let model = entity::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await?;

        Ok(model.map(Into::into))
    }

    async fn list(&self, offset: u64, limit: u64) -> ProductResult<(Vec<Product>, u64)> {
        // Count and page share one snapshot
        let txn = self
            .db
            .begin_with_config(
                Some(IsolationLevel::RepeatableRead),
                Some(AccessMode::ReadOnly),
            )
            .await?;

        let total_count = entity::Entity::find().count(&txn).await?;

        // Past the last row; also keeps OFFSET within BIGINT range
        if offset >= total_count {
            txn.commit().await?;
            return Ok((Vec::new(), total_count));
        }

        let models = entity::Entity::find()
            .order_by_asc(entity::Column::CreatedAt)
            .order_by_asc(entity::Column::ProductId)
            .offset(offset)
            .limit(limit.min(total_count - offset))
            .all(&txn)
            .await?;
        txn.commit().await?;

        Ok((models.into_iter().map(Into::into).collect(), total_count))
    }

    async fn replace(
        &self,
        id: &str,
        input: BaseProductDto,
        now: DateTime<Utc>,
    ) -> ProductResult<Option<Product>> {
        self.update_locked(id, |product| product.apply_replace(input, now))
            .await
    }

    async fn patch(
        &self,
        id: &str,
        input: ProductPatchDto,
        now: DateTime<Utc>,
    ) -> ProductResult<Option<Product>> {
        self.update_locked(id, |product| product.apply_patch(input, now))
            .await
    }

    async fn delete(&self, id: &str) -> ProductResult<bool> {
        let result = entity::Entity::delete_by_id(id.to_string())
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    async fn adjust_stock(
        &self,
        id: &str,
        adjustment: StockAdjustment,
        now: DateTime<Utc>,
    ) -> ProductResult<StockOutcome> {
        let txn = self.db.begin().await?;

        let Some(model) = lock_row(&txn, id).await? else {
            txn.rollback().await?;
            return Ok(StockOutcome::NotFound);
        };

        let level = match adjustment.apply(model.stock_available) {
            Ok(level) => level,
            Err(outcome) => {
                txn.rollback().await?;
                return Ok(outcome);
            }
        };

        let mut product: Product = model.clone().into();
        product.stock_available = level;
        product.touch(now);

        let mut active: entity::ActiveModel = model.into();
        active.assign(&product);
        let updated = active.update(&txn).await?;
        txn.commit().await?;

        Ok(StockOutcome::Updated(updated.into()))
    }
}
