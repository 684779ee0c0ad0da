use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Products::ProductId)
                            .string_len(6)
                            .not_null()
                            .primary_key(),
                    )
                    .col(string_len(Products::Name, 100))
                    .col(string_len(Products::Description, 500).default(""))
                    .col(integer(Products::StockAvailable).default(0))
                    .col(decimal_len(Products::Price, 18, 2))
                    .col(
                        timestamp_with_time_zone(Products::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(string(Products::CreatedBy).default("system"))
                    .col(timestamp_with_time_zone_null(Products::UpdatedAt))
                    .col(string_null(Products::UpdatedBy))
                    .to_owned(),
            )
            .await?;

        // Row-level guards for the stock and price invariants
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                ALTER TABLE products
                    ADD CONSTRAINT chk_products_stock_non_negative CHECK (stock_available >= 0),
                    ADD CONSTRAINT chk_products_price_positive CHECK (price > 0)
                "#,
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_products_created_at")
                    .table(Products::Table)
                    .col(Products::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Products::Table).if_exists().to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Products {
    Table,
    ProductId,
    Name,
    Description,
    StockAvailable,
    Price,
    CreatedAt,
    CreatedBy,
    UpdatedAt,
    UpdatedBy,
}
