use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

use crate::models::Product;

/// Sea-ORM Entity for the products table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub product_id: String,
    pub name: String,
    pub description: String,
    pub stock_available: i32,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub price: Decimal,
    pub created_at: DateTimeWithTimeZone,
    pub created_by: String,
    pub updated_at: Option<DateTimeWithTimeZone>,
    pub updated_by: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Product {
    fn from(model: Model) -> Self {
        Self {
            product_id: model.product_id,
            name: model.name,
            description: model.description,
            stock_available: model.stock_available,
            price: model.price,
            created_at: model.created_at.into(),
            created_by: model.created_by,
            updated_at: model.updated_at.map(Into::into),
            updated_by: model.updated_by,
        }
    }
}

impl From<Product> for ActiveModel {
    fn from(product: Product) -> Self {
        ActiveModel {
            product_id: Set(product.product_id),
            name: Set(product.name),
            description: Set(product.description),
            stock_available: Set(product.stock_available),
            price: Set(product.price),
            created_at: Set(product.created_at.into()),
            created_by: Set(product.created_by),
            updated_at: Set(product.updated_at.map(Into::into)),
            updated_by: Set(product.updated_by),
        }
    }
}

impl ActiveModel {
    /// Copy the mutable columns of `product` onto a row loaded from the store
    pub fn assign(&mut self, product: &Product) {
        self.name = Set(product.name.clone());
        self.description = Set(product.description.clone());
        self.stock_available = Set(product.stock_available);
        self.price = Set(product.price);
        self.updated_at = Set(product.updated_at.map(Into::into));
        self.updated_by = Set(product.updated_by.clone());
    }
}
