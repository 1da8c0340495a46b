use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Warranty card for a sold item. The card image itself lives in an
/// external object store; only its URL is persisted here.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "warranty_cards")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub warranty_id: i32,
    pub sale_item_id: i32,
    pub customer_id: i32,
    pub product_id: i32,
    pub warranty_start_date: NaiveDate,
    pub warranty_end_date: NaiveDate,
    pub warranty_card_no: String,
    pub warranty_card_image: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::sale_item::Entity",
        from = "Column::SaleItemId",
        to = "super::sale_item::Column::SaleItemId"
    )]
    SaleItem,
    #[sea_orm(
        belongs_to = "super::customer::Entity",
        from = "Column::CustomerId",
        to = "super::customer::Column::CustomerId"
    )]
    Customer,
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::ProductId"
    )]
    Product,
}

impl Related<super::sale_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SaleItem.def()
    }
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
