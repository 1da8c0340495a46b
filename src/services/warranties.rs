use crate::{
    db::DbPool,
    entities::warranty_card::{self, ActiveModel as WarrantyActiveModel, Entity as WarrantyEntity},
    errors::ServiceError,
};
use chrono::{NaiveDate, Utc};
use sea_orm::error::SqlErr;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};

/// The card image is uploaded to external storage beforehand; only the
/// resulting URL is accepted here.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateWarrantyCardRequest {
    pub sale_item_id: i32,
    pub customer_id: i32,
    pub product_id: i32,
    pub warranty_start_date: NaiveDate,
    pub warranty_end_date: NaiveDate,
    pub warranty_card_no: String,
    pub warranty_card_image: String,
}

#[derive(Clone)]
pub struct WarrantyService {
    db_pool: Arc<DbPool>,
}

impl WarrantyService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    #[instrument(skip(self, request), fields(warranty_card_no = %request.warranty_card_no))]
    pub async fn create_warranty_card(
        &self,
        request: CreateWarrantyCardRequest,
    ) -> Result<warranty_card::Model, ServiceError> {
        if request.warranty_card_image.trim().is_empty() {
            return Err(ServiceError::ValidationError(
                "Warranty image is required".to_string(),
            ));
        }
        if request.warranty_card_no.trim().is_empty() {
            return Err(ServiceError::ValidationError(
                "warranty_card_no is required".to_string(),
            ));
        }
        if request.warranty_end_date < request.warranty_start_date {
            return Err(ServiceError::ValidationError(
                "warranty_end_date cannot precede warranty_start_date".to_string(),
            ));
        }

        let model = WarrantyActiveModel {
            sale_item_id: Set(request.sale_item_id),
            customer_id: Set(request.customer_id),
            product_id: Set(request.product_id),
            warranty_start_date: Set(request.warranty_start_date),
            warranty_end_date: Set(request.warranty_end_date),
            warranty_card_no: Set(request.warranty_card_no),
            warranty_card_image: Set(request.warranty_card_image),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let card = model.insert(&*self.db_pool).await.map_err(|e| {
            match e.sql_err() {
                Some(SqlErr::ForeignKeyConstraintViolation(_)) => ServiceError::InvalidReference(
                    "Invalid sale item, customer, or product ID".to_string(),
                ),
                _ => ServiceError::DatabaseError(e),
            }
        })?;

        info!(warranty_id = card.warranty_id, "Warranty card created");
        Ok(card)
    }

    /// All warranty cards, newest first.
    #[instrument(skip(self))]
    pub async fn list_warranty_cards(&self) -> Result<Vec<warranty_card::Model>, ServiceError> {
        WarrantyEntity::find()
            .order_by_desc(warranty_card::Column::CreatedAt)
            .all(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)
    }
}
