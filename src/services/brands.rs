use crate::{
    db::DbPool,
    entities::brand::{self, ActiveModel as BrandActiveModel, Entity as BrandEntity},
    errors::ServiceError,
};
use chrono::Utc;
use sea_orm::error::SqlErr;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateBrandRequest {
    pub brand_name: String,
}

#[derive(Clone)]
pub struct BrandService {
    db_pool: Arc<DbPool>,
}

impl BrandService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    #[instrument(skip(self, request), fields(brand_name = %request.brand_name))]
    pub async fn create_brand(
        &self,
        request: CreateBrandRequest,
    ) -> Result<brand::Model, ServiceError> {
        if request.brand_name.trim().is_empty() {
            return Err(ServiceError::ValidationError(
                "brand_name is required".to_string(),
            ));
        }

        let model = BrandActiveModel {
            brand_name: Set(request.brand_name.trim().to_string()),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let brand = model.insert(&*self.db_pool).await.map_err(|e| {
            match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    ServiceError::Conflict("Brand name already exists".to_string())
                }
                _ => ServiceError::DatabaseError(e),
            }
        })?;

        info!(brand_id = brand.brand_id, "Brand created");
        Ok(brand)
    }

    /// All brands, newest first.
    #[instrument(skip(self))]
    pub async fn list_brands(&self) -> Result<Vec<brand::Model>, ServiceError> {
        BrandEntity::find()
            .order_by_desc(brand::Column::CreatedAt)
            .all(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)
    }
}
