use crate::{
    db::DbPool,
    entities::brand::{self, Entity as BrandEntity},
    entities::product::{self, ActiveModel as ProductActiveModel, Entity as ProductEntity},
    errors::ServiceError,
};
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};

/// Clients identify the brand by name; the surrogate key stays internal.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateProductRequest {
    pub product_name: String,
    pub model_no: Option<String>,
    pub serial_no: Option<String>,
    pub brand_name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProductResponse {
    pub product_id: i32,
    pub product_name: String,
    pub model_no: Option<String>,
    pub serial_no: Option<String>,
    pub brand_id: i32,
    pub brand_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct ProductService {
    db_pool: Arc<DbPool>,
}

impl ProductService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    #[instrument(skip(self, request), fields(product_name = %request.product_name, brand_name = %request.brand_name))]
    pub async fn create_product(
        &self,
        request: CreateProductRequest,
    ) -> Result<ProductResponse, ServiceError> {
        if request.product_name.trim().is_empty() || request.brand_name.trim().is_empty() {
            return Err(ServiceError::ValidationError(
                "product_name and brand_name are required".to_string(),
            ));
        }

        let db = &*self.db_pool;

        let brand = BrandEntity::find()
            .filter(brand::Column::BrandName.eq(request.brand_name.trim()))
            .one(db)
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| ServiceError::ValidationError("Invalid brand selected".to_string()))?;

        let model = ProductActiveModel {
            product_name: Set(request.product_name),
            model_no: Set(request.model_no),
            serial_no: Set(request.serial_no),
            brand_id: Set(brand.brand_id),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let created = model
            .insert(db)
            .await
            .map_err(ServiceError::DatabaseError)?;

        info!(product_id = created.product_id, "Product created");

        Ok(to_response(created, Some(brand.brand_name)))
    }

    /// All products with their brand name resolved, newest first.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<ProductResponse>, ServiceError> {
        let rows = ProductEntity::find()
            .find_also_related(BrandEntity)
            .order_by_desc(product::Column::CreatedAt)
            .all(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)?;

        Ok(rows
            .into_iter()
            .map(|(p, b)| to_response(p, b.map(|b| b.brand_name)))
            .collect())
    }
}

fn to_response(p: product::Model, brand_name: Option<String>) -> ProductResponse {
    ProductResponse {
        product_id: p.product_id,
        product_name: p.product_name,
        model_no: p.model_no,
        serial_no: p.serial_no,
        brand_id: p.brand_id,
        brand_name,
        created_at: p.created_at,
    }
}
