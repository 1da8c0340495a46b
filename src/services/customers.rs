use crate::{
    db::DbPool,
    entities::customer::{self, ActiveModel as CustomerActiveModel, Entity as CustomerEntity},
    errors::ServiceError,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateCustomerRequest {
    pub name: String,
    pub phone_no: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
}

#[derive(Clone)]
pub struct CustomerService {
    db_pool: Arc<DbPool>,
}

impl CustomerService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_customer(
        &self,
        request: CreateCustomerRequest,
    ) -> Result<customer::Model, ServiceError> {
        if request.name.trim().is_empty() {
            return Err(ServiceError::ValidationError(
                "Name is required".to_string(),
            ));
        }

        let model = CustomerActiveModel {
            name: Set(request.name),
            phone_no: Set(request.phone_no),
            address: Set(request.address),
            email: Set(request.email),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let customer = model
            .insert(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)?;

        info!(customer_id = customer.customer_id, "Customer created");
        Ok(customer)
    }

    #[instrument(skip(self))]
    pub async fn list_customers(&self) -> Result<Vec<customer::Model>, ServiceError> {
        CustomerEntity::find()
            .order_by_desc(customer::Column::CreatedAt)
            .all(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)
    }
}
