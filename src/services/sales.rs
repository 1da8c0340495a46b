use crate::{
    db::DbPool,
    entities::customer::Entity as CustomerEntity,
    entities::product::Entity as ProductEntity,
    entities::sale::{self, ActiveModel as SaleActiveModel, Entity as SaleEntity},
    entities::sale_item::{self, ActiveModel as SaleItemActiveModel, Entity as SaleItemEntity},
    errors::ServiceError,
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, info, instrument};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleItemInput {
    pub product_id: i32,
    pub quantity: i32,
    pub unit_price: Decimal,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateSaleRequest {
    pub bill_no: String,
    pub sale_date: NaiveDate,
    pub total_amount: Decimal,
    pub customer_id: i32,
    pub items: Vec<SaleItemInput>,
}

impl CreateSaleRequest {
    /// Field checks mirror the HTTP contract: a rejected request names the
    /// first offending field, item problems name the item index.
    fn validate(&self) -> Result<(), ServiceError> {
        if self.bill_no.trim().is_empty() || self.items.is_empty() {
            return Err(ServiceError::ValidationError(
                "All fields are required including items.".to_string(),
            ));
        }
        if self.total_amount <= Decimal::ZERO {
            return Err(ServiceError::ValidationError(
                "Total amount must be greater than 0.".to_string(),
            ));
        }
        for (i, item) in self.items.iter().enumerate() {
            if item.quantity <= 0 {
                return Err(ServiceError::ValidationError(format!(
                    "Invalid quantity at item index {}. Quantity must be greater than 0.",
                    i
                )));
            }
            if item.unit_price < Decimal::ZERO {
                return Err(ServiceError::ValidationError(format!(
                    "Invalid unit price at item index {}. Unit price cannot be negative.",
                    i
                )));
            }
        }
        Ok(())
    }
}

/// Line item as returned to clients, with the product name resolved.
#[derive(Debug, Serialize, Deserialize)]
pub struct SaleItemDetail {
    pub sale_item_id: i32,
    pub product_id: i32,
    pub product_name: Option<String>,
    pub quantity: i32,
    pub unit_price: Decimal,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SaleResponse {
    pub sale_id: i32,
    pub bill_no: String,
    pub sale_date: NaiveDate,
    pub total_amount: Decimal,
    pub customer_id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub items: Vec<SaleItemDetail>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SaleListResponse {
    pub count: usize,
    pub sales: Vec<SaleResponse>,
}

/// Service owning the sale aggregate: the header row and its line items
/// are written in one transaction and always read back together.
#[derive(Clone)]
pub struct SaleService {
    db_pool: Arc<DbPool>,
}

impl SaleService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Creates a sale header together with its line items atomically.
    ///
    /// Either the header and every item are persisted, or nothing is. The
    /// returned aggregate is re-read from the store so generated ids and
    /// resolved product names reflect what was committed.
    #[instrument(skip(self, request), fields(bill_no = %request.bill_no, customer_id = request.customer_id))]
    pub async fn create_sale(&self, request: CreateSaleRequest) -> Result<SaleResponse, ServiceError> {
        request.validate()?;

        let db = &*self.db_pool;
        let now = Utc::now();

        let txn = db.begin().await.map_err(|e| {
            error!(error = %e, "Failed to start transaction for sale creation");
            ServiceError::DatabaseError(e)
        })?;

        let header = SaleActiveModel {
            bill_no: Set(request.bill_no.clone()),
            sale_date: Set(request.sale_date),
            total_amount: Set(request.total_amount),
            customer_id: Set(request.customer_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let saved = header
            .insert(&txn)
            .await
            .map_err(ServiceError::from_sale_write_err)?;

        let item_models: Vec<SaleItemActiveModel> = request
            .items
            .iter()
            .map(|item| SaleItemActiveModel {
                sale_id: Set(saved.sale_id),
                product_id: Set(item.product_id),
                quantity: Set(item.quantity),
                unit_price: Set(item.unit_price),
                created_at: Set(now),
                ..Default::default()
            })
            .collect();

        SaleItemEntity::insert_many(item_models)
            .exec(&txn)
            .await
            .map_err(ServiceError::from_sale_write_err)?;

        txn.commit().await.map_err(|e| {
            error!(error = %e, "Failed to commit sale creation transaction");
            ServiceError::DatabaseError(e)
        })?;

        info!(sale_id = saved.sale_id, "Sale created");

        self.get_sale(saved.sale_id).await
    }

    /// Fetches a single sale with its items, ordered by the generated
    /// item id ascending.
    #[instrument(skip(self))]
    pub async fn get_sale(&self, sale_id: i32) -> Result<SaleResponse, ServiceError> {
        let db = &*self.db_pool;

        let found = SaleEntity::find_by_id(sale_id)
            .find_also_related(CustomerEntity)
            .one(db)
            .await
            .map_err(ServiceError::DatabaseError)?;

        let (sale, customer) = found.ok_or_else(|| {
            ServiceError::NotFound("Sale not found".to_string())
        })?;

        let items = SaleItemEntity::find()
            .filter(sale_item::Column::SaleId.eq(sale_id))
            .find_also_related(ProductEntity)
            .order_by_asc(sale_item::Column::SaleItemId)
            .all(db)
            .await
            .map_err(ServiceError::DatabaseError)?;

        Ok(to_response(
            sale,
            customer.map(|c| c.name),
            items.into_iter().map(to_item_detail).collect(),
        ))
    }

    /// Lists every sale newest first, each with its nested items.
    #[instrument(skip(self))]
    pub async fn list_sales(&self) -> Result<SaleListResponse, ServiceError> {
        let db = &*self.db_pool;

        let sales = SaleEntity::find()
            .find_also_related(CustomerEntity)
            .order_by_desc(sale::Column::CreatedAt)
            .order_by_desc(sale::Column::SaleId)
            .all(db)
            .await
            .map_err(ServiceError::DatabaseError)?;

        let sale_ids: Vec<i32> = sales.iter().map(|(s, _)| s.sale_id).collect();

        let mut items_by_sale: HashMap<i32, Vec<SaleItemDetail>> = HashMap::new();
        if !sale_ids.is_empty() {
            let items = SaleItemEntity::find()
                .filter(sale_item::Column::SaleId.is_in(sale_ids))
                .find_also_related(ProductEntity)
                .order_by_asc(sale_item::Column::SaleItemId)
                .all(db)
                .await
                .map_err(ServiceError::DatabaseError)?;

            for pair in items {
                let sale_id = pair.0.sale_id;
                items_by_sale
                    .entry(sale_id)
                    .or_default()
                    .push(to_item_detail(pair));
            }
        }

        let sales: Vec<SaleResponse> = sales
            .into_iter()
            .map(|(sale, customer)| {
                let items = items_by_sale.remove(&sale.sale_id).unwrap_or_default();
                to_response(sale, customer.map(|c| c.name), items)
            })
            .collect();

        Ok(SaleListResponse {
            count: sales.len(),
            sales,
        })
    }
}

fn to_item_detail(
    (item, product): (sale_item::Model, Option<crate::entities::product::Model>),
) -> SaleItemDetail {
    SaleItemDetail {
        sale_item_id: item.sale_item_id,
        product_id: item.product_id,
        product_name: product.map(|p| p.product_name),
        quantity: item.quantity,
        unit_price: item.unit_price,
    }
}

fn to_response(
    sale: sale::Model,
    customer_name: Option<String>,
    items: Vec<SaleItemDetail>,
) -> SaleResponse {
    SaleResponse {
        sale_id: sale.sale_id,
        bill_no: sale.bill_no,
        sale_date: sale.sale_date,
        total_amount: sale.total_amount,
        customer_id: sale.customer_id,
        customer_name,
        created_at: sale.created_at,
        items,
    }
}
