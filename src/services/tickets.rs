use crate::{
    db::DbPool,
    entities::customer::{self, Entity as CustomerEntity},
    entities::product::{self, Entity as ProductEntity},
    entities::sale::{self, Entity as SaleEntity},
    entities::support_ticket::{
        self, ActiveModel as TicketActiveModel, Entity as TicketEntity, TicketPriority,
        TicketStatus,
    },
    errors::ServiceError,
};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{info, instrument};

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateTicketRequest {
    pub customer_id: Option<i32>,
    pub product_id: Option<i32>,
    pub sale_id: Option<i32>,
    pub assigned_to: Option<i32>,
    pub issue_title: String,
    pub issue_description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub response_text: Option<String>,
}

/// Fields absent from the payload keep their stored value.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateTicketRequest {
    pub customer_id: Option<i32>,
    pub product_id: Option<i32>,
    pub sale_id: Option<i32>,
    pub assigned_to: Option<i32>,
    pub issue_title: Option<String>,
    pub issue_description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub response_text: Option<String>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub resolved_by: Option<i32>,
}

/// Ticket joined with the names a support agent needs at a glance.
#[derive(Debug, Serialize, Deserialize)]
pub struct TicketResponse {
    #[serde(flatten)]
    pub ticket: support_ticket::Model,
    pub customer_name: Option<String>,
    pub product_name: Option<String>,
    pub bill_no: Option<String>,
}

fn parse_status(status: &str) -> Result<TicketStatus, ServiceError> {
    TicketStatus::from_str(status).map_err(|_| {
        ServiceError::ValidationError(format!(
            "Invalid status '{}'. Must be one of open, in_progress, resolved, closed",
            status
        ))
    })
}

fn parse_priority(priority: &str) -> Result<TicketPriority, ServiceError> {
    TicketPriority::from_str(priority).map_err(|_| {
        ServiceError::ValidationError(format!(
            "Invalid priority '{}'. Must be one of low, medium, high, urgent",
            priority
        ))
    })
}

/// Ticket numbers are server-generated and derived from the wall clock.
fn generate_ticket_no(now: DateTime<Utc>) -> String {
    format!("TCK-{}", now.timestamp_millis())
}

#[derive(Clone)]
pub struct TicketService {
    db_pool: Arc<DbPool>,
}

impl TicketService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    #[instrument(skip(self, request), fields(issue_title = %request.issue_title))]
    pub async fn create_ticket(
        &self,
        request: CreateTicketRequest,
    ) -> Result<support_ticket::Model, ServiceError> {
        if request.issue_title.trim().is_empty() {
            return Err(ServiceError::ValidationError(
                "issue_title is required".to_string(),
            ));
        }

        let status = match request.status.as_deref() {
            Some(s) => parse_status(s)?,
            None => TicketStatus::Open,
        };
        let priority = match request.priority.as_deref() {
            Some(p) => parse_priority(p)?,
            None => TicketPriority::Medium,
        };

        let now = Utc::now();
        let model = TicketActiveModel {
            ticket_no: Set(generate_ticket_no(now)),
            customer_id: Set(request.customer_id),
            product_id: Set(request.product_id),
            sale_id: Set(request.sale_id),
            assigned_to: Set(request.assigned_to),
            issue_title: Set(request.issue_title),
            issue_description: Set(request.issue_description),
            status: Set(status.to_string()),
            priority: Set(priority.to_string()),
            response_text: Set(request.response_text),
            resolved_at: Set(None),
            resolved_by: Set(None),
            created_at: Set(now),
            updated_at: Set(None),
            ..Default::default()
        };

        let ticket = model
            .insert(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)?;

        info!(ticket_id = ticket.ticket_id, ticket_no = %ticket.ticket_no, "Ticket created");
        Ok(ticket)
    }

    /// All tickets newest first, each joined with its customer name,
    /// product name, and sale bill number where those references are set.
    #[instrument(skip(self))]
    pub async fn list_tickets(&self) -> Result<Vec<TicketResponse>, ServiceError> {
        let db = &*self.db_pool;

        let tickets = TicketEntity::find()
            .order_by_desc(support_ticket::Column::CreatedAt)
            .order_by_desc(support_ticket::Column::TicketId)
            .all(db)
            .await
            .map_err(ServiceError::DatabaseError)?;

        let customer_ids: Vec<i32> = tickets.iter().filter_map(|t| t.customer_id).collect();
        let product_ids: Vec<i32> = tickets.iter().filter_map(|t| t.product_id).collect();
        let sale_ids: Vec<i32> = tickets.iter().filter_map(|t| t.sale_id).collect();

        let customer_names: HashMap<i32, String> = if customer_ids.is_empty() {
            HashMap::new()
        } else {
            CustomerEntity::find()
                .filter(customer::Column::CustomerId.is_in(customer_ids))
                .all(db)
                .await
                .map_err(ServiceError::DatabaseError)?
                .into_iter()
                .map(|c| (c.customer_id, c.name))
                .collect()
        };

        let product_names: HashMap<i32, String> = if product_ids.is_empty() {
            HashMap::new()
        } else {
            ProductEntity::find()
                .filter(product::Column::ProductId.is_in(product_ids))
                .all(db)
                .await
                .map_err(ServiceError::DatabaseError)?
                .into_iter()
                .map(|p| (p.product_id, p.product_name))
                .collect()
        };

        let bill_nos: HashMap<i32, String> = if sale_ids.is_empty() {
            HashMap::new()
        } else {
            SaleEntity::find()
                .filter(sale::Column::SaleId.is_in(sale_ids))
                .all(db)
                .await
                .map_err(ServiceError::DatabaseError)?
                .into_iter()
                .map(|s| (s.sale_id, s.bill_no))
                .collect()
        };

        Ok(tickets
            .into_iter()
            .map(|ticket| {
                let customer_name = ticket
                    .customer_id
                    .and_then(|id| customer_names.get(&id).cloned());
                let product_name = ticket
                    .product_id
                    .and_then(|id| product_names.get(&id).cloned());
                let bill_no = ticket.sale_id.and_then(|id| bill_nos.get(&id).cloned());
                TicketResponse {
                    ticket,
                    customer_name,
                    product_name,
                    bill_no,
                }
            })
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn get_ticket(&self, ticket_id: i32) -> Result<support_ticket::Model, ServiceError> {
        TicketEntity::find_by_id(ticket_id)
            .one(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| ServiceError::NotFound("Ticket not found".to_string()))
    }

    #[instrument(skip(self, request))]
    pub async fn update_ticket(
        &self,
        ticket_id: i32,
        request: UpdateTicketRequest,
    ) -> Result<support_ticket::Model, ServiceError> {
        let db = &*self.db_pool;

        let existing = TicketEntity::find_by_id(ticket_id)
            .one(db)
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| ServiceError::NotFound("Ticket not found".to_string()))?;

        let mut active = existing.into_active_model();

        if let Some(customer_id) = request.customer_id {
            active.customer_id = Set(Some(customer_id));
        }
        if let Some(product_id) = request.product_id {
            active.product_id = Set(Some(product_id));
        }
        if let Some(sale_id) = request.sale_id {
            active.sale_id = Set(Some(sale_id));
        }
        if let Some(assigned_to) = request.assigned_to {
            active.assigned_to = Set(Some(assigned_to));
        }
        if let Some(issue_title) = request.issue_title {
            active.issue_title = Set(issue_title);
        }
        if let Some(issue_description) = request.issue_description {
            active.issue_description = Set(Some(issue_description));
        }
        if let Some(status) = request.status {
            active.status = Set(parse_status(&status)?.to_string());
        }
        if let Some(priority) = request.priority {
            active.priority = Set(parse_priority(&priority)?.to_string());
        }
        if let Some(response_text) = request.response_text {
            active.response_text = Set(Some(response_text));
        }
        if let Some(resolved_at) = request.resolved_at {
            active.resolved_at = Set(Some(resolved_at));
        }
        if let Some(resolved_by) = request.resolved_by {
            active.resolved_by = Set(Some(resolved_by));
        }
        active.updated_at = Set(Some(Utc::now()));

        let updated = active
            .update(db)
            .await
            .map_err(ServiceError::DatabaseError)?;

        info!(ticket_id, "Ticket updated");
        Ok(updated)
    }

    /// Deletes the ticket and returns the removed row.
    #[instrument(skip(self))]
    pub async fn delete_ticket(
        &self,
        ticket_id: i32,
    ) -> Result<support_ticket::Model, ServiceError> {
        let db = &*self.db_pool;

        let existing = TicketEntity::find_by_id(ticket_id)
            .one(db)
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| ServiceError::NotFound("Ticket not found".to_string()))?;

        TicketEntity::delete_by_id(ticket_id)
            .exec(db)
            .await
            .map_err(ServiceError::DatabaseError)?;

        info!(ticket_id, "Ticket deleted");
        Ok(existing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticket_no_uses_epoch_millis() {
        let now = Utc::now();
        let ticket_no = generate_ticket_no(now);
        assert_eq!(ticket_no, format!("TCK-{}", now.timestamp_millis()));
        assert!(ticket_no.starts_with("TCK-"));
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(parse_status("reopened").is_err());
        assert!(parse_status("in_progress").is_ok());
    }

    #[test]
    fn unknown_priority_is_rejected() {
        assert!(parse_priority("critical").is_err());
        assert!(parse_priority("urgent").is_ok());
    }
}
