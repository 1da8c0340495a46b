use crate::{
    db::DbPool,
    entities::user::{self, ActiveModel as UserActiveModel, Entity as UserEntity, UserRole},
    errors::ServiceError,
};
use chrono::{DateTime, Utc};
use sea_orm::error::SqlErr;
use sea_orm::{ActiveModelTrait, EntityTrait, IntoActiveModel, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{info, instrument};

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password_hash: String,
    pub full_name: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

/// Fields absent from the payload keep their stored value.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub password_hash: Option<String>,
    pub full_name: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

/// User as returned to clients. The password hash never leaves the service.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub user_id: i32,
    pub username: String,
    pub full_name: Option<String>,
    pub role: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<user::Model> for UserResponse {
    fn from(m: user::Model) -> Self {
        Self {
            user_id: m.user_id,
            username: m.username,
            full_name: m.full_name,
            role: m.role,
            is_active: m.is_active,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

fn parse_role(role: &str) -> Result<UserRole, ServiceError> {
    UserRole::from_str(role).map_err(|_| {
        ServiceError::ValidationError(format!("Invalid role '{}'. Must be admin or sales", role))
    })
}

#[derive(Clone)]
pub struct UserService {
    db_pool: Arc<DbPool>,
}

impl UserService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn create_user(
        &self,
        request: CreateUserRequest,
    ) -> Result<UserResponse, ServiceError> {
        if request.username.trim().is_empty() {
            return Err(ServiceError::ValidationError(
                "username is required".to_string(),
            ));
        }
        if request.password_hash.trim().is_empty() {
            return Err(ServiceError::ValidationError(
                "password_hash is required".to_string(),
            ));
        }

        let role = match request.role.as_deref() {
            Some(r) => parse_role(r)?,
            None => UserRole::Sales,
        };

        let model = UserActiveModel {
            username: Set(request.username),
            password_hash: Set(request.password_hash),
            full_name: Set(request.full_name),
            role: Set(role.to_string()),
            is_active: Set(request.is_active.unwrap_or(true)),
            created_at: Set(Utc::now()),
            updated_at: Set(None),
            ..Default::default()
        };

        let created = model.insert(&*self.db_pool).await.map_err(|e| {
            match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    ServiceError::Conflict("Username already exists".to_string())
                }
                _ => ServiceError::DatabaseError(e),
            }
        })?;

        info!(user_id = created.user_id, "User created");
        Ok(created.into())
    }

    #[instrument(skip(self))]
    pub async fn list_users(&self) -> Result<Vec<UserResponse>, ServiceError> {
        let users = UserEntity::find()
            .order_by_asc(user::Column::UserId)
            .all(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)?;

        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, user_id: i32) -> Result<UserResponse, ServiceError> {
        let user = UserEntity::find_by_id(user_id)
            .one(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| ServiceError::NotFound("User not found".to_string()))?;

        Ok(user.into())
    }

    #[instrument(skip(self, request))]
    pub async fn update_user(
        &self,
        user_id: i32,
        request: UpdateUserRequest,
    ) -> Result<UserResponse, ServiceError> {
        let db = &*self.db_pool;

        let existing = UserEntity::find_by_id(user_id)
            .one(db)
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| ServiceError::NotFound("User not found".to_string()))?;

        let mut active = existing.into_active_model();

        if let Some(username) = request.username {
            active.username = Set(username);
        }
        if let Some(password_hash) = request.password_hash {
            active.password_hash = Set(password_hash);
        }
        if let Some(full_name) = request.full_name {
            active.full_name = Set(Some(full_name));
        }
        if let Some(role) = request.role {
            active.role = Set(parse_role(&role)?.to_string());
        }
        if let Some(is_active) = request.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(Some(Utc::now()));

        let updated = active.update(db).await.map_err(|e| {
            match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    ServiceError::Conflict("Username already exists".to_string())
                }
                _ => ServiceError::DatabaseError(e),
            }
        })?;

        info!(user_id, "User updated");
        Ok(updated.into())
    }

    #[instrument(skip(self))]
    pub async fn delete_user(&self, user_id: i32) -> Result<(), ServiceError> {
        let result = UserEntity::delete_by_id(user_id)
            .exec(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)?;

        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound("User not found".to_string()));
        }

        info!(user_id, "User deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parsing_accepts_known_roles() {
        assert_eq!(parse_role("admin").unwrap(), UserRole::Admin);
        assert_eq!(parse_role("sales").unwrap(), UserRole::Sales);
    }

    #[test]
    fn role_parsing_rejects_unknown_roles() {
        let err = parse_role("superuser").unwrap_err();
        assert!(err.to_string().contains("Invalid role"));
    }
}
