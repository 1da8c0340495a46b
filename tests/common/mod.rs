use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request},
    Router,
};
use backoffice_api::{
    app_router,
    config::AppConfig,
    db,
    entities::{brand, customer, product, sale},
    AppState,
};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, Set};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

/// Helper harness backed by a file-based SQLite database that lives in a
/// per-test temporary directory.
pub struct TestApp {
    router: Router,
    pub state: AppState,
    _tmp: TempDir,
}

impl TestApp {
    /// Construct a new test application with fresh database state.
    pub async fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir for test database");
        let db_path = tmp.path().join("backoffice_test.db");

        let mut cfg = AppConfig::new(
            format!("sqlite://{}?mode=rwc", db_path.display()),
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );
        cfg.auto_migrate = true;
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");

        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let state = AppState::new(Arc::new(pool), cfg);
        let router = app_router(state.clone());

        Self {
            router,
            state,
            _tmp: tmp,
        }
    }

    /// Send a JSON request against the router.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> axum::response::Response {
        let mut builder = Request::builder().method(method).uri(uri);

        let body = if let Some(json) = body {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).expect("failed to serialize json request body"))
        } else {
            Body::empty()
        };

        let request = builder.body(body).expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    #[allow(dead_code)]
    pub async fn seed_brand(&self, name: &str) -> brand::Model {
        brand::ActiveModel {
            brand_name: Set(name.to_string()),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&*self.state.db)
        .await
        .expect("seed brand for tests")
    }

    #[allow(dead_code)]
    pub async fn seed_customer(&self, name: &str) -> customer::Model {
        customer::ActiveModel {
            name: Set(name.to_string()),
            phone_no: Set(Some("0123456789".to_string())),
            address: Set(None),
            email: Set(Some(format!(
                "{}@example.com",
                name.to_lowercase().replace(' ', ".")
            ))),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&*self.state.db)
        .await
        .expect("seed customer for tests")
    }

    #[allow(dead_code)]
    pub async fn seed_product(&self, name: &str, brand_id: i32) -> product::Model {
        product::ActiveModel {
            product_name: Set(name.to_string()),
            model_no: Set(Some(format!("MDL-{}", name.len()))),
            serial_no: Set(None),
            brand_id: Set(brand_id),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&*self.state.db)
        .await
        .expect("seed product for tests")
    }

    /// Insert a sale header directly, bypassing the aggregate writer.
    #[allow(dead_code)]
    pub async fn seed_sale(
        &self,
        bill_no: &str,
        customer_id: i32,
        total_amount: Decimal,
    ) -> sale::Model {
        let now = Utc::now();
        sale::ActiveModel {
            bill_no: Set(bill_no.to_string()),
            sale_date: Set(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()),
            total_amount: Set(total_amount),
            customer_id: Set(customer_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&*self.state.db)
        .await
        .expect("seed sale for tests")
    }
}
