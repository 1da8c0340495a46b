mod common;

use axum::{
    body,
    http::{Method, StatusCode},
};
use backoffice_api::entities::{
    sale::{self, Entity as SaleEntity},
    sale_item::{Column as SaleItemColumn, Entity as SaleItemEntity},
};
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use serde_json::{json, Value};
use std::str::FromStr;

use common::TestApp;

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read response body");
    serde_json::from_slice(&bytes).expect("parse response body")
}

fn as_decimal(value: &Value) -> Decimal {
    match value {
        Value::String(s) => Decimal::from_str(s).expect("parse decimal string"),
        Value::Number(n) => Decimal::from_str(&n.to_string()).expect("parse decimal number"),
        other => panic!("expected decimal-ish json value, got {other:?}"),
    }
}

#[tokio::test]
async fn create_sale_persists_header_and_items_atomically() {
    let app = TestApp::new().await;

    let brand = app.seed_brand("Acme").await;
    let customer = app.seed_customer("Jordan Reyes").await;
    let tv = app.seed_product("Smart TV", brand.brand_id).await;
    let remote = app.seed_product("Remote Control", brand.brand_id).await;

    let payload = json!({
        "bill_no": "BILL-1001",
        "sale_date": "2024-06-01",
        "total_amount": "1250.00",
        "customer_id": customer.customer_id,
        "items": [
            { "product_id": tv.product_id, "quantity": 1, "unit_price": "1200.00" },
            { "product_id": remote.product_id, "quantity": 2, "unit_price": "25.00" }
        ]
    });

    let response = app.request(Method::POST, "/sales/add", Some(payload)).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let data = read_json(response).await;
    assert_eq!(data["message"], "Sale created successfully");

    let sale = &data["sale"];
    assert_eq!(sale["bill_no"], "BILL-1001");
    assert_eq!(sale["customer_id"], customer.customer_id);
    assert_eq!(sale["customer_name"], "Jordan Reyes");
    assert_eq!(as_decimal(&sale["total_amount"]), Decimal::new(125_000, 2));

    let items = sale["items"].as_array().expect("items array");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["product_name"], "Smart TV");
    assert_eq!(items[1]["product_name"], "Remote Control");

    // Items come back ordered by their generated id ascending.
    let first_id = items[0]["sale_item_id"].as_i64().unwrap();
    let second_id = items[1]["sale_item_id"].as_i64().unwrap();
    assert!(first_id < second_id);

    let saved = SaleEntity::find()
        .filter(sale::Column::BillNo.eq("BILL-1001"))
        .one(&*app.state.db)
        .await
        .expect("query sale")
        .expect("sale should exist");
    assert_eq!(saved.total_amount, Decimal::from_str("1250.00").unwrap());

    let rows = SaleItemEntity::find()
        .filter(SaleItemColumn::SaleId.eq(saved.sale_id))
        .all(&*app.state.db)
        .await
        .expect("query sale items");
    assert_eq!(rows.len(), 2);
}

#[tokio::test]
async fn duplicate_bill_no_is_rejected_with_conflict() {
    let app = TestApp::new().await;

    let brand = app.seed_brand("Acme").await;
    let customer = app.seed_customer("Sam Ortiz").await;
    let product = app.seed_product("Blender", brand.brand_id).await;

    let payload = json!({
        "bill_no": "INV-001",
        "sale_date": "2025-01-01",
        "total_amount": 150,
        "customer_id": customer.customer_id,
        "items": [
            { "product_id": product.product_id, "quantity": 3, "unit_price": 50 }
        ]
    });

    let first = app
        .request(Method::POST, "/sales/add", Some(payload.clone()))
        .await;
    assert_eq!(first.status(), StatusCode::CREATED);
    let created = read_json(first).await;
    let items = created["sale"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["quantity"], 3);
    assert_eq!(as_decimal(&items[0]["unit_price"]), Decimal::from(50));

    let second = app.request(Method::POST, "/sales/add", Some(payload)).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);

    let data = read_json(second).await;
    assert_eq!(data["error"], "Bill number already exists");

    // The failed attempt must not have added any rows.
    let sale_count = SaleEntity::find()
        .count(&*app.state.db)
        .await
        .expect("count sales");
    assert_eq!(sale_count, 1);
    let item_count = SaleItemEntity::find()
        .count(&*app.state.db)
        .await
        .expect("count items");
    assert_eq!(item_count, 1);
}

#[tokio::test]
async fn invalid_quantity_names_the_offending_item() {
    let app = TestApp::new().await;

    let brand = app.seed_brand("Acme").await;
    let customer = app.seed_customer("Lee Chen").await;
    let product = app.seed_product("Toaster", brand.brand_id).await;

    let payload = json!({
        "bill_no": "BILL-3001",
        "sale_date": "2024-06-03",
        "total_amount": "60.00",
        "customer_id": customer.customer_id,
        "items": [
            { "product_id": product.product_id, "quantity": 1, "unit_price": "30.00" },
            { "product_id": product.product_id, "quantity": 0, "unit_price": "30.00" }
        ]
    });

    let response = app.request(Method::POST, "/sales/add", Some(payload)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let data = read_json(response).await;
    assert_eq!(
        data["error"],
        "Invalid quantity at item index 1. Quantity must be greater than 0."
    );

    let sale_count = SaleEntity::find()
        .count(&*app.state.db)
        .await
        .expect("count sales");
    assert_eq!(sale_count, 0);
}

#[tokio::test]
async fn negative_unit_price_is_rejected() {
    let app = TestApp::new().await;

    let brand = app.seed_brand("Acme").await;
    let customer = app.seed_customer("Ana Silva").await;
    let product = app.seed_product("Kettle", brand.brand_id).await;

    let payload = json!({
        "bill_no": "BILL-3002",
        "sale_date": "2024-06-03",
        "total_amount": "10.00",
        "customer_id": customer.customer_id,
        "items": [
            { "product_id": product.product_id, "quantity": 1, "unit_price": "-1.00" }
        ]
    });

    let response = app.request(Method::POST, "/sales/add", Some(payload)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let data = read_json(response).await;
    assert_eq!(
        data["error"],
        "Invalid unit price at item index 0. Unit price cannot be negative."
    );
}

#[tokio::test]
async fn non_positive_total_amount_is_rejected() {
    let app = TestApp::new().await;

    let brand = app.seed_brand("Acme").await;
    let customer = app.seed_customer("Kim Wu").await;
    let product = app.seed_product("Lamp", brand.brand_id).await;

    let payload = json!({
        "bill_no": "BILL-3003",
        "sale_date": "2024-06-03",
        "total_amount": "0",
        "customer_id": customer.customer_id,
        "items": [
            { "product_id": product.product_id, "quantity": 1, "unit_price": "5.00" }
        ]
    });

    let response = app.request(Method::POST, "/sales/add", Some(payload)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let data = read_json(response).await;
    assert_eq!(data["error"], "Total amount must be greater than 0.");
}

#[tokio::test]
async fn missing_top_level_field_yields_json_bad_request() {
    let app = TestApp::new().await;

    let brand = app.seed_brand("Acme").await;
    let customer = app.seed_customer("Noor Haddad").await;
    let product = app.seed_product("Toaster", brand.brand_id).await;

    // No bill_no at all, so the body never deserializes into a request.
    let payload = json!({
        "sale_date": "2024-06-03",
        "total_amount": "20.00",
        "customer_id": customer.customer_id,
        "items": [
            { "product_id": product.product_id, "quantity": 1, "unit_price": "20.00" }
        ]
    });

    let response = app.request(Method::POST, "/sales/add", Some(payload)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let data = read_json(response).await;
    let error = data["error"].as_str().expect("error field");
    assert!(error.contains("bill_no"), "error should name the field: {error}");

    let sales = SaleEntity::find()
        .count(&*app.state.db)
        .await
        .expect("count sales");
    assert_eq!(sales, 0);
}

#[tokio::test]
async fn dangling_product_reference_rolls_back_the_header() {
    let app = TestApp::new().await;

    let customer = app.seed_customer("Noor Haddad").await;

    let payload = json!({
        "bill_no": "BILL-4001",
        "sale_date": "2024-06-04",
        "total_amount": "99.00",
        "customer_id": customer.customer_id,
        "items": [
            { "product_id": 9999, "quantity": 1, "unit_price": "99.00" }
        ]
    });

    let response = app.request(Method::POST, "/sales/add", Some(payload)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let data = read_json(response).await;
    assert_eq!(data["error"], "Invalid customer or product ID");

    // Header insert succeeded inside the transaction, but the item failure
    // must roll the whole aggregate back.
    let sale_count = SaleEntity::find()
        .count(&*app.state.db)
        .await
        .expect("count sales");
    assert_eq!(sale_count, 0);
}

#[tokio::test]
async fn dangling_customer_reference_is_rejected() {
    let app = TestApp::new().await;

    let brand = app.seed_brand("Acme").await;
    let product = app.seed_product("Fan", brand.brand_id).await;

    let payload = json!({
        "bill_no": "BILL-4002",
        "sale_date": "2024-06-04",
        "total_amount": "45.00",
        "customer_id": 12345,
        "items": [
            { "product_id": product.product_id, "quantity": 1, "unit_price": "45.00" }
        ]
    });

    let response = app.request(Method::POST, "/sales/add", Some(payload)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let data = read_json(response).await;
    assert_eq!(data["error"], "Invalid customer or product ID");
}

#[tokio::test]
async fn list_sales_returns_newest_first_with_nested_items() {
    let app = TestApp::new().await;

    let brand = app.seed_brand("Acme").await;
    let customer = app.seed_customer("Ravi Patel").await;
    let product = app.seed_product("Microwave", brand.brand_id).await;

    for (bill_no, price) in [("BILL-5001", "120.00"), ("BILL-5002", "240.00")] {
        let payload = json!({
            "bill_no": bill_no,
            "sale_date": "2024-06-05",
            "total_amount": price,
            "customer_id": customer.customer_id,
            "items": [
                { "product_id": product.product_id, "quantity": 1, "unit_price": price }
            ]
        });
        let response = app.request(Method::POST, "/sales/add", Some(payload)).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app.request(Method::GET, "/sales", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = read_json(response).await;
    assert_eq!(data["count"], 2);

    let sales = data["sales"].as_array().expect("sales array");
    assert_eq!(sales[0]["bill_no"], "BILL-5002");
    assert_eq!(sales[1]["bill_no"], "BILL-5001");

    for sale in sales {
        let items = sale["items"].as_array().expect("items array");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["product_name"], "Microwave");
        assert_eq!(sale["customer_name"], "Ravi Patel");
    }
}

#[tokio::test]
async fn sale_without_items_still_appears_in_listing() {
    let app = TestApp::new().await;

    let customer = app.seed_customer("Mia Novak").await;
    app.seed_sale("BILL-6001", customer.customer_id, Decimal::new(5_000, 2))
        .await;

    let response = app.request(Method::GET, "/sales", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = read_json(response).await;
    assert_eq!(data["count"], 1);
    let sales = data["sales"].as_array().expect("sales array");
    assert_eq!(sales[0]["bill_no"], "BILL-6001");
    assert!(sales[0]["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn get_sale_by_id_round_trips() {
    let app = TestApp::new().await;

    let brand = app.seed_brand("Acme").await;
    let customer = app.seed_customer("Tomas Berg").await;
    let product = app.seed_product("Vacuum", brand.brand_id).await;

    let payload = json!({
        "bill_no": "BILL-7001",
        "sale_date": "2024-06-07",
        "total_amount": "300.00",
        "customer_id": customer.customer_id,
        "items": [
            { "product_id": product.product_id, "quantity": 2, "unit_price": "150.00" }
        ]
    });

    let created = read_json(app.request(Method::POST, "/sales/add", Some(payload)).await).await;
    let sale_id = created["sale"]["sale_id"].as_i64().unwrap();

    let response = app
        .request(Method::GET, &format!("/sales/{sale_id}"), None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = read_json(response).await;
    assert_eq!(data["bill_no"], "BILL-7001");
    assert_eq!(data["items"].as_array().unwrap().len(), 1);
    assert_eq!(as_decimal(&data["items"][0]["unit_price"]), Decimal::new(15_000, 2));
}

#[tokio::test]
async fn get_unknown_sale_returns_not_found() {
    let app = TestApp::new().await;

    let response = app.request(Method::GET, "/sales/424242", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let data = read_json(response).await;
    assert_eq!(data["error"], "Sale not found");
}
