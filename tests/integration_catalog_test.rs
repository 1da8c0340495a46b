mod common;

use axum::{
    body,
    http::{Method, StatusCode},
};
use serde_json::{json, Value};

use common::TestApp;

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read response body");
    serde_json::from_slice(&bytes).expect("parse response body")
}

#[tokio::test]
async fn liveness_and_health_endpoints_respond() {
    let app = TestApp::new().await;

    let response = app.request(Method::GET, "/", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.request(Method::GET, "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = read_json(response).await;
    assert_eq!(data["status"], "ok");
    assert_eq!(data["database"], "connected");
}

#[tokio::test]
async fn brand_create_and_list() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/brands/add",
            Some(json!({ "brand_name": "Solara" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let brand = read_json(response).await;
    assert_eq!(brand["brand_name"], "Solara");

    let response = app.request(Method::GET, "/brands", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let brands = read_json(response).await;
    assert_eq!(brands.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn duplicate_brand_name_conflicts() {
    let app = TestApp::new().await;
    app.seed_brand("Solara").await;

    let response = app
        .request(
            Method::POST,
            "/brands/add",
            Some(json!({ "brand_name": "Solara" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let data = read_json(response).await;
    assert_eq!(data["error"], "Brand name already exists");
}

#[tokio::test]
async fn blank_brand_name_is_rejected() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/brands/add",
            Some(json!({ "brand_name": "   " })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let data = read_json(response).await;
    assert_eq!(data["error"], "brand_name is required");
}

#[tokio::test]
async fn customer_create_and_list() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/customers/add",
            Some(json!({
                "name": "Dana Flores",
                "phone_no": "0171234567",
                "email": "dana@example.com"
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let customer = read_json(response).await;
    assert_eq!(customer["name"], "Dana Flores");
    assert_eq!(customer["address"], Value::Null);

    let response = app.request(Method::GET, "/customers", None).await;
    let customers = read_json(response).await;
    assert_eq!(customers.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn customer_requires_a_name() {
    let app = TestApp::new().await;

    let response = app
        .request(Method::POST, "/customers/add", Some(json!({ "name": "" })))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let data = read_json(response).await;
    assert_eq!(data["error"], "Name is required");
}

#[tokio::test]
async fn product_create_resolves_brand_by_name() {
    let app = TestApp::new().await;
    let brand = app.seed_brand("Solara").await;

    let response = app
        .request(
            Method::POST,
            "/products/add",
            Some(json!({
                "product_name": "Solar Panel 400W",
                "model_no": "SP-400",
                "brand_name": "Solara"
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let product = read_json(response).await;
    assert_eq!(product["brand_id"], brand.brand_id);
    assert_eq!(product["brand_name"], "Solara");
    assert_eq!(product["serial_no"], Value::Null);

    let response = app.request(Method::GET, "/products", None).await;
    let products = read_json(response).await;
    let products = products.as_array().unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["brand_name"], "Solara");
}

#[tokio::test]
async fn product_with_unknown_brand_is_rejected() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/products/add",
            Some(json!({
                "product_name": "Mystery Gadget",
                "brand_name": "NoSuchBrand"
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let data = read_json(response).await;
    assert_eq!(data["error"], "Invalid brand selected");
}

#[tokio::test]
async fn warranty_card_create_and_list() {
    let app = TestApp::new().await;

    let brand = app.seed_brand("Solara").await;
    let customer = app.seed_customer("Omar Aziz").await;
    let product = app.seed_product("Inverter", brand.brand_id).await;
    let sale = app
        .seed_sale("BILL-W1", customer.customer_id, rust_decimal::Decimal::new(50_000, 2))
        .await;

    let item = backoffice_api::entities::sale_item::ActiveModel {
        sale_id: sea_orm::Set(sale.sale_id),
        product_id: sea_orm::Set(product.product_id),
        quantity: sea_orm::Set(1),
        unit_price: sea_orm::Set(rust_decimal::Decimal::new(50_000, 2)),
        created_at: sea_orm::Set(chrono::Utc::now()),
        ..Default::default()
    };
    let item = sea_orm::ActiveModelTrait::insert(item, &*app.state.db)
        .await
        .expect("seed sale item");

    let response = app
        .request(
            Method::POST,
            "/warranty/add",
            Some(json!({
                "sale_item_id": item.sale_item_id,
                "customer_id": customer.customer_id,
                "product_id": product.product_id,
                "warranty_start_date": "2024-06-01",
                "warranty_end_date": "2026-06-01",
                "warranty_card_no": "WC-0001",
                "warranty_card_image": "https://cdn.example.com/cards/wc-0001.png"
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let card = read_json(response).await;
    assert_eq!(card["warranty_card_no"], "WC-0001");

    let response = app.request(Method::GET, "/warranty", None).await;
    let cards = read_json(response).await;
    assert_eq!(cards.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn warranty_card_requires_an_image_url() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/warranty/add",
            Some(json!({
                "sale_item_id": 1,
                "customer_id": 1,
                "product_id": 1,
                "warranty_start_date": "2024-06-01",
                "warranty_end_date": "2026-06-01",
                "warranty_card_no": "WC-0002",
                "warranty_card_image": ""
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let data = read_json(response).await;
    assert_eq!(data["error"], "Warranty image is required");
}

#[tokio::test]
async fn warranty_card_with_dangling_references_is_rejected() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/warranty/add",
            Some(json!({
                "sale_item_id": 777,
                "customer_id": 777,
                "product_id": 777,
                "warranty_start_date": "2024-06-01",
                "warranty_end_date": "2026-06-01",
                "warranty_card_no": "WC-0003",
                "warranty_card_image": "https://cdn.example.com/cards/wc-0003.png"
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let data = read_json(response).await;
    assert_eq!(data["error"], "Invalid sale item, customer, or product ID");
}
