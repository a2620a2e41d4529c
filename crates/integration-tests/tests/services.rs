//! Integration tests for service envelope unwrapping and the cart
//! pricing flow.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use rust_decimal::Decimal;
use serde_json::{Value, json};

use souq_client::Cart;
use souq_client::http::ApiClient;
use souq_client::services::{OrderForm, OrderService, ProductQuery, ProductService};
use souq_core::{OrderStatus, ProductId};
use souq_integration_tests::spawn;

#[derive(Default)]
struct ShopState {
    product_calls: AtomicUsize,
}

fn product_json(id: i64, price: f64) -> Value {
    json!({
        "id": id,
        "name": format!("Product {id}"),
        "price": price,
        "sku": format!("SKU-{id}"),
        "stock_quantity": 10,
        "is_active": true,
        "created_at": "2026-01-01T00:00:00Z",
        "updated_at": "2026-01-01T00:00:00Z"
    })
}

async fn list_products() -> impl IntoResponse {
    Json(json!({
        "data": {
            "products": [product_json(5, 40.0), product_json(7, 12.5)],
            "pagination": {
                "currentPage": 1,
                "totalPages": 3,
                "totalItems": 42,
                "itemsPerPage": 2
            }
        }
    }))
}

async fn get_product(
    State(state): State<Arc<ShopState>>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    state.product_calls.fetch_add(1, Ordering::SeqCst);

    match id {
        5 => (StatusCode::OK, Json(json!({"data": product_json(5, 40.0)}))),
        7 => (StatusCode::OK, Json(json!({"data": product_json(7, 12.5)}))),
        _ => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": {"message": "Product not found"}})),
        ),
    }
}

async fn create_order(Json(body): Json<Value>) -> impl IntoResponse {
    let items = body["items"].as_array().cloned().unwrap_or_default();
    Json(json!({
        "order": {
            "id": 77,
            "orderNumber": "SQ-2026-0077",
            "status": "PENDING",
            "shippingAddress": body["shippingAddress"],
            "shippingMethod": body["shippingMethod"],
            "subtotal": 92.5,
            "total": 92.5,
            "createdAt": "2026-03-01T12:00:00Z",
            "updatedAt": "2026-03-01T12:00:00Z",
            "items": items.iter().map(|item| json!({
                "id": 1,
                "orderId": 77,
                "productId": item["productId"],
                "productName": "Product",
                "productPrice": 40.0,
                "quantity": item["quantity"],
                "subtotal": 80.0
            })).collect::<Vec<_>>()
        }
    }))
}

fn router(state: Arc<ShopState>) -> Router {
    Router::new()
        .route("/products", get(list_products))
        .route("/products/{id}", get(get_product))
        .route("/orders/create", post(create_order))
        .with_state(state)
}

async fn services() -> (ProductService, OrderService, Arc<ShopState>) {
    let state = Arc::new(ShopState::default());
    let server = spawn(router(Arc::clone(&state))).await;
    let client = ApiClient::new(&server.client_config());
    (
        ProductService::new(client.clone()),
        OrderService::new(client),
        state,
    )
}

#[tokio::test]
async fn test_list_unwraps_envelope_and_pagination() {
    let (products, _orders, _state) = services().await;

    let page = products
        .list(&ProductQuery::default())
        .await
        .expect("list should succeed");

    assert_eq!(page.products.len(), 2);
    assert_eq!(page.pagination.current_page, 1);
    assert_eq!(page.pagination.total_items, 42);

    let first = page.products.first().expect("two products");
    assert_eq!(first.id, ProductId::new(5));
    assert_eq!(first.price, Decimal::new(40, 0));
}

#[tokio::test]
async fn test_price_map_feeds_cart_totals_and_skips_missing_products() {
    let (products, _orders, _state) = services().await;

    let mut cart = Cart::in_memory();
    cart.add_item(ProductId::new(5), 2);
    cart.add_item(ProductId::new(7), 1);
    // product 9 was delisted after it was added to the cart
    cart.add_item(ProductId::new(9), 3);

    let prices = products
        .price_map(&cart.distinct_product_ids())
        .await
        .expect("price_map should succeed");

    assert_eq!(prices.len(), 2);
    assert!(!prices.contains_key(&ProductId::new(9)));

    // the delisted product contributes zero rather than erroring
    assert_eq!(cart.total_price(Some(&prices)), Decimal::new(925, 1));
    assert_eq!(cart.total_items(), 6);
}

#[tokio::test]
async fn test_product_get_is_cached() {
    let (products, _orders, state) = services().await;

    let first = products.get(ProductId::new(5)).await.expect("get should succeed");
    let second = products.get(ProductId::new(5)).await.expect("get should succeed");

    assert_eq!(first.sku, second.sku);
    assert_eq!(state.product_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_order_create_parses_top_level_order() {
    let (_products, orders, _state) = services().await;

    let mut cart = Cart::in_memory();
    cart.add_item(ProductId::new(5), 2);

    let form = OrderForm::from_lines(
        cart.lines(),
        "14 شارع الحمراء، بيروت".to_string(),
        "standard".to_string(),
    );
    let order = orders.create(&form).await.expect("create should succeed");

    assert_eq!(order.order_number, "SQ-2026-0077");
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.items.len(), 1);
    assert_eq!(order.total, Decimal::new(925, 1));
}
