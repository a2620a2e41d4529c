//! Catalog, order, and analytics commands.
//!
//! Each command builds a fresh [`ApiClient`] from the environment, so the
//! required `SOUQ_API_BASE_URL` must be set (a `.env` file works). Admin
//! commands additionally need a signed-in session; without one the client
//! reports the session as expired after its silent refresh attempt fails.

use thiserror::Error;

use souq_client::config::{ClientConfig, ConfigError};
use souq_client::http::ApiClient;
use souq_client::services::{AnalyticsService, OrderService, ProductQuery, ProductService};
use souq_client::ApiError;
use souq_core::ProductId;

/// Errors that can occur during API-backed commands.
#[derive(Debug, Error)]
pub enum ShopError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// API request failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

fn client() -> Result<ApiClient, ShopError> {
    Ok(ApiClient::new(&ClientConfig::from_env()?))
}

/// List products, optionally filtered by search text.
#[allow(clippy::print_stdout)]
pub async fn list_products(page: u32, limit: u32, search: Option<&str>) -> Result<(), ShopError> {
    let products = ProductService::new(client()?);
    let result = products
        .list(&ProductQuery {
            page: Some(page),
            limit: Some(limit),
            search: search.map(str::to_owned),
            ..ProductQuery::default()
        })
        .await?;

    for product in &result.products {
        println!(
            "{:>6}  {:<30}  {:>10}  stock {:>4}  {}",
            product.id,
            product.name,
            product.price,
            product.stock_quantity,
            product.sku
        );
    }
    println!(
        "page {}/{} ({} products)",
        result.pagination.current_page,
        result.pagination.total_pages,
        result.pagination.total_items
    );
    Ok(())
}

/// Show one product in full.
#[allow(clippy::print_stdout)]
pub async fn show_product(product_id: ProductId) -> Result<(), ShopError> {
    let products = ProductService::new(client()?);
    let product = products.get(product_id).await?;

    println!("{} ({})", product.name, product.sku);
    println!("  price: {}", product.price);
    println!("  stock: {}", product.stock_quantity);
    println!("  active: {}", product.is_active);
    if let Some(description) = &product.description {
        println!("  description: {description}");
    }
    if let Some(rating) = product.average_rating {
        println!("  rating: {rating:.1}");
    }
    if !product.categories.is_empty() {
        let names: Vec<&str> = product.categories.iter().map(|c| c.name.as_str()).collect();
        println!("  categories: {}", names.join(", "));
    }
    Ok(())
}

/// Track an order by its public order number.
#[allow(clippy::print_stdout)]
pub async fn track_order(order_number: &str) -> Result<(), ShopError> {
    let orders = OrderService::new(client()?);
    let order = orders.track(order_number).await?;

    println!("order {} - {}", order.order_number, order.status);
    println!("  placed: {}", order.created_at);
    println!("  ship to: {} ({})", order.shipping_address, order.shipping_method);
    for item in &order.items {
        println!(
            "  {:>3} x {:<30} @ {} = {}",
            item.quantity, item.product_name, item.product_price, item.subtotal
        );
    }
    println!("  subtotal: {}", order.subtotal);
    if let Some(cost) = order.shipping_cost {
        println!("  shipping: {cost}");
    }
    println!("  total: {}", order.total);
    Ok(())
}

/// Print headline dashboard statistics (admin).
#[allow(clippy::print_stdout)]
pub async fn dashboard() -> Result<(), ShopError> {
    let analytics = AnalyticsService::new(client()?);
    let stats = analytics.dashboard().await?;

    println!("revenue:   {} ({:+.1}%)", stats.total_revenue, stats.revenue_growth);
    println!("orders:    {} ({:+.1}%)", stats.total_orders, stats.orders_growth);
    println!("products:  {}", stats.total_products);
    println!("customers: {}", stats.total_customers);
    Ok(())
}
