//! Local cart commands.
//!
//! The cart lives in a JSON file under `SOUQ_CART_DIR` (default `.souq`),
//! so it survives between invocations the same way a browser cart survives
//! page reloads. Only `cart total` talks to the API; everything else is
//! purely local.

use std::path::PathBuf;

use thiserror::Error;

use souq_client::cart::{Cart, JsonFileStore};
use souq_client::config::{ClientConfig, ConfigError};
use souq_client::http::ApiClient;
use souq_client::services::ProductService;
use souq_client::ApiError;
use souq_core::ProductId;

/// Errors that can occur during cart commands.
///
/// Only `cart total` can fail: the purely local commands swallow
/// persistence problems the same way the engine does.
#[derive(Debug, Error)]
pub enum CartCmdError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// API request failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

/// Directory holding the cart record.
fn cart_dir() -> PathBuf {
    PathBuf::from(std::env::var("SOUQ_CART_DIR").unwrap_or_else(|_| ".souq".to_string()))
}

fn open_cart() -> Cart {
    Cart::load(Box::new(JsonFileStore::new(cart_dir())))
}

/// Add units of a product to the cart.
pub fn add(product_id: ProductId, quantity: u32) {
    let mut cart = open_cart();
    cart.add_item(product_id, quantity);
    tracing::info!(
        "Added {quantity} x product {product_id} (cart now {} items)",
        cart.total_items()
    );
}

/// Set a product line to an exact quantity (0 removes it).
pub fn set(product_id: ProductId, quantity: u32) {
    let mut cart = open_cart();
    cart.update_quantity(product_id, quantity);
    tracing::info!("Cart now holds {} items", cart.total_items());
}

/// Remove a product line from the cart.
pub fn remove(product_id: ProductId) {
    let mut cart = open_cart();
    cart.remove_item(product_id);
    tracing::info!(
        "Removed product {product_id} (cart now {} items)",
        cart.total_items()
    );
}

/// Print the cart contents.
#[allow(clippy::print_stdout)]
pub fn list() {
    let cart = open_cart();
    if cart.is_empty() {
        println!("Cart is empty");
        return;
    }

    for line in cart.lines() {
        println!("product {:>6}  x {}", line.product_id, line.quantity);
    }
    println!("total items: {}", cart.total_items());
}

/// Price the cart against the live catalog and print the total.
///
/// Products the catalog no longer knows are listed at no charge, matching
/// how the storefront renders a cart holding a delisted product.
#[allow(clippy::print_stdout)]
pub async fn total() -> Result<(), CartCmdError> {
    let cart = open_cart();
    if cart.is_empty() {
        println!("Cart is empty");
        return Ok(());
    }

    let config = ClientConfig::from_env()?;
    let products = ProductService::new(ApiClient::new(&config));
    let prices = products.price_map(&cart.distinct_product_ids()).await?;

    for line in cart.lines() {
        match prices.get(&line.product_id) {
            Some(price) => println!(
                "product {:>6}  x {:<4} @ {price}",
                line.product_id, line.quantity
            ),
            None => println!(
                "product {:>6}  x {:<4} (no longer in catalog)",
                line.product_id, line.quantity
            ),
        }
    }
    println!("total: {}", cart.total_price(Some(&prices)));
    Ok(())
}

/// Empty the cart.
pub fn clear() {
    let mut cart = open_cart();
    cart.clear();
    tracing::info!("Cart cleared");
}
