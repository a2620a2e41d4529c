//! Analytics records for the admin dashboard.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ProductId;

/// Headline dashboard statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_revenue: Decimal,
    pub total_orders: u64,
    pub total_products: u64,
    pub total_customers: u64,
    pub revenue_growth: f64,
    pub orders_growth: f64,
}

/// One day of sales history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesPoint {
    /// ISO date (`YYYY-MM-DD`).
    pub date: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub revenue: Decimal,
    pub orders: u64,
}

/// A best-selling product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopProduct {
    pub product_id: ProductId,
    pub product_name: String,
    pub total_sold: u64,
    #[serde(with = "rust_decimal::serde::float")]
    pub revenue: Decimal,
}

/// Revenue aggregated per category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRevenue {
    pub category_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub revenue: Decimal,
    pub order_count: u64,
}

/// A product running low on stock.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LowStockProduct {
    pub id: ProductId,
    pub name: String,
    pub sku: String,
    pub stock_quantity: i64,
    #[serde(default)]
    pub image_url: Option<String>,
}
