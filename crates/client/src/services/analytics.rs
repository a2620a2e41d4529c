//! Analytics service for the admin dashboard.
//!
//! All endpoints require an admin session; an expired one surfaces as
//! [`ApiError::SessionExpired`] after the client's refresh attempt.

use std::collections::HashMap;

use serde::Deserialize;
use tracing::instrument;

use souq_core::{
    ApiEnvelope, CategoryRevenue, DashboardStats, LowStockProduct, OrderStatus, Review,
    SalesPoint, TopProduct,
};

use crate::error::ApiError;
use crate::http::ApiClient;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SalesData {
    sales_data: Vec<SalesPoint>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TopProductsData {
    top_products: Vec<TopProduct>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CategoryRevenueData {
    category_revenue: Vec<CategoryRevenue>,
}

#[derive(Deserialize)]
struct DistributionData {
    distribution: HashMap<OrderStatus, u64>,
}

#[derive(Deserialize)]
struct ProductsData {
    products: Vec<LowStockProduct>,
}

#[derive(Deserialize)]
struct ReviewsData {
    reviews: Vec<Review>,
}

/// Thin façade for analytics endpoints.
#[derive(Clone)]
pub struct AnalyticsService {
    client: ApiClient,
}

impl AnalyticsService {
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Headline dashboard statistics.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    #[instrument(skip(self))]
    pub async fn dashboard(&self) -> Result<DashboardStats, ApiError> {
        let env: ApiEnvelope<DashboardStats> = self.client.get("/analytics/dashboard").await?;
        Ok(env.data)
    }

    /// Daily sales history for the last `days` days.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    #[instrument(skip(self))]
    pub async fn sales(&self, days: u32) -> Result<Vec<SalesPoint>, ApiError> {
        let env: ApiEnvelope<SalesData> = self
            .client
            .get(&format!("/analytics/sales?days={days}"))
            .await?;
        Ok(env.data.sales_data)
    }

    /// Best-selling products.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    #[instrument(skip(self))]
    pub async fn top_products(&self, limit: u32) -> Result<Vec<TopProduct>, ApiError> {
        let env: ApiEnvelope<TopProductsData> = self
            .client
            .get(&format!("/analytics/top-products?limit={limit}"))
            .await?;
        Ok(env.data.top_products)
    }

    /// Revenue broken down by category.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    #[instrument(skip(self))]
    pub async fn revenue_by_category(&self) -> Result<Vec<CategoryRevenue>, ApiError> {
        let env: ApiEnvelope<CategoryRevenueData> = self
            .client
            .get("/analytics/revenue-by-category")
            .await?;
        Ok(env.data.category_revenue)
    }

    /// Count of orders per fulfillment status.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    #[instrument(skip(self))]
    pub async fn order_status_distribution(&self) -> Result<HashMap<OrderStatus, u64>, ApiError> {
        let env: ApiEnvelope<DistributionData> = self
            .client
            .get("/analytics/order-status-distribution")
            .await?;
        Ok(env.data.distribution)
    }

    /// Products at or below the given stock threshold.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    #[instrument(skip(self))]
    pub async fn low_stock(&self, threshold: u32) -> Result<Vec<LowStockProduct>, ApiError> {
        let env: ApiEnvelope<ProductsData> = self
            .client
            .get(&format!("/analytics/low-stock?threshold={threshold}"))
            .await?;
        Ok(env.data.products)
    }

    /// Most recent reviews across the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    #[instrument(skip(self))]
    pub async fn recent_reviews(&self, limit: u32) -> Result<Vec<Review>, ApiError> {
        let env: ApiEnvelope<ReviewsData> = self
            .client
            .get(&format!("/analytics/recent-reviews?limit={limit}"))
            .await?;
        Ok(env.data.reviews)
    }
}
