//! Product service.
//!
//! Public catalog reads plus the admin-prefixed CRUD variants. Single
//! product fetches are cached with `moka` (5-minute TTL); admin mutations
//! invalidate the affected entry. The service is also the price-lookup
//! provider for cart totals via [`ProductService::price_map`].

use std::collections::{BTreeSet, HashMap};
use std::time::Duration;

use moka::future::Cache;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use url::form_urlencoded;

use souq_core::{ApiEnvelope, CategoryId, Pagination, Product, ProductId, TagId};

use crate::error::ApiError;
use crate::http::ApiClient;

/// Sort key for product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductSort {
    Name,
    Price,
    CreatedAt,
}

impl ProductSort {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Price => "price",
            Self::CreatedAt => "createdAt",
        }
    }
}

/// Sort direction for product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Filter/pagination parameters for product listings.
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub category_id: Option<CategoryId>,
    pub tag_id: Option<TagId>,
    pub search: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub sort_by: Option<ProductSort>,
    pub sort_order: Option<SortOrder>,
    /// Admin-only filter; ignored by the public listing.
    pub is_active: Option<bool>,
}

impl ProductQuery {
    /// Render as a query string (`?page=2&limit=20`), empty when unset.
    fn query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());

        if let Some(page) = self.page {
            serializer.append_pair("page", &page.to_string());
        }
        if let Some(limit) = self.limit {
            serializer.append_pair("limit", &limit.to_string());
        }
        if let Some(id) = self.category_id {
            serializer.append_pair("categoryId", &id.to_string());
        }
        if let Some(id) = self.tag_id {
            serializer.append_pair("tagId", &id.to_string());
        }
        if let Some(search) = &self.search {
            serializer.append_pair("search", search);
        }
        if let Some(min) = self.min_price {
            serializer.append_pair("minPrice", &min.to_string());
        }
        if let Some(max) = self.max_price {
            serializer.append_pair("maxPrice", &max.to_string());
        }
        if let Some(sort) = self.sort_by {
            serializer.append_pair("sortBy", sort.as_str());
        }
        if let Some(order) = self.sort_order {
            serializer.append_pair("sortOrder", order.as_str());
        }
        if let Some(active) = self.is_active {
            serializer.append_pair("isActive", if active { "true" } else { "false" });
        }

        let encoded = serializer.finish();
        if encoded.is_empty() {
            String::new()
        } else {
            format!("?{encoded}")
        }
    }
}

/// One page of a product listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub pagination: Pagination,
}

/// Create/update payload for a product (admin).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductForm {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub sku: String,
    pub stock_quantity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub is_active: bool,
    pub category_ids: Vec<CategoryId>,
    pub tag_ids: Vec<TagId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StockUpdate {
    stock_quantity: i64,
}

/// Thin façade for product endpoints, with a read cache.
#[derive(Clone)]
pub struct ProductService {
    client: ApiClient,
    cache: Cache<ProductId, Product>,
}

impl ProductService {
    /// Create the service with a 5-minute product cache.
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self { client, cache }
    }

    // =========================================================================
    // Public catalog
    // =========================================================================

    /// List products with filters and pagination (public).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    #[instrument(skip(self, query))]
    pub async fn list(&self, query: &ProductQuery) -> Result<ProductPage, ApiError> {
        let env: ApiEnvelope<ProductPage> = self
            .client
            .get(&format!("/products{}", query.query_string()))
            .await?;
        Ok(env.data)
    }

    /// Fetch one product by ID (public, cached).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the product is missing or the request fails.
    #[instrument(skip(self))]
    pub async fn get(&self, id: ProductId) -> Result<Product, ApiError> {
        if let Some(product) = self.cache.get(&id).await {
            debug!("cache hit for product");
            return Ok(product);
        }

        let env: ApiEnvelope<Product> = self.client.get(&format!("/products/{id}")).await?;
        self.cache.insert(id, env.data.clone()).await;
        Ok(env.data)
    }

    /// Search products by free text (public).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn search(&self, text: &str, page: u32, limit: u32) -> Result<ProductPage, ApiError> {
        self.list(&ProductQuery {
            search: Some(text.to_owned()),
            page: Some(page),
            limit: Some(limit),
            ..ProductQuery::default()
        })
        .await
    }

    /// Unit prices for the given products, keyed by ID.
    ///
    /// The price-lookup provider for cart totals: fetches each distinct
    /// product once (cache-assisted) and silently skips products the
    /// catalog no longer knows, so a delisted product simply has no entry.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any failure other than a missing product.
    #[instrument(skip(self, ids), fields(count = ids.len()))]
    pub async fn price_map(
        &self,
        ids: &[ProductId],
    ) -> Result<HashMap<ProductId, Decimal>, ApiError> {
        let distinct: BTreeSet<ProductId> = ids.iter().copied().collect();
        let mut prices = HashMap::with_capacity(distinct.len());

        for id in distinct {
            match self.get(id).await {
                Ok(product) => {
                    prices.insert(id, product.price);
                }
                Err(e) if e.is_not_found() => {
                    debug!(product_id = %id, "product missing from catalog; no price entry");
                }
                Err(e) => return Err(e),
            }
        }

        Ok(prices)
    }

    // =========================================================================
    // Admin CRUD
    // =========================================================================

    /// List products for the admin screens, including inactive ones.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    #[instrument(skip(self, query))]
    pub async fn admin_list(&self, query: &ProductQuery) -> Result<ProductPage, ApiError> {
        let env: ApiEnvelope<ProductPage> = self
            .client
            .get(&format!("/products/admin{}", query.query_string()))
            .await?;
        Ok(env.data)
    }

    /// Fetch one product by ID for the admin screens (uncached).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the product is missing or the request fails.
    #[instrument(skip(self))]
    pub async fn admin_get(&self, id: ProductId) -> Result<Product, ApiError> {
        let env: ApiEnvelope<Product> = self.client.get(&format!("/products/admin/{id}")).await?;
        Ok(env.data)
    }

    /// Create a product (admin).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if validation fails or the request fails.
    #[instrument(skip(self, form), fields(sku = %form.sku))]
    pub async fn create(&self, form: &ProductForm) -> Result<Product, ApiError> {
        let env: ApiEnvelope<Product> = self.client.post("/products/admin", Some(form)).await?;
        Ok(env.data)
    }

    /// Update a product (admin).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if validation fails or the request fails.
    #[instrument(skip(self, form))]
    pub async fn update(&self, id: ProductId, form: &ProductForm) -> Result<Product, ApiError> {
        let env: ApiEnvelope<Product> = self
            .client
            .put(&format!("/products/admin/{id}"), Some(form))
            .await?;
        self.cache.invalidate(&id).await;
        Ok(env.data)
    }

    /// Update only a product's stock level (admin).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if validation fails or the request fails.
    #[instrument(skip(self))]
    pub async fn update_stock(&self, id: ProductId, stock: i64) -> Result<Product, ApiError> {
        let env: ApiEnvelope<Product> = self
            .client
            .put(
                &format!("/products/admin/{id}/stock"),
                Some(&StockUpdate {
                    stock_quantity: stock,
                }),
            )
            .await?;
        self.cache.invalidate(&id).await;
        Ok(env.data)
    }

    /// Delete a product (admin).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: ProductId) -> Result<(), ApiError> {
        let _: serde_json::Value = self.client.delete(&format!("/products/admin/{id}")).await?;
        self.cache.invalidate(&id).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_string_empty() {
        assert_eq!(ProductQuery::default().query_string(), "");
    }

    #[test]
    fn test_query_string_full() {
        let query = ProductQuery {
            page: Some(2),
            limit: Some(20),
            category_id: Some(CategoryId::new(3)),
            search: Some("مصباح".to_string()),
            sort_by: Some(ProductSort::Price),
            sort_order: Some(SortOrder::Desc),
            is_active: Some(true),
            ..ProductQuery::default()
        };

        let qs = query.query_string();
        assert!(qs.starts_with('?'));
        assert!(qs.contains("page=2"));
        assert!(qs.contains("categoryId=3"));
        assert!(qs.contains("sortBy=price"));
        assert!(qs.contains("sortOrder=desc"));
        assert!(qs.contains("isActive=true"));
        // search text is percent-encoded
        assert!(!qs.contains("مصباح"));
        assert!(qs.contains("search="));
    }

    #[test]
    fn test_product_form_wire_names() {
        let form = ProductForm {
            name: "Lamp".to_string(),
            description: None,
            price: Decimal::new(995, 1),
            sku: "LAMP-1".to_string(),
            stock_quantity: 4,
            image_url: None,
            is_active: true,
            category_ids: vec![CategoryId::new(1)],
            tag_ids: vec![],
            meta_title: None,
            meta_description: None,
            slug: None,
        };

        let json = serde_json::to_value(&form).expect("serialize");
        assert_eq!(json["stockQuantity"], 4);
        assert_eq!(json["categoryIds"], serde_json::json!([1]));
        assert!(json.get("description").is_none());
    }
}
