//! Catalog records: products, categories, tags, reviews, and images.
//!
//! Field names follow the API wire format. Products use snake_case on the
//! wire; categories, tags, and reviews use camelCase.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CategoryId, ProductId, ReviewId, TagId};

/// A storefront product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub sku: String,
    pub stock_quantity: i64,
    #[serde(default)]
    pub image_url: Option<String>,
    pub is_active: bool,
    #[serde(default)]
    pub categories: Vec<CategoryRef>,
    #[serde(default)]
    pub tags: Vec<TagRef>,
    #[serde(default)]
    pub average_rating: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub meta_title: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
}

/// Minimal category reference embedded in a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Minimal tag reference embedded in a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagRef {
    pub id: TagId,
    pub name: String,
}

/// A product category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub product_count: u64,
    pub created_at: DateTime<Utc>,
}

/// A product tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: TagId,
    pub name: String,
    #[serde(default)]
    pub product_count: u64,
    pub created_at: DateTime<Utc>,
}

/// A customer review.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub product_id: ProductId,
    pub rating: u8,
    #[serde(default)]
    pub review_text: Option<String>,
    #[serde(default)]
    pub reviewer_name: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub product: Option<ReviewProductRef>,
}

/// Minimal product reference embedded in a review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewProductRef {
    pub id: ProductId,
    pub name: String,
}

/// Result of an image upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageUpload {
    pub id: String,
    pub url: String,
    pub secure_url: String,
    pub public_id: String,
    pub format: String,
    pub width: u32,
    pub height: u32,
    pub bytes: u64,
    pub folder: String,
    pub created_at: DateTime<Utc>,
}
