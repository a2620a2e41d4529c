//! Category service.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use souq_core::{ApiEnvelope, Category, CategoryId};

use crate::error::ApiError;
use crate::http::ApiClient;

/// Create/update payload for a category.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryForm {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Deserialize)]
struct CategoriesData {
    categories: Vec<Category>,
}

#[derive(Deserialize)]
struct CategoryData {
    category: Category,
}

/// Thin façade for category endpoints.
#[derive(Clone)]
pub struct CategoryService {
    client: ApiClient,
}

impl CategoryService {
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// List all categories (public).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Category>, ApiError> {
        let env: ApiEnvelope<CategoriesData> = self.client.get("/categories").await?;
        Ok(env.data.categories)
    }

    /// Fetch one category by ID (public).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the category is missing or the request fails.
    #[instrument(skip(self))]
    pub async fn get(&self, id: CategoryId) -> Result<Category, ApiError> {
        let env: ApiEnvelope<CategoryData> = self.client.get(&format!("/categories/{id}")).await?;
        Ok(env.data.category)
    }

    /// Create a category (admin).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if validation fails or the request fails.
    #[instrument(skip(self, form), fields(name = %form.name))]
    pub async fn create(&self, form: &CategoryForm) -> Result<Category, ApiError> {
        let env: ApiEnvelope<CategoryData> =
            self.client.post("/categories/admin", Some(form)).await?;
        Ok(env.data.category)
    }

    /// Update a category (admin).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if validation fails or the request fails.
    #[instrument(skip(self, form))]
    pub async fn update(&self, id: CategoryId, form: &CategoryForm) -> Result<Category, ApiError> {
        let env: ApiEnvelope<CategoryData> = self
            .client
            .put(&format!("/categories/admin/{id}"), Some(form))
            .await?;
        Ok(env.data.category)
    }

    /// Delete a category (admin).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: CategoryId) -> Result<(), ApiError> {
        let _: serde_json::Value = self
            .client
            .delete(&format!("/categories/admin/{id}"))
            .await?;
        Ok(())
    }
}
