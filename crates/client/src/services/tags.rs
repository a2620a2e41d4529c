//! Tag service.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use souq_core::{ApiEnvelope, Tag, TagId};

use crate::error::ApiError;
use crate::http::ApiClient;

/// Create/update payload for a tag.
#[derive(Debug, Clone, Serialize)]
pub struct TagForm {
    pub name: String,
}

#[derive(Deserialize)]
struct TagsData {
    tags: Vec<Tag>,
}

#[derive(Deserialize)]
struct TagData {
    tag: Tag,
}

/// Thin façade for tag endpoints.
#[derive(Clone)]
pub struct TagService {
    client: ApiClient,
}

impl TagService {
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// List all tags (public).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Tag>, ApiError> {
        let env: ApiEnvelope<TagsData> = self.client.get("/tags").await?;
        Ok(env.data.tags)
    }

    /// Fetch one tag by ID (public).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the tag is missing or the request fails.
    #[instrument(skip(self))]
    pub async fn get(&self, id: TagId) -> Result<Tag, ApiError> {
        let env: ApiEnvelope<TagData> = self.client.get(&format!("/tags/{id}")).await?;
        Ok(env.data.tag)
    }

    /// Create a tag (admin).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if validation fails or the request fails.
    #[instrument(skip(self, form), fields(name = %form.name))]
    pub async fn create(&self, form: &TagForm) -> Result<Tag, ApiError> {
        let env: ApiEnvelope<TagData> = self.client.post("/tags/admin", Some(form)).await?;
        Ok(env.data.tag)
    }

    /// Update a tag (admin).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if validation fails or the request fails.
    #[instrument(skip(self, form))]
    pub async fn update(&self, id: TagId, form: &TagForm) -> Result<Tag, ApiError> {
        let env: ApiEnvelope<TagData> = self
            .client
            .put(&format!("/tags/admin/{id}"), Some(form))
            .await?;
        Ok(env.data.tag)
    }

    /// Delete a tag (admin).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: TagId) -> Result<(), ApiError> {
        let _: serde_json::Value = self.client.delete(&format!("/tags/admin/{id}")).await?;
        Ok(())
    }
}
