//! Image upload service.
//!
//! Uploads go as multipart form data; the other services send JSON.

use serde::Deserialize;
use tracing::instrument;

use souq_core::{ApiEnvelope, ImageUpload};

use crate::error::ApiError;
use crate::http::{ApiClient, FormPart};

/// Acknowledgement returned by an image deletion.
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteAck {
    pub deleted: bool,
    pub public_id: String,
}

/// Thin façade for image endpoints.
#[derive(Clone)]
pub struct ImageService {
    client: ApiClient,
}

impl ImageService {
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Upload a single image, optionally into a named folder.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the upload is rejected or the request fails.
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn upload(
        &self,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
        folder: Option<&str>,
    ) -> Result<ImageUpload, ApiError> {
        let mut parts = vec![FormPart::file("image", file_name, Some(content_type), bytes)];
        if let Some(folder) = folder {
            parts.push(FormPart::text("folder", folder));
        }

        let env: ApiEnvelope<ImageUpload> =
            self.client.post_multipart("/images/upload", parts).await?;
        Ok(env.data)
    }

    /// Upload several images in one request.
    ///
    /// Each entry is `(file_name, content_type, bytes)`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the upload is rejected or the request fails.
    #[instrument(skip(self, files), fields(count = files.len()))]
    pub async fn upload_many(
        &self,
        files: Vec<(String, String, Vec<u8>)>,
        folder: Option<&str>,
    ) -> Result<Vec<ImageUpload>, ApiError> {
        let mut parts: Vec<FormPart> = files
            .into_iter()
            .map(|(name, content_type, bytes)| {
                FormPart::file("images", name, Some(content_type.as_str()), bytes)
            })
            .collect();
        if let Some(folder) = folder {
            parts.push(FormPart::text("folder", folder));
        }

        let env: ApiEnvelope<Vec<ImageUpload>> = self
            .client
            .post_multipart("/images/upload-multiple", parts)
            .await?;
        Ok(env.data)
    }

    /// Delete an uploaded image by its public ID.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    #[instrument(skip(self))]
    pub async fn delete(&self, public_id: &str) -> Result<DeleteAck, ApiError> {
        let env: ApiEnvelope<DeleteAck> =
            self.client.delete(&format!("/images/{public_id}")).await?;
        Ok(env.data)
    }
}
