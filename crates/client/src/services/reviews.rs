//! Review service.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use souq_core::{ApiEnvelope, Pagination, ProductId, Review, ReviewId};

use crate::error::ApiError;
use crate::http::ApiClient;

/// Payload for submitting a review. Anonymous submissions leave
/// `reviewer_name` unset.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewForm {
    pub product_id: ProductId,
    pub rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewer_name: Option<String>,
}

/// One page of a product's reviews.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewPage {
    pub reviews: Vec<Review>,
    pub pagination: Pagination,
}

#[derive(Deserialize)]
struct ReviewData {
    review: Review,
}

/// Thin façade for review endpoints.
#[derive(Clone)]
pub struct ReviewService {
    client: ApiClient,
}

impl ReviewService {
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// List reviews for a product, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    #[instrument(skip(self))]
    pub async fn list_for_product(
        &self,
        product_id: ProductId,
        page: u32,
        limit: u32,
    ) -> Result<ReviewPage, ApiError> {
        let env: ApiEnvelope<ReviewPage> = self
            .client
            .get(&format!(
                "/products/{product_id}/reviews?page={page}&limit={limit}"
            ))
            .await?;
        Ok(env.data)
    }

    /// Submit a review.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if validation fails (e.g. rating out of the
    /// 1-5 range) or the request fails.
    #[instrument(skip(self, form), fields(product_id = %form.product_id, rating = form.rating))]
    pub async fn create(&self, form: &ReviewForm) -> Result<Review, ApiError> {
        let env: ApiEnvelope<ReviewData> = self.client.post("/reviews", Some(form)).await?;
        Ok(env.data.review)
    }

    /// Fetch one review by ID.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the review is missing or the request fails.
    #[instrument(skip(self))]
    pub async fn get(&self, id: ReviewId) -> Result<Review, ApiError> {
        let env: ApiEnvelope<ReviewData> = self.client.get(&format!("/reviews/{id}")).await?;
        Ok(env.data.review)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_wire_names() {
        let form = ReviewForm {
            product_id: ProductId::new(5),
            rating: 4,
            review_text: Some("جودة ممتازة".to_string()),
            reviewer_name: None,
        };

        let json = serde_json::to_value(&form).expect("serialize");
        assert_eq!(json["product_id"], 5);
        assert_eq!(json["rating"], 4);
        assert!(json.get("reviewer_name").is_none());
    }
}
