//! API envelope and error-body wire shapes.
//!
//! Successful responses arrive as `{ "data": ..., "pagination": ... }`.
//! Error responses carry `{ "error": { "code", "message", "details" } }`
//! where `details` holds per-field validation messages.

use serde::{Deserialize, Serialize};

/// Standard success envelope: `{ data, pagination? }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

/// Pagination block attached to list responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: u64,
    pub items_per_page: u32,
}

/// Error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

/// The `error` object inside an error response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub code: Option<String>,
    pub message: String,
    #[serde(default)]
    pub details: Vec<FieldError>,
}

/// A single field-level validation failure.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl ApiErrorBody {
    /// Combine the top-level message with any field-level details into a
    /// single human-readable string (`"Invalid; sku: required"`).
    #[must_use]
    pub fn combined_message(&self) -> String {
        if self.error.details.is_empty() {
            return self.error.message.clone();
        }

        let details = self
            .error
            .details
            .iter()
            .map(|d| format!("{}: {}", d.field, d.message))
            .collect::<Vec<_>>()
            .join("; ");

        format!("{}; {details}", self.error.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combined_message_with_details() {
        let body: ApiErrorBody = serde_json::from_value(serde_json::json!({
            "error": {
                "code": "VALIDATION_ERROR",
                "message": "Invalid",
                "details": [
                    {"field": "sku", "message": "required"},
                    {"field": "price", "message": "must be positive"}
                ]
            }
        }))
        .expect("parse error body");

        let msg = body.combined_message();
        assert!(msg.contains("Invalid"));
        assert!(msg.contains("sku: required"));
        assert!(msg.contains("price: must be positive"));
    }

    #[test]
    fn test_combined_message_without_details() {
        let body: ApiErrorBody = serde_json::from_value(serde_json::json!({
            "error": {"message": "Not found"}
        }))
        .expect("parse error body");

        assert_eq!(body.combined_message(), "Not found");
    }

    #[test]
    fn test_envelope_without_pagination() {
        let env: ApiEnvelope<Vec<i64>> =
            serde_json::from_str(r#"{"data":[1,2,3]}"#).expect("parse envelope");
        assert_eq!(env.data, vec![1, 2, 3]);
        assert!(env.pagination.is_none());
    }

    #[test]
    fn test_pagination_field_names() {
        let env: ApiEnvelope<Vec<i64>> = serde_json::from_str(
            r#"{"data":[],"pagination":{"currentPage":2,"totalPages":5,"totalItems":88,"itemsPerPage":20}}"#,
        )
        .expect("parse envelope");
        let p = env.pagination.expect("pagination");
        assert_eq!(p.current_page, 2);
        assert_eq!(p.total_items, 88);
    }
}
