//! Order service.
//!
//! Checkout and tracking for customers, plus the admin-prefixed listing
//! and status-update endpoints. Unlike most of the API, order responses
//! are not wrapped in the standard data envelope: single orders come back
//! as `{"order": ...}` and the admin listing puts `orders` and
//! `pagination` at the top level.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use souq_core::{CartLine, Order, OrderId, OrderStatus, Pagination, ProductId};

use crate::error::ApiError;
use crate::http::ApiClient;

/// One line of a checkout payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemForm {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Checkout payload for creating an order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderForm {
    pub items: Vec<OrderItemForm>,
    pub shipping_address: String,
    pub shipping_method: String,
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub shipping_cost: Option<rust_decimal::Decimal>,
}

impl OrderForm {
    /// Build a checkout payload from cart lines.
    #[must_use]
    pub fn from_lines(lines: &[CartLine], shipping_address: String, shipping_method: String) -> Self {
        Self {
            items: lines
                .iter()
                .map(|line| OrderItemForm {
                    product_id: line.product_id,
                    quantity: line.quantity,
                })
                .collect(),
            shipping_address,
            shipping_method,
            shipping_cost: None,
        }
    }
}

/// One page of the admin order listing.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderPage {
    pub orders: Vec<Order>,
    pub pagination: Pagination,
}

/// Acknowledgement returned by a status update.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdateAck {
    pub id: OrderId,
    pub order_number: String,
    pub status: OrderStatus,
}

#[derive(Deserialize)]
struct OrderWrapper {
    order: Order,
}

#[derive(Serialize)]
struct StatusUpdate {
    status: OrderStatus,
}

/// Thin façade for order endpoints.
#[derive(Clone)]
pub struct OrderService {
    client: ApiClient,
}

impl OrderService {
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Place an order (customer checkout).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if validation fails or the request fails.
    #[instrument(skip(self, form), fields(items = form.items.len()))]
    pub async fn create(&self, form: &OrderForm) -> Result<Order, ApiError> {
        let wrapper: OrderWrapper = self.client.post("/orders/create", Some(form)).await?;
        Ok(wrapper.order)
    }

    /// Look up an order by its public order number (no auth required).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the order is unknown or the request fails.
    #[instrument(skip(self))]
    pub async fn track(&self, order_number: &str) -> Result<Order, ApiError> {
        let wrapper: OrderWrapper = self
            .client
            .get(&format!("/orders/track/{order_number}"))
            .await?;
        Ok(wrapper.order)
    }

    /// List orders for the admin screens, optionally filtered by status.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    #[instrument(skip(self))]
    pub async fn admin_list(
        &self,
        page: u32,
        limit: u32,
        status: Option<OrderStatus>,
    ) -> Result<OrderPage, ApiError> {
        let mut path = format!("/orders/admin?page={page}&limit={limit}");
        if let Some(status) = status {
            path.push_str("&status=");
            path.push_str(status.as_str());
        }
        self.client.get(&path).await
    }

    /// Fetch one order by ID for the admin screens.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the order is missing or the request fails.
    #[instrument(skip(self))]
    pub async fn admin_get(&self, id: OrderId) -> Result<Order, ApiError> {
        let wrapper: OrderWrapper = self.client.get(&format!("/orders/admin/{id}")).await?;
        Ok(wrapper.order)
    }

    /// Move an order to a new fulfillment status (admin).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the transition is rejected or the request fails.
    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<StatusUpdateAck, ApiError> {
        self.client
            .put(
                &format!("/orders/admin/{id}/status"),
                Some(&StatusUpdate { status }),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_from_lines() {
        let lines = vec![
            CartLine {
                product_id: ProductId::new(3),
                quantity: 2,
            },
            CartLine {
                product_id: ProductId::new(7),
                quantity: 1,
            },
        ];

        let form = OrderForm::from_lines(
            lines.as_slice(),
            "14 شارع الحمراء، بيروت".to_string(),
            "standard".to_string(),
        );

        let json = serde_json::to_value(&form).expect("serialize");
        assert_eq!(json["items"][0]["productId"], 3);
        assert_eq!(json["items"][1]["quantity"], 1);
        assert_eq!(json["shippingMethod"], "standard");
        // unset shipping cost stays off the wire
        assert!(json.get("shippingCost").is_none());
    }

    #[test]
    fn test_status_ack_wire_format() {
        let ack: StatusUpdateAck = serde_json::from_value(serde_json::json!({
            "id": 12,
            "orderNumber": "SQ-2026-0012",
            "status": "SHIPPED"
        }))
        .expect("parse ack");

        assert_eq!(ack.status, OrderStatus::Shipped);
        assert_eq!(ack.order_number, "SQ-2026-0012");
    }
}
