//! Cart line wire shape.

use serde::{Deserialize, Serialize};

use super::ProductId;

/// One product-id/quantity pair within the cart aggregate.
///
/// Serialized with the original `productId`/`quantity` field names so
/// persisted cart records stay readable across versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: ProductId,
    pub quantity: u32,
}

impl CartLine {
    /// Create a new cart line.
    #[must_use]
    pub const fn new(product_id: ProductId, quantity: u32) -> Self {
        Self {
            product_id,
            quantity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_field_names() {
        let line = CartLine::new(ProductId::new(3), 2);
        let json = serde_json::to_value(line).expect("serialize");
        assert_eq!(json, serde_json::json!({"productId": 3, "quantity": 2}));
    }
}
