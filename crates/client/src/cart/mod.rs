//! Local cart engine.
//!
//! The authoritative record of what the current visitor intends to buy,
//! independent of server availability. The engine owns an ordered list of
//! unique product lines, persists every mutation synchronously through an
//! injected [`CartStore`], and exposes pure derived queries.
//!
//! The cart holds no price data of its own: totals are computed against an
//! externally supplied price map, and a line whose product is missing from
//! the map deliberately contributes zero rather than erroring. Stock
//! clamping and price reconciliation are the checkout flow's job, done
//! against live product data for the cart's distinct product IDs.

mod store;

use std::collections::HashMap;

use rust_decimal::Decimal;

use souq_core::{CartLine, ProductId};

pub use store::{CART_STORAGE_KEY, CartStore, JsonFileStore, MemoryStore, StoreError};

/// Cart aggregate over an injected persistence store.
///
/// All five mutating operations are total: none error under documented
/// inputs. If a persistence write fails the in-memory view stays correct
/// for the session and the failure is logged; durability is lost silently.
pub struct Cart {
    lines: Vec<CartLine>,
    store: Box<dyn CartStore>,
}

impl Cart {
    /// Load the cart from its store.
    ///
    /// An unreadable record is treated as an empty cart (logged, not
    /// surfaced), matching the reader-tolerance rule for the record format.
    #[must_use]
    pub fn load(store: Box<dyn CartStore>) -> Self {
        let lines = store.load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to load cart record; starting empty");
            Vec::new()
        });

        Self { lines, store }
    }

    /// Create an empty, memory-only cart.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::load(Box::new(MemoryStore::new()))
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add `quantity` of a product, accumulating onto an existing line.
    ///
    /// `quantity` is expected to be positive; zero is a no-op. The engine
    /// does not clamp against stock.
    pub fn add_item(&mut self, product_id: ProductId, quantity: u32) {
        if quantity == 0 {
            return;
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) {
            line.quantity = line.quantity.saturating_add(quantity);
        } else {
            self.lines.push(CartLine::new(product_id, quantity));
        }

        self.persist();
    }

    /// Set a line's quantity to exactly the given value.
    ///
    /// Zero removes the line entirely; updating an absent product is a
    /// no-op (lines are never created here).
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: u32) {
        if quantity == 0 {
            self.lines.retain(|l| l.product_id != product_id);
        } else if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) {
            line.quantity = quantity;
        } else {
            return;
        }

        self.persist();
    }

    /// Remove a line unconditionally; no-op if absent.
    pub fn remove_item(&mut self, product_id: ProductId) {
        let before = self.lines.len();
        self.lines.retain(|l| l.product_id != product_id);

        if self.lines.len() != before {
            self.persist();
        }
    }

    /// Remove all lines. Idempotent.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.persist();
    }

    // =========================================================================
    // Derived queries (pure)
    // =========================================================================

    /// Sum of quantities across all lines; 0 for an empty cart.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Sum of `quantity x unit price` across lines.
    ///
    /// A product absent from the supplied map contributes zero; with no map
    /// at all the total is zero. The engine never guesses a price.
    #[must_use]
    pub fn total_price(&self, prices: Option<&HashMap<ProductId, Decimal>>) -> Decimal {
        let Some(prices) = prices else {
            return Decimal::ZERO;
        };

        self.lines
            .iter()
            .map(|l| {
                prices
                    .get(&l.product_id)
                    .copied()
                    .unwrap_or(Decimal::ZERO)
                    * Decimal::from(l.quantity)
            })
            .sum()
    }

    /// Current lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Distinct product IDs present, for live-data reconciliation calls.
    #[must_use]
    pub fn distinct_product_ids(&self) -> Vec<ProductId> {
        self.lines.iter().map(|l| l.product_id).collect()
    }

    /// Write-through to the store; failures are logged, never surfaced.
    fn persist(&self) {
        if let Err(e) = self.store.save(&self.lines) {
            tracing::warn!(error = %e, "failed to persist cart record");
        }
    }
}

impl std::fmt::Debug for Cart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cart").field("lines", &self.lines).finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn pid(id: i64) -> ProductId {
        ProductId::new(id)
    }

    #[test]
    fn test_add_item_accumulates_quantity() {
        let mut cart = Cart::in_memory();
        cart.add_item(pid(1), 2);
        cart.add_item(pid(1), 3);

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 5);
    }

    #[test]
    fn test_add_item_appends_new_lines_in_order() {
        let mut cart = Cart::in_memory();
        cart.add_item(pid(2), 1);
        cart.add_item(pid(1), 1);
        cart.add_item(pid(3), 1);

        let ids: Vec<i64> = cart.lines().iter().map(|l| l.product_id.as_i64()).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn test_add_item_zero_is_noop() {
        let mut cart = Cart::in_memory();
        cart.add_item(pid(1), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_replaces() {
        let mut cart = Cart::in_memory();
        cart.add_item(pid(1), 2);
        cart.update_quantity(pid(1), 7);

        assert_eq!(cart.lines()[0].quantity, 7);
    }

    #[test]
    fn test_update_quantity_zero_removes_line() {
        let mut cart = Cart::in_memory();
        cart.add_item(pid(1), 9);
        cart.update_quantity(pid(1), 0);

        assert!(cart.lines().iter().all(|l| l.product_id != pid(1)));
    }

    #[test]
    fn test_update_quantity_absent_product_is_noop() {
        let mut cart = Cart::in_memory();
        cart.add_item(pid(1), 1);

        cart.update_quantity(pid(99), 0);
        cart.update_quantity(pid(99), 5);

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.total_items(), 1);
    }

    #[test]
    fn test_remove_item_absent_is_noop() {
        let mut cart = Cart::in_memory();
        cart.add_item(pid(1), 2);
        cart.remove_item(pid(42));

        assert_eq!(cart.total_items(), 2);
    }

    #[test]
    fn test_clear_then_total_is_zero() {
        let mut cart = Cart::in_memory();
        cart.add_item(pid(1), 2);
        cart.add_item(pid(2), 3);
        cart.clear();
        cart.clear(); // idempotent

        assert_eq!(cart.total_items(), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_total_items() {
        let mut cart = Cart::in_memory();
        assert_eq!(cart.total_items(), 0);

        cart.add_item(pid(1), 2);
        cart.add_item(pid(2), 3);
        assert_eq!(cart.total_items(), 5);
    }

    #[test]
    fn test_total_price_with_map() {
        let mut cart = Cart::in_memory();
        cart.add_item(pid(1), 2);
        cart.add_item(pid(2), 3);

        let prices = HashMap::from([
            (pid(1), Decimal::new(10, 0)),
            (pid(2), Decimal::new(20, 0)),
        ]);
        assert_eq!(cart.total_price(Some(&prices)), Decimal::new(80, 0));
    }

    #[test]
    fn test_total_price_missing_entry_contributes_zero() {
        let mut cart = Cart::in_memory();
        cart.add_item(pid(1), 2);
        cart.add_item(pid(2), 3);

        let prices = HashMap::from([(pid(1), Decimal::new(10, 0))]);
        assert_eq!(cart.total_price(Some(&prices)), Decimal::new(20, 0));
    }

    #[test]
    fn test_total_price_without_map_is_zero() {
        let mut cart = Cart::in_memory();
        cart.add_item(pid(1), 2);

        assert_eq!(cart.total_price(None), Decimal::ZERO);
    }

    #[test]
    fn test_mutations_write_through_to_store() {
        let dir = std::env::temp_dir().join(format!(
            "souq-cart-{}-{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        let store = JsonFileStore::new(&dir);

        {
            let mut cart = Cart::load(Box::new(store.clone()));
            cart.add_item(pid(1), 2);
            cart.add_item(pid(2), 1);
            cart.remove_item(pid(2));
        }

        // A fresh engine sees the persisted state
        let cart = Cart::load(Box::new(store));
        assert_eq!(cart.total_items(), 2);
        assert_eq!(cart.distinct_product_ids(), vec![pid(1)]);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
