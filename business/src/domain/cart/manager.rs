use async_trait::async_trait;

use super::model::{CartLine, CartProduct};
use crate::domain::shared::value_objects::ProductId;

/// Read-only view of the cart at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct CartSnapshot {
    pub lines: Vec<CartLine>,
    pub count: u64,
    pub total: f64,
}

/// Cart operations offered to the UI.
///
/// Mutations complete against local state before returning; any server
/// reconciliation happens later and never reports back to the caller.
#[async_trait]
pub trait CartManager: Send + Sync {
    /// Adds `qty` units, merging with an existing line for the same product.
    fn add_item(&self, product: CartProduct, qty: u32);
    fn remove_item(&self, id: &ProductId);
    /// Sets the absolute quantity of a line. `0` removes it.
    fn update_qty(&self, id: &ProductId, qty: u32);
    fn clear_cart(&self);

    fn count(&self) -> u64;
    fn total(&self) -> f64;
    fn snapshot(&self) -> CartSnapshot;

    /// Asks the server for its cart if a session token is present.
    fn refresh(&self);

    /// Resolves once every remote operation queued so far has finished.
    async fn settle(&self);
}
