use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::model::{Cart, CartLine};
use crate::domain::auth::token::AuthToken;
use crate::domain::errors::RemoteCartError;
use crate::domain::shared::value_objects::ProductId;

/// A line as the remote cart service reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteCartLine {
    pub product_id: ProductId,
    pub qty: u32,
    pub price: f64,
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub variant_id: Option<String>,
}

impl From<RemoteCartLine> for CartLine {
    fn from(line: RemoteCartLine) -> Self {
        CartLine {
            id: line.product_id,
            name: line.title,
            price: line.price,
            qty: line.qty,
            image_url: line.image,
            variant_id: line.variant_id,
        }
    }
}

/// Authoritative cart snapshot returned by every remote cart operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteCart {
    pub items: Vec<RemoteCartLine>,
    #[serde(default)]
    pub total: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_summary: Option<serde_json::Value>,
}

impl RemoteCart {
    /// Maps every remote line to exactly one local line.
    pub fn into_cart(self) -> Cart {
        Cart::from_lines(self.items.into_iter().map(CartLine::from))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    pub product_id: ProductId,
    pub qty: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemRequest {
    pub product_id: ProductId,
    pub qty: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveItemRequest {
    pub product_id: ProductId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<String>,
}

/// Service port for the server-side cart.
///
/// Every operation answers with the full cart snapshot after the change.
#[async_trait]
pub trait RemoteCartService: Send + Sync {
    async fn fetch_cart(&self, token: &AuthToken) -> Result<RemoteCart, RemoteCartError>;
    async fn add_item(
        &self,
        token: &AuthToken,
        request: &AddItemRequest,
    ) -> Result<RemoteCart, RemoteCartError>;
    async fn update_item(
        &self,
        token: &AuthToken,
        request: &UpdateItemRequest,
    ) -> Result<RemoteCart, RemoteCartError>;
    async fn remove_item(
        &self,
        token: &AuthToken,
        request: &RemoveItemRequest,
    ) -> Result<RemoteCart, RemoteCartError>;
    async fn clear_cart(&self, token: &AuthToken) -> Result<RemoteCart, RemoteCartError>;
}
