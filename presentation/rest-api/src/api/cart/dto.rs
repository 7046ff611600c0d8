use poem_openapi::Object;

use business::domain::cart::manager::CartSnapshot;
use business::domain::cart::model::{CartLine, CartProduct};

/// Rejections for malformed cart requests.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CartRequestError {
    #[error("cart.invalid_id")]
    InvalidId,
    #[error("cart.name_empty")]
    NameEmpty,
    #[error("cart.invalid_price")]
    InvalidPrice,
    #[error("cart.invalid_qty")]
    InvalidQty,
}

#[derive(Debug, Clone, Object)]
pub struct AddCartItemRequest {
    /// Product identifier
    pub id: String,
    /// Display name snapshot
    pub name: String,
    /// Unit price
    pub price: f64,
    /// Units to add (default: 1)
    #[oai(skip_serializing_if_is_none)]
    pub qty: Option<u32>,
    /// Display image reference
    #[oai(skip_serializing_if_is_none)]
    pub image_url: Option<String>,
    /// Product variant, forwarded to the server cart
    #[oai(skip_serializing_if_is_none)]
    pub variant_id: Option<String>,
}

impl AddCartItemRequest {
    pub fn into_product(self) -> Result<(CartProduct, u32), CartRequestError> {
        let id = validate_id(&self.id)?;
        if self.name.trim().is_empty() {
            return Err(CartRequestError::NameEmpty);
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(CartRequestError::InvalidPrice);
        }
        let qty = self.qty.unwrap_or(1);
        if qty == 0 {
            return Err(CartRequestError::InvalidQty);
        }

        let product = CartProduct {
            id: id.into(),
            name: self.name,
            price: self.price,
            image_url: self.image_url,
            variant_id: self.variant_id,
        };
        Ok((product, qty))
    }
}

#[derive(Debug, Clone, Object)]
pub struct UpdateQuantityRequest {
    /// New absolute quantity; 0 removes the line
    pub qty: u32,
}

#[derive(Debug, Clone, Object)]
pub struct CartLineResponse {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub qty: u32,
    #[oai(skip_serializing_if_is_none)]
    pub image_url: Option<String>,
    #[oai(skip_serializing_if_is_none)]
    pub variant_id: Option<String>,
}

impl From<CartLine> for CartLineResponse {
    fn from(line: CartLine) -> Self {
        Self {
            id: line.id.to_string(),
            name: line.name,
            price: line.price,
            qty: line.qty,
            image_url: line.image_url,
            variant_id: line.variant_id,
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct CartResponse {
    pub lines: Vec<CartLineResponse>,
    /// Sum of quantities
    pub count: u64,
    /// Sum of quantity × price
    pub total: f64,
}

impl From<CartSnapshot> for CartResponse {
    fn from(snapshot: CartSnapshot) -> Self {
        Self {
            lines: snapshot.lines.into_iter().map(Into::into).collect(),
            count: snapshot.count,
            total: snapshot.total,
        }
    }
}

/// Product ids arrive from path segments and bodies; blank ones are refused.
pub fn validate_id(raw: &str) -> Result<String, CartRequestError> {
    let id = raw.trim();
    if id.is_empty() {
        return Err(CartRequestError::InvalidId);
    }
    Ok(id.to_string())
}
