use serde::{Deserialize, Serialize};

use crate::domain::shared::value_objects::ProductId;

/// One product-and-quantity entry of the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub id: ProductId,
    pub name: String,
    /// Unit price captured when the line was added.
    pub price: f64,
    pub qty: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Forwarded to the remote cart; not part of line identity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<String>,
}

impl CartLine {
    pub fn line_total(&self) -> f64 {
        f64::from(self.qty) * self.price
    }
}

/// What a caller hands to `add_item`: a cart line without its quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct CartProduct {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub image_url: Option<String>,
    pub variant_id: Option<String>,
}

impl CartProduct {
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image_url: None,
            variant_id: None,
        }
    }

    pub fn with_image(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    pub fn with_variant(mut self, variant_id: impl Into<String>) -> Self {
        self.variant_id = Some(variant_id.into());
        self
    }

    fn into_line(self, qty: u32) -> CartLine {
        CartLine {
            id: self.id,
            name: self.name,
            price: self.price,
            qty,
            image_url: self.image_url,
            variant_id: self.variant_id,
        }
    }
}

/// Ordered cart lines, at most one per product id.
///
/// `count` and `total` are always derived from the lines.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a cart from an external list (storage, server snapshot).
    ///
    /// Duplicate ids are merged by summing their quantities and zero-quantity
    /// lines are dropped, keeping the first occurrence's position and fields.
    pub fn from_lines(lines: impl IntoIterator<Item = CartLine>) -> Self {
        let mut cart = Self::new();
        for line in lines {
            if line.qty == 0 {
                continue;
            }
            match cart.position(&line.id) {
                Some(index) => {
                    let existing = &mut cart.lines[index];
                    existing.qty = existing.qty.saturating_add(line.qty);
                }
                None => cart.lines.push(line),
            }
        }
        cart
    }

    /// Parses the persisted form: a JSON array of lines.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let lines: Vec<CartLine> = serde_json::from_str(raw)?;
        Ok(Self::from_lines(lines))
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.lines)
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| &line.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of quantities across lines.
    pub fn count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.qty)).sum()
    }

    /// Sum of quantity × unit price across lines.
    pub fn total(&self) -> f64 {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Increments the existing line or appends a new one. Returns `false` when
    /// nothing changed (`qty == 0`).
    pub fn add(&mut self, product: CartProduct, qty: u32) -> bool {
        if qty == 0 {
            return false;
        }
        match self.position(&product.id) {
            Some(index) => {
                let existing = &mut self.lines[index];
                existing.qty = existing.qty.saturating_add(qty);
            }
            None => self.lines.push(product.into_line(qty)),
        }
        true
    }

    /// Removes every line for `id`, returning the first removed line.
    pub fn remove(&mut self, id: &ProductId) -> Option<CartLine> {
        let removed = self.line(id).cloned();
        self.lines.retain(|line| &line.id != id);
        removed
    }

    /// Sets the quantity of the matching line; `0` removes it. Returns the
    /// line as it was before the change, if any.
    pub fn set_qty(&mut self, id: &ProductId, qty: u32) -> Option<CartLine> {
        if qty == 0 {
            return self.remove(id);
        }
        let index = self.position(id)?;
        let line = &mut self.lines[index];
        let previous = line.clone();
        line.qty = qty;
        Some(previous)
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    fn position(&self, id: &ProductId) -> Option<usize> {
        self.lines.iter().position(|line| &line.id == id)
    }
}
