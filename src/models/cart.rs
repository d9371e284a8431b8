use crate::models::Product;
use serde::{Deserialize, Serialize};

/// One cart line. The product snapshot is embedded so the cart survives
/// catalog edits between add-to-cart and checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: String,
    pub quantity: u32,
    pub product: Product,
}

/// The client-local cart: a set of lines keyed by product id. Quantity is
/// always >= 1 — dropping to zero removes the line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new(items: Vec<CartItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Merges into an existing line when the product is already present,
    /// otherwise appends a new line. No stock check at this layer.
    pub fn add(&mut self, product: Product, quantity: u32) {
        if quantity == 0 {
            return;
        }
        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product.id) {
            item.quantity += quantity;
        } else {
            self.items.push(CartItem {
                product_id: product.id.clone(),
                quantity,
                product,
            });
        }
    }

    pub fn remove(&mut self, product_id: &str) {
        self.items.retain(|i| i.product_id != product_id);
    }

    /// Quantity <= 0 is equivalent to removal.
    pub fn update_quantity(&mut self, product_id: &str, quantity: u32) {
        if quantity == 0 {
            self.remove(product_id);
        } else if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product_id) {
            item.quantity = quantity;
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of line price x quantity over the embedded snapshots. Computed
    /// client-side at order time and never recomputed afterwards.
    pub fn total(&self) -> f64 {
        self.items
            .iter()
            .map(|i| i.product.price * i.quantity as f64)
            .sum()
    }
}
