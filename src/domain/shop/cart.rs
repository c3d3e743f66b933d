use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Product, ProductId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub quantity: u32,
    pub product_price: f64,
    pub product_title: String,
    pub sum: f64,
}

/// Product id to accumulated quantity and subtotal
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    items: BTreeMap<ProductId, CartItem>,
}

impl Cart {
    pub fn add(&mut self, product: &Product) {
        self.items
            .entry(product.id.clone())
            .and_modify(|item| {
                item.quantity += 1;
                item.sum += item.product_price;
            })
            .or_insert_with(|| CartItem {
                quantity: 1,
                product_price: product.price,
                product_title: product.title.clone(),
                sum: product.price,
            });
    }

    /// Removes one unit; the line disappears when its quantity reaches zero.
    pub fn remove_one(&mut self, id: &ProductId) {
        let Some(item) = self.items.get_mut(id) else {
            return;
        };
        if item.quantity > 1 {
            item.quantity -= 1;
            item.sum -= item.product_price;
        } else {
            self.items.remove(id);
        }
    }

    /// Drops the whole line, e.g. when the product itself was deleted.
    pub fn remove_product(&mut self, id: &ProductId) {
        self.items.remove(id);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn total_amount(&self) -> f64 {
        self.items.values().map(|item| item.sum).sum()
    }

    pub fn get(&self, id: &ProductId) -> Option<&CartItem> {
        self.items.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ProductId, &CartItem)> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
