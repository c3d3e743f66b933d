use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Cart, OrderId, ProductId};

/// Snapshot of one cart line at the time the order was placed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub product_title: String,
    pub product_price: f64,
    pub quantity: u32,
    pub sum: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub items: Vec<OrderLine>,
    pub total_amount: f64,
    pub date: DateTime<Utc>,
}

impl Order {
    pub fn readable_date(&self) -> String {
        self.date.format("%B %-d %Y, %H:%M").to_string()
    }

    pub fn lines_from_cart(cart: &Cart) -> Vec<OrderLine> {
        cart.iter()
            .map(|(id, item)| OrderLine {
                product_id: id.clone(),
                product_title: item.product_title.clone(),
                product_price: item.product_price,
                quantity: item.quantity,
                sum: item.sum,
            })
            .collect()
    }
}
