//! Store reducer messages

use serde::{Deserialize, Serialize};

use crate::domain::shop::{Order, Product, ProductId, ProductPatch, Session};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProductsMsg {
    Set(Vec<Product>),
    Created(Product),
    Updated { id: ProductId, patch: ProductPatch },
    Deleted(ProductId),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CartMsg {
    Add(Product),
    RemoveOne(ProductId),
    RemoveProduct(ProductId),
    Clear,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OrdersMsg {
    Set(Vec<Order>),
    Placed(Order),
    Clear,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionMsg {
    /// Fresh login or sign-up; persisted
    SignedIn(Session),
    /// Loaded from the session store at startup
    Restored(Session),
    Logout,
    Expired,
}
