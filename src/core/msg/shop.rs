//! Backend results delivered back into the update loop

use serde::{Deserialize, Serialize};

use crate::domain::{
    request::RequestId,
    shop::{Order, Product, ProductId, ProductPatch, Session},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ShopReply {
    Products(Vec<Product>),
    ProductCreated(Product),
    ProductUpdated { id: ProductId, patch: ProductPatch },
    ProductDeleted(ProductId),
    Orders(Vec<Order>),
    OrderPlaced(Order),
    Authenticated(Session),
    SessionRestored(Option<Session>),
}

/// Settled backend request. The error side is the user-facing message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopResponse {
    pub request: RequestId,
    pub result: Result<ShopReply, String>,
}

impl ShopResponse {
    pub fn ok(request: RequestId, reply: ShopReply) -> Self {
        Self {
            request,
            result: Ok(reply),
        }
    }

    pub fn err(request: RequestId, message: impl Into<String>) -> Self {
        Self {
            request,
            result: Err(message.into()),
        }
    }

    /// Outcome with the payload erased, as tracked by screen slots
    pub fn outcome(&self) -> Result<(), &str> {
        match &self.result {
            Ok(_) => Ok(()),
            Err(message) => Err(message.as_str()),
        }
    }
}
