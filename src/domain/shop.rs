mod cart;
mod order;
mod product;
mod secret;
mod session;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use cart::{Cart, CartItem};
pub use order::{Order, OrderLine};
pub use product::{Product, ProductDraft, ProductPatch};
pub use secret::Secret;
pub use session::Session;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id!(
    /// Backend-assigned product key
    ProductId
);
string_id!(
    /// Backend-assigned order key
    OrderId
);
string_id!(
    /// Account id of the signed-in user (owner of admin products)
    UserId
);

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_ids_display_and_serialize_transparently() -> color_eyre::Result<()> {
        let id = ProductId::from("p1");
        assert_eq!(id.to_string(), "p1");
        assert_eq!(serde_json::to_string(&id)?, "\"p1\"");

        let back: ProductId = serde_json::from_str("\"p1\"")?;
        assert_eq!(back, id);
        Ok(())
    }
}
