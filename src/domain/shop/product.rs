use serde::{Deserialize, Serialize};

use super::{ProductId, UserId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub owner_id: UserId,
    pub title: String,
    pub image_url: String,
    pub description: String,
    pub price: f64,
}

impl Product {
    pub fn new(
        id: impl Into<ProductId>,
        owner_id: impl Into<UserId>,
        title: impl Into<String>,
        image_url: impl Into<String>,
        description: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            owner_id: owner_id.into(),
            title: title.into(),
            image_url: image_url.into(),
            description: description.into(),
            price,
        }
    }

    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.owner_id == user_id
    }

    /// Applies an edit. Price is fixed once a product exists.
    pub fn apply(&mut self, patch: &ProductPatch) {
        self.title.clone_from(&patch.title);
        self.description.clone_from(&patch.description);
        self.image_url.clone_from(&patch.image_url);
    }
}

/// Fields submitted when creating a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub price: f64,
}

/// Fields submitted when editing a product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPatch {
    pub title: String,
    pub description: String,
    pub image_url: String,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_apply_patch_keeps_price() {
        let mut product = Product::new("p1", "u1", "Red Shirt", "img", "A red t-shirt", 29.99);
        product.apply(&ProductPatch {
            title: "Blue Shirt".to_string(),
            description: "A blue t-shirt".to_string(),
            image_url: "img2".to_string(),
        });

        assert_eq!(product.title, "Blue Shirt");
        assert_eq!(product.description, "A blue t-shirt");
        assert_eq!(product.image_url, "img2");
        assert_eq!(product.price, 29.99);
    }

    #[test]
    fn test_is_owned_by() {
        let product = Product::new("p1", "u1", "Mug", "img", "desc", 1.0);
        assert!(product.is_owned_by(&UserId::from("u1")));
        assert!(!product.is_owned_by(&UserId::from("u2")));
    }
}
