//! Application store: the read-only snapshot every screen renders from

use crate::{
    core::{
        cmd::Cmd,
        msg::store::{CartMsg, OrdersMsg, ProductsMsg, SessionMsg},
    },
    domain::shop::{Cart, Order, Product, ProductId, ProductPatch, Session, UserId},
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductsState {
    pub available: Vec<Product>,
    /// `available` filtered to the signed-in user's products
    pub user_products: Vec<Product>,
}

impl ProductsState {
    pub fn update(&mut self, msg: ProductsMsg, user_id: Option<&UserId>) {
        match msg {
            ProductsMsg::Set(products) => {
                self.user_products = match user_id {
                    Some(user_id) => products
                        .iter()
                        .filter(|p| p.is_owned_by(user_id))
                        .cloned()
                        .collect(),
                    None => vec![],
                };
                self.available = products;
            }
            ProductsMsg::Created(product) => {
                self.user_products.push(product.clone());
                self.available.push(product);
            }
            ProductsMsg::Updated { id, patch } => {
                Self::patch_in(&mut self.available, &id, &patch);
                Self::patch_in(&mut self.user_products, &id, &patch);
            }
            ProductsMsg::Deleted(id) => {
                self.available.retain(|p| p.id != id);
                self.user_products.retain(|p| p.id != id);
            }
        }
    }

    fn patch_in(products: &mut [Product], id: &ProductId, patch: &ProductPatch) {
        if let Some(product) = products.iter_mut().find(|p| &p.id == id) {
            product.apply(patch);
        }
    }

    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        self.available.iter().find(|p| &p.id == id)
    }

    pub fn find_user_product(&self, id: &ProductId) -> Option<&Product> {
        self.user_products.iter().find(|p| &p.id == id)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartState {
    pub cart: Cart,
}

impl CartState {
    pub fn update(&mut self, msg: CartMsg) {
        match msg {
            CartMsg::Add(product) => self.cart.add(&product),
            CartMsg::RemoveOne(id) => self.cart.remove_one(&id),
            CartMsg::RemoveProduct(id) => self.cart.remove_product(&id),
            CartMsg::Clear => self.cart.clear(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrdersState {
    pub orders: Vec<Order>,
}

impl OrdersState {
    pub fn update(&mut self, msg: OrdersMsg) {
        match msg {
            OrdersMsg::Set(orders) => self.orders = orders,
            OrdersMsg::Placed(order) => self.orders.insert(0, order),
            OrdersMsg::Clear => self.orders.clear(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub current: Option<Session>,
}

impl SessionState {
    pub fn update(&mut self, msg: SessionMsg) -> Vec<Cmd> {
        match msg {
            SessionMsg::SignedIn(session) => {
                self.current = Some(session.clone());
                vec![Cmd::SaveSession(session)]
            }
            SessionMsg::Restored(session) => {
                self.current = Some(session);
                vec![]
            }
            SessionMsg::Logout | SessionMsg::Expired => {
                if self.current.take().is_none() {
                    return vec![];
                }
                vec![Cmd::ClearSession]
            }
        }
    }

    pub fn is_present(&self) -> bool {
        self.current.is_some()
    }

    pub fn user_id(&self) -> Option<&UserId> {
        self.current.as_ref().map(|s| &s.user_id)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use pretty_assertions::assert_eq;

    use super::*;

    fn catalog() -> Vec<Product> {
        vec![
            Product::new("p1", "u1", "Red Shirt", "img", "A red t-shirt", 29.99),
            Product::new("p2", "u2", "Blue Carpet", "img", "Fits your red shirt", 99.99),
            Product::new("p3", "u1", "Coffee Mug", "img", "Can also be used for tea!", 8.99),
        ]
    }

    fn titles(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.title.as_str()).collect()
    }

    #[test]
    fn test_set_products_derives_user_products() {
        let mut products = ProductsState::default();
        products.update(ProductsMsg::Set(catalog()), Some(&UserId::from("u1")));

        assert_eq!(products.available.len(), 3);
        assert_eq!(titles(&products.user_products), vec!["Red Shirt", "Coffee Mug"]);
    }

    #[test]
    fn test_set_products_without_session_has_no_user_products() {
        let mut products = ProductsState::default();
        products.update(ProductsMsg::Set(catalog()), None);
        assert!(products.user_products.is_empty());
    }

    #[test]
    fn test_update_keeps_price_in_both_lists() {
        let mut products = ProductsState::default();
        let user = UserId::from("u1");
        products.update(ProductsMsg::Set(catalog()), Some(&user));
        products.update(
            ProductsMsg::Updated {
                id: ProductId::from("p1"),
                patch: ProductPatch {
                    title: "Green Shirt".to_string(),
                    description: "A green t-shirt".to_string(),
                    image_url: "img2".to_string(),
                },
            },
            Some(&user),
        );

        let id = ProductId::from("p1");
        assert_eq!(products.find(&id).map(|p| p.title.as_str()), Some("Green Shirt"));
        assert_eq!(
            products.find_user_product(&id).map(|p| p.title.as_str()),
            Some("Green Shirt")
        );
        assert_eq!(products.find(&id).map(|p| p.price), Some(29.99));
    }

    #[test]
    fn test_create_and_delete() {
        let mut products = ProductsState::default();
        let user = UserId::from("u1");
        products.update(ProductsMsg::Set(catalog()), Some(&user));
        products.update(
            ProductsMsg::Created(Product::new("p9", "u1", "Pen & Paper", "img", "Write it down", 5.49)),
            Some(&user),
        );
        assert_eq!(products.available.len(), 4);
        assert_eq!(products.user_products.len(), 3);

        products.update(ProductsMsg::Deleted(ProductId::from("p1")), Some(&user));
        assert_eq!(products.find(&ProductId::from("p1")), None);
        assert_eq!(titles(&products.user_products), vec!["Coffee Mug", "Pen & Paper"]);
    }

    #[test]
    fn test_order_placed_is_prepended() {
        let mut orders = OrdersState::default();
        let order = |id: &str| Order {
            id: id.into(),
            items: vec![],
            total_amount: 1.0,
            date: Utc::now(),
        };
        orders.update(OrdersMsg::Set(vec![order("o1")]));
        orders.update(OrdersMsg::Placed(order("o2")));

        let ids: Vec<&str> = orders.orders.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["o2", "o1"]);
    }

    #[test]
    fn test_session_sign_in_saves_and_logout_clears() {
        let mut session = SessionState::default();
        let s = Session::starting_at("token", "u1", Utc::now(), Duration::hours(1));

        assert_eq!(session.update(SessionMsg::SignedIn(s.clone())), vec![Cmd::SaveSession(s)]);
        assert!(session.is_present());

        assert_eq!(session.update(SessionMsg::Logout), vec![Cmd::ClearSession]);
        assert!(!session.is_present());

        // Already signed out
        assert!(session.update(SessionMsg::Expired).is_empty());
    }

    #[test]
    fn test_restored_session_is_not_saved_again() {
        let mut session = SessionState::default();
        let s = Session::starting_at("token", "u1", Utc::now(), Duration::hours(1));
        assert!(session.update(SessionMsg::Restored(s)).is_empty());
        assert_eq!(session.user_id(), Some(&UserId::from("u1")));
    }
}
