use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    domain::shop::{
        Order, OrderId, OrderLine, Product, ProductDraft, ProductId, ProductPatch, Session, UserId,
    },
    infrastructure::backend::{ShopBackend, ShopError, ShopResult},
};

/// Lifetime of issued sessions, matching identity-toolkit tokens
pub const SESSION_TTL_SECS: i64 = 3600;

pub const DEMO_EMAIL: &str = "test@test.com";
pub const DEMO_PASSWORD: &str = "tester";

#[derive(Debug, Clone)]
struct Account {
    password: String,
    user_id: UserId,
}

#[derive(Debug, Default)]
struct Data {
    products: Vec<Product>,
    orders: HashMap<UserId, Vec<Order>>,
    accounts: HashMap<String, Account>,
    tokens: HashMap<String, UserId>,
}

/// In-process backend for tests and offline use
#[derive(Debug)]
pub struct MemoryBackend {
    data: Mutex<Data>,
    session_ttl: Duration,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self {
            data: Mutex::new(Data::default()),
            session_ttl: Duration::seconds(SESSION_TTL_SECS),
        }
    }

    /// Demo catalog plus the `test@test.com` / `tester` account owning half of it
    pub fn with_demo_data() -> Self {
        let backend = Self::new();
        let mut data = Data {
            products: demo_products(),
            ..Default::default()
        };
        data.accounts.insert(
            DEMO_EMAIL.to_string(),
            Account {
                password: DEMO_PASSWORD.to_string(),
                user_id: UserId::from("u1"),
            },
        );
        Self {
            data: Mutex::new(data),
            ..backend
        }
    }

    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }

    fn issue(&self, data: &mut Data, user_id: UserId) -> Session {
        let token = Uuid::new_v4().to_string();
        data.tokens.insert(token.clone(), user_id.clone());
        Session::starting_at(token, user_id, Utc::now(), self.session_ttl)
    }
}

impl Data {
    /// Resolves the caller, rejecting unknown or expired tokens
    fn authorize(&self, session: &Session) -> ShopResult<UserId> {
        if !session.is_live(Utc::now()) {
            return Err(ShopError::Unauthenticated);
        }
        match self.tokens.get(session.token.expose()) {
            Some(user_id) if user_id == &session.user_id => Ok(user_id.clone()),
            _ => Err(ShopError::Unauthenticated),
        }
    }

    fn owned_product(&mut self, user_id: &UserId, id: &ProductId) -> ShopResult<&mut Product> {
        let product = self
            .products
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| ShopError::ProductNotFound(id.clone()))?;
        if !product.is_owned_by(user_id) {
            return Err(ShopError::Forbidden);
        }
        Ok(product)
    }
}

#[async_trait]
impl ShopBackend for MemoryBackend {
    async fn fetch_products(&self) -> ShopResult<Vec<Product>> {
        Ok(self.data.lock().await.products.clone())
    }

    async fn create_product(&self, session: &Session, draft: ProductDraft) -> ShopResult<Product> {
        let mut data = self.data.lock().await;
        let owner = data.authorize(session)?;
        let product = Product {
            id: ProductId::new(Uuid::new_v4().to_string()),
            owner_id: owner,
            title: draft.title,
            image_url: draft.image_url,
            description: draft.description,
            price: draft.price,
        };
        data.products.push(product.clone());
        Ok(product)
    }

    async fn update_product(
        &self,
        session: &Session,
        id: &ProductId,
        patch: &ProductPatch,
    ) -> ShopResult<()> {
        let mut data = self.data.lock().await;
        let user_id = data.authorize(session)?;
        data.owned_product(&user_id, id)?.apply(patch);
        Ok(())
    }

    async fn delete_product(&self, session: &Session, id: &ProductId) -> ShopResult<()> {
        let mut data = self.data.lock().await;
        let user_id = data.authorize(session)?;
        data.owned_product(&user_id, id)?;
        data.products.retain(|p| &p.id != id);
        Ok(())
    }

    async fn fetch_orders(&self, session: &Session) -> ShopResult<Vec<Order>> {
        let data = self.data.lock().await;
        let user_id = data.authorize(session)?;
        let mut orders = data.orders.get(&user_id).cloned().unwrap_or_default();
        orders.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(orders)
    }

    async fn add_order(
        &self,
        session: &Session,
        items: Vec<OrderLine>,
        total_amount: f64,
    ) -> ShopResult<Order> {
        let mut data = self.data.lock().await;
        let user_id = data.authorize(session)?;
        let order = Order {
            id: OrderId::new(Uuid::new_v4().to_string()),
            items,
            total_amount,
            date: Utc::now(),
        };
        data.orders.entry(user_id).or_default().insert(0, order.clone());
        Ok(order)
    }

    async fn login(&self, email: &str, password: &str) -> ShopResult<Session> {
        let mut data = self.data.lock().await;
        let account = data
            .accounts
            .get(&email.to_lowercase())
            .cloned()
            .ok_or(ShopError::EmailNotFound)?;
        if account.password != password {
            return Err(ShopError::InvalidPassword);
        }
        Ok(self.issue(&mut data, account.user_id))
    }

    async fn signup(&self, email: &str, password: &str) -> ShopResult<Session> {
        let mut data = self.data.lock().await;
        let email = email.to_lowercase();
        if data.accounts.contains_key(&email) {
            return Err(ShopError::EmailExists);
        }
        let user_id = UserId::new(Uuid::new_v4().to_string());
        data.accounts.insert(
            email,
            Account {
                password: password.to_string(),
                user_id: user_id.clone(),
            },
        );
        Ok(self.issue(&mut data, user_id))
    }
}

fn demo_products() -> Vec<Product> {
    vec![
        Product::new(
            "p1",
            "u1",
            "Red Shirt",
            "https://cdn.pixabay.com/photo/2016/10/02/22/17/red-t-shirt-1710578_1280.jpg",
            "A red t-shirt, perfect for days with non-red weather.",
            29.99,
        ),
        Product::new(
            "p2",
            "u1",
            "Blue Carpet",
            "https://images.pexels.com/photos/6292/blue-pattern-texture-macro.jpg",
            "Fits your red shirt perfectly. To stand on. Not to wear it.",
            99.99,
        ),
        Product::new(
            "p3",
            "u2",
            "Coffee Mug",
            "https://images.pexels.com/photos/160834/coffee-cup-and-saucer-black-coffee-loose-coffee-beans-160834.jpeg",
            "Can also be used for tea!",
            8.99,
        ),
        Product::new(
            "p4",
            "u3",
            "The Book - Limited Edition",
            "https://images.pexels.com/photos/46274/pexels-photo-46274.jpeg",
            "What the content is? Why would that matter? It's a limited edition!",
            15.99,
        ),
        Product::new(
            "p5",
            "u3",
            "PowerBook",
            "https://get.pxhere.com/photo/laptop-computer-macbook-mac-screen-water-board-keyboard-technology-air-mouse-photo-airport-aircraft-tablet-aviation-office-black-monitor-keys-graphic-hardware-image-pc-exhibition-multimedia-calculator-vector-water-cooling-floppy-disk-phased-out-desktop-computer-netbook-personal-computer-computer-monitor-electronic-device-computer-hardware-display-device-448748.jpg",
            "Awesome hardware, crappy keyboard and a hefty price. Buy now before a new one is released!",
            2299.99,
        ),
        Product::new(
            "p6",
            "u1",
            "Pen & Paper",
            "https://cdn.pixabay.com/photo/2015/10/03/02/14/pen-969298_1280.jpg",
            "Can be used for role-playing (not the kind of role-playing you're thinking about...).",
            5.49,
        ),
    ]
}
