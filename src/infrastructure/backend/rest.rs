use std::{collections::BTreeMap, time::Duration};

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{
    domain::shop::{
        Order, OrderId, OrderLine, Product, ProductDraft, ProductId, ProductPatch, Session, UserId,
    },
    infrastructure::backend::{ShopBackend, ShopError, ShopResult},
};

/// Realtime-database REST API plus identity-toolkit accounts endpoint
#[derive(Debug, Clone)]
pub struct RestBackend {
    client: Client,
    database_url: String,
    auth_url: String,
    api_key: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductRecord {
    title: String,
    description: String,
    image_url: String,
    price: f64,
    owner_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProductPatchRecord<'a> {
    title: &'a str,
    description: &'a str,
    image_url: &'a str,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrderLineRecord {
    product_id: String,
    product_title: String,
    product_price: f64,
    quantity: u32,
    sum: f64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrderRecord {
    #[serde(default)]
    cart_items: Vec<OrderLineRecord>,
    total_amount: f64,
    date: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct Created {
    name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthReply {
    id_token: String,
    local_id: String,
    expires_in: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl From<OrderLineRecord> for OrderLine {
    fn from(r: OrderLineRecord) -> Self {
        OrderLine {
            product_id: ProductId::new(r.product_id),
            product_title: r.product_title,
            product_price: r.product_price,
            quantity: r.quantity,
            sum: r.sum,
        }
    }
}

impl From<&OrderLine> for OrderLineRecord {
    fn from(line: &OrderLine) -> Self {
        OrderLineRecord {
            product_id: line.product_id.to_string(),
            product_title: line.product_title.clone(),
            product_price: line.product_price,
            quantity: line.quantity,
            sum: line.sum,
        }
    }
}

impl RestBackend {
    pub fn new(
        api_key: impl Into<String>,
        database_url: impl Into<String>,
        auth_url: impl Into<String>,
        timeout: Duration,
    ) -> ShopResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            database_url: database_url.into().trim_end_matches('/').to_string(),
            auth_url: auth_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    fn url(&self, segments: &[&str]) -> String {
        let path = segments
            .iter()
            .map(|s| utf8_percent_encode(s, NON_ALPHANUMERIC).to_string())
            .collect::<Vec<_>>()
            .join("/");
        format!("{}/{path}.json", self.database_url)
    }

    fn authed(builder: RequestBuilder, session: &Session) -> RequestBuilder {
        builder.query(&[("auth", session.token.expose())])
    }

    async fn credentials(&self, endpoint: &str, email: &str, password: &str) -> ShopResult<Session> {
        let response = self
            .client
            .post(format!("{}/accounts:{endpoint}", self.auth_url))
            .query(&[("key", self.api_key.as_str())])
            .json(&Credentials {
                email,
                password,
                return_secure_token: true,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let envelope: ErrorEnvelope = response.json().await?;
            return Err(ShopError::from_auth_code(&envelope.error.message));
        }

        let reply: AuthReply = response.json().await?;
        let expires_in = reply
            .expires_in
            .parse::<i64>()
            .map_err(|_| ShopError::InvalidResponse(format!("expiresIn: {}", reply.expires_in)))?;
        Ok(Session::starting_at(
            reply.id_token,
            reply.local_id,
            Utc::now(),
            TimeDelta::seconds(expires_in),
        ))
    }
}

/// Rejects non-success statuses, mapping auth failures to typed errors
async fn checked(response: Response) -> ShopResult<Response> {
    match response.status() {
        status if status.is_success() => Ok(response),
        StatusCode::UNAUTHORIZED => Err(ShopError::Unauthenticated),
        StatusCode::FORBIDDEN => Err(ShopError::Forbidden),
        status => {
            let body = response.text().await.unwrap_or_default();
            log::warn!("Backend replied {status}: {body}");
            Err(ShopError::Network(format!("status {status}")))
        }
    }
}

async fn json<T: DeserializeOwned>(response: Response) -> ShopResult<T> {
    Ok(checked(response).await?.json().await?)
}

#[async_trait]
impl ShopBackend for RestBackend {
    async fn fetch_products(&self) -> ShopResult<Vec<Product>> {
        let response = self.client.get(self.url(&["products"])).send().await?;
        // An empty collection comes back as `null`
        let records: Option<BTreeMap<String, ProductRecord>> = json(response).await?;
        Ok(records
            .unwrap_or_default()
            .into_iter()
            .map(|(id, r)| Product::new(id, r.owner_id, r.title, r.image_url, r.description, r.price))
            .collect())
    }

    async fn create_product(&self, session: &Session, draft: ProductDraft) -> ShopResult<Product> {
        let record = ProductRecord {
            title: draft.title,
            description: draft.description,
            image_url: draft.image_url,
            price: draft.price,
            owner_id: session.user_id.to_string(),
        };
        let request = self.client.post(self.url(&["products"])).json(&record);
        let created: Created = json(Self::authed(request, session).send().await?).await?;
        Ok(Product::new(
            created.name,
            record.owner_id,
            record.title,
            record.image_url,
            record.description,
            record.price,
        ))
    }

    async fn update_product(
        &self,
        session: &Session,
        id: &ProductId,
        patch: &ProductPatch,
    ) -> ShopResult<()> {
        let request = self
            .client
            .patch(self.url(&["products", id.as_str()]))
            .json(&ProductPatchRecord {
                title: &patch.title,
                description: &patch.description,
                image_url: &patch.image_url,
            });
        checked(Self::authed(request, session).send().await?).await?;
        Ok(())
    }

    async fn delete_product(&self, session: &Session, id: &ProductId) -> ShopResult<()> {
        let request = self.client.delete(self.url(&["products", id.as_str()]));
        checked(Self::authed(request, session).send().await?).await?;
        Ok(())
    }

    async fn fetch_orders(&self, session: &Session) -> ShopResult<Vec<Order>> {
        let request = self.client.get(self.url(&["orders", session.user_id.as_str()]));
        let records: Option<BTreeMap<String, OrderRecord>> =
            json(Self::authed(request, session).send().await?).await?;
        let mut orders: Vec<Order> = records
            .unwrap_or_default()
            .into_iter()
            .map(|(id, r)| Order {
                id: OrderId::new(id),
                items: r.cart_items.into_iter().map(OrderLine::from).collect(),
                total_amount: r.total_amount,
                date: r.date,
            })
            .collect();
        orders.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(orders)
    }

    async fn add_order(
        &self,
        session: &Session,
        items: Vec<OrderLine>,
        total_amount: f64,
    ) -> ShopResult<Order> {
        let record = OrderRecord {
            cart_items: items.iter().map(OrderLineRecord::from).collect(),
            total_amount,
            date: Utc::now(),
        };
        let request = self
            .client
            .post(self.url(&["orders", session.user_id.as_str()]))
            .json(&record);
        let created: Created = json(Self::authed(request, session).send().await?).await?;
        Ok(Order {
            id: OrderId::new(created.name),
            items,
            total_amount,
            date: record.date,
        })
    }

    async fn login(&self, email: &str, password: &str) -> ShopResult<Session> {
        self.credentials("signInWithPassword", email, password).await
    }

    async fn signup(&self, email: &str, password: &str) -> ShopResult<Session> {
        self.credentials("signUp", email, password).await
    }
}
