//! Remote storefront operations
//!
//! [`ShopBackend`] is the seam between the background shop service and the
//! outside world. `MemoryBackend` keeps everything in-process (tests and
//! offline demos); `RestBackend` talks to a realtime-database style REST API
//! with identity-toolkit style authentication.

pub mod memory;
pub mod rest;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::shop::{Order, OrderLine, Product, ProductDraft, ProductId, ProductPatch, Session};

pub use memory::MemoryBackend;
pub use rest::RestBackend;

/// Backend failure. `Display` is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShopError {
    #[error("This email exists already!")]
    EmailExists,
    #[error("This email could not be found!")]
    EmailNotFound,
    #[error("This password is not valid!")]
    InvalidPassword,
    #[error("Too many attempts. Please try again later.")]
    TooManyAttempts,
    #[error("Your session is no longer valid. Please log in again.")]
    Unauthenticated,
    #[error("You can only change your own products.")]
    Forbidden,
    #[error("This product does not exist anymore.")]
    ProductNotFound(ProductId),
    #[error("Something went wrong! ({0})")]
    Network(String),
    #[error("Something went wrong! Unexpected response: {0}")]
    InvalidResponse(String),
    #[error("{0}")]
    Other(String),
}

impl ShopError {
    /// Maps identity-toolkit error codes (`EMAIL_EXISTS`, `INVALID_PASSWORD : ...`)
    pub fn from_auth_code(code: &str) -> Self {
        let code = code.split([' ', ':']).next().unwrap_or_default();
        match code {
            "EMAIL_EXISTS" => ShopError::EmailExists,
            "EMAIL_NOT_FOUND" => ShopError::EmailNotFound,
            "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => ShopError::InvalidPassword,
            "TOO_MANY_ATTEMPTS_TRY_LATER" => ShopError::TooManyAttempts,
            "INVALID_ID_TOKEN" | "TOKEN_EXPIRED" | "USER_NOT_FOUND" => ShopError::Unauthenticated,
            _ => ShopError::Other(format!("Authentication failed ({code})")),
        }
    }
}

impl From<reqwest::Error> for ShopError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ShopError::InvalidResponse(e.to_string())
        } else {
            ShopError::Network(e.to_string())
        }
    }
}

pub type ShopResult<T> = Result<T, ShopError>;

#[async_trait]
pub trait ShopBackend: Send + Sync {
    async fn fetch_products(&self) -> ShopResult<Vec<Product>>;

    async fn create_product(&self, session: &Session, draft: ProductDraft) -> ShopResult<Product>;

    /// Price is not part of an update
    async fn update_product(
        &self,
        session: &Session,
        id: &ProductId,
        patch: &ProductPatch,
    ) -> ShopResult<()>;

    async fn delete_product(&self, session: &Session, id: &ProductId) -> ShopResult<()>;

    /// Orders of the session's user, newest first
    async fn fetch_orders(&self, session: &Session) -> ShopResult<Vec<Order>>;

    async fn add_order(
        &self,
        session: &Session,
        items: Vec<OrderLine>,
        total_amount: f64,
    ) -> ShopResult<Order>;

    async fn login(&self, email: &str, password: &str) -> ShopResult<Session>;

    async fn signup(&self, email: &str, password: &str) -> ShopResult<Session>;
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("EMAIL_EXISTS", ShopError::EmailExists)]
    #[case("EMAIL_NOT_FOUND", ShopError::EmailNotFound)]
    #[case("INVALID_PASSWORD", ShopError::InvalidPassword)]
    #[case("TOO_MANY_ATTEMPTS_TRY_LATER : Access disabled", ShopError::TooManyAttempts)]
    #[case("TOKEN_EXPIRED", ShopError::Unauthenticated)]
    fn test_from_auth_code(#[case] code: &str, #[case] expected: ShopError) {
        assert_eq!(ShopError::from_auth_code(code), expected);
    }

    #[test]
    fn test_unknown_code_keeps_code_in_message() {
        let error = ShopError::from_auth_code("WEAK_PASSWORD : Password should be at least 6 characters");
        assert_eq!(error.to_string(), "Authentication failed (WEAK_PASSWORD)");
    }

    #[test]
    fn test_display_is_user_message() {
        assert_eq!(ShopError::InvalidPassword.to_string(), "This password is not valid!");
    }
}
