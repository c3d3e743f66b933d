//! Domain logic
//!
//! This module contains pure storefront logic with no I/O:
//! - Store entities (products, cart, orders, session)
//! - Form validity reducer
//! - Route graph and navigator
//! - Request tracking for loading/error brackets
//! - Text formatting utilities

pub mod form;
pub mod navigation;
pub mod request;
pub mod shop;
pub mod text;
