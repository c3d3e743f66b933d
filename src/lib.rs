//! # Shoptui - a storefront in the terminal
//!
//! A terminal client for a small online shop, built with Rust and Ratatui:
//! browse the catalog, fill a cart, place and review orders, and manage the
//! products you own.
//!
//! ## Architecture Overview
//!
//! This crate is organized around the Elm architecture pattern:
//!
//! - **Model** (`core::state`): the application store plus per-screen state
//! - **Message** (`core::msg`): events that can change the state
//! - **Update** (`core::update`): pure functions that transform state
//! - **Command** (`core::cmd`): side effects (backend calls, session file)
//! - **View** (`presentation::components`): rendering from the current state
//!
//! ## Example Usage
//!
//! ```rust
//! use shoptui::{domain::navigation::Route, translate_raw_to_domain, update, AppState, RawMsg};
//!
//! let mut state = AppState::default();
//! let mut commands = vec![];
//! for msg in translate_raw_to_domain(RawMsg::Init, &state) {
//!     let (next, cmds) = update(msg, state);
//!     state = next;
//!     commands.extend(cmds);
//! }
//!
//! // The startup screen is mounted and asks for the persisted session
//! assert_eq!(state.nav.current().map(|entry| entry.route), Some(Route::Startup));
//! assert!(!commands.is_empty());
//! ```
//!
//! ## Modules
//!
//! - [`core`] - state, messages, update and command definitions
//! - [`domain`] - store entities, form validity, navigation graph
//! - [`infrastructure`] - backends, shop service, terminal, config, CLI
//! - [`integration`] - runtime and main loop
//! - [`presentation`] - components, widgets, keybindings and styles
//! - [`utils`] - logging, panic handling, paths

pub mod core;
pub mod domain;
pub mod infrastructure;
pub mod integration;
pub mod presentation;
pub mod utils;

// Re-exports for convenience
pub use crate::core::{
    cmd::Cmd, msg::Msg, raw_msg::RawMsg, state::AppState, translator::translate_raw_to_domain,
    update::update,
};
pub use integration::runtime::{Runtime, RuntimeStats};

/// Result type used throughout the library
pub type Result<T> = color_eyre::eyre::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
