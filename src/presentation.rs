//! Presentation layer
//!
//! This module contains UI components and widgets:
//! - Per-screen components and overlays (drawer, help, alerts)
//! - Reusable widgets
//! - Configuration (styles, keybindings)

pub mod components;
pub mod config;
pub mod widgets;
