//! Infrastructure layer
//!
//! This module handles external integrations and services:
//! - TUI foundation
//! - CLI argument processing
//! - Configuration loading
//! - Storefront backends and the background shop service
//! - Session persistence

pub mod backend;
pub mod cli;
pub mod config;
pub mod session_store;
pub mod shop_service;
pub mod tui;

use std::{sync::Arc, time::Duration};

use color_eyre::eyre::Result;

use crate::infrastructure::{
    backend::{MemoryBackend, RestBackend, ShopBackend},
    config::{BackendConfig, BackendKind},
};

/// Builds the backend selected in the configuration
pub fn build_backend(config: &BackendConfig) -> Result<Arc<dyn ShopBackend>> {
    config.validate()?;
    let backend: Arc<dyn ShopBackend> = match config.kind {
        BackendKind::Memory => Arc::new(MemoryBackend::with_demo_data()),
        BackendKind::Rest => Arc::new(RestBackend::new(
            config.api_key.clone(),
            config.database_url.clone(),
            config.auth_url.clone(),
            Duration::from_secs(config.timeout_secs),
        )?),
    };
    log::info!("Using {} backend", config.kind);
    Ok(backend)
}
