//! Integration layer
//!
//! This module wires the pure core to the outside world:
//! - Runtime (message queues and command execution)
//! - Renderer over the shared terminal handle
//! - AppRunner main loop

pub mod app_runner;
pub mod renderer;
pub mod runtime;
