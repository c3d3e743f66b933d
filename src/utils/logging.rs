//! Logging utilities

use std::{env, fs};

use color_eyre::eyre::Result;
use tracing_error::ErrorLayer;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use super::paths::{get_data_dir, LOG_ENV, LOG_FILE};

/// Used when neither `RUST_LOG` nor `SHOPTUI_LOGLEVEL` is set
pub fn default_filter() -> String {
    format!(
        "{}=info,reqwest=warn,hyper=warn,hyper_util=warn",
        env!("CARGO_CRATE_NAME")
    )
}

/// `RUST_LOG` wins over `SHOPTUI_LOGLEVEL`
fn filter_directives() -> String {
    env::var("RUST_LOG")
        .or_else(|_| env::var(LOG_ENV.as_str()))
        .unwrap_or_else(|_| default_filter())
}

/// Logs go to a file in the data dir; the terminal belongs to the UI.
pub fn initialize_logging() -> Result<()> {
    let directory = get_data_dir();
    fs::create_dir_all(&directory)?;
    let log_file = fs::File::create(directory.join(LOG_FILE.as_str()))?;

    let filter = EnvFilter::try_new(filter_directives())
        .unwrap_or_else(|_| EnvFilter::new(default_filter()));
    let file_layer = fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(ErrorLayer::default())
        .try_init()?;
    Ok(())
}
