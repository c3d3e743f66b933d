use clap::Parser;
use color_eyre::eyre::Result;

use shoptui::{
    infrastructure::{build_backend, cli::Cli, config::Config, session_store::SessionStore},
    integration::app_runner::AppRunner,
    utils::{get_data_dir, initialize_logging, initialize_panic_handler},
};

async fn tokio_main() -> Result<()> {
    initialize_logging()?;

    initialize_panic_handler()?;

    let args = <Cli as Parser>::parse();

    let mut config = Config::new()?;
    if let Some(kind) = args.backend {
        config.backend.kind = kind;
    }

    let backend = build_backend(&config.backend)?;
    let sessions = SessionStore::new(&get_data_dir());
    log::info!("Session file: {}", sessions.path().display());

    let mut runner =
        AppRunner::new_with_real(config, args.tick_rate, args.frame_rate, backend, sessions)?;
    runner.run().await?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = tokio_main().await {
        eprintln!("{} error: Something went wrong", env!("CARGO_PKG_NAME"));
        Err(e)
    } else {
        Ok(())
    }
}
