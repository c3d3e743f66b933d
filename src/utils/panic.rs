use std::{panic, process};

use color_eyre::{config::HookBuilder, eyre::Result};
use tracing::error;

use crate::infrastructure::tui::real::restore_terminal;

/// Installs color-eyre hooks and a panic hook that leaves the alternate
/// screen before anything is printed
pub fn initialize_panic_handler() -> Result<()> {
    let (panic_hook, eyre_hook) = HookBuilder::default()
        .panic_section(format!(
            "This is a bug. Consider reporting it at {}",
            env!("CARGO_PKG_REPOSITORY")
        ))
        .capture_span_trace_by_default(false)
        .display_location_section(false)
        .display_env_section(false)
        .into_hooks();
    eyre_hook.install()?;

    panic::set_hook(Box::new(move |panic_info| {
        if let Err(e) = restore_terminal() {
            error!("Unable to restore terminal: {e:?}");
        }

        let report = panic_hook.panic_report(panic_info).to_string();
        log::error!("Error: {}", strip_ansi_escapes::strip_str(&report));

        #[cfg(not(debug_assertions))]
        print_crash_report(panic_info, &report);

        #[cfg(debug_assertions)]
        better_panic::Settings::auto()
            .most_recent_first(false)
            .lineno_suffix(true)
            .verbosity(better_panic::Verbosity::Full)
            .create_panic_handler()(panic_info);

        process::exit(libc::EXIT_FAILURE);
    }));
    Ok(())
}

#[cfg(not(debug_assertions))]
fn print_crash_report(panic_info: &panic::PanicHookInfo<'_>, report: &str) {
    use human_panic::{handle_dump, print_msg, Metadata};

    let meta = Metadata::new(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
        .authors(env!("CARGO_PKG_AUTHORS").replace(':', ", "))
        .homepage(env!("CARGO_PKG_HOMEPAGE"));
    let dump = handle_dump(&meta, panic_info);
    if let Err(e) = print_msg(dump, &meta) {
        eprintln!("human-panic: printing error message to console failed: {e}");
    }
    eprintln!("{report}");
}
