use clap::Parser;

use crate::{infrastructure::config::BackendKind, utils::version};

#[derive(Parser, Debug)]
#[command(author, version = version(), about)]
pub struct Cli {
    #[arg(
        short,
        long,
        value_name = "FLOAT",
        help = "Tick rate, i.e. number of ticks per second",
        default_value_t = 16.0
    )]
    pub tick_rate: f64,

    #[arg(
        short,
        long,
        value_name = "FLOAT",
        help = "Frame rate, i.e. number of frames per second",
        default_value_t = 60.0
    )]
    pub frame_rate: f64,

    #[arg(
        short,
        long,
        value_enum,
        value_name = "KIND",
        help = "Backend to use instead of the configured one"
    )]
    pub backend: Option<BackendKind>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_defaults() -> color_eyre::Result<()> {
        let cli = Cli::try_parse_from(["shoptui"])?;
        assert_eq!(cli.tick_rate, 16.0);
        assert_eq!(cli.frame_rate, 60.0);
        assert_eq!(cli.backend, None);
        Ok(())
    }

    #[test]
    fn test_backend_override() -> color_eyre::Result<()> {
        let cli = Cli::try_parse_from(["shoptui", "--backend", "rest", "-t", "4"])?;
        assert_eq!(cli.backend, Some(BackendKind::Rest));
        assert_eq!(cli.tick_rate, 4.0);
        assert!(Cli::try_parse_from(["shoptui", "--backend", "ftp"]).is_err());
        Ok(())
    }
}
