//! CLI arguments

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dtao-monitor")]
#[command(version, about = "Monitor dTAO subnet prices and alert on significant moves")]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Keep the machine awake while monitoring (macOS caffeinate)
    #[arg(long)]
    pub keep_awake: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,

    /// Run a single cycle and exit
    #[arg(long)]
    pub once: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["dtao-monitor"]);
        assert_eq!(cli.config, PathBuf::from("config.toml"));
        assert!(!cli.keep_awake);
        assert!(!cli.once);
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from(["dtao-monitor", "--config", "alt.toml", "--keep-awake", "--once"]);
        assert_eq!(cli.config, PathBuf::from("alt.toml"));
        assert!(cli.keep_awake);
        assert!(cli.once);
    }
}
