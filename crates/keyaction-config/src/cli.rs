//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// keyaction command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "keyaction-demo", about = "Action-mapped keyboard input demo")]
pub struct CliArgs {
    /// Log level (error, warn, info, debug, trace) or a full filter string.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Disable the JSON log file.
    #[arg(long)]
    pub no_log_file: bool,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        if args.no_log_file {
            self.debug.log_to_file = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs::parse_from(["keyaction-demo", "--log-level", "debug", "--no-log-file"]);
        config.apply_cli_overrides(&args);
        assert_eq!(config.debug.log_level, "debug");
        assert!(!config.debug.log_to_file);
        // Non-overridden fields retain defaults
        assert!(config.input.actions.is_empty());
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        let args = CliArgs::parse_from(["keyaction-demo"]);
        config.apply_cli_overrides(&args);
        assert_eq!(config, original);
        assert!(args.config.is_none());
    }

    #[test]
    fn test_cli_config_path() {
        let args = CliArgs::parse_from(["keyaction-demo", "--config", "/tmp/keyaction"]);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/keyaction")));
    }
}
