//! Structured logging for keyaction applications.
//!
//! Sets up a `tracing` subscriber with console output, an optional JSON log
//! file in debug builds, and filtering from `RUST_LOG` or the configured
//! `debug.log_level`.

use std::path::{Path, PathBuf};

use keyaction_config::Config;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_FILTER: &str = "info,winit=warn";

/// Name of the JSON log file inside the log directory.
pub const LOG_FILE: &str = "keyaction.log";

/// Filter directives for `config`: its `log_level` when set, plus the
/// `winit=warn` noise cap unless the level already mentions winit.
#[must_use]
pub fn filter_directives(config: Option<&Config>) -> String {
    match config.map(|c| c.debug.log_level.trim()) {
        Some(level) if !level.is_empty() => {
            if level.contains("winit") {
                level.to_string()
            } else {
                format!("{level},winit=warn")
            }
        }
        _ => DEFAULT_FILTER.to_string(),
    }
}

/// Where the JSON log goes, if file logging applies to this run.
#[must_use]
pub fn log_file_path(log_dir: Option<&Path>, debug_build: bool, config: Option<&Config>) -> Option<PathBuf> {
    let enabled = config.is_none_or(|c| c.debug.log_to_file);
    if debug_build && enabled {
        log_dir.map(|dir| dir.join(LOG_FILE))
    } else {
        None
    }
}

/// Initialize the global tracing subscriber.
///
/// - Console output with uptime timestamps, targets and levels
/// - JSON file logging in debug builds when `log_dir` is given
/// - `RUST_LOG` wins over the config's `log_level`
///
/// # Examples
///
/// ```no_run
/// use keyaction_config::Config;
/// use keyaction_log::init_logging;
///
/// let config = Config::default();
/// init_logging(Some(std::path::Path::new("./logs")), cfg!(debug_assertions), Some(&config));
/// ```
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, config: Option<&Config>) {
    let filter_str = filter_directives(config);
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_names(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if let Some(log_path) = log_file_path(log_dir, debug_build, config)
        && let Some(dir) = log_path.parent()
        && std::fs::create_dir_all(dir).is_ok()
        && let Ok(log_file) = std::fs::File::create(&log_path)
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        subscriber.with(file_layer).init();
        return;
    }

    subscriber.init();
}
