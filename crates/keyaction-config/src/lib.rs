//! Configuration for keyaction applications.
//!
//! Settings persist to disk as a RON file. Supports CLI overrides via clap,
//! hot-reload detection, and forward/backward compatible serialization.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{Config, DebugConfig, InputConfig};
pub use error::ConfigError;
