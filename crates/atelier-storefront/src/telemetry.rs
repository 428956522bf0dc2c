//! Log subscriber setup.

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::StorefrontError;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per line.
    Json,
    /// Human-readable lines.
    #[default]
    Human,
}

/// Install the global subscriber.
///
/// `RUST_LOG` wins over `default_level` when set. Logs go to stderr. Fails
/// if a subscriber is already installed.
pub fn init(format: LogFormat, default_level: &str) -> Result<(), StorefrontError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| StorefrontError::Config(format!("invalid log level: {}", e)))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let result = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Human => builder.try_init(),
    };
    result.map_err(|e| StorefrontError::Config(format!("logging already initialised: {}", e)))
}
