//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use atelier_auth::UserSession;
use atelier_storefront::{AppState, StorefrontApi, StorefrontConfig};

use crate::output::Output;

const CONFIG_NAMES: [&str; 3] = ["atelier.toml", ".atelier.toml", "atelier.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// Storefront configuration.
    pub config: StorefrontConfig,
    /// Where the configuration came from, if not the defaults.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
}

impl Context {
    /// Load context from an explicit config file, or the nearest one found
    /// walking up from the working directory.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let path = match config_path {
            Some(path) => Some(PathBuf::from(path)),
            None => {
                let cwd = std::env::current_dir().context("Failed to get current directory")?;
                find_config(&cwd)
            }
        };

        let config = match &path {
            Some(path) => StorefrontConfig::load(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => StorefrontConfig::default(),
        };

        Ok(Self {
            config,
            config_path: path,
            output,
        })
    }

    /// API client for the configured backend.
    pub fn api(&self) -> Result<StorefrontApi> {
        StorefrontApi::from_config(&self.config).context("Failed to create HTTP client")
    }

    /// App state, signed in when both a user id and a token are given.
    pub fn state(&self, user: Option<&str>, token: Option<&str>) -> AppState {
        match (user, token) {
            (Some(user), Some(token)) => AppState::with_session(UserSession::new(user, token)),
            _ => AppState::new(),
        }
    }
}

/// Find a config file in the directory tree.
fn find_config(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .flat_map(|dir| CONFIG_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.is_file())
}
