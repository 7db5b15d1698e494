//! Chat configuration loader for Parley.
//!
//! Reads `config.toml` from the data directory (`~/.parley/` in production)
//! and deserializes it into [`ChatConfig`]. Falls back to defaults when the
//! file is missing or malformed, then applies environment overrides.

use std::path::{Path, PathBuf};

use parley_types::config::ChatConfig;
use parley_types::error::ConfigError;

/// Overrides `vendor` after the file is loaded.
pub const VENDOR_ENV: &str = "PARLEY_VENDOR";

/// Overrides `model` after the file is loaded.
pub const MODEL_ENV: &str = "PARLEY_MODEL";

/// `{data_dir}/config.toml`.
pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join("config.toml")
}

/// Read and parse `path`.
///
/// Returns `Ok(None)` when the file does not exist.
pub async fn read_chat_config(path: &Path) -> Result<Option<ChatConfig>, ConfigError> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(ConfigError::Read(format!("{}: {err}", path.display()))),
    };

    toml::from_str::<ChatConfig>(&content)
        .map(Some)
        .map_err(|err| ConfigError::Parse(format!("{}: {err}", path.display())))
}

/// Load the chat configuration from `path`.
///
/// - Missing file: [`ChatConfig::default()`].
/// - Unreadable or unparseable file: logs a warning, returns the default.
/// - Otherwise: the parsed config.
pub async fn load_chat_config(path: &Path) -> ChatConfig {
    match read_chat_config(path).await {
        Ok(Some(config)) => config,
        Ok(None) => {
            tracing::debug!("No config.toml found at {}, using defaults", path.display());
            ChatConfig::default()
        }
        Err(err) => {
            tracing::warn!("{err}, using defaults");
            ChatConfig::default()
        }
    }
}

/// Apply `PARLEY_VENDOR` / `PARLEY_MODEL` from `lookup`.
///
/// Blank values are ignored.
pub fn apply_env_overrides(
    mut config: ChatConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> ChatConfig {
    if let Some(vendor) = lookup(VENDOR_ENV).filter(|v| !v.trim().is_empty()) {
        tracing::debug!(vendor = %vendor, "vendor overridden from environment");
        config.vendor = vendor.trim().to_string();
    }
    if let Some(model) = lookup(MODEL_ENV).filter(|m| !m.trim().is_empty()) {
        tracing::debug!(model = %model, "model overridden from environment");
        config.model = model.trim().to_string();
    }
    config
}

/// Load `path` and apply overrides from the process environment.
pub async fn load_effective_config(path: &Path) -> ChatConfig {
    apply_env_overrides(load_chat_config(path).await, |key| std::env::var(key).ok())
}
