// Configuration loading and parsing (config/platepilot.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

/// Name of the single config file inside `config/` and `defaults/`.
pub const CONFIG_FILE: &str = "platepilot.toml";

/// Upper bound on how many random meals a single feed load may request.
pub const MAX_RANDOM_MEALS: usize = 50;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub feed: FeedConfig,
    pub storage: StorageConfig,
}

/// `[api]`: recipe database endpoint and HTTP timeouts.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    /// Connect timeout for a single request.
    pub request_timeout_secs: u64,
    /// Total time allowed for a request, including the body.
    pub resource_timeout_secs: u64,
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn resource_timeout(&self) -> Duration {
        Duration::from_secs(self.resource_timeout_secs)
    }
}

/// `[feed]`: Home tab behaviour.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    pub random_meal_count: usize,
}

/// `[storage]`: where the collections database lives.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub path: String,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/platepilot.toml` relative to `base_dir`.
///
/// This does not copy defaults; prefer `load_config()` which does.
pub(crate) fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = read_file(&path)?;
    let config = parse_config(&text, &path)?;
    validate(&config)?;
    Ok(config)
}

/// Parse config text. `path` is only used for error reporting.
pub fn parse_config(text: &str, path: &Path) -> Result<Config, ConfigError> {
    toml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Copy `defaults/platepilot.toml` to `config/platepilot.toml` when the
/// latter is missing. Returns whether a copy was made; an existing config
/// is never overwritten.
pub fn ensure_config_file(base_dir: &Path) -> Result<bool, ConfigError> {
    let target = base_dir.join("config").join(CONFIG_FILE);
    if target.exists() {
        return Ok(false);
    }

    let source = base_dir.join("defaults").join(CONFIG_FILE);
    if !source.exists() {
        return Err(ConfigError::DefaultsCopyError {
            message: format!(
                "neither config/{CONFIG_FILE} nor defaults/{CONFIG_FILE} found in {}",
                base_dir.display()
            ),
        });
    }

    let copy_error = |e: std::io::Error| ConfigError::DefaultsCopyError {
        message: format!("failed to copy {} to {}: {e}", source.display(), target.display()),
    };
    if let Some(dir) = target.parent() {
        std::fs::create_dir_all(dir).map_err(copy_error)?;
    }
    std::fs::copy(&source, &target).map_err(copy_error)?;
    info!("Copied default config to {}", target.display());
    Ok(true)
}

/// Convenience wrapper: loads config relative to the current working directory,
/// or the crate directory when the working directory has neither `config/`
/// nor `defaults/` (e.g. `cargo run` from the workspace root).
/// Ensures default config files are copied before loading.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    let base_dir = if cwd.join("config").exists() || cwd.join("defaults").exists() {
        cwd
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
    };
    ensure_config_file(&base_dir)?;
    load_config_from(&base_dir)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let api = &config.api;
    if api.base_url.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "api.base_url".into(),
            message: "must not be empty".into(),
        });
    }
    if !(api.base_url.starts_with("http://") || api.base_url.starts_with("https://")) {
        return Err(ConfigError::ValidationError {
            field: "api.base_url".into(),
            message: format!("must be an http(s) URL, got {}", api.base_url),
        });
    }

    let timeouts: &[(&str, u64)] = &[
        ("api.request_timeout_secs", api.request_timeout_secs),
        ("api.resource_timeout_secs", api.resource_timeout_secs),
    ];
    for (name, val) in timeouts {
        if *val == 0 {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: "must be > 0".into(),
            });
        }
    }
    if api.request_timeout_secs > api.resource_timeout_secs {
        return Err(ConfigError::ValidationError {
            field: "api.request_timeout_secs".into(),
            message: format!(
                "must not exceed api.resource_timeout_secs ({} > {})",
                api.request_timeout_secs, api.resource_timeout_secs
            ),
        });
    }

    let count = config.feed.random_meal_count;
    if !(1..=MAX_RANDOM_MEALS).contains(&count) {
        return Err(ConfigError::ValidationError {
            field: "feed.random_meal_count".into(),
            message: format!("must be between 1 and {MAX_RANDOM_MEALS}, got {count}"),
        });
    }

    if config.storage.path.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "storage.path".into(),
            message: "must not be empty".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
