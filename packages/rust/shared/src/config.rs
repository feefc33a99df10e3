//! Application configuration for clipscrape.
//!
//! User config lives at `~/.clipscrape/clipscrape.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ClipScrapeError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "clipscrape.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".clipscrape";

// ---------------------------------------------------------------------------
// Config structs (matching clipscrape.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP client settings.
    #[serde(default)]
    pub http: HttpConfig,

    /// Where the punctuation-correct rendition is fetched from.
    #[serde(default)]
    pub secondary: SecondaryConfig,
}

/// `[http]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    5
}
fn default_user_agent() -> String {
    concat!("clipscrape/", env!("CARGO_PKG_VERSION")).into()
}

/// `[secondary]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SecondaryConfig {
    /// Origin to build `/clip/<id>` URLs against. When unset the origin is
    /// derived from the primary URL (`l.` + host without `www.`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

// ---------------------------------------------------------------------------
// Fetch config (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime fetch configuration, merged from config file + CLI flags.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Per-request timeout.
    pub timeout: Duration,
    /// User-Agent header value.
    pub user_agent: String,
    /// Override origin for the secondary rendition.
    pub secondary_base: Option<Url>,
}

impl FetchConfig {
    /// Override the request timeout (e.g. from a CLI flag).
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(default_timeout_secs()),
            user_agent: default_user_agent(),
            secondary_base: None,
        }
    }
}

impl TryFrom<&AppConfig> for FetchConfig {
    type Error = ClipScrapeError;

    fn try_from(config: &AppConfig) -> Result<Self> {
        if config.http.timeout_secs == 0 {
            return Err(ClipScrapeError::config("http.timeout_secs must be at least 1"));
        }

        let secondary_base = config
            .secondary
            .base_url
            .as_deref()
            .map(|raw| {
                Url::parse(raw).map_err(|e| {
                    ClipScrapeError::config(format!("invalid secondary.base_url '{raw}': {e}"))
                })
            })
            .transpose()?;

        Ok(Self {
            timeout: Duration::from_secs(config.http.timeout_secs),
            user_agent: config.http.user_agent.clone(),
            secondary_base,
        })
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.clipscrape/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| ClipScrapeError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.clipscrape/clipscrape.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| ClipScrapeError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| ClipScrapeError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| ClipScrapeError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| ClipScrapeError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| ClipScrapeError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
