//! TOML configuration: backend location, endpoints and form limits.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{FormLimits, SubmissionMode};

const CONFIG_DIR_NAME: &str = "arform";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("could not determine config directory")]
    NoConfigDir,
}

/// Complete application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub limits: LimitsConfig,
    pub form: FormConfig,
}

/// Where the backend lives and how to reach each endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub base_url: String,
    /// Sent as `X-CSRFToken` on every POST.
    pub csrf_token: Option<String>,
    /// Page the identity token is posted to. May carry a `next` parameter.
    pub login_page: String,
    /// Where to continue after sign-in when `login_page` has no `next`.
    pub default_redirect: String,
    pub ar_add: String,
    pub ar_add_execode: String,
    pub channel_query: String,
    pub content_validate: String,
    pub tag_popularity: String,
    pub pinned_access: String,
    pub member_channels: String,
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            csrf_token: None,
            login_page: "/account/login/".to_string(),
            default_redirect: "/account/".to_string(),
            ar_add: "/api/ar/add".to_string(),
            ar_add_execode: "/api/ar/add-execode".to_string(),
            channel_query: "/api/id/channel/query".to_string(),
            content_validate: "/api/ar/validate".to_string(),
            tag_popularity: "/api/ar/tag/popularity".to_string(),
            pinned_access: "/api/id/perm/pinned".to_string(),
            member_channels: "/api/id/channel/member".to_string(),
            timeout_secs: 15,
        }
    }
}

impl ServerConfig {
    /// Joins an endpoint path onto the base URL.
    ///
    /// Absolute URLs are returned unchanged.
    pub fn url(&self, endpoint: &str) -> String {
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            return endpoint.to_string();
        }
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }
}

/// Form limits as configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    pub max_content_length: usize,
    pub max_responses: usize,
    pub tag_splitter: String,
    pub tag_search_count: usize,
    pub max_cooldown_secs: u32,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        let form = FormLimits::default();
        Self {
            max_content_length: form.max_content_length,
            max_responses: form.max_responses,
            tag_splitter: form.tag_splitter,
            tag_search_count: 10,
            max_cooldown_secs: form.max_cooldown_secs,
        }
    }
}

impl LimitsConfig {
    /// Limits handed to a new form.
    pub fn form_limits(&self) -> FormLimits {
        FormLimits {
            max_content_length: self.max_content_length,
            max_responses: self.max_responses.max(1),
            tag_splitter: self.tag_splitter.clone(),
            max_cooldown_secs: self.max_cooldown_secs,
        }
    }
}

/// Initial form state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FormConfig {
    pub default_mode: SubmissionMode,
}

impl Config {
    /// Loads `config.toml` from the platform config directory.
    ///
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_path()?)
    }

    /// Loads configuration from `path`, falling back to defaults when absent.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(text) => toml::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Path of the default config file.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}
