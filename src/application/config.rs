use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level application configuration loaded from TOML.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub source: SourceConfig,
}

/// Connection to the OpenSearch cluster holding the monitors.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_username")]
    pub username: String,
    #[serde(default = "default_password")]
    pub password: String,
    #[serde(default = "default_true")]
    pub use_tls: bool,
    /// Certificate verification is off unless explicitly enabled.
    #[serde(default)]
    pub verify_certs: bool,
    #[serde(default = "default_backend_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_search_size")]
    pub search_size: usize,
}

/// Where the desired monitor definitions come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_source_path")]
    pub path: PathBuf,
    /// When set, the document is fetched from this URL instead of `path`.
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default = "default_source_timeout")]
    pub timeout_secs: u64,
}

// --- Defaults ---

fn default_host() -> String {
    "localhost".into()
}

const fn default_port() -> u16 {
    9200
}

fn default_username() -> String {
    "admin".into()
}

fn default_password() -> String {
    "admin".into()
}

const fn default_true() -> bool {
    true
}

const fn default_backend_timeout() -> u64 {
    30
}

const fn default_search_size() -> usize {
    1000
}

fn default_source_path() -> PathBuf {
    PathBuf::from("input").join("monitors.json")
}

const fn default_source_timeout() -> u64 {
    10
}

// --- Default impls ---

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            username: default_username(),
            password: default_password(),
            use_tls: default_true(),
            verify_certs: false,
            timeout_secs: default_backend_timeout(),
            search_size: default_search_size(),
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            path: default_source_path(),
            url: None,
            timeout_secs: default_source_timeout(),
        }
    }
}

// Keeps the password out of debug logs.
impl std::fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"***")
            .field("use_tls", &self.use_tls)
            .field("verify_certs", &self.verify_certs)
            .field("timeout_secs", &self.timeout_secs)
            .field("search_size", &self.search_size)
            .finish()
    }
}

impl BackendConfig {
    #[must_use]
    pub fn base_url(&self) -> String {
        let scheme = if self.use_tls { "https" } else { "http" };
        format!("{scheme}://{}:{}", self.host, self.port)
    }
}

// --- Environment variables ---

pub const ENV_HOST: &str = "OPENSEARCH_HOST";
pub const ENV_PORT: &str = "OPENSEARCH_PORT";
pub const ENV_USER: &str = "OPENSEARCH_USER";
pub const ENV_PASS: &str = "OPENSEARCH_PASS";
pub const ENV_MONITORS_URL: &str = "MONITORS_URL";

// --- AppConfig methods ---

impl AppConfig {
    /// Load config from an explicit path, else from the default path when it
    /// exists, else built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit file cannot be read, or if any file
    /// that is read contains invalid TOML.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load from a specific path
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the TOML content is invalid.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).context("Failed to read config file")?;
        toml::from_str(&content).context("Failed to parse config file")
    }

    /// Apply environment overrides. `lookup` is usually `std::env::var`, but
    /// tests pass their own map so the process environment stays untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the port override is not a valid port number.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(ENV_HOST) {
            self.backend.host = host;
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.backend.port = parse_port(&port)
                .with_context(|| format!("Invalid {ENV_PORT} value '{port}'"))?;
        }
        if let Some(user) = lookup(ENV_USER) {
            self.backend.username = user;
        }
        if let Some(pass) = lookup(ENV_PASS) {
            self.backend.password = pass;
        }
        if let Some(url) = lookup(ENV_MONITORS_URL) {
            self.source.url = Some(url).filter(|u| !u.trim().is_empty());
        }
        Ok(())
    }

    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("monsync").join("config.toml"))
    }
}

fn parse_port(raw: &str) -> Result<u16> {
    let port: u16 = raw.trim().parse().context("not a number between 1 and 65535")?;
    if port == 0 {
        bail!("port must be non-zero");
    }
    Ok(port)
}
