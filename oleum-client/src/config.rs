//! Client configuration

use std::path::PathBuf;
use std::time::Duration;

/// Default location of the hosted store during development
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:54321";

/// Default directory for on-device state (the session file)
pub const DEFAULT_DATA_DIR: &str = ".oleum";

/// Client configuration for the hosted store and on-device storage
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | OLEUM_BACKEND_URL | http://localhost:54321 | Base URL of the hosted store |
/// | OLEUM_API_KEY | (none) | Anonymous API key sent as `apikey` and bearer token |
/// | OLEUM_DATA_DIR | .oleum | Directory holding the session file |
/// | OLEUM_REQUEST_TIMEOUT_SECS | (none) | Per-request timeout; unset means no timeout |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Hosted store base URL (e.g., "https://xyz.supabase.co")
    pub backend_url: String,

    /// API key for the hosted store
    pub api_key: Option<String>,

    /// Directory for the persisted session
    pub data_dir: PathBuf,

    /// Request timeout in seconds
    pub timeout: Option<u64>,
}

impl ClientConfig {
    /// Create a configuration pointing at `backend_url`
    pub fn new(backend_url: impl Into<String>) -> Self {
        Self {
            backend_url: backend_url.into(),
            api_key: None,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            timeout: None,
        }
    }

    /// Load configuration from environment variables, using defaults for
    /// anything unset
    pub fn from_env() -> Self {
        let mut config = Self::new(
            std::env::var("OLEUM_BACKEND_URL").unwrap_or_else(|_| DEFAULT_BACKEND_URL.into()),
        );
        config.api_key = std::env::var("OLEUM_API_KEY")
            .ok()
            .filter(|k| !k.is_empty());
        if let Ok(dir) = std::env::var("OLEUM_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        config.timeout = std::env::var("OLEUM_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|t| t.parse().ok());
        config
    }

    /// Set the API key
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the data directory
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = Some(seconds);
        self
    }

    /// Request timeout as a duration, if configured
    pub fn request_timeout(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }

    /// Create the REST backend from this configuration
    pub fn build_backend(&self) -> crate::ClientResult<crate::RestBackend> {
        crate::RestBackend::new(self)
    }

    /// Session store rooted at the configured data directory
    pub fn session_store(&self) -> crate::SessionStore {
        crate::SessionStore::new(&self.data_dir)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BACKEND_URL)
    }
}
