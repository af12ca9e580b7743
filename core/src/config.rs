//! Client configuration.

use crate::timestamp::TimestampFormat;

/// Environment variable naming the plants collection URL.
pub const BASE_URL_ENV: &str = "GREENERY_API_URL";

pub const DEFAULT_BASE_URL: &str = "https://greenery-nyc-test-dev.herokuapp.com/api/plants";

/// Fixed configuration for a `NetworkService`: where the plants collection
/// lives and how wire timestamps are rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timestamps: TimestampFormat,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timestamps: TimestampFormat::default(),
        }
    }

    /// Read the base URL from `GREENERY_API_URL`, falling back to the default
    /// collection URL when it is unset or empty.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup(BASE_URL_ENV)
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    pub fn with_timestamps(mut self, timestamps: TimestampFormat) -> Self {
        self.timestamps = timestamps;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
