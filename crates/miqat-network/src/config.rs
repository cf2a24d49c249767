use serde::{Deserialize, Serialize};

/// Settings for the remote prayer-time API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// API root, without the `/v1` path.
    pub base_url: String,
    /// Calculation method id. Default: 3 (Muslim World League, 18° / 17°).
    pub method: u8,
    /// Asr school. Default: 0 (Shafi).
    pub school: u8,
    /// Request timeout in seconds. Default: 10.
    pub timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.aladhan.com".to_string(),
            method: 3,
            school: 0,
            timeout_seconds: 10,
            user_agent: concat!("miqat/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl NetworkConfig {
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_method(mut self, method: u8) -> Self {
        self.method = method;
        self
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }
}
