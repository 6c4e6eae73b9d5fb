use std::time::Duration;

use crate::{ClientError, HttpUserDirectory, DEFAULT_API_BASE_URL};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub api_base_url: String,
    pub request_timeout: Option<Duration>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout: None,
        }
    }
}

impl ClientSettings {
    /// A zero timeout is treated as "no timeout" rather than failing every request.
    pub fn new(api_base_url: impl Into<String>, request_timeout_secs: Option<u64>) -> Self {
        let api_base_url = api_base_url.into();
        let api_base_url = if api_base_url.trim().is_empty() {
            DEFAULT_API_BASE_URL.to_string()
        } else {
            api_base_url
        };
        Self {
            api_base_url,
            request_timeout: request_timeout_secs
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
        }
    }

    pub fn connect(&self) -> Result<HttpUserDirectory, ClientError> {
        HttpUserDirectory::with_timeout(&self.api_base_url, self.request_timeout)
    }
}
