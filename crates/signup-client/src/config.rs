//! Client configuration.

use crate::error::{ClientError, Result};

/// Where registrations are posted unless configured otherwise.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/api/register";

/// Settings for the registration client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Absolute URL of the registration endpoint.
    pub endpoint: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Creates a configuration posting to `endpoint`.
    ///
    /// The endpoint must be an `http://` or `https://` URL.
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let endpoint = endpoint.into();
        let rest = endpoint
            .strip_prefix("http://")
            .or_else(|| endpoint.strip_prefix("https://"));
        match rest {
            Some(host) if !host.is_empty() => Ok(Self { endpoint }),
            _ => Err(ClientError::InvalidConfig(format!(
                "endpoint must be an http(s) URL, got {endpoint:?}"
            ))),
        }
    }
}
