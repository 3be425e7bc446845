use std::env;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_API_ENDPOINT: &str = "https://api.github.com/zen";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("PORT must be a valid port number, got {0:?}")]
    InvalidPort(String),
}

/// Environment configuration
/// Read once at startup and shared through the app state
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Target polled when a POST arrives without a body
    pub api_endpoint: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match non_empty_var("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let api_endpoint =
            non_empty_var("API_ENDPOINT").unwrap_or_else(|| DEFAULT_API_ENDPOINT.to_string());

        Ok(Self { port, api_endpoint })
    }

    pub fn listen_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
        }
    }
}

// Unset and empty are treated the same.
fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.is_empty())
}
