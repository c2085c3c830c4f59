//! Client configuration baked in at build time.
//!
//! SYSTEM CONTEXT
//! ==============
//! A WASM bundle has no process environment, so values are read with
//! `option_env!` when the crate is compiled and fall back to defaults.
//! `ClientConfig::from_values` is the pure parser behind it.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_BASE_URL: &str = "https://webapi.foofish.work";
pub const DEFAULT_STORAGE_KEY: &str = "user";
pub const DEFAULT_AUTH_HEADER: &str = "Authorization";

/// Errors produced while building a [`ClientConfig`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The API base URL is not an absolute `http`/`https` URL.
    #[error("invalid API base URL '{0}'")]
    InvalidBaseUrl(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Remote API origin without a trailing slash.
    pub api_base_url: String,
    /// `localStorage` key the session snapshot lives under.
    pub storage_key: String,
    /// Header that carries `Bearer <token>` on authenticated requests.
    pub auth_header: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
            auth_header: DEFAULT_AUTH_HEADER.to_owned(),
        }
    }
}

impl ClientConfig {
    /// Build config from values captured at compile time.
    ///
    /// - `CAMPUS_API_BASE_URL`: remote API origin
    /// - `CAMPUS_STORAGE_KEY`: persisted session key
    /// - `CAMPUS_AUTH_HEADER`: auth header name
    ///
    /// # Errors
    ///
    /// Returns an error if the configured base URL is not usable.
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_values(
            option_env!("CAMPUS_API_BASE_URL"),
            option_env!("CAMPUS_STORAGE_KEY"),
            option_env!("CAMPUS_AUTH_HEADER"),
        )
    }

    /// Build config from optional raw values; blank values mean "use the default".
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the base URL does not parse
    /// as an absolute `http` or `https` URL.
    pub fn from_values(
        base_url: Option<&str>,
        storage_key: Option<&str>,
        auth_header: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let api_base_url = parse_base_url(non_blank(base_url).unwrap_or(DEFAULT_API_BASE_URL))?;
        let storage_key = non_blank(storage_key).unwrap_or(DEFAULT_STORAGE_KEY).to_owned();
        let auth_header = non_blank(auth_header).unwrap_or(DEFAULT_AUTH_HEADER).to_owned();
        Ok(Self { api_base_url, storage_key, auth_header })
    }
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim_end_matches('/');
    let parsed = url::Url::parse(trimmed).map_err(|_| ConfigError::InvalidBaseUrl(raw.to_owned()))?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(ConfigError::InvalidBaseUrl(raw.to_owned()));
    }
    Ok(trimmed.to_owned())
}
