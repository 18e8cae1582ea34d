use crate::constants::method;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

const API_MAX_AGE_SECONDS: u32 = 86_400;

/// Raw allow-lists as supplied by the process configuration loader.
///
/// Values are used as given: methods must be upper-case and header names must
/// use canonical capitalization (`Content-Type`) to ever match.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CorsOptions {
    /// Origins allowed to read responses. `*` allows any origin; an entry may
    /// contain a wildcard (`https://*.example.com`).
    pub allow_origins: Vec<String>,
    pub allow_methods: Vec<String>,
    pub allow_headers: Vec<String>,
    pub allow_credentials: bool,
    /// Preflight cache lifetime in seconds; `0` omits `Access-Control-Max-Age`.
    pub max_age: u32,
}

impl Default for CorsOptions {
    fn default() -> Self {
        Self {
            allow_origins: vec!["*".into()],
            allow_methods: default_methods(),
            allow_headers: default_headers(),
            allow_credentials: true,
            max_age: 0,
        }
    }
}

impl CorsOptions {
    /// Preset for an API endpoint serving browser clients from `origins`.
    pub fn api<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allow_origins: origins.into_iter().map(Into::into).collect(),
            max_age: API_MAX_AGE_SECONDS,
            ..Self::default()
        }
    }

    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        toml::from_str(source).map_err(ConfigError::Parse)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}

fn default_methods() -> Vec<String> {
    vec![method::HEAD.into(), method::GET.into(), method::POST.into()]
}

fn default_headers() -> Vec<String> {
    vec![
        "Origin".into(),
        "Accept".into(),
        "Content-Type".into(),
        "X-Requested-With".into(),
    ]
}

/// Errors raised while loading [`CorsOptions`] from disk or text.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read CORS configuration from {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse CORS configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
#[path = "options_test.rs"]
mod options_test;
