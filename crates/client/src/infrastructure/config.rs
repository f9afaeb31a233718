//! Client configuration

use std::env;
use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result};

use super::http_transport::DEFAULT_HEROES_API_URL;

/// Which transport backs the hero client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    /// Talk to a REST hero API over HTTP.
    #[default]
    Http,
    /// Serve heroes from an in-process store seeded with the default roster.
    Memory,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Http => write!(f, "http"),
            Backend::Memory => write!(f, "memory"),
        }
    }
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "http" | "rest" => Ok(Backend::Http),
            "memory" | "in-memory" | "mem" => Ok(Backend::Memory),
            other => Err(format!("unknown backend '{other}' (expected http or memory)")),
        }
    }
}

/// Client configuration loaded from environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Hero collection URL, e.g. `http://localhost:3000/api/heroes`
    pub api_url: String,
    /// Transport backend
    pub backend: Backend,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_HEROES_API_URL.to_string(),
            backend: Backend::default(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from `HEROES_API_URL` and `HEROES_BACKEND`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_url = lookup("HEROES_API_URL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_HEROES_API_URL.to_string());

        let backend = match lookup("HEROES_BACKEND") {
            Some(raw) => raw
                .parse::<Backend>()
                .map_err(anyhow::Error::msg)
                .context("HEROES_BACKEND must be 'http' or 'memory'")?,
            None => Backend::default(),
        };

        let config = Self { api_url, backend };
        config.validate()?;
        Ok(config)
    }

    /// Override fields from command-line flags.
    pub fn with_overrides(
        mut self,
        backend: Option<Backend>,
        api_url: Option<String>,
    ) -> Result<Self> {
        if let Some(backend) = backend {
            self.backend = backend;
        }
        if let Some(api_url) = api_url {
            self.api_url = api_url;
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<()> {
        if self.backend == Backend::Http {
            url::Url::parse(&self.api_url).with_context(|| {
                format!("HEROES_API_URL must be an absolute URL, got '{}'", self.api_url)
            })?;
        }
        Ok(())
    }
}
