//! Static provider configuration
//!
//! Base URLs and quotas are fixed per provider and loaded once at startup.
//! The shell may override the defaults from the environment before handing
//! an immutable [`ProvidersConfig`] to each adapter.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::Error;

pub const GOOGLE_BOOKS_BASE_URL: &str = "https://www.googleapis.com/books/v1/volumes";
pub const OPEN_LIBRARY_BASE_URL: &str = "https://openlibrary.org/search.json";

/// Both public APIs document a quota of roughly one call per second.
pub const DEFAULT_CALLS_PER_MINUTE: u32 = 60;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const RATE_LIMIT_PERIOD: Duration = Duration::from_secs(60);

/// Supported book-metadata providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Google,
    OpenLibrary,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 2] = [ProviderKind::Google, ProviderKind::OpenLibrary];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Google => "google",
            ProviderKind::OpenLibrary => "openlibrary",
        }
    }

    /// Human readable name used in logs and tables
    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderKind::Google => "Google Books",
            ProviderKind::OpenLibrary => "Open Library",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            ProviderKind::Google => GOOGLE_BOOKS_BASE_URL,
            ProviderKind::OpenLibrary => OPEN_LIBRARY_BASE_URL,
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "google" => Ok(ProviderKind::Google),
            "openlibrary" => Ok(ProviderKind::OpenLibrary),
            other => Err(Error::UnknownProvider(other.to_string())),
        }
    }
}

/// Connection settings and quota for one provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderConfig {
    pub base_url: String,
    pub calls_per_minute: u32,
    #[serde(skip)]
    pub timeout: Duration,
}

impl ProviderConfig {
    pub fn defaults(kind: ProviderKind) -> Self {
        Self {
            base_url: kind.default_base_url().to_string(),
            calls_per_minute: DEFAULT_CALLS_PER_MINUTE,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Length of the window the quota applies to
    pub fn period(&self) -> Duration {
        RATE_LIMIT_PERIOD
    }
}

/// Configuration for every provider, built once at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProvidersConfig {
    pub google: ProviderConfig,
    pub open_library: ProviderConfig,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            google: ProviderConfig::defaults(ProviderKind::Google),
            open_library: ProviderConfig::defaults(ProviderKind::OpenLibrary),
        }
    }
}

impl ProvidersConfig {
    pub fn get(&self, kind: ProviderKind) -> &ProviderConfig {
        match kind {
            ProviderKind::Google => &self.google,
            ProviderKind::OpenLibrary => &self.open_library,
        }
    }

    pub fn get_mut(&mut self, kind: ProviderKind) -> &mut ProviderConfig {
        match kind {
            ProviderKind::Google => &mut self.google,
            ProviderKind::OpenLibrary => &mut self.open_library,
        }
    }
}
