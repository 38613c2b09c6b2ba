//! Search request shared by every provider

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Google Books refuses `maxResults` above 40.
pub const MAX_RESULTS_CAP: usize = 40;
pub const DEFAULT_MAX_RESULTS: usize = 5;
pub const DEFAULT_LANGUAGE: &str = "en";

/// Query dialect switch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Title-restricted exact phrase search
    Exact,
    /// Free-text search
    #[default]
    Similar,
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchMode::Exact => f.write_str("exact"),
            MatchMode::Similar => f.write_str("similar"),
        }
    }
}

impl FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "exact" => Ok(MatchMode::Exact),
            "similar" => Ok(MatchMode::Similar),
            other => Err(format!(
                "Invalid match mode: {other}. Valid modes: exact, similar"
            )),
        }
    }
}

/// Validated search parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRequest {
    query: String,
    match_mode: MatchMode,
    max_results: usize,
    language: String,
}

impl SearchRequest {
    /// Builds a request, rejecting blank queries and result counts outside
    /// `1..=MAX_RESULTS_CAP`.
    pub fn new(
        query: impl Into<String>,
        match_mode: MatchMode,
        max_results: usize,
        language: impl Into<String>,
    ) -> Result<Self> {
        let query = query.into().trim().to_string();
        if query.is_empty() {
            return Err(Error::EmptyQuery);
        }

        if max_results == 0 || max_results > MAX_RESULTS_CAP {
            return Err(Error::InvalidMaxResults {
                got: max_results,
                max: MAX_RESULTS_CAP,
            });
        }

        let language = language.into().trim().to_lowercase();
        let language = if language.is_empty() {
            DEFAULT_LANGUAGE.to_string()
        } else {
            language
        };

        Ok(Self {
            query,
            match_mode,
            max_results,
            language,
        })
    }

    /// Request with the CLI defaults: similar match, 5 results, English.
    pub fn with_defaults(query: impl Into<String>) -> Result<Self> {
        Self::new(query, MatchMode::Similar, DEFAULT_MAX_RESULTS, DEFAULT_LANGUAGE)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn match_mode(&self) -> MatchMode {
        self.match_mode
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    pub fn language(&self) -> &str {
        &self.language
    }
}
