//! Provider contract and HTTP plumbing shared by every adapter
//!
//! Each adapter pairs the pure request/normalize functions from
//! `bookmeta_core` with a [`ProviderClient`] that applies the provider's rate
//! limiter before calling the network.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use bookmeta_core::config::{ProviderConfig, ProviderKind, ProvidersConfig};
use bookmeta_core::query::SearchRequest;
use bookmeta_core::record::BookRecord;
use serde::de::DeserializeOwned;

use crate::error::Error;
use crate::limiter::{Clock, LimitMode, RateLimiter, TokioClock};

pub mod google;
pub mod open_library;

pub use google::GoogleBooksProvider;
pub use open_library::OpenLibraryProvider;

/// Why a search produced no records
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyReason {
    /// The provider answered and nothing matched
    NoMatches,
    /// Transport error, non-success status or undecodable body
    RequestFailed(String),
    /// Fail-fast mode and the quota was spent
    RateLimited,
}

impl fmt::Display for EmptyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmptyReason::NoMatches => f.write_str("no books matched the query"),
            EmptyReason::RequestFailed(cause) => write!(f, "request failed: {cause}"),
            EmptyReason::RateLimited => f.write_str("rate limit reached"),
        }
    }
}

/// Result of a provider search
///
/// `Found` always holds at least one record. Every `Empty` variant can be
/// displayed as "no results"; the reason is kept for callers that care.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Found(Vec<BookRecord>),
    Empty(EmptyReason),
}

impl SearchOutcome {
    pub fn from_records(records: Vec<BookRecord>) -> Self {
        if records.is_empty() {
            SearchOutcome::Empty(EmptyReason::NoMatches)
        } else {
            SearchOutcome::Found(records)
        }
    }

    pub fn from_error(error: &Error) -> Self {
        match error {
            Error::RateLimitExceeded { .. } => SearchOutcome::Empty(EmptyReason::RateLimited),
            other => SearchOutcome::Empty(EmptyReason::RequestFailed(other.to_string())),
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }

    /// Records found, or an empty slice for any empty outcome
    #[cfg(test)]
    pub fn records(&self) -> &[BookRecord] {
        match self {
            SearchOutcome::Found(records) => records,
            SearchOutcome::Empty(_) => &[],
        }
    }

    #[cfg(test)]
    pub fn into_records(self) -> Option<Vec<BookRecord>> {
        match self {
            SearchOutcome::Found(records) => Some(records),
            SearchOutcome::Empty(_) => None,
        }
    }
}

/// Capability every book-metadata provider implements
pub trait BookProvider: Send + Sync {
    /// Raw JSON shape returned by the provider
    type Response: DeserializeOwned + Send;

    fn kind(&self) -> ProviderKind;

    /// Query string for the provider's dialect
    fn query_params(&self, request: &SearchRequest) -> Vec<(&'static str, String)>;

    /// Map a raw response into canonical records, one per result item
    fn normalize(&self, response: Self::Response) -> Vec<BookRecord>;

    /// Run a rate-limited search
    ///
    /// Request-layer failures are logged and reported as an empty outcome.
    fn search(&self, request: &SearchRequest) -> impl Future<Output = SearchOutcome> + Send;
}

/// Rate-limited HTTP access to one provider endpoint
#[derive(Debug)]
pub struct ProviderClient<C: Clock = TokioClock> {
    kind: ProviderKind,
    base_url: String,
    http: reqwest::Client,
    limiter: Arc<RateLimiter<C>>,
    mode: LimitMode,
}

impl<C: Clock> ProviderClient<C> {
    pub fn new(
        kind: ProviderKind,
        config: &ProviderConfig,
        limiter: Arc<RateLimiter<C>>,
        mode: LimitMode,
    ) -> Result<Self, Error> {
        if limiter.provider() != kind {
            return Err(Error::Config(format!(
                "{} rate limiter cannot guard {} requests",
                limiter.provider().display_name(),
                kind.display_name()
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("bookmeta/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            kind,
            base_url: config.base_url.clone(),
            http,
            limiter,
            mode,
        })
    }

    fn request_error(&self, message: String) -> Error {
        Error::ProviderRequest {
            provider: self.kind,
            message,
        }
    }

    /// Wait on the limiter, GET the endpoint and decode the JSON body
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        params: &[(&'static str, String)],
    ) -> Result<T, Error> {
        self.limiter.gate(self.mode).await?;

        log::debug!("GET {} {:?}", self.base_url, params);

        let response = self
            .http
            .get(&self.base_url)
            .query(params)
            .send()
            .await
            .map_err(|e| self.request_error(format!("Failed to send request: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let excerpt: String = body.chars().take(200).collect();
            return Err(self.request_error(format!("HTTP {status}: {excerpt}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.request_error(format!("Failed to read response body: {e}")))?;

        serde_json::from_str(&body)
            .map_err(|e| self.request_error(format!("Failed to parse response: {e}")))
    }
}

/// Log a failed request and collapse it into an empty outcome
pub(crate) fn recover(kind: ProviderKind, error: Error) -> SearchOutcome {
    log::error!("{} API request failed: {error}", kind.display_name());
    SearchOutcome::from_error(&error)
}

/// Wrap normalized records, logging when nothing matched
pub(crate) fn finish(kind: ProviderKind, records: Vec<BookRecord>) -> SearchOutcome {
    let outcome = SearchOutcome::from_records(records);
    if !outcome.is_found() {
        log::warn!("No books found matching the criteria on {}.", kind.display_name());
    }
    outcome
}

/// Every supported provider
#[derive(Debug)]
pub enum Provider {
    Google(GoogleBooksProvider),
    OpenLibrary(OpenLibraryProvider),
}

impl Provider {
    /// Build the adapter for `kind` with its process-wide rate limiter
    pub fn new(
        kind: ProviderKind,
        config: &ProvidersConfig,
        mode: LimitMode,
    ) -> Result<Self, Error> {
        let config = config.get(kind);
        let limiter = RateLimiter::shared(kind, config)?;

        Ok(match kind {
            ProviderKind::Google => {
                Provider::Google(GoogleBooksProvider::with_limiter(config, limiter, mode)?)
            }
            ProviderKind::OpenLibrary => {
                Provider::OpenLibrary(OpenLibraryProvider::with_limiter(config, limiter, mode)?)
            }
        })
    }

    pub fn kind(&self) -> ProviderKind {
        match self {
            Provider::Google(provider) => provider.kind(),
            Provider::OpenLibrary(provider) => provider.kind(),
        }
    }

    pub async fn search(&self, request: &SearchRequest) -> SearchOutcome {
        match self {
            Provider::Google(provider) => provider.search(request).await,
            Provider::OpenLibrary(provider) => provider.search(request).await,
        }
    }
}

#[cfg(test)]
pub(crate) mod stub {
    //! Local HTTP server standing in for a provider endpoint

    use axum::{
        extract::{Query, State},
        http::StatusCode,
        routing::get,
        Json, Router,
    };
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    pub type Params = HashMap<String, String>;

    struct StubState {
        status: StatusCode,
        body: serde_json::Value,
        requests: Arc<Mutex<Vec<Params>>>,
    }

    pub struct StubServer {
        pub base_url: String,
        requests: Arc<Mutex<Vec<Params>>>,
    }

    impl StubServer {
        pub fn requests(&self) -> Vec<Params> {
            self.requests.lock().unwrap().clone()
        }
    }

    pub async fn serve(status: StatusCode, body: serde_json::Value) -> StubServer {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = Arc::new(StubState {
            status,
            body,
            requests: requests.clone(),
        });

        let app = Router::new().route("/search", get(handler)).with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        StubServer {
            base_url: format!("http://{addr}/search"),
            requests,
        }
    }

    async fn handler(
        State(state): State<Arc<StubState>>,
        Query(params): Query<Params>,
    ) -> (StatusCode, Json<serde_json::Value>) {
        state.requests.lock().unwrap().push(params);
        (state.status, Json(state.body.clone()))
    }
}
