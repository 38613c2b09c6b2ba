use std::sync::Arc;

use bookmeta_core::config::{ProviderConfig, ProviderKind};
use bookmeta_core::open_library::{self, OpenLibrarySearchResponse};
use bookmeta_core::query::SearchRequest;
use bookmeta_core::record::BookRecord;

use super::{finish, recover, BookProvider, ProviderClient, SearchOutcome};
use crate::error::Error;
use crate::limiter::{Clock, LimitMode, RateLimiter, TokioClock};

/// Open Library title search
#[derive(Debug)]
pub struct OpenLibraryProvider<C: Clock = TokioClock> {
    client: ProviderClient<C>,
}

impl<C: Clock> OpenLibraryProvider<C> {
    pub fn with_limiter(
        config: &ProviderConfig,
        limiter: Arc<RateLimiter<C>>,
        mode: LimitMode,
    ) -> Result<Self, Error> {
        Ok(Self {
            client: ProviderClient::new(ProviderKind::OpenLibrary, config, limiter, mode)?,
        })
    }
}

impl<C: Clock> BookProvider for OpenLibraryProvider<C> {
    type Response = OpenLibrarySearchResponse;

    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenLibrary
    }

    fn query_params(&self, request: &SearchRequest) -> Vec<(&'static str, String)> {
        open_library::query_params(request)
    }

    fn normalize(&self, response: OpenLibrarySearchResponse) -> Vec<BookRecord> {
        open_library::normalize(response)
    }

    async fn search(&self, request: &SearchRequest) -> SearchOutcome {
        let params = self.query_params(request);

        match self.client.get_json::<OpenLibrarySearchResponse>(&params).await {
            Ok(mut response) => {
                // `limit` is advisory; keep the page bounded.
                response.docs.truncate(request.max_results());
                finish(self.kind(), self.normalize(response))
            }
            Err(err) => recover(self.kind(), err),
        }
    }
}
