use std::sync::Arc;

use bookmeta_core::config::{ProviderConfig, ProviderKind};
use bookmeta_core::google::{self, GoogleVolumesResponse};
use bookmeta_core::query::SearchRequest;
use bookmeta_core::record::BookRecord;

use super::{finish, recover, BookProvider, ProviderClient, SearchOutcome};
use crate::error::Error;
use crate::limiter::{Clock, LimitMode, RateLimiter, TokioClock};

/// Google Books volumes search
#[derive(Debug)]
pub struct GoogleBooksProvider<C: Clock = TokioClock> {
    client: ProviderClient<C>,
}

impl<C: Clock> GoogleBooksProvider<C> {
    pub fn with_limiter(
        config: &ProviderConfig,
        limiter: Arc<RateLimiter<C>>,
        mode: LimitMode,
    ) -> Result<Self, Error> {
        Ok(Self {
            client: ProviderClient::new(ProviderKind::Google, config, limiter, mode)?,
        })
    }
}

impl<C: Clock> BookProvider for GoogleBooksProvider<C> {
    type Response = GoogleVolumesResponse;

    fn kind(&self) -> ProviderKind {
        ProviderKind::Google
    }

    fn query_params(&self, request: &SearchRequest) -> Vec<(&'static str, String)> {
        google::query_params(request)
    }

    fn normalize(&self, response: GoogleVolumesResponse) -> Vec<BookRecord> {
        google::normalize(response)
    }

    async fn search(&self, request: &SearchRequest) -> SearchOutcome {
        let params = self.query_params(request);

        match self.client.get_json::<GoogleVolumesResponse>(&params).await {
            Ok(response) => finish(self.kind(), self.normalize(response)),
            Err(err) => recover(self.kind(), err),
        }
    }
}
