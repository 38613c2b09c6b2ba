use std::time::Duration;

use bookmeta_core::config::ProviderKind;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{} request failed: {message}", .provider.display_name())]
    ProviderRequest {
        provider: ProviderKind,
        message: String,
    },

    #[error("{} rate limit exceeded, retry in {retry_after:?}", .provider.display_name())]
    RateLimitExceeded {
        provider: ProviderKind,
        retry_after: Duration,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] bookmeta_core::Error),
}
