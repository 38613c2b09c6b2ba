//! Per-provider rate limiting
//!
//! A [`RateLimiter`] guards every outgoing request of one provider. The
//! accounting lives in [`SlidingWindow`]; this module adds the lock that makes
//! it safe to share between tasks and the clock used to wait for a free slot.

use std::future::Future;
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};

use bookmeta_core::config::{ProviderConfig, ProviderKind};
use bookmeta_core::rate_limit::SlidingWindow;
use tokio::sync::Mutex;

use crate::error::Error;

/// Source of time for the limiter
///
/// Production code uses [`TokioClock`]; tests substitute a simulated clock.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> Instant;

    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

/// Wall clock backed by the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send {
        tokio::time::sleep(duration)
    }
}

/// What to do when the quota is spent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LimitMode {
    /// Wait until the window admits the call
    #[default]
    Block,
    /// Fail immediately with [`Error::RateLimitExceeded`]
    FailFast,
}

#[derive(Debug)]
pub struct RateLimiter<C: Clock = TokioClock> {
    provider: ProviderKind,
    window: Mutex<SlidingWindow>,
    clock: C,
}

static GOOGLE_LIMITER: OnceLock<Arc<RateLimiter>> = OnceLock::new();
static OPEN_LIBRARY_LIMITER: OnceLock<Arc<RateLimiter>> = OnceLock::new();

impl RateLimiter<TokioClock> {
    /// Process-wide limiter for `provider`
    ///
    /// The first call fixes the quota; later calls return the same instance
    /// regardless of the configuration they pass.
    pub fn shared(provider: ProviderKind, config: &ProviderConfig) -> Result<Arc<Self>, Error> {
        let cell = match provider {
            ProviderKind::Google => &GOOGLE_LIMITER,
            ProviderKind::OpenLibrary => &OPEN_LIBRARY_LIMITER,
        };

        if let Some(limiter) = cell.get() {
            return Ok(limiter.clone());
        }

        let limiter = Self::new(provider, config.calls_per_minute, config.period(), TokioClock)?;
        Ok(cell.get_or_init(|| Arc::new(limiter)).clone())
    }
}

impl<C: Clock> RateLimiter<C> {
    pub fn new(provider: ProviderKind, limit: u32, period: Duration, clock: C) -> Result<Self, Error> {
        Ok(Self {
            provider,
            window: Mutex::new(SlidingWindow::new(limit, period)?),
            clock,
        })
    }

    pub fn provider(&self) -> ProviderKind {
        self.provider
    }

    #[cfg(test)]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Wait for a slot and return the instant the call was admitted
    pub async fn acquire(&self) -> Instant {
        loop {
            let wait = {
                let mut window = self.window.lock().await;
                let now = self.clock.now();
                match window.try_acquire(now) {
                    Ok(()) => return now,
                    Err(wait) => wait,
                }
            };

            log::debug!(
                "{} rate limit reached, waiting {:?}",
                self.provider.display_name(),
                wait
            );
            self.clock.sleep(wait).await;
        }
    }

    /// Admit the call now or fail with the time until a slot frees up
    pub async fn try_acquire(&self) -> Result<Instant, Error> {
        let mut window = self.window.lock().await;
        let now = self.clock.now();

        window
            .try_acquire(now)
            .map(|()| now)
            .map_err(|retry_after| Error::RateLimitExceeded {
                provider: self.provider,
                retry_after,
            })
    }

    pub async fn gate(&self, mode: LimitMode) -> Result<Instant, Error> {
        match mode {
            LimitMode::Block => Ok(self.acquire().await),
            LimitMode::FailFast => self.try_acquire().await,
        }
    }
}
