//! Per-client request limits for abuse-prone routes
//!
//! Each limited route owns a keyed token bucket. Clients are identified by
//! peer address, or by the first `X-Forwarded-For` hop when proxied.

use std::net::SocketAddr;
use std::num::NonZeroU32;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::clock::{Clock, DefaultClock};
use governor::middleware::NoOpMiddleware;
use governor::state::keyed::DefaultKeyedStateStore;
use governor::{Quota, RateLimiter};

use crate::api::errors::ApiError;

/// Requests per minute when no override is configured
pub const DEFAULT_MAX_PER_MINUTE: u32 = 15;

pub const RATE_LIMITED_MESSAGE: &str = "You're doing that too much. Please try again in a minute.";

/// Checks between sweeps of idle client keys
const PRUNE_EVERY: u64 = 1024;

/// Rate limiter for one route, keyed by client
///
/// A client may spend `max` requests at once; each spent request comes back
/// a full minute later, so no 60 second window ever sees more than `max`.
pub struct RouteRateLimiter<C: Clock = DefaultClock> {
    prefix_key: &'static str,
    limiter: RateLimiter<String, DefaultKeyedStateStore<String>, C, NoOpMiddleware<C::Instant>>,
    checks: AtomicU64,
}

impl RouteRateLimiter {
    /// Allows `max_per_minute` requests per client per minute
    pub fn per_minute(prefix_key: &'static str, max_per_minute: u32) -> Arc<Self> {
        Arc::new(Self::with_clock(prefix_key, max_per_minute, DefaultClock::default()))
    }
}

impl<C: Clock> RouteRateLimiter<C> {
    fn with_clock(prefix_key: &'static str, max_per_minute: u32, clock: C) -> Self {
        let max = NonZeroU32::new(max_per_minute).unwrap_or(NonZeroU32::MIN);
        let quota = Quota::per_minute(NonZeroU32::MIN).allow_burst(max);

        Self {
            prefix_key,
            limiter: RateLimiter::new(quota, DefaultKeyedStateStore::default(), &clock),
            checks: AtomicU64::new(0),
        }
    }

    /// Consumes one request for `client`; false once the budget is spent
    pub fn check(&self, client: &str) -> bool {
        if self.checks.fetch_add(1, Ordering::Relaxed) % PRUNE_EVERY == PRUNE_EVERY - 1 {
            self.prune();
        }

        let key = format!("{}:{}", self.prefix_key, client);
        self.limiter.check_key(&key).is_ok()
    }

    /// Drops clients whose budget has fully refilled
    pub fn prune(&self) {
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
    }

    /// Number of clients currently tracked
    pub fn tracked_clients(&self) -> usize {
        self.limiter.len()
    }
}

fn client_key(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|ip| ip.trim().to_string())
        .filter(|ip| !ip.is_empty())
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
        .unwrap_or_else(|| "unknown".to_string())
}

/// Middleware rejecting over-limit requests with 429
///
/// Use with `axum::middleware::from_fn_with_state`.
pub async fn rate_limit(
    State(limiter): State<Arc<RouteRateLimiter>>,
    request: Request,
    next: Next,
) -> Response {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let client = client_key(request.headers(), peer);

    if !limiter.check(&client) {
        tracing::warn!("Rate limit exceeded on {} for {}", limiter.prefix_key, client);
        return ApiError::too_many_requests(RATE_LIMITED_MESSAGE).into_response();
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use governor::clock::FakeRelativeClock;
    use std::time::Duration;

    #[test]
    fn budget_is_per_client() {
        let limiter = RouteRateLimiter::per_minute("get/test", 2);

        assert!(limiter.check("10.0.0.1"));
        assert!(limiter.check("10.0.0.1"));
        assert!(!limiter.check("10.0.0.1"));

        assert!(limiter.check("10.0.0.2"));
    }

    fn fake_limiter(max: u32) -> (RouteRateLimiter<FakeRelativeClock>, FakeRelativeClock) {
        let clock = FakeRelativeClock::default();
        (
            RouteRateLimiter::with_clock("get/test", max, clock.clone()),
            clock,
        )
    }

    #[test]
    fn spent_budget_stays_spent_within_the_minute() {
        let (limiter, clock) = fake_limiter(DEFAULT_MAX_PER_MINUTE);

        for _ in 0..DEFAULT_MAX_PER_MINUTE {
            assert!(limiter.check("client"));
        }
        assert!(!limiter.check("client"));

        for _ in 0..11 {
            clock.advance(Duration::from_secs(5));
            assert!(!limiter.check("client"));
        }

        clock.advance(Duration::from_secs(5));
        assert!(limiter.check("client"));
        assert!(!limiter.check("client"));
    }

    #[test]
    fn idle_clients_are_pruned() {
        let (limiter, clock) = fake_limiter(2);
        limiter.check("10.0.0.1");
        limiter.check("10.0.0.2");
        limiter.check("10.0.0.2");
        assert_eq!(limiter.tracked_clients(), 2);

        clock.advance(Duration::from_secs(60));
        limiter.prune();
        assert_eq!(limiter.tracked_clients(), 2);

        clock.advance(Duration::from_secs(60));
        limiter.prune();
        assert_eq!(limiter.tracked_clients(), 1);

        clock.advance(Duration::from_secs(60));
        limiter.prune();
        assert_eq!(limiter.tracked_clients(), 0);
    }

    #[test]
    fn zero_max_still_allows_one() {
        let limiter = RouteRateLimiter::per_minute("get/test", 0);

        assert!(limiter.check("client"));
        assert!(!limiter.check("client"));
    }

    #[test]
    fn forwarded_for_takes_precedence() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );
        let peer: SocketAddr = "127.0.0.1:5000".parse().unwrap();

        assert_eq!(client_key(&headers, Some(peer)), "203.0.113.7");
        assert_eq!(client_key(&HeaderMap::new(), Some(peer)), "127.0.0.1");
        assert_eq!(client_key(&HeaderMap::new(), None), "unknown");
    }
}
