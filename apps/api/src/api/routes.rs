use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::handlers::{auth, feed_urls, podcasts, purchases};
use crate::api::middleware::rate_limit::{rate_limit, DEFAULT_MAX_PER_MINUTE};
use crate::api::middleware::RouteRateLimiter;
use crate::api::state::AppState;

/// Builds the full application router
///
/// API routes live under `{API_PREFIX}{API_VERSION}`; `/health` stays at the root.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let base_path = state.config.api_base_path();
    let api = api_routes(&state);

    let router = Router::new().route("/health", get(auth::health_check));
    let router = if base_path.is_empty() || base_path == "/" {
        router.merge(api)
    } else {
        router.nest(&base_path, api)
    };

    router
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn api_routes(state: &AppState) -> Router<AppState> {
    let max_per_minute = state
        .config
        .rate_limiter_max_override
        .unwrap_or(DEFAULT_MAX_PER_MINUTE);
    let toggle_subscribe_limiter =
        RouteRateLimiter::per_minute("get/toggle-subscribe", max_per_minute);

    Router::new()
        // Auth
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        // Feed URLs
        .route("/feedUrl", get(feed_urls::search_feed_urls))
        .route("/feedUrl/:id", get(feed_urls::get_feed_url_by_id))
        // Podcasts
        .route("/podcast", get(podcasts::search_podcasts))
        .route("/podcast/metadata", get(podcasts::podcast_metadata))
        .route("/podcast/:id", get(podcasts::get_podcast_by_id))
        .route(
            "/podcast/toggle-subscribe/:id",
            get(podcasts::toggle_subscribe)
                .layer(from_fn_with_state(toggle_subscribe_limiter, rate_limit)),
        )
        // Google Play purchases
        .route(
            "/google-play/purchase",
            post(purchases::create_purchase).put(purchases::update_purchase),
        )
        .route(
            "/google-play/purchase/:orderId",
            get(purchases::get_purchase),
        )
}
