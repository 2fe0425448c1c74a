//! HTTP layer exposing the `/api/v1` surface of the marketing service.

pub mod docs;
pub mod routes;
pub mod types;

use std::{future::Future, sync::Arc, time::Instant};

use anyhow::{Context, Result};
use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::config::Settings;

/// Prefix shared by every service endpoint.
pub const API_PREFIX: &str = "/api/v1";

/// Endpoint paths relative to [`API_PREFIX`].
pub mod paths {
    pub const ANALYZE_USERS: &str = "/analyze/users";
    pub const CONTENT_CAMPAIGN: &str = "/campaigns/content";
    pub const COMMUNITY_ENGAGEMENT: &str = "/engagement/community";
    pub const GENERATE_CONTENT: &str = "/content/generate";
    pub const STATUS: &str = "/status";
    pub const REPOSITORY: &str = "/repository";
    pub const TOOLS_STATUS: &str = "/tools/status";
    pub const COMPREHENSIVE_CAMPAIGN: &str = "/campaigns/comprehensive";
}

/// Launch toggles reported back through `/status`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuntimeInfo {
    pub debug: bool,
    pub reload: bool,
}

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub runtime: RuntimeInfo,
    pub started: Instant,
}

impl AppState {
    pub fn new(settings: Arc<Settings>, runtime: RuntimeInfo) -> Self {
        Self {
            settings,
            runtime,
            started: Instant::now(),
        }
    }
}

/// Build the full application router: the API plus its reference page.
pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.settings.cors_origins);
    let api = Router::new()
        .route(paths::STATUS, get(routes::status))
        .route(paths::REPOSITORY, get(routes::repository))
        .route(paths::TOOLS_STATUS, get(routes::tools_status))
        .route(paths::ANALYZE_USERS, post(routes::analyze_users))
        .route(paths::CONTENT_CAMPAIGN, post(routes::content_campaign))
        .route(paths::COMMUNITY_ENGAGEMENT, post(routes::community_engagement))
        .route(paths::GENERATE_CONTENT, post(routes::generate_content))
        .route(
            paths::COMPREHENSIVE_CAMPAIGN,
            post(routes::comprehensive_campaign),
        );

    Router::new()
        .nest(API_PREFIX, api)
        .with_state(state)
        .merge(docs::docs_router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "ignoring CORS origin that is not a valid header value");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(allowed))
}

/// Bind the listening socket. Host names are resolved.
pub async fn bind(host: &str, port: u16) -> Result<TcpListener> {
    TcpListener::bind((host, port))
        .await
        .with_context(|| format!("binding {host}:{port}"))
}

/// Serve `state` on an already bound listener until `shutdown` resolves.
pub async fn run<F>(listener: TcpListener, state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!(%addr, "serving dingo-marketing API");
    axum::serve(listener, router(state).into_make_service())
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server terminated")?;
    Ok(())
}
