use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::{Arc, Mutex};

use axum::extract::{MatchedPath, Request};
use axum::middleware::{self, Next, from_fn};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use http::StatusCode;
use serde::Serialize;
use sqlx::SqlitePool;
use thiserror::Error;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;
use tracing::instrument;

use crate::api::handler::*;
use crate::api::middleware::cors;
use crate::api::middleware::verify_internal::verify_cron_ident;
use crate::avatar::AvatarGenerator;
use crate::cache::{BoundedCache, EvictionPolicy};
use crate::constants::{AVATAR_CACHE_CAPACITY, LISTING_CACHE_CAPACITY};
use crate::pages;
use crate::util::env::{EnvErr, ServerConfig};

pub type JsonResult<T> = core::result::Result<Json<T>, RouteError>;

pub struct AppState {
    pub pool: SqlitePool,
    pub cron_secret: String,
    pub cors_allow_origins: String,
    pub avatars: AvatarGenerator,
    /// Rendered listing pages, keyed by normalized filter. Invalidated only
    /// by the admin refresh route.
    pub listing_cache: Mutex<BoundedCache<String, String>>,
}

impl AppState {
    pub fn new(pool: SqlitePool, cron_secret: String, cors_allow_origins: String) -> Self {
        Self {
            pool,
            cron_secret,
            cors_allow_origins,
            avatars: AvatarGenerator::new(AVATAR_CACHE_CAPACITY, EvictionPolicy::Lru),
            listing_cache: Mutex::new(BoundedCache::new(
                LISTING_CACHE_CAPACITY,
                EvictionPolicy::Lru,
            )),
        }
    }

    pub fn from_config(pool: SqlitePool, config: &ServerConfig) -> Self {
        Self::new(
            pool,
            config.cron_secret.clone(),
            config.cors_allow_origins.clone(),
        )
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    let admin_routes = Router::new()
        .route("/api/update-games", post(update_games))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            verify_cron_ident,
        ));

    Router::new()
        .merge(admin_routes)
        //
        // presentational pages
        .route("/", get(pages::home))
        .route("/games", get(pages::games_index))
        .route("/play/{slug}", get(pages::play))
        .route("/community", get(pages::community))
        .route("/users/{seed}", get(pages::user_profile))
        //
        // catalog + comment api
        .route("/api/games", get(list_games).post(create_game))
        .route("/api/comments", get(list_comments).post(create_comment))
        .route("/api/comments/manage", put(manage_comment))
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &axum::http::Request<_>| {
                let method = req.method();
                let uri = req.uri();

                let matched_path = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|matched| matched.as_str());

                tracing::debug_span!("api_request", ?method, ?uri, ?matched_path)
            }),
        )
        .layer(from_fn(log_route_errors))
        .layer(cors(&state.cors_allow_origins))
        .with_state(state)
}

/// Custom error trace handler for `RouteError`-type responses; server-side
/// faults are attached to the response extensions by `IntoResponse`.
#[instrument(skip(request, next), fields(uri = request.uri().to_string()))]
async fn log_route_errors(request: Request, next: Next) -> Response {
    let res = next.run(request).await;
    if let Some(err) = res.extensions().get::<Arc<RouteError>>() {
        tracing::error!(error = ?err, "error occurred inside route handler");
    }

    res
}

/// Binds the listener and serves the router. The bound address is reported
/// through `tx` so callers (and tests binding port 0) learn the real port.
#[instrument(skip(state, tx))]
pub async fn serve(
    state: Arc<AppState>,
    port: u16,
    tx: UnboundedSender<SocketAddr>,
) -> Result<(), RouteError> {
    let app = router(state);

    let socket_addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), port);
    let listener = tokio::net::TcpListener::bind(socket_addr).await?;
    let _ = tx.send(listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}

#[instrument(skip(state, tx, rx))]
pub async fn start_server(
    state: Arc<AppState>,
    port: u16,
    tx: UnboundedSender<SocketAddr>,
    mut rx: UnboundedReceiver<SocketAddr>,
) -> Result<Vec<JoinHandle<()>>, RouteError> {
    tracing::info!("starting server");
    let server_handle = tokio::task::spawn(async move {
        if let Err(e) = serve(state, port, tx).await {
            tracing::error!(error = ?e, "server exited with error");
        }
    });

    let logging_handle = tokio::task::spawn(async move {
        if let Some(addr) = rx.recv().await {
            tracing::info!(
                server_url = &format!("http://127.0.0.1:{}", addr.port()),
                "server ready"
            );
        }
    });

    Ok(vec![server_handle, logging_handle])
}

#[derive(Debug, Error)]
pub enum RouteError {
    #[error("{0}")]
    Validation(String),

    #[error("invalid authorization header")]
    Unauthorized,

    #[error("{0} not found")]
    NotFound(String),

    #[error(transparent)]
    Storage(#[from] sqlx::Error),

    #[error(transparent)]
    Env(#[from] EnvErr),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl IntoResponse for RouteError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorResponse {
            error: String,
        }

        let status = match &self {
            RouteError::Validation(_) => StatusCode::BAD_REQUEST,
            RouteError::Unauthorized => StatusCode::UNAUTHORIZED,
            RouteError::NotFound(_) => StatusCode::NOT_FOUND,
            RouteError::Storage(_) | RouteError::Env(_) | RouteError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let mut response = (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response();

        // client errors are the caller's problem; only faults get traced
        if status.is_server_error() {
            response.extensions_mut().insert(Arc::new(self));
        }

        response
    }
}
