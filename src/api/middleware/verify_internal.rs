use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use http::header::AUTHORIZATION;

use crate::api::server::{AppState, RouteError};
use crate::constants::BEARER_PREFIX;
use crate::util::constant_time_cmp;

/// Gate for the catalog-refresh route: the caller must present the exact
/// bearer secret the process was configured with. Missing, malformed and
/// wrong tokens all collapse into the same 401.
pub async fn verify_cron_ident(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Result<Response, RouteError> {
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(|header| header.strip_prefix(BEARER_PREFIX))
        .ok_or(RouteError::Unauthorized)?;

    if !constant_time_cmp(token, &state.cron_secret) {
        return Err(RouteError::Unauthorized);
    }

    Ok(next.run(req).await)
}
