use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use chrono::{DateTime, Utc};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;

use crate::api::server::{AppState, JsonResult, RouteError};
use crate::db::prelude::*;
use crate::db::seed;

/// Catalog page plus its pagination envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct CatalogPage {
    pub games: Vec<Game>,
    pub pagination: PageInfo,
}

#[derive(Debug, Serialize)]
pub struct CommentSubmitted {
    pub message: String,
    pub comment: Comment,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshSummary {
    pub success: bool,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentListQuery {
    pub game_id: Option<String>,
}

#[instrument(skip(state))]
pub async fn list_games(
    Query(params): Query<CatalogQueryParams>,
    State(state): State<Arc<AppState>>,
) -> JsonResult<CatalogPage> {
    let filter = params.normalize();
    let games = GameRepository::new(state.pool.clone());

    let (page, total) = games.query(&filter).await?;

    Ok(Json(CatalogPage {
        games: page,
        pagination: PageInfo::new(total, filter.page, filter.limit),
    }))
}

#[instrument(skip(state, body))]
pub async fn create_game(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Game>), RouteError> {
    let new: NewGame = serde_json::from_value(body)
        .map_err(|_| RouteError::Validation("missing required fields".into()))?;
    new.validate().map_err(|e| RouteError::Validation(e.into()))?;

    let games = GameRepository::new(state.pool.clone());
    let game = games.insert(&new).await?;

    Ok((StatusCode::CREATED, Json(game)))
}

#[instrument(skip(state))]
pub async fn list_comments(
    Query(params): Query<CommentListQuery>,
    State(state): State<Arc<AppState>>,
) -> JsonResult<Vec<Comment>> {
    let game_id = params
        .game_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| RouteError::Validation("Game ID is required".into()))?;

    let comments = CommentRepository::new(state.pool.clone());
    let thread = comments.list_for_game(&game_id).await?;

    Ok(Json(thread))
}

#[instrument(skip(state, body))]
pub async fn create_comment(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> JsonResult<CommentSubmitted> {
    let new: NewComment = serde_json::from_value(body)
        .map_err(|_| RouteError::Validation("Missing required fields".into()))?;
    new.validate().map_err(|e| RouteError::Validation(e.into()))?;

    let comments = CommentRepository::new(state.pool.clone());
    let comment = comments.insert(&new).await?;

    Ok(Json(CommentSubmitted {
        message: "Comment submitted successfully".into(),
        comment,
    }))
}

/// Comment moderation-ish actions. `like` carries no idempotency key, so
/// every call bumps the counter again.
#[instrument(skip(state, body))]
pub async fn manage_comment(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> JsonResult<Comment> {
    let manage: ManageComment = serde_json::from_value(body)
        .map_err(|_| RouteError::Validation("commentId and action are required".into()))?;

    match manage.action.as_str() {
        "like" => {
            let comments = CommentRepository::new(state.pool.clone());
            comments
                .like(&manage.comment_id)
                .await?
                .map(Json)
                .ok_or(RouteError::NotFound(manage.comment_id))
        }
        other => Err(RouteError::Validation(format!("unsupported action '{other}'"))),
    }
}

/// Stubbed weekly refresh: records one discovered game and drops every
/// cached listing page. Reached only through the bearer-gated route.
#[instrument(skip(state))]
pub async fn update_games(State(state): State<Arc<AppState>>) -> JsonResult<RefreshSummary> {
    let games = GameRepository::new(state.pool.clone());

    let updated = match games.insert(&seed::discovered_game()).await {
        Ok(_) => 1,
        Err(e) => {
            tracing::error!(error = ?e, "refresh job insert failed");
            0
        }
    };

    state.listing_cache.lock().unwrap().clear();
    tracing::info!(updated, "catalog refresh complete");

    Ok(Json(RefreshSummary {
        success: true,
        message: format!("Updated {updated} games"),
        timestamp: Utc::now(),
    }))
}
