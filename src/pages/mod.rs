//! Server-rendered views. Pure presentation over the repositories and the
//! profile generator; no view here owns any state of its own.

use std::fmt::Write;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse, Response};
use http::StatusCode;
use tracing::instrument;

use crate::api::server::{AppState, RouteError};
use crate::avatar::UserProfile;
use crate::constants::{COMMUNITY_PROFILE_COUNT, HOME_FEATURED_LIMIT};
use crate::db::prelude::*;

#[instrument(skip(state))]
pub async fn home(State(state): State<Arc<AppState>>) -> Result<Html<String>, RouteError> {
    let games = GameRepository::new(state.pool.clone());
    let filter = CatalogFilter {
        category: None,
        search: None,
        featured: true,
        page: 1,
        limit: HOME_FEATURED_LIMIT,
    };

    let (featured, _) = games.query(&filter).await?;

    let mut body = String::from("<h1>Labubu Fan Games</h1><section class=\"featured\">");
    for game in &featured {
        let _ = write!(body, "{}", game_card(game));
    }
    body.push_str("</section><p><a href=\"/games\">Browse the full catalog</a></p>");

    Ok(Html(layout("Labubu Fan Games", &body)))
}

/// Catalog listing. Rendered pages are cached by normalized filter and
/// only the admin refresh clears them, so a direct `POST /api/games` can
/// leave a warm page stale until the next refresh run.
#[instrument(skip(state))]
pub async fn games_index(
    Query(params): Query<CatalogQueryParams>,
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, RouteError> {
    let filter = params.normalize();
    let key = filter.cache_key();

    if let Some(cached) = state.listing_cache.lock().unwrap().get(&key) {
        return Ok(Html(cached.clone()));
    }

    let games = GameRepository::new(state.pool.clone());
    let (page, total) = games.query(&filter).await?;
    let info = PageInfo::new(total, filter.page, filter.limit);

    let mut body = String::from("<h1>All Games</h1><nav class=\"categories\"><a href=\"/games\">all</a>");
    for category in GameCategory::ALL {
        let _ = write!(
            body,
            " <a href=\"/games?category={category}\">{category}</a>"
        );
    }
    body.push_str("</nav><section class=\"grid\">");

    for game in &page {
        let _ = write!(body, "{}", game_card(game));
    }

    let _ = write!(
        body,
        "</section><footer class=\"pager\">page {} of {} ({} games)</footer>",
        info.page, info.pages, info.total
    );

    let html = layout("All Games", &body);
    state
        .listing_cache
        .lock()
        .unwrap()
        .insert(key, html.clone());

    Ok(Html(html))
}

#[instrument(skip(state))]
pub async fn play(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Response, RouteError> {
    let games = GameRepository::new(state.pool.clone());

    let Some(game) = games.find_by_slug(&slug).await? else {
        let body = format!(
            "<h1>Game not found</h1><p>No game lives at <code>{}</code>. \
             <a href=\"/games\">Back to the catalog</a></p>",
            escape_html(&slug)
        );
        return Ok((StatusCode::NOT_FOUND, Html(layout("Not found", &body))).into_response());
    };

    let comments = CommentRepository::new(state.pool.clone());
    let thread = comments.list_for_game(&game.slug).await?;

    let mut body = format!(
        "<h1>{title}</h1>\
         <iframe src=\"{embed}\" title=\"{title}\" allowfullscreen></iframe>\
         <p class=\"fallback\">Game not loading? \
         <a href=\"{embed}\" target=\"_blank\" rel=\"noopener\">Open it in a new tab</a></p>\
         <p>{description}</p>",
        title = escape_html(&game.title),
        embed = escape_html(&game.embed_url),
        description = escape_html(&game.description),
    );

    let _ = write!(body, "<section class=\"comments\"><h2>Comments ({})</h2>", thread.len());
    for comment in &thread {
        let _ = write!(
            body,
            "<article><strong>{}</strong> rated {}/5 · {} likes<p>{}</p></article>",
            escape_html(&comment.author),
            comment.rating,
            comment.likes,
            escape_html(&comment.content),
        );
    }
    body.push_str("</section>");

    Ok(Html(layout(&game.title, &body)).into_response())
}

#[instrument(skip(state))]
pub async fn community(State(state): State<Arc<AppState>>) -> Html<String> {
    let profiles = state.avatars.generate_profiles(COMMUNITY_PROFILE_COUNT);

    let mut body = String::from("<h1>Community</h1><section class=\"members\">");
    for profile in &profiles {
        let _ = write!(body, "{}", profile_card(profile));
    }
    body.push_str("</section>");

    Html(layout("Community", &body))
}

#[instrument(skip(state))]
pub async fn user_profile(
    State(state): State<Arc<AppState>>,
    Path(seed): Path<String>,
) -> Html<String> {
    let mut profile = state.avatars.generate_profile(&seed);
    // the displayed avatar goes through the cache so a reload within its
    // lifetime shows the same image, even though the stats re-roll
    profile.avatar = state.avatars.consistent_avatar(&seed);

    let body = format!(
        "<h1>{display}</h1>\
         <img src=\"{avatar}\" alt=\"{username}\" width=\"200\" height=\"200\">\
         <p>@{username} · level {level} · joined {joined}</p>\
         <p>{bio}</p>\
         <ul class=\"badges\">{badges}</ul>\
         <dl class=\"stats\">\
         <dt>posts</dt><dd>{posts}</dd>\
         <dt>likes</dt><dd>{likes}</dd>\
         <dt>comments</dt><dd>{comments}</dd>\
         <dt>games played</dt><dd>{games_played}</dd>\
         </dl>",
        display = escape_html(&profile.display_name),
        avatar = escape_html(&profile.avatar),
        username = escape_html(&profile.username),
        level = profile.level,
        joined = profile.join_date,
        bio = escape_html(&profile.bio),
        badges = profile
            .badges
            .iter()
            .map(|b| format!("<li>{}</li>", escape_html(b)))
            .collect::<String>(),
        posts = profile.stats.posts,
        likes = profile.stats.likes,
        comments = profile.stats.comments,
        games_played = profile.stats.games_played,
    );

    Html(layout(&profile.display_name, &body))
}

fn game_card(game: &Game) -> String {
    format!(
        "<article class=\"game-card{featured}\">\
         <a href=\"/play/{slug}\"><img src=\"{thumb}\" alt=\"{title}\">\
         <h3>{title}</h3></a><span class=\"category\">{category}</span></article>",
        featured = if game.featured { " featured" } else { "" },
        slug = escape_html(&game.slug),
        thumb = escape_html(&game.thumbnail_url),
        title = escape_html(&game.title),
        category = game.category,
    )
}

fn profile_card(profile: &UserProfile) -> String {
    format!(
        "<article class=\"member\"><img src=\"{avatar}\" alt=\"{username}\">\
         <a href=\"/users/{username}\">{display}</a><span>level {level}</span></article>",
        avatar = escape_html(&profile.avatar),
        username = escape_html(&profile.username),
        display = escape_html(&profile.display_name),
        level = profile.level,
    )
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!doctype html><html lang=\"en\"><head><meta charset=\"utf-8\">\
         <title>{} · labubu.fan</title></head><body>{}</body></html>",
        escape_html(title),
        body
    )
}

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
