use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use thiserror::Error;

use crate::util::env::EnvErr;

pub mod models;
pub mod repositories;
pub mod seed;

pub mod prelude {
    pub use crate::db::models::PageInfo;
    pub use crate::db::models::comment::{Comment, ManageComment, NewComment};
    pub use crate::db::models::game::{
        CatalogFilter, CatalogQueryParams, Game, GameCategory, NewGame, slugify,
    };

    pub use crate::db::repositories::Repository;
    pub use crate::db::repositories::comment::CommentRepository;
    pub use crate::db::repositories::game::GameRepository;

    pub use crate::db::{Db, DbError, DbResult};
}

pub type DbResult<T> = core::result::Result<T, DbError>;

#[derive(Debug, Error)]
pub enum DbError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error(transparent)]
    Env(#[from] EnvErr),
}

pub struct Db {
    pub pool: SqlitePool,
}

impl Db {
    /// Opens the document store and applies the embedded schema. In-memory
    /// URLs are pinned to a single connection so every handle sees the same
    /// database.
    pub async fn connect(database_url: &str) -> DbResult<Self> {
        let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        let db = Self { pool };
        db.ensure_schema().await?;

        Ok(db)
    }

    /// Fresh throwaway database, used by tests.
    #[cfg(test)]
    pub async fn in_memory() -> DbResult<Self> {
        Self::connect("sqlite::memory:").await
    }

    async fn ensure_schema(&self) -> DbResult<()> {
        sqlx::raw_sql(SCHEMA).execute(&self.pool).await?;
        Ok(())
    }
}

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS game (
    id            TEXT PRIMARY KEY,
    title         TEXT NOT NULL,
    slug          TEXT NOT NULL,
    description   TEXT NOT NULL,
    embed_url     TEXT NOT NULL UNIQUE,
    thumbnail_url TEXT NOT NULL,
    category      TEXT NOT NULL,
    tags          TEXT NOT NULL DEFAULT '[]',
    language      TEXT NOT NULL DEFAULT 'en',
    featured      INTEGER NOT NULL DEFAULT 0,
    popularity    INTEGER NOT NULL DEFAULT 0,
    created_at    TEXT NOT NULL,
    updated_at    TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_game_category ON game (category);
CREATE INDEX IF NOT EXISTS idx_game_listing ON game (featured DESC, popularity DESC);
CREATE INDEX IF NOT EXISTS idx_game_slug ON game (slug);

CREATE TABLE IF NOT EXISTS comment (
    id         TEXT PRIMARY KEY,
    game_slug  TEXT NOT NULL,
    author     TEXT NOT NULL,
    content    TEXT NOT NULL,
    rating     INTEGER NOT NULL DEFAULT 5,
    likes      INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_comment_thread ON comment (game_slug, created_at DESC);
"#;
