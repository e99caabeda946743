use async_trait::async_trait;
use sqlx::{Result as SqlxResult, SqlitePool};

pub mod comment;
pub mod game;

/// Base repository surface shared by the catalog and comment stores.
#[async_trait]
pub trait Repository {
    const TABLE_NAME: &'static str;

    fn new(pool: SqlitePool) -> Self;

    fn pool(&self) -> &SqlitePool;

    async fn count(&self) -> SqlxResult<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}", Self::TABLE_NAME);
        sqlx::query_scalar(&sql).fetch_one(self.pool()).await
    }
}
