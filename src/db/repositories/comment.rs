use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Result as SqlxResult, SqlitePool};
use tracing::instrument;

use crate::constants::{COMMENT_LIST_CAP, DEFAULT_RATING};
use crate::db::models::comment::{Comment, NewComment};
use crate::db::repositories::Repository;

#[derive(Debug, Clone)]
pub struct CommentRepository {
    pool: SqlitePool,
}

#[async_trait]
impl Repository for CommentRepository {
    const TABLE_NAME: &'static str = "comment";

    fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl CommentRepository {
    #[instrument(skip(self, new), fields(game_slug = %new.game_id))]
    pub async fn insert(&self, new: &NewComment) -> SqlxResult<Comment> {
        let now = Utc::now();
        let comment = Comment {
            id: uuid::Uuid::new_v4().to_string(),
            game_slug: new.game_id.clone(),
            author: new.author_name.clone(),
            content: new.content.clone(),
            rating: new.rating.unwrap_or(DEFAULT_RATING),
            likes: 0,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r#"
            INSERT INTO comment (
                id, game_slug, author, content, rating, likes,
                created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&comment.id)
        .bind(&comment.game_slug)
        .bind(&comment.author)
        .bind(&comment.content)
        .bind(comment.rating)
        .bind(comment.likes)
        .bind(comment.created_at)
        .bind(comment.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(comment)
    }

    /// Newest-first thread for a game slug, hard-capped at 50 entries.
    /// There is deliberately no pagination past the cap.
    #[instrument(skip(self))]
    pub async fn list_for_game(&self, game_slug: &str) -> SqlxResult<Vec<Comment>> {
        sqlx::query_as(
            r#"
            SELECT * FROM comment
            WHERE game_slug = ?
            ORDER BY created_at DESC, rowid DESC
            LIMIT ?
            "#,
        )
        .bind(game_slug)
        .bind(COMMENT_LIST_CAP)
        .fetch_all(&self.pool)
        .await
    }

    /// Bumps the like counter by exactly one. There is no idempotency key;
    /// every call increments again.
    #[instrument(skip(self))]
    pub async fn like(&self, comment_id: &str) -> SqlxResult<Option<Comment>> {
        sqlx::query_as(
            r#"
            UPDATE comment
            SET likes = likes + 1, updated_at = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(Utc::now())
        .bind(comment_id)
        .fetch_optional(&self.pool)
        .await
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::db::Db;

    fn comment(game: &str, author: &str, content: &str, rating: Option<i64>) -> NewComment {
        NewComment {
            game_id: game.into(),
            author_name: author.into(),
            content: content.into(),
            rating,
        }
    }

    async fn repo() -> CommentRepository {
        let db = Db::in_memory().await.unwrap();
        CommentRepository::new(db.pool)
    }

    #[tokio::test]
    async fn test_submission_roundtrip() {
        let comments = repo().await;
        comments
            .insert(&comment("labubu-merge", "Ann", "fun", Some(4)))
            .await
            .unwrap();

        let thread = comments.list_for_game("labubu-merge").await.unwrap();
        assert_eq!(thread.len(), 1);
        assert_eq!(thread[0].author, "Ann");
        assert_eq!(thread[0].content, "fun");
        assert_eq!(thread[0].rating, 4);
        assert_eq!(thread[0].likes, 0);
    }

    #[tokio::test]
    async fn test_rating_defaults_to_five() {
        let comments = repo().await;
        let stored = comments
            .insert(&comment("labubu-merge", "Ann", "fun", None))
            .await
            .unwrap();

        assert_eq!(stored.rating, 5);
    }

    #[tokio::test]
    async fn test_thread_is_newest_first_and_capped() {
        let comments = repo().await;
        for i in 0..55 {
            comments
                .insert(&comment("labubu-merge", "Ann", &format!("comment {i}"), None))
                .await
                .unwrap();
        }

        let thread = comments.list_for_game("labubu-merge").await.unwrap();
        assert_eq!(thread.len(), 50);
        assert_eq!(thread[0].content, "comment 54");
        for pair in thread.windows(2) {
            assert!(pair[0].created_at >= pair[1].created_at);
        }
    }

    #[tokio::test]
    async fn test_like_is_not_idempotent() {
        let comments = repo().await;
        let stored = comments
            .insert(&comment("labubu-merge", "Ann", "fun", None))
            .await
            .unwrap();

        comments.like(&stored.id).await.unwrap();
        let liked = comments.like(&stored.id).await.unwrap().unwrap();

        assert_eq!(liked.likes, 2);
    }

    #[tokio::test]
    async fn test_like_unknown_comment_is_none() {
        let comments = repo().await;
        assert!(comments.like("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_orphan_slug_is_accepted() {
        // no referential check against the catalog, by design
        let comments = repo().await;
        comments
            .insert(&comment("never-a-game", "Ann", "hello?", None))
            .await
            .unwrap();

        assert_eq!(comments.list_for_game("never-a-game").await.unwrap().len(), 1);
    }
}
