use async_trait::async_trait;
use chrono::Utc;
use sqlx::{QueryBuilder, Result as SqlxResult, Sqlite, SqlitePool};
use tracing::instrument;

use crate::db::models::game::{CatalogFilter, Game, GameRow, NewGame, slugify};
use crate::db::repositories::Repository;
use crate::db::seed::sample_games;

#[derive(Debug, Clone)]
pub struct GameRepository {
    pool: SqlitePool,
}

#[async_trait]
impl Repository for GameRepository {
    const TABLE_NAME: &'static str = "game";

    fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl GameRepository {
    /// Inserts a catalog record. The UNIQUE constraint on `embed_url` is the
    /// de-duplication key; a second insert for the same URL fails here.
    #[instrument(skip(self, new), fields(title = %new.title))]
    pub async fn insert(&self, new: &NewGame) -> SqlxResult<Game> {
        let now = Utc::now();
        let game = Game {
            id: uuid::Uuid::new_v4().to_string(),
            slug: slugify(&new.title),
            title: new.title.clone(),
            description: new.description.clone(),
            embed_url: new.embed_url.clone(),
            thumbnail_url: new.thumbnail_url.clone(),
            category: new.category,
            tags: new.tags.clone(),
            language: new.language.clone(),
            featured: new.featured,
            popularity: new.popularity,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r#"
            INSERT INTO game (
                id, title, slug, description, embed_url, thumbnail_url,
                category, tags, language, featured, popularity,
                created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&game.id)
        .bind(&game.title)
        .bind(&game.slug)
        .bind(&game.description)
        .bind(&game.embed_url)
        .bind(&game.thumbnail_url)
        .bind(game.category)
        .bind(sqlx::types::Json(&game.tags))
        .bind(&game.language)
        .bind(game.featured)
        .bind(game.popularity)
        .bind(game.created_at)
        .bind(game.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(game)
    }

    /// Filtered, sorted catalog page plus the full matching-set count.
    /// Ordering is fixed: featured, then popularity, then recency.
    #[instrument(skip(self))]
    pub async fn query(&self, filter: &CatalogFilter) -> SqlxResult<(Vec<Game>, i64)> {
        let mut listing = QueryBuilder::<Sqlite>::new("SELECT * FROM game WHERE 1=1");
        push_filters(&mut listing, filter);
        listing
            .push(" ORDER BY featured DESC, popularity DESC, created_at DESC, rowid ASC LIMIT ")
            .push_bind(filter.limit)
            .push(" OFFSET ")
            .push_bind(filter.offset());

        let rows: Vec<GameRow> = listing.build_query_as().fetch_all(&self.pool).await?;

        let mut counting = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM game WHERE 1=1");
        push_filters(&mut counting, filter);
        let total: i64 = counting.build_query_scalar().fetch_one(&self.pool).await?;

        Ok((rows.into_iter().map(GameRow::into_game).collect(), total))
    }

    /// First record carrying the slug, in storage order. Slugs are derived
    /// from titles and are not guaranteed unique.
    #[instrument(skip(self))]
    pub async fn find_by_slug(&self, slug: &str) -> SqlxResult<Option<Game>> {
        let row: Option<GameRow> = sqlx::query_as("SELECT * FROM game WHERE slug = ? LIMIT 1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(GameRow::into_game))
    }

    /// Seeds the starter catalog on an empty store; returns how many records
    /// were written.
    #[instrument(skip(self))]
    pub async fn seed_sample_catalog(&self) -> SqlxResult<usize> {
        if self.count().await? > 0 {
            return Ok(0);
        }

        let games = sample_games();
        for game in &games {
            self.insert(game).await?;
        }

        tracing::info!(count = games.len(), "seeded sample catalog");
        Ok(games.len())
    }
}

fn push_filters(qb: &mut QueryBuilder<'_, Sqlite>, filter: &CatalogFilter) {
    if let Some(category) = filter.category {
        qb.push(" AND category = ").push_bind(category.as_str());
    }

    if filter.featured {
        qb.push(" AND featured = 1");
    }

    if let Some(search) = &filter.search {
        let pattern = format!("%{}%", search.to_lowercase());
        qb.push(" AND (LOWER(title) LIKE ")
            .push_bind(pattern.clone())
            .push(" OR LOWER(description) LIKE ")
            .push_bind(pattern.clone())
            .push(" OR LOWER(tags) LIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::db::Db;
    use crate::db::models::game::{CatalogQueryParams, GameCategory};

    fn game(title: &str, embed: &str, category: GameCategory, featured: bool, pop: i64) -> NewGame {
        NewGame {
            title: title.into(),
            description: format!("{title} description"),
            embed_url: embed.into(),
            thumbnail_url: format!("/images/{title}.jpg"),
            category,
            tags: vec!["labubu".into(), "cute".into()],
            language: "en".into(),
            featured,
            popularity: pop,
        }
    }

    async fn repo() -> GameRepository {
        let db = Db::in_memory().await.unwrap();
        GameRepository::new(db.pool)
    }

    #[tokio::test]
    async fn test_embed_url_is_the_dedup_key() {
        let games = repo().await;
        let first = game("Labubu Merge", "https://g.example/merge", GameCategory::Puzzle, true, 95);
        games.insert(&first).await.unwrap();

        let dupe = game("Labubu Merge Two", "https://g.example/merge", GameCategory::Puzzle, false, 10);
        assert!(games.insert(&dupe).await.is_err());
        assert_eq!(games.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_listing_order_featured_then_popularity() {
        let games = repo().await;
        games.insert(&game("a", "https://g.example/a", GameCategory::Puzzle, false, 90)).await.unwrap();
        games.insert(&game("b", "https://g.example/b", GameCategory::Puzzle, true, 10)).await.unwrap();
        games.insert(&game("c", "https://g.example/c", GameCategory::Romance, true, 80)).await.unwrap();
        games.insert(&game("d", "https://g.example/d", GameCategory::Monster, false, 40)).await.unwrap();

        let (page, total) = games
            .query(&CatalogQueryParams::default().normalize())
            .await
            .unwrap();

        assert_eq!(total, 4);
        for pair in page.windows(2) {
            assert!(pair[0].featured >= pair[1].featured);
            if pair[0].featured == pair[1].featured {
                assert!(pair[0].popularity >= pair[1].popularity);
            }
        }
        assert_eq!(page[0].title, "c");
    }

    #[tokio::test]
    async fn test_total_is_page_independent() {
        let games = repo().await;
        for i in 0..12 {
            games
                .insert(&game(&format!("g{i}"), &format!("https://g.example/{i}"), GameCategory::Puzzle, false, i))
                .await
                .unwrap();
        }

        let filter = CatalogQueryParams {
            page: Some("2".into()),
            limit: Some("5".into()),
            ..Default::default()
        }
        .normalize();

        let (page, total) = games.query(&filter).await.unwrap();
        assert_eq!(page.len(), 5);
        assert_eq!(total, 12);

        let filter = CatalogQueryParams {
            page: Some("3".into()),
            limit: Some("5".into()),
            ..Default::default()
        }
        .normalize();

        let (page, total) = games.query(&filter).await.unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(total, 12);
    }

    #[tokio::test]
    async fn test_search_matches_title_description_and_tags() {
        let games = repo().await;
        let mut asmr = game("Doll Mukbang", "https://g.example/asmr", GameCategory::Simulation, false, 50);
        asmr.tags = vec!["asmr".into(), "relaxing".into()];
        games.insert(&asmr).await.unwrap();
        games.insert(&game("Merge Party", "https://g.example/mp", GameCategory::Puzzle, false, 60)).await.unwrap();

        let filter = CatalogQueryParams {
            search: Some("ASMR".into()),
            ..Default::default()
        }
        .normalize();

        let (page, total) = games.query(&filter).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(page[0].title, "Doll Mukbang");
    }

    #[tokio::test]
    async fn test_category_and_featured_filters() {
        let games = repo().await;
        games.insert(&game("a", "https://g.example/a", GameCategory::Puzzle, true, 1)).await.unwrap();
        games.insert(&game("b", "https://g.example/b", GameCategory::Romance, true, 2)).await.unwrap();
        games.insert(&game("c", "https://g.example/c", GameCategory::Puzzle, false, 3)).await.unwrap();

        let filter = CatalogQueryParams {
            category: Some("puzzle".into()),
            featured: Some("true".into()),
            ..Default::default()
        }
        .normalize();

        let (page, total) = games.query(&filter).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(page[0].title, "a");
    }

    #[tokio::test]
    async fn test_zero_results_is_an_empty_page() {
        let games = repo().await;
        let filter = CatalogQueryParams {
            search: Some("nothing matches this".into()),
            ..Default::default()
        }
        .normalize();

        let (page, total) = games.query(&filter).await.unwrap();
        assert!(page.is_empty());
        assert_eq!(total, 0);
    }

    #[tokio::test]
    async fn test_find_by_slug() {
        let games = repo().await;
        games.insert(&game("Labubu Merge", "https://g.example/m", GameCategory::Puzzle, true, 95)).await.unwrap();

        let found = games.find_by_slug("labubu-merge").await.unwrap();
        assert_eq!(found.unwrap().title, "Labubu Merge");
        assert!(games.find_by_slug("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_seed_runs_once() {
        let games = repo().await;
        let seeded = games.seed_sample_catalog().await.unwrap();
        assert!(seeded > 0);
        assert_eq!(games.seed_sample_catalog().await.unwrap(), 0);
    }
}
