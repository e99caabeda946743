use core::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

use crate::constants::{DEFAULT_LANGUAGE, DEFAULT_PAGE, DEFAULT_PAGE_LIMIT};

/// Fixed category vocabulary; anything else is rejected on write and
/// ignored on query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "kebab-case")]
#[sqlx(rename_all = "kebab-case")]
pub enum GameCategory {
    DressUp,
    Makeup,
    Simulation,
    Nurturing,
    Adventure,
    Puzzle,
    Romance,
    Monster,
}

impl GameCategory {
    pub const ALL: [GameCategory; 8] = [
        GameCategory::DressUp,
        GameCategory::Makeup,
        GameCategory::Simulation,
        GameCategory::Nurturing,
        GameCategory::Adventure,
        GameCategory::Puzzle,
        GameCategory::Romance,
        GameCategory::Monster,
    ];

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "dress-up" => Some(Self::DressUp),
            "makeup" => Some(Self::Makeup),
            "simulation" => Some(Self::Simulation),
            "nurturing" => Some(Self::Nurturing),
            "adventure" => Some(Self::Adventure),
            "puzzle" => Some(Self::Puzzle),
            "romance" => Some(Self::Romance),
            "monster" => Some(Self::Monster),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DressUp => "dress-up",
            Self::Makeup => "makeup",
            Self::Simulation => "simulation",
            Self::Nurturing => "nurturing",
            Self::Adventure => "adventure",
            Self::Puzzle => "puzzle",
            Self::Romance => "romance",
            Self::Monster => "monster",
        }
    }
}

impl fmt::Display for GameCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Catalog record. `embed_url` is the de-duplication key; `slug` is derived
/// from the title and is what comments reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub embed_url: String,
    pub thumbnail_url: String,
    pub category: GameCategory,
    pub tags: Vec<String>,
    pub language: String,
    pub featured: bool,
    pub popularity: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row shape as stored; tags live in a JSON column.
#[derive(Debug, Clone, FromRow)]
pub struct GameRow {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub embed_url: String,
    pub thumbnail_url: String,
    pub category: GameCategory,
    pub tags: sqlx::types::Json<Vec<String>>,
    pub language: String,
    pub featured: bool,
    pub popularity: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GameRow {
    pub fn into_game(self) -> Game {
        Game {
            id: self.id,
            title: self.title,
            slug: self.slug,
            description: self.description,
            embed_url: self.embed_url,
            thumbnail_url: self.thumbnail_url,
            category: self.category,
            tags: self.tags.0,
            language: self.language,
            featured: self.featured,
            popularity: self.popularity,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Catalog-write payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGame {
    pub title: String,
    pub description: String,
    pub embed_url: String,
    pub thumbnail_url: String,
    pub category: GameCategory,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub popularity: i64,
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

impl NewGame {
    /// Field-presence check; empty required strings count as missing.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.title.trim().is_empty()
            || self.description.trim().is_empty()
            || self.embed_url.trim().is_empty()
            || self.thumbnail_url.trim().is_empty()
        {
            return Err("missing required fields");
        }

        Ok(())
    }
}

/// Raw query parameters as they arrive on `GET /api/games`. Values are kept
/// as text so malformed numbers degrade to defaults instead of rejecting
/// the request.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct CatalogQueryParams {
    pub category: Option<String>,
    pub search: Option<String>,
    pub featured: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Normalized filter criteria with explicit optional fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogFilter {
    pub category: Option<GameCategory>,
    pub search: Option<String>,
    pub featured: bool,
    pub page: i64,
    pub limit: i64,
}

impl CatalogQueryParams {
    pub fn normalize(&self) -> CatalogFilter {
        let category = self
            .category
            .as_deref()
            .filter(|c| *c != "all")
            .and_then(GameCategory::parse);

        let search = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        let featured = self.featured.as_deref() == Some("true");

        CatalogFilter {
            category,
            search,
            featured,
            page: parse_positive(self.page.as_deref(), DEFAULT_PAGE),
            limit: parse_positive(self.limit.as_deref(), DEFAULT_PAGE_LIMIT),
        }
    }
}

impl CatalogFilter {
    pub fn offset(&self) -> i64 {
        // page/limit are caller-supplied; saturate instead of overflowing
        (self.page - 1).saturating_mul(self.limit)
    }

    /// Stable key for the listing-page cache.
    pub fn cache_key(&self) -> String {
        format!(
            "{}|{}|{}|{}|{}",
            self.category.map(|c| c.as_str()).unwrap_or("all"),
            self.search.as_deref().unwrap_or(""),
            self.featured,
            self.page,
            self.limit,
        )
    }
}

fn parse_positive(value: Option<&str>, default: i64) -> i64 {
    match value.and_then(|v| v.parse::<i64>().ok()) {
        Some(n) if n >= 1 => n,
        _ => default,
    }
}

/// Derives the URL-safe identifier comments reference: lower-cased title,
/// whitespace collapsed to single hyphens.
pub fn slugify(title: &str) -> String {
    title
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Labubu Merge"), "labubu-merge");
        assert_eq!(slugify("  Labubu  Doll Mukbang ASMR "), "labubu-doll-mukbang-asmr");
    }

    #[test]
    fn test_category_roundtrip() {
        for category in GameCategory::ALL {
            assert_eq!(GameCategory::parse(category.as_str()), Some(category));
        }
        assert_eq!(GameCategory::parse("speedrun"), None);
    }

    #[test]
    fn test_normalize_defaults_malformed_pagination() {
        let params = CatalogQueryParams {
            page: Some("banana".into()),
            limit: Some("-3".into()),
            ..Default::default()
        };

        let filter = params.normalize();
        assert_eq!(filter.page, 1);
        assert_eq!(filter.limit, 10);
    }

    #[test]
    fn test_normalize_ignores_unknown_category() {
        let params = CatalogQueryParams {
            category: Some("speedrun".into()),
            ..Default::default()
        };
        assert_eq!(params.normalize().category, None);

        let params = CatalogQueryParams {
            category: Some("all".into()),
            ..Default::default()
        };
        assert_eq!(params.normalize().category, None);

        let params = CatalogQueryParams {
            category: Some("puzzle".into()),
            ..Default::default()
        };
        assert_eq!(params.normalize().category, Some(GameCategory::Puzzle));
    }

    #[test]
    fn test_normalize_featured_flag() {
        let params = CatalogQueryParams {
            featured: Some("true".into()),
            ..Default::default()
        };
        assert!(params.normalize().featured);

        let params = CatalogQueryParams {
            featured: Some("yes".into()),
            ..Default::default()
        };
        assert!(!params.normalize().featured);
    }

    #[test]
    fn test_offset() {
        let filter = CatalogQueryParams {
            page: Some("3".into()),
            limit: Some("10".into()),
            ..Default::default()
        }
        .normalize();

        assert_eq!(filter.offset(), 20);
    }

    #[test]
    fn test_offset_saturates_on_huge_page() {
        let filter = CatalogQueryParams {
            page: Some(i64::MAX.to_string()),
            limit: Some("10".into()),
            ..Default::default()
        }
        .normalize();

        assert_eq!(filter.page, i64::MAX);
        assert_eq!(filter.offset(), i64::MAX);
    }
}
