use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

/// Per-game comment. `game_slug` references a game by its derived slug; no
/// referential check is performed, so a comment may point at a slug the
/// catalog never contained.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub game_slug: String,
    pub author: String,
    pub content: String,
    pub rating: i64,
    pub likes: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Comment-submission payload; `game_id` carries the target game's slug.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub game_id: String,
    pub author_name: String,
    pub content: String,
    pub rating: Option<i64>,
}

impl NewComment {
    /// Presence check only: the rating is stored as-is when supplied, even
    /// out of the 1-5 range.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.game_id.trim().is_empty()
            || self.author_name.trim().is_empty()
            || self.content.trim().is_empty()
        {
            return Err("Missing required fields");
        }

        Ok(())
    }
}

/// `PUT /api/comments/manage` payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManageComment {
    pub comment_id: String,
    pub action: String,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_validate_rejects_blank_required_fields() {
        let new = NewComment {
            game_id: "labubu-merge".into(),
            author_name: "Ann".into(),
            content: "   ".into(),
            rating: None,
        };

        assert!(new.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_out_of_range_rating() {
        let new = NewComment {
            game_id: "labubu-merge".into(),
            author_name: "Ann".into(),
            content: "fun".into(),
            rating: Some(11),
        };

        assert!(new.validate().is_ok());
    }
}
