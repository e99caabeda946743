use serde::{Deserialize, Serialize};

pub mod comment;
pub mod game;

/// Offset-pagination envelope returned alongside catalog pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub total: i64,
    pub page: i64,
    pub pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PageInfo {
    pub fn new(total: i64, page: i64, limit: i64) -> Self {
        let pages = (total as f64 / limit as f64).ceil() as i64;
        Self {
            total,
            page,
            pages,
            has_next: page < pages,
            has_prev: page > 1,
        }
    }
}
