use serde::{Deserialize, Serialize};

/// Synthetic community member. Never persisted; every field except the
/// cached avatar URL is re-randomized on each generation call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    pub display_name: String,
    pub bio: String,
    pub join_date: String,
    pub level: u32,
    pub badges: Vec<String>,
    pub stats: ProfileStats,
    pub avatar: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileStats {
    pub posts: u32,
    pub likes: u32,
    pub comments: u32,
    pub games_played: u32,
}
