//! Synthetic profile and avatar generation.
//!
//! Avatars are URLs into the public DiceBear image API; the style component
//! is picked pseudo-randomly per call, so the only consistency a username
//! gets is whatever the injected cache still remembers. Profile stats are
//! re-rolled on every call. Display/demo machinery, not a user system.

use std::sync::Mutex;

use chrono::{Duration, Utc};
use tinyrand::{Rand, RandRange, Seeded, StdRand};
use tinyrand_std::ClockSeed;

use crate::cache::{BoundedCache, EvictionPolicy};
use crate::constants::{
    AVATAR_SIZE, AVATAR_STYLES, BADGE_TAGS, DICEBEAR_API_URL, DISPLAY_NAMES, PROFILE_BIOS,
    PROFILE_JOIN_WINDOW_DAYS, PROFILE_MAX_BADGES, PROFILE_MAX_LEVEL, USERNAME_PREFIXES,
    USERNAME_SUFFIXES,
};

pub mod profile;

pub use profile::{ProfileStats, UserProfile};

pub struct AvatarGenerator {
    cache: Mutex<BoundedCache<String, String>>,
}

impl AvatarGenerator {
    pub fn new(capacity: usize, policy: EvictionPolicy) -> Self {
        Self {
            cache: Mutex::new(BoundedCache::new(capacity, policy)),
        }
    }

    /// Builds a DiceBear image URL for the given seed and style.
    pub fn avatar_url(seed: &str, style: &str, size: u32) -> String {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("seed", seed)
            .append_pair("size", &size.to_string())
            .finish();

        format!("{DICEBEAR_API_URL}/{style}/svg?{query}")
    }

    /// Cache-backed avatar lookup for a username. A hit returns the exact
    /// URL handed out before; a miss rolls a fresh style, so consistency
    /// only holds for as long as the entry survives eviction.
    pub fn consistent_avatar(&self, username: &str) -> String {
        let mut cache = self.cache.lock().unwrap();
        if let Some(url) = cache.get(&username.to_string()) {
            return url.clone();
        }

        let mut rand = clock_rand();
        let url = Self::avatar_url(username, pick(&mut rand, &AVATAR_STYLES), AVATAR_SIZE);
        cache.insert(username.to_string(), url.clone());

        url
    }

    pub fn cached(&self, username: &str) -> bool {
        self.cache.lock().unwrap().contains(&username.to_string())
    }

    /// Rolls a complete profile for the seed. Everything except the seed
    /// itself is randomized per call; reloading a community page shows new
    /// numbers every time.
    pub fn generate_profile(&self, seed: &str) -> UserProfile {
        let mut rand = clock_rand();

        let username = format!(
            "{}{}{}",
            pick(&mut rand, &USERNAME_PREFIXES),
            pick(&mut rand, &USERNAME_SUFFIXES),
            rand.next_range(1..1000usize),
        );

        UserProfile {
            id: uuid::Uuid::new_v4().to_string(),
            username,
            display_name: pick(&mut rand, &DISPLAY_NAMES).to_string(),
            bio: pick(&mut rand, &PROFILE_BIOS).to_string(),
            join_date: join_date(&mut rand),
            level: 1 + rand.next_range(0..PROFILE_MAX_LEVEL) as u32,
            badges: badges(&mut rand),
            stats: ProfileStats {
                posts: rand.next_range(0..101u64) as u32,
                likes: rand.next_range(0..1001u64) as u32,
                comments: rand.next_range(0..501u64) as u32,
                games_played: rand.next_range(0..51u64) as u32,
            },
            avatar: Self::avatar_url(seed, pick(&mut rand, &AVATAR_STYLES), AVATAR_SIZE),
        }
    }

    /// Batch generation for the community page.
    pub fn generate_profiles(&self, count: usize) -> Vec<UserProfile> {
        let batch = Utc::now().timestamp_millis();
        (0..count)
            .map(|i| self.generate_profile(&format!("user-{i}-{batch}")))
            .collect()
    }
}

fn clock_rand() -> StdRand {
    StdRand::seed(ClockSeed::default().next_u64())
}

fn pick<'a>(rand: &mut StdRand, items: &'a [&'a str]) -> &'a str {
    items[rand.next_range(0..items.len())]
}

fn join_date(rand: &mut StdRand) -> String {
    let days_ago = rand.next_range(0..PROFILE_JOIN_WINDOW_DAYS) as i64;
    (Utc::now() - Duration::days(days_ago))
        .format("%Y-%m-%d")
        .to_string()
}

/// Draws 1-4 distinct badge tags via a partial shuffle.
fn badges(rand: &mut StdRand) -> Vec<String> {
    let count = 1 + rand.next_range(0..PROFILE_MAX_BADGES) as usize;
    let mut pool = BADGE_TAGS.to_vec();

    for i in 0..count {
        let j = i + rand.next_range(0..(pool.len() - i));
        pool.swap(i, j);
    }

    pool.truncate(count);
    pool.into_iter().map(str::to_string).collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::constants::AVATAR_CACHE_CAPACITY;

    #[test]
    fn test_avatar_url_shape() {
        let url = AvatarGenerator::avatar_url("mika n", "bottts", 200);
        assert_eq!(
            url,
            "https://api.dicebear.com/7.x/bottts/svg?seed=mika+n&size=200"
        );
    }

    #[test]
    fn test_consistent_avatar_is_stable_while_cached() {
        let avatars = AvatarGenerator::new(AVATAR_CACHE_CAPACITY, EvictionPolicy::Lru);

        let first = avatars.consistent_avatar("LabubuLover42");
        let second = avatars.consistent_avatar("LabubuLover42");

        assert_eq!(first, second);
    }

    #[test]
    fn test_fifo_cache_drops_oldest_username_at_capacity() {
        let avatars = AvatarGenerator::new(AVATAR_CACHE_CAPACITY, EvictionPolicy::Fifo);

        avatars.consistent_avatar("user-0");
        for i in 1..=AVATAR_CACHE_CAPACITY {
            avatars.consistent_avatar(&format!("user-{i}"));
        }

        assert!(!avatars.cached("user-0"));
        assert!(avatars.cached(&format!("user-{AVATAR_CACHE_CAPACITY}")));
    }

    #[test]
    fn test_profile_fields_stay_in_range() {
        let avatars = AvatarGenerator::new(AVATAR_CACHE_CAPACITY, EvictionPolicy::Lru);

        for _ in 0..50 {
            let profile = avatars.generate_profile("seed");

            assert!((1..=50).contains(&profile.level));
            assert!((1..=4).contains(&profile.badges.len()));
            for badge in &profile.badges {
                assert!(BADGE_TAGS.contains(&badge.as_str()));
            }

            let mut unique = profile.badges.clone();
            unique.sort();
            unique.dedup();
            assert_eq!(unique.len(), profile.badges.len());

            assert!(profile.stats.posts <= 100);
            assert!(profile.stats.likes <= 1000);
            assert!(profile.stats.comments <= 500);
            assert!(profile.stats.games_played <= 50);

            assert!(profile.avatar.starts_with(DICEBEAR_API_URL));
            assert!(profile.avatar.contains("seed=seed"));
            assert_eq!(profile.join_date.len(), 10);
        }
    }

    #[test]
    fn test_profile_batch_count() {
        let avatars = AvatarGenerator::new(AVATAR_CACHE_CAPACITY, EvictionPolicy::Lru);
        assert_eq!(avatars.generate_profiles(12).len(), 12);
    }
}
