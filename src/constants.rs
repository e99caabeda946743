pub const DICEBEAR_API_URL: &str = "https://api.dicebear.com/7.x";
pub const AVATAR_SIZE: u32 = 200;
pub const AVATAR_CACHE_CAPACITY: usize = 100;
pub const LISTING_CACHE_CAPACITY: usize = 64;

pub const BEARER_PREFIX: &str = "Bearer ";

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_LIMIT: i64 = 10;

// comment listings are hard-capped rather than paginated
pub const COMMENT_LIST_CAP: i64 = 50;

pub const COMMUNITY_PROFILE_COUNT: usize = 12;
pub const HOME_FEATURED_LIMIT: i64 = 6;

pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_RATING: i64 = 5;

pub const PROFILE_MAX_LEVEL: u64 = 50;
pub const PROFILE_JOIN_WINDOW_DAYS: u64 = 365;
pub const PROFILE_MAX_BADGES: u64 = 4;

pub const AVATAR_STYLES: [&str; 17] = [
    "adventurer",
    "avataaars",
    "big-smile",
    "bottts",
    "croodles",
    "fun-emoji",
    "icons",
    "identicon",
    "initials",
    "lorelei",
    "micah",
    "miniavs",
    "open-peeps",
    "personas",
    "pixel-art",
    "shapes",
    "thumbs",
];

pub const USERNAME_PREFIXES: [&str; 10] = [
    "Labubu", "Cute", "Gamer", "Monster", "Pink", "Purple", "Sweet", "Happy", "Magic", "Dream",
];

pub const USERNAME_SUFFIXES: [&str; 10] = [
    "Lover", "Fan", "Pro", "Master", "Queen", "King", "Star", "Angel", "Hero", "Legend",
];

pub const DISPLAY_NAMES: [&str; 15] = [
    "Labubu Lover",
    "Cute Gamer",
    "Monster Master",
    "Pink Princess",
    "Purple Power",
    "Sweet Dreams",
    "Happy Player",
    "Magic Maker",
    "Dream Builder",
    "Star Seeker",
    "Angel Player",
    "Hero Gamer",
    "Legend Builder",
    "Wonder Player",
    "Joy Seeker",
];

pub const PROFILE_BIOS: [&str; 10] = [
    "Love playing Labubu games! 🎮",
    "Monster paradise enthusiast 🌟",
    "Cute game collector 💕",
    "Labubu merge master 🧩",
    "ASMR game lover 🎵",
    "Puzzle solving expert 🧠",
    "Community helper 🤝",
    "Game strategy guru 📚",
    "Creative player 🎨",
    "Fun seeker 🎉",
];

pub const BADGE_TAGS: [&str; 8] = [
    "first-post",
    "high-score",
    "community-helper",
    "game-master",
    "early-adopter",
    "top-contributor",
    "screenshot-pro",
    "guide-writer",
];
