//! Starter catalog data and the stubbed refresh-job record.

use chrono::Utc;
use tinyrand::{Rand, RandRange, Seeded, StdRand};
use tinyrand_std::ClockSeed;

use crate::db::models::game::{GameCategory, NewGame};

pub fn sample_games() -> Vec<NewGame> {
    vec![
        NewGame {
            title: "Labubu Merge".into(),
            description: "Merge cute Labubu characters to create new and exciting combinations!"
                .into(),
            embed_url:
                "https://html5.gamedistribution.com/f4cd70935a644d7daae05b2b4db64807/?gd_sdk_referrer_url=https://www.onlinegames.io/labubu-merge/"
                    .into(),
            thumbnail_url: "/images/Labubu-Merge.jpg".into(),
            category: GameCategory::Puzzle,
            tags: vec!["labubu".into(), "merge".into(), "puzzle".into(), "cute".into()],
            language: "en".into(),
            featured: true,
            popularity: 95,
        },
        NewGame {
            title: "Labubu Doll Mukbang ASMR".into(),
            description: "Watch Labubu enjoy delicious food in this relaxing ASMR experience!"
                .into(),
            embed_url: "https://www.twoplayergames.org/gameframe/labubu-doll-mukbang-asmr?embed=1"
                .into(),
            thumbnail_url: "/images/Labubu-Doll-Mukbang-Asmr.jpg".into(),
            category: GameCategory::Simulation,
            tags: vec!["labubu".into(), "asmr".into(), "mukbang".into(), "relaxing".into()],
            language: "en".into(),
            featured: true,
            popularity: 88,
        },
        NewGame {
            title: "Labubu Merge 1".into(),
            description: "Another version of the popular Labubu merge game!".into(),
            embed_url:
                "https://html5.gamedistribution.com/rvvASMiM/3bd8d990c6294379a7755f938a4944b4/index.html"
                    .into(),
            thumbnail_url: "/images/Labubu-Merge-1.webp".into(),
            category: GameCategory::Puzzle,
            tags: vec!["labubu".into(), "merge".into(), "puzzle".into(), "cute".into()],
            language: "en".into(),
            featured: false,
            popularity: 82,
        },
    ]
}

/// One "freshly discovered" record per refresh run. The timestamp keeps the
/// embed URL clear of the dedup constraint across repeated runs.
pub fn discovered_game() -> NewGame {
    let stamp = Utc::now().timestamp_millis();
    let mut rand = StdRand::seed(ClockSeed::default().next_u64());

    NewGame {
        title: format!("New Cute Game {stamp}"),
        description: "A freshly discovered cute game!".into(),
        embed_url: format!("https://example.com/new-game-{stamp}"),
        thumbnail_url: "/images/new-game-placeholder.jpg".into(),
        category: GameCategory::DressUp,
        tags: vec!["new".into(), "cute".into(), "fashion".into()],
        language: "en".into(),
        featured: false,
        popularity: rand.next_range(0..50u64) as i64,
    }
}
