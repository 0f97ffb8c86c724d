//! Database seeder for Mixtape development and testing.
//!
//! Seeds a couple of demo song records so the gallery has content before
//! any real upload happens. The referenced object URLs are placeholders.
//!
//! Usage: cargo run --bin seeder

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

use mixtape_db::entities::songs;

/// Demo song IDs (consistent for all seeds)
const DEMO_SONGS: &[(&str, &str, &str)] = &[
    (
        "00000000-0000-0000-0000-000000000101",
        "Neon Horizon",
        "Glass Harbor",
    ),
    (
        "00000000-0000-0000-0000-000000000102",
        "Paper Planes at Dawn",
        "The Streetlights",
    ),
];

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = mixtape_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding demo songs...");
    seed_demo_songs(&db).await;

    println!("Seeding complete!");
}

async fn seed_demo_songs(db: &DatabaseConnection) {
    for (id, title, artist) in DEMO_SONGS {
        let id = Uuid::parse_str(id).unwrap();

        let existing = songs::Entity::find_by_id(id)
            .one(db)
            .await
            .expect("Failed to query songs");
        if existing.is_some() {
            println!("  song '{title}' already seeded, skipping");
            continue;
        }

        let song = songs::ActiveModel {
            id: Set(id),
            title: Set((*title).to_string()),
            artist: Set((*artist).to_string()),
            cover_url: Set(format!("/files/covers/{id}-cover.png")),
            song_url: Set(format!("/files/songs/{id}-track.mp3")),
            created_at: Set(Utc::now().into()),
        };
        song.insert(db).await.expect("Failed to insert demo song");
        println!("  seeded '{title}' by {artist}");
    }
}
