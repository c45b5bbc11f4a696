use log::{info, warn};
use sea_orm::DatabaseConnection;

pub use entity::{playlists, Id};

pub mod error;
pub mod playlist;

/// Seeds a development database with a couple of shared playlists so the
/// frontend has something to render on first run.
pub async fn seed_database(db: &DatabaseConnection) {
    let samples = [
        (
            "demo-user",
            "https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M",
        ),
        (
            "demo-user",
            "https://open.spotify.com/playlist/37i9dQZF1DX0XUsuxWHRQd",
        ),
    ];

    for (user_id, link) in samples {
        let now = chrono::Utc::now();
        let model = playlists::Model {
            id: Id::new_v4(),
            user_id: user_id.to_string(),
            link: link.to_string(),
            created_at: now.into(),
            updated_at: now.into(),
        };

        match playlist::create(db, model).await {
            Ok(created) => info!("Seeded playlist {} for {}", created.link, created.user_id),
            Err(err) => warn!("Failed to seed playlist {link}: {err}"),
        }
    }
}
