//! Playlist link persistence.

use crate::error::{DomainErrorKind, EntityErrorKind, Error, InternalErrorKind};
use crate::playlists::Model;
use entity_api::playlist;
use log::*;
use sea_orm::DatabaseConnection;

/// Submitted links must point at the Spotify web player.
pub const PLAYLIST_LINK_PREFIX: &str = "https://open.spotify.com/";

/// Store a submitted playlist link after checking it carries the expected
/// provider prefix. No further sanitization happens here; persistence is
/// parameterized below this layer.
pub async fn create(db: &DatabaseConnection, model: Model) -> Result<Model, Error> {
    if !model.link.starts_with(PLAYLIST_LINK_PREFIX) {
        warn!("Rejecting playlist link that is not a Spotify web player link");
        return Err(Error {
            source: None,
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Entity(
                EntityErrorKind::Invalid,
            )),
        });
    }

    Ok(playlist::create(db, model).await?)
}

/// List every stored playlist.
pub async fn find_all(db: &DatabaseConnection) -> Result<Vec<Model>, Error> {
    Ok(playlist::find_all(db).await?)
}
