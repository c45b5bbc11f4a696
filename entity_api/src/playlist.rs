use super::error::Error;
use entity::playlists::{ActiveModel, Entity, Model};
use log::debug;
use sea_orm::{entity::prelude::*, ActiveValue::Set, DatabaseConnection, TryIntoModel};

/// Creates a new playlist record. The id and timestamps are always assigned
/// server-side regardless of what the caller supplied.
pub async fn create(db: &DatabaseConnection, model: Model) -> Result<Model, Error> {
    debug!("Creating playlist link for user_id: {}", model.user_id);

    let now = chrono::Utc::now();

    let active_model = ActiveModel {
        user_id: Set(model.user_id),
        link: Set(model.link),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    };

    Ok(active_model.save(db).await?.try_into_model()?)
}

/// Returns every stored playlist record.
pub async fn find_all(db: &DatabaseConnection) -> Result<Vec<Model>, Error> {
    Ok(Entity::find().all(db).await?)
}
