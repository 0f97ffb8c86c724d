//! Song repository for database operations.
//!
//! Implements song CRUD operations using SeaORM.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use uuid::Uuid;

use crate::entities::songs;
use mixtape_core::song::{
    CreateSongInput, Song, SongError, SongRepository as SongRepoTrait,
};

/// Song repository implementation.
#[derive(Debug, Clone)]
pub struct SongRepository {
    db: DatabaseConnection,
}

impl SongRepository {
    /// Create a new song repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl SongRepoTrait for SongRepository {
    async fn create(&self, input: CreateSongInput) -> Result<Song, SongError> {
        let active_model = songs::ActiveModel {
            id: Set(input.id),
            title: Set(input.title),
            artist: Set(input.artist),
            cover_url: Set(input.cover_url),
            song_url: Set(input.song_url),
            created_at: Set(Utc::now().into()),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| SongError::repository(e.to_string()))?;

        Ok(to_domain(model))
    }

    async fn list(&self) -> Result<Vec<Song>, SongError> {
        let models = songs::Entity::find()
            .order_by_desc(songs::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| SongError::repository(e.to_string()))?;

        Ok(models.into_iter().map(to_domain).collect())
    }

    async fn delete(&self, id: Uuid) -> Result<Option<Song>, SongError> {
        let Some(model) = songs::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SongError::repository(e.to_string()))?
        else {
            return Ok(None);
        };

        songs::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SongError::repository(e.to_string()))?;

        Ok(Some(to_domain(model)))
    }
}

/// Convert database model to domain model.
fn to_domain(model: songs::Model) -> Song {
    Song {
        id: model.id,
        title: model.title,
        artist: model.artist,
        cover_url: model.cover_url,
        song_url: model.song_url,
        created_at: model.created_at.with_timezone(&chrono::Utc),
    }
}
