//! Song service implementation.

use std::sync::Arc;

use uuid::Uuid;

use super::error::SongError;
use super::types::{CreateSongInput, Song, UploadSongInput};
use crate::storage::{MediaKind, StorageService};

/// Repository trait for song persistence.
///
/// This trait is implemented by the db crate to provide actual database operations.
pub trait SongRepository: Send + Sync {
    /// Create a new song record.
    fn create(
        &self,
        input: CreateSongInput,
    ) -> impl std::future::Future<Output = Result<Song, SongError>> + Send;

    /// List all song records, newest first.
    fn list(&self) -> impl std::future::Future<Output = Result<Vec<Song>, SongError>> + Send;

    /// Delete a song record by ID, returning the deleted record if it existed.
    fn delete(
        &self,
        id: Uuid,
    ) -> impl std::future::Future<Output = Result<Option<Song>, SongError>> + Send;
}

/// Song service for managing the music library.
pub struct SongService<R: SongRepository> {
    storage: Arc<StorageService>,
    repo: Arc<R>,
}

impl<R: SongRepository> SongService<R> {
    /// Create a new song service.
    #[must_use]
    pub fn new(storage: Arc<StorageService>, repo: Arc<R>) -> Self {
        Self { storage, repo }
    }

    /// Upload a song: store the cover image and audio file, then create the
    /// metadata record referencing their public URLs.
    ///
    /// Validation happens before any object is written; a rejected upload
    /// leaves storage untouched. Once writes begin the sequence is linear
    /// and not rolled back on failure.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Title or artist is empty
    /// - Either file is empty, too large, or has a disallowed MIME type
    /// - A storage write fails
    /// - The database insert fails
    pub async fn upload(&self, input: UploadSongInput) -> Result<Song, SongError> {
        let title = input.title.trim();
        let artist = input.artist.trim();

        if title.is_empty() {
            return Err(SongError::validation("title must not be empty"));
        }
        if artist.is_empty() {
            return Err(SongError::validation("artist must not be empty"));
        }
        if input.cover.bytes.is_empty() {
            return Err(SongError::validation("cover file is empty"));
        }
        if input.song.bytes.is_empty() {
            return Err(SongError::validation("song file is empty"));
        }

        self.storage.validate_upload(
            MediaKind::Cover,
            &input.cover.content_type,
            input.cover.size(),
        )?;
        self.storage.validate_upload(
            MediaKind::Audio,
            &input.song.content_type,
            input.song.size(),
        )?;

        // The record ID doubles as the storage-key disambiguator.
        let id = Uuid::new_v4();
        let cover_key = StorageService::object_key(MediaKind::Cover, id, &input.cover.filename);
        let song_key = StorageService::object_key(MediaKind::Audio, id, &input.song.filename);

        self.storage
            .write(&cover_key, input.cover.bytes, &input.cover.content_type)
            .await?;
        self.storage
            .write(&song_key, input.song.bytes, &input.song.content_type)
            .await?;

        let create_input = CreateSongInput {
            id,
            title: title.to_string(),
            artist: artist.to_string(),
            cover_url: self.storage.public_url(&cover_key),
            song_url: self.storage.public_url(&song_key),
        };

        self.repo.create(create_input).await
    }

    /// List all songs, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn list(&self) -> Result<Vec<Song>, SongError> {
        self.repo.list().await
    }

    /// Delete a song record and return its data.
    ///
    /// Stored objects are not removed; only the metadata record.
    ///
    /// # Errors
    ///
    /// Returns an error if the song does not exist or the database
    /// operation fails.
    pub async fn delete(&self, id: Uuid) -> Result<Song, SongError> {
        self.repo
            .delete(id)
            .await?
            .ok_or_else(|| SongError::not_found(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::song::FileUpload;
    use crate::storage::{StorageConfig, StorageError, StorageProvider};
    use bytes::Bytes;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::sync::Mutex;

    /// Mock repository for testing.
    struct MockSongRepository {
        songs: Mutex<HashMap<Uuid, Song>>,
    }

    impl MockSongRepository {
        fn new() -> Self {
            Self {
                songs: Mutex::new(HashMap::new()),
            }
        }

        fn len(&self) -> usize {
            self.songs.lock().unwrap().len()
        }
    }

    impl SongRepository for MockSongRepository {
        async fn create(&self, input: CreateSongInput) -> Result<Song, SongError> {
            let song = Song {
                id: input.id,
                title: input.title,
                artist: input.artist,
                cover_url: input.cover_url,
                song_url: input.song_url,
                created_at: chrono::Utc::now(),
            };
            self.songs.lock().unwrap().insert(song.id, song.clone());
            Ok(song)
        }

        async fn list(&self) -> Result<Vec<Song>, SongError> {
            let songs = self.songs.lock().unwrap();
            let mut all: Vec<Song> = songs.values().cloned().collect();
            all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(all)
        }

        async fn delete(&self, id: Uuid) -> Result<Option<Song>, SongError> {
            Ok(self.songs.lock().unwrap().remove(&id))
        }
    }

    struct TestContext {
        service: SongService<MockSongRepository>,
        repo: Arc<MockSongRepository>,
        storage: Arc<StorageService>,
        root: PathBuf,
    }

    impl TestContext {
        fn new() -> Self {
            let root =
                std::env::temp_dir().join(format!("mixtape-song-test-{}", Uuid::new_v4()));
            let config = StorageConfig::new(StorageProvider::local_fs(&root));
            let storage =
                Arc::new(StorageService::from_config(config).expect("should create storage"));
            let repo = Arc::new(MockSongRepository::new());
            Self {
                service: SongService::new(storage.clone(), repo.clone()),
                repo,
                storage,
                root,
            }
        }

        /// Count of objects written under the storage root.
        fn stored_object_count(&self) -> usize {
            let mut count = 0;
            let mut dirs = vec![self.root.clone()];
            while let Some(dir) = dirs.pop() {
                let Ok(entries) = std::fs::read_dir(&dir) else {
                    continue;
                };
                for entry in entries.flatten() {
                    let path = entry.path();
                    if path.is_dir() {
                        dirs.push(path);
                    } else {
                        count += 1;
                    }
                }
            }
            count
        }
    }

    impl Drop for TestContext {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.root);
        }
    }

    fn valid_input() -> UploadSongInput {
        UploadSongInput {
            title: "Midnight Drive".to_string(),
            artist: "The Streetlights".to_string(),
            cover: FileUpload::new("art.png", "image/png", Bytes::from_static(b"png bytes")),
            song: FileUpload::new("track.mp3", "audio/mpeg", Bytes::from_static(b"mp3 bytes")),
        }
    }

    /// Recover the storage key from a local public URL.
    fn key_from_url(url: &str) -> &str {
        url.strip_prefix("/files/").expect("local public url")
    }

    #[tokio::test]
    async fn test_upload_creates_record_and_objects() {
        let ctx = TestContext::new();

        let song = ctx
            .service
            .upload(valid_input())
            .await
            .expect("upload should succeed");

        assert_eq!(song.title, "Midnight Drive");
        assert_eq!(song.artist, "The Streetlights");
        assert_eq!(ctx.repo.len(), 1);

        assert!(ctx.storage.exists(key_from_url(&song.cover_url)).await);
        assert!(ctx.storage.exists(key_from_url(&song.song_url)).await);
        assert!(song.cover_url.contains(&song.id.to_string()));
        assert!(song.song_url.contains(&song.id.to_string()));
    }

    #[tokio::test]
    async fn test_upload_empty_title_rejected_without_side_effects() {
        let ctx = TestContext::new();

        let mut input = valid_input();
        input.title = "   ".to_string();

        let result = ctx.service.upload(input).await;
        assert!(matches!(result, Err(SongError::Validation(_))));
        assert_eq!(ctx.repo.len(), 0);
        assert_eq!(ctx.stored_object_count(), 0);
    }

    #[tokio::test]
    async fn test_upload_empty_artist_rejected() {
        let ctx = TestContext::new();

        let mut input = valid_input();
        input.artist = String::new();

        let result = ctx.service.upload(input).await;
        assert!(matches!(result, Err(SongError::Validation(_))));
        assert_eq!(ctx.repo.len(), 0);
    }

    #[tokio::test]
    async fn test_upload_empty_file_rejected() {
        let ctx = TestContext::new();

        let mut input = valid_input();
        input.song.bytes = Bytes::new();

        let result = ctx.service.upload(input).await;
        assert!(matches!(result, Err(SongError::Validation(_))));
        assert_eq!(ctx.stored_object_count(), 0);
    }

    #[tokio::test]
    async fn test_upload_invalid_mime_rejected_without_side_effects() {
        let ctx = TestContext::new();

        let mut input = valid_input();
        input.song.content_type = "application/x-executable".to_string();

        let result = ctx.service.upload(input).await;
        assert!(matches!(
            result,
            Err(SongError::Storage(StorageError::InvalidMimeType { .. }))
        ));
        assert_eq!(ctx.repo.len(), 0);
        assert_eq!(ctx.stored_object_count(), 0);
    }

    #[tokio::test]
    async fn test_upload_then_list_includes_record_once() {
        let ctx = TestContext::new();

        let song = ctx
            .service
            .upload(valid_input())
            .await
            .expect("upload should succeed");

        let listed = ctx.service.list().await.expect("list should succeed");
        assert_eq!(listed.iter().filter(|s| s.id == song.id).count(), 1);
    }

    #[tokio::test]
    async fn test_delete_removes_record_keeps_objects() {
        let ctx = TestContext::new();

        let song = ctx
            .service
            .upload(valid_input())
            .await
            .expect("upload should succeed");

        let deleted = ctx
            .service
            .delete(song.id)
            .await
            .expect("delete should succeed");
        assert_eq!(deleted.id, song.id);
        assert_eq!(deleted.title, song.title);

        let listed = ctx.service.list().await.expect("list should succeed");
        assert!(listed.iter().all(|s| s.id != song.id));

        // Objects survive record deletion
        assert!(ctx.storage.exists(key_from_url(&song.cover_url)).await);
        assert!(ctx.storage.exists(key_from_url(&song.song_url)).await);
    }

    #[tokio::test]
    async fn test_delete_unknown_returns_not_found() {
        let ctx = TestContext::new();

        let result = ctx.service.delete(Uuid::new_v4()).await;
        assert!(matches!(result, Err(SongError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_empty_returns_empty_vec() {
        let ctx = TestContext::new();

        let listed = ctx.service.list().await.expect("list should succeed");
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_uploads_never_overwrite() {
        let ctx = TestContext::new();

        let first = ctx
            .service
            .upload(valid_input())
            .await
            .expect("first upload should succeed");
        let second = ctx
            .service
            .upload(valid_input())
            .await
            .expect("second upload should succeed");

        // Same filenames, distinct disambiguators, distinct objects
        assert_ne!(first.song_url, second.song_url);
        assert_ne!(first.cover_url, second.cover_url);
        assert!(ctx.storage.exists(key_from_url(&first.song_url)).await);
        assert!(ctx.storage.exists(key_from_url(&second.song_url)).await);
        assert_eq!(ctx.repo.len(), 2);
    }
}
