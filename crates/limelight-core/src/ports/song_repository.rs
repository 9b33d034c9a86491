use crate::domain::song::{Song, SongPatch};
use crate::domain::SongId;

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
  #[error("entity not found")]
  NotFound,
  #[error("storage error: {0}")]
  Storage(String),
}

/// Port for the generic read/update-by-id song store.
///
/// The engine never creates or deletes songs; it loads them, patches the
/// renown fields and writes them back. Which technology sits behind this
/// is an adapter decision.
#[async_trait::async_trait]
pub trait SongRepository: Send + Sync {
  async fn find_song(&self, id: SongId) -> Result<Option<Song>, RepoError>;

  /// Applies the populated patch fields to the stored record. Fails with
  /// [`RepoError::NotFound`] when the song does not exist.
  async fn update_song(&self, id: SongId, patch: &SongPatch) -> Result<(), RepoError>;

  async fn list_songs(&self) -> Result<Vec<Song>, RepoError>;
}
