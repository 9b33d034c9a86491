use async_trait::async_trait;
use limelight_core::domain::{BandId, SongId};
use limelight_core::ports::FavouriteNotifier;
use tracing::info;

/// A `FavouriteNotifier` implementation that lands rotation events in the
/// tracing feed.
///
/// Stands in for the game's news-ticker service; the port is
/// fire-and-forget either way, so a sink swap never touches the engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl FavouriteNotifier for LogNotifier {
  async fn song_promoted(&self, band_id: BandId, song_id: SongId, title: &str) {
    info!(target: "limelight::notify", band = %band_id, song = %song_id, title, "new fan favourite");
  }

  async fn song_demoted(&self, band_id: BandId, song_id: SongId) {
    info!(target: "limelight::notify", band = %band_id, song = %song_id, "fan favourite rotated out");
  }
}
