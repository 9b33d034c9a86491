use crate::domain::{BandId, SongId};
use async_trait::async_trait;

/// Fire-and-forget sink for favourite-rotation events.
///
/// Adapters feed news tickers, activity feeds or plain logs; failures are
/// swallowed on their side so a dead sink can never fail a gig.
#[async_trait]
pub trait FavouriteNotifier: Send + Sync {
  async fn song_promoted(&self, band_id: BandId, song_id: SongId, title: &str);
  async fn song_demoted(&self, band_id: BandId, song_id: SongId);
}
