pub mod clock;

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use limelight_core::domain::song::{Song, SongPatch};
use limelight_core::domain::{BandId, SongId};
use limelight_core::ports::favourites::{
  FavouriteEntry, FavouriteLedger, FavouriteSnapshot, FavouriteSwap, LedgerError,
};
use limelight_core::ports::{
  ConsumptionSource, ConsumptionTotals, RepoError, SignalError, SongRepository,
};

pub use clock::ManualClock;

/// In-memory implementation of the engine's storage ports.
///
/// Serves as the reference adapter for tests and the demo driver: songs
/// and consumption tallies live in plain maps, and each band's favourite
/// slots sit behind a version counter that is bumped on every committed
/// swap. Clones share the same underlying state, so one store can be
/// handed to a service once per port.
#[derive(Clone, Default)]
pub struct MemoryStore {
  inner: Arc<StoreInner>,
}

#[derive(Default)]
struct StoreInner {
  songs: RwLock<HashMap<SongId, Song>>,
  tallies: RwLock<HashMap<SongId, ConsumptionTotals>>,
  ledgers: RwLock<HashMap<BandId, BandSlots>>,
}

#[derive(Default)]
struct BandSlots {
  version: u64,
  entries: Vec<FavouriteEntry>,
}

impl MemoryStore {
  pub fn new() -> Self {
    MemoryStore::default()
  }

  /// Inserts or replaces a song record. Seeding belongs to the songwriting
  /// subsystem in the real game, so this is adapter API rather than part
  /// of any port.
  pub async fn upsert_song(&self, song: Song) {
    self.inner.songs.write().await.insert(song.id, song);
  }

  /// Replaces the consumption tallies the signal port reports for a song.
  /// In the real game these are written by the release/sales pipeline.
  pub async fn set_totals(&self, song_id: SongId, totals: ConsumptionTotals) {
    self.inner.tallies.write().await.insert(song_id, totals);
  }
}

#[async_trait::async_trait]
impl SongRepository for MemoryStore {
  async fn find_song(&self, id: SongId) -> Result<Option<Song>, RepoError> {
    Ok(self.inner.songs.read().await.get(&id).cloned())
  }

  async fn update_song(&self, id: SongId, patch: &SongPatch) -> Result<(), RepoError> {
    let mut songs = self.inner.songs.write().await;
    let song = songs.get_mut(&id).ok_or(RepoError::NotFound)?;
    patch.apply_to(song);
    Ok(())
  }

  async fn list_songs(&self) -> Result<Vec<Song>, RepoError> {
    Ok(self.inner.songs.read().await.values().cloned().collect())
  }
}

#[async_trait::async_trait]
impl ConsumptionSource for MemoryStore {
  async fn totals_for(&self, song_id: SongId) -> Result<ConsumptionTotals, SignalError> {
    // A song the pipeline has never reported on simply has no consumption.
    Ok(self.inner.tallies.read().await.get(&song_id).copied().unwrap_or_default())
  }
}

#[async_trait::async_trait]
impl FavouriteLedger for MemoryStore {
  async fn snapshot(&self, band_id: BandId) -> Result<FavouriteSnapshot, LedgerError> {
    let ledgers = self.inner.ledgers.read().await;
    Ok(match ledgers.get(&band_id) {
      Some(slots) => FavouriteSnapshot { version: slots.version, entries: slots.entries.clone() },
      None => FavouriteSnapshot { version: 0, entries: Vec::new() },
    })
  }

  async fn commit(
    &self,
    band_id: BandId,
    expected_version: u64,
    swap: &FavouriteSwap,
  ) -> Result<bool, LedgerError> {
    let mut ledgers = self.inner.ledgers.write().await;
    let slots = ledgers.entry(band_id).or_default();

    if slots.version != expected_version {
      return Ok(false);
    }

    // Both the slot entries and the song flags change under the ledger
    // lock, so a snapshot taken in between can never observe half a swap.
    let mut songs = self.inner.songs.write().await;
    if !songs.contains_key(&swap.grant) {
      return Err(LedgerError::UnknownSong(swap.grant));
    }

    if let Some(revoked) = swap.revoke {
      slots.entries.retain(|e| e.song_id != revoked);
      if let Some(song) = songs.get_mut(&revoked) {
        song.is_fan_favourite = false;
        song.fan_favourite_at = None;
      }
    }

    if let Some(song) = songs.get_mut(&swap.grant) {
      song.is_fan_favourite = true;
      song.fan_favourite_at = Some(swap.granted_at);
    }
    slots.entries.push(FavouriteEntry { song_id: swap.grant, granted_at: Some(swap.granted_at) });
    // Oldest grant first; `None < Some` keeps timestamp-less legacy
    // entries at the front, where the allocator treats them as oldest
    // but refuses to evict them.
    slots.entries.sort_by_key(|e| e.granted_at);

    slots.version += 1;
    Ok(true)
  }
}
