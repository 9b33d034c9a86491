use crate::domain::{BandId, SongId, Timestamp};

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
  #[error("song not tracked by the ledger's store: {0}")]
  UnknownSong(SongId),
  #[error("storage error: {0}")]
  Storage(String),
}

/// One occupied favourite slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FavouriteEntry {
  pub song_id: SongId,
  /// When the slot was granted. Legacy records without a grant time sort
  /// first but are never considered replaceable.
  pub granted_at: Option<Timestamp>,
}

/// A band's favourite slots at one ledger version.
///
/// Entries are ordered oldest grant first, with timestamp-less entries in
/// front. The version changes on every successful commit, which is what
/// lets the allocator detect that another gig got in between its read and
/// its write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavouriteSnapshot {
  pub version: u64,
  pub entries: Vec<FavouriteEntry>,
}

/// A revoke/grant pair applied as one unit: `revoke` frees a slot (if
/// set) and `grant` fills one for the new favourite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FavouriteSwap {
  pub revoke: Option<SongId>,
  pub grant: SongId,
  pub granted_at: Timestamp,
}

/// Port over per-band favourite-slot storage.
///
/// The commit is the engine's one cross-caller critical section: it must
/// apply the swap and bump the version atomically, and must return
/// `Ok(false)` without applying anything when the caller's
/// `expected_version` is stale. Two gigs racing for a band's last slot
/// therefore cannot both win; the loser re-reads and re-decides.
#[async_trait::async_trait]
pub trait FavouriteLedger: Send + Sync {
  async fn snapshot(&self, band_id: BandId) -> Result<FavouriteSnapshot, LedgerError>;

  async fn commit(
    &self,
    band_id: BandId,
    expected_version: u64,
    swap: &FavouriteSwap,
  ) -> Result<bool, LedgerError>;
}
