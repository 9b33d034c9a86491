use crate::domain::ids::{BandId, SongId};
use crate::domain::time::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Current "buzz" of a song, clamped to `[0, 1000]`.
///
/// Unlike [`Fame`], popularity is volatile: it rises when the song is
/// performed and cools off during quiet stretches. Every constructor
/// clamps, so an out-of-range value is unrepresentable no matter which
/// rule produced it.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Popularity(u16);

impl Popularity {
  pub const CAP: u16 = 1000;

  /// Clamps any signed intermediate result into the valid range. The
  /// dynamics rules do their arithmetic in `i64` and funnel the outcome
  /// through here.
  pub fn clamped(raw: i64) -> Self {
    Popularity(raw.clamp(0, Self::CAP as i64) as u16)
  }

  pub const fn value(&self) -> u16 {
    self.0
  }

  /// Adds a performance gain, saturating at the cap.
  pub fn gain(&self, amount: u16) -> Self {
    Popularity::clamped(self.0 as i64 + amount as i64)
  }

  /// Subtracts a penalty, bottoming out at zero.
  pub fn lose(&self, amount: u16) -> Self {
    Popularity::clamped(self.0 as i64 - amount as i64)
  }
}

impl fmt::Display for Popularity {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}

/// Cumulative renown of a song.
///
/// Fame only ever goes up: the engine recomputes it from consumption
/// signals and keeps the larger of the stored and recomputed values.
/// There is deliberately no way to lower it through this type.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Fame(u64);

impl Fame {
  pub const ZERO: Fame = Fame(0);

  pub const fn new(value: u64) -> Self {
    Fame(value)
  }

  pub const fn value(&self) -> u64 {
    self.0
  }

  /// Returns the greater of the stored value and a freshly aggregated
  /// candidate. A stale or shrunken signal feed can therefore never make
  /// a song less famous than it already was.
  #[must_use]
  pub fn raise_to(&self, candidate: u64) -> Fame {
    Fame(self.0.max(candidate))
  }
}

impl fmt::Display for Fame {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}

/// A song as the renown engine sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
  /// Identity of the work, stable for its lifetime.
  pub id: SongId,
  /// Roster the song's favourite slots are counted against. `None` for
  /// material without a band, which is exempt from favourite accounting.
  pub band_id: Option<BandId>,
  /// Display title, carried for logs and notifications.
  pub title: String,
  /// Cumulative renown, derived from consumption signals.
  pub fame: Fame,
  /// Current buzz in `[0, 1000]`.
  pub popularity: Popularity,
  /// Lifetime count of live performances.
  pub gig_play_count: u32,
  /// When the song was last performed live, if ever.
  pub last_gigged_at: Option<Timestamp>,
  /// Whether the song currently holds one of its band's favourite slots.
  pub is_fan_favourite: bool,
  /// When favourite status was granted; doubles as the eviction-order and
  /// cooldown key.
  pub fan_favourite_at: Option<Timestamp>,
  /// Intrinsic songwriting quality, set by the songwriting subsystem and
  /// read-only here.
  pub quality_score: u8,
  /// Archived songs are permanently ineligible for favourite status.
  pub archived: bool,
}

impl Song {
  /// A freshly written song: no renown, no buzz, never performed.
  pub fn new(band_id: Option<BandId>, title: impl Into<String>, quality_score: u8) -> Self {
    Song {
      id: SongId::new(),
      band_id,
      title: title.into(),
      fame: Fame::ZERO,
      popularity: Popularity::default(),
      gig_play_count: 0,
      last_gigged_at: None,
      is_fan_favourite: false,
      fan_favourite_at: None,
      quality_score,
      archived: false,
    }
  }
}

/// Field-by-field update for a stored song.
///
/// The favourite flags are deliberately absent: they change only through
/// the favourite ledger's commit, which is how "status is revoked only by
/// slot replacement" is enforced structurally rather than by convention.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SongPatch {
  pub fame: Option<Fame>,
  pub popularity: Option<Popularity>,
  pub gig_play_count: Option<u32>,
  pub last_gigged_at: Option<Timestamp>,
}

impl SongPatch {
  pub fn is_empty(&self) -> bool {
    self.fame.is_none()
      && self.popularity.is_none()
      && self.gig_play_count.is_none()
      && self.last_gigged_at.is_none()
  }

  /// Applies the populated fields onto `song`. Store adapters share this
  /// so every backend interprets a patch identically.
  pub fn apply_to(&self, song: &mut Song) {
    if let Some(fame) = self.fame {
      song.fame = fame;
    }
    if let Some(popularity) = self.popularity {
      song.popularity = popularity;
    }
    if let Some(count) = self.gig_play_count {
      song.gig_play_count = count;
    }
    if let Some(at) = self.last_gigged_at {
      song.last_gigged_at = Some(at);
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_popularity_clamps_both_ends() {
    assert_eq!(Popularity::clamped(-50).value(), 0);
    assert_eq!(Popularity::clamped(0).value(), 0);
    assert_eq!(Popularity::clamped(437).value(), 437);
    assert_eq!(Popularity::clamped(1000).value(), 1000);
    assert_eq!(Popularity::clamped(1400).value(), 1000);
  }

  #[test]
  fn test_popularity_gain_and_lose_stay_in_range() {
    let near_cap = Popularity::clamped(995);
    assert_eq!(near_cap.gain(20).value(), 1000);

    let low = Popularity::clamped(5);
    assert_eq!(low.lose(20).value(), 0);
  }

  #[test]
  fn test_fame_raise_to_never_regresses() {
    let fame = Fame::new(130);

    assert_eq!(fame.raise_to(90).value(), 130);
    assert_eq!(fame.raise_to(130).value(), 130);
    assert_eq!(fame.raise_to(131).value(), 131);
  }

  #[test]
  fn test_new_song_starts_blank() {
    let song = Song::new(None, "Demo Tape", 55);

    assert_eq!(song.fame, Fame::ZERO);
    assert_eq!(song.popularity.value(), 0);
    assert_eq!(song.gig_play_count, 0);
    assert!(song.last_gigged_at.is_none());
    assert!(!song.is_fan_favourite);
    assert!(!song.archived);
  }

  #[test]
  fn test_patch_applies_only_populated_fields() {
    let mut song = Song::new(None, "Demo Tape", 55);
    song.popularity = Popularity::clamped(200);

    let patch =
      SongPatch { fame: Some(Fame::new(12)), gig_play_count: Some(3), ..SongPatch::default() };
    patch.apply_to(&mut song);

    assert_eq!(song.fame.value(), 12);
    assert_eq!(song.gig_play_count, 3);
    // Untouched fields keep their values.
    assert_eq!(song.popularity.value(), 200);
    assert!(song.last_gigged_at.is_none());
  }

  #[test]
  fn test_empty_patch_reports_empty() {
    assert!(SongPatch::default().is_empty());
    assert!(!SongPatch { gig_play_count: Some(1), ..SongPatch::default() }.is_empty());
  }
}
