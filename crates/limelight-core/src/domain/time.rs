use serde::{Deserialize, Serialize};

pub const SECONDS_PER_DAY: u64 = 86_400;

/// Day count reported for a song that has never been performed.
///
/// The decay rules only compare against small thresholds (one day, two
/// weeks), so "effectively forever" is all that matters here. The song
/// record itself keeps `Option<Timestamp>`; this sentinel exists only at
/// the boundary where the decay rule needs a plain number.
pub const NEVER_GIGGED_DAYS: u32 = 999;

/// A point in simulated time, stored as unix seconds.
///
/// Fame and favourite bookkeeping only ever reason in whole elapsed days,
/// so the arithmetic here is deliberately coarse: fractions of a day are
/// dropped, and subtraction saturates instead of going negative when a
/// stored timestamp is ahead of the clock.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Timestamp(u64);

impl Timestamp {
  pub const fn from_unix(secs: u64) -> Self {
    Timestamp(secs)
  }

  pub const fn as_unix(&self) -> u64 {
    self.0
  }

  /// Whole days elapsed from `earlier` to `self`; zero if `earlier` is in
  /// the future.
  pub fn days_since(&self, earlier: Timestamp) -> u32 {
    let days = self.0.saturating_sub(earlier.0) / SECONDS_PER_DAY;
    days.min(u32::MAX as u64) as u32
  }

  pub fn plus_days(&self, days: u64) -> Timestamp {
    Timestamp(self.0.saturating_add(days * SECONDS_PER_DAY))
  }

  pub fn minus_days(&self, days: u64) -> Timestamp {
    Timestamp(self.0.saturating_sub(days * SECONDS_PER_DAY))
  }
}

/// Resolves a song's `last_gigged_at` into the day count the decay rule
/// consumes, mapping "never performed" to [`NEVER_GIGGED_DAYS`].
pub fn days_since_last_gig(now: Timestamp, last_gigged_at: Option<Timestamp>) -> u32 {
  match last_gigged_at {
    Some(last) => now.days_since(last),
    None => NEVER_GIGGED_DAYS,
  }
}
