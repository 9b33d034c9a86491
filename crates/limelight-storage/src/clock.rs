use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use limelight_core::domain::Timestamp;
use limelight_core::domain::time::SECONDS_PER_DAY;
use limelight_core::ports::GameClock;

/// Hand-cranked clock for tests and scripted seasons.
///
/// Clones share the same instant, so the driver advancing the day is
/// immediately visible to every service holding a handle.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
  now: Arc<AtomicU64>,
}

impl ManualClock {
  pub fn starting_at(now: Timestamp) -> Self {
    ManualClock { now: Arc::new(AtomicU64::new(now.as_unix())) }
  }

  pub fn set(&self, now: Timestamp) {
    self.now.store(now.as_unix(), Ordering::SeqCst);
  }

  pub fn advance_days(&self, days: u64) {
    self.now.fetch_add(days * SECONDS_PER_DAY, Ordering::SeqCst);
  }
}

impl GameClock for ManualClock {
  fn now(&self) -> Timestamp {
    Timestamp::from_unix(self.now.load(Ordering::SeqCst))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_clones_share_the_same_instant() {
    let clock = ManualClock::starting_at(Timestamp::from_unix(1_000));
    let handle = clock.clone();

    clock.advance_days(2);

    assert_eq!(handle.now(), Timestamp::from_unix(1_000 + 2 * SECONDS_PER_DAY));
  }

  #[test]
  fn test_set_overwrites_the_instant() {
    let clock = ManualClock::default();
    clock.set(Timestamp::from_unix(123));

    assert_eq!(clock.now(), Timestamp::from_unix(123));
  }
}
