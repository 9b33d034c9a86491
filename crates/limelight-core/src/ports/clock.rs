use crate::domain::Timestamp;
use std::time::{SystemTime, UNIX_EPOCH};

/// Injected time source.
///
/// Decay cadence and the favourite cooldown both reason about "now"; an
/// explicit clock keeps them testable and lets the simulation driver run
/// game time faster than wall time.
pub trait GameClock: Send + Sync {
  fn now(&self) -> Timestamp;
}

/// Wall-clock implementation for deployments where game time is real time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl GameClock for SystemClock {
  fn now(&self) -> Timestamp {
    let secs = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_secs();
    Timestamp::from_unix(secs)
  }
}
