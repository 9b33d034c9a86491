use thiserror::Error;

/// Top-level error of the renown engine's services.
///
/// Upper layers (the simulation driver, a future HTTP surface, etc.) should
/// map this to logs; none of these conditions is meant to reach a player.
#[derive(Debug, Error)]
pub enum CoreError {
  #[error("repository error: {0}")]
  Repository(String),

  #[error("consumption signal error: {0}")]
  Signals(String),

  #[error("favourite ledger error: {0}")]
  Favourites(String),

  #[error("song not found")]
  NotFound,

  /// The favourite ledger kept moving under us; the allocation attempt was
  /// abandoned after repeated version conflicts.
  #[error("favourite ledger contention")]
  Contention,
}
