use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::domain::popularity::{decay_one, PopularityTuning};
use crate::domain::song::SongPatch;
use crate::domain::time::days_since_last_gig;
use crate::domain::SongId;
use crate::errors::CoreError;
use crate::ports::{GameClock, SongRepository};

/// Outcome of one decay pass over the whole catalogue.
#[derive(Debug, Default)]
pub struct DecayReport {
  /// Songs inspected, including ones that needed no adjustment.
  pub examined: usize,
  /// Songs whose popularity actually changed and was persisted.
  pub adjusted: usize,
  pub failed: Vec<(SongId, CoreError)>,
}

/// Daily decay/recovery runner.
///
/// Walks every song, skips the ones performed today, and applies the
/// decay rule to the rest. The scheduler that decides when a simulated
/// day ends lives outside the engine; it just calls [`run_decay_tick`]
/// once per day.
///
/// [`run_decay_tick`]: DecayService::run_decay_tick
pub struct DecayService<R, K>
where
  R: SongRepository,
  K: GameClock,
{
  repo: R,
  clock: K,
  tuning: PopularityTuning,
}

impl<R, K> DecayService<R, K>
where
  R: SongRepository,
  K: GameClock,
{
  pub fn new(repo: R, clock: K, tuning: PopularityTuning) -> Self {
    Self { repo, clock, tuning }
  }

  pub async fn run_decay_tick(&self) -> Result<DecayReport, CoreError> {
    let songs =
      self.repo.list_songs().await.map_err(|e| CoreError::Repository(e.to_string()))?;
    let now = self.clock.now();

    let mut pending = Vec::new();
    for song in &songs {
      let days = days_since_last_gig(now, song.last_gigged_at);
      if days == 0 {
        // Performed today; the gig already set its popularity.
        continue;
      }

      let next = decay_one(song.popularity, song.fame, days, song.is_fan_favourite, &self.tuning);
      if next != song.popularity {
        debug!(
          target: "limelight::decay",
          song = %song.id,
          from = song.popularity.value(),
          to = next.value(),
          idle_days = days,
          "popularity adjusted"
        );
        pending.push((song.id, next));
      }
    }

    // Writes go out concurrently: decay of one song is independent of
    // every other song, so cross-song ordering carries no meaning here.
    let writes = pending.into_iter().map(|(id, next)| async move {
      let patch = SongPatch { popularity: Some(next), ..SongPatch::default() };
      (id, self.repo.update_song(id, &patch).await)
    });

    let mut report = DecayReport { examined: songs.len(), ..DecayReport::default() };
    for (id, result) in join_all(writes).await {
      match result {
        Ok(()) => report.adjusted += 1,
        Err(e) => {
          warn!(
            target: "limelight::decay",
            song = %id,
            error = %e,
            "decay write failed, song keeps yesterday's popularity"
          );
          report.failed.push((id, CoreError::Repository(e.to_string())));
        }
      }
    }

    info!(
      target: "limelight::decay",
      examined = report.examined,
      adjusted = report.adjusted,
      failed = report.failed.len(),
      "decay tick complete"
    );

    Ok(report)
  }
}
