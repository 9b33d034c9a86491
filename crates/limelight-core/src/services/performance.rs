use std::sync::Mutex;

use rand::Rng;
use tracing::{debug, info, warn};

use crate::domain::fame::{fame_from_sources, FameWeights};
use crate::domain::favourite::{roll_fan_favourite, CrowdResponse, FavouriteTuning};
use crate::domain::popularity::{overplay_penalty, performance_gain, PopularityTuning};
use crate::domain::song::{Fame, Popularity, Song, SongPatch};
use crate::domain::{BandId, SongId, Timestamp};
use crate::errors::CoreError;
use crate::ports::favourites::FavouriteSwap;
use crate::ports::{
  ConsumptionSource, FavouriteLedger, FavouriteNotifier, GameClock, SongRepository,
};

/// How often the favourite allocator re-reads and retries after losing a
/// ledger version race before giving up on the gig's roll.
const MAX_COMMIT_ATTEMPTS: u32 = 4;

/// The complete tuning state of the engine, one table per concern.
#[derive(Debug, Clone, Default)]
pub struct EngineTuning {
  pub fame: FameWeights,
  pub popularity: PopularityTuning,
  pub favourite: FavouriteTuning,
}

/// One song's outcome within a gig, as reported by gig resolution.
#[derive(Debug, Clone)]
pub struct SongPerformance {
  pub song_id: SongId,
  pub crowd_response: CrowdResponse,
  /// Slot in the set list, counting from one; the final slot is the
  /// encore.
  pub position: u32,
}

/// What happened to each song of one gig. Failures are collected, not
/// propagated: one song's bad day never cancels the rest of the set.
#[derive(Debug, Default)]
pub struct GigReport {
  pub updated: Vec<SongId>,
  pub promoted: Vec<SongId>,
  pub failed: Vec<(SongId, CoreError)>,
}

impl GigReport {
  pub fn is_clean(&self) -> bool {
    self.failed.is_empty()
  }
}

struct PerformanceOutcome {
  popularity: Popularity,
  fame: Fame,
  promoted: bool,
}

/// Post-performance orchestrator: folds one concluded gig into per-song
/// fame, popularity and favourite state.
///
/// Called once per gig by gig resolution. Songs are processed strictly in
/// set-list order; the only state contended with other concurrent gigs is
/// the band's favourite ledger, which the allocator guards with a
/// version-checked commit.
pub struct PerformanceService<R, C, L, N, K, G>
where
  R: SongRepository,
  C: ConsumptionSource,
  L: FavouriteLedger,
  N: FavouriteNotifier,
  K: GameClock,
  G: Rng + Send,
{
  repo: R,
  signals: C,
  ledger: L,
  notifier: N,
  clock: K,
  rng: Mutex<G>,
  tuning: EngineTuning,
}

impl<R, C, L, N, K, G> PerformanceService<R, C, L, N, K, G>
where
  R: SongRepository,
  C: ConsumptionSource,
  L: FavouriteLedger,
  N: FavouriteNotifier,
  K: GameClock,
  G: Rng + Send,
{
  pub fn new(
    repo: R,
    signals: C,
    ledger: L,
    notifier: N,
    clock: K,
    rng: G,
    tuning: EngineTuning,
  ) -> Self {
    Self { repo, signals, ledger, notifier, clock, rng: Mutex::new(rng), tuning }
  }

  /// Folds a concluded gig into song state, one performance at a time:
  /// bump the play count, apply the performance gain, refresh fame from
  /// the consumption ledgers, roll the favourite policy, persist.
  ///
  /// `band_id` is the roster favourite slots are counted against; `None`
  /// (material without a band) skips favourite accounting entirely.
  pub async fn update_songs_after_gig(
    &self,
    performances: &[SongPerformance],
    band_id: Option<BandId>,
    total_songs_in_set: u32,
  ) -> GigReport {
    let mut report = GigReport::default();

    for perf in performances {
      match self.process_performance(perf, band_id, total_songs_in_set).await {
        Ok(outcome) => {
          debug!(
            target: "limelight::performance",
            song = %perf.song_id,
            crowd = perf.crowd_response.as_str(),
            popularity = outcome.popularity.value(),
            fame = outcome.fame.value(),
            "song updated after gig"
          );
          report.updated.push(perf.song_id);
          if outcome.promoted {
            report.promoted.push(perf.song_id);
          }
        }
        Err(e) => {
          warn!(
            target: "limelight::performance",
            song = %perf.song_id,
            error = %e,
            "song update failed, continuing with the rest of the set"
          );
          report.failed.push((perf.song_id, e));
        }
      }
    }

    info!(
      target: "limelight::performance",
      band = ?band_id.map(|b| b.to_string()),
      songs = performances.len(),
      promoted = report.promoted.len(),
      failed = report.failed.len(),
      "gig folded into song state"
    );

    report
  }

  async fn process_performance(
    &self,
    perf: &SongPerformance,
    band_id: Option<BandId>,
    total_songs_in_set: u32,
  ) -> Result<PerformanceOutcome, CoreError> {
    let song = self
      .repo
      .find_song(perf.song_id)
      .await
      .map_err(|e| CoreError::Repository(e.to_string()))?
      .ok_or(CoreError::NotFound)?;

    let now = self.clock.now();
    let new_count = song.gig_play_count.saturating_add(1);

    // Performance gain uses the post-increment count and the favourite
    // flag as it stood when the band walked on stage.
    let gain = performance_gain(new_count, song.is_fan_favourite, &self.tuning.popularity);
    let new_popularity = song.popularity.gain(gain);

    // Fame is re-aggregated from fresh signals and can only move up.
    let totals = self
      .signals
      .totals_for(perf.song_id)
      .await
      .map_err(|e| CoreError::Signals(e.to_string()))?;
    let sources = totals.into_sources(new_count);
    let new_fame = song.fame.raise_to(fame_from_sources(&sources, &self.tuning.fame));

    // Only the final slot of the set counts as the encore.
    let is_encore = perf.position >= total_songs_in_set;

    let mut promoted = false;
    if let Some(band) = band_id {
      let won_roll = {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        roll_fan_favourite(
          &mut *rng,
          perf.crowd_response,
          is_encore,
          song.quality_score,
          song.archived,
          song.is_fan_favourite,
          &self.tuning.favourite,
        )
      };
      if won_roll {
        promoted = self.allocate_favourite(band, &song, now).await?;
      }
    }

    let patch = SongPatch {
      fame: Some(new_fame),
      popularity: Some(new_popularity),
      gig_play_count: Some(new_count),
      last_gigged_at: Some(now),
    };
    self
      .repo
      .update_song(perf.song_id, &patch)
      .await
      .map_err(|e| CoreError::Repository(e.to_string()))?;

    Ok(PerformanceOutcome { popularity: new_popularity, fame: new_fame, promoted })
  }

  /// Tries to seat `song` in one of its band's favourite slots.
  ///
  /// Read-decide-commit against the versioned ledger: a free slot is
  /// taken directly; with all slots full the oldest favourite is rotated
  /// out if its grant has aged past the cooldown, otherwise the promotion
  /// is refused. A version conflict means another gig committed first, so
  /// the allocator re-reads and re-decides from scratch.
  async fn allocate_favourite(
    &self,
    band_id: BandId,
    song: &Song,
    now: Timestamp,
  ) -> Result<bool, CoreError> {
    let tuning = &self.tuning.favourite;

    for attempt in 1..=MAX_COMMIT_ATTEMPTS {
      let snap = self
        .ledger
        .snapshot(band_id)
        .await
        .map_err(|e| CoreError::Favourites(e.to_string()))?;

      debug_assert!(
        snap.entries.len() <= tuning.max_slots,
        "favourite ledger for band {band_id} holds {} entries, cap is {}",
        snap.entries.len(),
        tuning.max_slots
      );

      let swap = if snap.entries.len() < tuning.max_slots {
        FavouriteSwap { revoke: None, grant: song.id, granted_at: now }
      } else {
        let Some(oldest) = snap.entries.first() else {
          // Zero configured slots: nothing to grant into.
          return Ok(false);
        };
        match oldest.granted_at {
          Some(granted) if now.days_since(granted) >= tuning.replace_after_days => {
            FavouriteSwap { revoke: Some(oldest.song_id), grant: song.id, granted_at: now }
          }
          // Oldest is still inside its cooldown, or carries no grant
          // time and is therefore not replaceable.
          _ => return Ok(false),
        }
      };

      let committed = self
        .ledger
        .commit(band_id, snap.version, &swap)
        .await
        .map_err(|e| CoreError::Favourites(e.to_string()))?;

      if committed {
        if let Some(evicted) = swap.revoke {
          info!(
            target: "limelight::favourites",
            band = %band_id,
            song = %evicted,
            "fan favourite rotated out"
          );
          self.notifier.song_demoted(band_id, evicted).await;
        }
        info!(
          target: "limelight::favourites",
          band = %band_id,
          song = %song.id,
          title = %song.title,
          "fan favourite granted"
        );
        self.notifier.song_promoted(band_id, song.id, &song.title).await;
        return Ok(true);
      }

      warn!(
        target: "limelight::favourites",
        band = %band_id,
        attempt,
        "favourite ledger version moved, retrying"
      );
    }

    Err(CoreError::Contention)
  }

  /// Deducts the overplay penalty from a song's stored popularity.
  ///
  /// Gig processing itself applies only the performance gain; this hook
  /// exists for callers that track trailing-window play counts and want
  /// the stricter rule. Returns the popularity after the deduction.
  pub async fn apply_overplay_penalty(
    &self,
    song_id: SongId,
    recent_gig_count: u32,
  ) -> Result<Popularity, CoreError> {
    let song = self
      .repo
      .find_song(song_id)
      .await
      .map_err(|e| CoreError::Repository(e.to_string()))?
      .ok_or(CoreError::NotFound)?;

    let penalty = overplay_penalty(recent_gig_count, &self.tuning.popularity);
    if penalty == 0 {
      return Ok(song.popularity);
    }

    let new_popularity = song.popularity.lose(penalty);
    let patch = SongPatch { popularity: Some(new_popularity), ..SongPatch::default() };
    self
      .repo
      .update_song(song_id, &patch)
      .await
      .map_err(|e| CoreError::Repository(e.to_string()))?;

    debug!(
      target: "limelight::performance",
      song = %song_id,
      recent_gigs = recent_gig_count,
      penalty,
      popularity = new_popularity.value(),
      "overplay penalty applied"
    );

    Ok(new_popularity)
  }

  // -------- QUERY (read) --------

  pub async fn get_song(&self, id: SongId) -> Result<Option<Song>, CoreError> {
    self.repo.find_song(id).await.map_err(|e| CoreError::Repository(e.to_string()))
  }

  pub async fn list_songs(&self) -> Result<Vec<Song>, CoreError> {
    self.repo.list_songs().await.map_err(|e| CoreError::Repository(e.to_string()))
  }
}
