use crate::domain::song::{Fame, Popularity};
use serde::{Deserialize, Serialize};

/// Rates and thresholds of the popularity dynamics.
///
/// Defaults are the shipped balance; the `[popularity]` config section can
/// override individual values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PopularityTuning {
  /// Base buzz from a first-ever performance; later performances divide
  /// this by the square root of the lifetime play count.
  #[serde(default = "default_base_gain")]
  pub base_gain: f64,
  /// Flat extra buzz when the performed song is a fan favourite.
  #[serde(default = "default_favourite_bonus")]
  pub favourite_bonus: f64,
  /// Performances inside the trailing window that carry no penalty; every
  /// play beyond these costs `overplay_step` popularity.
  #[serde(default = "default_overplay_free_plays")]
  pub overplay_free_plays: u32,
  /// Popularity lost per overplayed performance.
  #[serde(default = "default_overplay_step")]
  pub overplay_step: u16,
  /// Popularity above this counts as "hot" and cools on idle days.
  #[serde(default = "default_hot_threshold")]
  pub hot_threshold: u16,
  /// Daily cooling rate for ordinary songs.
  #[serde(default = "default_decay_per_day")]
  pub decay_per_day: u16,
  /// Daily cooling rate for fan favourites.
  #[serde(default = "default_favourite_decay_per_day")]
  pub favourite_decay_per_day: u16,
  /// Idle days before a famous song starts drifting back up.
  #[serde(default = "default_recovery_after_days")]
  pub recovery_after_days: u32,
  /// Minimum fame before dormant recovery applies at all.
  #[serde(default = "default_recovery_min_fame")]
  pub recovery_min_fame: u64,
  /// Recovery climbs toward `fame / recovery_fame_divisor`.
  #[serde(default = "default_recovery_fame_divisor")]
  pub recovery_fame_divisor: u64,
  /// Popularity regained per decay pass while below the recovery ceiling.
  #[serde(default = "default_recovery_step")]
  pub recovery_step: u16,
}

fn default_base_gain() -> f64 {
  15.0
}

fn default_favourite_bonus() -> f64 {
  10.0
}

fn default_overplay_free_plays() -> u32 {
  2
}

fn default_overplay_step() -> u16 {
  20
}

fn default_hot_threshold() -> u16 {
  100
}

fn default_decay_per_day() -> u16 {
  2
}

fn default_favourite_decay_per_day() -> u16 {
  1
}

fn default_recovery_after_days() -> u32 {
  14
}

fn default_recovery_min_fame() -> u64 {
  200
}

fn default_recovery_fame_divisor() -> u64 {
  2
}

fn default_recovery_step() -> u16 {
  5
}

impl Default for PopularityTuning {
  fn default() -> Self {
    PopularityTuning {
      base_gain: default_base_gain(),
      favourite_bonus: default_favourite_bonus(),
      overplay_free_plays: default_overplay_free_plays(),
      overplay_step: default_overplay_step(),
      hot_threshold: default_hot_threshold(),
      decay_per_day: default_decay_per_day(),
      favourite_decay_per_day: default_favourite_decay_per_day(),
      recovery_after_days: default_recovery_after_days(),
      recovery_min_fame: default_recovery_min_fame(),
      recovery_fame_divisor: default_recovery_fame_divisor(),
      recovery_step: default_recovery_step(),
    }
  }
}

/// Buzz gained from one live performance.
///
/// `gig_play_count` is the lifetime count *including* the current
/// performance, so a debut (`count == 1`) earns the full base gain and
/// repeat plays see diminishing returns. Favourites get their flat bonus
/// on top.
pub fn performance_gain(gig_play_count: u32, is_fan_favourite: bool, tuning: &PopularityTuning) -> u16 {
  let count = gig_play_count.max(1) as f64;
  let bonus = if is_fan_favourite { tuning.favourite_bonus } else { 0.0 };
  let gain = tuning.base_gain / count.sqrt() + bonus;

  gain.round().max(0.0) as u16
}

/// Popularity cost of performing a song too often in a short stretch.
///
/// `recent_gig_count` is the number of performances inside the trailing
/// seven-day window, counting the current one. The window itself is
/// computed by callers that track gig history; this engine does not own
/// that log.
pub fn overplay_penalty(recent_gig_count: u32, tuning: &PopularityTuning) -> u16 {
  if recent_gig_count <= tuning.overplay_free_plays {
    return 0;
  }

  let over = (recent_gig_count - tuning.overplay_free_plays) as u64;
  u16::try_from(over * tuning.overplay_step as u64).unwrap_or(u16::MAX)
}

/// One daily decay/recovery pass for a song that was not performed today.
///
/// Two independent adjustments, evaluated in a fixed order:
/// 1. Hot songs (above `hot_threshold`) cool by the daily rate, favourites
///    more slowly than the rest.
/// 2. Dormant songs with real fame drift back up by `recovery_step` toward
///    a ceiling of `fame / recovery_fame_divisor`, modelling legacy value.
///
/// Decay runs first and recovery reads the already-decayed value; both may
/// apply in the same pass. A value that already sits at or above the
/// ceiling is left alone rather than pulled down. The result is clamped to
/// the popularity range as the final step.
pub fn decay_one(
  popularity: Popularity,
  fame: Fame,
  days_since_gig: u32,
  is_fan_favourite: bool,
  tuning: &PopularityTuning,
) -> Popularity {
  let mut value = popularity.value() as i64;

  if value > tuning.hot_threshold as i64 && days_since_gig > 0 {
    let rate =
      if is_fan_favourite { tuning.favourite_decay_per_day } else { tuning.decay_per_day };
    value -= rate as i64;
  }

  if days_since_gig >= tuning.recovery_after_days && fame.value() > tuning.recovery_min_fame {
    let divisor = tuning.recovery_fame_divisor.max(1);
    // Saturate rather than wrap: a ceiling past i64 must stay huge, not
    // turn negative and shut recovery off.
    let ceiling = i64::try_from(fame.value() / divisor).unwrap_or(i64::MAX);
    if value < ceiling {
      value = (value + tuning.recovery_step as i64).min(ceiling);
    }
  }

  Popularity::clamped(value)
}
