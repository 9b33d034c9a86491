use rand::Rng;
use serde::{Deserialize, Serialize};

/// How the crowd received one performance of one song.
///
/// Produced by the gig-resolution pipeline; only the top grade influences
/// the favourite roll, but the full scale is carried for logs and for
/// downstream systems that care about the difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrowdResponse {
  Cold,
  Mixed,
  Warm,
  Ecstatic,
}

impl CrowdResponse {
  pub const fn as_str(&self) -> &'static str {
    match self {
      CrowdResponse::Cold => "cold",
      CrowdResponse::Mixed => "mixed",
      CrowdResponse::Warm => "warm",
      CrowdResponse::Ecstatic => "ecstatic",
    }
  }
}

/// Probabilities and limits of the fan-favourite policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FavouriteTuning {
  /// Chance every eligible performance starts from.
  #[serde(default = "default_base_chance")]
  pub base_chance: f64,
  /// Added when the crowd response is ecstatic.
  #[serde(default = "default_ecstatic_bonus")]
  pub ecstatic_bonus: f64,
  /// Added when the song closed the set as the encore.
  #[serde(default = "default_encore_bonus")]
  pub encore_bonus: f64,
  /// Quality scores below this halve the accumulated chance.
  #[serde(default = "default_low_quality_cutoff")]
  pub low_quality_cutoff: u8,
  /// Factor applied to the total chance for low-quality songs.
  #[serde(default = "default_low_quality_factor")]
  pub low_quality_factor: f64,
  /// Favourite slots per band.
  #[serde(default = "default_max_slots")]
  pub max_slots: usize,
  /// Days a favourite holds its slot before it can be rotated out.
  #[serde(default = "default_replace_after_days")]
  pub replace_after_days: u32,
}

fn default_base_chance() -> f64 {
  0.03
}

fn default_ecstatic_bonus() -> f64 {
  0.07
}

fn default_encore_bonus() -> f64 {
  0.05
}

fn default_low_quality_cutoff() -> u8 {
  40
}

fn default_low_quality_factor() -> f64 {
  0.5
}

fn default_max_slots() -> usize {
  3
}

fn default_replace_after_days() -> u32 {
  30
}

impl Default for FavouriteTuning {
  fn default() -> Self {
    FavouriteTuning {
      base_chance: default_base_chance(),
      ecstatic_bonus: default_ecstatic_bonus(),
      encore_bonus: default_encore_bonus(),
      low_quality_cutoff: default_low_quality_cutoff(),
      low_quality_factor: default_low_quality_factor(),
      max_slots: default_max_slots(),
      replace_after_days: default_replace_after_days(),
    }
  }
}

/// Chance that this performance earns favourite status.
///
/// The additive bonuses are applied first and the low-quality factor
/// halves the accumulated total afterwards. That ordering is
/// balance-sensitive: halving the base before the bonuses would leave
/// low-quality songs with most of their bonus chance intact.
pub fn favourite_chance(
  crowd: CrowdResponse,
  is_encore: bool,
  quality_score: u8,
  tuning: &FavouriteTuning,
) -> f64 {
  let mut chance = tuning.base_chance;

  if crowd == CrowdResponse::Ecstatic {
    chance += tuning.ecstatic_bonus;
  }
  if is_encore {
    chance += tuning.encore_bonus;
  }
  if quality_score < tuning.low_quality_cutoff {
    chance *= tuning.low_quality_factor;
  }

  chance
}

/// One independent Bernoulli trial for favourite status.
///
/// Archived songs and sitting favourites short-circuit to `false` before
/// any randomness is drawn: status cannot be re-earned, and the roll is
/// never retried or weighted by past failures.
pub fn roll_fan_favourite<R: Rng + ?Sized>(
  rng: &mut R,
  crowd: CrowdResponse,
  is_encore: bool,
  quality_score: u8,
  is_archived: bool,
  is_fan_favourite: bool,
  tuning: &FavouriteTuning,
) -> bool {
  if is_archived || is_fan_favourite {
    return false;
  }

  let chance = favourite_chance(crowd, is_encore, quality_score, tuning);
  rng.gen_range(0.0..1.0) < chance
}
