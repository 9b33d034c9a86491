use serde::{Deserialize, Serialize};

/// The six raw counts fame is aggregated from.
///
/// All fields are unsigned on purpose: the aggregation contract says a
/// negative input must never produce negative fame, and unsigned fields
/// make that case unrepresentable instead of something to clamp.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FameSources {
  /// Total streams across all platforms.
  pub streams: u64,
  /// Units sold (physical and digital).
  pub sales: u64,
  /// Times picked up by radio rotation.
  pub radio_plays: u64,
  /// Accumulated hype from press and social buzz.
  pub hype: u64,
  /// Distinct countries the song has charted or sold in.
  pub countries: u32,
  /// Lifetime live performances.
  pub gig_plays: u32,
}

/// Per-signal weighting of the fame formula.
///
/// The shipped defaults are the game's tuned balance; designers can
/// override any of them through the `[fame]` config section. Weights must
/// stay positive: the aggregation is monotone in every source as long as
/// they do, and that monotonicity is the contract chart calculation and
/// the "fame never regresses" rule lean on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FameWeights {
  /// Streams needed per point of fame.
  #[serde(default = "default_streams_per_point")]
  pub streams_per_point: f64,
  /// Sales units needed per point of fame.
  #[serde(default = "default_sales_per_point")]
  pub sales_per_point: f64,
  /// Fame points per radio play.
  #[serde(default = "default_radio_play_points")]
  pub radio_play_points: f64,
  /// Hype needed per point of fame.
  #[serde(default = "default_hype_per_point")]
  pub hype_per_point: f64,
  /// Fame points per distinct country reached.
  #[serde(default = "default_country_points")]
  pub country_points: f64,
  /// Fame points per live performance.
  #[serde(default = "default_gig_play_points")]
  pub gig_play_points: f64,
}

fn default_streams_per_point() -> f64 {
  1000.0
}

fn default_sales_per_point() -> f64 {
  100.0
}

fn default_radio_play_points() -> f64 {
  2.0
}

fn default_hype_per_point() -> f64 {
  50.0
}

fn default_country_points() -> f64 {
  5.0
}

fn default_gig_play_points() -> f64 {
  3.0
}

impl Default for FameWeights {
  fn default() -> Self {
    FameWeights {
      streams_per_point: default_streams_per_point(),
      sales_per_point: default_sales_per_point(),
      radio_play_points: default_radio_play_points(),
      hype_per_point: default_hype_per_point(),
      country_points: default_country_points(),
      gig_play_points: default_gig_play_points(),
    }
  }
}

/// Folds the six sources into a single fame score.
///
/// The weighted terms are summed in floating point and floored once at
/// the end: the fractional contributions of the divided signals (streams,
/// sales, hype) accumulate across terms before the floor, which per-term
/// integer division would silently discard.
pub fn fame_from_sources(sources: &FameSources, weights: &FameWeights) -> u64 {
  let total = sources.streams as f64 / weights.streams_per_point
    + sources.sales as f64 / weights.sales_per_point
    + sources.radio_plays as f64 * weights.radio_play_points
    + sources.hype as f64 / weights.hype_per_point
    + sources.countries as f64 * weights.country_points
    + sources.gig_plays as f64 * weights.gig_play_points;

  total.floor() as u64
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_tuned_balance_example() {
    // 50 + 20 + 20 + 10 + 15 + 15.
    let sources = FameSources {
      streams: 50_000,
      sales: 2_000,
      radio_plays: 10,
      hype: 500,
      countries: 3,
      gig_plays: 5,
    };

    assert_eq!(fame_from_sources(&sources, &FameWeights::default()), 130);
  }

  #[test]
  fn test_unknown_sources_are_zero_fame() {
    assert_eq!(fame_from_sources(&FameSources::default(), &FameWeights::default()), 0);
  }

  #[test]
  fn test_fractions_accumulate_before_the_floor() {
    // 500/1000 + 50/100 = 0.5 + 0.5: per-term flooring would give 0.
    let sources = FameSources { streams: 500, sales: 50, ..FameSources::default() };

    assert_eq!(fame_from_sources(&sources, &FameWeights::default()), 1);
  }

  #[test]
  fn test_each_source_contributes() {
    let weights = FameWeights::default();
    let base = FameSources { streams: 10_000, ..FameSources::default() };
    let base_fame = fame_from_sources(&base, &weights);

    let more_radio = FameSources { radio_plays: 4, ..base };
    assert_eq!(fame_from_sources(&more_radio, &weights), base_fame + 8);

    let more_countries = FameSources { countries: 2, ..base };
    assert_eq!(fame_from_sources(&more_countries, &weights), base_fame + 10);

    let more_gigs = FameSources { gig_plays: 3, ..base };
    assert_eq!(fame_from_sources(&more_gigs, &weights), base_fame + 9);
  }
}
