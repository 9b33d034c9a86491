use limelight_config::{CONFIG_BACKEND, ConfigBackend, ConfigError};
use limelight_core::domain::fame::FameWeights;
use limelight_core::domain::favourite::FavouriteTuning;
use limelight_core::domain::popularity::PopularityTuning;
use limelight_core::services::EngineTuning;
use serde::{Deserialize, Serialize};

/// Knobs of the scripted demo season.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
  /// Seed for both the engine's dice and the driver's own choices; two
  /// runs with the same seed play out the same season.
  #[serde(default = "default_seed")]
  pub seed: u64,
  #[serde(default = "default_season_days")]
  pub season_days: u32,
  /// A gig is played every this-many simulated days.
  #[serde(default = "default_gig_every_days")]
  pub gig_every_days: u32,
  #[serde(default = "default_songs_per_gig")]
  pub songs_per_gig: usize,
}

fn default_seed() -> u64 {
  1977
}

fn default_season_days() -> u32 {
  90
}

fn default_gig_every_days() -> u32 {
  3
}

fn default_songs_per_gig() -> usize {
  5
}

impl Default for SimulationConfig {
  fn default() -> Self {
    SimulationConfig {
      seed: default_seed(),
      season_days: default_season_days(),
      gig_every_days: default_gig_every_days(),
      songs_per_gig: default_songs_per_gig(),
    }
  }
}

impl SimulationConfig {
  /// Loads `[simulation]` and writes the resolved values back, so a fresh
  /// install ends up with an editable file.
  pub fn load() -> Result<Self, ConfigError> {
    let cfg = CONFIG_BACKEND.load_section_with_default("simulation")?;
    CONFIG_BACKEND.save_section("simulation", &cfg)?;
    Ok(cfg)
  }
}

/// The engine's three tuning tables, one TOML section each, so designers
/// can override a single rate without restating the rest of the balance.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
  pub fame: FameWeights,
  pub popularity: PopularityTuning,
  pub favourite: FavouriteTuning,
}

impl EngineConfig {
  /// Loads `[fame]`, `[popularity]` and `[favourite]`, then writes the
  /// resolved tables back so the file documents the live balance.
  pub fn load() -> Result<Self, ConfigError> {
    let fame: FameWeights = CONFIG_BACKEND.load_section_with_default("fame")?;
    let popularity: PopularityTuning = CONFIG_BACKEND.load_section_with_default("popularity")?;
    let favourite: FavouriteTuning = CONFIG_BACKEND.load_section_with_default("favourite")?;

    CONFIG_BACKEND.save_section("fame", &fame)?;
    CONFIG_BACKEND.save_section("popularity", &popularity)?;
    CONFIG_BACKEND.save_section("favourite", &favourite)?;

    Ok(EngineConfig { fame, popularity, favourite })
  }

  pub fn into_tuning(self) -> EngineTuning {
    EngineTuning { fame: self.fame, popularity: self.popularity, favourite: self.favourite }
  }
}
