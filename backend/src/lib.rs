mod config;
mod infrastructure;

use anyhow::Context;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use tracing::info;

use limelight_core::domain::favourite::CrowdResponse;
use limelight_core::domain::song::Song;
use limelight_core::domain::{BandId, SongId, Timestamp};
use limelight_core::ports::{ConsumptionSource, SongRepository};
use limelight_core::services::{DecayService, PerformanceService, SongPerformance};
use limelight_storage::{ManualClock, MemoryStore};

use crate::config::{EngineConfig, SimulationConfig};
use infrastructure::reporter::LogNotifier;

/// Type alias to simplify the generic signature of the service.
type SeasonPerformanceService =
  PerformanceService<MemoryStore, MemoryStore, MemoryStore, LogNotifier, ManualClock, Pcg32>;

/// Working titles for the demo band's catalogue.
const CATALOGUE: [&str; 8] = [
  "Neon Overdrive",
  "Midnight Caravan",
  "Static Bloom",
  "Velvet Sirens",
  "Paper Crowns",
  "Glass Parade",
  "Last Bus Home",
  "Ghost Frequencies",
];

/// Runs a scripted season: one band, a fixed catalogue, gigs on a steady
/// cadence, consumption drifting with buzz overnight and a decay pass at
/// the end of every simulated day.
pub async fn run() -> anyhow::Result<()> {
  // --- Dependency Injection Phase ---

  // 1. Tuning tables (TOML sections; a first run writes the shipped balance).
  let engine = EngineConfig::load().context("load engine tuning")?;
  let sim = SimulationConfig::load().context("load simulation config")?;

  // 2. Persistence adapter (in-memory reference store).
  let store = MemoryStore::new();

  // 3. Clock: hand-cranked, so a whole season runs in one process launch.
  let clock = ManualClock::starting_at(Timestamp::from_unix(1_700_000_000));

  // 4. Notifier adapter (tracing feed stands in for the news ticker).
  let notifier = LogNotifier;

  // 5. Service wiring. The engine's dice and the driver's own choices get
  //    independent streams off the same configured seed.
  let tuning = engine.clone().into_tuning();
  let performance: SeasonPerformanceService = PerformanceService::new(
    store.clone(),
    store.clone(),
    store.clone(),
    notifier,
    clock.clone(),
    Pcg32::seed_from_u64(sim.seed),
    tuning,
  );
  let decay = DecayService::new(store.clone(), clock.clone(), engine.popularity);
  let mut driver_rng = Pcg32::seed_from_u64(sim.seed.wrapping_add(1));

  // 6. Roster seeding.
  let band = BandId::new();
  let roster = seed_roster(&store, band, &mut driver_rng).await;

  info!(
    target: "limelight::demo",
    band = %band,
    songs = roster.len(),
    days = sim.season_days,
    seed = sim.seed,
    "season opens"
  );

  // --- Season Loop ---

  // A hand-edited zero cadence would divide by zero; treat it as daily.
  let cadence = sim.gig_every_days.max(1);

  for day in 1..=sim.season_days {
    clock.advance_days(1);

    if day % cadence == 0 {
      let set = pick_set_list(&roster, sim.songs_per_gig, &mut driver_rng);
      let total = set.len() as u32;
      let report = performance.update_songs_after_gig(&set, Some(band), total).await;
      info!(
        target: "limelight::demo",
        day,
        songs = set.len(),
        promoted = report.promoted.len(),
        failed = report.failed.len(),
        "gig night"
      );
    }

    // Overnight, buzz converts into streams, sales and airplay.
    drift_consumption(&store, &roster, &mut driver_rng).await?;

    // And everything that stayed off stage cools or recovers.
    decay.run_decay_tick().await?;
  }

  print_chart(&store).await?;
  Ok(())
}

async fn seed_roster(store: &MemoryStore, band: BandId, rng: &mut Pcg32) -> Vec<SongId> {
  let mut roster = Vec::new();
  for title in CATALOGUE {
    // Spread of writing quality; anything under 40 rolls favourites at
    // half chance.
    let song = Song::new(Some(band), title, rng.gen_range(30..=95));
    roster.push(song.id);
    store.upsert_song(song).await;
  }
  roster
}

fn pick_set_list(roster: &[SongId], size: usize, rng: &mut Pcg32) -> Vec<SongPerformance> {
  let mut pool = roster.to_vec();
  pool.shuffle(rng);
  pool.truncate(size.min(roster.len()));

  pool
    .into_iter()
    .enumerate()
    .map(|(i, song_id)| SongPerformance {
      song_id,
      crowd_response: roll_crowd(rng),
      position: i as u32 + 1,
    })
    .collect()
}

fn roll_crowd(rng: &mut Pcg32) -> CrowdResponse {
  match rng.gen_range(0..10) {
    0 => CrowdResponse::Cold,
    1..=3 => CrowdResponse::Mixed,
    4..=7 => CrowdResponse::Warm,
    _ => CrowdResponse::Ecstatic,
  }
}

/// Nightly consumption model: the hotter a song, the more it streams and
/// sells, which in turn feeds the next fame aggregation.
async fn drift_consumption(
  store: &MemoryStore,
  roster: &[SongId],
  rng: &mut Pcg32,
) -> anyhow::Result<()> {
  for id in roster {
    let Some(song) = store.find_song(*id).await? else { continue };
    let buzz = song.popularity.value() as u64;
    if buzz == 0 {
      continue;
    }

    let mut totals = store.totals_for(*id).await?;
    totals.streams += buzz * rng.gen_range(20..60);
    totals.hype += buzz / 2;
    if buzz > 100 {
      totals.sales += buzz / rng.gen_range(4..9);
      totals.radio_plays += rng.gen_range(0..3);
    }
    // New territories open roughly per quarter-million streams.
    totals.countries = totals.countries.max(((totals.streams / 250_000) as u32).min(40));
    store.set_totals(*id, totals).await;
  }
  Ok(())
}

async fn print_chart(store: &MemoryStore) -> anyhow::Result<()> {
  let mut songs = store.list_songs().await?;
  songs.sort_by(|a, b| {
    b.fame.value().cmp(&a.fame.value()).then(b.popularity.value().cmp(&a.popularity.value()))
  });

  info!(target: "limelight::demo", "season closes; final chart:");
  for (rank, song) in songs.iter().enumerate() {
    info!(
      target: "limelight::demo",
      rank = rank + 1,
      title = %song.title,
      fame = song.fame.value(),
      popularity = song.popularity.value(),
      plays = song.gig_play_count,
      favourite = song.is_fan_favourite,
      "chart entry"
    );
  }
  Ok(())
}
