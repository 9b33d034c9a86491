use limelight_core::domain::song::{Song, SongPatch};
use limelight_core::domain::{BandId, Popularity, Timestamp};
use limelight_core::ports::favourites::FavouriteSwap;
use limelight_core::ports::{ConsumptionSource, ConsumptionTotals, FavouriteLedger, SongRepository};
use limelight_storage::MemoryStore;

#[tokio::main]
async fn main() {
  let store = MemoryStore::new();
  let band = BandId::new();

  let song = Song::new(Some(band), "Smoke on the Setlist", 70);
  let id = song.id;
  println!("Seeding song with id = {id}");
  store.upsert_song(song).await;

  store
    .set_totals(
      id,
      ConsumptionTotals { streams: 120_000, sales: 3_000, radio_plays: 12, hype: 800, countries: 4 },
    )
    .await;
  let totals = store.totals_for(id).await.expect("failed to read totals");
  println!("Totals reported: {totals:?}");

  let gigged_at = Timestamp::from_unix(1_700_000_000);
  let patch = SongPatch {
    popularity: Some(Popularity::clamped(15)),
    gig_play_count: Some(1),
    last_gigged_at: Some(gigged_at),
    ..SongPatch::default()
  };
  store.update_song(id, &patch).await.expect("failed to patch song");

  let snap = store.snapshot(band).await.expect("failed to snapshot ledger");
  println!("Ledger before grant: v{} with {} entries", snap.version, snap.entries.len());

  let swap = FavouriteSwap { revoke: None, grant: id, granted_at: gigged_at };
  let committed = store.commit(band, snap.version, &swap).await.expect("failed to commit swap");
  println!("Grant committed: {committed}");

  let stale = store.commit(band, snap.version, &swap).await.expect("failed to commit swap");
  println!("Stale grant refused: {}", !stale);

  let loaded = store.find_song(id).await.expect("failed to load song");
  println!("Loaded from store: {loaded:?}");
}
