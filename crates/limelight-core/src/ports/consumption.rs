use crate::domain::fame::FameSources;
use crate::domain::SongId;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum SignalError {
  #[error("signal source error: {0}")]
  Source(String),
}

/// Consumption counts for one song, as reported by the release/sales
/// pipeline. Everything the fame formula needs except the gig play count,
/// which the song record itself carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumptionTotals {
  pub streams: u64,
  pub sales: u64,
  pub radio_plays: u64,
  pub hype: u64,
  pub countries: u32,
}

impl ConsumptionTotals {
  /// Completes the totals into aggregator input by attaching the live
  /// performance count.
  pub fn into_sources(self, gig_plays: u32) -> FameSources {
    FameSources {
      streams: self.streams,
      sales: self.sales,
      radio_plays: self.radio_plays,
      hype: self.hype,
      countries: self.countries,
      gig_plays,
    }
  }
}

/// Port over whatever subsystem owns streams, sales, radio and hype
/// ledgers. A song unknown to the source reports all-zero totals rather
/// than an error.
#[async_trait::async_trait]
pub trait ConsumptionSource: Send + Sync {
  async fn totals_for(&self, song_id: SongId) -> Result<ConsumptionTotals, SignalError>;
}
