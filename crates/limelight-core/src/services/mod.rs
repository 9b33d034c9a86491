pub mod decay;
pub mod performance;

pub use decay::{DecayReport, DecayService};
pub use performance::{EngineTuning, GigReport, PerformanceService, SongPerformance};
