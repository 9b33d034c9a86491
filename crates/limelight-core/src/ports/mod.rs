pub mod clock;
pub mod consumption;
pub mod favourites;
pub mod notifier;
pub mod song_repository;

pub use clock::{GameClock, SystemClock};
pub use consumption::{ConsumptionSource, ConsumptionTotals, SignalError};
pub use favourites::{FavouriteEntry, FavouriteLedger, FavouriteSnapshot, FavouriteSwap, LedgerError};
pub use notifier::FavouriteNotifier;
pub use song_repository::{RepoError, SongRepository};
