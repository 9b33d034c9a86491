pub mod fame;
pub mod favourite;
pub mod ids;
pub mod popularity;
pub mod song;
pub mod time;

pub use ids::{BandId, SongId};
pub use song::{Fame, Popularity, Song, SongPatch};
pub use time::Timestamp;
