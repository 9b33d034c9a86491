use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier of a song as a work: the unit fame, popularity and favourite
/// status are tracked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SongId(Uuid);

impl SongId {
  pub fn new() -> Self {
    SongId(Uuid::new_v4())
  }

  pub fn from_uuid(u: Uuid) -> Self {
    SongId(u)
  }

  pub fn as_uuid(&self) -> Uuid {
    self.0
  }
}

impl From<Uuid> for SongId {
  fn from(u: Uuid) -> Self {
    SongId(u)
  }
}

impl From<SongId> for Uuid {
  fn from(id: SongId) -> Self {
    id.0
  }
}

impl fmt::Display for SongId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}

/// Identifier of the roster that favourite slots are counted against.
///
/// Solo acts get a roster id of their own; a song without one is not part
/// of any favourite accounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BandId(Uuid);

impl BandId {
  pub fn new() -> Self {
    BandId(Uuid::new_v4())
  }

  pub fn from_uuid(u: Uuid) -> Self {
    BandId(u)
  }

  pub fn as_uuid(&self) -> Uuid {
    self.0
  }
}

impl From<Uuid> for BandId {
  fn from(u: Uuid) -> Self {
    BandId(u)
  }
}

impl From<BandId> for Uuid {
  fn from(id: BandId) -> Self {
    id.0
  }
}

impl fmt::Display for BandId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}
