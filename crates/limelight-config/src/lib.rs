mod backend;
mod io;
mod paths;

pub use backend::{ConfigBackend, TomlConfigBackend};
pub use io::atomic_write_str;
pub use paths::{ConfigError, LimelightPaths};

use once_cell::sync::Lazy;

// Process-wide paths singleton (env override / platform dirs).
pub static PATHS: Lazy<LimelightPaths> =
  Lazy::new(|| LimelightPaths::new().expect("failed to init LimelightPaths"));

// Process-wide config backend over those paths.
pub static CONFIG_BACKEND: Lazy<TomlConfigBackend> =
  Lazy::new(|| TomlConfigBackend::new(PATHS.clone()));
