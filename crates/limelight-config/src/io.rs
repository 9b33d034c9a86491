use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Writes `contents` through a sibling `.tmp` file and renames it into
/// place, so a crash mid-write never leaves a truncated config behind.
pub fn atomic_write_str(path: &Path, contents: &str) -> io::Result<()> {
  let tmp_path = path.with_extension("tmp");

  {
    let mut tmp_file = fs::File::create(&tmp_path)?;
    tmp_file.write_all(contents.as_bytes())?;
    tmp_file.sync_all()?;
  }

  fs::rename(&tmp_path, path)?;
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::tempdir;

  #[test]
  fn test_atomic_write_replaces_existing_content() {
    let tmp = tempdir().unwrap();
    let target = tmp.path().join("limelight.toml");

    atomic_write_str(&target, "first").unwrap();
    atomic_write_str(&target, "second").unwrap();

    assert_eq!(fs::read_to_string(&target).unwrap(), "second");
    assert!(!target.with_extension("tmp").exists());
  }
}
