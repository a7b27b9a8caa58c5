use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{Error, Result};
use crate::types::UserFixture;

/// Load every fixture in `dir`, ordered by file name.
///
/// The first malformed document aborts the load.
pub fn load_user_profiles(dir: &Path) -> Result<Vec<UserFixture>> {
    if !dir.is_dir() {
        return Err(Error::NotFound(format!("Profiles directory not found: {}", dir.display())));
    }
    let mut fixtures = Vec::new();
    for path in list_fixture_files(dir)? {
        info!(file = %path.file_name().unwrap_or_default().to_string_lossy(), "loading profile");
        fixtures.push(parse_fixture(&path)?);
    }
    Ok(fixtures)
}

pub fn parse_fixture(path: &Path) -> Result<UserFixture> {
    let content = fs::read_to_string(path)?;
    serde_yaml::from_str(&content).map_err(|source| Error::Fixture { path: path.to_path_buf(), source })
}

fn list_fixture_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in walkdir::WalkDir::new(root).max_depth(1) {
        let entry = entry.map_err(|e| Error::Io(e.into()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if matches!(path.extension().and_then(|s| s.to_str()), Some("yml" | "yaml")) {
            files.push(path.to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}
