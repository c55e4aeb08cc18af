use crate::error::{Result, VitaeError};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// File constants
// ---------------------------------------------------------------------------

pub const APP_DIR: &str = ".gitvitae";
pub const CONFIG_FILE: &str = "config.yaml";
pub const SQLITE_FILE: &str = "gitvitae.db";
pub const REDB_FILE: &str = "gitvitae.redb";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

/// Default data directory: `~/.gitvitae`. Commands accept an override for
/// tests and non-standard setups.
pub fn default_data_dir() -> Result<PathBuf> {
    home::home_dir()
        .map(|h| h.join(APP_DIR))
        .ok_or(VitaeError::HomeNotFound)
}

pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join(CONFIG_FILE)
}

pub fn sqlite_path(data_dir: &Path) -> PathBuf {
    data_dir.join(SQLITE_FILE)
}

pub fn redb_path(data_dir: &Path) -> PathBuf {
    data_dir.join(REDB_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_helpers() {
        let dir = Path::new("/tmp/.gitvitae");
        assert_eq!(
            config_path(dir),
            PathBuf::from("/tmp/.gitvitae/config.yaml")
        );
        assert_eq!(sqlite_path(dir), PathBuf::from("/tmp/.gitvitae/gitvitae.db"));
        assert_eq!(redb_path(dir), PathBuf::from("/tmp/.gitvitae/gitvitae.redb"));
    }
}
