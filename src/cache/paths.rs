// Filesystem paths for persisted state.

use std::path::PathBuf;

use directories::ProjectDirs;

/// Base data directory (~/.local/share/duff on Linux).
pub fn data_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "duff").map(|dirs| dirs.data_dir().to_path_buf())
}

/// Path to the persisted favorites file.
pub fn favorites_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("favorites.json"))
}
