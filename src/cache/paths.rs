// Filesystem locations for tldr.
// Config, cache and log paths under the platform project directories.

use std::path::PathBuf;

use directories::ProjectDirs;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "tldr")
}

/// Base cache directory (~/.cache/tldr on Linux).
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Default location of `config.toml`.
pub fn config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Cached repository list.
pub fn repos_path() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join("repos.json"))
}

pub fn log_path() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join("tldr.log"))
}
