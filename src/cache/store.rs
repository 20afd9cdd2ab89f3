// Cache store for reading and writing cached data.
// Handles JSON serialization, TTL checking, and atomic writes.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::api::Repo;
use crate::error::Result;

/// Wrapper for cached data with the time it was written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedData<T> {
    pub data: T,
    pub cached_at: DateTime<Utc>,
}

impl<T> CachedData<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            cached_at: Utc::now(),
        }
    }

    pub fn is_expired(&self, ttl: Duration) -> bool {
        let elapsed = Utc::now()
            .signed_duration_since(self.cached_at)
            .to_std()
            .unwrap_or(Duration::ZERO);

        elapsed > ttl
    }
}

/// Read cached JSON data from a file.
pub fn read_cached<T: DeserializeOwned>(path: &Path) -> Result<Option<CachedData<T>>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path)?;
    let cached: CachedData<T> = serde_json::from_str(&contents)?;
    Ok(Some(cached))
}

/// Read cached JSON data, returning None if expired.
pub fn read_if_valid<T: DeserializeOwned>(path: &Path, ttl: Duration) -> Result<Option<T>> {
    match read_cached::<T>(path)? {
        Some(cached) if !cached.is_expired(ttl) => Ok(Some(cached.data)),
        _ => Ok(None),
    }
}

/// Write data to cache as JSON.
pub fn write_cached<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(&CachedData::new(data))?;

    // Write atomically via temp file
    let temp_path = path.with_extension("tmp");
    let mut file = fs::File::create(&temp_path)?;
    file.write_all(json.as_bytes())?;
    file.sync_all()?;
    fs::rename(&temp_path, path)?;

    Ok(())
}

/// Cached repository list if present and fresh. Unreadable caches count as
/// missing.
pub fn load_repos(path: &Path, ttl: Duration) -> Option<Vec<Repo>> {
    match read_if_valid(path, ttl) {
        Ok(repos) => repos,
        Err(e) => {
            debug!(error = %e, path = %path.display(), "ignoring unreadable repo cache");
            None
        }
    }
}

pub fn save_repos(path: &Path, repos: &[Repo]) -> Result<()> {
    write_cached(path, &repos)
}
