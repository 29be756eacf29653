/// Application configuration
///
/// Values come from the process environment (optionally seeded from a
/// `.env` file by `main`). Everything has a working default so the client
/// starts without any setup.
use std::env;
use std::path::PathBuf;

/// Backend origin used when `SITE_PHOTOS_API_URL` is not set
pub const DEFAULT_API_URL: &str = "http://10.236.203.221:5100";

const APP_DIR: &str = "site-photos";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Origin of the REST backend, without trailing slash
    pub api_url: String,
    /// Directory holding the session database
    pub data_dir: PathBuf,
    /// Directory holding generated upload previews
    pub cache_dir: PathBuf,
}

impl Config {
    /// Build the configuration from environment variables:
    /// - `SITE_PHOTOS_API_URL`
    /// - `SITE_PHOTOS_DATA_DIR`
    /// - `SITE_PHOTOS_CACHE_DIR`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_url = lookup("SITE_PHOTOS_API_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let data_dir = lookup("SITE_PHOTOS_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);

        let cache_dir = lookup("SITE_PHOTOS_CACHE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(default_cache_dir);

        Self {
            api_url,
            data_dir,
            cache_dir,
        }
    }

    /// Path of the SQLite session database
    pub fn session_db_path(&self) -> PathBuf {
        self.data_dir.join("session.db")
    }

    /// Directory for upload preview thumbnails
    pub fn preview_dir(&self) -> PathBuf {
        self.cache_dir.join("previews")
    }
}

/// ~/.local/share/site-photos on Linux
fn default_data_dir() -> PathBuf {
    let mut path = dirs::data_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(env::temp_dir);
    path.push(APP_DIR);
    path
}

/// ~/.cache/site-photos on Linux
fn default_cache_dir() -> PathBuf {
    let mut path = dirs_next::cache_dir()
        .or_else(dirs_next::home_dir)
        .unwrap_or_else(env::temp_dir);
    path.push(APP_DIR);
    path
}
