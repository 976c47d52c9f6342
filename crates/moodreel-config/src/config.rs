use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;
use crate::credentials::CredentialStore;

pub const TMDB_PLACEHOLDER_KEY: &str = "YOUR_TMDB_API_KEY_HERE";
pub const OMDB_PLACEHOLDER_KEY: &str = "YOUR_OMDB_API_KEY_HERE";

const TMDB_KEY_ENV: &str = "MOODREEL_TMDB_API_KEY";
const OMDB_KEY_ENV: &str = "MOODREEL_OMDB_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tmdb: TmdbConfig,
    #[serde(default)]
    pub omdb: Option<OmdbConfig>,
    #[serde(default)]
    pub watchlist: WatchlistConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbConfig {
    #[serde(default = "default_tmdb_api_key")]
    pub api_key: String,
    #[serde(default = "default_tmdb_base_url")]
    pub base_url: String,
    #[serde(default = "default_tmdb_image_base_url")]
    pub image_base_url: String,
    #[serde(default = "default_poster_size")]
    pub poster_size: String,
    /// Quality floor for mood discovery (`vote_count.gte`)
    #[serde(default = "default_min_vote_count")]
    pub min_vote_count: u32,
}

/// OMDb is only consulted as a fallback when a mood query against TMDb fails.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OmdbConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_omdb_api_key")]
    pub api_key: String,
    #[serde(default = "default_omdb_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchlistConfig {
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_true() -> bool {
    true
}

fn default_tmdb_api_key() -> String {
    TMDB_PLACEHOLDER_KEY.to_string()
}

fn default_tmdb_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_tmdb_image_base_url() -> String {
    "https://image.tmdb.org/t/p".to_string()
}

fn default_poster_size() -> String {
    "w500".to_string()
}

fn default_min_vote_count() -> u32 {
    100
}

fn default_omdb_api_key() -> String {
    OMDB_PLACEHOLDER_KEY.to_string()
}

fn default_omdb_base_url() -> String {
    "https://www.omdbapi.com".to_string()
}

fn default_capacity() -> usize {
    50
}

fn default_storage_key() -> String {
    "watchlist".to_string()
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: default_tmdb_api_key(),
            base_url: default_tmdb_base_url(),
            image_base_url: default_tmdb_image_base_url(),
            poster_size: default_poster_size(),
            min_vote_count: default_min_vote_count(),
        }
    }
}

impl Default for OmdbConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            api_key: default_omdb_api_key(),
            base_url: default_omdb_base_url(),
        }
    }
}

impl Default for WatchlistConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            storage_key: default_storage_key(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tmdb: TmdbConfig::default(),
            omdb: None,
            watchlist: WatchlistConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Empty strings and the shipped placeholders both count as "no key".
pub fn is_real_key(key: &str, placeholder: &str) -> bool {
    let key = key.trim();
    !key.is_empty() && key != placeholder
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Missing file means defaults; a present but broken file is still an error.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            debug!("No config file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.watchlist.capacity == 0 {
            return Err(anyhow::anyhow!("watchlist.capacity must be at least 1"));
        }
        if self.watchlist.storage_key.trim().is_empty() {
            return Err(anyhow::anyhow!("watchlist.storage_key cannot be empty"));
        }
        if !self.tmdb.base_url.starts_with("http") {
            return Err(anyhow::anyhow!("tmdb.base_url must be an http(s) URL"));
        }
        if let Some(omdb) = &self.omdb {
            if !omdb.base_url.starts_with("http") {
                return Err(anyhow::anyhow!("omdb.base_url must be an http(s) URL"));
            }
        }
        Ok(())
    }

    pub fn is_tmdb_configured(&self) -> bool {
        is_real_key(&self.tmdb.api_key, TMDB_PLACEHOLDER_KEY)
    }

    pub fn is_omdb_configured(&self) -> bool {
        self.omdb
            .as_ref()
            .map(|omdb| omdb.enabled && is_real_key(&omdb.api_key, OMDB_PLACEHOLDER_KEY))
            .unwrap_or(false)
    }

    /// Fill API keys from the credential store and then the environment.
    /// Environment wins over credentials, credentials win over the config file.
    pub fn apply_credentials(&mut self, credentials: &CredentialStore) {
        if let Some(key) = credentials.get_tmdb_api_key() {
            if is_real_key(key, TMDB_PLACEHOLDER_KEY) {
                self.tmdb.api_key = key.clone();
            }
        }
        if let Some(key) = credentials.get_omdb_api_key() {
            if is_real_key(key, OMDB_PLACEHOLDER_KEY) {
                self.omdb.get_or_insert_with(OmdbConfig::default).api_key = key.clone();
            }
        }

        if let Ok(key) = std::env::var(TMDB_KEY_ENV) {
            if is_real_key(&key, TMDB_PLACEHOLDER_KEY) {
                debug!("Using TMDb API key from {}", TMDB_KEY_ENV);
                self.tmdb.api_key = key;
            }
        }
        if let Ok(key) = std::env::var(OMDB_KEY_ENV) {
            if is_real_key(&key, OMDB_PLACEHOLDER_KEY) {
                debug!("Using OMDb API key from {}", OMDB_KEY_ENV);
                self.omdb.get_or_insert_with(OmdbConfig::default).api_key = key;
            }
        }
    }
}
