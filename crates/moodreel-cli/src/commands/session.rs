use color_eyre::eyre::eyre;
use color_eyre::Result;
use moodreel_config::{Config, CredentialStore, PathManager};
use moodreel_core::{Discovery, FileStore, QueryBuilder, WatchlistStore};
use moodreel_models::MovieSummary;
use moodreel_sources::{create_catalog, create_fallback_catalog};
use tracing::debug;
use crate::render::ImageStyle;

/// Loaded configuration plus a ready controller backed by the on-disk store.
pub struct Session {
    pub config: Config,
    pub discovery: Discovery<FileStore>,
}

/// Config file (or defaults), then credentials, then environment keys.
pub fn load_config(paths: &PathManager) -> Result<Config> {
    let config_file = paths.config_file();
    let mut config = Config::load_or_default(&config_file)
        .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;

    let credentials_file = paths.credentials_file();
    let mut credentials = CredentialStore::new(credentials_file.clone());
    credentials
        .load()
        .map_err(|e| eyre!("Failed to load credentials from {}: {}", credentials_file.display(), e))?;
    config.apply_credentials(&credentials);

    config
        .validate()
        .map_err(|e| eyre!("Configuration validation failed: {}", e))?;
    Ok(config)
}

impl Session {
    pub fn open(startup_mood: Option<&str>) -> Result<Self> {
        let paths = PathManager::default();
        let config = load_config(&paths)?;

        let store = FileStore::new(paths.store_dir());
        debug!("Watchlist store at {}", store.dir().display());
        let watchlist = WatchlistStore::load_with_config(store, &config.watchlist);

        let discovery = Discovery::new(
            create_catalog(&config),
            watchlist,
            QueryBuilder::from_config(&config.tmdb),
            startup_mood,
        )
        .with_fallback(create_fallback_catalog(&config));

        Ok(Self { config, discovery })
    }

    pub fn image_style(&self) -> ImageStyle<'_> {
        ImageStyle {
            base_url: self.discovery.image_base_url(),
            poster_size: &self.config.tmdb.poster_size,
        }
    }

    pub fn is_saved(&self, movie: &MovieSummary) -> bool {
        movie
            .id
            .as_ref()
            .map(|id| self.discovery.is_in_watchlist(id))
            .unwrap_or(false)
    }
}
