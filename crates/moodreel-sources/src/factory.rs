//! Catalog construction from configuration.

use moodreel_config::Config;
use std::sync::Arc;
use tracing::{debug, warn};
use crate::omdb::OmdbClient;
use crate::tmdb::TmdbClient;
use crate::traits::{KeywordCatalog, MovieCatalog};

/// The primary catalog is always built. A missing key is reported lazily by
/// the first request, so offline commands (watchlist listing) still work.
pub fn create_catalog(config: &Config) -> Arc<dyn MovieCatalog> {
    if !config.is_tmdb_configured() {
        warn!("TMDb API key is not configured; network commands will fail until it is set");
    }
    Arc::new(TmdbClient::new(&config.tmdb))
}

/// OMDb fallback, only when enabled and keyed.
pub fn create_fallback_catalog(config: &Config) -> Option<Arc<dyn KeywordCatalog>> {
    if !config.is_omdb_configured() {
        debug!("OMDb fallback disabled");
        return None;
    }
    config
        .omdb
        .as_ref()
        .map(|omdb| Arc::new(OmdbClient::new(omdb)) as Arc<dyn KeywordCatalog>)
}

#[cfg(test)]
mod tests {
    use super::*;
    use moodreel_config::OmdbConfig;

    #[test]
    fn test_fallback_requires_key() {
        let mut config = Config::default();
        assert!(create_fallback_catalog(&config).is_none());

        config.omdb = Some(OmdbConfig {
            api_key: "real".to_string(),
            ..OmdbConfig::default()
        });
        let fallback = create_fallback_catalog(&config).unwrap();
        assert_eq!(fallback.catalog_name(), "omdb");

        config.omdb.as_mut().unwrap().enabled = false;
        assert!(create_fallback_catalog(&config).is_none());
    }

    #[test]
    fn test_catalog_always_built() {
        let catalog = create_catalog(&Config::default());
        assert_eq!(catalog.catalog_name(), "tmdb");
        assert_eq!(catalog.image_base_url(), "https://image.tmdb.org/t/p");
    }
}
