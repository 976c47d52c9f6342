use async_trait::async_trait;
use moodreel_config::{is_real_key, TmdbConfig, TMDB_PLACEHOLDER_KEY};
use moodreel_models::{MovieDetails, MovieId, MovieSummary};
use reqwest::Client;
use std::sync::Arc;
use tracing::debug;
use crate::error::SourceError;
use crate::request::{DiscoverQuery, PopularPage, SearchQuery};
use crate::tmdb::api;
use crate::traits::MovieCatalog;

#[derive(Clone)]
pub struct TmdbClient {
    client: Arc<Client>,
    api_key: String,
    base_url: String,
    image_base_url: String,
}

pub(crate) fn http_client() -> Client {
    Client::builder()
        .user_agent(concat!("moodreel/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|_| Client::new())
}

impl TmdbClient {
    pub fn new(config: &TmdbConfig) -> Self {
        Self {
            client: Arc::new(http_client()),
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            image_base_url: config.image_base_url.clone(),
        }
    }

    /// Checked before every request so a placeholder key never reaches the wire.
    fn api_key(&self) -> Result<&str, SourceError> {
        if is_real_key(&self.api_key, TMDB_PLACEHOLDER_KEY) {
            Ok(&self.api_key)
        } else {
            Err(SourceError::MissingCredential { service: "TMDb" })
        }
    }
}

#[async_trait]
impl MovieCatalog for TmdbClient {
    fn catalog_name(&self) -> &str {
        "tmdb"
    }

    fn image_base_url(&self) -> &str {
        &self.image_base_url
    }

    async fn discover(&self, query: &DiscoverQuery) -> Result<Vec<MovieSummary>, SourceError> {
        let api_key = self.api_key()?;
        debug!(genres = %query.genre_param(), "Discovering movies");
        api::discover_movies(&self.client, &self.base_url, api_key, query).await
    }

    async fn popular(&self, page: PopularPage) -> Result<Vec<MovieSummary>, SourceError> {
        let api_key = self.api_key()?;
        debug!(page = page.page, "Fetching popular movies");
        api::popular_movies(&self.client, &self.base_url, api_key, page).await
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<MovieSummary>, SourceError> {
        let api_key = self.api_key()?;
        debug!(query = %query.text, "Searching movies");
        api::search_movies(&self.client, &self.base_url, api_key, query).await
    }

    async fn details(&self, id: &MovieId) -> Result<MovieDetails, SourceError> {
        let api_key = self.api_key()?;
        debug!(%id, "Fetching movie details");
        api::movie_details(&self.client, &self.base_url, api_key, id).await
    }
}
