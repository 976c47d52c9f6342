use async_trait::async_trait;
use moodreel_config::{is_real_key, OmdbConfig, OMDB_PLACEHOLDER_KEY};
use moodreel_models::{MovieId, MovieSummary};
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;
use crate::error::SourceError;
use crate::tmdb::client::http_client;
use crate::traits::KeywordCatalog;

const SERVICE: &str = "OMDb";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Search", default)]
    search: Vec<SearchItem>,
    #[serde(rename = "Error", default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    #[serde(rename = "imdbID")]
    imdb_id: String,
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Year", default)]
    year: Option<String>,
    #[serde(rename = "Poster", default)]
    poster: Option<String>,
}

impl SearchItem {
    /// OMDb has no rating in search results; posters are absolute URLs or "N/A".
    fn into_summary(self) -> MovieSummary {
        MovieSummary {
            id: Some(MovieId::Text(self.imdb_id)),
            title: self.title,
            poster_path: self.poster.filter(|p| p != "N/A"),
            release_date: self.year,
            vote_average: Some(0.0),
        }
    }
}

fn parse_search_response(body: SearchResponse) -> Vec<MovieSummary> {
    if body.response != "True" {
        debug!("OMDb search returned no results: {}", body.error.unwrap_or_default());
        return Vec::new();
    }
    body.search.into_iter().map(SearchItem::into_summary).collect()
}

#[derive(Clone)]
pub struct OmdbClient {
    client: Arc<Client>,
    api_key: String,
    base_url: String,
}

impl OmdbClient {
    pub fn new(config: &OmdbConfig) -> Self {
        Self {
            client: Arc::new(http_client()),
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl KeywordCatalog for OmdbClient {
    fn catalog_name(&self) -> &str {
        "omdb"
    }

    async fn search_keyword(&self, keyword: &str) -> Result<Vec<MovieSummary>, SourceError> {
        if !is_real_key(&self.api_key, OMDB_PLACEHOLDER_KEY) {
            return Err(SourceError::MissingCredential { service: SERVICE });
        }

        let resp = self
            .client
            .get(format!("{}/", self.base_url))
            .query(&[
                ("apikey", self.api_key.as_str()),
                ("s", keyword),
                ("type", "movie"),
            ])
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(SourceError::Status {
                service: SERVICE,
                status,
                message,
            });
        }

        let body: SearchResponse = resp
            .json()
            .await
            .map_err(|e| SourceError::Parse(e.to_string()))?;
        Ok(parse_search_response(body))
    }
}
