use async_trait::async_trait;
use moodreel_models::{MovieDetails, MovieId, MovieSummary};
use crate::error::SourceError;
use crate::request::{DiscoverQuery, PopularPage, SearchQuery};

/// Remote movie metadata catalog.
///
/// Listing calls return an empty vector when the payload has no `results`;
/// "nothing found" is not an error at this layer.
#[async_trait]
pub trait MovieCatalog: Send + Sync {
    fn catalog_name(&self) -> &str;

    /// Image base used to turn relative poster paths into URLs
    fn image_base_url(&self) -> &str;

    async fn discover(&self, query: &DiscoverQuery) -> Result<Vec<MovieSummary>, SourceError>;
    async fn popular(&self, page: PopularPage) -> Result<Vec<MovieSummary>, SourceError>;
    async fn search(&self, query: &SearchQuery) -> Result<Vec<MovieSummary>, SourceError>;
    async fn details(&self, id: &MovieId) -> Result<MovieDetails, SourceError>;
}

/// Keyword search used as a fallback when genre discovery fails.
#[async_trait]
pub trait KeywordCatalog: Send + Sync {
    fn catalog_name(&self) -> &str;

    async fn search_keyword(&self, keyword: &str) -> Result<Vec<MovieSummary>, SourceError>;
}
