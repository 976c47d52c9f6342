use moodreel_models::{MovieDetails, MovieId, MovieSummary};
use reqwest::{Client, Response};
use serde::Deserialize;
use tracing::debug;
use crate::error::SourceError;
use crate::request::{DiscoverQuery, PopularPage, SearchQuery};

const SERVICE: &str = "TMDb";

/// Listing envelope shared by discover, popular and search.
#[derive(Debug, Deserialize)]
pub(crate) struct ListingResponse {
    #[serde(default)]
    pub results: Option<Vec<MovieSummary>>,
}

impl ListingResponse {
    pub(crate) fn into_movies(self) -> Vec<MovieSummary> {
        self.results.unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    status_message: Option<String>,
}

async fn check_response(resp: Response) -> Result<Response, SourceError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.status_message)
        .unwrap_or(body);
    Err(SourceError::Status {
        service: SERVICE,
        status,
        message,
    })
}

async fn fetch_listing(
    client: &Client,
    url: String,
    params: &[(&str, String)],
) -> Result<Vec<MovieSummary>, SourceError> {
    let resp = client
        .get(&url)
        .query(params)
        .header("Accept", "application/json")
        .send()
        .await?;

    let resp = check_response(resp).await?;
    let listing: ListingResponse = resp
        .json()
        .await
        .map_err(|e| SourceError::Parse(e.to_string()))?;

    let movies = listing.into_movies();
    debug!("TMDb {} returned {} movies", url, movies.len());
    Ok(movies)
}

/// Genre-filtered discovery sorted per the query
pub async fn discover_movies(
    client: &Client,
    base_url: &str,
    api_key: &str,
    query: &DiscoverQuery,
) -> Result<Vec<MovieSummary>, SourceError> {
    let params = [
        ("api_key", api_key.to_string()),
        ("with_genres", query.genre_param()),
        ("sort_by", query.sort_by.clone()),
        ("vote_count.gte", query.min_vote_count.to_string()),
    ];
    fetch_listing(client, format!("{}/discover/movie", base_url), &params).await
}

pub async fn popular_movies(
    client: &Client,
    base_url: &str,
    api_key: &str,
    page: PopularPage,
) -> Result<Vec<MovieSummary>, SourceError> {
    let params = [
        ("api_key", api_key.to_string()),
        ("page", page.page.to_string()),
    ];
    fetch_listing(client, format!("{}/movie/popular", base_url), &params).await
}

pub async fn search_movies(
    client: &Client,
    base_url: &str,
    api_key: &str,
    query: &SearchQuery,
) -> Result<Vec<MovieSummary>, SourceError> {
    let params = [
        ("api_key", api_key.to_string()),
        ("query", query.text.clone()),
    ];
    fetch_listing(client, format!("{}/search/movie", base_url), &params).await
}

/// Single movie with trailer videos and cast in one round trip
pub async fn movie_details(
    client: &Client,
    base_url: &str,
    api_key: &str,
    id: &MovieId,
) -> Result<MovieDetails, SourceError> {
    let resp = client
        .get(format!("{}/movie/{}", base_url, id))
        .query(&[
            ("api_key", api_key),
            ("append_to_response", "videos,credits"),
        ])
        .header("Accept", "application/json")
        .send()
        .await?;

    let resp = check_response(resp).await?;
    resp.json::<MovieDetails>()
        .await
        .map_err(|e| SourceError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_with_results() {
        let json = r#"{"page": 1, "results": [
            {"id": 1, "title": "One", "release_date": "2012-01-01", "vote_average": 7.1},
            {"id": 2, "title": "Two"}
        ], "total_pages": 1}"#;
        let listing: ListingResponse = serde_json::from_str(json).unwrap();
        let movies = listing.into_movies();
        assert_eq!(movies.len(), 2);
        assert_eq!(movies[1].title, "Two");
    }

    #[test]
    fn test_listing_without_results_is_empty() {
        let listing: ListingResponse = serde_json::from_str(r#"{"page": 1}"#).unwrap();
        assert!(listing.into_movies().is_empty());

        let listing: ListingResponse = serde_json::from_str(r#"{"results": null}"#).unwrap();
        assert!(listing.into_movies().is_empty());
    }
}
