//! Request shaping for mood, search and random queries.
//!
//! Nothing here touches the network or application state; the builders only
//! produce the request values handed to a [`moodreel_sources::MovieCatalog`].

use moodreel_config::TmdbConfig;
use moodreel_models::{Mood, MovieSummary};
use moodreel_sources::{DiscoverQuery, PopularPage, SearchQuery};
use rand::Rng;
use tracing::debug;
use crate::error::DiscoveryError;

pub const DEFAULT_SORT: &str = "popularity.desc";
pub const DEFAULT_MIN_VOTE_COUNT: u32 = 100;
/// Random picks come from one of the first N popular pages.
pub const RANDOM_PAGE_COUNT: u32 = 10;
pub const MIN_SEARCH_LEN: usize = 2;

#[derive(Debug, Clone)]
pub struct QueryBuilder {
    min_vote_count: u32,
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_VOTE_COUNT)
    }
}

impl QueryBuilder {
    pub fn new(min_vote_count: u32) -> Self {
        Self { min_vote_count }
    }

    pub fn from_config(config: &TmdbConfig) -> Self {
        Self::new(config.min_vote_count)
    }

    /// Look up a mood tag and shape its discover request.
    pub fn build_mood_query(&self, tag: &str) -> Result<(Mood, DiscoverQuery), DiscoveryError> {
        let mood: Mood = tag.parse()?;
        Ok((mood, self.mood_query(mood)))
    }

    pub fn mood_query(&self, mood: Mood) -> DiscoverQuery {
        DiscoverQuery {
            genre_ids: mood.genre_ids().to_vec(),
            sort_by: DEFAULT_SORT.to_string(),
            min_vote_count: self.min_vote_count,
        }
    }

    pub fn build_search_query(&self, text: &str) -> Result<SearchQuery, DiscoveryError> {
        let text = text.trim();
        if text.chars().count() < MIN_SEARCH_LEN {
            return Err(DiscoveryError::Validation(format!(
                "Please enter at least {} characters to search.",
                MIN_SEARCH_LEN
            )));
        }
        Ok(SearchQuery { text: text.to_string() })
    }

    /// Uniform choice among the first [`RANDOM_PAGE_COUNT`] popular pages.
    pub fn build_random_query<R: Rng + ?Sized>(&self, rng: &mut R) -> PopularPage {
        let page = rng.random_range(1..=RANDOM_PAGE_COUNT);
        debug!(page, "Random pick page");
        PopularPage { page }
    }
}

/// Second half of a random query: one movie, uniformly, from the fetched page.
pub fn pick_random<R: Rng + ?Sized>(
    movies: &[MovieSummary],
    rng: &mut R,
) -> Result<MovieSummary, DiscoveryError> {
    if movies.is_empty() {
        return Err(DiscoveryError::EmptyResult);
    }
    let index = rng.random_range(0..movies.len());
    Ok(movies[index].clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_every_mood_has_genres() {
        let builder = QueryBuilder::default();
        for &mood in Mood::ALL {
            let (parsed, query) = builder.build_mood_query(mood.tag()).unwrap();
            assert_eq!(parsed, mood);
            assert!(!query.genre_ids.is_empty());
            assert_eq!(query.sort_by, "popularity.desc");
            assert_eq!(query.min_vote_count, 100);
        }
    }

    #[test]
    fn test_unknown_mood() {
        let err = QueryBuilder::default().build_mood_query("grumpy").unwrap_err();
        assert!(matches!(err, DiscoveryError::UnknownMood(_)));
    }

    #[test]
    fn test_mood_query_uses_configured_vote_floor() {
        let config = TmdbConfig {
            min_vote_count: 250,
            ..TmdbConfig::default()
        };
        let query = QueryBuilder::from_config(&config).mood_query(Mood::Mysterious);
        assert_eq!(query.genre_ids, vec![9648, 53, 80]);
        assert_eq!(query.min_vote_count, 250);
    }

    #[test]
    fn test_search_validation() {
        let builder = QueryBuilder::default();
        assert!(matches!(builder.build_search_query("a"), Err(DiscoveryError::Validation(_))));
        assert!(matches!(builder.build_search_query("   x  "), Err(DiscoveryError::Validation(_))));
        assert_eq!(builder.build_search_query("  up ").unwrap().text, "up");
        assert_eq!(builder.build_search_query("batman").unwrap().text, "batman");
    }

    #[test]
    fn test_random_page_in_range() {
        let builder = QueryBuilder::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let page = builder.build_random_query(&mut rng).page;
            assert!((1..=RANDOM_PAGE_COUNT).contains(&page));
        }
    }

    #[test]
    fn test_pick_random() {
        let mut rng = StdRng::seed_from_u64(42);
        assert!(matches!(pick_random(&[], &mut rng), Err(DiscoveryError::EmptyResult)));

        let movies = vec![MovieSummary::new(1u64, "One"), MovieSummary::new(2u64, "Two")];
        let picked = pick_random(&movies, &mut rng).unwrap();
        assert!(movies.iter().any(|m| m.is_same_movie(&picked)));
    }
}
