//! Request shapes handed to a [`MovieCatalog`](crate::MovieCatalog).
//!
//! These are plain data; validation happens where they are built.

use serde::{Deserialize, Serialize};

/// Genre-filtered discovery (`/discover/movie`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoverQuery {
    pub genre_ids: Vec<u32>,
    pub sort_by: String,
    pub min_vote_count: u32,
}

impl DiscoverQuery {
    /// TMDb expects `with_genres` as a comma separated list
    pub fn genre_param(&self) -> String {
        self.genre_ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Free-text title search (`/search/movie`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub text: String,
}

/// One page of `/movie/popular`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopularPage {
    pub page: u32,
}
