use serde::{Deserialize, Serialize};
use crate::movie::{deserialize_rating, image_url};
use crate::movie_id::MovieId;
use crate::MovieSummary;

/// Expanded single-movie payload (`/movie/{id}?append_to_response=videos,credits`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetails {
    pub id: MovieId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default, deserialize_with = "deserialize_rating")]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub videos: Option<VideoList>,
    #[serde(default)]
    pub credits: Option<Credits>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VideoList {
    #[serde(default)]
    pub results: Vec<Video>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Video {
    pub key: String,
    #[serde(default)]
    pub site: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credits {
    #[serde(default)]
    pub cast: Vec<CastMember>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CastMember {
    pub name: String,
    #[serde(default)]
    pub character: Option<String>,
}

impl MovieDetails {
    /// First YouTube trailer, if the payload carries one
    pub fn trailer(&self) -> Option<&Video> {
        self.videos
            .as_ref()?
            .results
            .iter()
            .find(|v| v.kind == "Trailer" && v.site == "YouTube")
    }

    pub fn trailer_url(&self) -> Option<String> {
        self.trailer()
            .map(|v| format!("https://www.youtube.com/embed/{}", v.key))
    }

    pub fn top_cast(&self, limit: usize) -> Vec<&str> {
        self.credits
            .as_ref()
            .map(|c| c.cast.iter().take(limit).map(|m| m.name.as_str()).collect())
            .unwrap_or_default()
    }

    pub fn genre_names(&self) -> Vec<&str> {
        self.genres.iter().map(|g| g.name.as_str()).collect()
    }

    pub fn overview_or_default(&self) -> &str {
        match self.overview.as_deref() {
            Some(text) if !text.trim().is_empty() => text,
            _ => "No overview available.",
        }
    }

    pub fn poster_url(&self, image_base: &str, size: &str) -> Option<String> {
        image_url(self.poster_path.as_deref(), image_base, size)
    }

    pub fn backdrop_url(&self, image_base: &str) -> Option<String> {
        image_url(self.backdrop_path.as_deref(), image_base, "original")
    }

    /// Reduce to the listing shape stored in the watchlist.
    pub fn to_summary(&self) -> MovieSummary {
        MovieSummary {
            id: Some(self.id.clone()),
            title: self.title.clone(),
            poster_path: self.poster_path.clone(),
            release_date: self.release_date.clone(),
            vote_average: self.vote_average,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DETAIL_JSON: &str = r#"{
        "id": 27205,
        "title": "Inception",
        "overview": "A thief who steals corporate secrets...",
        "poster_path": "/poster.jpg",
        "backdrop_path": "/backdrop.jpg",
        "release_date": "2010-07-15",
        "vote_average": 8.369,
        "runtime": 148,
        "genres": [{"id": 28, "name": "Action"}, {"id": 878, "name": "Science Fiction"}],
        "videos": {"results": [
            {"key": "teaser1", "site": "YouTube", "type": "Teaser"},
            {"key": "vimeo1", "site": "Vimeo", "type": "Trailer"},
            {"key": "YoHD9XEInc0", "site": "YouTube", "type": "Trailer"}
        ]},
        "credits": {"cast": [
            {"name": "Leonardo DiCaprio", "character": "Cobb"},
            {"name": "Joseph Gordon-Levitt"},
            {"name": "Elliot Page"},
            {"name": "Tom Hardy"},
            {"name": "Ken Watanabe"},
            {"name": "Cillian Murphy"}
        ]}
    }"#;

    #[test]
    fn test_parse_details_payload() {
        let details: MovieDetails = serde_json::from_str(DETAIL_JSON).unwrap();
        assert_eq!(details.runtime, Some(148));
        assert_eq!(details.trailer().map(|v| v.key.as_str()), Some("YoHD9XEInc0"));
        assert_eq!(
            details.trailer_url().as_deref(),
            Some("https://www.youtube.com/embed/YoHD9XEInc0")
        );
        assert_eq!(details.top_cast(5).len(), 5);
        assert_eq!(details.top_cast(5)[0], "Leonardo DiCaprio");
        assert_eq!(details.genre_names(), vec!["Action", "Science Fiction"]);
        assert_eq!(
            details.backdrop_url("https://image.tmdb.org/t/p").as_deref(),
            Some("https://image.tmdb.org/t/p/original/backdrop.jpg")
        );
    }

    #[test]
    fn test_minimal_details_payload() {
        let details: MovieDetails = serde_json::from_str(r#"{"id": 5, "title": "Bare"}"#).unwrap();
        assert!(details.trailer().is_none());
        assert!(details.top_cast(5).is_empty());
        assert_eq!(details.overview_or_default(), "No overview available.");

        let summary = details.to_summary();
        assert_eq!(summary.id, Some(MovieId::Numeric(5)));
        assert_eq!(summary.title, "Bare");
    }
}
