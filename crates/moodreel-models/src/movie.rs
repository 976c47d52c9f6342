use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use crate::movie_id::MovieId;

/// A movie as it appears in listings and in the persisted watchlist.
///
/// Only `id` carries identity. Listings from different endpoints (or an older
/// persisted copy) may disagree on the other fields and still describe the same movie.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieSummary {
    #[serde(default)]
    pub id: Option<MovieId>,
    #[serde(default, deserialize_with = "deserialize_title")]
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default, deserialize_with = "deserialize_rating")]
    pub vote_average: Option<f64>,
}

impl MovieSummary {
    pub fn new(id: impl Into<MovieId>, title: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            title: title.into(),
            poster_path: None,
            release_date: None,
            vote_average: None,
        }
    }

    pub fn with_release_date(mut self, date: impl Into<String>) -> Self {
        self.release_date = Some(date.into());
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.vote_average = Some(rating);
        self
    }

    pub fn with_poster(mut self, path: impl Into<String>) -> Self {
        self.poster_path = Some(path.into());
        self
    }

    /// Two summaries describe the same movie when both carry the same id.
    pub fn is_same_movie(&self, other: &MovieSummary) -> bool {
        match (&self.id, &other.id) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    pub fn release_year(&self) -> Option<i32> {
        self.release_date.as_deref().and_then(parse_release_year)
    }

    pub fn display_year(&self) -> String {
        self.release_year()
            .map(|y| y.to_string())
            .unwrap_or_else(|| "N/A".to_string())
    }

    /// Rating with one decimal, "N/A" when missing or zero (OMDb results carry 0).
    pub fn display_rating(&self) -> String {
        match self.vote_average {
            Some(r) if r != 0.0 => format!("{:.1}", r),
            _ => "N/A".to_string(),
        }
    }

    /// Full poster URL. Absolute URLs (OMDb) pass through untouched,
    /// TMDb relative paths get the image base and size prefix.
    pub fn poster_url(&self, image_base: &str, size: &str) -> Option<String> {
        image_url(self.poster_path.as_deref(), image_base, size)
    }
}

pub(crate) fn image_url(path: Option<&str>, image_base: &str, size: &str) -> Option<String> {
    let path = path?.trim();
    if path.is_empty() {
        return None;
    }
    if path.starts_with("http://") || path.starts_with("https://") {
        return Some(path.to_string());
    }
    Some(format!("{}/{}{}", image_base.trim_end_matches('/'), size, path))
}

/// Extract the release year from a TMDb date (`2010-07-15`) or an OMDb year
/// (`2010`, `2010–2012`). Anything else is unparseable.
pub fn parse_release_year(date: &str) -> Option<i32> {
    let date = date.trim();
    if let Ok(parsed) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return Some(parsed.year());
    }

    let mut chars = date.char_indices();
    let mut end = 0;
    for _ in 0..4 {
        match chars.next() {
            Some((i, c)) if c.is_ascii_digit() => end = i + c.len_utf8(),
            _ => return None,
        }
    }
    match chars.next() {
        None | Some((_, '–')) => date[..end].parse().ok(),
        _ => None,
    }
}

/// Ratings are coerced to numbers: numeric strings are accepted,
/// anything non-numeric becomes `None`.
pub(crate) fn deserialize_rating<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
    .filter(|r| r.is_finite()))
}

/// A null title (seen in older persisted copies) reads as empty.
fn deserialize_title<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_release_year() {
        assert_eq!(parse_release_year("2010-07-15"), Some(2010));
        assert_eq!(parse_release_year("1999"), Some(1999));
        assert_eq!(parse_release_year("2010–2012"), Some(2010));
        assert_eq!(parse_release_year(""), None);
        assert_eq!(parse_release_year("2010-13-45"), None);
        assert_eq!(parse_release_year("soon"), None);
        assert_eq!(parse_release_year("20101"), None);
    }

    #[test]
    fn test_deserialize_tmdb_listing_entry() {
        let json = r#"{
            "id": 27205,
            "title": "Inception",
            "poster_path": "/inception.jpg",
            "release_date": "2010-07-15",
            "vote_average": 8.4,
            "genre_ids": [28, 878],
            "overview": "ignored"
        }"#;
        let movie: MovieSummary = serde_json::from_str(json).unwrap();
        assert_eq!(movie.id, Some(MovieId::Numeric(27205)));
        assert_eq!(movie.release_year(), Some(2010));
        assert_eq!(movie.vote_average, Some(8.4));
    }

    #[test]
    fn test_rating_coercion() {
        let movie: MovieSummary =
            serde_json::from_str(r#"{"id": 1, "title": "A", "vote_average": "7.9"}"#).unwrap();
        assert_eq!(movie.vote_average, Some(7.9));

        let movie: MovieSummary =
            serde_json::from_str(r#"{"id": 1, "title": "A", "vote_average": "N/A"}"#).unwrap();
        assert_eq!(movie.vote_average, None);

        let movie: MovieSummary = serde_json::from_str(r#"{"id": 1, "title": "A"}"#).unwrap();
        assert_eq!(movie.vote_average, None);
    }

    #[test]
    fn test_missing_id_deserializes_as_none() {
        let movie: MovieSummary = serde_json::from_str(r#"{"id": null, "title": "Ghost"}"#).unwrap();
        assert!(movie.id.is_none());
        assert!(!movie.is_same_movie(&movie.clone()));
    }

    #[test]
    fn test_null_title_reads_as_empty() {
        let movie: MovieSummary = serde_json::from_str(r#"{"id": 2, "title": null}"#).unwrap();
        assert_eq!(movie.id, Some(MovieId::Numeric(2)));
        assert_eq!(movie.title, "");
    }

    #[test]
    fn test_identity_ignores_other_fields() {
        let a = MovieSummary::new(550u64, "Fight Club").with_rating(8.4);
        let b = MovieSummary::new(550u64, "Fight Club (1999)");
        assert!(a.is_same_movie(&b));
    }

    #[test]
    fn test_display_helpers() {
        let movie = MovieSummary::new(1u64, "A").with_rating(7.26);
        assert_eq!(movie.display_rating(), "7.3");
        assert_eq!(movie.display_year(), "N/A");

        let omdb = MovieSummary::new("tt1", "B").with_rating(0.0).with_release_date("2001");
        assert_eq!(omdb.display_rating(), "N/A");
        assert_eq!(omdb.display_year(), "2001");
    }

    #[test]
    fn test_poster_url() {
        let tmdb = MovieSummary::new(1u64, "A").with_poster("/a.jpg");
        assert_eq!(
            tmdb.poster_url("https://image.tmdb.org/t/p/", "w500").as_deref(),
            Some("https://image.tmdb.org/t/p/w500/a.jpg")
        );

        let omdb = MovieSummary::new("tt1", "B").with_poster("https://m.media-amazon.com/b.jpg");
        assert_eq!(
            omdb.poster_url("https://image.tmdb.org/t/p", "w500").as_deref(),
            Some("https://m.media-amazon.com/b.jpg")
        );

        assert!(MovieSummary::new(2u64, "C").poster_url("x", "w500").is_none());
    }
}
