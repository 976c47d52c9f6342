use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque movie identifier.
///
/// TMDb hands out integers while OMDb uses IMDb ids such as `tt0111161`, so both
/// shapes are accepted. The two variants never compare equal to each other:
/// `27205` and `"27205"` are different movies as far as the watchlist is concerned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MovieId {
    Numeric(u64),
    Text(String),
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MovieId::Numeric(id) => write!(f, "{}", id),
            MovieId::Text(id) => write!(f, "{}", id),
        }
    }
}

impl FromStr for MovieId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("movie id cannot be empty".to_string());
        }
        match trimmed.parse::<u64>() {
            Ok(id) => Ok(MovieId::Numeric(id)),
            Err(_) => Ok(MovieId::Text(trimmed.to_string())),
        }
    }
}

impl From<u64> for MovieId {
    fn from(id: u64) -> Self {
        MovieId::Numeric(id)
    }
}

impl From<&str> for MovieId {
    fn from(id: &str) -> Self {
        MovieId::Text(id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_numeric_and_text() {
        let ids: Vec<MovieId> = serde_json::from_str(r#"[27205, "tt1375666"]"#).unwrap();
        assert_eq!(ids[0], MovieId::Numeric(27205));
        assert_eq!(ids[1], MovieId::Text("tt1375666".to_string()));
    }

    #[test]
    fn test_numeric_and_text_are_distinct() {
        assert_ne!(MovieId::Numeric(42), MovieId::Text("42".to_string()));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("  550 ".parse::<MovieId>().unwrap(), MovieId::Numeric(550));
        assert_eq!("tt0137523".parse::<MovieId>().unwrap(), MovieId::from("tt0137523"));
        assert!("   ".parse::<MovieId>().is_err());
    }
}
