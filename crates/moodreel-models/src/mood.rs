use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// User-facing discovery categories.
///
/// Each mood maps to an ordered set of TMDb genre ids. The order of `Mood::ALL`
/// is also the order of the number keys in the browse session (1 = happy).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Sad,
    Excited,
    Romantic,
    Adventurous,
    Mysterious,
}

impl Mood {
    pub const ALL: &'static [Mood] = &[
        Mood::Happy,
        Mood::Sad,
        Mood::Excited,
        Mood::Romantic,
        Mood::Adventurous,
        Mood::Mysterious,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Excited => "excited",
            Mood::Romantic => "romantic",
            Mood::Adventurous => "adventurous",
            Mood::Mysterious => "mysterious",
        }
    }

    /// TMDb genre ids for this mood
    pub fn genre_ids(self) -> &'static [u32] {
        match self {
            Mood::Happy => &[35, 10751, 16],       // Comedy, Family, Animation
            Mood::Sad => &[18, 10749],             // Drama, Romance
            Mood::Excited => &[28, 12, 878],       // Action, Adventure, Sci-Fi
            Mood::Romantic => &[10749, 35],        // Romance, Comedy
            Mood::Adventurous => &[12, 14, 878],   // Adventure, Fantasy, Sci-Fi
            Mood::Mysterious => &[9648, 53, 80],   // Mystery, Thriller, Crime
        }
    }

    pub fn genre_labels(self) -> &'static str {
        match self {
            Mood::Happy => "Comedy, Family, Animation",
            Mood::Sad => "Drama, Romance",
            Mood::Excited => "Action, Adventure, Sci-Fi",
            Mood::Romantic => "Romance, Comedy",
            Mood::Adventurous => "Adventure, Fantasy, Sci-Fi",
            Mood::Mysterious => "Mystery, Thriller, Crime",
        }
    }

    /// Keyword used against OMDb, which has no genre search.
    pub fn fallback_keyword(self) -> &'static str {
        match self {
            Mood::Happy => "comedy",
            Mood::Sad => "drama",
            Mood::Excited => "action",
            Mood::Romantic => "romance",
            Mood::Adventurous => "adventure",
            Mood::Mysterious => "mystery",
        }
    }

    /// 1-based position as used by the number keys
    pub fn from_position(position: usize) -> Option<Mood> {
        position.checked_sub(1).and_then(|i| Mood::ALL.get(i).copied())
    }

    pub fn position(self) -> usize {
        Mood::ALL.iter().position(|m| *m == self).map(|i| i + 1).unwrap_or(0)
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for Mood {
    type Err = UnknownMood;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Mood::ALL
            .iter()
            .copied()
            .find(|m| m.tag().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownMood(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMood(pub String);

impl fmt::Display for UnknownMood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let known: Vec<&str> = Mood::ALL.iter().map(|m| m.tag()).collect();
        write!(f, "Unknown mood '{}' (expected one of: {})", self.0, known.join(", "))
    }
}

impl std::error::Error for UnknownMood {}
