use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Year constraint: a single year or an inclusive range such as `2010-2015`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum YearFilter {
    Exact { year: i32 },
    Range { start: i32, end: i32 },
}

impl YearFilter {
    pub fn contains(&self, year: i32) -> bool {
        match *self {
            YearFilter::Exact { year: wanted } => year == wanted,
            YearFilter::Range { start, end } => year >= start && year <= end,
        }
    }
}

impl fmt::Display for YearFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YearFilter::Exact { year } => write!(f, "{}", year),
            YearFilter::Range { start, end } => write!(f, "{}-{}", start, end),
        }
    }
}

impl FromStr for YearFilter {
    type Err = InvalidYearFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        let invalid = || InvalidYearFilter(s.to_string());

        match value.split_once('-') {
            Some((start, end)) => {
                let start: i32 = start.trim().parse().map_err(|_| invalid())?;
                let end: i32 = end.trim().parse().map_err(|_| invalid())?;
                if start > end {
                    return Err(invalid());
                }
                Ok(YearFilter::Range { start, end })
            }
            None => value
                .parse()
                .map(|year| YearFilter::Exact { year })
                .map_err(|_| invalid()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidYearFilter(pub String);

impl fmt::Display for InvalidYearFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid year filter '{}' (use 2014 or 2010-2015)", self.0)
    }
}

impl std::error::Error for InvalidYearFilter {}

/// Active result filters. `Default` means no constraint at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<YearFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_rating: Option<f64>,
}

impl FilterCriteria {
    pub fn year(year: YearFilter) -> Self {
        Self { year: Some(year), min_rating: None }
    }

    pub fn min_rating(min_rating: f64) -> Self {
        Self { year: None, min_rating: Some(min_rating) }
    }

    /// A threshold of zero (or below) is the "any rating" choice.
    pub fn rating_threshold(&self) -> Option<f64> {
        self.min_rating.filter(|r| r.is_finite() && *r > 0.0)
    }

    pub fn is_unconstrained(&self) -> bool {
        self.year.is_none() && self.rating_threshold().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_year_filters() {
        assert_eq!("2014".parse::<YearFilter>().unwrap(), YearFilter::Exact { year: 2014 });
        assert_eq!(
            " 2010 - 2015 ".parse::<YearFilter>().unwrap(),
            YearFilter::Range { start: 2010, end: 2015 }
        );
        assert!("20x0".parse::<YearFilter>().is_err());
        assert!("2010-abc".parse::<YearFilter>().is_err());
        assert!("2015-2010".parse::<YearFilter>().is_err());
    }

    #[test]
    fn test_range_is_inclusive() {
        let range = YearFilter::Range { start: 2010, end: 2015 };
        assert!(range.contains(2010));
        assert!(range.contains(2015));
        assert!(!range.contains(2009));
        assert!(!range.contains(2016));
    }

    #[test]
    fn test_rating_threshold() {
        assert_eq!(FilterCriteria::min_rating(0.0).rating_threshold(), None);
        assert_eq!(FilterCriteria::min_rating(7.5).rating_threshold(), Some(7.5));
        assert!(FilterCriteria::default().is_unconstrained());
        assert!(FilterCriteria::min_rating(0.0).is_unconstrained());
    }
}
