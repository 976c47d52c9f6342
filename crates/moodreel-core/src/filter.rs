use moodreel_models::{FilterCriteria, MovieSummary, YearFilter};
use tracing::warn;

/// Keep the movies that satisfy every active constraint, in input order.
pub fn filter_movies(movies: &[MovieSummary], criteria: &FilterCriteria) -> Vec<MovieSummary> {
    if criteria.is_unconstrained() {
        return movies.to_vec();
    }
    movies
        .iter()
        .filter(|movie| matches(movie, criteria))
        .cloned()
        .collect()
}

pub fn matches(movie: &MovieSummary, criteria: &FilterCriteria) -> bool {
    if let Some(year) = criteria.year {
        // Unparseable or missing release dates never match an active year filter
        match movie.release_year() {
            Some(released) if year.contains(released) => {}
            _ => return false,
        }
    }
    if let Some(threshold) = criteria.rating_threshold() {
        match movie.vote_average {
            Some(rating) if rating >= threshold => {}
            _ => return false,
        }
    }
    true
}

/// Build criteria from raw user input. A malformed value disables its own
/// constraint with a warning instead of failing the whole query.
pub fn criteria_from_inputs(year: Option<&str>, min_rating: Option<&str>) -> FilterCriteria {
    let year = year
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|raw| match raw.parse::<YearFilter>() {
            Ok(filter) => Some(filter),
            Err(e) => {
                warn!("{}; ignoring year filter", e);
                None
            }
        });

    let min_rating = min_rating
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|raw| match raw.parse::<f64>() {
            Ok(rating) if rating.is_finite() && rating > 0.0 => Some(rating),
            Ok(_) => None,
            Err(_) => {
                warn!("Invalid minimum rating '{}'; ignoring rating filter", raw);
                None
            }
        });

    FilterCriteria { year, min_rating }
}
