//! Terminal and JSON rendering of screens, cards and details.

use crate::output::Output;
use comfy_table::{Attribute, Cell, Color, Table};
use moodreel_core::{ActiveQuery, Notification, Screen};
use moodreel_models::{FilterCriteria, MovieDetails, MovieSummary};
use owo_colors::OwoColorize;
use serde_json::{json, Value};

const TOP_CAST: usize = 5;

/// Image settings for turning poster paths into URLs.
#[derive(Debug, Clone, Copy)]
pub struct ImageStyle<'a> {
    pub base_url: &'a str,
    pub poster_size: &'a str,
}

fn styled_table() -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}

fn describe_filters(criteria: &FilterCriteria) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(year) = criteria.year {
        parts.push(format!("year {}", year));
    }
    if let Some(rating) = criteria.rating_threshold() {
        parts.push(format!("rating ≥ {}", rating));
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

pub fn screen_heading(screen: &Screen) -> String {
    match screen {
        Screen::Movies { query, criteria, movies, total } => {
            let title = match query {
                ActiveQuery::None => "Discover".to_string(),
                ActiveQuery::Mood(mood) => format!("Mood: {} ({})", mood, mood.genre_labels()),
                ActiveQuery::Search(text) => format!("Results for \"{}\"", text),
            };
            match describe_filters(criteria) {
                Some(filters) => format!("{} · {} of {} movies · {}", title, movies.len(), total, filters),
                None => format!("{} · {} movies", title, total),
            }
        }
        Screen::Watchlist { movies, capacity } => {
            format!("Watchlist ({}/{})", movies.len(), capacity)
        }
    }
}

pub fn card_json(movie: &MovieSummary, style: ImageStyle<'_>, in_watchlist: bool) -> Value {
    json!({
        "id": movie.id,
        "title": movie.title,
        "year": movie.release_year(),
        "rating": movie.vote_average.filter(|r| *r != 0.0),
        "poster_url": movie.poster_url(style.base_url, style.poster_size),
        "in_watchlist": in_watchlist,
    })
}

pub fn movie_table(movies: &[MovieSummary], is_saved: impl Fn(&MovieSummary) -> bool) -> Table {
    let mut table = styled_table();
    table.set_header(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Title").add_attribute(Attribute::Bold),
        Cell::new("Year").add_attribute(Attribute::Bold),
        Cell::new("Rating").add_attribute(Attribute::Bold),
        Cell::new("ID").add_attribute(Attribute::Bold),
        Cell::new("♥").add_attribute(Attribute::Bold),
    ]);
    for (idx, movie) in movies.iter().enumerate() {
        let id = movie.id.as_ref().map(|id| id.to_string()).unwrap_or_default();
        let saved = if is_saved(movie) {
            Cell::new("♥").fg(Color::Red)
        } else {
            Cell::new("")
        };
        table.add_row(vec![
            Cell::new(idx + 1),
            Cell::new(&movie.title),
            Cell::new(movie.display_year()),
            Cell::new(movie.display_rating()).fg(Color::Yellow),
            Cell::new(id),
            saved,
        ]);
    }
    table
}

pub fn print_screen(
    output: &Output,
    screen: &Screen,
    style: ImageStyle<'_>,
    is_saved: impl Fn(&MovieSummary) -> bool,
) {
    if !output.is_human() {
        let cards: Vec<Value> = screen
            .movies()
            .iter()
            .map(|m| card_json(m, style, is_saved(m)))
            .collect();
        output.json(&json!({
            "view": screen.view(),
            "heading": screen_heading(screen),
            "movies": cards,
            "empty_message": screen.is_empty().then(|| screen.empty_message()),
        }));
        return;
    }
    if output.is_quiet() {
        return;
    }

    println!("\n{}", screen_heading(screen).bright_cyan().bold());
    if screen.is_empty() {
        println!("{}", screen.empty_message().dimmed());
        return;
    }
    println!("{}", movie_table(screen.movies(), is_saved));
}

pub fn details_json(details: &MovieDetails, style: ImageStyle<'_>, in_watchlist: bool) -> Value {
    let summary = details.to_summary();
    json!({
        "id": details.id,
        "title": details.title,
        "year": summary.release_year(),
        "rating": details.vote_average,
        "runtime": details.runtime,
        "genres": details.genre_names(),
        "overview": details.overview_or_default(),
        "cast": details.top_cast(TOP_CAST),
        "trailer_url": details.trailer_url(),
        "poster_url": details.poster_url(style.base_url, style.poster_size),
        "backdrop_url": details.backdrop_url(style.base_url),
        "in_watchlist": in_watchlist,
    })
}

pub fn print_details(output: &Output, details: &MovieDetails, style: ImageStyle<'_>, in_watchlist: bool) {
    if !output.is_human() {
        output.json(&details_json(details, style, in_watchlist));
        return;
    }
    if output.is_quiet() {
        return;
    }

    let summary = details.to_summary();
    let mut table = styled_table();
    table.set_header(vec![
        Cell::new(format!("{} ({})", details.title, summary.display_year()))
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(""),
    ]);

    let runtime = details
        .runtime
        .filter(|r| *r > 0)
        .map(|r| format!("{} min", r))
        .unwrap_or_else(|| "N/A".to_string());
    let genres = details.genre_names().join(", ");
    let cast = details.top_cast(TOP_CAST).join(", ");

    table.add_row(vec![Cell::new("ID"), Cell::new(details.id.to_string())]);
    table.add_row(vec![Cell::new("Rating"), Cell::new(summary.display_rating()).fg(Color::Yellow)]);
    table.add_row(vec![Cell::new("Runtime"), Cell::new(runtime)]);
    if !genres.is_empty() {
        table.add_row(vec![Cell::new("Genres"), Cell::new(genres)]);
    }
    table.add_row(vec![Cell::new("Overview"), Cell::new(details.overview_or_default())]);
    if !cast.is_empty() {
        table.add_row(vec![Cell::new("Cast"), Cell::new(cast)]);
    }
    if let Some(url) = details.trailer_url() {
        table.add_row(vec![Cell::new("Trailer"), Cell::new(url)]);
    }
    if let Some(url) = details.poster_url(style.base_url, style.poster_size) {
        table.add_row(vec![Cell::new("Poster"), Cell::new(url)]);
    }
    if let Some(url) = details.backdrop_url(style.base_url) {
        table.add_row(vec![Cell::new("Backdrop"), Cell::new(url)]);
    }
    let saved = if in_watchlist {
        Cell::new("♥ In watchlist").fg(Color::Red)
    } else {
        Cell::new("Not in watchlist")
    };
    table.add_row(vec![Cell::new("Watchlist"), saved]);

    println!("{}", table);
}

pub fn print_notifications(output: &Output, notifications: &[Notification]) {
    for notification in notifications {
        output.notify(notification);
    }
}
