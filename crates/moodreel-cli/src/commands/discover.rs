use super::session::Session;
use super::ui::Spinner;
use super::report;
use crate::output::Output;
use crate::render::{print_details, print_notifications, print_screen};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Table};
use moodreel_models::{FilterCriteria, Mood, MovieId};
use serde_json::json;

pub async fn run_mood(tag: &str, criteria: FilterCriteria, output: &Output) -> Result<()> {
    let mut session = Session::open(None)?;
    session.discovery.apply_filters(criteria);

    let spinner = Spinner::start("Loading movies...", output);
    let result = session.discovery.select_mood(tag).await;
    spinner.finish();

    print_notifications(output, &session.discovery.drain_notifications());
    let screen = result.map_err(|e| report(output, e))?;
    print_screen(output, &screen, session.image_style(), |m| session.is_saved(m));
    Ok(())
}

pub async fn run_search(text: &str, criteria: FilterCriteria, output: &Output) -> Result<()> {
    let mut session = Session::open(None)?;
    session.discovery.apply_filters(criteria);

    let spinner = Spinner::start(&format!("Searching for \"{}\"...", text.trim()), output);
    let result = session.discovery.search(text).await;
    spinner.finish();

    let screen = result.map_err(|e| report(output, e))?;
    print_screen(output, &screen, session.image_style(), |m| session.is_saved(m));
    Ok(())
}

pub async fn run_random(output: &Output) -> Result<()> {
    let mut session = Session::open(None)?;

    let spinner = Spinner::start("Picking a random movie...", output);
    let result = session.discovery.random_pick().await;
    spinner.finish();

    let details = result.map_err(|e| report(output, e))?;
    let saved = session.discovery.is_in_watchlist(&details.id);
    print_details(output, &details, session.image_style(), saved);
    Ok(())
}

pub async fn run_details(id: &str, output: &Output) -> Result<()> {
    let id: MovieId = id.parse().map_err(|e: String| eyre!(e))?;
    let mut session = Session::open(None)?;

    let spinner = Spinner::start("Loading movie details...", output);
    let result = session.discovery.show_details(&id).await;
    spinner.finish();

    let details = result.map_err(|e| report(output, e))?;
    let saved = session.discovery.is_in_watchlist(&details.id);
    print_details(output, &details, session.image_style(), saved);
    Ok(())
}

/// The mood table: key, tag and genres.
pub fn run_moods(output: &Output) -> Result<()> {
    if !output.is_human() {
        let moods: Vec<_> = Mood::ALL
            .iter()
            .map(|m| {
                json!({
                    "key": m.position(),
                    "tag": m.tag(),
                    "genres": m.genre_labels(),
                    "genre_ids": m.genre_ids(),
                })
            })
            .collect();
        output.json(&json!({ "moods": moods }));
        return Ok(());
    }
    if output.is_quiet() {
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table.set_header(vec![
        Cell::new("Key").add_attribute(Attribute::Bold),
        Cell::new("Mood").add_attribute(Attribute::Bold),
        Cell::new("Genres").add_attribute(Attribute::Bold),
    ]);
    for mood in Mood::ALL {
        table.add_row(vec![
            Cell::new(mood.position()),
            Cell::new(mood.tag()),
            Cell::new(mood.genre_labels()),
        ]);
    }
    println!("{}", table);
    Ok(())
}
