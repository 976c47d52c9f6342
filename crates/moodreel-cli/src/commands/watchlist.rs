use super::session::Session;
use super::ui::Spinner;
use super::report;
use crate::output::Output;
use crate::render::{print_notifications, print_screen};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use moodreel_core::View;
use moodreel_models::MovieId;
use serde_json::json;

/// Saved movies, straight from the store. Never touches the network.
pub fn run_list(output: &Output) -> Result<()> {
    let mut session = Session::open(None)?;
    // Repairs made while loading the saved list
    print_notifications(output, &session.discovery.drain_notifications());
    let screen = session.discovery.switch_view(View::Watchlist);
    print_screen(output, &screen, session.image_style(), |_| true);
    Ok(())
}

pub async fn run_toggle(id: &str, output: &Output) -> Result<()> {
    let id: MovieId = id.parse().map_err(|e: String| eyre!(e))?;
    let mut session = Session::open(None)?;

    // Only unknown ids need a details lookup
    let spinner = if session.discovery.is_in_watchlist(&id) {
        None
    } else {
        Some(Spinner::start("Looking up movie...", output))
    };
    let result = session.discovery.toggle_by_id(&id).await;
    if let Some(spinner) = spinner {
        spinner.finish();
    }

    let outcome = result.map_err(|e| report(output, e))?;
    if output.is_human() {
        print_notifications(output, &session.discovery.drain_notifications());
    } else {
        output.json(&json!({
            "id": id,
            "outcome": outcome,
            "count": session.discovery.watchlist().count(),
        }));
    }
    Ok(())
}

pub fn run_count(output: &Output) -> Result<()> {
    let mut session = Session::open(None)?;
    print_notifications(output, &session.discovery.drain_notifications());
    let watchlist = session.discovery.watchlist();

    if output.is_human() {
        output.info(format!("{} / {} movies", watchlist.count(), watchlist.capacity()));
    } else {
        output.json(&json!({
            "count": watchlist.count(),
            "capacity": watchlist.capacity(),
        }));
    }
    Ok(())
}
