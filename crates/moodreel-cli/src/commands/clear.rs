use super::session::Session;
use super::report;
use crate::output::Output;
use crate::render::print_notifications;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use moodreel_config::PathManager;
use std::fs;

pub fn run_clear(all: bool, watchlist: bool, credentials: bool, output: &Output) -> Result<()> {
    if !(all || watchlist || credentials) {
        output.warn("No clear option specified. Use --watchlist, --credentials, or --all");
        output.println("\nExample: moodreel clear --watchlist");
        return Ok(());
    }

    if all || watchlist {
        clear_watchlist(output)?;
    }
    if all || credentials {
        clear_credentials(&PathManager::default(), output)?;
    }
    if all {
        output.success("Watchlist and credentials cleared");
    }
    Ok(())
}

fn clear_watchlist(output: &Output) -> Result<()> {
    let mut session = Session::open(None)?;
    let removed = session.discovery.clear_watchlist().map_err(|e| report(output, e))?;
    if removed == 0 {
        output.info("Watchlist is already empty");
    } else {
        print_notifications(output, &session.discovery.drain_notifications());
    }
    Ok(())
}

fn clear_credentials(path_manager: &PathManager, output: &Output) -> Result<()> {
    let credentials_file = path_manager.credentials_file();

    if credentials_file.exists() {
        fs::remove_file(&credentials_file).map_err(|e| {
            eyre!("Failed to remove credentials file at {}: {}", credentials_file.display(), e)
        })?;
        output.success(format!("Cleared credentials: {}", credentials_file.display()));
    } else {
        output.info("No credentials file found to clear");
    }
    Ok(())
}
