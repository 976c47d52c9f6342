pub mod browse;
pub mod clear;
pub mod config;
pub mod discover;
pub mod prompts;
pub mod session;
pub mod ui;
pub mod watchlist;

use crate::output::Output;
use moodreel_core::DiscoveryError;

/// A failure already shown to the user; `main` only turns it into exit code 1.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct Reported(pub String);

/// Print the user-facing message for a failed action and hand back a
/// [`Reported`] error for the command to return.
pub fn report(output: &Output, err: DiscoveryError) -> color_eyre::Report {
    tracing::debug!(error = %err, "Command failed");
    let message = err.user_message();
    output.error(&message);
    color_eyre::Report::new(Reported(message))
}
