use moodreel_models::UnknownMood;
use moodreel_sources::SourceError;
use thiserror::Error;

/// Everything a user action can fail with.
///
/// None of these are fatal: the front-end turns them into a transient message
/// with [`DiscoveryError::user_message`] and keeps running.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("request failed (status {status}): {message}")]
    Network { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("no results")]
    EmptyResult,

    #[error("validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    UnknownMood(#[from] UnknownMood),

    #[error("watchlist is full ({capacity} movies)")]
    Capacity { capacity: usize },

    #[error("storage error: {0}")]
    Storage(String),

    #[error("parse error: {0}")]
    Parse(String),
}

impl From<SourceError> for DiscoveryError {
    fn from(err: SourceError) -> Self {
        let status = err.status();
        match err {
            SourceError::MissingCredential { service } => {
                DiscoveryError::Config(format!("{} API key is not configured", service))
            }
            SourceError::Status { status, message, .. } => DiscoveryError::Network { status, message },
            SourceError::Http(e) => match status {
                Some(status) => DiscoveryError::Network {
                    status,
                    message: e.to_string(),
                },
                None => DiscoveryError::Http(e.to_string()),
            },
            SourceError::Parse(msg) => DiscoveryError::Parse(msg),
        }
    }
}

impl DiscoveryError {
    /// Short message fit for a toast or a single CLI line.
    pub fn user_message(&self) -> String {
        match self {
            DiscoveryError::Config(msg) => format!("{}. Add your API key and try again.", msg),
            DiscoveryError::Network { status: 401, .. } => {
                "The movie service rejected the API key (HTTP 401). Please check your API key and try again.".to_string()
            }
            DiscoveryError::Network { status, .. } => {
                format!("Failed to load movies (HTTP {}). Please try again.", status)
            }
            DiscoveryError::Http(_) => {
                "Could not reach the movie service. Please check your connection and try again.".to_string()
            }
            DiscoveryError::EmptyResult => "No movies found. Please try again.".to_string(),
            DiscoveryError::Validation(msg) => msg.clone(),
            DiscoveryError::UnknownMood(e) => e.to_string(),
            DiscoveryError::Capacity { capacity } => format!(
                "Your watchlist is full ({} movies). Remove one before adding another.",
                capacity
            ),
            DiscoveryError::Storage(_) => {
                "Could not save your watchlist. Your change was not kept.".to_string()
            }
            DiscoveryError::Parse(_) => {
                "The movie service sent a response we could not read. Please try again.".to_string()
            }
        }
    }
}
