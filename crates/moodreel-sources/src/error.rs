use thiserror::Error;

/// Errors from the remote movie catalogs.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("{service} API key is missing or still set to the placeholder")]
    MissingCredential { service: &'static str },

    #[error("{service} API error (status {status}): {message}")]
    Status {
        service: &'static str,
        status: u16,
        message: String,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("parse error: {0}")]
    Parse(String),
}

impl SourceError {
    /// HTTP status for non-2xx responses
    pub fn status(&self) -> Option<u16> {
        match self {
            SourceError::Status { status, .. } => Some(*status),
            SourceError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
