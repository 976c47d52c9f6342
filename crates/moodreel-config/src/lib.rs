pub mod config;
pub mod credentials;
pub mod paths;

pub use config::{is_real_key, Config, LoggingConfig, OmdbConfig, TmdbConfig, WatchlistConfig, OMDB_PLACEHOLDER_KEY, TMDB_PLACEHOLDER_KEY};
pub use credentials::CredentialStore;
pub use paths::PathManager;
