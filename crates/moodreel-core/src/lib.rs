pub mod discovery;
pub mod error;
pub mod filter;
pub mod keyboard;
pub mod notification;
pub mod query;
pub mod state;
pub mod store;
pub mod watchlist;

pub use discovery::Discovery;
pub use error::DiscoveryError;
pub use filter::{criteria_from_inputs, filter_movies};
pub use keyboard::{Key, KeyContext, Shortcut};
pub use notification::{Notification, NotificationKind};
pub use query::QueryBuilder;
pub use state::{ActiveQuery, AppState, RequestTicket, Screen, View};
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use watchlist::{LoadReport, ToggleOutcome, WatchlistStore};
