use moodreel_config::WatchlistConfig;
use moodreel_models::{MovieId, MovieSummary};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::io;
use tracing::{debug, info, warn};
use crate::error::DiscoveryError;
use crate::store::KeyValueStore;

/// Documented watchlist cap.
pub const DEFAULT_CAPACITY: usize = 50;

/// What a toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleOutcome {
    Added,
    Removed,
}

impl fmt::Display for ToggleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToggleOutcome::Added => write!(f, "added"),
            ToggleOutcome::Removed => write!(f, "removed"),
        }
    }
}

/// What `load` had to repair in the persisted value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Entries dropped for a missing id, a duplicate id, exceeding capacity,
    /// or failing to deserialize.
    pub dropped: usize,
    /// The persisted value was unreadable as a list and was cleared.
    pub reset: bool,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.dropped == 0 && !self.reset
    }
}

/// Ordered, id-unique, capacity-bounded list of saved movies, mirrored to a
/// [`KeyValueStore`] under a single key after every mutation.
pub struct WatchlistStore<S> {
    store: S,
    key: String,
    capacity: usize,
    movies: Vec<MovieSummary>,
    report: LoadReport,
}

impl<S: KeyValueStore> WatchlistStore<S> {
    /// Read the persisted watchlist. Never fails: unreadable or malformed data
    /// leaves an empty watchlist, and malformed data is removed from the store.
    /// Individual bad entries are dropped and the cleaned list is written back.
    pub fn load(store: S, key: impl Into<String>, capacity: usize) -> Self {
        let mut this = Self {
            store,
            key: key.into(),
            capacity: capacity.max(1),
            movies: Vec::new(),
            report: LoadReport::default(),
        };

        let raw = match this.store.get(&this.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No persisted watchlist under '{}'", this.key);
                return this;
            }
            // Bytes that are not UTF-8 are as malformed as bad JSON
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                this.reset_corrupted(&e.to_string());
                return this;
            }
            Err(e) => {
                warn!("Failed to read persisted watchlist '{}': {}", this.key, e);
                return this;
            }
        };

        let (movies, unreadable) = match parse_watchlist(&raw) {
            Ok(parsed) => parsed,
            Err(e) => {
                this.reset_corrupted(&e.to_string());
                return this;
            }
        };

        let parsed = movies.len();
        this.movies = this.sanitize(movies);
        let dropped = unreadable + (parsed - this.movies.len());
        this.report.dropped = dropped;
        info!("Loaded watchlist ({} movies)", this.movies.len());

        if dropped > 0 {
            info!("Rewriting watchlist after dropping {} entries", dropped);
            if let Err(e) = this.save() {
                warn!("Failed to rewrite cleaned watchlist: {}", e);
            }
        }
        this
    }

    fn reset_corrupted(&mut self, reason: &str) {
        warn!(
            "Watchlist corruption detected under '{}': {}. Clearing persisted value.",
            self.key, reason
        );
        self.report.reset = true;
        if let Err(rm_err) = self.store.remove(&self.key) {
            warn!("Failed to clear corrupted watchlist: {}", rm_err);
        }
    }

    /// Repairs made while loading.
    pub fn load_report(&self) -> LoadReport {
        self.report
    }

    pub fn load_with_config(store: S, config: &WatchlistConfig) -> Self {
        Self::load(store, config.storage_key.clone(), config.capacity)
    }

    /// Drop entries that would break the id/uniqueness/capacity invariants.
    fn sanitize(&self, movies: Vec<MovieSummary>) -> Vec<MovieSummary> {
        let mut seen = HashSet::new();
        let mut kept = Vec::with_capacity(movies.len().min(self.capacity));

        for movie in movies {
            let Some(id) = movie.id.clone() else {
                warn!("Dropping persisted watchlist entry without an id: {:?}", movie.title);
                continue;
            };
            if !seen.insert(id.clone()) {
                warn!("Dropping duplicate persisted watchlist entry {}", id);
                continue;
            }
            if kept.len() >= self.capacity {
                warn!("Dropping persisted watchlist entry {} beyond capacity {}", id, self.capacity);
                continue;
            }
            kept.push(movie);
        }
        kept
    }

    /// Remove the movie if present, else append it.
    ///
    /// Rejects a movie without an id before touching state, rejects adds on a
    /// full list, and undoes the change if it cannot be persisted.
    pub fn toggle(&mut self, movie: &MovieSummary) -> Result<ToggleOutcome, DiscoveryError> {
        let id = movie
            .id
            .as_ref()
            .ok_or_else(|| DiscoveryError::Validation("Movie has no identifier.".to_string()))?;

        if let Some(index) = self.position(id) {
            let removed = self.movies.remove(index);
            if let Err(e) = self.save() {
                self.movies.insert(index, removed);
                return Err(e);
            }
            debug!("Removed {} from watchlist", id);
            return Ok(ToggleOutcome::Removed);
        }

        if self.is_full() {
            return Err(DiscoveryError::Capacity { capacity: self.capacity });
        }

        self.movies.push(movie.clone());
        if let Err(e) = self.save() {
            self.movies.pop();
            return Err(e);
        }
        debug!("Added {} to watchlist", id);
        Ok(ToggleOutcome::Added)
    }

    /// Rewrite the whole list to storage.
    pub fn save(&mut self) -> Result<(), DiscoveryError> {
        let json = serde_json::to_string(&self.movies)
            .map_err(|e| DiscoveryError::Storage(e.to_string()))?;
        self.store.set(&self.key, &json).map_err(|e| {
            warn!("Failed to persist watchlist: {}", e);
            DiscoveryError::Storage(e.to_string())
        })
    }

    /// Empty the list and drop the persisted value.
    pub fn clear(&mut self) -> Result<usize, DiscoveryError> {
        self.store
            .remove(&self.key)
            .map_err(|e| DiscoveryError::Storage(e.to_string()))?;
        let removed = self.movies.len();
        self.movies.clear();
        Ok(removed)
    }

    pub fn count(&self) -> usize {
        self.movies.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.movies.len() >= self.capacity
    }

    pub fn contains(&self, id: &MovieId) -> bool {
        self.position(id).is_some()
    }

    pub fn find(&self, id: &MovieId) -> Option<&MovieSummary> {
        self.position(id).map(|i| &self.movies[i])
    }

    pub fn movies(&self) -> &[MovieSummary] {
        &self.movies
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    fn position(&self, id: &MovieId) -> Option<usize> {
        self.movies.iter().position(|m| m.id.as_ref() == Some(id))
    }
}

/// The persisted value must be an array. Elements that do not deserialize
/// are dropped one by one; the second value counts them.
fn parse_watchlist(raw: &str) -> Result<(Vec<MovieSummary>, usize), DiscoveryError> {
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(|e| DiscoveryError::Parse(e.to_string()))?;
    let serde_json::Value::Array(entries) = value else {
        return Err(DiscoveryError::Parse("persisted watchlist is not an array".to_string()));
    };

    let mut movies = Vec::with_capacity(entries.len());
    let mut unreadable = 0;
    for (index, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<MovieSummary>(entry) {
            Ok(movie) => movies.push(movie),
            Err(e) => {
                warn!("Dropping unreadable persisted watchlist entry #{}: {}", index, e);
                unreadable += 1;
            }
        }
    }
    Ok((movies, unreadable))
}
