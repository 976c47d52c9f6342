//! The controller that ties queries, the catalog, the watchlist and the
//! view state together. Front-ends call one method per user action and
//! render the returned [`Screen`] plus any queued notifications.

use moodreel_models::{FilterCriteria, Mood, MovieDetails, MovieId, MovieSummary};
use moodreel_sources::{KeywordCatalog, MovieCatalog};
use std::sync::Arc;
use tracing::{debug, info, warn};
use crate::error::DiscoveryError;
use crate::notification::Notification;
use crate::query::{pick_random, QueryBuilder};
use crate::state::{AppState, Screen, View};
use crate::store::KeyValueStore;
use crate::watchlist::{ToggleOutcome, WatchlistStore};

pub struct Discovery<S> {
    catalog: Arc<dyn MovieCatalog>,
    fallback: Option<Arc<dyn KeywordCatalog>>,
    queries: QueryBuilder,
    watchlist: WatchlistStore<S>,
    state: AppState,
    notifications: Vec<Notification>,
}

impl<S: KeyValueStore> Discovery<S> {
    pub fn new(
        catalog: Arc<dyn MovieCatalog>,
        watchlist: WatchlistStore<S>,
        queries: QueryBuilder,
        startup_mood: Option<&str>,
    ) -> Self {
        let mut notifications = Vec::new();
        let report = watchlist.load_report();
        if report.reset {
            notifications.push(Notification::warning(
                "Your saved watchlist could not be read and was reset.",
            ));
        } else if report.dropped > 0 {
            notifications.push(Notification::warning(format!(
                "Removed {} unreadable entries from your saved watchlist.",
                report.dropped
            )));
        }

        Self {
            catalog,
            fallback: None,
            queries,
            watchlist,
            state: AppState::new(startup_mood),
            notifications,
        }
    }

    /// Keyword catalog consulted when a mood query fails.
    pub fn with_fallback(mut self, fallback: Option<Arc<dyn KeywordCatalog>>) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn watchlist(&self) -> &WatchlistStore<S> {
        &self.watchlist
    }

    pub fn image_base_url(&self) -> &str {
        self.catalog.image_base_url()
    }

    /// Run the startup mood query, if the session was started with one.
    pub async fn start(&mut self) -> Result<Screen, DiscoveryError> {
        match self.state.active_mood() {
            Some(mood) => self.choose_mood(mood).await,
            None => Ok(self.screen()),
        }
    }

    pub async fn select_mood(&mut self, tag: &str) -> Result<Screen, DiscoveryError> {
        let mood: Mood = tag.parse()?;
        self.choose_mood(mood).await
    }

    pub async fn choose_mood(&mut self, mood: Mood) -> Result<Screen, DiscoveryError> {
        let query = self.queries.mood_query(mood);
        let ticket = self.state.select_mood(mood);
        info!(%mood, "Loading mood movies");

        let err = match self.catalog.discover(&query).await {
            Ok(movies) => {
                debug!("Mood {} returned {} movies", mood, movies.len());
                self.state.complete_query(ticket, movies);
                return Ok(self.screen());
            }
            Err(e) => DiscoveryError::from(e),
        };
        warn!("Mood query failed: {}", err);

        if let Some(movies) = self.fallback_movies(mood).await {
            // The primary failure is still reported alongside the backup results
            self.notifications.push(Notification::error(err.user_message()));
            self.notifications.push(Notification::info(format!(
                "Showing backup results for \"{}\".",
                mood.fallback_keyword()
            )));
            self.state.complete_query(ticket, movies);
            return Ok(self.screen());
        }

        self.state.finish_request(ticket);
        Err(err)
    }

    async fn fallback_movies(&self, mood: Mood) -> Option<Vec<MovieSummary>> {
        let fallback = self.fallback.as_ref()?;
        match fallback.search_keyword(mood.fallback_keyword()).await {
            Ok(movies) if !movies.is_empty() => {
                info!(
                    "Using {} backup results for {} ({} movies)",
                    fallback.catalog_name(),
                    mood,
                    movies.len()
                );
                Some(movies)
            }
            Ok(_) => {
                debug!("{} backup returned no results", fallback.catalog_name());
                None
            }
            Err(e) => {
                warn!("{} backup failed: {}", fallback.catalog_name(), e);
                None
            }
        }
    }

    /// Validated before any request is made.
    pub async fn search(&mut self, text: &str) -> Result<Screen, DiscoveryError> {
        let query = self.queries.build_search_query(text)?;
        let ticket = self.state.submit_search(query.text.clone());
        info!(query = %query.text, "Searching");

        match self.catalog.search(&query).await {
            Ok(movies) => {
                self.state.complete_query(ticket, movies);
                Ok(self.screen())
            }
            Err(e) => {
                self.state.finish_request(ticket);
                Err(e.into())
            }
        }
    }

    /// Pick one movie from a random popular page and open its details.
    /// The working result set and active query are left as they are.
    pub async fn random_pick(&mut self) -> Result<MovieDetails, DiscoveryError> {
        let page = {
            let mut rng = rand::rng();
            self.queries.build_random_query(&mut rng)
        };
        let ticket = self.state.begin_request();

        let movies = match self.catalog.popular(page).await {
            Ok(movies) => movies,
            Err(e) => {
                self.state.finish_request(ticket);
                return Err(e.into());
            }
        };

        let picked = {
            let mut rng = rand::rng();
            pick_random(&movies, &mut rng)
        };
        let picked = match picked {
            Ok(movie) => movie,
            Err(e) => {
                self.state.finish_request(ticket);
                return Err(e);
            }
        };
        self.state.finish_request(ticket);

        let id = picked
            .id
            .clone()
            .ok_or_else(|| DiscoveryError::Validation("Movie has no identifier.".to_string()))?;
        info!(%id, title = %picked.title, "Random pick");
        self.show_details(&id).await
    }

    pub async fn show_details(&mut self, id: &MovieId) -> Result<MovieDetails, DiscoveryError> {
        let ticket = self.state.begin_request();
        let result = self.catalog.details(id).await;
        self.state.finish_request(ticket);

        let details = result?;
        self.state.open_detail(details.id.clone());
        Ok(details)
    }

    pub fn close_details(&mut self) -> bool {
        self.state.close_detail()
    }

    /// Add or remove, queueing a notification for whichever happened.
    pub fn toggle_watchlist(&mut self, movie: &MovieSummary) -> Result<ToggleOutcome, DiscoveryError> {
        let outcome = self.watchlist.toggle(movie)?;
        let notification = match outcome {
            ToggleOutcome::Added => Notification::success(format!("Added \"{}\" to watchlist", movie.title)),
            ToggleOutcome::Removed => Notification::info(format!("Removed \"{}\" from watchlist", movie.title)),
        };
        self.notifications.push(notification);
        Ok(outcome)
    }

    /// Toggle by id, looking the movie up in the watchlist, then the working
    /// set, then the catalog.
    pub async fn toggle_by_id(&mut self, id: &MovieId) -> Result<ToggleOutcome, DiscoveryError> {
        let known = self
            .watchlist
            .find(id)
            .or_else(|| self.state.working_set().iter().find(|m| m.id.as_ref() == Some(id)))
            .cloned();
        let movie = match known {
            Some(movie) => movie,
            None => self.catalog.details(id).await?.to_summary(),
        };
        self.toggle_watchlist(&movie)
    }

    pub fn clear_watchlist(&mut self) -> Result<usize, DiscoveryError> {
        let removed = self.watchlist.clear()?;
        if removed > 0 {
            self.notifications
                .push(Notification::info(format!("Cleared {} movies from watchlist", removed)));
        }
        Ok(removed)
    }

    pub fn is_in_watchlist(&self, id: &MovieId) -> bool {
        self.watchlist.contains(id)
    }

    /// Never issues a request: the watchlist view reads the store, the
    /// movies view re-filters the working set.
    pub fn switch_view(&mut self, view: View) -> Screen {
        self.state.switch_view(view);
        self.screen()
    }

    pub fn apply_filters(&mut self, criteria: FilterCriteria) -> Screen {
        self.state.set_criteria(criteria);
        self.screen()
    }

    pub fn clear_search(&mut self) -> Screen {
        self.state.clear_search();
        self.screen()
    }

    pub fn screen(&self) -> Screen {
        match self.state.view() {
            View::Movies => Screen::Movies {
                query: self.state.query().clone(),
                criteria: self.state.criteria(),
                movies: self.state.visible_movies(),
                total: self.state.working_set().len(),
            },
            View::Watchlist => Screen::Watchlist {
                movies: self.watchlist.movies().to_vec(),
                capacity: self.watchlist.capacity(),
            },
        }
    }

    /// Queue the user-facing message for a failed action.
    pub fn report(&mut self, err: &DiscoveryError) {
        self.notifications.push(Notification::error(err.user_message()));
    }

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }
}

#[cfg(test)]
mod tests;
