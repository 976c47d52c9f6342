//! View/selection state machine.
//!
//! `AppState` holds everything the front-end shows: which view is active,
//! which query produced the working result set, the active filters and the
//! open detail. It performs no I/O. Each query hands out a [`RequestTicket`];
//! only the newest ticket may replace the working result set.

use moodreel_models::{FilterCriteria, Mood, MovieId, MovieSummary};
use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};
use crate::filter::filter_movies;

pub const EMPTY_RESULTS_MESSAGE: &str = "No movies found. Try a different mood or filters.";
pub const EMPTY_WATCHLIST_MESSAGE: &str = "Your watchlist is empty. Add movies to watch later!";
pub const IDLE_MESSAGE: &str = "Pick a mood or search to discover movies.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Movies,
    Watchlist,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum ActiveQuery {
    None,
    Mood(Mood),
    Search(String),
}

impl fmt::Display for ActiveQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActiveQuery::None => write!(f, "none"),
            ActiveQuery::Mood(mood) => write!(f, "mood: {}", mood),
            ActiveQuery::Search(text) => write!(f, "search: \"{}\"", text),
        }
    }
}

/// Generation number of an issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn generation(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    view: View,
    query: ActiveQuery,
    working_set: Vec<MovieSummary>,
    criteria: FilterCriteria,
    generation: u64,
    pending: Option<u64>,
    detail: Option<MovieId>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(None)
    }
}

impl AppState {
    /// Movies view, with the startup mood as the active query when it names a
    /// known mood.
    pub fn new(startup_mood: Option<&str>) -> Self {
        let query = match startup_mood.map(str::parse::<Mood>) {
            Some(Ok(mood)) => ActiveQuery::Mood(mood),
            Some(Err(e)) => {
                warn!("Ignoring startup mood: {}", e);
                ActiveQuery::None
            }
            None => ActiveQuery::None,
        };
        Self {
            view: View::Movies,
            query,
            working_set: Vec::new(),
            criteria: FilterCriteria::default(),
            generation: 0,
            pending: None,
            detail: None,
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn query(&self) -> &ActiveQuery {
        &self.query
    }

    pub fn criteria(&self) -> FilterCriteria {
        self.criteria
    }

    pub fn working_set(&self) -> &[MovieSummary] {
        &self.working_set
    }

    pub fn detail(&self) -> Option<&MovieId> {
        self.detail.as_ref()
    }

    pub fn is_detail_open(&self) -> bool {
        self.detail.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn active_mood(&self) -> Option<Mood> {
        match self.query {
            ActiveQuery::Mood(mood) => Some(mood),
            _ => None,
        }
    }

    /// Mood becomes the active query; any search text is dropped.
    pub fn select_mood(&mut self, mood: Mood) -> RequestTicket {
        self.query = ActiveQuery::Mood(mood);
        self.view = View::Movies;
        self.begin_request()
    }

    /// Search becomes the active query; any mood selection is dropped.
    pub fn submit_search(&mut self, text: impl Into<String>) -> RequestTicket {
        self.query = ActiveQuery::Search(text.into());
        self.view = View::Movies;
        self.begin_request()
    }

    /// Issue a ticket for a request that does not change the active query
    /// (random pick, details).
    pub fn begin_request(&mut self) -> RequestTicket {
        self.generation += 1;
        self.pending = Some(self.generation);
        RequestTicket(self.generation)
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.generation
    }

    /// Replace the working set if `ticket` is still the newest request.
    /// Returns false (and changes nothing) for a stale response.
    pub fn complete_query(&mut self, ticket: RequestTicket, movies: Vec<MovieSummary>) -> bool {
        if !self.is_current(ticket) {
            debug!(
                stale = ticket.0,
                current = self.generation,
                "Ignoring stale query response"
            );
            return false;
        }
        self.working_set = movies;
        self.pending = None;
        true
    }

    /// End a request without touching the working set.
    pub fn finish_request(&mut self, ticket: RequestTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.pending = None;
        true
    }

    /// Back to no active query with an empty working set. Outstanding
    /// requests become stale.
    pub fn clear_search(&mut self) {
        self.query = ActiveQuery::None;
        self.working_set.clear();
        self.generation += 1;
        self.pending = None;
    }

    pub fn switch_view(&mut self, view: View) {
        self.view = view;
    }

    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
    }

    pub fn open_detail(&mut self, id: MovieId) {
        self.detail = Some(id);
    }

    /// Returns whether a detail was open.
    pub fn close_detail(&mut self) -> bool {
        self.detail.take().is_some()
    }

    pub fn visible_movies(&self) -> Vec<MovieSummary> {
        filter_movies(&self.working_set, &self.criteria)
    }
}

/// What the front-end should draw. Produced by the controller; rendering it
/// is the caller's job.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "lowercase")]
pub enum Screen {
    Movies {
        query: ActiveQuery,
        criteria: FilterCriteria,
        movies: Vec<MovieSummary>,
        /// Size of the unfiltered working set.
        total: usize,
    },
    Watchlist {
        movies: Vec<MovieSummary>,
        capacity: usize,
    },
}

impl Screen {
    pub fn movies(&self) -> &[MovieSummary] {
        match self {
            Screen::Movies { movies, .. } | Screen::Watchlist { movies, .. } => movies,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.movies().is_empty()
    }

    pub fn view(&self) -> View {
        match self {
            Screen::Movies { .. } => View::Movies,
            Screen::Watchlist { .. } => View::Watchlist,
        }
    }

    /// Empty-state text for this screen.
    pub fn empty_message(&self) -> &'static str {
        match self {
            Screen::Movies { query: ActiveQuery::None, total: 0, .. } => IDLE_MESSAGE,
            Screen::Movies { .. } => EMPTY_RESULTS_MESSAGE,
            Screen::Watchlist { .. } => EMPTY_WATCHLIST_MESSAGE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movies(ids: &[u64]) -> Vec<MovieSummary> {
        ids.iter()
            .map(|&id| MovieSummary::new(id, format!("Movie {}", id)))
            .collect()
    }

    #[test]
    fn test_initial_state() {
        let state = AppState::new(None);
        assert_eq!(state.view(), View::Movies);
        assert_eq!(state.query(), &ActiveQuery::None);
        assert!(!state.is_loading());

        let state = AppState::new(Some("Happy"));
        assert_eq!(state.active_mood(), Some(Mood::Happy));

        let state = AppState::new(Some("grumpy"));
        assert_eq!(state.query(), &ActiveQuery::None);
    }

    #[test]
    fn test_mood_and_search_are_exclusive() {
        let mut state = AppState::new(None);
        state.select_mood(Mood::Sad);
        assert_eq!(state.active_mood(), Some(Mood::Sad));

        state.submit_search("batman");
        assert_eq!(state.query(), &ActiveQuery::Search("batman".to_string()));
        assert_eq!(state.active_mood(), None);

        state.select_mood(Mood::Excited);
        assert_eq!(state.query(), &ActiveQuery::Mood(Mood::Excited));
    }

    #[test]
    fn test_stale_response_is_ignored() {
        let mut state = AppState::new(None);
        let first = state.select_mood(Mood::Happy);
        let second = state.submit_search("heat");
        assert!(state.is_loading());

        // Newer response lands first, older one afterwards
        assert!(state.complete_query(second, movies(&[2])));
        assert!(!state.complete_query(first, movies(&[1])));

        assert_eq!(state.working_set(), movies(&[2]).as_slice());
        assert!(!state.is_loading());
    }

    #[test]
    fn test_clear_search_invalidates_pending() {
        let mut state = AppState::new(None);
        let ticket = state.submit_search("alien");
        state.clear_search();

        assert!(!state.complete_query(ticket, movies(&[1, 2])));
        assert_eq!(state.query(), &ActiveQuery::None);
        assert!(state.working_set().is_empty());
    }

    #[test]
    fn test_filters_never_touch_working_set() {
        let mut state = AppState::new(None);
        let ticket = state.select_mood(Mood::Happy);
        let mut set = movies(&[1, 2]);
        set[0].vote_average = Some(8.0);
        state.complete_query(ticket, set.clone());

        state.set_criteria(FilterCriteria::min_rating(7.0));
        assert_eq!(state.visible_movies().len(), 1);
        state.set_criteria(FilterCriteria::default());
        assert_eq!(state.visible_movies(), set);
        assert_eq!(state.working_set(), set.as_slice());
    }

    #[test]
    fn test_detail_open_close() {
        let mut state = AppState::new(None);
        assert!(!state.close_detail());
        state.open_detail(MovieId::Numeric(27205));
        assert!(state.is_detail_open());
        assert!(state.close_detail());
        assert!(!state.is_detail_open());
    }

    #[test]
    fn test_screen_empty_messages() {
        let idle = Screen::Movies {
            query: ActiveQuery::None,
            criteria: FilterCriteria::default(),
            movies: Vec::new(),
            total: 0,
        };
        assert_eq!(idle.empty_message(), IDLE_MESSAGE);

        let filtered_out = Screen::Movies {
            query: ActiveQuery::Mood(Mood::Happy),
            criteria: FilterCriteria::min_rating(9.9),
            movies: Vec::new(),
            total: 20,
        };
        assert_eq!(filtered_out.empty_message(), EMPTY_RESULTS_MESSAGE);

        let watchlist = Screen::Watchlist { movies: Vec::new(), capacity: 50 };
        assert!(watchlist.is_empty());
        assert_eq!(watchlist.empty_message(), EMPTY_WATCHLIST_MESSAGE);
    }
}
