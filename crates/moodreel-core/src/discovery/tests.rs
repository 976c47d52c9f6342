use super::*;
use crate::notification::NotificationKind;
use crate::state::{ActiveQuery, EMPTY_WATCHLIST_MESSAGE};
use crate::store::MemoryStore;
use crate::watchlist::DEFAULT_CAPACITY;
use async_trait::async_trait;
use moodreel_sources::{DiscoverQuery, PopularPage, SearchQuery, SourceError};
use std::sync::Mutex;

/// In-process catalog that records every call it receives.
#[derive(Default)]
struct FakeCatalog {
    calls: Mutex<Vec<String>>,
    listing: Vec<MovieSummary>,
    fail_status: Option<u16>,
}

impl FakeCatalog {
    fn with_movies(movies: Vec<MovieSummary>) -> Self {
        Self { listing: movies, ..Self::default() }
    }

    fn failing(status: u16) -> Self {
        Self { fail_status: Some(status), ..Self::default() }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> Result<(), SourceError> {
        self.calls.lock().unwrap().push(call);
        match self.fail_status {
            Some(status) => Err(SourceError::Status {
                service: "TMDb",
                status,
                message: "Invalid API key".to_string(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl MovieCatalog for FakeCatalog {
    fn catalog_name(&self) -> &str {
        "fake"
    }

    fn image_base_url(&self) -> &str {
        "https://image.tmdb.org/t/p"
    }

    async fn discover(&self, query: &DiscoverQuery) -> Result<Vec<MovieSummary>, SourceError> {
        self.record(format!("discover:{}", query.genre_param()))?;
        Ok(self.listing.clone())
    }

    async fn popular(&self, page: PopularPage) -> Result<Vec<MovieSummary>, SourceError> {
        self.record(format!("popular:{}", page.page))?;
        Ok(self.listing.clone())
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<MovieSummary>, SourceError> {
        self.record(format!("search:{}", query.text))?;
        Ok(self.listing.clone())
    }

    async fn details(&self, id: &MovieId) -> Result<MovieDetails, SourceError> {
        self.record(format!("details:{}", id))?;
        Ok(MovieDetails {
            id: id.clone(),
            title: format!("Movie {}", id),
            overview: None,
            poster_path: Some("/poster.jpg".to_string()),
            backdrop_path: None,
            release_date: Some("2014-11-05".to_string()),
            vote_average: Some(8.6),
            runtime: Some(169),
            genres: Vec::new(),
            videos: None,
            credits: None,
        })
    }
}

struct FakeKeywords {
    movies: Vec<MovieSummary>,
    keywords: Mutex<Vec<String>>,
}

#[async_trait]
impl KeywordCatalog for FakeKeywords {
    fn catalog_name(&self) -> &str {
        "fake-keywords"
    }

    async fn search_keyword(&self, keyword: &str) -> Result<Vec<MovieSummary>, SourceError> {
        self.keywords.lock().unwrap().push(keyword.to_string());
        Ok(self.movies.clone())
    }
}

fn sample_movies() -> Vec<MovieSummary> {
    vec![
        MovieSummary::new(1u64, "Inception").with_release_date("2010-07-15").with_rating(8.4),
        MovieSummary::new(2u64, "Paddington").with_release_date("2014-11-28").with_rating(7.3),
        MovieSummary::new(3u64, "Undated").with_rating(9.1),
    ]
}

fn discovery(catalog: Arc<FakeCatalog>) -> Discovery<MemoryStore> {
    let watchlist = WatchlistStore::load(MemoryStore::new(), "watchlist", DEFAULT_CAPACITY);
    Discovery::new(catalog, watchlist, QueryBuilder::default(), None)
}

#[tokio::test]
async fn test_mood_query_fills_working_set() {
    let catalog = Arc::new(FakeCatalog::with_movies(sample_movies()));
    let mut app = discovery(catalog.clone());

    let screen = app.select_mood("happy").await.unwrap();
    assert_eq!(screen.movies().len(), 3);
    assert_eq!(catalog.calls(), vec!["discover:35,10751,16"]);
    assert_eq!(app.state().query(), &ActiveQuery::Mood(Mood::Happy));
    assert!(!app.state().is_loading());
}

#[tokio::test]
async fn test_unknown_mood_issues_no_request() {
    let catalog = Arc::new(FakeCatalog::with_movies(sample_movies()));
    let mut app = discovery(catalog.clone());

    let err = app.select_mood("grumpy").await.unwrap_err();
    assert!(matches!(err, DiscoveryError::UnknownMood(_)));
    assert!(catalog.calls().is_empty());
}

#[tokio::test]
async fn test_short_search_issues_no_request() {
    let catalog = Arc::new(FakeCatalog::with_movies(sample_movies()));
    let mut app = discovery(catalog.clone());

    let err = app.search("a").await.unwrap_err();
    assert!(matches!(err, DiscoveryError::Validation(_)));
    assert!(catalog.calls().is_empty());

    app.search("batman").await.unwrap();
    assert_eq!(catalog.calls(), vec!["search:batman"]);
    assert_eq!(app.state().query(), &ActiveQuery::Search("batman".to_string()));
}

#[tokio::test]
async fn test_empty_watchlist_view_issues_no_request() {
    let catalog = Arc::new(FakeCatalog::with_movies(sample_movies()));
    let mut app = discovery(catalog.clone());

    let screen = app.switch_view(View::Watchlist);
    assert!(screen.is_empty());
    assert_eq!(screen.empty_message(), EMPTY_WATCHLIST_MESSAGE);
    assert!(catalog.calls().is_empty());
}

#[test]
fn test_watchlist_repairs_are_reported_once() {
    let raw = r#"[{"id": 1, "title": "One"}, {"id": 1, "title": "Dup"}, "junk"]"#;
    let watchlist = WatchlistStore::load(MemoryStore::with_value("watchlist", raw), "watchlist", DEFAULT_CAPACITY);
    let mut app = Discovery::new(Arc::new(FakeCatalog::default()), watchlist, QueryBuilder::default(), None);

    let notifications = app.drain_notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, NotificationKind::Warning);
    assert!(notifications[0].message.contains("Removed 2"));
    assert_eq!(app.watchlist().count(), 1);

    let corrupted = WatchlistStore::load(MemoryStore::with_value("watchlist", "{}"), "watchlist", DEFAULT_CAPACITY);
    let mut app = Discovery::new(Arc::new(FakeCatalog::default()), corrupted, QueryBuilder::default(), None);
    let kinds: Vec<_> = app.drain_notifications().into_iter().map(|n| n.kind).collect();
    assert_eq!(kinds, vec![NotificationKind::Warning]);

    let mut clean = discovery(Arc::new(FakeCatalog::default()));
    assert!(clean.drain_notifications().is_empty());
}

#[tokio::test]
async fn test_toggle_twice_notifies_added_then_removed() {
    let catalog = Arc::new(FakeCatalog::default());
    let mut app = discovery(catalog);
    let movie = MovieSummary::new(27205u64, "Inception");

    assert_eq!(app.toggle_watchlist(&movie).unwrap(), ToggleOutcome::Added);
    assert_eq!(app.toggle_watchlist(&movie).unwrap(), ToggleOutcome::Removed);
    assert_eq!(app.watchlist().count(), 0);

    let kinds: Vec<_> = app.drain_notifications().into_iter().map(|n| n.kind).collect();
    assert_eq!(kinds, vec![NotificationKind::Success, NotificationKind::Info]);
    assert!(app.drain_notifications().is_empty());
}

#[tokio::test]
async fn test_failed_toggle_has_no_notification() {
    let catalog = Arc::new(FakeCatalog::default());
    let mut app = discovery(catalog);
    let mut movie = MovieSummary::new(1u64, "No id");
    movie.id = None;

    assert!(app.toggle_watchlist(&movie).is_err());
    assert!(app.drain_notifications().is_empty());
}

#[tokio::test]
async fn test_filters_reapply_without_request() {
    let catalog = Arc::new(FakeCatalog::with_movies(sample_movies()));
    let mut app = discovery(catalog.clone());
    app.select_mood("excited").await.unwrap();

    let screen = app.apply_filters(FilterCriteria::year("2010-2015".parse().unwrap()));
    assert_eq!(screen.movies().len(), 2);

    let screen = app.apply_filters(FilterCriteria::min_rating(8.0));
    let titles: Vec<_> = screen.movies().iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, vec!["Inception", "Undated"]);

    assert_eq!(app.state().working_set().len(), 3);
    assert_eq!(catalog.calls().len(), 1);
}

#[tokio::test]
async fn test_watchlist_view_ignores_filters() {
    let catalog = Arc::new(FakeCatalog::with_movies(sample_movies()));
    let mut app = discovery(catalog);
    app.toggle_watchlist(&sample_movies()[2]).unwrap();
    app.apply_filters(FilterCriteria::year("1999".parse().unwrap()));

    let screen = app.switch_view(View::Watchlist);
    assert_eq!(screen.movies().len(), 1);

    let screen = app.switch_view(View::Movies);
    assert!(screen.is_empty());
}

#[tokio::test]
async fn test_clear_search() {
    let catalog = Arc::new(FakeCatalog::with_movies(sample_movies()));
    let mut app = discovery(catalog);
    app.search("inception").await.unwrap();

    let screen = app.clear_search();
    assert!(screen.is_empty());
    assert_eq!(app.state().query(), &ActiveQuery::None);
}

#[tokio::test]
async fn test_network_error_keeps_previous_results() {
    let catalog = Arc::new(FakeCatalog::failing(401));
    let mut app = discovery(catalog);

    let err = app.select_mood("sad").await.unwrap_err();
    assert!(matches!(err, DiscoveryError::Network { status: 401, .. }));
    assert!(!app.state().is_loading());

    app.report(&err);
    let notes = app.drain_notifications();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].kind, NotificationKind::Error);
}

#[tokio::test]
async fn test_mood_failure_uses_keyword_fallback() {
    let catalog = Arc::new(FakeCatalog::failing(500));
    let keywords = Arc::new(FakeKeywords {
        movies: vec![MovieSummary::new("tt0080339", "Airplane!").with_release_date("1980")],
        keywords: Mutex::new(Vec::new()),
    });
    let mut app = discovery(catalog)
        .with_fallback(Some(keywords.clone() as Arc<dyn KeywordCatalog>));

    let screen = app.select_mood("happy").await.unwrap();
    assert_eq!(screen.movies()[0].title, "Airplane!");
    assert_eq!(*keywords.keywords.lock().unwrap(), vec!["comedy".to_string()]);

    // Original failure is still surfaced
    let kinds: Vec<_> = app.drain_notifications().into_iter().map(|n| n.kind).collect();
    assert_eq!(kinds, vec![NotificationKind::Error, NotificationKind::Info]);
}

#[tokio::test]
async fn test_random_pick_opens_details() {
    let catalog = Arc::new(FakeCatalog::with_movies(vec![MovieSummary::new(157336u64, "Interstellar")]));
    let mut app = discovery(catalog.clone());

    let details = app.random_pick().await.unwrap();
    assert_eq!(details.id, MovieId::Numeric(157336));
    assert_eq!(app.state().detail(), Some(&MovieId::Numeric(157336)));
    assert!(app.state().working_set().is_empty());

    let calls = catalog.calls();
    assert_eq!(calls.len(), 2);
    assert!(calls[0].starts_with("popular:"));
    assert_eq!(calls[1], "details:157336");

    assert!(app.close_details());
    assert!(!app.close_details());
}

#[tokio::test]
async fn test_random_pick_on_empty_page() {
    let catalog = Arc::new(FakeCatalog::default());
    let mut app = discovery(catalog.clone());

    let err = app.random_pick().await.unwrap_err();
    assert!(matches!(err, DiscoveryError::EmptyResult));
    assert_eq!(catalog.calls().len(), 1);
    assert!(!app.state().is_loading());
}

#[tokio::test]
async fn test_toggle_by_id_resolves_unknown_movie() {
    let catalog = Arc::new(FakeCatalog::with_movies(sample_movies()));
    let mut app = discovery(catalog.clone());
    app.select_mood("happy").await.unwrap();

    // Known from the working set: no extra request
    app.toggle_by_id(&MovieId::Numeric(2)).await.unwrap();
    assert_eq!(catalog.calls().len(), 1);

    // Unknown: resolved through details
    app.toggle_by_id(&MovieId::Numeric(99)).await.unwrap();
    assert_eq!(catalog.calls().last().map(String::as_str), Some("details:99"));
    assert!(app.is_in_watchlist(&MovieId::Numeric(99)));

    // Saved: removed without a request
    app.toggle_by_id(&MovieId::Numeric(99)).await.unwrap();
    assert_eq!(catalog.calls().len(), 2);
}

#[tokio::test]
async fn test_startup_mood_loads_on_start() {
    let catalog = Arc::new(FakeCatalog::with_movies(sample_movies()));
    let watchlist = WatchlistStore::load(MemoryStore::new(), "watchlist", DEFAULT_CAPACITY);
    let mut app = Discovery::new(catalog.clone(), watchlist, QueryBuilder::default(), Some("mysterious"));

    app.start().await.unwrap();
    assert_eq!(catalog.calls(), vec!["discover:9648,53,80"]);

    let catalog = Arc::new(FakeCatalog::default());
    let watchlist = WatchlistStore::load(MemoryStore::new(), "watchlist", DEFAULT_CAPACITY);
    let mut app = Discovery::new(catalog.clone(), watchlist, QueryBuilder::default(), Some("nope"));
    app.start().await.unwrap();
    assert!(catalog.calls().is_empty());
}
