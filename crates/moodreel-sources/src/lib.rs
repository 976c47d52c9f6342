pub mod error;
pub mod factory;
pub mod omdb;
pub mod request;
pub mod tmdb;
pub mod traits;

pub use error::SourceError;
pub use factory::{create_catalog, create_fallback_catalog};
pub use omdb::OmdbClient;
pub use request::{DiscoverQuery, PopularPage, SearchQuery};
pub use tmdb::TmdbClient;
pub use traits::{KeywordCatalog, MovieCatalog};
