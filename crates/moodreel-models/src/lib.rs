pub mod criteria;
pub mod details;
pub mod mood;
pub mod movie;
pub mod movie_id;

pub use criteria::{FilterCriteria, InvalidYearFilter, YearFilter};
pub use details::{CastMember, Credits, Genre, MovieDetails, Video, VideoList};
pub use mood::{Mood, UnknownMood};
pub use movie::{parse_release_year, MovieSummary};
pub use movie_id::MovieId;
