pub mod favorites;
pub use favorites::{FavoritesError, FavoritesService, FavoritesSet, SeaOrmFavoritesService};

pub mod merge;

pub mod search;
pub use search::{ResultOrigin, SearchOutcome, SearchReport, SearchService, StageError};
