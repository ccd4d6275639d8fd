pub mod normalize;
pub mod search_api;

pub use search_api::{FetchError, SearchApiClient, SearchProvider};
