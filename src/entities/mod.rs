pub mod prelude;

pub mod cache_entries;
pub mod query_documents;
pub mod user_favorites;
