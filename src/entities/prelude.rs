pub use super::cache_entries::Entity as CacheEntries;
pub use super::query_documents::Entity as QueryDocuments;
pub use super::user_favorites::Entity as UserFavorites;
