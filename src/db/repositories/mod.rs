pub mod documents;
pub mod favorites;
pub mod kv;
