mod favorites;
mod popular;
mod search;
mod status;

pub use favorites::{cmd_favorites_add, cmd_favorites_list, cmd_favorites_remove};
pub use popular::cmd_popular;
pub use search::cmd_search;
pub use status::cmd_status;
