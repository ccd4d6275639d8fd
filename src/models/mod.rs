pub mod platform;
pub mod query;
pub mod record;

pub use platform::Platform;
pub use query::{QueryError, SearchDomain, SearchQuery};
pub use record::{DishDetail, GroceryProduct, NutritionInfo, Record, RecordCard, RestaurantData};
