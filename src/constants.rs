pub mod cache {
    use std::time::Duration;

    /// Lifetime of a persisted search result before it counts as a miss.
    pub const SEARCH_TTL: Duration = Duration::from_secs(60 * 60);
}

pub mod collections {

    pub const GROCERY_SEARCHES: &str = "grocery_searches";

    pub const RESTAURANT_SEARCHES: &str = "restaurant_searches";
}

pub mod favorites {

    pub const GROCERY_FIELD: &str = "favorite_grocery_products";

    pub const RESTAURANT_FIELD: &str = "favorite_restaurants";
}

pub mod intervals {
    use std::time::Duration;

    pub const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

    pub const STATUS_TIMEOUT: Duration = Duration::from_secs(5);
}

pub mod ranking {

    /// Price substituted for unpriced records so priced ones sort first.
    pub const UNPRICED_SENTINEL: f64 = 999.0;
}

pub mod defaults {

    pub const RATING: f64 = 4.0;

    pub const SYNTHETIC_COUNT: usize = 8;

    pub const PLACEHOLDER_IMAGE_BASE: &str = "https://source.unsplash.com/random/300x300/";

    pub const UNKNOWN_PRODUCT: &str = "Unknown Product";

    pub const UNKNOWN_RESTAURANT: &str = "Unknown Restaurant";
}
