//! Plausible placeholder records for when every real source is down.
//!
//! Output depends only on the query, the template tables below and the PRNG
//! state, so a seeded generator reproduces the same records.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Mutex, PoisonError};

use crate::models::record::{placeholder_image, stable_id};
use crate::models::{
    GroceryProduct, NutritionInfo, Platform, Record, RestaurantData, SearchDomain, SearchQuery,
};
use crate::parser::text::{capitalize, slugify};

mod templates;

const DEFAULT_CITY: &str = "Hyderabad";

pub struct SyntheticGenerator {
    rng: Mutex<StdRng>,
}

impl SyntheticGenerator {
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Seeds from the wall clock.
    #[must_use]
    pub fn from_clock() -> Self {
        let nanos = chrono::Utc::now()
            .timestamp_nanos_opt()
            .unwrap_or_default()
            .unsigned_abs();
        Self::seeded(nanos)
    }

    /// Returns nothing for `count == 0`, otherwise `max(count, platforms)`
    /// records with every platform of the query's domain represented.
    pub fn generate(&self, query: &SearchQuery, count: usize) -> Vec<Record> {
        if count == 0 {
            return Vec::new();
        }

        let platforms = query.domain().platforms();
        let total = count.max(platforms.len());
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);

        (0..total)
            .map(|i| {
                let platform = platforms[i % platforms.len()];
                match query.domain() {
                    SearchDomain::Grocery => {
                        Record::Grocery(grocery(&mut rng, query.text(), platform, i))
                    }
                    SearchDomain::Restaurant => Record::Restaurant(restaurant(
                        &mut rng,
                        query.text(),
                        query.city().unwrap_or(DEFAULT_CITY),
                        platform,
                        i,
                    )),
                }
            })
            .collect()
    }
}

fn grocery(rng: &mut StdRng, query: &str, platform: Platform, i: usize) -> GroceryProduct {
    let formatted = capitalize(query);
    let category = templates::CATEGORIES[i % templates::CATEGORIES.len()];
    let names = templates::product_names(query, category);
    let name = names[i % names.len()].replace("{Q}", &formatted);
    let brand = templates::BRANDS[i % templates::BRANDS.len()];

    let price = f64::from(rng.random_range(20_u32..=500));
    let sale_price = (price * rng.random_range(0.7..=1.0)).round().max(1.0);
    let market_price = (price * rng.random_range(1.0..=1.3)).round().max(price);
    let product_id: u32 = rng.random_range(1_000_000..=9_999_999);

    let mut offers = Vec::new();
    if sale_price < price {
        let pct = ((price - sale_price) / price * 100.0).round();
        offers.push(format!("{pct}% off"));
    }
    if rng.random_bool(0.3) {
        offers.push("Buy 2 get 1 free".to_string());
    }

    GroceryProduct {
        id: format!("{}-{i}", stable_id(&name, platform)),
        brand: Some(brand.to_string()),
        category: Some(category.to_string()),
        description: Some(format!(
            "High-quality {} product with natural ingredients.",
            query.to_lowercase()
        )),
        price: Some(price),
        sale_price: Some(sale_price),
        market_price: Some(market_price),
        image_url: Some(placeholder_image(&[name.as_str(), "food"])),
        redirect: Some(product_redirect(platform, &name, product_id)),
        nutritional_info: Some(NutritionInfo {
            calories: Some(f64::from(rng.random_range(20_u32..=500))),
            protein: Some(f64::from(rng.random_range(0_u32..=30))),
            carbs: Some(f64::from(rng.random_range(0_u32..=50))),
            fat: Some(f64::from(rng.random_range(0_u32..=20))),
            fiber: Some(f64::from(rng.random_range(0_u32..=10))),
            sugar: None,
        }),
        offers,
        rating: Some(rating(rng)),
        reviews_count: Some(rng.random_range(0..1000)),
        in_stock: Some(rng.random_bool(0.8)),
        delivery_time: Some(format!("{} mins", rng.random_range(8_u32..=30))),
        name,
        source: platform,
    }
}

fn restaurant(
    rng: &mut StdRng,
    query: &str,
    city: &str,
    platform: Platform,
    i: usize,
) -> RestaurantData {
    let formatted = capitalize(query);
    let names = templates::restaurant_names(query, city);
    let name = names[i % names.len()].replace("{Q}", &formatted);
    let cuisine = templates::CUISINES[i % templates::CUISINES.len()];
    let areas = templates::areas(city);
    let area = areas[rng.random_range(0..areas.len())];

    let encoded_query = urlencoding::encode(&query.to_lowercase()).into_owned();
    let redirect = match platform {
        Platform::Swiggy => format!(
            "https://www.swiggy.com/search?query={encoded_query}%20{}",
            urlencoding::encode(&city.to_lowercase())
        ),
        other => other.search_url(&query.to_lowercase()),
    };

    let popular_dishes = templates::dishes(cuisine)
        .map_or_else(
            || {
                templates::GENERIC_DISHES
                    .iter()
                    .map(|d| d.replace("{Q}", &formatted).replace("{C}", cuisine))
                    .collect::<Vec<_>>()
            },
            |dishes| dishes.iter().map(|d| (*d).to_string()).collect(),
        )
        .into_iter()
        .take(3)
        .collect();

    RestaurantData {
        rating: Some(rating(rng)),
        delivery_time: Some(format!("{} mins", rng.random_range(15_u32..=45))),
        price_range: Some(format!("₹{} for two", rng.random_range(100_u32..=400))),
        cuisine: Some(cuisine.to_string()),
        address: Some(format!("{}, {area}, {city}", rng.random_range(1_u32..=100))),
        popular_dishes,
        image_url: Some(placeholder_image(&[name.as_str(), "restaurant"])),
        redirect: Some(redirect),
        dish_details: Vec::new(),
        restaurant: name,
        source: platform,
    }
}

fn rating(rng: &mut StdRng) -> f64 {
    (rng.random_range(3.5_f64..=5.0) * 10.0).round() / 10.0
}

fn product_redirect(platform: Platform, name: &str, product_id: u32) -> String {
    let slug = slugify(name);
    match platform {
        Platform::Blinkit => format!("https://blinkit.com/pn/{slug}/{product_id}"),
        Platform::Zepto => format!("https://www.zeptonow.com/product/{slug}/{product_id}"),
        Platform::BigBasket => format!("https://www.bigbasket.com/pd/{product_id}/{slug}"),
        other => other.search_url(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::defaults;
    use std::collections::HashSet;

    #[test]
    fn test_apple_scenario() {
        let generator = SyntheticGenerator::seeded(7);
        let query = SearchQuery::grocery("apple").unwrap();
        let records = generator.generate(&query, defaults::SYNTHETIC_COUNT);

        let sources: HashSet<_> = records.iter().map(Record::source).collect();
        for platform in Platform::GROCERY {
            assert!(sources.contains(&platform), "missing {platform}");
        }

        for record in &records {
            let Record::Grocery(p) = record else {
                panic!("expected grocery record");
            };
            assert!(p.name.contains("Apple"), "{}", p.name);
            assert!(p.price.unwrap() > 0.0);
            assert!(p.sale_price.unwrap() <= p.price.unwrap());
            assert!(p.price.unwrap() <= p.market_price.unwrap());
            assert!(!p.image_url.as_deref().unwrap().is_empty());
            let rating = p.rating.unwrap();
            assert!((3.5..=5.0).contains(&rating));
        }
    }

    #[test]
    fn test_count_floor_is_platform_count() {
        let generator = SyntheticGenerator::seeded(1);
        let grocery = SearchQuery::grocery("rice").unwrap();
        let restaurant = SearchQuery::restaurant("pizza", Some("Mumbai")).unwrap();

        assert_eq!(generator.generate(&grocery, 1).len(), 4);
        assert_eq!(generator.generate(&grocery, 10).len(), 10);
        assert_eq!(generator.generate(&restaurant, 1).len(), 2);
        assert!(generator.generate(&grocery, 0).is_empty());
    }

    #[test]
    fn test_same_seed_same_output() {
        let query = SearchQuery::grocery("coffee").unwrap();
        let a = SyntheticGenerator::seeded(42).generate(&query, 8);
        let b = SyntheticGenerator::seeded(42).generate(&query, 8);
        let c = SyntheticGenerator::seeded(43).generate(&query, 8);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_restaurant_records() {
        let generator = SyntheticGenerator::seeded(3);
        let query = SearchQuery::restaurant("noodles", Some("Pune")).unwrap();
        let records = generator.generate(&query, 8);

        assert_eq!(records.len(), 8);
        assert_eq!(records[0].source(), Platform::Swiggy);
        assert_eq!(records[1].source(), Platform::Zomato);

        let Record::Restaurant(r) = &records[0] else {
            panic!("expected restaurant record");
        };
        assert!(r.address.as_deref().unwrap().ends_with("Pune"));
        assert!(r.redirect.as_deref().unwrap().contains("noodles%20pune"));
        assert_eq!(r.popular_dishes.len(), 3);
        assert!(
            Record::Restaurant(r.clone())
                .card()
                .title
                .contains("Noodles")
        );
    }

    #[test]
    fn test_restaurant_city_defaults_to_hyderabad() {
        let generator = SyntheticGenerator::seeded(5);
        let query = SearchQuery::restaurant("thali", None).unwrap();

        let Record::Restaurant(r) = &generator.generate(&query, 2)[0] else {
            panic!("expected restaurant record");
        };
        assert_eq!(r.restaurant, "Paradise Biryani");
        assert!(r.address.as_deref().unwrap().ends_with("Hyderabad"));
    }

    #[test]
    fn test_unmatched_grocery_query_uses_defaults() {
        let generator = SyntheticGenerator::seeded(9);
        let query = SearchQuery::grocery("quinoa").unwrap();

        for record in generator.generate(&query, 5) {
            assert!(record.name().contains("Quinoa"));
        }
    }
}
