//! Turns loosely shaped upstream payloads into [`Record`]s.
//!
//! The search backend has shipped three response envelopes over time and
//! its items mix snake_case, camelCase and string-typed numbers.

use serde_json::{Map, Value};

use crate::constants::defaults;
use crate::models::record::{placeholder_image, stable_id};
use crate::models::{
    DishDetail, GroceryProduct, NutritionInfo, Platform, Record, RestaurantData, SearchDomain,
};
use crate::parser::text::parse_amount;

/// The envelopes the backend is known to return.
#[derive(Debug, PartialEq)]
pub enum ResponseShape {
    Bare(Vec<Value>),
    Results(Vec<Value>),
    Products(Vec<Value>),
}

impl ResponseShape {
    /// `None` when the body is none of the known envelopes.
    #[must_use]
    pub fn classify(body: Value) -> Option<Self> {
        match body {
            Value::Array(items) => Some(Self::Bare(items)),
            Value::Object(mut map) => match map.remove("results") {
                Some(Value::Array(items)) => Some(Self::Results(items)),
                _ => match map.remove("products") {
                    Some(Value::Array(items)) => Some(Self::Products(items)),
                    _ => None,
                },
            },
            _ => None,
        }
    }

    #[must_use]
    pub fn into_items(self) -> Vec<Value> {
        match self {
            Self::Bare(items) | Self::Results(items) | Self::Products(items) => items,
        }
    }
}

/// Normalizes every object item. Non-object items are skipped.
#[must_use]
pub fn records(domain: SearchDomain, query: &str, items: &[Value]) -> Vec<Record> {
    items
        .iter()
        .filter_map(Value::as_object)
        .map(|item| match domain {
            SearchDomain::Grocery => Record::Grocery(grocery(query, item)),
            SearchDomain::Restaurant => Record::Restaurant(restaurant(query, item)),
        })
        .collect()
}

fn grocery(query: &str, item: &Map<String, Value>) -> GroceryProduct {
    let name = string(item, &["name", "product", "title"])
        .unwrap_or_else(|| defaults::UNKNOWN_PRODUCT.to_string());
    let source = platform(item);
    let price = number(item, &["price"]);

    GroceryProduct {
        id: string(item, &["_id", "id"]).unwrap_or_else(|| stable_id(&name, source)),
        image_url: Some(
            string(item, &["image_url", "imageUrl", "image"])
                .unwrap_or_else(|| placeholder_image(&[query, name.as_str()])),
        ),
        sale_price: number(item, &["sale_price", "salePrice"]).or(price),
        market_price: number(item, &["market_price", "marketPrice", "mrp"]).or(price),
        price,
        brand: string(item, &["brand"]),
        category: string(item, &["category"]),
        description: string(item, &["description"]),
        redirect: string(item, &["redirect", "url", "link"]),
        nutritional_info: item
            .get("nutritional_info")
            .or_else(|| item.get("nutritionalInfo"))
            .and_then(|v| serde_json::from_value::<NutritionInfo>(v.clone()).ok()),
        offers: strings(item, &["offers"]),
        rating: Some(number(item, &["rating"]).unwrap_or(defaults::RATING)),
        reviews_count: number(item, &["reviews_count", "reviewsCount"])
            .filter(|n| *n >= 0.0)
            .map(|n| n as u32),
        in_stock: Some(boolean(item, &["in_stock", "inStock"]).unwrap_or(true)),
        delivery_time: string(item, &["delivery_time", "deliveryTime"]),
        name,
        source,
    }
}

fn restaurant(query: &str, item: &Map<String, Value>) -> RestaurantData {
    let name = string(item, &["name", "restaurant"])
        .unwrap_or_else(|| defaults::UNKNOWN_RESTAURANT.to_string());

    RestaurantData {
        source: platform(item),
        rating: Some(number(item, &["rating"]).unwrap_or(defaults::RATING)),
        delivery_time: string(item, &["delivery_time", "deliveryTime"]),
        price_range: string(item, &["price_range", "priceRange"]),
        cuisine: string(item, &["cuisine"]),
        address: string(item, &["address", "location"]),
        popular_dishes: strings(item, &["popular_dishes", "popularDishes"]),
        image_url: Some(
            string(item, &["image_url", "imageUrl", "image"])
                .unwrap_or_else(|| placeholder_image(&[query, name.as_str()])),
        ),
        redirect: string(item, &["redirect", "url", "link"]),
        dish_details: item
            .get("dish_details")
            .or_else(|| item.get("dishDetails"))
            .and_then(|v| serde_json::from_value::<Vec<DishDetail>>(v.clone()).ok())
            .unwrap_or_default(),
        restaurant: name,
    }
}

fn platform(item: &Map<String, Value>) -> Platform {
    string(item, &["source", "platform"]).map_or(Platform::Other, |s| Platform::from_label(&s))
}

fn string(item: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| match item.get(*k)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn number(item: &Map<String, Value>, keys: &[&str]) -> Option<f64> {
    keys.iter().find_map(|k| match item.get(*k)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_amount(s),
        _ => None,
    })
}

fn boolean(item: &Map<String, Value>, keys: &[&str]) -> Option<bool> {
    keys.iter().find_map(|k| match item.get(*k)? {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.to_lowercase().as_str() {
            "true" | "yes" | "in stock" => Some(true),
            "false" | "no" | "out of stock" => Some(false),
            _ => None,
        },
        _ => None,
    })
}

fn strings(item: &Map<String, Value>, keys: &[&str]) -> Vec<String> {
    keys.iter()
        .find_map(|k| item.get(*k)?.as_array())
        .map(|values| {
            values
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_shapes() {
        assert!(matches!(
            ResponseShape::classify(json!([{}])),
            Some(ResponseShape::Bare(_))
        ));
        assert!(matches!(
            ResponseShape::classify(json!({"results": []})),
            Some(ResponseShape::Results(_))
        ));
        assert!(matches!(
            ResponseShape::classify(json!({"products": [{}]})),
            Some(ResponseShape::Products(_))
        ));
        assert_eq!(ResponseShape::classify(json!({"items": []})), None);
        assert_eq!(ResponseShape::classify(json!({"results": "nope"})), None);
        assert_eq!(ResponseShape::classify(json!("text")), None);
    }

    #[test]
    fn test_grocery_defaults() {
        let items = vec![json!({"price": "₹120"})];
        let records = records(SearchDomain::Grocery, "milk", &items);

        let Record::Grocery(p) = &records[0] else {
            panic!("expected grocery record");
        };
        assert_eq!(p.name, "Unknown Product");
        assert_eq!(p.id, "unknown-product-other");
        assert_eq!(p.price, Some(120.0));
        assert_eq!(p.sale_price, Some(120.0));
        assert_eq!(p.market_price, Some(120.0));
        assert_eq!(p.rating, Some(4.0));
        assert_eq!(p.in_stock, Some(true));
        assert_eq!(
            p.image_url.as_deref(),
            Some("https://source.unsplash.com/random/300x300/?milk,unknown%20product")
        );
    }

    #[test]
    fn test_grocery_field_aliases() {
        let items = vec![json!({
            "_id": "abc",
            "product": "Amul Taaza",
            "platform": "Swiggy Instamart",
            "salePrice": 27,
            "marketPrice": "30",
            "price": 28,
            "inStock": false,
            "imageUrl": "https://img/x.png",
            "offers": ["10% off", 5]
        })];
        let records = records(SearchDomain::Grocery, "milk", &items);

        let Record::Grocery(p) = &records[0] else {
            panic!("expected grocery record");
        };
        assert_eq!(p.id, "abc");
        assert_eq!(p.name, "Amul Taaza");
        assert_eq!(p.source, Platform::Instamart);
        assert_eq!(p.sale_price, Some(27.0));
        assert_eq!(p.market_price, Some(30.0));
        assert_eq!(p.in_stock, Some(false));
        assert_eq!(p.image_url.as_deref(), Some("https://img/x.png"));
        assert_eq!(p.offers, vec!["10% off".to_string()]);
    }

    #[test]
    fn test_restaurant_name_fallbacks() {
        let items = vec![
            json!({"restaurant": "Paradise Biryani", "source": "Swiggy"}),
            json!({"name": "Bawarchi", "restaurant": "ignored"}),
            json!({"rating": "4.6"}),
            json!(42),
        ];
        let records = records(SearchDomain::Restaurant, "biryani", &items);

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].name(), "Paradise Biryani");
        assert_eq!(records[0].source(), Platform::Swiggy);
        assert_eq!(records[1].name(), "Bawarchi");
        assert_eq!(records[2].name(), "Unknown Restaurant");

        let Record::Restaurant(r) = &records[2] else {
            panic!("expected restaurant record");
        };
        assert_eq!(r.rating, Some(4.6));
    }
}
