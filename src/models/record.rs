use serde::{Deserialize, Serialize};

use crate::constants::defaults;
use crate::models::platform::Platform;
use crate::parser::text::slugify;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct NutritionInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbs: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fiber: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sugar: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GroceryProduct {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub source: Platform,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub sale_price: Option<f64>,
    pub market_price: Option<f64>,
    pub image_url: Option<String>,
    pub redirect: Option<String>,
    pub nutritional_info: Option<NutritionInfo>,
    pub offers: Vec<String>,
    pub rating: Option<f64>,
    pub reviews_count: Option<u32>,
    pub in_stock: Option<bool>,
    pub delivery_time: Option<String>,
}

impl GroceryProduct {
    /// Bare product with a stable identity derived from name and source.
    #[must_use]
    pub fn new(name: impl Into<String>, source: Platform) -> Self {
        let name = name.into();
        Self {
            id: stable_id(&name, source),
            name,
            source,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DishDetail {
    pub name: String,
    pub price: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub rating: Option<f64>,
    pub is_veg: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RestaurantData {
    pub restaurant: String,
    pub source: Platform,
    pub rating: Option<f64>,
    pub delivery_time: Option<String>,
    pub price_range: Option<String>,
    pub cuisine: Option<String>,
    pub address: Option<String>,
    pub popular_dishes: Vec<String>,
    pub image_url: Option<String>,
    pub redirect: Option<String>,
    pub dish_details: Vec<DishDetail>,
}

impl RestaurantData {
    #[must_use]
    pub fn new(restaurant: impl Into<String>, source: Platform) -> Self {
        Self {
            restaurant: restaurant.into(),
            source,
            ..Default::default()
        }
    }
}

/// Canonical search result.
///
/// Tagged on `_collection` so cached and stored payloads round-trip without
/// guessing which variant a JSON object belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "_collection", rename_all = "lowercase")]
pub enum Record {
    Grocery(GroceryProduct),
    Restaurant(RestaurantData),
}

impl Record {
    /// Dedup key. Not unique across sources.
    #[must_use]
    pub fn identity(&self) -> &str {
        match self {
            Self::Grocery(p) => &p.id,
            Self::Restaurant(r) => &r.restaurant,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Grocery(p) => &p.name,
            Self::Restaurant(r) => &r.restaurant,
        }
    }

    #[must_use]
    pub const fn source(&self) -> Platform {
        match self {
            Self::Grocery(p) => p.source,
            Self::Restaurant(r) => r.source,
        }
    }

    /// Numeric price used for ranking. Restaurants only carry a price band.
    #[must_use]
    pub const fn price(&self) -> Option<f64> {
        match self {
            Self::Grocery(p) => p.price,
            Self::Restaurant(_) => None,
        }
    }

    /// Resolves every optional field to something displayable.
    #[must_use]
    pub fn card(&self) -> RecordCard {
        match self {
            Self::Grocery(p) => {
                let effective = p.sale_price.or(p.price).filter(|v| *v > 0.0);
                let original = p
                    .market_price
                    .or(p.price)
                    .filter(|m| effective.is_some_and(|e| *m > e));

                RecordCard {
                    identity: p.id.clone(),
                    title: p.name.clone(),
                    subtitle: [p.brand.as_deref(), p.category.as_deref()]
                        .into_iter()
                        .flatten()
                        .filter(|s| !s.is_empty())
                        .collect::<Vec<_>>()
                        .join(" · "),
                    source: p.source,
                    image_url: non_empty(p.image_url.as_deref())
                        .map_or_else(|| placeholder_image(&[p.name.as_str(), "grocery"]), str::to_string),
                    price_label: effective
                        .map_or_else(|| "Price unavailable".to_string(), format_rupees),
                    original_price_label: original.map(format_rupees),
                    rating: p.rating.unwrap_or(defaults::RATING),
                    offers: p.offers.clone(),
                    in_stock: p.in_stock.unwrap_or(true),
                    delivery_time: p.delivery_time.clone().unwrap_or_default(),
                }
            }
            Self::Restaurant(r) => RecordCard {
                identity: r.restaurant.clone(),
                title: r.restaurant.clone(),
                subtitle: format!(
                    "{} · {}",
                    non_empty(r.cuisine.as_deref()).unwrap_or("Various"),
                    non_empty(r.address.as_deref()).unwrap_or("Location not available")
                ),
                source: r.source,
                image_url: non_empty(r.image_url.as_deref()).map_or_else(
                    || placeholder_image(&["restaurant", r.restaurant.as_str()]),
                    str::to_string,
                ),
                price_label: non_empty(r.price_range.as_deref())
                    .unwrap_or("₹₹")
                    .to_string(),
                original_price_label: None,
                rating: r.rating.unwrap_or(defaults::RATING),
                offers: r.popular_dishes.clone(),
                in_stock: true,
                delivery_time: non_empty(r.delivery_time.as_deref())
                    .unwrap_or("30-40 min")
                    .to_string(),
            },
        }
    }
}

/// Display-ready projection of a [`Record`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordCard {
    pub identity: String,
    pub title: String,
    pub subtitle: String,
    pub source: Platform,
    pub image_url: String,
    pub price_label: String,
    pub original_price_label: Option<String>,
    pub rating: f64,
    pub offers: Vec<String>,
    pub in_stock: bool,
    pub delivery_time: String,
}

/// Deterministic placeholder image keyed on search terms.
#[must_use]
pub fn placeholder_image(terms: &[&str]) -> String {
    let joined = terms
        .iter()
        .filter(|t| !t.trim().is_empty())
        .map(|t| urlencoding::encode(&t.trim().to_lowercase()).into_owned())
        .collect::<Vec<_>>()
        .join(",");
    format!("{}?{joined}", defaults::PLACEHOLDER_IMAGE_BASE)
}

#[must_use]
pub fn stable_id(name: &str, source: Platform) -> String {
    format!("{}-{}", slugify(name), slugify(source.as_str()))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn format_rupees(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("₹{amount:.0}")
    } else {
        format!("₹{amount:.2}")
    }
}
