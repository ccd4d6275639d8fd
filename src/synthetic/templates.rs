//! Label tables. `{Q}` is replaced with the capitalized query and `{C}`
//! with the cuisine.

pub const CATEGORIES: [&str; 5] = ["Fruits", "Vegetables", "Dairy", "Bakery", "Snacks"];

pub const BRANDS: [&str; 10] = [
    "Nature's Best",
    "Organic Valley",
    "Whole Foods",
    "Fresh Farms",
    "Green Earth",
    "Healthy Harvest",
    "Pure Organics",
    "Farm Fresh",
    "Eco Friendly",
    "Natural Choice",
];

pub const CUISINES: [&str; 10] = [
    "North Indian",
    "South Indian",
    "Chinese",
    "Italian",
    "Mexican",
    "Thai",
    "Japanese",
    "Continental",
    "Mediterranean",
    "Lebanese",
];

pub const GENERIC_DISHES: [&str; 5] = [
    "{Q} Special",
    "Chef's Special {Q}",
    "House {Q}",
    "{C} Style {Q}",
    "Signature {Q}",
];

const PRODUCTS_BY_KEYWORD: &[(&str, [&str; 5])] = &[
    ("apple", ["Organic {Q}s", "{Q} Juice", "Dried {Q} Slices", "{Q} Cider", "Green {Q}s"]),
    ("banana", ["Organic {Q}s", "{Q} Chips", "Frozen {Q}s", "{Q} Bread", "Ripe {Q}s"]),
    ("milk", ["Organic Whole {Q}", "Skimmed {Q}", "Almond {Q}", "Soy {Q}", "Oat {Q}"]),
    ("bread", ["Whole Wheat {Q}", "Multigrain {Q}", "Sourdough {Q}", "Gluten-Free {Q}", "Rye {Q}"]),
    ("rice", ["Basmati {Q}", "Brown {Q}", "Jasmine {Q}", "Wild {Q}", "Organic {Q}"]),
    ("chicken", ["Free-Range {Q}", "{Q} Breast", "{Q} Thighs", "Organic {Q}", "{Q} Drumsticks"]),
    ("pasta", ["Whole Wheat {Q}", "Gluten-Free {Q}", "Spinach {Q}", "Organic {Q}", "Tricolor {Q}"]),
    ("cheese", ["Cheddar {Q}", "Mozzarella {Q}", "Gouda {Q}", "Feta {Q}", "Parmesan {Q}"]),
    ("yogurt", ["Greek {Q}", "Low-Fat {Q}", "Fruit {Q}", "Organic {Q}", "Probiotic {Q}"]),
    ("chocolate", ["Dark {Q}", "Milk {Q}", "White {Q}", "Organic {Q}", "{Q} Truffles"]),
    ("coffee", ["Arabica {Q} Beans", "{Q} Pods", "Instant {Q}", "Decaf {Q}", "Organic {Q}"]),
    ("tea", ["Green {Q}", "Black {Q}", "Herbal {Q}", "Organic {Q}", "{Q} Bags"]),
    ("water", ["Spring {Q}", "Mineral {Q}", "Sparkling {Q}", "Alkaline {Q}", "Purified {Q}"]),
    ("juice", ["Orange {Q}", "Apple {Q}", "Mixed Fruit {Q}", "Fresh {Q}", "Organic {Q}"]),
    ("cereal", ["Whole Grain {Q}", "Granola {Q}", "Bran {Q}", "Organic {Q}", "Gluten-Free {Q}"]),
    ("snack", ["Protein {Q}s", "Organic {Q}s", "Gluten-Free {Q}s", "Vegan {Q}s", "Low-Carb {Q}s"]),
    ("fruit", ["Organic {Q}s", "Fresh {Q}s", "Frozen {Q}s", "Dried {Q}s", "Exotic {Q}s"]),
    ("vegetable", ["Organic {Q}s", "Fresh {Q}s", "Frozen {Q}s", "Local {Q}s", "Seasonal {Q}s"]),
    ("meat", ["Grass-Fed {Q}", "Organic {Q}", "Free-Range {Q}", "Lean {Q}", "Premium {Q}"]),
    ("fish", ["Wild-Caught {Q}", "Fresh {Q}", "Frozen {Q} Fillets", "Organic {Q}", "Smoked {Q}"]),
    ("oil", ["Extra Virgin Olive {Q}", "Coconut {Q}", "Avocado {Q}", "Organic {Q}", "Sesame {Q}"]),
    ("spice", ["Organic {Q}s", "Ground {Q}s", "Whole {Q}s", "Mixed {Q}s", "Premium {Q}s"]),
    ("nuts", ["Roasted {Q}", "Raw {Q}", "Organic {Q}", "Mixed {Q}", "Salted {Q}"]),
    ("beans", ["Black {Q}", "Kidney {Q}", "Pinto {Q}", "Organic {Q}", "Canned {Q}"]),
    ("soup", ["Tomato {Q}", "Chicken {Q}", "Vegetable {Q}", "Organic {Q}", "Creamy {Q}"]),
    ("sauce", ["Tomato {Q}", "Pasta {Q}", "Hot {Q}", "Organic {Q}", "Creamy {Q}"]),
    ("dessert", ["Chocolate {Q}", "Fruit {Q}", "Ice Cream {Q}", "Organic {Q}", "Low-Sugar {Q}"]),
];

const PRODUCTS_BY_CATEGORY: &[(&str, [&str; 5])] = &[
    ("Fruits", ["Organic {Q}", "Fresh {Q}", "Premium {Q}", "Seasonal {Q}", "Exotic {Q}"]),
    ("Vegetables", ["Organic {Q}", "Fresh {Q}", "Local {Q}", "Seasonal {Q}", "Farm-Fresh {Q}"]),
    ("Dairy", ["Organic {Q}", "Low-Fat {Q}", "Premium {Q}", "Artisanal {Q}", "Plant-Based {Q}"]),
    ("Bakery", ["Whole Grain {Q}", "Artisanal {Q}", "Gluten-Free {Q}", "Fresh-Baked {Q}", "Organic {Q}"]),
    ("Snacks", ["Protein {Q}", "Organic {Q}", "Low-Carb {Q}", "Gluten-Free {Q}", "Vegan {Q}"]),
];

const DEFAULT_PRODUCTS: [&str; 5] = [
    "Organic {Q}",
    "Premium {Q}",
    "Natural {Q}",
    "Artisanal {Q}",
    "Gourmet {Q}",
];

const RESTAURANTS_BY_FOOD: &[(&str, &[&str])] = &[
    ("pizza", &["Domino's Pizza", "Pizza Hut", "Papa John's", "La Pinoz Pizza", "Oven Story Pizza"]),
    ("burger", &["McDonald's", "Burger King", "Wendy's", "Burger Singh", "Wat-a-Burger"]),
    ("biryani", &["Paradise Biryani", "Behrouz Biryani", "Hyderabadi Biryani House", "Biryani Blues", "Biryani By Kilo"]),
    ("chinese", &["Mainland China", "Chowman", "Wow! China", "Chung Wah", "Beijing Bites"]),
    ("south indian", &["Saravana Bhavan", "Dosa Planet", "Madras Cafe", "Udupi Palace", "Adyar Ananda Bhavan"]),
    ("north indian", &["Pind Balluchi", "Punjabi by Nature", "Moti Mahal", "Patiala House", "Punjab Grill"]),
    ("dessert", &["Baskin Robbins", "Keventers", "Naturals Ice Cream", "Haagen-Dazs", "Belgian Waffle"]),
    ("coffee", &["Starbucks", "Cafe Coffee Day", "Third Wave Coffee", "Blue Tokai", "Barista"]),
];

const RESTAURANTS_BY_CITY: &[(&str, &[&str])] = &[
    ("hyderabad", &[
        "Paradise Biryani", "Bawarchi Restaurant", "Shah Ghouse", "Mehfil Restaurant",
        "Kritunga Restaurant", "Chutneys", "Ohri's Jiva Imperia", "Rayalaseema Ruchulu",
        "Spicy Venue", "Absolute Barbecues",
    ]),
    ("delhi", &[
        "Karim's", "Bukhara", "Moti Mahal", "Saravana Bhavan", "Gulati Restaurant",
        "Pind Balluchi", "Punjabi by Nature", "Indian Accent", "Sagar Ratna", "Dakshin",
    ]),
    ("mumbai", &[
        "Trishna", "Britannia & Co.", "Mahesh Lunch Home", "Gajalee", "Bademiya",
        "Khyber", "Copper Chimney", "Shiv Sagar", "Cafe Madras", "Swati Snacks",
    ]),
    ("bangalore", &[
        "MTR", "Vidyarthi Bhavan", "Nagarjuna", "Meghana Foods", "Empire Restaurant",
        "Truffles", "Koshy's", "CTR", "Brahmin's Coffee Bar", "Shivaji Military Hotel",
    ]),
];

const DEFAULT_RESTAURANTS: [&str; 8] = [
    "{Q} Express",
    "{Q} House",
    "Royal {Q}",
    "{Q} Palace",
    "{Q} Kitchen",
    "{Q} Factory",
    "Gourmet {Q}",
    "Authentic {Q}",
];

const AREAS_BY_CITY: &[(&str, &[&str])] = &[
    ("hyderabad", &["Banjara Hills", "Jubilee Hills", "Gachibowli", "Madhapur", "Hitech City", "Ameerpet", "Kukatpally"]),
    ("delhi", &["Connaught Place", "Hauz Khas", "Chandni Chowk", "Karol Bagh", "Lajpat Nagar", "Saket", "Dwarka"]),
    ("mumbai", &["Bandra", "Andheri", "Juhu", "Colaba", "Worli", "Powai", "Dadar"]),
    ("bangalore", &["Indiranagar", "Koramangala", "MG Road", "Whitefield", "Jayanagar", "HSR Layout", "JP Nagar"]),
];

const DEFAULT_AREAS: [&str; 4] = ["Main Street", "Downtown", "City Center", "Market Area"];

const DISHES_BY_CUISINE: &[(&str, [&str; 5])] = &[
    ("North Indian", ["Butter Chicken", "Paneer Tikka", "Dal Makhani", "Naan", "Biryani"]),
    ("South Indian", ["Masala Dosa", "Idli Sambar", "Vada", "Uttapam", "Appam"]),
    ("Chinese", ["Hakka Noodles", "Manchurian", "Fried Rice", "Chilli Chicken", "Spring Rolls"]),
    ("Italian", ["Margherita Pizza", "Pasta Carbonara", "Risotto", "Lasagna", "Tiramisu"]),
];

/// Keyword table first, then the category's defaults.
pub fn product_names(query: &str, category: &str) -> &'static [&'static str] {
    let query = query.to_lowercase();
    PRODUCTS_BY_KEYWORD
        .iter()
        .find(|(keyword, _)| query.contains(keyword))
        .or_else(|| PRODUCTS_BY_CATEGORY.iter().find(|(c, _)| *c == category))
        .map_or(&DEFAULT_PRODUCTS, |(_, names)| names)
}

/// Food-type chains mixed with city favourites when both match, else
/// whichever matches, else query-named templates.
pub fn restaurant_names(query: &str, city: &str) -> Vec<&'static str> {
    let query = query.to_lowercase();
    let city = city.to_lowercase();

    let local = RESTAURANTS_BY_CITY
        .iter()
        .find(|(name, _)| city.contains(name))
        .map(|(_, list)| *list);
    let by_food = RESTAURANTS_BY_FOOD
        .iter()
        .find(|(food, _)| query.contains(food))
        .map(|(_, list)| *list);

    match (by_food, local) {
        (Some(food), Some(local)) => food.iter().take(3).chain(local.iter().take(5)).copied().collect(),
        (Some(list), None) | (None, Some(list)) => list.to_vec(),
        (None, None) => DEFAULT_RESTAURANTS.to_vec(),
    }
}

pub fn areas(city: &str) -> &'static [&'static str] {
    let first = city.to_lowercase();
    let first = first.split_whitespace().next().unwrap_or_default();
    AREAS_BY_CITY
        .iter()
        .find(|(name, _)| *name == first)
        .map_or(&DEFAULT_AREAS, |(_, list)| list)
}

pub fn dishes(cuisine: &str) -> Option<&'static [&'static str]> {
    DISHES_BY_CUISINE
        .iter()
        .find(|(c, _)| *c == cuisine)
        .map(|(_, list)| list.as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_tables_name_the_query() {
        for (_, names) in PRODUCTS_BY_KEYWORD
            .iter()
            .chain(PRODUCTS_BY_CATEGORY.iter())
        {
            assert!(names.iter().all(|n| n.contains("{Q}")));
        }
        assert!(DEFAULT_PRODUCTS.iter().all(|n| n.contains("{Q}")));
    }

    #[test]
    fn test_product_names_lookup() {
        assert_eq!(product_names("Green Apple", "Dairy")[1], "{Q} Juice");
        assert_eq!(product_names("quinoa", "Bakery")[0], "Whole Grain {Q}");
        assert_eq!(product_names("quinoa", "Other")[0], "Organic {Q}");
    }

    #[test]
    fn test_restaurant_names_mix_food_and_city() {
        let names = restaurant_names("pizza", "Mumbai");
        assert_eq!(names.len(), 8);
        assert_eq!(names[0], "Domino's Pizza");
        assert_eq!(names[3], "Trishna");

        assert_eq!(restaurant_names("tacos", "Pune")[0], "{Q} Express");
    }

    #[test]
    fn test_areas_fallback() {
        assert_eq!(areas("New Delhi"), DEFAULT_AREAS.as_slice());
        assert_eq!(areas("Delhi")[0], "Connaught Place");
    }
}
