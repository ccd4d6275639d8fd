use serde::{Deserialize, Serialize};
use std::fmt;

/// Storefront or delivery service a record was sourced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Platform {
    Blinkit,
    Zepto,
    Instamart,
    BigBasket,
    Swiggy,
    Zomato,
    #[default]
    #[serde(other)]
    Other,
}

impl Platform {
    pub const GROCERY: [Self; 4] = [Self::Blinkit, Self::Zepto, Self::Instamart, Self::BigBasket];

    pub const RESTAURANT: [Self; 2] = [Self::Swiggy, Self::Zomato];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Blinkit => "Blinkit",
            Self::Zepto => "Zepto",
            Self::Instamart => "Instamart",
            Self::BigBasket => "BigBasket",
            Self::Swiggy => "Swiggy",
            Self::Zomato => "Zomato",
            Self::Other => "Other",
        }
    }

    /// Lenient parse for labels coming from upstream payloads.
    ///
    /// Grofers was rebranded as Blinkit, and "Swiggy Instamart" is the
    /// grocery arm rather than restaurant delivery.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        let label = label.trim().to_lowercase();
        if label.contains("instamart") {
            return Self::Instamart;
        }
        match label.as_str() {
            "blinkit" | "grofers" => Self::Blinkit,
            "zepto" => Self::Zepto,
            "bigbasket" | "big basket" | "bb" => Self::BigBasket,
            "swiggy" => Self::Swiggy,
            "zomato" => Self::Zomato,
            _ => Self::Other,
        }
    }

    /// Search page on the platform for a query, used as a record redirect.
    #[must_use]
    pub fn search_url(self, query: &str) -> String {
        let q = urlencoding::encode(query);
        match self {
            Self::Blinkit => format!("https://blinkit.com/search?q={q}"),
            Self::Zepto => format!("https://www.zeptonow.com/search?q={q}"),
            Self::Instamart => format!("https://www.swiggy.com/instamart/search?query={q}"),
            Self::BigBasket => format!("https://www.bigbasket.com/ps/?q={q}"),
            Self::Swiggy => format!("https://www.swiggy.com/search?query={q}"),
            Self::Zomato => format!("https://www.zomato.com/search?q={q}"),
            Self::Other => format!("https://www.google.com/search?q={q}&tbm=shop"),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
