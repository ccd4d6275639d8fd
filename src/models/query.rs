use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::constants::{collections, favorites};
use crate::models::platform::Platform;
use crate::parser::text::normalize_query;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchDomain {
    Grocery,
    Restaurant,
}

impl SearchDomain {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Grocery => "grocery",
            Self::Restaurant => "restaurant",
        }
    }

    /// Document store collection holding one document per query.
    #[must_use]
    pub const fn collection(self) -> &'static str {
        match self {
            Self::Grocery => collections::GROCERY_SEARCHES,
            Self::Restaurant => collections::RESTAURANT_SEARCHES,
        }
    }

    /// Profile field the user's favorites for this domain live under.
    #[must_use]
    pub const fn favorites_field(self) -> &'static str {
        match self {
            Self::Grocery => favorites::GROCERY_FIELD,
            Self::Restaurant => favorites::RESTAURANT_FIELD,
        }
    }

    #[must_use]
    pub const fn platforms(self) -> &'static [Platform] {
        match self {
            Self::Grocery => &Platform::GROCERY,
            Self::Restaurant => &Platform::RESTAURANT,
        }
    }
}

impl fmt::Display for SearchDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchDomain {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "grocery" | "groceries" => Ok(Self::Grocery),
            "restaurant" | "restaurants" | "food-delivery" => Ok(Self::Restaurant),
            other => Err(QueryError::UnknownDomain(other.to_string())),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("Search query cannot be empty")]
    Empty,

    #[error("Unknown search domain: {0}")]
    UnknownDomain(String),
}

/// A validated search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    domain: SearchDomain,
    text: String,
    city: Option<String>,
}

impl SearchQuery {
    pub fn new(domain: SearchDomain, text: &str) -> Result<Self, QueryError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(QueryError::Empty);
        }

        Ok(Self {
            domain,
            text: text.to_string(),
            city: None,
        })
    }

    pub fn grocery(text: &str) -> Result<Self, QueryError> {
        Self::new(SearchDomain::Grocery, text)
    }

    pub fn restaurant(text: &str, city: Option<&str>) -> Result<Self, QueryError> {
        Ok(Self::new(SearchDomain::Restaurant, text)?.with_city(city))
    }

    /// City only narrows restaurant searches; blank values are dropped.
    #[must_use]
    pub fn with_city(mut self, city: Option<&str>) -> Self {
        self.city = city
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);
        self
    }

    #[must_use]
    pub const fn domain(&self) -> SearchDomain {
        self.domain
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    /// Identity shared by the cache key and the document id.
    #[must_use]
    pub fn normalized(&self) -> String {
        let text = normalize_query(&self.text);
        match (self.domain, &self.city) {
            (SearchDomain::Restaurant, Some(city)) => {
                format!("{text}_{}", normalize_query(city))
            }
            _ => text,
        }
    }

    /// `{domain}_search_{normalized}`
    #[must_use]
    pub fn cache_key(&self) -> String {
        format!("{}_search_{}", self.domain, self.normalized())
    }

    /// The first word of a multi-word query, searched alongside the full
    /// query to widen the result set.
    #[must_use]
    pub fn related(&self) -> Option<Self> {
        let mut words = self.text.split_whitespace();
        let first = words.next()?;
        words.next()?;

        Some(Self {
            domain: self.domain,
            text: first.to_string(),
            city: self.city.clone(),
        })
    }
}
