//! Shared types used across modules
//!
//! This module contains the wardrobe data model and the transient
//! stylist results so the store, the Gemini wrappers, and the CLI
//! don't depend on each other.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Garment category. A closed set: anything else is a parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Headwear,
    Tops,
    Hoodies,
    Jackets,
    Coats,
    Pants,
    Footwear,
    Accessories,
}

/// Error returned when a string is not one of the closed category values
#[derive(Debug, Error, PartialEq)]
#[error("unknown clothing category: {0}")]
pub struct ParseCategoryError(pub String);

impl Category {
    /// All categories, in display order
    pub const ALL: &'static [Category] = &[
        Category::Headwear,
        Category::Tops,
        Category::Hoodies,
        Category::Jackets,
        Category::Coats,
        Category::Pants,
        Category::Footwear,
        Category::Accessories,
    ];

    /// Display string, also the persisted encoding
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Headwear => "Headwear",
            Category::Tops => "Tops",
            Category::Hoodies => "Hoodies",
            Category::Jackets => "Jackets",
            Category::Coats => "Coats",
            Category::Pants => "Pants",
            Category::Footwear => "Footwear",
            Category::Accessories => "Accessories",
        }
    }
}

impl std::str::FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Occasion labels used to bias outfit recommendations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Occasion {
    Casual,
    University,
    Office,
    Date,
    FriendsNight,
    FamilyDinner,
    Sport,
}

/// Error returned when a string is not one of the known occasions
#[derive(Debug, Error, PartialEq)]
#[error("unknown occasion: {0} (try one of: casual, university, office, date, friends, family, sport)")]
pub struct ParseOccasionError(pub String);

impl Occasion {
    /// All occasions, in display order
    pub const ALL: &'static [Occasion] = &[
        Occasion::Casual,
        Occasion::University,
        Occasion::Office,
        Occasion::Date,
        Occasion::FriendsNight,
        Occasion::FamilyDinner,
        Occasion::Sport,
    ];

    /// Human-readable label, also used in recommendation prompts
    pub fn as_str(&self) -> &'static str {
        match self {
            Occasion::Casual => "Casual walk",
            Occasion::University => "University",
            Occasion::Office => "Job/Office",
            Occasion::Date => "Date",
            Occasion::FriendsNight => "Night out with friends",
            Occasion::FamilyDinner => "Restaurant with family",
            Occasion::Sport => "Sport",
        }
    }

    /// Short keyword accepted on the command line
    pub fn keyword(&self) -> &'static str {
        match self {
            Occasion::Casual => "casual",
            Occasion::University => "university",
            Occasion::Office => "office",
            Occasion::Date => "date",
            Occasion::FriendsNight => "friends",
            Occasion::FamilyDinner => "family",
            Occasion::Sport => "sport",
        }
    }
}

impl std::str::FromStr for Occasion {
    type Err = ParseOccasionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Occasion::ALL
            .iter()
            .find(|o| o.keyword() == needle || o.as_str().eq_ignore_ascii_case(&needle))
            .copied()
            .ok_or_else(|| ParseOccasionError(s.to_string()))
    }
}

impl std::fmt::Display for Occasion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A photographed garment in the wardrobe
///
/// Serialized field names and encodings match the stored snapshot layout:
/// camelCase keys, category as its display string, timestamps as unix
/// milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClothingItem {
    /// Opaque unique id, assigned at creation
    pub id: String,
    /// Embedded image payload (data URI), opaque to the store
    pub image: String,
    pub category: Category,
    /// Short free-text label from classification
    pub description: String,
    /// true = available for outfit/try-on selection, false = laundry bucket
    pub is_clean: bool,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl ClothingItem {
    /// Create a fully-formed item: fresh id, clean, timestamped now
    pub fn new(image: String, category: Category, description: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            image,
            category,
            description,
            is_clean: true,
            created_at: Utc::now(),
        }
    }
}

/// Current weather at a location. Transient, overwritten wholesale per fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub temperature: f64,
    pub condition: String,
    pub location: String,
}

impl WeatherSnapshot {
    /// Sentinel returned when the weather lookup fails
    pub fn offline(location: impl Into<String>) -> Self {
        Self {
            temperature: 0.0,
            condition: "offline".to_string(),
            location: location.into(),
        }
    }
}

/// An outfit picked by the stylist. Transient, replaced per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutfitRecommendation {
    /// Ids of the selected wardrobe items
    pub selected_ids: Vec<String>,
    pub name: String,
    pub reasoning: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_category_round_trip() {
        for cat in Category::ALL {
            let parsed = Category::from_str(cat.as_str()).unwrap();
            assert_eq!(parsed, *cat);
        }
    }

    #[test]
    fn test_category_rejects_unknown() {
        assert!(Category::from_str("Socks").is_err());
        assert!(Category::from_str("").is_err());
    }

    #[test]
    fn test_category_parse_is_case_insensitive() {
        assert_eq!(Category::from_str("tops").unwrap(), Category::Tops);
        assert_eq!(Category::from_str("  FOOTWEAR ").unwrap(), Category::Footwear);
    }

    #[test]
    fn test_category_json_encoding_is_display_string() {
        let json = serde_json::to_string(&Category::Coats).unwrap();
        assert_eq!(json, "\"Coats\"");
        let back: Category = serde_json::from_str("\"Coats\"").unwrap();
        assert_eq!(back, Category::Coats);
    }

    #[test]
    fn test_category_json_rejects_unknown() {
        assert!(serde_json::from_str::<Category>("\"Socks\"").is_err());
    }

    #[test]
    fn test_occasion_keywords() {
        assert_eq!(Occasion::from_str("office").unwrap(), Occasion::Office);
        assert_eq!(Occasion::from_str("friends").unwrap(), Occasion::FriendsNight);
        assert!(Occasion::from_str("gala").is_err());
    }

    #[test]
    fn test_item_serialized_field_names() {
        let item = ClothingItem::new(
            "data:image/png;base64,AAAA".to_string(),
            Category::Tops,
            "white cotton t-shirt".to_string(),
        );
        let value = serde_json::to_value(&item).unwrap();
        assert!(value.get("isClean").is_some());
        assert!(value.get("createdAt").is_some());
        assert!(value["createdAt"].is_number());
        assert_eq!(value["category"], "Tops");
    }

    #[test]
    fn test_new_item_is_clean() {
        let item = ClothingItem::new("data:,".into(), Category::Pants, "jeans".into());
        assert!(item.is_clean);
        assert!(!item.id.is_empty());
    }
}
