//! Clothing photo classification

use anyhow::{Context, Result};
use serde_json::json;
use std::str::FromStr;
use tracing::warn;

use super::gemini::{GeminiClient, GenerationConfig, Part};
use crate::imaging;
use crate::types::Category;

/// Category and short description assigned to a photographed garment
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub category: Category,
    pub description: String,
}

impl Classification {
    /// Returned when the classification call fails outright
    pub fn fallback() -> Self {
        Self {
            category: Category::Tops,
            description: "New clothing item".to_string(),
        }
    }
}

/// Classify a garment photo into a category plus a short visual description.
///
/// Never fails: any transport, HTTP, or parse error yields the fallback
/// classification so adding an item is never blocked on the AI being up.
pub async fn classify_item(client: &GeminiClient, model: &str, image_data_uri: &str) -> Classification {
    match try_classify(client, model, image_data_uri).await {
        Ok(classification) => classification,
        Err(e) => {
            warn!("Classification failed ({}), using fallback", e);
            Classification::fallback()
        }
    }
}

async fn try_classify(client: &GeminiClient, model: &str, image_data_uri: &str) -> Result<Classification> {
    let categories: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
    let prompt = format!(
        "Analyze this clothing item. Classify it into one of these exact categories: {}. \
         Also provide a short, 5-word visual description (color, style).",
        categories.join(", ")
    );

    let schema = json!({
        "type": "OBJECT",
        "properties": {
            "category": { "type": "STRING", "enum": categories },
            "description": { "type": "STRING" }
        },
        "required": ["category", "description"]
    });

    let parts = vec![
        Part::inline_image("image/jpeg", imaging::base64_payload(image_data_uri)),
        Part::text(prompt),
    ];

    let reply = client
        .generate(model, parts, Some(GenerationConfig::json_with_schema(schema)), None)
        .await?;

    parse_classification(&reply.text())
}

/// Parse the model's JSON answer. A category outside the closed set maps to
/// Tops rather than failing: that keeps a mostly-valid answer usable.
fn parse_classification(text: &str) -> Result<Classification> {
    let value: serde_json::Value =
        serde_json::from_str(text.trim()).context("Classification reply is not JSON")?;

    let category = value
        .get("category")
        .and_then(|c| c.as_str())
        .and_then(|s| Category::from_str(s).ok())
        .unwrap_or(Category::Tops);

    let description = value
        .get("description")
        .and_then(|d| d.as_str())
        .filter(|d| !d.trim().is_empty())
        .unwrap_or("Clothing item")
        .to_string();

    Ok(Classification { category, description })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_reply() {
        let parsed = parse_classification(r#"{"category": "Footwear", "description": "white leather low sneakers"}"#).unwrap();
        assert_eq!(parsed.category, Category::Footwear);
        assert_eq!(parsed.description, "white leather low sneakers");
    }

    #[test]
    fn test_parse_unknown_category_defaults_to_tops() {
        let parsed = parse_classification(r#"{"category": "Swimwear", "description": "blue trunks"}"#).unwrap();
        assert_eq!(parsed.category, Category::Tops);
        assert_eq!(parsed.description, "blue trunks");
    }

    #[test]
    fn test_parse_missing_description_gets_default() {
        let parsed = parse_classification(r#"{"category": "Pants"}"#).unwrap();
        assert_eq!(parsed.category, Category::Pants);
        assert_eq!(parsed.description, "Clothing item");

        let parsed = parse_classification(r#"{"category": "Pants", "description": "  "}"#).unwrap();
        assert_eq!(parsed.description, "Clothing item");
    }

    #[test]
    fn test_parse_malformed_reply_is_error() {
        assert!(parse_classification("not json").is_err());
        assert!(parse_classification("").is_err());
    }

    #[test]
    fn test_fallback_shape() {
        let fb = Classification::fallback();
        assert_eq!(fb.category, Category::Tops);
        assert!(!fb.description.is_empty());
    }
}
