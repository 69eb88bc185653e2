//! Outfit recommendation from the clean wardrobe view

use anyhow::{bail, Context, Result};
use serde_json::json;
use tracing::warn;

use super::gemini::{GeminiClient, GenerationConfig, Part};
use crate::types::{ClothingItem, Occasion, OutfitRecommendation, WeatherSnapshot};

impl OutfitRecommendation {
    /// Returned when recommendation fails or there is nothing clean to wear
    pub fn fallback() -> Self {
        Self {
            selected_ids: Vec::new(),
            name: "Nothing to wear".to_string(),
            reasoning: "Check your wardrobe: add some items or do the laundry first.".to_string(),
        }
    }
}

/// Ask the stylist for an outfit given the weather, occasion, and the clean
/// items.
///
/// Precondition: `clean_items` non-empty; an empty view is treated as a
/// failure and no request is issued. Never fails: any error yields the
/// fallback recommendation.
pub async fn recommend_outfit(
    client: &GeminiClient,
    model: &str,
    weather: &WeatherSnapshot,
    clean_items: &[&ClothingItem],
    occasion: Occasion,
) -> OutfitRecommendation {
    match try_recommend(client, model, weather, clean_items, occasion).await {
        Ok(recommendation) => recommendation,
        Err(e) => {
            warn!("Outfit recommendation failed ({}), using fallback", e);
            OutfitRecommendation::fallback()
        }
    }
}

async fn try_recommend(
    client: &GeminiClient,
    model: &str,
    weather: &WeatherSnapshot,
    clean_items: &[&ClothingItem],
    occasion: Occasion,
) -> Result<OutfitRecommendation> {
    if clean_items.is_empty() {
        bail!("No clean clothes available");
    }

    let clothes_list = clean_items
        .iter()
        .map(|item| format!("- ID: {}, Category: {}, Desc: {}", item.id, item.category, item.description))
        .collect::<Vec<_>>()
        .join("\n");

    let prompt = format!(
        "Context: Personal stylist. Location: {}. Weather: {}°C, {}. Occasion: {}. Wardrobe:\n{}\nTask: Select outfit.",
        weather.location, weather.temperature, weather.condition, occasion, clothes_list
    );

    let schema = json!({
        "type": "OBJECT",
        "properties": {
            "selectedItemIds": { "type": "ARRAY", "items": { "type": "STRING" } },
            "outfitName": { "type": "STRING" },
            "reasoning": { "type": "STRING" }
        },
        "required": ["selectedItemIds", "outfitName", "reasoning"]
    });

    let reply = client
        .generate(
            model,
            vec![Part::text(prompt)],
            Some(GenerationConfig::json_with_schema(schema)),
            None,
        )
        .await?;

    parse_recommendation(&reply.text())
}

fn parse_recommendation(text: &str) -> Result<OutfitRecommendation> {
    let value: serde_json::Value =
        serde_json::from_str(text.trim()).context("Recommendation reply is not JSON")?;

    let selected_ids = value
        .get("selectedItemIds")
        .and_then(|ids| ids.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|id| id.as_str().map(|s| s.to_string()))
                .collect()
        })
        .unwrap_or_default();

    Ok(OutfitRecommendation {
        selected_ids,
        name: value
            .get("outfitName")
            .and_then(|n| n.as_str())
            .unwrap_or("Outfit")
            .to_string(),
        reasoning: value
            .get("reasoning")
            .and_then(|r| r.as_str())
            .unwrap_or_default()
            .to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;

    #[test]
    fn test_parse_valid_recommendation() {
        let rec = parse_recommendation(
            r#"{"selectedItemIds": ["a1", "b2"], "outfitName": "Smart casual", "reasoning": "Layers for a cool evening."}"#,
        )
        .unwrap();
        assert_eq!(rec.selected_ids, vec!["a1", "b2"]);
        assert_eq!(rec.name, "Smart casual");
        assert_eq!(rec.reasoning, "Layers for a cool evening.");
    }

    #[test]
    fn test_parse_malformed_is_error() {
        assert!(parse_recommendation("wear the blue one").is_err());
    }

    #[test]
    fn test_parse_missing_ids_yields_empty_selection() {
        let rec = parse_recommendation(r#"{"outfitName": "X", "reasoning": "y"}"#).unwrap();
        assert!(rec.selected_ids.is_empty());
    }

    #[tokio::test]
    async fn test_empty_clean_view_falls_back_without_request() {
        // The client points at an unroutable key/URL; with an empty view the
        // precondition fails before any request is built.
        let client = GeminiClient::new("unused".to_string());
        let weather = WeatherSnapshot::offline("Nowhere");
        let rec = recommend_outfit(&client, "model", &weather, &[], Occasion::Casual).await;
        assert!(rec.selected_ids.is_empty());
        assert_eq!(rec.name, "Nothing to wear");
    }

    #[test]
    fn test_prompt_lists_each_clean_item() {
        let a = ClothingItem::new("data:,".into(), Category::Tops, "white tee".into());
        let items = [&a];
        let listing = items
            .iter()
            .map(|i| format!("- ID: {}, Category: {}, Desc: {}", i.id, i.category, i.description))
            .collect::<Vec<_>>()
            .join("\n");
        assert!(listing.contains(&a.id));
        assert!(listing.contains("Tops"));
        assert!(listing.contains("white tee"));
    }
}
