//! Search-grounded weather lookup

use anyhow::{Context, Result};
use serde_json::json;
use tracing::warn;

use super::gemini::{GeminiClient, GenerationConfig, Part};
use crate::types::WeatherSnapshot;

/// Fetch the current weather for a location.
///
/// Never fails: any error yields the offline sentinel so the stylist flow
/// keeps working without a live reading.
pub async fn fetch_weather(client: &GeminiClient, model: &str, location: &str) -> WeatherSnapshot {
    match try_fetch(client, model, location).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            warn!("Weather lookup for {} failed ({}), using offline sentinel", location, e);
            WeatherSnapshot::offline(location)
        }
    }
}

async fn try_fetch(client: &GeminiClient, model: &str, location: &str) -> Result<WeatherSnapshot> {
    let prompt = format!(
        "Search for the current temperature (in Celsius) and weather condition in {} right now. \
         Return a JSON with properties: temp (number), condition (string), location (string).",
        location
    );

    // Grounding tools cannot be combined with a response schema, so the
    // reply is free-form JSON and may arrive fenced.
    let reply = client
        .generate(
            model,
            vec![Part::text(prompt)],
            Some(GenerationConfig::json()),
            Some(vec![json!({"google_search": {}})]),
        )
        .await?;

    parse_weather_reply(&reply.text(), location)
}

/// Parse the weather JSON, tolerating markdown fences and missing fields
fn parse_weather_reply(text: &str, requested_location: &str) -> Result<WeatherSnapshot> {
    let cleaned = text.replace("```json", "").replace("```", "");
    let value: serde_json::Value =
        serde_json::from_str(cleaned.trim()).context("Weather reply is not JSON")?;

    Ok(WeatherSnapshot {
        temperature: value.get("temp").and_then(|t| t.as_f64()).unwrap_or(0.0),
        condition: value
            .get("condition")
            .and_then(|c| c.as_str())
            .filter(|c| !c.trim().is_empty())
            .unwrap_or("unavailable")
            .to_string(),
        location: value
            .get("location")
            .and_then(|l| l.as_str())
            .filter(|l| !l.trim().is_empty())
            .unwrap_or(requested_location)
            .to_string(),
    })
}
