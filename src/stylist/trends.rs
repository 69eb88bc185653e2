//! Fashion trend brief

use tracing::warn;

use super::gemini::{GeminiClient, Part};

/// Shown when the trend brief cannot be fetched
pub const TRENDS_FALLBACK: &str = "Trends are unavailable right now.";

/// Fetch a short fashion update for the user's area.
///
/// Never fails: any error yields the static fallback message.
pub async fn fetch_trend_brief(client: &GeminiClient, model: &str, location: &str) -> String {
    let prompt = format!("Short fashion update for {} (3 sentences).", location);
    match client.generate(model, vec![Part::text(prompt)], None, None).await {
        Ok(reply) => {
            let text = reply.text();
            if text.trim().is_empty() {
                TRENDS_FALLBACK.to_string()
            } else {
                text
            }
        }
        Err(e) => {
            warn!("Trend brief failed ({}), using fallback", e);
            TRENDS_FALLBACK.to_string()
        }
    }
}
