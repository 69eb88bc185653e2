//! Virtual try-on image synthesis
//!
//! The one stylist call whose failure propagates: there is no sensible
//! placeholder for a missing composite image.

use anyhow::{bail, Result};

use super::gemini::{GeminiClient, Part};
use crate::imaging;
use crate::types::ClothingItem;

/// Generate a composite image of the person in `user_image_data_uri`
/// wearing the selected garments. Returns the result as a data URI.
pub async fn synthesize_try_on(
    client: &GeminiClient,
    model: &str,
    user_image_data_uri: &str,
    selected_items: &[&ClothingItem],
) -> Result<String> {
    if selected_items.is_empty() {
        bail!("No garments selected for try-on");
    }

    let mut parts = vec![
        Part::text("Virtual try-on. Replace clothes on person (first image) with items provided."),
        Part::inline_image("image/jpeg", imaging::base64_payload(user_image_data_uri)),
    ];
    for item in selected_items {
        parts.push(Part::inline_image("image/jpeg", imaging::base64_payload(&item.image)));
    }

    let reply = client.generate(model, parts, None, None).await?;

    match reply.inline_image() {
        Some((mime, data)) => Ok(format!("data:{};base64,{}", mime, data)),
        None => bail!("No image in try-on reply"),
    }
}
