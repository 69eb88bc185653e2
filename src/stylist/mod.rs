//! Stylist module: the generative AI collaborator
//!
//! Provides:
//! - Gemini `generateContent` client (text, structured output, inline images)
//! - Clothing photo classification with closed-category fallback
//! - Search-grounded weather lookup with an offline sentinel
//! - Outfit recommendation over the clean wardrobe view
//! - Virtual try-on image synthesis (the one call whose failure propagates)
//! - Short fashion trend briefs
//!
//! Every wrapper is single-shot request/response: no retry, no backoff,
//! one call in flight at a time.

pub mod gemini;
pub mod classify;
pub mod weather;
pub mod outfit;
pub mod tryon;
pub mod trends;

pub use gemini::{GeminiClient, GeminiReply, GenerationConfig, Part};
pub use classify::{classify_item, Classification};
pub use weather::fetch_weather;
pub use outfit::recommend_outfit;
pub use tryon::synthesize_try_on;
pub use trends::{fetch_trend_brief, TRENDS_FALLBACK};
