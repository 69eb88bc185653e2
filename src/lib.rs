//! StyleAI - Personal Wardrobe Assistant Library
//!
//! A wardrobe assistant with:
//! - Locally persisted clothing collection with laundry tracking
//! - Gemini-backed photo classification
//! - Weather-aware outfit recommendations
//! - Virtual try-on image synthesis
//! - Fashion trend briefs
//!
//! # Example
//!
//! ```ignore
//! use styleai::wardrobe::WardrobeStore;
//!
//! let mut store = WardrobeStore::load(styleai::wardrobe::default_store_path()?);
//! println!("{} items, {} in the laundry", store.len(), store.count_dirty());
//! ```

pub mod types;
pub mod config;
pub mod security;
pub mod imaging;
pub mod wardrobe;
pub mod stylist;
pub mod cli;
pub mod interactive;

// Re-export commonly used types for convenience
pub use wardrobe::WardrobeStore;
pub use types::{Category, ClothingItem, Occasion, OutfitRecommendation, WeatherSnapshot};
pub use stylist::GeminiClient;
pub use config::Config;
pub use security::{set_api_key, get_api_key, has_api_key, delete_api_key};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get the library info
pub fn info() -> String {
    format!("{} v{} - Personal Wardrobe Assistant Library", NAME, VERSION)
}
