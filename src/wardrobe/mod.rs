//! Wardrobe persistence module
//!
//! Provides:
//! - The authoritative, ordered collection of clothing items
//! - Full-snapshot JSON persistence after every mutation
//! - Filtered views for the presentation layer (cleanliness, category)

pub mod store;

pub use store::WardrobeStore;

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Default location of the wardrobe snapshot file
pub fn default_store_path() -> Result<PathBuf> {
    let data_dir = dirs::data_local_dir()
        .context("Failed to resolve local data directory")?
        .join("styleai");
    Ok(data_dir.join("wardrobe.json"))
}
