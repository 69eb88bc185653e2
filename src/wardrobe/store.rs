//! Wardrobe store: the owned, persisted collection of clothing items
//!
//! The store keeps items newest-first (insertion at the head) and rewrites
//! the full JSON snapshot after every mutation. Loading is fail-soft: a
//! missing or malformed snapshot yields an empty wardrobe, never an error.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::types::{Category, ClothingItem};

/// The authoritative clothing collection, mirrored to a snapshot file
#[derive(Debug)]
pub struct WardrobeStore {
    items: Vec<ClothingItem>,
    path: PathBuf,
}

impl WardrobeStore {
    /// Open the store at `path`, reading the persisted snapshot if present.
    ///
    /// Never fails: an absent file starts empty, and a snapshot that does
    /// not parse is treated as no data.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let items = match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<Vec<ClothingItem>>(&contents) {
                Ok(items) => {
                    debug!("Loaded {} wardrobe items from {}", items.len(), path.display());
                    items
                }
                Err(e) => {
                    warn!("Wardrobe snapshot at {} is malformed ({}), starting empty", path.display(), e);
                    Vec::new()
                }
            },
            Err(_) => Vec::new(),
        };
        Self { items, path }
    }

    /// Insert a fully-formed item at the head of the collection
    pub fn add(&mut self, item: ClothingItem) -> Result<()> {
        self.items.insert(0, item);
        self.save()
    }

    /// Remove the item with the given id. Returns false (a no-op, not an
    /// error) when the id is absent.
    pub fn remove(&mut self, id: &str) -> Result<bool> {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        if self.items.len() == before {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    /// Flip the laundry state of the item with the given id. Returns false
    /// when the id is absent.
    pub fn toggle_clean(&mut self, id: &str) -> Result<bool> {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.is_clean = !item.is_clean;
                self.save()?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Ordered sub-sequence of items matching the given laundry state,
    /// newest first. Pure query.
    pub fn view_by_cleanliness(&self, is_clean: bool) -> Vec<&ClothingItem> {
        self.items.iter().filter(|item| item.is_clean == is_clean).collect()
    }

    /// Number of items currently in the laundry bucket
    pub fn count_dirty(&self) -> usize {
        self.items.iter().filter(|item| !item.is_clean).count()
    }

    /// Partition a sequence of items into category groups. Group keys appear
    /// in first-encountered order; each group preserves the relative order
    /// of its members from the input. Pure query.
    pub fn group_by_category<'a>(items: &[&'a ClothingItem]) -> Vec<(Category, Vec<&'a ClothingItem>)> {
        let mut groups: Vec<(Category, Vec<&ClothingItem>)> = Vec::new();
        for item in items {
            match groups.iter_mut().find(|(cat, _)| *cat == item.category) {
                Some((_, members)) => members.push(item),
                None => groups.push((item.category, vec![item])),
            }
        }
        groups
    }

    /// Look up an item by id
    pub fn find(&self, id: &str) -> Option<&ClothingItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// All items, newest first
    pub fn items(&self) -> &[ClothingItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Path of the snapshot file backing this store
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rewrite the full snapshot. Called after every mutation; last write
    /// wins.
    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .context("Failed to create wardrobe data directory")?;
        }
        let contents = serde_json::to_string(&self.items)
            .context("Failed to serialize wardrobe snapshot")?;
        std::fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write wardrobe snapshot to {}", self.path.display()))?;
        debug!("Persisted {} wardrobe items", self.items.len());
        Ok(())
    }
}
