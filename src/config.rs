//! Configuration management
//!
//! Manages model assignments, the default weather location, and the
//! wardrobe snapshot path.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Gemini model assignments for different roles
    #[serde(default)]
    pub models: ModelsConfig,
    /// Weather defaults
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Storage overrides
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Model assignments for the stylist roles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsConfig {
    /// Model for text tasks (classification, outfits, weather, trends)
    #[serde(default = "default_text_model")]
    pub text: String,
    /// Model for image synthesis (virtual try-on)
    #[serde(default = "default_image_model")]
    pub image: String,
}

fn default_text_model() -> String {
    "gemini-3-flash-preview".to_string()
}

fn default_image_model() -> String {
    "gemini-2.5-flash-image".to_string()
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            text: default_text_model(),
            image: default_image_model(),
        }
    }
}

impl ModelsConfig {
    /// Get model for a role name
    pub fn get(&self, role: &str) -> Option<&str> {
        match role.to_lowercase().as_str() {
            "text" | "chat" | "classify" | "weather" | "outfit" | "trends" => Some(&self.text),
            "image" | "tryon" => Some(&self.image),
            _ => None,
        }
    }

    /// Set model for a role name
    pub fn set(&mut self, role: &str, model: String) -> bool {
        match role.to_lowercase().as_str() {
            "text" | "chat" | "classify" | "weather" | "outfit" | "trends" => {
                self.text = model;
                true
            }
            "image" | "tryon" => {
                self.image = model;
                true
            }
            _ => false,
        }
    }

    /// List all available roles
    pub fn roles() -> &'static [&'static str] {
        &["text", "image"]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Default location for weather lookups and trend briefs
    #[serde(default = "default_location")]
    pub location: String,
}

fn default_location() -> String {
    "București".to_string()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            location: default_location(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// Override for the wardrobe snapshot path (default: local data dir)
    pub wardrobe_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from file, creating the default on first run
    pub fn load() -> Result<Self> {
        let config_path = config_path()?;

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)
                .context("Failed to read config file")?;
            let config: Config = toml::from_str(&contents)
                .context("Failed to parse config file")?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = config_path()?;
        let parent = config_path.parent()
            .context("Config path has no parent")?;

        std::fs::create_dir_all(parent)
            .context("Failed to create config directory")?;

        let contents = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;

        std::fs::write(&config_path, contents)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// Resolve the wardrobe snapshot path (config override or default)
    pub fn wardrobe_path(&self) -> Result<PathBuf> {
        match &self.storage.wardrobe_path {
            Some(path) => Ok(path.clone()),
            None => crate::wardrobe::default_store_path(),
        }
    }
}

/// Get the configuration file path
pub fn config_path() -> Result<PathBuf> {
    let base = directories::ProjectDirs::from("com", "styleai", "styleai")
        .context("Failed to get project directories")?;
    Ok(base.config_dir().join("config.toml"))
}

/// Show current configuration
pub fn show_config() -> Result<()> {
    let config = Config::load()?;

    println!("Model Assignments:");
    println!("  text:   {}", config.models.text);
    println!("  image:  {}", config.models.image);
    println!();
    println!("Weather location: {}", config.weather.location);
    println!("Wardrobe file:    {}", config.wardrobe_path()?.display());
    println!("API key:          {}", if crate::security::keyring::has_api_key() { "set" } else { "not set" });
    println!();
    println!("Use 'styleai config --set-model <role> <model>' to change a model");
    println!("Available roles: {}", ModelsConfig::roles().join(", "));

    Ok(())
}

/// Set API key
pub fn set_api_key(key: &str) -> Result<()> {
    crate::security::keyring::set_api_key(key)?;
    println!("API key stored securely.");
    Ok(())
}

/// Set model for a specific role
pub fn set_model(role: &str, model: &str) -> Result<()> {
    let mut config = Config::load()?;

    if !config.models.set(role, model.to_string()) {
        anyhow::bail!("Unknown role '{}'. Available roles: {}", role, ModelsConfig::roles().join(", "));
    }

    config.save()?;
    println!("Model for '{}' set to: {}", role, model);
    Ok(())
}

/// Set the default weather location
pub fn set_location(location: &str) -> Result<()> {
    if location.trim().is_empty() {
        anyhow::bail!("Location cannot be empty");
    }
    let mut config = Config::load()?;
    config.weather.location = location.trim().to_string();
    config.save()?;
    println!("Default location set to: {}", location.trim());
    Ok(())
}

/// Reset configuration to defaults
pub fn reset_config() -> Result<()> {
    let config = Config::default();
    config.save()?;
    println!("Configuration reset to defaults.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.models.text, "gemini-3-flash-preview");
        assert_eq!(config.models.image, "gemini-2.5-flash-image");
        assert_eq!(config.weather.location, "București");
        assert!(config.storage.wardrobe_path.is_none());
    }

    #[test]
    fn test_toml_round_trip_with_missing_tables() {
        // Older config files may lack whole tables; serde defaults fill them
        let config: Config = toml::from_str("[weather]\nlocation = \"Cluj\"\n").unwrap();
        assert_eq!(config.weather.location, "Cluj");
        assert_eq!(config.models.text, "gemini-3-flash-preview");

        let out = toml::to_string_pretty(&config).unwrap();
        let back: Config = toml::from_str(&out).unwrap();
        assert_eq!(back.weather.location, "Cluj");
    }

    #[test]
    fn test_model_roles() {
        let mut config = Config::default();
        assert!(config.models.set("tryon", "imagen-x".to_string()));
        assert_eq!(config.models.get("image"), Some("imagen-x"));
        assert!(!config.models.set("voice", "whatever".to_string()));
        assert!(config.models.get("voice").is_none());
    }
}
