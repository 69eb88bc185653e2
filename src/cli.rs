//! CLI interface for styleai

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::config::{self, Config};
use crate::imaging;
use crate::stylist::{self, GeminiClient};
use crate::types::{ClothingItem, Occasion};
use crate::wardrobe::WardrobeStore;

#[derive(Parser)]
#[command(name = "styleai")]
#[command(about = "Personal wardrobe assistant with AI outfit styling and virtual try-on", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a photographed clothing item to the wardrobe
    Add {
        /// Path to the photo (png, jpeg, or webp)
        photo: PathBuf,
    },
    /// List wardrobe items grouped by category
    List {
        /// Show the laundry basket instead of the clean wardrobe
        #[arg(short, long)]
        laundry: bool,
    },
    /// Move an item in or out of the laundry basket
    Toggle {
        /// Item id
        id: String,
    },
    /// Delete an item from the wardrobe
    Remove {
        /// Item id
        id: String,
    },
    /// Recommend an outfit for the current weather and an occasion
    Outfit {
        /// Occasion: casual, university, office, date, friends, family, sport
        #[arg(short, long, default_value = "casual")]
        occasion: String,
        /// Location for the weather lookup (default: configured location)
        #[arg(short, long)]
        location: Option<String>,
    },
    /// Show the current weather for a location
    Weather {
        /// Location (default: configured location)
        location: Option<String>,
    },
    /// Generate a virtual try-on composite image
    Tryon {
        /// Photo of you
        #[arg(long)]
        photo: PathBuf,
        /// Where to write the generated image
        #[arg(long, default_value = "tryon.png")]
        out: PathBuf,
        /// Ids of clean wardrobe items to try on
        items: Vec<String>,
    },
    /// Show a short fashion trend brief
    Trends,
    /// Configure the assistant
    Config {
        /// Set the Gemini API key
        #[arg(long)]
        set_api_key: Option<String>,
        /// Show current configuration
        #[arg(long)]
        show: bool,
        /// Set model for a role (usage: --set-model role model_id)
        #[arg(long, value_names = &["role", "model"])]
        set_model: Option<Vec<String>>,
        /// Set the default weather location
        #[arg(long)]
        set_location: Option<String>,
        /// Reset configuration to defaults
        #[arg(long)]
        reset: bool,
    },
    /// Start an interactive session (default when no command given)
    Interactive,
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        None | Some(Commands::Interactive) => crate::interactive::run().await,
        Some(Commands::Add { photo }) => add_item(&photo).await,
        Some(Commands::List { laundry }) => list_items(laundry),
        Some(Commands::Toggle { id }) => toggle_item(&id),
        Some(Commands::Remove { id }) => remove_item(&id),
        Some(Commands::Outfit { occasion, location }) => outfit(&occasion, location.as_deref()).await,
        Some(Commands::Weather { location }) => weather(location.as_deref()).await,
        Some(Commands::Tryon { photo, out, items }) => tryon(&photo, &out, &items).await,
        Some(Commands::Trends) => trends().await,
        Some(Commands::Config { set_api_key, show, set_model, set_location, reset }) => {
            handle_config(set_api_key, show, set_model, set_location, reset)
        }
    }
}

fn open_store(config: &Config) -> Result<WardrobeStore> {
    Ok(WardrobeStore::load(config.wardrobe_path()?))
}

/// Spinner shown while a stylist call is in flight
pub(crate) fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

async fn add_item(photo: &Path) -> Result<()> {
    let config = Config::load()?;
    let mut store = open_store(&config)?;

    // Reject unreadable or non-image files before any network call
    let image = imaging::encode_image_file(photo)?;

    let client = GeminiClient::from_keyring()?;
    let pb = spinner("Analyzing photo...");
    let classification = stylist::classify_item(&client, &config.models.text, &image).await;
    pb.finish_and_clear();

    let item = ClothingItem::new(image, classification.category, classification.description);
    println!("Added to wardrobe: {} ({})", item.description, item.category);
    println!("  id: {}", item.id);
    store.add(item)?;
    Ok(())
}

fn list_items(laundry: bool) -> Result<()> {
    let config = Config::load()?;
    let store = open_store(&config)?;

    let items = store.view_by_cleanliness(!laundry);
    let title = if laundry { "Laundry basket" } else { "Wardrobe" };
    println!("{} ({} items)", title, items.len());

    if items.is_empty() {
        println!("  Nothing here.");
        return Ok(());
    }

    for (category, members) in WardrobeStore::group_by_category(&items) {
        println!("\n{}", category);
        for item in members {
            println!("  {}  {}  added {}", item.id, item.description, item.created_at.format("%Y-%m-%d"));
        }
    }
    Ok(())
}

fn toggle_item(id: &str) -> Result<()> {
    let config = Config::load()?;
    let mut store = open_store(&config)?;
    if store.toggle_clean(id)? {
        let item = store.find(id).context("Item vanished after toggle")?;
        let state = if item.is_clean { "clean" } else { "in the laundry basket" };
        println!("{} is now {}.", item.description, state);
        println!("Laundry basket: {} items", store.count_dirty());
    } else {
        println!("No item with id {}.", id);
    }
    Ok(())
}

fn remove_item(id: &str) -> Result<()> {
    let config = Config::load()?;
    let mut store = open_store(&config)?;
    if store.remove(id)? {
        println!("Removed {}.", id);
    } else {
        println!("No item with id {}.", id);
    }
    Ok(())
}

async fn outfit(occasion: &str, location: Option<&str>) -> Result<()> {
    let config = Config::load()?;
    let store = open_store(&config)?;
    let occasion = Occasion::from_str(occasion)?;
    let location = location.unwrap_or(config.weather.location.as_str());
    if location.trim().is_empty() {
        anyhow::bail!("Location cannot be empty");
    }

    let client = GeminiClient::from_keyring()?;

    // Always refresh the weather before recommending
    let pb = spinner("Checking the weather...");
    let weather = stylist::fetch_weather(&client, &config.models.text, location).await;
    pb.finish_and_clear();
    println!("{}: {}°C, {}", weather.location, weather.temperature, weather.condition);

    let clean = store.view_by_cleanliness(true);
    let pb = spinner("Styling your outfit...");
    let recommendation =
        stylist::recommend_outfit(&client, &config.models.text, &weather, &clean, occasion).await;
    pb.finish_and_clear();

    println!("\n{}", recommendation.name);
    if !recommendation.reasoning.is_empty() {
        println!("{}", recommendation.reasoning);
    }
    for id in &recommendation.selected_ids {
        match store.find(id) {
            Some(item) => println!("  - {} ({})", item.description, item.category),
            None => println!("  - unknown item {}", id),
        }
    }
    Ok(())
}

async fn weather(location: Option<&str>) -> Result<()> {
    let config = Config::load()?;
    let location = location.unwrap_or(config.weather.location.as_str());
    if location.trim().is_empty() {
        anyhow::bail!("Location cannot be empty");
    }

    let client = GeminiClient::from_keyring()?;
    let pb = spinner("Checking the weather...");
    let snapshot = stylist::fetch_weather(&client, &config.models.text, location).await;
    pb.finish_and_clear();

    println!("{}: {}°C, {}", snapshot.location, snapshot.temperature, snapshot.condition);
    Ok(())
}

async fn tryon(photo: &Path, out: &Path, item_ids: &[String]) -> Result<()> {
    let config = Config::load()?;
    let store = open_store(&config)?;

    if item_ids.is_empty() {
        println!("Select at least one clean wardrobe item to try on.");
        return Ok(());
    }

    // Both preconditions are checked before any network call
    let user_image = imaging::encode_image_file(photo)?;
    let mut selected = Vec::new();
    for id in item_ids {
        match store.find(id) {
            Some(item) if item.is_clean => selected.push(item),
            Some(_) => println!("Skipping {}: it is in the laundry basket.", id),
            None => println!("Skipping {}: no such item.", id),
        }
    }
    if selected.is_empty() {
        println!("None of the selected items are available. Nothing to try on.");
        return Ok(());
    }

    let client = GeminiClient::from_keyring()?;
    let pb = spinner("Generating your try-on...");
    let result = stylist::synthesize_try_on(&client, &config.models.image, &user_image, &selected).await;
    pb.finish_and_clear();

    // Failure propagates: there is no placeholder for a missing composite
    let data_uri = result.context("Try-on generation failed, please try again")?;
    let (_, bytes) = imaging::decode_data_uri(&data_uri)?;
    std::fs::write(out, bytes)
        .with_context(|| format!("Failed to write {}", out.display()))?;
    println!("Try-on image written to {}.", out.display());
    Ok(())
}

async fn trends() -> Result<()> {
    let config = Config::load()?;
    let client = GeminiClient::from_keyring()?;
    let pb = spinner("Fetching the trend brief...");
    let brief = stylist::fetch_trend_brief(&client, &config.models.text, &config.weather.location).await;
    pb.finish_and_clear();
    println!("{}", brief);
    Ok(())
}

fn handle_config(
    set_api_key: Option<String>,
    show: bool,
    set_model: Option<Vec<String>>,
    set_location: Option<String>,
    reset: bool,
) -> Result<()> {
    let mut handled = false;

    if let Some(key) = set_api_key {
        config::set_api_key(&key)?;
        handled = true;
    }
    if let Some(args) = set_model {
        if args.len() != 2 {
            anyhow::bail!("--set-model needs a role and a model id");
        }
        config::set_model(&args[0], &args[1])?;
        handled = true;
    }
    if let Some(location) = set_location {
        config::set_location(&location)?;
        handled = true;
    }
    if reset {
        config::reset_config()?;
        handled = true;
    }
    if show || !handled {
        config::show_config()?;
    }
    Ok(())
}
