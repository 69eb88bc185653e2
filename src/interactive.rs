//! Interactive session mirroring the app's five-view navigation
//!
//! Five named views switched on directly, no transition rules. The prompt
//! carries a laundry badge, and the trend brief is fetched once at session
//! start.

use anyhow::Result;
use crossterm::style::Stylize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::Path;
use std::str::FromStr;

use crate::cli::spinner;
use crate::config::Config;
use crate::imaging;
use crate::stylist::{self, GeminiClient};
use crate::types::{ClothingItem, Occasion, OutfitRecommendation, WeatherSnapshot};
use crate::wardrobe::WardrobeStore;

/// The five views of the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    Wardrobe,
    Laundry,
    Outfit,
    TryOn,
    Trends,
}

impl View {
    const ALL: &'static [View] = &[View::Wardrobe, View::Laundry, View::Outfit, View::TryOn, View::Trends];

    fn name(&self) -> &'static str {
        match self {
            View::Wardrobe => "wardrobe",
            View::Laundry => "laundry",
            View::Outfit => "outfit",
            View::TryOn => "tryon",
            View::Trends => "trends",
        }
    }

    fn title(&self) -> &'static str {
        match self {
            View::Wardrobe => "Wardrobe",
            View::Laundry => "Laundry basket",
            View::Outfit => "Stylist",
            View::TryOn => "Virtual try-on",
            View::Trends => "Trends",
        }
    }

    fn parse(s: &str) -> Option<View> {
        View::ALL.iter().find(|v| v.name() == s).copied()
    }
}

/// Everything the session owns: the store plus transient view state
struct Session {
    store: WardrobeStore,
    config: Config,
    client: Option<GeminiClient>,
    view: View,
    weather: WeatherSnapshot,
    occasion: Occasion,
    outfit: Option<OutfitRecommendation>,
    trend_brief: Option<String>,
    user_photo: Option<String>,
    tryon_selection: Vec<String>,
}

pub async fn run() -> Result<()> {
    let config = Config::load()?;
    let store = WardrobeStore::load(config.wardrobe_path()?);

    let client = match GeminiClient::from_keyring() {
        Ok(client) => Some(client),
        Err(_) => {
            println!("No API key set. AI features are disabled until you run:");
            println!("  styleai config --set-api-key YOUR_KEY\n");
            None
        }
    };

    let location = config.weather.location.clone();
    let mut session = Session {
        store,
        config,
        client,
        view: View::Wardrobe,
        weather: WeatherSnapshot::offline(&location),
        occasion: Occasion::Casual,
        outfit: None,
        trend_brief: None,
        user_photo: None,
        tryon_selection: Vec::new(),
    };

    // Session-start fetches: trend brief once, plus an initial weather
    // reading for the stylist view
    if let Some(client) = session.client.clone() {
        let pb = spinner("Warming up...");
        session.trend_brief =
            Some(stylist::fetch_trend_brief(&client, &session.config.models.text, &location).await);
        session.weather = stylist::fetch_weather(&client, &session.config.models.text, &location).await;
        pb.finish_and_clear();
    }

    println!("{} v{}", "styleai".bold(), crate::VERSION);
    println!("Views: wardrobe, laundry, outfit, tryon, trends. Type 'help' for commands.\n");
    session.render();

    let mut editor = DefaultEditor::new()?;
    loop {
        let badge = match session.store.count_dirty() {
            0 => String::new(),
            n => format!(" [laundry:{}]", n),
        };
        let prompt = format!("styleai:{}{} > ", session.view.name(), badge);

        let line = match editor.readline(&prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };
        let line = line.trim().to_string();
        if line.is_empty() {
            session.render();
            continue;
        }
        let _ = editor.add_history_entry(&line);

        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((head, tail)) => (head, tail.trim()),
            None => (line.as_str(), ""),
        };

        match command {
            "exit" | "quit" => break,
            "help" => help(),
            "show" => session.render(),
            _ => {
                if let Some(view) = View::parse(command) {
                    session.view = view;
                    session.render();
                } else if let Err(e) = session.dispatch(command, rest).await {
                    println!("Error: {:#}", e);
                }
            }
        }
    }

    println!("Bye!");
    Ok(())
}

fn help() {
    println!("  wardrobe | laundry | outfit | tryon | trends   switch view");
    println!("  show                  redraw the current view");
    println!("  add <photo>           classify and store a new item");
    println!("  toggle <id>           move an item in/out of the laundry basket");
    println!("  remove <id>           delete an item");
    println!("  occasion <name>       set the outfit occasion (casual, office, date, ...)");
    println!("  location <city>       set the weather location for this session");
    println!("  generate              outfit view: recommend; tryon view: synthesize");
    println!("  select <id>           tryon view: toggle a garment selection");
    println!("  photo <file>          tryon view: set your photo");
    println!("  save <file>           tryon view: write the generated image");
    println!("  exit");
}

impl Session {
    fn client(&self) -> Result<&GeminiClient> {
        self.client
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("No API key set. Run 'styleai config --set-api-key YOUR_KEY'."))
    }

    async fn dispatch(&mut self, command: &str, rest: &str) -> Result<()> {
        match command {
            "add" => self.add(rest).await,
            "toggle" => self.toggle(rest),
            "remove" => self.remove(rest),
            "occasion" => self.set_occasion(rest),
            "location" => self.set_location(rest),
            "generate" => self.generate().await,
            "select" => self.select(rest),
            "photo" => self.set_photo(rest),
            "save" => self.save_tryon(rest),
            other => {
                println!("Unknown command '{}'. Type 'help'.", other);
                Ok(())
            }
        }
    }

    fn render(&self) {
        println!("\n{}", self.view.title().bold());
        match self.view {
            View::Wardrobe => self.render_items(true),
            View::Laundry => self.render_items(false),
            View::Outfit => self.render_outfit(),
            View::TryOn => self.render_tryon(),
            View::Trends => self.render_trends(),
        }
        println!();
    }

    fn render_items(&self, clean: bool) {
        let items = self.store.view_by_cleanliness(clean);
        println!("{} items", items.len());
        if items.is_empty() {
            println!("Nothing here.");
            return;
        }
        for (category, members) in WardrobeStore::group_by_category(&items) {
            println!("\n{}", category.as_str().dark_grey());
            for item in members {
                println!("  {}  {}", item.id, item.description);
            }
        }
    }

    fn render_outfit(&self) {
        println!(
            "{}: {}°C, {}",
            self.weather.location, self.weather.temperature, self.weather.condition
        );
        println!("Occasion: {}", self.occasion);
        match &self.outfit {
            Some(outfit) => {
                println!("\n{}", outfit.name.as_str().bold());
                println!("{}", outfit.reasoning);
                for id in &outfit.selected_ids {
                    match self.store.find(id) {
                        Some(item) => println!("  - {} ({})", item.description, item.category),
                        None => println!("  - unknown item {}", id),
                    }
                }
            }
            None => println!("No outfit yet. Type 'generate'."),
        }
    }

    fn render_tryon(&self) {
        match &self.user_photo {
            Some(_) => println!("Your photo: set"),
            None => println!("Your photo: not set (use 'photo <file>')"),
        }
        let clean = self.store.view_by_cleanliness(true);
        println!("Clean items ({}, 'select <id>' to toggle):", clean.len());
        for item in clean {
            let mark = if self.tryon_selection.contains(&item.id) { "[x]" } else { "[ ]" };
            println!("  {} {}  {}", mark, item.id, item.description);
        }
    }

    fn render_trends(&self) {
        match &self.trend_brief {
            Some(brief) => println!("{}", brief),
            None => println!("{}", stylist::TRENDS_FALLBACK),
        }
    }

    async fn add(&mut self, path: &str) -> Result<()> {
        if path.is_empty() {
            println!("Usage: add <photo>");
            return Ok(());
        }
        let image = imaging::encode_image_file(Path::new(path))?;
        let client = self.client()?.clone();
        let pb = spinner("Analyzing photo...");
        let classification = stylist::classify_item(&client, &self.config.models.text, &image).await;
        pb.finish_and_clear();

        let item = ClothingItem::new(image, classification.category, classification.description);
        println!("Added {} ({}), id {}", item.description, item.category, item.id);
        self.store.add(item)?;
        Ok(())
    }

    fn toggle(&mut self, id: &str) -> Result<()> {
        if self.store.toggle_clean(id)? {
            println!("Laundry basket now holds {} items.", self.store.count_dirty());
        } else {
            println!("No item with id {}.", id);
        }
        Ok(())
    }

    fn remove(&mut self, id: &str) -> Result<()> {
        if self.store.remove(id)? {
            self.tryon_selection.retain(|selected| selected != id);
            println!("Removed {}.", id);
        } else {
            println!("No item with id {}.", id);
        }
        Ok(())
    }

    fn set_occasion(&mut self, name: &str) -> Result<()> {
        match Occasion::from_str(name) {
            Ok(occasion) => {
                self.occasion = occasion;
                println!("Occasion set to {}.", occasion);
            }
            Err(e) => println!("{}", e),
        }
        Ok(())
    }

    fn set_location(&mut self, location: &str) -> Result<()> {
        if location.trim().is_empty() {
            println!("Usage: location <city>");
            return Ok(());
        }
        self.weather.location = location.trim().to_string();
        println!("Weather location set to {}.", self.weather.location);
        Ok(())
    }

    async fn generate(&mut self) -> Result<()> {
        match self.view {
            View::Outfit => self.generate_outfit().await,
            View::TryOn => self.generate_tryon().await,
            _ => {
                println!("'generate' works in the outfit and tryon views.");
                Ok(())
            }
        }
    }

    async fn generate_outfit(&mut self) -> Result<()> {
        let client = self.client()?.clone();
        let location = self.weather.location.clone();

        let pb = spinner("Checking the weather...");
        self.weather = stylist::fetch_weather(&client, &self.config.models.text, &location).await;
        pb.finish_and_clear();

        let clean = self.store.view_by_cleanliness(true);
        let pb = spinner("Styling your outfit...");
        let recommendation = stylist::recommend_outfit(
            &client,
            &self.config.models.text,
            &self.weather,
            &clean,
            self.occasion,
        )
        .await;
        pb.finish_and_clear();

        self.outfit = Some(recommendation);
        self.render();
        Ok(())
    }

    async fn generate_tryon(&mut self) -> Result<()> {
        // Both inputs are required before any network call
        let Some(user_photo) = self.user_photo.clone() else {
            println!("Set your photo first: photo <file>");
            return Ok(());
        };
        let selected: Vec<&ClothingItem> = self
            .tryon_selection
            .iter()
            .filter_map(|id| self.store.find(id))
            .filter(|item| item.is_clean)
            .collect();
        if selected.is_empty() {
            println!("Select at least one clean item first: select <id>");
            return Ok(());
        }

        let client = self.client()?.clone();
        let pb = spinner("Generating your try-on...");
        let result =
            stylist::synthesize_try_on(&client, &self.config.models.image, &user_photo, &selected).await;
        pb.finish_and_clear();

        match result {
            Ok(data_uri) => {
                let out = Path::new("tryon.png");
                let (_, bytes) = imaging::decode_data_uri(&data_uri)?;
                std::fs::write(out, bytes)?;
                println!("Try-on image written to {} ('save <file>' for a copy elsewhere).", out.display());
                self.user_photo = Some(user_photo);
            }
            Err(e) => println!("Try-on generation failed: {:#}. Please try again.", e),
        }
        Ok(())
    }

    fn select(&mut self, id: &str) -> Result<()> {
        match self.store.find(id) {
            Some(item) if item.is_clean => {
                if let Some(pos) = self.tryon_selection.iter().position(|s| s == id) {
                    self.tryon_selection.remove(pos);
                    println!("Deselected {}.", id);
                } else {
                    self.tryon_selection.push(id.to_string());
                    println!("Selected {}.", id);
                }
            }
            Some(_) => println!("{} is in the laundry basket.", id),
            None => println!("No item with id {}.", id),
        }
        Ok(())
    }

    fn set_photo(&mut self, path: &str) -> Result<()> {
        if path.is_empty() {
            println!("Usage: photo <file>");
            return Ok(());
        }
        self.user_photo = Some(imaging::encode_image_file(Path::new(path))?);
        println!("Photo set.");
        Ok(())
    }

    fn save_tryon(&self, path: &str) -> Result<()> {
        if path.is_empty() {
            println!("Usage: save <file>");
            return Ok(());
        }
        let source = Path::new("tryon.png");
        if !source.exists() {
            println!("No generated try-on yet. Use 'generate' in the tryon view first.");
            return Ok(());
        }
        std::fs::copy(source, path)?;
        println!("Saved to {}.", path);
        Ok(())
    }
}
