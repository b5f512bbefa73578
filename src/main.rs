//! Memoria - Entry Point
//!
//! Loads a localized catalog and prints each item's description rendered
//! at a level (memories) or quality percentage (essences).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use memoria::config::{load_settings, save_settings, settings_path};
use memoria::data::{Achievements, Catalog, KeywordCategory, Keywords, TravelerNames, BASE_LANGUAGE};
use memoria::{DescriptionEngine, Item, ItemKind};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    Memory,
    Essence,
}

impl From<KindArg> for ItemKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Memory => ItemKind::Memory,
            KindArg::Essence => ItemKind::Essence,
        }
    }
}

/// Render memory and essence descriptions at a given level or quality
#[derive(Parser)]
#[command(name = "memoria")]
#[command(version)]
struct Cli {
    /// Which catalog to show
    kind: KindArg,

    /// Level (memories) or quality percentage (essences)
    #[arg(short, long)]
    scale: Option<f64>,

    /// Language code, e.g. fr-FR
    #[arg(short, long)]
    lang: Option<String>,

    /// Data directory containing locales/
    #[arg(long)]
    data: Option<PathBuf>,

    /// Sprite directory or URL prefix used in image paths
    #[arg(long)]
    sprites: Option<String>,

    /// Settings file (RON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Only show the item with this ID
    #[arg(long)]
    id: Option<String>,

    /// Write the effective settings back to the settings file
    #[arg(long)]
    save_settings: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config_path = cli.config.clone().unwrap_or_else(settings_path);
    let mut settings = load_settings(&config_path);

    if let Some(lang) = cli.lang {
        settings.language = lang;
    }
    if let Some(data) = cli.data {
        settings.data_dir = data;
    }
    if let Some(sprites) = cli.sprites {
        settings.sprite_dir = sprites;
    }

    let kind = ItemKind::from(cli.kind);
    let scaling = cli.scale.unwrap_or_else(|| settings.scaling_for(kind));
    match kind {
        ItemKind::Memory => settings.memory_level = scaling,
        ItemKind::Essence => settings.essence_quality = scaling,
    }

    if cli.save_settings {
        save_settings(&settings, &config_path)
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("saving settings to {:?}", config_path))?;
    }

    let catalog = Catalog::load(&settings.data_dir, &settings.language, kind)
        .with_context(|| format!("loading {} catalog", kind.name()))?;
    let keywords = Keywords::load(&settings.keywords_path());
    let travelers = TravelerNames::load(&settings.travelers_path());
    let achievements = Achievements::load(&settings.achievements_path());
    let engine = DescriptionEngine::new(settings.sprite_dir.as_str());

    log::info!(
        "Rendering {} {} items at {}",
        catalog.len(),
        kind.name(),
        scaling
    );

    let items: Vec<&Item> = match cli.id.as_deref() {
        Some(id) => vec![catalog
            .get(id)
            .with_context(|| format!("no {} with id {}", kind.name(), id))?],
        None => catalog.in_display_order(),
    };

    for item in items {
        println!("{}", header(item, &settings.language, &keywords, &travelers));
        println!("  {}", engine.render_or_plain(item, scaling, kind));
        for line in details(item, &achievements) {
            println!("  {}", line);
        }
    }

    Ok(())
}

/// One-line card header: name, English name, rarity, traveler, tags, cooldown
fn header(item: &Item, language: &str, keywords: &Keywords, travelers: &TravelerNames) -> String {
    let mut line = item.name.clone();
    if language != BASE_LANGUAGE && !item.english_name.is_empty() {
        line.push_str(&format!(" ({})", item.english_name));
    }

    let rarity = keywords.display_name(item.rarity.name(), KeywordCategory::Rarities, language);
    line.push_str(&format!(" [{}", rarity));
    if let Some(traveler) = item.traveler.as_deref().filter(|_| item.rarity.is_memory_only()) {
        line.push_str(&format!(" - {}", travelers.display_name(traveler, language)));
    }
    line.push(']');

    if !item.tags.is_empty() {
        let tags: Vec<&str> = item.tags.iter().map(|t| keywords.tag_name(t, language)).collect();
        line.push_str(&format!(" {{{}}}", tags.join(", ")));
    }
    if let Some(cooldown) = item.cooldown() {
        line.push_str(&format!(" {}s", cooldown));
    }

    line
}

/// Lines printed under the description: key information, then unlock condition
fn details(item: &Item, achievements: &Achievements) -> Vec<String> {
    let mut lines = Vec::new();

    let infos: Vec<String> = item
        .key_informations()
        .map(|info| format!("{}: {}", info.label, info.value))
        .collect();
    if !infos.is_empty() {
        lines.push(infos.join(" | "));
    }

    if let Some((name, description)) = achievements.unlock_condition(item) {
        lines.push(format!("Unlock: {} ({})", name, description));
    }

    lines
}
