//! Build planner CLI
//!
//! Usage:
//!   planner catalog                                  # List heroes, skills and talent pages
//!   planner calc --hero rehan --trait berserker_rage # Calculate damage
//!   planner talents --alloc warrior_might:physical_power
//!   planner save --hero iris --skill fireball        # Save a configuration
//!   planner load                                     # Show the saved configuration
//!   planner clear-cache                              # Drop cached catalog sections

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use planner_core::config::load_constants;
use planner_core::store::TtlCache;
use planner_core::types::EquipmentField;
use planner_core::{
    load_catalog, load_catalog_cached, Attribute, BuiltinProvider, CatalogLoad, DamageResult,
    DirectoryProvider, Element, FileStore, Planner, PlannerConstants, SkillType,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "planner")]
#[command(about = "Plan hero builds and estimate their damage", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory holding heroes.toml, skills.toml, talents.toml and defaults.toml
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// JSON file backing saved configurations and the catalog cache
    #[arg(long, global = true, default_value = "planner-store.json")]
    store: PathBuf,

    /// TOML file overriding the calculation and talent constants
    #[arg(long, global = true)]
    constants: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List heroes, skills and talent pages
    Catalog,

    /// Calculate damage for a configuration
    Calc {
        #[command(flatten)]
        build: BuildArgs,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Allocate talent points and print the resulting bonuses
    Talents {
        /// Page to add to the build (repeatable)
        #[arg(long = "page")]
        pages: Vec<String>,

        /// One point as PAGE:NODE (repeatable, applied in order)
        #[arg(long = "alloc")]
        allocations: Vec<String>,
    },

    /// Save a configuration to the store
    Save {
        #[command(flatten)]
        build: BuildArgs,
    },

    /// Show the saved configuration and its damage
    Load,

    /// Remove cached catalog sections from the store
    ClearCache,
}

/// Configuration edits applied on top of the defaults
#[derive(Args, Debug, Default)]
struct BuildArgs {
    #[arg(long)]
    hero: Option<String>,

    #[arg(long)]
    skill: Option<String>,

    #[arg(long)]
    level: Option<u32>,

    /// Hero trait to select, at its unlock level (repeatable)
    #[arg(long = "trait")]
    traits: Vec<String>,

    #[arg(long)]
    strength: Option<String>,
    #[arg(long)]
    dexterity: Option<String>,
    #[arg(long)]
    intelligence: Option<String>,
    #[arg(long)]
    vitality: Option<String>,

    #[arg(long)]
    weapon_min: Option<String>,
    #[arg(long)]
    weapon_max: Option<String>,
    #[arg(long)]
    attack_speed: Option<String>,
    #[arg(long)]
    crit_chance: Option<String>,
    #[arg(long)]
    crit_multiplier: Option<String>,

    #[arg(long)]
    fire: Option<String>,
    #[arg(long)]
    lightning: Option<String>,
    #[arg(long)]
    cold: Option<String>,
    #[arg(long)]
    poison: Option<String>,
}

impl BuildArgs {
    /// Apply the edits; raw numbers go through the same coercion as form input
    fn apply(&self, planner: &mut Planner) -> Result<()> {
        if let Some(hero) = &self.hero {
            planner.select_hero(hero)?;
        }
        if let Some(skill) = &self.skill {
            planner.select_skill(skill)?;
        }
        if let Some(level) = self.level {
            planner.set_skill_level(level);
        }

        for trait_id in &self.traits {
            let hero_id = planner
                .config()
                .hero_id
                .clone()
                .context("no hero selected")?;
            let level = planner
                .catalog()
                .hero_trait(&hero_id, trait_id)
                .map(|t| t.unlock_level)
                .with_context(|| format!("hero '{}' has no trait '{}'", hero_id, trait_id))?;
            planner.select_trait(level, trait_id)?;
        }

        let stats = [
            (Attribute::Strength, &self.strength),
            (Attribute::Dexterity, &self.dexterity),
            (Attribute::Intelligence, &self.intelligence),
            (Attribute::Vitality, &self.vitality),
        ];
        for (attribute, raw) in stats {
            if let Some(raw) = raw {
                planner.set_stat_input(attribute, raw);
            }
        }

        let equipment = [
            (EquipmentField::WeaponMin, &self.weapon_min),
            (EquipmentField::WeaponMax, &self.weapon_max),
            (EquipmentField::AttackSpeed, &self.attack_speed),
            (EquipmentField::CritChance, &self.crit_chance),
            (EquipmentField::CritMultiplier, &self.crit_multiplier),
            (EquipmentField::Elemental(Element::Fire), &self.fire),
            (EquipmentField::Elemental(Element::Lightning), &self.lightning),
            (EquipmentField::Elemental(Element::Cold), &self.cold),
            (EquipmentField::Elemental(Element::Poison), &self.poison),
        ];
        for (field, raw) in equipment {
            if let Some(raw) = raw {
                planner.set_equipment_input(field, raw);
            }
        }

        Ok(())
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Command::Catalog => {
            let planner = open_planner(&cli)?;
            print_catalog(&planner);
        }
        Command::Calc { build, json } => {
            let mut planner = open_planner(&cli)?;
            build.apply(&mut planner)?;
            let result = planner.calculate()?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_result(&planner, &result);
            }
        }
        Command::Talents { pages, allocations } => {
            let mut planner = open_planner(&cli)?;
            run_talents(&mut planner, pages, allocations)?;
        }
        Command::Save { build } => {
            let mut planner = open_planner(&cli)?;
            build.apply(&mut planner)?;
            let mut store = FileStore::new(&cli.store);
            let saved = planner.save(&mut store)?;
            println!(
                "Saved {} / {} (level {}) to {}",
                saved.hero_id,
                saved.skill_id,
                saved.skill_level,
                cli.store.display()
            );
        }
        Command::Load => {
            let mut planner = open_planner(&cli)?;
            let store = FileStore::new(&cli.store);
            if !planner.load(&store)? {
                println!("No saved configuration in {}", cli.store.display());
                return Ok(());
            }
            let result = planner.calculate()?;
            print_result(&planner, &result);
        }
        Command::ClearCache => {
            let mut cache = TtlCache::new(FileStore::new(&cli.store));
            let removed = cache.clear()?;
            println!("Removed {} cached entries", removed);
        }
    }

    Ok(())
}

/// Load constants and the catalog, then build a planner
fn open_planner(cli: &Cli) -> Result<Planner> {
    tracing::debug!(data = ?cli.data, store = %cli.store.display(), "opening planner");
    let constants = match &cli.constants {
        Some(path) => load_constants(path)
            .with_context(|| format!("loading constants from {}", path.display()))?,
        None => PlannerConstants::default(),
    };

    let load: CatalogLoad = match &cli.data {
        Some(dir) => {
            let provider = DirectoryProvider::new(dir);
            let mut cache = TtlCache::new(FileStore::new(&cli.store));
            load_catalog_cached(&provider, &mut cache)
        }
        None => load_catalog(&BuiltinProvider),
    };

    if load.all_failed() {
        eprintln!("Warning: catalog data could not be loaded; using built-in data");
    } else if load.used_fallback() {
        let sections: Vec<&str> = load.fallbacks.iter().map(|s| s.key()).collect();
        eprintln!("Warning: using built-in data for {}", sections.join(", "));
    }

    Ok(Planner::with_constants(load, constants))
}

fn print_catalog(planner: &Planner) {
    let catalog = planner.catalog();

    println!("Heroes:");
    for hero in catalog.heroes() {
        println!("  {} {} ({}) - {}", hero.icon, hero.name, hero.id, hero.desc);
        for t in &hero.traits {
            let marker = if t.is_default { " [default]" } else { "" };
            println!("    L{:<3} {} ({}){}", t.unlock_level, t.name, t.id, marker);
        }
    }

    for kind in SkillType::all() {
        println!("\n{} skills:", kind.name());
        for skill in catalog.skills_of(*kind) {
            println!("  {} ({}) [{}]", skill.name, skill.id, skill.tags.join(", "));
        }
    }

    println!("\nTalent pages:");
    for book in catalog.talent_books() {
        println!("  {} {}", book.icon, book.name);
        for page in &book.pages {
            println!(
                "    {} ({}) - {} nodes",
                page.name,
                page.id,
                page.talent_tree.len()
            );
        }
    }
}

fn print_result(planner: &Planner, result: &DamageResult) {
    let config = planner.config();
    println!(
        "{} / {} (level {})",
        config.hero_id.as_deref().unwrap_or("-"),
        config.skill_id.as_deref().unwrap_or("-"),
        config.skill_level
    );
    println!("Traits: {}", config.traits.selected_ids().join(", "));
    println!("{}", result.summary());

    let dist = &result.damage_distribution;
    println!(
        "Distribution: physical {}%, fire {}%, lightning {}%, cold {}%, poison {}%",
        dist.physical, dist.fire, dist.lightning, dist.cold, dist.poison
    );
}

fn run_talents(planner: &mut Planner, pages: &[String], allocations: &[String]) -> Result<()> {
    for page in pages {
        planner.add_talent_page(page)?;
    }

    for entry in allocations {
        let (page, node) = parse_allocation(entry)?;
        if !planner.talent_build().contains(page) {
            planner.add_talent_page(page)?;
        }
        let open = planner.talents().current().map(|c| c.page_id.as_str());
        if open != Some(page) {
            planner.open_talent_page(page)?;
        }
        let outcome = planner.allocate_talent(node)?;
        if !outcome.cascaded.is_empty() {
            println!("  {} also maxed {}", node, outcome.cascaded.join(", "));
        }
    }

    if let Some(current) = planner.talents().current() {
        println!("Open page {}:", current.page_id);
        for node in &current.talent_tree {
            let marker = if node.is_maxed() {
                " (max)"
            } else if !planner.talents().can_allocate(&node.id) {
                " (locked)"
            } else {
                ""
            };
            println!(
                "  {:<16} {}/{}{}",
                node.id, node.current_points, node.max_points, marker
            );
        }
    }

    let summary = planner.talent_summary();
    for page in &summary.pages {
        println!("{}: {} points", page.page_id, page.points);
        for (stat, amount) in page.bonuses.entries() {
            println!("  {}: {}", stat.name(), amount);
        }
    }
    println!("Total:");
    for (stat, amount) in summary.total.entries() {
        println!("  {}: {}", stat.name(), amount);
    }

    let progress = planner.talents().checkpoint_progress();
    if !progress.is_empty() {
        let ladder: Vec<String> = progress
            .iter()
            .map(|c| format!("{}{}", c.points, if c.reached { "*" } else { "" }))
            .collect();
        println!("Checkpoints: {}", ladder.join(" "));
    }

    Ok(())
}

/// Split "page:node"
fn parse_allocation(entry: &str) -> Result<(&str, &str)> {
    match entry.split_once(':') {
        Some((page, node)) if !page.is_empty() && !node.is_empty() => Ok((page, node)),
        _ => anyhow::bail!("expected PAGE:NODE, got '{}'", entry),
    }
}
