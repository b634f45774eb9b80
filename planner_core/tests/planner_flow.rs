//! Integration test: Load catalog -> Configure hero -> Calculate -> Build -> Save
//!
//! This test walks a full planning session through the public API.

use planner_core::prelude::*;
use planner_core::store::{TtlCache, CACHE_PREFIX};
use planner_core::talent::TalentError;
use planner_core::{load_catalog_cached, CatalogLoad, DamageResult, PlannerError};
use std::path::PathBuf;

/// Helper to print a separator
fn separator(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("  {}", title);
    println!("{}\n", "=".repeat(60));
}

/// Helper to print a damage result
fn print_result(label: &str, result: &DamageResult) {
    println!("  {}: {}", label, result.summary());
    let dist = &result.damage_distribution;
    println!(
        "    Distribution: physical {}%, fire {}%, cold {}%, lightning {}%, poison {}%",
        dist.physical, dist.fire, dist.cold, dist.lightning, dist.poison
    );
}

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("config")
}

fn load_from_directory(cache_path: PathBuf) -> CatalogLoad {
    let provider = DirectoryProvider::new(data_dir());
    let mut cache = TtlCache::new(FileStore::new(cache_path));
    load_catalog_cached(&provider, &mut cache)
}

#[test]
fn test_full_planning_session() {
    let dir = tempfile::tempdir().unwrap();

    // ========================================================================
    // STEP 1: Load the catalog from the data directory, through the cache
    // ========================================================================
    separator("STEP 1: Load catalog");

    let load = load_from_directory(dir.path().join("cache.json"));
    assert!(!load.used_fallback(), "fallbacks: {:?}", load.fallbacks);
    assert!(load.catalog.validate().is_empty());
    println!("  Heroes: {}", load.catalog.heroes().len());
    println!("  Skills: {}", load.catalog.skills().len());
    println!("  Talent books: {}", load.catalog.talent_books().len());

    let cache_keys = FileStore::new(dir.path().join("cache.json")).keys().unwrap();
    assert!(!cache_keys.is_empty());
    assert!(cache_keys.iter().all(|k| k.starts_with(CACHE_PREFIX)));
    println!("  Cached sections: {}", cache_keys.len());

    let mut planner = Planner::new(load);

    // ========================================================================
    // STEP 2: Configure the hero and traits
    // ========================================================================
    separator("STEP 2: Configure hero");

    planner.select_hero("rehan").unwrap();
    planner.select_trait(45, "berserker_rage").unwrap();
    for group in planner.trait_groups() {
        let names: Vec<&str> = group.traits.iter().map(|t| t.id.as_str()).collect();
        println!(
            "  Level {:>2}: {:?} -> {}",
            group.level,
            names,
            group.selected.unwrap_or("-")
        );
    }
    assert_eq!(
        planner.config().traits.selected_ids(),
        vec!["rage", "berserker_rage"]
    );

    // ========================================================================
    // STEP 3: Calculate damage
    // ========================================================================
    separator("STEP 3: Calculate damage");

    let result = planner.calculate().unwrap();
    print_result("Rage + Berserker Rage", &result);
    // 150 * 1.15 * 1.25 = 215.625
    assert_eq!(result.total, 216);
    assert_eq!(result.dps, 281);
    assert_eq!(result.physical, 151);
    assert_eq!(result.elemental, 65);
    assert!((result.crit_chance - 23.0).abs() < 1e-9);
    assert_eq!(result.damage_distribution.sum(), 100);

    planner.set_equipment_input(EquipmentField::Elemental(Element::Fire), "30");
    let with_fire = planner.calculate().unwrap();
    print_result("With 30 fire", &with_fire);
    assert_eq!(with_fire.total, 246);
    assert!(with_fire.damage_distribution.fire > 0);

    planner.reset_stats_and_equipment();
    assert_eq!(planner.calculate().unwrap(), result);

    // ========================================================================
    // STEP 4: Fill skill slots
    // ========================================================================
    separator("STEP 4: Skill build");

    let whirlwind = planner.catalog().skill("whirlwind").unwrap().clone();
    let empower = planner.catalog().skill("empower").unwrap().clone();
    let iron_skin = planner.catalog().skill("iron_skin").unwrap().clone();

    let build = planner.skill_build_mut();
    build.select_main(SlotKind::Active, 0, &whirlwind).unwrap();
    build.select_support(SlotKind::Active, 0, 0, &empower).unwrap();
    build.select_main(SlotKind::Passive, 0, &iron_skin).unwrap();
    assert!(build.select_main(SlotKind::Passive, 1, &iron_skin).is_err());
    assert!(build.select_support(SlotKind::Active, 0, 1, &empower).is_err());

    let slot = planner.skill_build().slot(SlotKind::Active, 0).unwrap();
    println!(
        "  Active 0: {:?} + {:?}",
        slot.main_skill.as_ref().map(|s| &s.id),
        slot.support_ids()
    );
    assert_eq!(slot.support_ids(), vec!["empower"]);

    // ========================================================================
    // STEP 5: Choose talent pages
    // ========================================================================
    separator("STEP 5: Talent build");

    for page in ["warrior_might", "iron_bastion", "blade_dancer", "arcane_surge"] {
        planner.add_talent_page(page).unwrap();
    }
    assert!(planner.talent_build().is_complete());
    assert!(matches!(
        planner.add_talent_page("elemental_fury"),
        Err(PlannerError::Talent(TalentError::BuildFull(4)))
    ));
    println!("  Pages: {}", planner.talent_build().selected_pages().len());

    // ========================================================================
    // STEP 6: Allocate talent points
    // ========================================================================
    separator("STEP 6: Allocate warrior_might");

    planner.open_talent_page("warrior_might").unwrap();
    for node in ["physical_power", "brute_force"] {
        for _ in 0..3 {
            planner.allocate_talent(node).unwrap();
        }
    }

    // Battle Trance waits on every fillable neighbour
    assert!(matches!(
        planner.allocate_talent("battle_trance"),
        Err(PlannerError::Talent(TalentError::ConnectionsNotMaxed { .. }))
    ));
    for _ in 0..3 {
        planner.allocate_talent("attack_speed").unwrap();
    }
    for _ in 0..3 {
        planner.allocate_talent("battle_trance").unwrap();
    }
    let outcome = planner.allocate_talent("titan_grip").unwrap();
    assert_eq!(outcome.points, 1);

    assert_eq!(planner.talents().total_allocated_points(), 13);
    let reached: Vec<u32> = planner
        .talents()
        .checkpoint_progress()
        .iter()
        .filter(|c| c.reached)
        .map(|c| c.points)
        .collect();
    assert_eq!(reached, vec![0, 3, 6, 9, 12]);

    // Switching pages keeps progress
    planner.open_talent_page("iron_bastion").unwrap();
    planner.allocate_talent("thick_skin").unwrap();
    planner.open_talent_page("warrior_might").unwrap();
    assert_eq!(planner.talents().total_allocated_points(), 13);

    let summary = planner.talent_summary();
    for page in &summary.pages {
        println!("  {}: {} points", page.page_id, page.points);
        for (stat, amount) in page.bonuses.entries() {
            println!("    {}: {}", stat.name(), amount);
        }
    }
    assert_eq!(summary.pages[0].points, 13);
    assert_eq!(summary.pages[1].points, 1);
    assert!((summary.total.get(BonusStat::PhysicalDamage) - 35.0).abs() < 1e-9);
    assert!((summary.total.get(BonusStat::Strength) - 15.0).abs() < 1e-9);
    assert!((summary.total.get(BonusStat::CritChance) - 6.0).abs() < 1e-9);
    assert!((summary.total.get(BonusStat::Vitality) - 5.0).abs() < 1e-9);

    // Talent points stay out of the damage numbers
    assert_eq!(planner.calculate().unwrap(), result);

    // ========================================================================
    // STEP 7: Save and restore
    // ========================================================================
    separator("STEP 7: Save and load");

    let mut store = FileStore::new(dir.path().join("planner.json"));
    let saved = planner.save(&mut store).unwrap();
    println!("  Saved {} at {}", saved.hero_id, saved.timestamp);

    let mut restored = Planner::new(load_from_directory(dir.path().join("cache.json")));
    restored.select_hero("iris").unwrap();
    assert!(restored.load(&store).unwrap());
    assert_eq!(restored.config(), planner.config());
    assert_eq!(restored.calculate().unwrap(), result);

    separator("Session complete");
}

#[test]
fn test_missing_directory_falls_back_to_builtin() {
    let provider = DirectoryProvider::new("/nonexistent/planner-data");
    let load = load_catalog(&provider);
    assert!(load.all_failed());

    let planner = Planner::new(load);
    let result = planner.calculate().unwrap();
    print_result("Fallback", &result);
    assert_eq!(result.total, 173);
}
