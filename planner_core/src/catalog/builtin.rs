//! Embedded catalog data with hard-coded fallbacks

use super::{Hero, HeroTrait, Skill, SkillType};
use crate::config::{parse_toml, ConfigError};
use crate::talent::{BonusStat, NodeTier, TalentBook, TalentNode, TalentPage};
use crate::types::{CharacterStats, ElementalDamage, EquipmentStats, WeaponDamage};
use serde::Deserialize;

#[derive(Deserialize)]
struct HeroFile {
    #[serde(default)]
    heroes: Vec<Hero>,
}

#[derive(Deserialize)]
struct SkillFile {
    #[serde(default)]
    skills: Vec<Skill>,
}

#[derive(Deserialize)]
struct TalentFile {
    #[serde(default)]
    books: Vec<TalentBook>,
}

#[derive(Deserialize)]
struct DefaultsFile {
    stats: CharacterStats,
    equipment: EquipmentStats,
}

/// Parse a heroes file
pub fn parse_heroes(content: &str) -> Result<Vec<Hero>, ConfigError> {
    let file: HeroFile = parse_toml(content)?;
    Ok(file.heroes)
}

/// Parse a skills file, keeping one skill type
pub fn parse_skills(content: &str, kind: SkillType) -> Result<Vec<Skill>, ConfigError> {
    let file: SkillFile = parse_toml(content)?;
    Ok(file
        .skills
        .into_iter()
        .filter(|s| s.skill_type == kind)
        .collect())
}

/// Parse a talents file
pub fn parse_talent_books(content: &str) -> Result<Vec<TalentBook>, ConfigError> {
    let file: TalentFile = parse_toml(content)?;
    Ok(file.books)
}

/// Parse a defaults file
pub fn parse_defaults(content: &str) -> Result<(CharacterStats, EquipmentStats), ConfigError> {
    let file: DefaultsFile = parse_toml(content)?;
    Ok((file.stats, file.equipment))
}

const HEROES_TOML: &str = include_str!("../../config/heroes.toml");
const SKILLS_TOML: &str = include_str!("../../config/skills.toml");
const TALENTS_TOML: &str = include_str!("../../config/talents.toml");
const DEFAULTS_TOML: &str = include_str!("../../config/defaults.toml");

/// Get default heroes
pub fn heroes() -> Vec<Hero> {
    parse_heroes(HEROES_TOML).unwrap_or_else(|_| vec![fallback_hero()])
}

/// Get default skills of one type
pub fn skills(kind: SkillType) -> Vec<Skill> {
    parse_skills(SKILLS_TOML, kind).unwrap_or_else(|_| fallback_skills(kind))
}

/// Get default talent books
pub fn talent_books() -> Vec<TalentBook> {
    parse_talent_books(TALENTS_TOML).unwrap_or_else(|_| vec![fallback_book()])
}

/// Get default character stats
pub fn default_stats() -> CharacterStats {
    parse_defaults(DEFAULTS_TOML)
        .map(|(stats, _)| stats)
        .unwrap_or_else(|_| CharacterStats::new(100, 50, 50, 80))
}

/// Get default equipment
pub fn default_equipment() -> EquipmentStats {
    parse_defaults(DEFAULTS_TOML)
        .map(|(_, equipment)| equipment)
        .unwrap_or_else(|_| fallback_equipment())
}

fn fallback_hero() -> Hero {
    Hero {
        id: "rehan".to_string(),
        name: "Rehan".to_string(),
        icon: "⚔️".to_string(),
        desc: "Melee / Warrior".to_string(),
        base_stats: Some(CharacterStats::new(120, 60, 40, 100)),
        traits: vec![
            HeroTrait {
                id: "rage".to_string(),
                name: "Rage".to_string(),
                desc: "Attacks build rage, raising damage and attack speed".to_string(),
                icon: "😡".to_string(),
                unlock_level: 1,
                is_default: true,
            },
            HeroTrait {
                id: "berserker_rage".to_string(),
                name: "Berserker Rage".to_string(),
                desc: "Deals more damage the lower your life".to_string(),
                icon: "💢".to_string(),
                unlock_level: 45,
                is_default: false,
            },
        ],
    }
}

fn fallback_skills(kind: SkillType) -> Vec<Skill> {
    match kind {
        SkillType::Active => {
            let mut whirlwind = Skill::new("whirlwind", "Whirlwind", SkillType::Active);
            whirlwind.tags = vec!["attack".into(), "physical".into(), "area".into()];
            whirlwind.mana_cost = Some("15".to_string());
            whirlwind.cooldown = Some("2".to_string());
            vec![whirlwind]
        }
        SkillType::Passive => vec![Skill::new("iron_skin", "Iron Skin", SkillType::Passive)],
        SkillType::Support => vec![Skill::new("empower", "Empower", SkillType::Support)],
    }
}

fn fallback_book() -> TalentBook {
    let mut node = TalentNode::new("physical_power", NodeTier::Minor, 0)
        .with_effect(BonusStat::PhysicalDamage, 5.0, true);
    node.name = "Physical Power".to_string();
    node.description = "+5% physical damage per point".to_string();

    TalentBook {
        id: "warrior_book".to_string(),
        name: "Warrior's Codex".to_string(),
        icon: "⚔️".to_string(),
        description: String::new(),
        pages: vec![TalentPage {
            id: "warrior_might".to_string(),
            name: "Warrior's Might".to_string(),
            icon: "💪".to_string(),
            description: String::new(),
            starting_node: "physical_power".to_string(),
            talent_tree: vec![node],
        }],
    }
}

fn fallback_equipment() -> EquipmentStats {
    EquipmentStats {
        weapon_damage: WeaponDamage::new(50, 100),
        attack_speed: 1.2,
        crit_chance: 5.0,
        crit_multiplier: 150,
        elemental_damage: Some(ElementalDamage::default()),
        weapon_type: "sword".to_string(),
    }
}
