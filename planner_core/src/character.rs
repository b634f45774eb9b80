//! CharacterConfiguration - the user's editable build state

use crate::catalog::{Catalog, Hero, TraitSelections};
use crate::damage::CalculationParams;
use crate::planner::PlannerError;
use crate::store::SavedConfig;
use crate::types::{Attribute, CharacterStats, EquipmentField, EquipmentStats};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything the damage calculation reads, plus the trait picks behind it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterConfiguration {
    pub hero_id: Option<String>,
    pub skill_id: Option<String>,
    pub skill_level: u32,
    /// Absent until defaults are loaded
    pub stats: Option<CharacterStats>,
    /// Absent until defaults are loaded
    pub equipment: Option<EquipmentStats>,
    pub traits: TraitSelections,
}

impl Default for CharacterConfiguration {
    fn default() -> Self {
        CharacterConfiguration {
            hero_id: None,
            skill_id: None,
            skill_level: 1,
            stats: None,
            equipment: None,
            traits: TraitSelections::new(),
        }
    }
}

impl CharacterConfiguration {
    /// Switch hero; earlier trait picks are dropped for the hero's level-1 default
    pub fn set_hero(&mut self, hero: &Hero) {
        self.hero_id = Some(hero.id.clone());
        self.traits = TraitSelections::for_hero(hero);
    }

    /// Apply raw form input to a stat; no-op until stats exist
    pub fn set_stat_input(&mut self, attribute: Attribute, raw: &str) {
        if let Some(stats) = &mut self.stats {
            stats.set_from_input(attribute, raw);
        }
    }

    /// Apply raw form input to an equipment field; no-op until equipment exists
    pub fn set_equipment_input(&mut self, field: EquipmentField, raw: &str) {
        if let Some(equipment) = &mut self.equipment {
            equipment.set_from_input(field, raw);
        }
    }

    /// Calculation inputs, or the first missing precondition
    pub fn snapshot(&self) -> Result<CalculationParams, PlannerError> {
        let hero_id = self.hero_id.clone().ok_or(PlannerError::NoHero)?;
        let skill_id = self.skill_id.clone().ok_or(PlannerError::NoSkill)?;
        let stats = self.stats.ok_or(PlannerError::NoStats)?;
        let equipment = self.equipment.clone().ok_or(PlannerError::NoEquipment)?;

        Ok(CalculationParams {
            hero_id,
            skill_id,
            skill_level: self.skill_level,
            stats,
            equipment,
            selected_traits: self.traits.selected_ids(),
        })
    }

    pub fn to_saved(&self, timestamp: DateTime<Utc>) -> Result<SavedConfig, PlannerError> {
        let params = self.snapshot()?;
        Ok(SavedConfig {
            hero_id: params.hero_id,
            skill_id: params.skill_id,
            skill_level: params.skill_level,
            stats: params.stats,
            equipment: params.equipment,
            selected_traits: params.selected_traits,
            timestamp,
        })
    }

    /// Rebuild from a save; trait ids are only kept for a hero the catalog knows
    pub fn from_saved(saved: &SavedConfig, catalog: &Catalog) -> Self {
        let traits = catalog
            .hero(&saved.hero_id)
            .map(|hero| TraitSelections::from_ids(hero, &saved.selected_traits))
            .unwrap_or_default();

        CharacterConfiguration {
            hero_id: Some(saved.hero_id.clone()),
            skill_id: Some(saved.skill_id.clone()),
            skill_level: saved.skill_level,
            stats: Some(saved.stats),
            equipment: Some(saved.equipment.clone()),
            traits,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> CharacterConfiguration {
        let catalog = Catalog::builtin();
        let mut config = CharacterConfiguration {
            skill_id: Some("whirlwind".to_string()),
            stats: Some(CharacterStats::new(100, 50, 50, 80)),
            equipment: Some(EquipmentStats::default()),
            ..Default::default()
        };
        config.set_hero(catalog.hero("rehan").unwrap());
        config
    }

    #[test]
    fn test_snapshot_preconditions() {
        let mut config = filled();
        let params = config.snapshot().unwrap();
        assert_eq!(params.hero_id, "rehan");
        assert_eq!(params.selected_traits, vec!["rage"]);

        config.equipment = None;
        assert!(matches!(config.snapshot(), Err(PlannerError::NoEquipment)));
        config.stats = None;
        assert!(matches!(config.snapshot(), Err(PlannerError::NoStats)));
        config.hero_id = None;
        assert!(matches!(config.snapshot(), Err(PlannerError::NoHero)));
    }

    #[test]
    fn test_form_input_coerced() {
        let mut config = filled();
        config.set_stat_input(Attribute::Strength, "abc");
        config.set_equipment_input(EquipmentField::WeaponMax, "250");
        assert_eq!(config.stats.unwrap().strength, 0);
        assert_eq!(config.equipment.as_ref().unwrap().weapon_damage.max, 250);

        let mut empty = CharacterConfiguration::default();
        empty.set_stat_input(Attribute::Strength, "10");
        assert!(empty.stats.is_none());
    }

    #[test]
    fn test_saved_round_trip_keeps_traits() {
        let catalog = Catalog::builtin();
        let mut config = filled();
        let hero = catalog.hero("rehan").unwrap();
        config.traits.select(hero, 45, "berserker_rage").unwrap();

        let saved = config.to_saved(Utc::now()).unwrap();
        assert_eq!(saved.selected_traits, vec!["rage", "berserker_rage"]);
        assert_eq!(CharacterConfiguration::from_saved(&saved, &catalog), config);
    }

    #[test]
    fn test_from_saved_unknown_hero() {
        let catalog = Catalog::builtin();
        let mut saved = filled().to_saved(Utc::now()).unwrap();
        saved.hero_id = "ghost".to_string();

        let config = CharacterConfiguration::from_saved(&saved, &catalog);
        assert_eq!(config.hero_id.as_deref(), Some("ghost"));
        assert!(config.traits.is_empty());
    }
}
