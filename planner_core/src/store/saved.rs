//! SavedConfig - the persisted configuration blob

use super::{KeyValueStore, StoreError};
use crate::types::{CharacterStats, EquipmentStats};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Store key the configuration is saved under
pub const CONFIG_KEY: &str = "planner-config";

/// Snapshot of a character configuration; not validated against the catalog on load
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedConfig {
    pub hero_id: String,
    pub skill_id: String,
    pub skill_level: u32,
    pub stats: CharacterStats,
    pub equipment: EquipmentStats,
    #[serde(default)]
    pub selected_traits: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

impl SavedConfig {
    /// Write under `CONFIG_KEY`, replacing any previous save
    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<(), StoreError> {
        store.set(CONFIG_KEY, serde_json::to_string(self)?)?;
        tracing::info!(hero = %self.hero_id, skill = %self.skill_id, "configuration saved");
        Ok(())
    }

    /// Read the last save, if any
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Result<Option<SavedConfig>, StoreError> {
        match store.get(CONFIG_KEY)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn sample() -> SavedConfig {
        SavedConfig {
            hero_id: "rehan".to_string(),
            skill_id: "whirlwind".to_string(),
            skill_level: 3,
            stats: CharacterStats::new(100, 50, 50, 80),
            equipment: EquipmentStats::default(),
            selected_traits: vec!["rage".to_string()],
            timestamp: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        }
    }

    #[test]
    fn test_top_level_fields_are_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        for field in [
            "heroId",
            "skillId",
            "skillLevel",
            "stats",
            "equipment",
            "selectedTraits",
            "timestamp",
        ] {
            assert!(json.get(field).is_some(), "missing {}", field);
        }
        assert_eq!(json["timestamp"], "2023-11-14T22:13:20Z");
    }

    #[test]
    fn test_nested_equipment_fields_are_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        let equipment = &json["equipment"];
        for field in [
            "weaponDamage",
            "attackSpeed",
            "critChance",
            "critMultiplier",
            "elementalDamage",
            "weaponType",
        ] {
            assert!(equipment.get(field).is_some(), "missing equipment.{}", field);
        }
        assert!(equipment.get("weapon_damage").is_none());
        assert!(equipment.get("attack_speed").is_none());
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        assert!(SavedConfig::load(&store).unwrap().is_none());

        sample().save(&mut store).unwrap();
        assert_eq!(SavedConfig::load(&store).unwrap(), Some(sample()));
    }

    #[test]
    fn test_load_tolerates_unknown_ids() {
        let mut store = MemoryStore::new();
        store
            .set(
                CONFIG_KEY,
                r#"{"heroId":"ghost","skillId":"none","skillLevel":1,
                    "stats":{"strength":1,"dexterity":2,"intelligence":3,"vitality":4},
                    "equipment":{"weapon_damage":{"min":1,"max":2},"attack_speed":1.0,
                                 "crit_chance":0.0,"crit_multiplier":150},
                    "timestamp":"2024-01-01T00:00:00Z"}"#
                    .to_string(),
            )
            .unwrap();

        // Older blobs wrote equipment in snake_case
        let loaded = SavedConfig::load(&store).unwrap().unwrap();
        assert_eq!(loaded.hero_id, "ghost");
        assert_eq!(loaded.equipment.weapon_damage.max, 2);
        assert_eq!(loaded.equipment.crit_multiplier, 150);
        assert!(loaded.selected_traits.is_empty());
        assert!(loaded.equipment.elemental_damage.is_none());
    }
}
