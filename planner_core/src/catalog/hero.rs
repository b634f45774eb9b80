//! Heroes and their level-gated traits

use crate::types::CharacterStats;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// A playable hero from the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub base_stats: Option<CharacterStats>,
    #[serde(default)]
    pub traits: Vec<HeroTrait>,
}

impl Hero {
    /// Find one of this hero's traits by id
    pub fn find_trait(&self, trait_id: &str) -> Option<&HeroTrait> {
        self.traits.iter().find(|t| t.id == trait_id)
    }

    /// The pre-selected trait at level 1, if the hero has one
    pub fn default_trait(&self) -> Option<&HeroTrait> {
        self.traits
            .iter()
            .find(|t| t.unlock_level == 1 && t.is_default)
    }
}

/// A named passive ability unlocked at a fixed hero level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroTrait {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub icon: String,
    pub unlock_level: u32,
    #[serde(default)]
    pub is_default: bool,
}

/// Traits sharing one unlock level
#[derive(Debug, Clone)]
pub struct TraitGroup<'a> {
    pub level: u32,
    pub traits: Vec<&'a HeroTrait>,
    /// Explicit pick, else the group's default trait
    pub selected: Option<&'a str>,
}

impl TraitGroup<'_> {
    /// A single-trait group offers no choice
    pub fn is_fixed(&self) -> bool {
        self.traits.len() == 1
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TraitError {
    #[error("Hero '{hero}' has no trait '{trait_id}' at level {level}")]
    NotOffered {
        hero: String,
        level: u32,
        trait_id: String,
    },
}

/// The user's trait pick per unlock level (at most one per level)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TraitSelections {
    by_level: BTreeMap<u32, String>,
}

impl TraitSelections {
    /// Empty selections
    pub fn new() -> Self {
        Self::default()
    }

    /// Selections for a freshly chosen hero: the level-1 default, if any
    pub fn for_hero(hero: &Hero) -> Self {
        let mut selections = Self::new();
        if let Some(default) = hero.default_trait() {
            selections.by_level.insert(1, default.id.clone());
        }
        selections
    }

    /// Rebuild selections from a flat id list, placing each id at its unlock level
    ///
    /// Ids the hero doesn't have are dropped. Later ids win within a level.
    pub fn from_ids(hero: &Hero, ids: &[String]) -> Self {
        let mut selections = Self::new();
        for id in ids {
            if let Some(t) = hero.find_trait(id) {
                selections.by_level.insert(t.unlock_level, t.id.clone());
            }
        }
        selections
    }

    /// Pick `trait_id` at `level`, replacing any earlier pick at that level
    pub fn select(&mut self, hero: &Hero, level: u32, trait_id: &str) -> Result<(), TraitError> {
        let offered = hero
            .traits
            .iter()
            .any(|t| t.unlock_level == level && t.id == trait_id);
        if !offered {
            return Err(TraitError::NotOffered {
                hero: hero.id.clone(),
                level,
                trait_id: trait_id.to_string(),
            });
        }
        self.by_level.insert(level, trait_id.to_string());
        Ok(())
    }

    /// Remove the pick at a level
    pub fn clear_level(&mut self, level: u32) {
        self.by_level.remove(&level);
    }

    /// The pick at a level
    pub fn selected_at(&self, level: u32) -> Option<&str> {
        self.by_level.get(&level).map(String::as_str)
    }

    /// Selected ids in ascending level order
    pub fn selected_ids(&self) -> Vec<String> {
        self.by_level.values().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.by_level.is_empty()
    }
}

/// Group a hero's traits by unlock level, ascending
pub fn trait_groups<'a>(hero: &'a Hero, selections: &'a TraitSelections) -> Vec<TraitGroup<'a>> {
    let mut by_level: BTreeMap<u32, Vec<&'a HeroTrait>> = BTreeMap::new();
    for t in &hero.traits {
        by_level.entry(t.unlock_level).or_default().push(t);
    }

    by_level
        .into_iter()
        .map(|(level, traits)| {
            let selected = selections
                .selected_at(level)
                .or_else(|| traits.iter().find(|t| t.is_default).map(|t| t.id.as_str()));
            TraitGroup {
                level,
                traits,
                selected,
            }
        })
        .collect()
}
