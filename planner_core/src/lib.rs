//! planner_core - Build planning and damage estimation for action-RPG heroes
//!
//! This library provides:
//! - Catalog: Heroes, traits, skills and talent books, with provider fallbacks
//! - Damage calculation: A pure function from a configuration snapshot to a DamageResult
//! - Talent allocation: Point spending over talent pages with unlock rules
//! - Skill and talent builds: Slot and page selection with their constraints
//! - Planner: The controller owning one character configuration
//! - Store: Key-value persistence, a TTL cache and the saved configuration blob

pub mod catalog;
pub mod character;
pub mod config;
pub mod damage;
pub mod input;
pub mod planner;
pub mod prelude;
pub mod skill_build;
pub mod store;
pub mod talent;
pub mod types;

// Re-export core types for convenience
pub use catalog::{
    load_catalog, load_catalog_cached, BuiltinProvider, Catalog, CatalogError, CatalogLoad,
    CatalogProvider, DirectoryProvider, Hero, HeroTrait, Skill, SkillType, TraitSelections,
};
pub use character::CharacterConfiguration;
pub use config::{ConfigError, DamageConstants, PlannerConstants, TalentConstants};
pub use damage::{calculate_damage, calculate_damage_with, CalculationParams, DamageResult};
pub use planner::{Planner, PlannerError, TalentSummary};
pub use skill_build::{SkillBuild, SkillBuildError, SlotKind};
pub use store::{FileStore, KeyValueStore, MemoryStore, SavedConfig, StoreError, TtlCache};
pub use talent::{TalentAllocator, TalentBonuses, TalentBuild, TalentError, TalentPage};
pub use types::{Attribute, CharacterStats, Element, ElementalDamage, EquipmentStats, WeaponDamage};
