//! Prelude module for convenient imports
//!
//! ```rust
//! use planner_core::prelude::*;
//! ```

// Core types
pub use crate::types::{
    Attribute, CharacterStats, Element, ElementalDamage, EquipmentField, EquipmentStats,
    WeaponDamage,
};

// Catalog
pub use crate::catalog::{
    load_catalog, BuiltinProvider, Catalog, CatalogProvider, DirectoryProvider, Hero, Skill,
    SkillType,
};

// Damage
pub use crate::damage::{calculate_damage, CalculationParams, DamageResult};

// Talents
pub use crate::talent::{BonusStat, NodeTier, TalentAllocator, TalentBook, TalentPage};

// Builds
pub use crate::skill_build::{SkillBuild, SlotKind};

// Controller
pub use crate::planner::{Planner, PlannerError};

// Persistence
pub use crate::store::{FileStore, KeyValueStore, MemoryStore, SavedConfig};
