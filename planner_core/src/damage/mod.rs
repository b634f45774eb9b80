//! Damage system - pure calculation from a configuration snapshot

mod calculation;
mod result;
mod traits;

pub use calculation::{calculate_damage, calculate_damage_with, resolve_traits, CalculationParams};
pub use result::{DamageBreakdown, DamageDistribution, DamageResult};
pub use traits::{trait_modifier, trait_table, TraitBonuses, TraitModifier};
