//! Damage calculation - turning a configuration snapshot into a DamageResult

use super::result::{DamageBreakdown, DamageDistribution, DamageResult};
use super::traits::TraitBonuses;
use crate::catalog::Catalog;
use crate::config::DamageConstants;
use crate::types::{CharacterStats, Element, EquipmentStats};
use serde::{Deserialize, Serialize};

/// Inputs to a single damage calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationParams {
    pub hero_id: String,
    pub skill_id: String,
    pub skill_level: u32,
    pub stats: CharacterStats,
    pub equipment: EquipmentStats,
    /// Applied in order; duplicates apply twice
    #[serde(default)]
    pub selected_traits: Vec<String>,
}

/// Calculate damage with the default constants
pub fn calculate_damage(params: &CalculationParams, catalog: &Catalog) -> DamageResult {
    calculate_damage_with(params, catalog, &DamageConstants::default())
}

/// Calculate damage with explicit constants
pub fn calculate_damage_with(
    params: &CalculationParams,
    catalog: &Catalog,
    constants: &DamageConstants,
) -> DamageResult {
    let stats = &params.stats;
    let equipment = &params.equipment;

    // Step 1: Flat contributions
    let base_damage = equipment.weapon_damage.average();
    let stat_bonus = stats.strength as f64 * constants.strength_factor
        + stats.intelligence as f64 * constants.intelligence_factor;
    let skill_bonus = params.skill_level as f64 * constants.skill_level_factor;

    // Step 2: Trait modifiers
    let traits = resolve_traits(params, catalog, constants);
    let trait_enhanced = (base_damage + stat_bonus + skill_bonus) * traits.multiplier;

    // Step 3: Elemental damage
    let elemental = equipment.elemental().combined(&traits.elemental);
    let total_elemental = elemental.total() as f64;

    // Step 4: Totals
    let total = js_round(trait_enhanced + total_elemental);
    let physical = js_round(trait_enhanced * constants.physical_share);
    let elemental_damage =
        js_round(trait_enhanced * constants.elemental_share + total_elemental);

    let attack_speed = equipment.attack_speed + traits.attack_speed_bonus;
    let dps = js_round(total * attack_speed);

    let crit_chance = (equipment.crit_chance
        + stats.dexterity as f64 * constants.dexterity_crit_factor
        + traits.crit_bonus)
        .min(constants.crit_cap);

    // Step 5: Distribution
    let mut damage_distribution = DamageDistribution::default();
    if total != 0.0 {
        let percent = |component: f64| js_round(component / total * 100.0);
        let physical_pct = percent(physical);
        let element_pcts: Vec<f64> = Element::all()
            .iter()
            .map(|e| percent(elemental.get(*e) as f64))
            .collect();

        let sum = physical_pct + element_pcts.iter().sum::<f64>();
        let adjustment = 100.0 - sum;
        let adjusted_physical = if adjustment > 0.0 {
            physical_pct + adjustment
        } else {
            physical_pct
        };

        damage_distribution = DamageDistribution {
            physical: clamp_percent(adjusted_physical),
            fire: clamp_percent(element_pcts[0]),
            lightning: clamp_percent(element_pcts[1]),
            cold: clamp_percent(element_pcts[2]),
            poison: clamp_percent(element_pcts[3]),
        };
    }

    let breakdown = DamageBreakdown {
        base_damage: js_round(base_damage) as i64,
        stat_bonus: js_round(stat_bonus) as i64,
        skill_bonus: js_round(skill_bonus) as i64,
        elemental_bonus: js_round(total_elemental) as i64,
        crit_bonus: js_round(traits.crit_bonus) as i64,
    };

    DamageResult {
        total: total as i64,
        physical: physical as i64,
        elemental: elemental_damage as i64,
        dps: dps as i64,
        crit_chance,
        damage_distribution,
        breakdown: Some(breakdown),
    }
}

/// Fold the selected traits that belong to the selected hero
///
/// An unknown hero, or a trait the hero doesn't have, contributes nothing. A hero
/// trait without a table row gets the default multiplier.
pub fn resolve_traits(
    params: &CalculationParams,
    catalog: &Catalog,
    constants: &DamageConstants,
) -> TraitBonuses {
    let mut bonuses = TraitBonuses::default();
    let Some(hero) = catalog.hero(&params.hero_id) else {
        return bonuses;
    };

    for trait_id in &params.selected_traits {
        if hero.find_trait(trait_id).is_some() {
            bonuses.apply(trait_id, constants.default_trait_multiplier);
        }
    }
    bonuses
}

/// Round half up, toward positive infinity
fn js_round(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

fn clamp_percent(value: f64) -> u32 {
    value.clamp(0.0, 100.0) as u32
}
