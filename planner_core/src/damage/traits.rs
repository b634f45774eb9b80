//! Trait effect table - per-trait damage modifiers

use crate::types::ElementalDamage;

const NO_ELEMENTAL: ElementalDamage = ElementalDamage {
    fire: 0,
    lightning: 0,
    cold: 0,
    poison: 0,
};

/// Modifiers contributed by one selected hero trait
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraitModifier {
    pub id: &'static str,
    /// Multiplies trait-enhanced damage
    pub damage_multiplier: f64,
    /// Flat crit chance percent
    pub crit_bonus: f64,
    /// Flat attacks per second
    pub attack_speed_bonus: f64,
    /// Flat elemental damage per element
    pub elemental: ElementalDamage,
}

static TRAIT_TABLE: [TraitModifier; 20] = [
    TraitModifier {
        id: "rage",
        damage_multiplier: 1.15,
        crit_bonus: 5.0,
        attack_speed_bonus: 0.1,
        elemental: NO_ELEMENTAL,
    },
    TraitModifier {
        id: "berserker_rage",
        damage_multiplier: 1.25,
        crit_bonus: 8.0,
        attack_speed_bonus: 0.0,
        elemental: NO_ELEMENTAL,
    },
    TraitModifier {
        id: "unyielding",
        damage_multiplier: 1.05,
        crit_bonus: 0.0,
        attack_speed_bonus: 0.0,
        elemental: NO_ELEMENTAL,
    },
    TraitModifier {
        id: "bloodlust",
        damage_multiplier: 1.2,
        crit_bonus: 0.0,
        attack_speed_bonus: 0.15,
        elemental: NO_ELEMENTAL,
    },
    TraitModifier {
        id: "war_cry",
        damage_multiplier: 1.1,
        crit_bonus: 3.0,
        attack_speed_bonus: 0.0,
        elemental: NO_ELEMENTAL,
    },
    TraitModifier {
        id: "blood_pact",
        damage_multiplier: 1.3,
        crit_bonus: 0.0,
        attack_speed_bonus: 0.0,
        elemental: NO_ELEMENTAL,
    },
    TraitModifier {
        id: "frenzy",
        damage_multiplier: 1.1,
        crit_bonus: 0.0,
        attack_speed_bonus: 0.2,
        elemental: NO_ELEMENTAL,
    },
    TraitModifier {
        id: "arcane_focus",
        damage_multiplier: 1.1,
        crit_bonus: 2.0,
        attack_speed_bonus: 0.0,
        elemental: NO_ELEMENTAL,
    },
    TraitModifier {
        id: "pyromancy",
        damage_multiplier: 1.05,
        crit_bonus: 0.0,
        attack_speed_bonus: 0.0,
        elemental: ElementalDamage {
            fire: 20,
            lightning: 0,
            cold: 0,
            poison: 0,
        },
    },
    TraitModifier {
        id: "frost_weave",
        damage_multiplier: 1.05,
        crit_bonus: 0.0,
        attack_speed_bonus: 0.0,
        elemental: ElementalDamage {
            fire: 0,
            lightning: 0,
            cold: 20,
            poison: 0,
        },
    },
    TraitModifier {
        id: "storm_caller",
        damage_multiplier: 1.1,
        crit_bonus: 0.0,
        attack_speed_bonus: 0.0,
        elemental: ElementalDamage {
            fire: 0,
            lightning: 25,
            cold: 0,
            poison: 0,
        },
    },
    TraitModifier {
        id: "elemental_mastery",
        damage_multiplier: 1.15,
        crit_bonus: 0.0,
        attack_speed_bonus: 0.0,
        elemental: ElementalDamage {
            fire: 5,
            lightning: 5,
            cold: 5,
            poison: 5,
        },
    },
    TraitModifier {
        id: "holy_light",
        damage_multiplier: 1.1,
        crit_bonus: 0.0,
        attack_speed_bonus: 0.0,
        elemental: ElementalDamage {
            fire: 10,
            lightning: 10,
            cold: 0,
            poison: 0,
        },
    },
    TraitModifier {
        id: "eagle_eye",
        damage_multiplier: 1.05,
        crit_bonus: 7.0,
        attack_speed_bonus: 0.0,
        elemental: NO_ELEMENTAL,
    },
    TraitModifier {
        id: "venom_tips",
        damage_multiplier: 1.0,
        crit_bonus: 0.0,
        attack_speed_bonus: 0.0,
        elemental: ElementalDamage {
            fire: 0,
            lightning: 0,
            cold: 0,
            poison: 25,
        },
    },
    TraitModifier {
        id: "rapid_fire",
        damage_multiplier: 1.0,
        crit_bonus: 0.0,
        attack_speed_bonus: 0.25,
        elemental: NO_ELEMENTAL,
    },
    TraitModifier {
        id: "deadeye",
        damage_multiplier: 1.2,
        crit_bonus: 10.0,
        attack_speed_bonus: 0.0,
        elemental: NO_ELEMENTAL,
    },
    TraitModifier {
        id: "shadow_step",
        damage_multiplier: 1.1,
        crit_bonus: 4.0,
        attack_speed_bonus: 0.1,
        elemental: NO_ELEMENTAL,
    },
    TraitModifier {
        id: "precision",
        damage_multiplier: 1.0,
        crit_bonus: 12.0,
        attack_speed_bonus: 0.0,
        elemental: NO_ELEMENTAL,
    },
    TraitModifier {
        id: "toxic_cloud",
        damage_multiplier: 1.05,
        crit_bonus: 0.0,
        attack_speed_bonus: 0.0,
        elemental: ElementalDamage {
            fire: 0,
            lightning: 0,
            cold: 0,
            poison: 15,
        },
    },
];

/// All known trait modifiers
pub fn trait_table() -> &'static [TraitModifier] {
    &TRAIT_TABLE
}

/// Look up the modifier row for a trait id
pub fn trait_modifier(trait_id: &str) -> Option<&'static TraitModifier> {
    TRAIT_TABLE.iter().find(|m| m.id == trait_id)
}

/// Accumulated effect of every selected trait
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraitBonuses {
    pub multiplier: f64,
    pub crit_bonus: f64,
    pub attack_speed_bonus: f64,
    pub elemental: ElementalDamage,
}

impl Default for TraitBonuses {
    fn default() -> Self {
        TraitBonuses {
            multiplier: 1.0,
            crit_bonus: 0.0,
            attack_speed_bonus: 0.0,
            elemental: ElementalDamage::default(),
        }
    }
}

impl TraitBonuses {
    /// Fold one trait in; ids missing from the table use `default_multiplier` alone
    pub fn apply(&mut self, trait_id: &str, default_multiplier: f64) {
        match trait_modifier(trait_id) {
            Some(modifier) => {
                self.multiplier *= modifier.damage_multiplier;
                self.crit_bonus += modifier.crit_bonus;
                self.attack_speed_bonus += modifier.attack_speed_bonus;
                self.elemental = self.elemental.combined(&modifier.elemental);
            }
            None => self.multiplier *= default_multiplier,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_table_ids_unique() {
        let ids: HashSet<_> = trait_table().iter().map(|m| m.id).collect();
        assert_eq!(ids.len(), trait_table().len());
    }

    #[test]
    fn test_rage_row() {
        let rage = trait_modifier("rage").unwrap();
        assert!((rage.damage_multiplier - 1.15).abs() < f64::EPSILON);
        assert!((rage.crit_bonus - 5.0).abs() < f64::EPSILON);
        assert!((rage.attack_speed_bonus - 0.1).abs() < f64::EPSILON);

        let berserker = trait_modifier("berserker_rage").unwrap();
        assert!((berserker.damage_multiplier - 1.25).abs() < f64::EPSILON);
        assert!((berserker.crit_bonus - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_apply_accumulates() {
        let mut bonuses = TraitBonuses::default();
        bonuses.apply("rage", 1.1);
        bonuses.apply("pyromancy", 1.1);
        bonuses.apply("not_in_table", 1.1);

        assert!((bonuses.multiplier - 1.15 * 1.05 * 1.1).abs() < 1e-12);
        assert!((bonuses.crit_bonus - 5.0).abs() < f64::EPSILON);
        assert_eq!(bonuses.elemental.fire, 20);
        assert_eq!(bonuses.elemental.cold, 0);
    }
}
