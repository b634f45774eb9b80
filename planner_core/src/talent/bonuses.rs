//! TalentBonuses - Aggregated stat bonuses from allocated talent nodes

use super::tree::{BonusStat, NodeEffect, TalentNode};
use serde::{Deserialize, Serialize};

/// Summed bonuses from a talent allocation
///
/// Attributes are flat adds, the rest are percentages. Each node effect
/// contributes `amount * current_points`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TalentBonuses {
    pub strength: f64,
    pub dexterity: f64,
    pub intelligence: f64,
    pub vitality: f64,
    pub physical_damage: f64,
    pub elemental_damage: f64,
    pub crit_chance: f64,
    pub crit_multiplier: f64,
}

impl TalentBonuses {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add to one stat
    pub fn add(&mut self, stat: BonusStat, amount: f64) {
        *self.stat_mut(stat) += amount;
    }

    pub fn get(&self, stat: BonusStat) -> f64 {
        match stat {
            BonusStat::Strength => self.strength,
            BonusStat::Dexterity => self.dexterity,
            BonusStat::Intelligence => self.intelligence,
            BonusStat::Vitality => self.vitality,
            BonusStat::PhysicalDamage => self.physical_damage,
            BonusStat::ElementalDamage => self.elemental_damage,
            BonusStat::CritChance => self.crit_chance,
            BonusStat::CritMultiplier => self.crit_multiplier,
        }
    }

    fn stat_mut(&mut self, stat: BonusStat) -> &mut f64 {
        match stat {
            BonusStat::Strength => &mut self.strength,
            BonusStat::Dexterity => &mut self.dexterity,
            BonusStat::Intelligence => &mut self.intelligence,
            BonusStat::Vitality => &mut self.vitality,
            BonusStat::PhysicalDamage => &mut self.physical_damage,
            BonusStat::ElementalDamage => &mut self.elemental_damage,
            BonusStat::CritChance => &mut self.crit_chance,
            BonusStat::CritMultiplier => &mut self.crit_multiplier,
        }
    }

    /// Apply one node effect at the given point count
    pub fn apply_effect(&mut self, effect: &NodeEffect, points: u32) {
        self.add(effect.stat, effect.amount * points as f64);
    }

    /// Element-wise sum of two summaries
    pub fn merge(&mut self, other: &TalentBonuses) {
        for stat in Self::stats() {
            self.add(*stat, other.get(*stat));
        }
    }

    /// True when no stat received anything
    pub fn is_empty(&self) -> bool {
        Self::stats().iter().all(|s| self.get(*s) == 0.0)
    }

    /// Non-zero entries in display order
    pub fn entries(&self) -> Vec<(BonusStat, f64)> {
        Self::stats()
            .iter()
            .map(|s| (*s, self.get(*s)))
            .filter(|(_, v)| *v != 0.0)
            .collect()
    }

    fn stats() -> &'static [BonusStat] {
        &[
            BonusStat::Strength,
            BonusStat::Dexterity,
            BonusStat::Intelligence,
            BonusStat::Vitality,
            BonusStat::PhysicalDamage,
            BonusStat::ElementalDamage,
            BonusStat::CritChance,
            BonusStat::CritMultiplier,
        ]
    }
}

/// Sum the effects of every node holding points
pub fn compute_bonuses(tree: &[TalentNode]) -> TalentBonuses {
    let mut bonuses = TalentBonuses::new();
    for node in tree.iter().filter(|n| n.current_points > 0) {
        for effect in &node.effects {
            bonuses.apply_effect(effect, node.current_points);
        }
    }
    bonuses
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::talent::tree::NodeTier;

    #[test]
    fn test_bonuses_scale_with_points() {
        let mut node = TalentNode::new("phys", NodeTier::Minor, 0)
            .with_effect(BonusStat::PhysicalDamage, 5.0, true);
        node.current_points = 3;

        let bonuses = compute_bonuses(&[node]);
        assert!((bonuses.physical_damage - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bonuses_sum_across_nodes() {
        let mut a = TalentNode::new("a", NodeTier::Minor, 0)
            .with_effect(BonusStat::Strength, 10.0, false)
            .with_effect(BonusStat::CritChance, 1.0, true);
        a.current_points = 2;
        let mut b = TalentNode::new("b", NodeTier::Medium, 0)
            .with_effect(BonusStat::Strength, 5.0, false);
        b.current_points = 1;
        let unallocated = TalentNode::new("c", NodeTier::Minor, 0)
            .with_effect(BonusStat::Vitality, 50.0, false);

        let bonuses = compute_bonuses(&[a, b, unallocated]);
        assert!((bonuses.strength - 25.0).abs() < f64::EPSILON);
        assert!((bonuses.crit_chance - 2.0).abs() < f64::EPSILON);
        assert_eq!(bonuses.vitality, 0.0);
    }

    #[test]
    fn test_empty_and_entries() {
        let mut bonuses = TalentBonuses::new();
        assert!(bonuses.is_empty());

        bonuses.add(BonusStat::Intelligence, 4.0);
        let entries = bonuses.entries();
        assert_eq!(entries, vec![(BonusStat::Intelligence, 4.0)]);
    }

    #[test]
    fn test_merge() {
        let mut total = TalentBonuses::new();
        let mut page = TalentBonuses::new();
        page.add(BonusStat::CritMultiplier, 12.0);
        total.merge(&page);
        total.merge(&page);
        assert!((total.crit_multiplier - 24.0).abs() < f64::EPSILON);
    }
}
