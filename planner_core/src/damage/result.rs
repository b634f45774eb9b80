//! DamageResult - Outcome of a damage calculation

use serde::{Deserialize, Serialize};

/// Derived combat stats for one configuration snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DamageResult {
    /// Damage per hit
    pub total: i64,
    /// Physical share of a hit
    pub physical: i64,
    /// Elemental share of a hit
    pub elemental: i64,
    /// Damage per second
    pub dps: i64,
    /// Crit chance percent, capped
    pub crit_chance: f64,
    pub damage_distribution: DamageDistribution,
    pub breakdown: Option<DamageBreakdown>,
}

/// Percent of a hit per damage component
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageDistribution {
    pub physical: u32,
    pub fire: u32,
    pub lightning: u32,
    pub cold: u32,
    pub poison: u32,
}

impl DamageDistribution {
    pub fn sum(&self) -> u32 {
        self.physical + self.fire + self.lightning + self.cold + self.poison
    }
}

/// Rounded intermediate contributions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageBreakdown {
    pub base_damage: i64,
    pub stat_bonus: i64,
    pub skill_bonus: i64,
    pub elemental_bonus: i64,
    pub crit_bonus: i64,
}

impl DamageResult {
    /// Get a summary string
    pub fn summary(&self) -> String {
        if self.total == 0 {
            return "No damage".to_string();
        }

        let mut parts = vec![format!("{} DPS", self.dps), format!("{} per hit", self.total)];

        if self.physical > 0 {
            parts.push(format!("{} physical", self.physical));
        }

        if self.elemental > 0 {
            parts.push(format!("{} elemental", self.elemental));
        }

        parts.push(format!("{:.1}% crit", self.crit_chance));
        parts.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary() {
        let result = DamageResult {
            total: 150,
            physical: 105,
            elemental: 45,
            dps: 180,
            crit_chance: 10.0,
            ..Default::default()
        };
        assert_eq!(
            result.summary(),
            "180 DPS, 150 per hit, 105 physical, 45 elemental, 10.0% crit"
        );
        assert_eq!(DamageResult::default().summary(), "No damage");
    }
}
