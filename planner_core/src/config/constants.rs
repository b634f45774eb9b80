//! Planner constants configuration

use super::ConfigError;
use serde::{Deserialize, Serialize};

/// Tunable planner constants
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlannerConstants {
    #[serde(default)]
    pub damage: DamageConstants,
    #[serde(default)]
    pub talents: TalentConstants,
}

impl PlannerConstants {
    /// Reject values the calculator or allocator can't work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.talents.pages_per_build == 0 {
            return Err(ConfigError::ValidationError(
                "talents.pages_per_build must be at least 1".to_string(),
            ));
        }
        for (name, share) in [
            ("physical_share", self.damage.physical_share),
            ("elemental_share", self.damage.elemental_share),
        ] {
            if !(0.0..=1.0).contains(&share) {
                return Err(ConfigError::ValidationError(format!(
                    "damage.{} must be within 0..=1, got {}",
                    name, share
                )));
            }
        }
        if self.talents.checkpoints.windows(2).any(|w| w[0] > w[1]) {
            return Err(ConfigError::ValidationError(
                "talents.checkpoints must be ascending".to_string(),
            ));
        }
        Ok(())
    }
}

/// Damage formula coefficients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageConstants {
    /// Flat damage per point of strength
    #[serde(default = "default_strength_factor")]
    pub strength_factor: f64,
    /// Flat damage per point of intelligence
    #[serde(default = "default_intelligence_factor")]
    pub intelligence_factor: f64,
    /// Flat damage per skill level
    #[serde(default = "default_skill_level_factor")]
    pub skill_level_factor: f64,
    /// Crit chance percent per point of dexterity
    #[serde(default = "default_dexterity_crit_factor")]
    pub dexterity_crit_factor: f64,
    /// Hard cap on reported crit chance
    #[serde(default = "default_crit_cap")]
    pub crit_cap: f64,
    /// Share of trait-enhanced damage reported as physical
    #[serde(default = "default_physical_share")]
    pub physical_share: f64,
    /// Share of trait-enhanced damage added to reported elemental damage
    #[serde(default = "default_elemental_share")]
    pub elemental_share: f64,
    /// Factor for a hero trait with no entry in the effect table
    #[serde(default = "default_trait_multiplier")]
    pub default_trait_multiplier: f64,
}

impl Default for DamageConstants {
    fn default() -> Self {
        DamageConstants {
            strength_factor: default_strength_factor(),
            intelligence_factor: default_intelligence_factor(),
            skill_level_factor: default_skill_level_factor(),
            dexterity_crit_factor: default_dexterity_crit_factor(),
            crit_cap: default_crit_cap(),
            physical_share: default_physical_share(),
            elemental_share: default_elemental_share(),
            default_trait_multiplier: default_trait_multiplier(),
        }
    }
}

fn default_strength_factor() -> f64 {
    0.5
}
fn default_intelligence_factor() -> f64 {
    0.3
}
fn default_skill_level_factor() -> f64 {
    10.0
}
fn default_dexterity_crit_factor() -> f64 {
    0.1
}
fn default_crit_cap() -> f64 {
    95.0
}
fn default_physical_share() -> f64 {
    0.7
}
fn default_elemental_share() -> f64 {
    0.3
}
fn default_trait_multiplier() -> f64 {
    1.1
}

/// Talent allocation rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TalentConstants {
    /// Progress ladder shown against points spent in a page
    #[serde(default = "default_checkpoints")]
    pub checkpoints: Vec<u32>,
    /// Pages that make a complete talent build
    #[serde(default = "default_pages_per_build")]
    pub pages_per_build: usize,
    /// Medium/legendary nodes need their minor/medium neighbours maxed before unlocking
    #[serde(default = "default_connection_gate")]
    pub connection_gate: bool,
}

impl Default for TalentConstants {
    fn default() -> Self {
        TalentConstants {
            checkpoints: default_checkpoints(),
            pages_per_build: default_pages_per_build(),
            connection_gate: default_connection_gate(),
        }
    }
}

fn default_checkpoints() -> Vec<u32> {
    vec![0, 3, 6, 9, 12, 15]
}
fn default_pages_per_build() -> usize {
    4
}
fn default_connection_gate() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let constants = PlannerConstants::default();
        assert!((constants.damage.strength_factor - 0.5).abs() < f64::EPSILON);
        assert!((constants.damage.crit_cap - 95.0).abs() < f64::EPSILON);
        assert_eq!(constants.talents.pages_per_build, 4);
        assert!(constants.talents.connection_gate);
        assert!(constants.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_constants() {
        let toml = r#"
[damage]
crit_cap = 80

[talents]
connection_gate = false
"#;

        let constants: PlannerConstants = toml::from_str(toml).unwrap();
        assert!((constants.damage.crit_cap - 80.0).abs() < f64::EPSILON);
        assert!((constants.damage.physical_share - 0.7).abs() < f64::EPSILON);
        assert!(!constants.talents.connection_gate);
        assert_eq!(constants.talents.checkpoints, vec![0, 3, 6, 9, 12, 15]);
    }

    #[test]
    fn test_parse_empty_constants() {
        let constants: PlannerConstants = toml::from_str("").unwrap();
        assert_eq!(constants, PlannerConstants::default());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut constants = PlannerConstants::default();
        constants.talents.pages_per_build = 0;
        assert!(matches!(
            constants.validate(),
            Err(ConfigError::ValidationError(_))
        ));

        let mut constants = PlannerConstants::default();
        constants.talents.checkpoints = vec![3, 0];
        assert!(constants.validate().is_err());
    }
}
