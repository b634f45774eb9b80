//! Skill catalog entries

use serde::{Deserialize, Serialize};

/// Skill category; decides which slots a skill may occupy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillType {
    Active,
    Passive,
    Support,
}

impl SkillType {
    pub fn all() -> &'static [SkillType] {
        &[SkillType::Active, SkillType::Passive, SkillType::Support]
    }

    pub fn name(&self) -> &'static str {
        match self {
            SkillType::Active => "active",
            SkillType::Passive => "passive",
            SkillType::Support => "support",
        }
    }
}

/// A skill from the catalog
///
/// The descriptive attributes are display text as served by the data source,
/// so they stay as strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub skill_type: SkillType,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub mana_cost: Option<String>,
    #[serde(default)]
    pub cooldown: Option<String>,
    #[serde(default)]
    pub casting_speed: Option<String>,
    #[serde(default)]
    pub magic_seal: Option<String>,
    #[serde(default)]
    pub damage_match: Option<String>,
    #[serde(default)]
    pub mana_cost_match: Option<String>,
    #[serde(default)]
    pub main_attribute: Option<String>,
    #[serde(default)]
    pub weapon_restrictions: Vec<String>,
}

impl Skill {
    /// Minimal skill with no optional attributes
    pub fn new(id: &str, name: &str, skill_type: SkillType) -> Self {
        Skill {
            id: id.to_string(),
            name: name.to_string(),
            skill_type,
            description: String::new(),
            icon: String::new(),
            tags: Vec::new(),
            mana_cost: None,
            cooldown: None,
            casting_speed: None,
            magic_seal: None,
            damage_match: None,
            mana_cost_match: None,
            main_attribute: None,
            weapon_restrictions: Vec::new(),
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skill() {
        let toml = r#"
id = "whirlwind"
name = "Whirlwind"
type = "active"
tags = ["attack", "physical", "area"]
mana_cost = "15"
cooldown = "2"
"#;
        let skill: Skill = toml::from_str(toml).unwrap();
        assert_eq!(skill.skill_type, SkillType::Active);
        assert!(skill.has_tag("area"));
        assert_eq!(skill.mana_cost.as_deref(), Some("15"));
        assert!(skill.weapon_restrictions.is_empty());
    }
}
