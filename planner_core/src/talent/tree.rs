//! Talent books, pages and nodes

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Node tier; governs point cap and unlock rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeTier {
    Minor,
    Medium,
    Legendary,
}

impl NodeTier {
    /// Standard point cap for the tier
    pub fn default_max_points(&self) -> u32 {
        match self {
            NodeTier::Minor | NodeTier::Medium => 3,
            NodeTier::Legendary => 1,
        }
    }

    /// Medium and legendary nodes gate on, and cascade into, their neighbours
    pub fn is_keystone(&self) -> bool {
        matches!(self, NodeTier::Medium | NodeTier::Legendary)
    }

    /// Minor and medium nodes are the ones keystones depend on
    pub fn is_fillable(&self) -> bool {
        matches!(self, NodeTier::Minor | NodeTier::Medium)
    }
}

/// Stat a talent node can grant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BonusStat {
    Strength,
    Dexterity,
    Intelligence,
    Vitality,
    PhysicalDamage,
    ElementalDamage,
    CritChance,
    CritMultiplier,
}

impl BonusStat {
    pub fn name(&self) -> &'static str {
        match self {
            BonusStat::Strength => "Strength",
            BonusStat::Dexterity => "Dexterity",
            BonusStat::Intelligence => "Intelligence",
            BonusStat::Vitality => "Vitality",
            BonusStat::PhysicalDamage => "Physical Damage",
            BonusStat::ElementalDamage => "Elemental Damage",
            BonusStat::CritChance => "Crit Chance",
            BonusStat::CritMultiplier => "Crit Damage",
        }
    }
}

/// Structured per-point effect of a node
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeEffect {
    pub stat: BonusStat,
    /// Amount granted per allocated point
    pub amount: f64,
    #[serde(default)]
    pub is_percent: bool,
}

impl fmt::Display for NodeEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = if self.is_percent { "%" } else { "" };
        write!(f, "+{}{} {}", self.amount, suffix, self.stat.name())
    }
}

/// Grid coordinates of a node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

/// A point-investable node in a talent page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TalentNode {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub tier: NodeTier,
    #[serde(default)]
    pub position: Position,
    /// Adjacent node ids, bidirectional by convention
    #[serde(default)]
    pub connections: Vec<String>,
    /// Ids that must be allocated before the first point
    #[serde(default)]
    pub requirements: Vec<String>,
    pub max_points: u32,
    #[serde(default)]
    pub current_points: u32,
    /// Points spent in the page before the node becomes eligible
    #[serde(default)]
    pub column_requirement: u32,
    #[serde(default)]
    pub effects: Vec<NodeEffect>,
}

impl TalentNode {
    /// New node with the tier's standard cap and no links
    pub fn new(id: &str, tier: NodeTier, column_requirement: u32) -> Self {
        TalentNode {
            id: id.to_string(),
            name: id.to_string(),
            icon: String::new(),
            description: String::new(),
            tier,
            position: Position::default(),
            connections: Vec::new(),
            requirements: Vec::new(),
            max_points: tier.default_max_points(),
            current_points: 0,
            column_requirement,
            effects: Vec::new(),
        }
    }

    pub fn with_connections(mut self, connections: &[&str]) -> Self {
        self.connections = connections.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn with_requirements(mut self, requirements: &[&str]) -> Self {
        self.requirements = requirements.iter().map(|r| r.to_string()).collect();
        self
    }

    pub fn with_effect(mut self, stat: BonusStat, amount: f64, is_percent: bool) -> Self {
        self.effects.push(NodeEffect {
            stat,
            amount,
            is_percent,
        });
        self
    }

    pub fn is_maxed(&self) -> bool {
        self.current_points >= self.max_points
    }
}

/// A single allocation workspace: one talent graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TalentPage {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub description: String,
    pub starting_node: String,
    #[serde(default)]
    pub talent_tree: Vec<TalentNode>,
}

impl TalentPage {
    pub fn find_node(&self, node_id: &str) -> Option<&TalentNode> {
        self.talent_tree.iter().find(|n| n.id == node_id)
    }

    /// Working copy of the tree with every node at zero points
    pub fn fresh_tree(&self) -> Vec<TalentNode> {
        self.talent_tree
            .iter()
            .map(|node| TalentNode {
                current_points: 0,
                ..node.clone()
            })
            .collect()
    }

    /// Check internal references of the page
    ///
    /// Returns one message per problem found.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        let mut seen = HashSet::new();
        for node in &self.talent_tree {
            if !seen.insert(node.id.as_str()) {
                problems.push(format!("page '{}': duplicate node '{}'", self.id, node.id));
            }
        }

        if !seen.contains(self.starting_node.as_str()) {
            problems.push(format!(
                "page '{}': starting node '{}' not in tree",
                self.id, self.starting_node
            ));
        }

        for node in &self.talent_tree {
            if node.max_points == 0 {
                problems.push(format!("page '{}': node '{}' has no points", self.id, node.id));
            }
            for link in node.connections.iter().chain(node.requirements.iter()) {
                if !seen.contains(link.as_str()) {
                    problems.push(format!(
                        "page '{}': node '{}' links to unknown node '{}'",
                        self.id, node.id, link
                    ));
                }
            }
        }

        problems
    }
}

/// A themed group of talent pages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TalentBook {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub pages: Vec<TalentPage>,
}

impl TalentBook {
    pub fn find_page(&self, page_id: &str) -> Option<&TalentPage> {
        self.pages.iter().find(|p| p.id == page_id)
    }
}
