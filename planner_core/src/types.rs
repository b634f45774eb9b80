//! Core character and equipment types shared by the calculator and the planner

use crate::input::{parse_float_or_zero, parse_int_or_zero};
use serde::{Deserialize, Serialize};

/// Character attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Strength,
    Dexterity,
    Intelligence,
    Vitality,
}

impl Attribute {
    /// Get all attributes in display order
    pub fn all() -> &'static [Attribute] {
        &[
            Attribute::Strength,
            Attribute::Dexterity,
            Attribute::Intelligence,
            Attribute::Vitality,
        ]
    }
}

/// Elemental damage type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Element {
    Fire,
    Lightning,
    Cold,
    Poison,
}

impl Element {
    /// Get all elements in distribution order
    pub fn all() -> &'static [Element] {
        &[Element::Fire, Element::Lightning, Element::Cold, Element::Poison]
    }
}

/// User-allocated character attributes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterStats {
    #[serde(default)]
    pub strength: u32,
    #[serde(default)]
    pub dexterity: u32,
    #[serde(default)]
    pub intelligence: u32,
    #[serde(default)]
    pub vitality: u32,
}

impl CharacterStats {
    pub fn new(strength: u32, dexterity: u32, intelligence: u32, vitality: u32) -> Self {
        CharacterStats {
            strength,
            dexterity,
            intelligence,
            vitality,
        }
    }

    /// Get the value of one attribute
    pub fn get(&self, attribute: Attribute) -> u32 {
        match attribute {
            Attribute::Strength => self.strength,
            Attribute::Dexterity => self.dexterity,
            Attribute::Intelligence => self.intelligence,
            Attribute::Vitality => self.vitality,
        }
    }

    pub fn set(&mut self, attribute: Attribute, value: u32) {
        match attribute {
            Attribute::Strength => self.strength = value,
            Attribute::Dexterity => self.dexterity = value,
            Attribute::Intelligence => self.intelligence = value,
            Attribute::Vitality => self.vitality = value,
        }
    }

    /// Set an attribute from raw form input; unparseable input becomes 0
    pub fn set_from_input(&mut self, attribute: Attribute, raw: &str) {
        self.set(attribute, parse_int_or_zero(raw));
    }
}

/// Weapon damage range
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponDamage {
    pub min: u32,
    pub max: u32,
}

impl WeaponDamage {
    pub fn new(min: u32, max: u32) -> Self {
        WeaponDamage { min, max }
    }

    /// Midpoint of the range (min <= max is not required)
    pub fn average(&self) -> f64 {
        (self.min as f64 + self.max as f64) / 2.0
    }
}

/// Flat elemental damage per element
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementalDamage {
    #[serde(default)]
    pub fire: u32,
    #[serde(default)]
    pub lightning: u32,
    #[serde(default)]
    pub cold: u32,
    #[serde(default)]
    pub poison: u32,
}

impl ElementalDamage {
    pub fn get(&self, element: Element) -> u32 {
        match element {
            Element::Fire => self.fire,
            Element::Lightning => self.lightning,
            Element::Cold => self.cold,
            Element::Poison => self.poison,
        }
    }

    pub fn set(&mut self, element: Element, value: u32) {
        match element {
            Element::Fire => self.fire = value,
            Element::Lightning => self.lightning = value,
            Element::Cold => self.cold = value,
            Element::Poison => self.poison = value,
        }
    }

    /// Sum across all four elements
    pub fn total(&self) -> u64 {
        Element::all().iter().map(|e| self.get(*e) as u64).sum()
    }

    /// Element-wise sum
    pub fn combined(&self, other: &ElementalDamage) -> ElementalDamage {
        ElementalDamage {
            fire: self.fire.saturating_add(other.fire),
            lightning: self.lightning.saturating_add(other.lightning),
            cold: self.cold.saturating_add(other.cold),
            poison: self.poison.saturating_add(other.poison),
        }
    }
}

/// Editable equipment field, used when applying raw form input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquipmentField {
    WeaponMin,
    WeaponMax,
    AttackSpeed,
    CritChance,
    CritMultiplier,
    Elemental(Element),
}

/// Equipment-derived offensive stats
///
/// Serialized in camelCase like the saved configuration that embeds it.
/// The snake_case spellings are still accepted on input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentStats {
    #[serde(alias = "weapon_damage")]
    pub weapon_damage: WeaponDamage,
    /// Attacks per second
    #[serde(alias = "attack_speed")]
    pub attack_speed: f64,
    /// Percent, not clamped on input
    #[serde(alias = "crit_chance")]
    pub crit_chance: f64,
    /// Percent (150 = 1.5x)
    #[serde(alias = "crit_multiplier")]
    pub crit_multiplier: u32,
    /// Absent means all zero
    #[serde(default, alias = "elemental_damage")]
    pub elemental_damage: Option<ElementalDamage>,
    #[serde(default, alias = "weapon_type")]
    pub weapon_type: String,
}

impl Default for EquipmentStats {
    fn default() -> Self {
        EquipmentStats {
            weapon_damage: WeaponDamage::default(),
            attack_speed: 1.0,
            crit_chance: 0.0,
            crit_multiplier: 150,
            elemental_damage: None,
            weapon_type: String::new(),
        }
    }
}

impl EquipmentStats {
    /// Elemental damage with absent treated as zero
    pub fn elemental(&self) -> ElementalDamage {
        self.elemental_damage.unwrap_or_default()
    }

    /// Apply raw form input to one field; unparseable input becomes 0
    pub fn set_from_input(&mut self, field: EquipmentField, raw: &str) {
        match field {
            EquipmentField::WeaponMin => self.weapon_damage.min = parse_int_or_zero(raw),
            EquipmentField::WeaponMax => self.weapon_damage.max = parse_int_or_zero(raw),
            EquipmentField::AttackSpeed => self.attack_speed = parse_float_or_zero(raw),
            EquipmentField::CritChance => self.crit_chance = parse_float_or_zero(raw),
            EquipmentField::CritMultiplier => self.crit_multiplier = parse_int_or_zero(raw),
            EquipmentField::Elemental(element) => {
                let mut elemental = self.elemental();
                elemental.set(element, parse_int_or_zero(raw));
                self.elemental_damage = Some(elemental);
            }
        }
    }
}
