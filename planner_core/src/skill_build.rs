//! SkillBuild - Active and passive skill slots with their supports

use crate::catalog::{Catalog, Skill, SkillType};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ACTIVE_SLOTS: usize = 5;
pub const PASSIVE_SLOTS: usize = 4;
pub const SUPPORTS_PER_SLOT: usize = 5;

/// Which row of slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotKind {
    Active,
    Passive,
}

impl SlotKind {
    pub fn all() -> &'static [SlotKind] {
        &[SlotKind::Active, SlotKind::Passive]
    }

    /// Skill type a main skill in this row must have
    pub fn skill_type(&self) -> SkillType {
        match self {
            SlotKind::Active => SkillType::Active,
            SlotKind::Passive => SkillType::Passive,
        }
    }

    pub fn slot_count(&self) -> usize {
        match self {
            SlotKind::Active => ACTIVE_SLOTS,
            SlotKind::Passive => PASSIVE_SLOTS,
        }
    }
}

/// Rejected slot change; the build is left unchanged
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkillBuildError {
    #[error("No {kind:?} slot {index}")]
    SlotOutOfRange { kind: SlotKind, index: usize },
    #[error("No support position {0}")]
    SupportOutOfRange(usize),
    #[error("Skill '{skill}' is {actual:?}, expected {expected:?}")]
    WrongSkillType {
        skill: String,
        expected: SkillType,
        actual: SkillType,
    },
    #[error("Passive skill '{skill}' is already in passive slot {slot}")]
    PassiveAlreadySlotted { skill: String, slot: usize },
    #[error("Support skill '{0}' is already in this slot")]
    DuplicateSupport(String),
    #[error("Slot has no main skill")]
    EmptyMainSlot,
}

/// A main skill and its support positions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillSlot {
    pub main_skill: Option<Skill>,
    pub support_skills: Vec<Option<Skill>>,
}

impl Default for SkillSlot {
    fn default() -> Self {
        SkillSlot {
            main_skill: None,
            support_skills: vec![None; SUPPORTS_PER_SLOT],
        }
    }
}

impl SkillSlot {
    pub fn is_empty(&self) -> bool {
        self.main_skill.is_none()
    }

    /// Ids of the supports currently slotted
    pub fn support_ids(&self) -> Vec<&str> {
        self.support_skills
            .iter()
            .flatten()
            .map(|s| s.id.as_str())
            .collect()
    }
}

/// Full skill loadout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillBuild {
    active_slots: Vec<SkillSlot>,
    passive_slots: Vec<SkillSlot>,
}

impl Default for SkillBuild {
    fn default() -> Self {
        Self::new()
    }
}

impl SkillBuild {
    pub fn new() -> Self {
        SkillBuild {
            active_slots: vec![SkillSlot::default(); ACTIVE_SLOTS],
            passive_slots: vec![SkillSlot::default(); PASSIVE_SLOTS],
        }
    }

    pub fn slots(&self, kind: SlotKind) -> &[SkillSlot] {
        match kind {
            SlotKind::Active => &self.active_slots,
            SlotKind::Passive => &self.passive_slots,
        }
    }

    pub fn slot(&self, kind: SlotKind, index: usize) -> Result<&SkillSlot, SkillBuildError> {
        self.slots(kind)
            .get(index)
            .ok_or(SkillBuildError::SlotOutOfRange { kind, index })
    }

    fn slot_mut(
        &mut self,
        kind: SlotKind,
        index: usize,
    ) -> Result<&mut SkillSlot, SkillBuildError> {
        let slots = match kind {
            SlotKind::Active => &mut self.active_slots,
            SlotKind::Passive => &mut self.passive_slots,
        };
        slots
            .get_mut(index)
            .ok_or(SkillBuildError::SlotOutOfRange { kind, index })
    }

    /// Passive slot other than `except` already holding `skill_id`
    fn passive_slot_of(&self, skill_id: &str, except: usize) -> Option<usize> {
        self.passive_slots.iter().enumerate().find_map(|(i, slot)| {
            let holds = slot.main_skill.as_ref().is_some_and(|s| s.id == skill_id);
            (i != except && holds).then_some(i)
        })
    }

    /// Put a main skill in a slot; the slot's supports are cleared
    pub fn select_main(
        &mut self,
        kind: SlotKind,
        index: usize,
        skill: &Skill,
    ) -> Result<(), SkillBuildError> {
        self.slot(kind, index)?;
        let expected = kind.skill_type();
        if skill.skill_type != expected {
            return Err(SkillBuildError::WrongSkillType {
                skill: skill.id.clone(),
                expected,
                actual: skill.skill_type,
            });
        }
        if kind == SlotKind::Passive {
            if let Some(slot) = self.passive_slot_of(&skill.id, index) {
                return Err(SkillBuildError::PassiveAlreadySlotted {
                    skill: skill.id.clone(),
                    slot,
                });
            }
        }

        *self.slot_mut(kind, index)? = SkillSlot {
            main_skill: Some(skill.clone()),
            ..SkillSlot::default()
        };
        Ok(())
    }

    /// Put a support skill at one support position of a filled slot
    pub fn select_support(
        &mut self,
        kind: SlotKind,
        index: usize,
        position: usize,
        skill: &Skill,
    ) -> Result<(), SkillBuildError> {
        let slot = self.slot(kind, index)?;
        if slot.is_empty() {
            return Err(SkillBuildError::EmptyMainSlot);
        }
        if position >= SUPPORTS_PER_SLOT {
            return Err(SkillBuildError::SupportOutOfRange(position));
        }
        if skill.skill_type != SkillType::Support {
            return Err(SkillBuildError::WrongSkillType {
                skill: skill.id.clone(),
                expected: SkillType::Support,
                actual: skill.skill_type,
            });
        }
        let duplicate = slot
            .support_skills
            .iter()
            .enumerate()
            .any(|(i, s)| i != position && s.as_ref().is_some_and(|s| s.id == skill.id));
        if duplicate {
            return Err(SkillBuildError::DuplicateSupport(skill.id.clone()));
        }

        self.slot_mut(kind, index)?.support_skills[position] = Some(skill.clone());
        Ok(())
    }

    /// Empty a slot and its supports
    pub fn clear_slot(&mut self, kind: SlotKind, index: usize) -> Result<(), SkillBuildError> {
        *self.slot_mut(kind, index)? = SkillSlot::default();
        Ok(())
    }

    pub fn clear_support(
        &mut self,
        kind: SlotKind,
        index: usize,
        position: usize,
    ) -> Result<(), SkillBuildError> {
        let slot = self.slot_mut(kind, index)?;
        let support = slot
            .support_skills
            .get_mut(position)
            .ok_or(SkillBuildError::SupportOutOfRange(position))?;
        *support = None;
        Ok(())
    }

    /// Catalog skills that `select_main` would accept for the slot
    pub fn available_main_skills<'a>(
        &self,
        kind: SlotKind,
        index: usize,
        catalog: &'a Catalog,
    ) -> Vec<&'a Skill> {
        catalog
            .skills_of(kind.skill_type())
            .into_iter()
            .filter(|s| kind == SlotKind::Active || self.passive_slot_of(&s.id, index).is_none())
            .collect()
    }

    /// Support skills not already in the slot
    pub fn available_supports<'a>(
        &self,
        kind: SlotKind,
        index: usize,
        catalog: &'a Catalog,
    ) -> Vec<&'a Skill> {
        let existing = match self.slot(kind, index) {
            Ok(slot) => slot.support_ids(),
            Err(_) => return Vec::new(),
        };
        catalog
            .skills_of(SkillType::Support)
            .into_iter()
            .filter(|s| !existing.contains(&s.id.as_str()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skill(id: &str, kind: SkillType) -> Skill {
        Skill::new(id, id, kind)
    }

    fn test_catalog() -> Catalog {
        Catalog::new(
            Vec::new(),
            vec![
                skill("whirlwind", SkillType::Active),
                skill("fireball", SkillType::Active),
                skill("iron_skin", SkillType::Passive),
                skill("critical_strike", SkillType::Passive),
                skill("empower", SkillType::Support),
                skill("multiple_projectiles", SkillType::Support),
            ],
            Vec::new(),
        )
    }

    #[test]
    fn test_new_build_shape() {
        let build = SkillBuild::new();
        assert_eq!(build.slots(SlotKind::Active).len(), 5);
        assert_eq!(build.slots(SlotKind::Passive).len(), 4);
        for kind in SlotKind::all() {
            for slot in build.slots(*kind) {
                assert!(slot.is_empty());
                assert_eq!(slot.support_skills.len(), 5);
            }
        }
    }

    #[test]
    fn test_select_main_clears_supports() {
        let mut build = SkillBuild::new();
        build.select_main(SlotKind::Active, 0, &skill("whirlwind", SkillType::Active)).unwrap();
        build
            .select_support(SlotKind::Active, 0, 2, &skill("empower", SkillType::Support))
            .unwrap();
        assert_eq!(build.slot(SlotKind::Active, 0).unwrap().support_ids(), vec!["empower"]);

        build.select_main(SlotKind::Active, 0, &skill("fireball", SkillType::Active)).unwrap();
        assert!(build.slot(SlotKind::Active, 0).unwrap().support_ids().is_empty());
    }

    #[test]
    fn test_support_never_main() {
        let mut build = SkillBuild::new();
        let empower = skill("empower", SkillType::Support);
        let result = build.select_main(SlotKind::Active, 0, &empower);
        assert!(matches!(result, Err(SkillBuildError::WrongSkillType { .. })));

        let whirlwind = skill("whirlwind", SkillType::Active);
        let result = build.select_main(SlotKind::Passive, 0, &whirlwind);
        assert!(matches!(result, Err(SkillBuildError::WrongSkillType { .. })));
    }

    #[test]
    fn test_passive_only_once() {
        let mut build = SkillBuild::new();
        let iron_skin = skill("iron_skin", SkillType::Passive);
        build.select_main(SlotKind::Passive, 0, &iron_skin).unwrap();

        assert_eq!(
            build.select_main(SlotKind::Passive, 2, &iron_skin),
            Err(SkillBuildError::PassiveAlreadySlotted {
                skill: "iron_skin".to_string(),
                slot: 0
            })
        );
        // Re-selecting into the same slot is fine
        build.select_main(SlotKind::Passive, 0, &iron_skin).unwrap();

        let catalog = test_catalog();
        let available = build.available_main_skills(SlotKind::Passive, 1, &catalog);
        let ids: Vec<_> = available.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["critical_strike"]);

        let available = build.available_main_skills(SlotKind::Passive, 0, &catalog);
        assert_eq!(available.len(), 2);
    }

    #[test]
    fn test_support_rules() {
        let mut build = SkillBuild::new();
        let empower = skill("empower", SkillType::Support);

        assert_eq!(
            build.select_support(SlotKind::Active, 1, 0, &empower),
            Err(SkillBuildError::EmptyMainSlot)
        );

        build
            .select_main(SlotKind::Active, 1, &skill("whirlwind", SkillType::Active))
            .unwrap();
        build.select_support(SlotKind::Active, 1, 0, &empower).unwrap();
        assert_eq!(
            build.select_support(SlotKind::Active, 1, 3, &empower),
            Err(SkillBuildError::DuplicateSupport("empower".to_string()))
        );
        // Same position may be re-filled with the same support
        build.select_support(SlotKind::Active, 1, 0, &empower).unwrap();

        let fireball = skill("fireball", SkillType::Active);
        assert!(matches!(
            build.select_support(SlotKind::Active, 1, 1, &fireball),
            Err(SkillBuildError::WrongSkillType { .. })
        ));
        let multiple_projectiles = skill("multiple_projectiles", SkillType::Support);
        assert_eq!(
            build.select_support(SlotKind::Active, 1, 5, &multiple_projectiles),
            Err(SkillBuildError::SupportOutOfRange(5))
        );

        let catalog = test_catalog();
        let available = build.available_supports(SlotKind::Active, 1, &catalog);
        let ids: Vec<_> = available.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["multiple_projectiles"]);
    }

    #[test]
    fn test_clear_slot_and_support() {
        let mut build = SkillBuild::new();
        build
            .select_main(SlotKind::Active, 4, &skill("whirlwind", SkillType::Active))
            .unwrap();
        build
            .select_support(SlotKind::Active, 4, 1, &skill("empower", SkillType::Support))
            .unwrap();

        build.clear_support(SlotKind::Active, 4, 1).unwrap();
        assert!(build.slot(SlotKind::Active, 4).unwrap().support_ids().is_empty());
        assert!(!build.slot(SlotKind::Active, 4).unwrap().is_empty());

        build.clear_slot(SlotKind::Active, 4).unwrap();
        assert!(build.slot(SlotKind::Active, 4).unwrap().is_empty());

        assert_eq!(
            build.clear_slot(SlotKind::Passive, 4),
            Err(SkillBuildError::SlotOutOfRange {
                kind: SlotKind::Passive,
                index: 4
            })
        );
    }
}
