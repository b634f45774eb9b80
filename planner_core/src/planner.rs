//! Planner - Controller owning the catalog and every piece of build state

use crate::catalog::{
    trait_groups, Catalog, CatalogError, CatalogLoad, SkillType, TraitError, TraitGroup,
};
use crate::character::CharacterConfiguration;
use crate::config::PlannerConstants;
use crate::damage::{calculate_damage_with, DamageResult};
use crate::skill_build::{SkillBuild, SkillBuildError};
use crate::store::{KeyValueStore, SavedConfig, StoreError};
use crate::talent::{
    AllocationOutcome, PageAllocation, TalentAllocator, TalentBonuses, TalentBuild, TalentError,
};
use crate::types::{Attribute, CharacterStats, EquipmentField, EquipmentStats};
use chrono::Utc;
use thiserror::Error;

/// Planner operation error
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("No hero selected")]
    NoHero,
    #[error("No skill selected")]
    NoSkill,
    #[error("Character stats not loaded")]
    NoStats,
    #[error("Equipment not loaded")]
    NoEquipment,
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Trait(#[from] TraitError),
    #[error(transparent)]
    Talent(#[from] TalentError),
    #[error(transparent)]
    SkillBuild(#[from] SkillBuildError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Allocated bonuses of one page in the talent build
#[derive(Debug, Clone, PartialEq)]
pub struct PageSummary {
    pub page_id: String,
    pub points: u32,
    pub bonuses: TalentBonuses,
}

/// Talent bonuses across the talent build
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TalentSummary {
    pub pages: Vec<PageSummary>,
    pub total: TalentBonuses,
}

/// Single owner of the session's build state
#[derive(Debug, Clone)]
pub struct Planner {
    catalog: Catalog,
    constants: PlannerConstants,
    default_stats: CharacterStats,
    default_equipment: EquipmentStats,
    config: CharacterConfiguration,
    skill_build: SkillBuild,
    talent_build: TalentBuild,
    talents: TalentAllocator,
}

impl Planner {
    pub fn new(load: CatalogLoad) -> Self {
        Self::with_constants(load, PlannerConstants::default())
    }

    /// Start from the first hero (with its default trait) and the first active skill
    pub fn with_constants(load: CatalogLoad, constants: PlannerConstants) -> Self {
        let CatalogLoad {
            catalog,
            default_stats,
            default_equipment,
            ..
        } = load;

        let mut config = CharacterConfiguration {
            skill_id: catalog
                .skills_of(SkillType::Active)
                .first()
                .map(|s| s.id.clone()),
            stats: Some(default_stats),
            equipment: Some(default_equipment.clone()),
            ..Default::default()
        };
        if let Some(hero) = catalog.heroes().first() {
            config.set_hero(hero);
        }

        Planner {
            talent_build: TalentBuild::new(constants.talents.pages_per_build),
            talents: TalentAllocator::new(constants.talents.clone()),
            catalog,
            constants,
            default_stats,
            default_equipment,
            config,
            skill_build: SkillBuild::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn constants(&self) -> &PlannerConstants {
        &self.constants
    }

    pub fn config(&self) -> &CharacterConfiguration {
        &self.config
    }

    // === Character ===

    /// Change hero; trait picks reset to the new hero's default
    pub fn select_hero(&mut self, hero_id: &str) -> Result<(), PlannerError> {
        let hero = self.catalog.require_hero(hero_id)?;
        self.config.set_hero(hero);
        tracing::debug!(hero = hero_id, "hero selected");
        Ok(())
    }

    pub fn select_trait(&mut self, level: u32, trait_id: &str) -> Result<(), PlannerError> {
        let hero_id = self.config.hero_id.as_deref().ok_or(PlannerError::NoHero)?;
        let hero = self.catalog.require_hero(hero_id)?;
        self.config.traits.select(hero, level, trait_id)?;
        Ok(())
    }

    /// Trait groups for the selected hero, empty without one
    pub fn trait_groups(&self) -> Vec<TraitGroup<'_>> {
        match self.config.hero_id.as_deref().and_then(|id| self.catalog.hero(id)) {
            Some(hero) => trait_groups(hero, &self.config.traits),
            None => Vec::new(),
        }
    }

    /// Choose the skill to calculate; only active skills qualify
    pub fn select_skill(&mut self, skill_id: &str) -> Result<(), PlannerError> {
        let skill = self.catalog.require_skill(skill_id)?;
        if skill.skill_type != SkillType::Active {
            return Err(SkillBuildError::WrongSkillType {
                skill: skill.id.clone(),
                expected: SkillType::Active,
                actual: skill.skill_type,
            }
            .into());
        }
        self.config.skill_id = Some(skill_id.to_string());
        Ok(())
    }

    pub fn set_skill_level(&mut self, level: u32) {
        self.config.skill_level = level;
    }

    pub fn set_stat_input(&mut self, attribute: Attribute, raw: &str) {
        self.config.set_stat_input(attribute, raw);
    }

    pub fn set_equipment_input(&mut self, field: EquipmentField, raw: &str) {
        self.config.set_equipment_input(field, raw);
    }

    pub fn set_stats(&mut self, stats: CharacterStats) {
        self.config.stats = Some(stats);
    }

    pub fn set_equipment(&mut self, equipment: EquipmentStats) {
        self.config.equipment = Some(equipment);
    }

    /// Restore the loaded default stats and equipment
    pub fn reset_stats_and_equipment(&mut self) {
        self.config.stats = Some(self.default_stats);
        self.config.equipment = Some(self.default_equipment.clone());
    }

    // === Damage ===

    /// Run the damage calculation on the current configuration
    ///
    /// Talent bonuses are not part of the inputs; see `talent_summary`.
    pub fn calculate(&self) -> Result<DamageResult, PlannerError> {
        let params = self.config.snapshot()?;
        let result = calculate_damage_with(&params, &self.catalog, &self.constants.damage);
        tracing::debug!(
            hero = %params.hero_id,
            skill = %params.skill_id,
            total = result.total,
            dps = result.dps,
            "damage calculated"
        );
        Ok(result)
    }

    // === Skills ===

    pub fn skill_build(&self) -> &SkillBuild {
        &self.skill_build
    }

    pub fn skill_build_mut(&mut self) -> &mut SkillBuild {
        &mut self.skill_build
    }

    // === Talents ===

    pub fn talent_build(&self) -> &TalentBuild {
        &self.talent_build
    }

    pub fn talents(&self) -> &TalentAllocator {
        &self.talents
    }

    /// Add a page to the talent build
    pub fn add_talent_page(&mut self, page_id: &str) -> Result<(), PlannerError> {
        let page = self.catalog.require_page(page_id)?;
        self.talent_build.select_page(page)?;
        Ok(())
    }

    /// Remove a page from the build along with its allocation progress
    pub fn remove_talent_page(&mut self, page_id: &str) -> bool {
        let removed = self.talent_build.remove_page(page_id);
        if removed {
            self.talents.forget(page_id);
        }
        removed
    }

    /// Open a page for allocation; it must be in the talent build
    pub fn open_talent_page(&mut self, page_id: &str) -> Result<&PageAllocation, PlannerError> {
        if !self.talent_build.contains(page_id) {
            return Err(TalentError::UnknownPage(page_id.to_string()).into());
        }
        let page = self.catalog.require_page(page_id)?;
        Ok(self.talents.open(page))
    }

    pub fn allocate_talent(&mut self, node_id: &str) -> Result<AllocationOutcome, PlannerError> {
        let outcome = self.talents.allocate(node_id)?;
        self.talents.commit();
        Ok(outcome)
    }

    pub fn reset_talent_page(&mut self) -> Result<(), PlannerError> {
        self.talents.reset()?;
        Ok(())
    }

    /// Empty the talent build and every page's progress
    pub fn reset_talents(&mut self) {
        for page in self.talent_build.selected_pages() {
            self.talents.forget(&page.id);
        }
        self.talents.close();
        self.talent_build.reset();
    }

    /// Per-page and combined bonuses over the pages in the build
    pub fn talent_summary(&self) -> TalentSummary {
        let mut summary = TalentSummary::default();
        for page in self.talent_build.selected_pages() {
            let bonuses = self.talents.bonuses_for(&page.id);
            let points = match self.talents.current() {
                Some(current) if current.page_id == page.id => current.total_allocated_points(),
                _ => self
                    .talents
                    .saved(&page.id)
                    .map(PageAllocation::total_allocated_points)
                    .unwrap_or(0),
            };
            summary.total.merge(&bonuses);
            summary.pages.push(PageSummary {
                page_id: page.id.clone(),
                points,
                bonuses,
            });
        }
        summary
    }

    // === Persistence ===

    /// Save the configuration under the standard key
    pub fn save<S: KeyValueStore + ?Sized>(
        &self,
        store: &mut S,
    ) -> Result<SavedConfig, PlannerError> {
        let saved = self.config.to_saved(Utc::now())?;
        saved.save(store)?;
        Ok(saved)
    }

    /// Replace the configuration with the last save; returns false when nothing was saved
    pub fn load<S: KeyValueStore + ?Sized>(&mut self, store: &S) -> Result<bool, PlannerError> {
        match SavedConfig::load(store)? {
            Some(saved) => {
                if self.catalog.hero(&saved.hero_id).is_none() {
                    tracing::warn!(
                        hero = %saved.hero_id,
                        "saved configuration names an unknown hero"
                    );
                }
                self.config = CharacterConfiguration::from_saved(&saved, &self.catalog);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
