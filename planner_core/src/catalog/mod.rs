//! Catalog - read-only heroes, skills and talent books

pub mod builtin;
mod hero;
mod provider;
mod skill;

pub use hero::{trait_groups, Hero, HeroTrait, TraitError, TraitGroup, TraitSelections};
pub use provider::{
    load_catalog, load_catalog_cached, section_cache_key, BuiltinProvider, CatalogLoad,
    CatalogProvider, CatalogSection, DirectoryProvider,
};
pub use skill::{Skill, SkillType};

use crate::config::ConfigError;
use crate::talent::{TalentBook, TalentPage};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Catalog loading or lookup error
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Unknown hero: {0}")]
    UnknownHero(String),
    #[error("Unknown skill: {0}")]
    UnknownSkill(String),
    #[error("Unknown talent page: {0}")]
    UnknownPage(String),
}

/// In-memory catalog tables
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    heroes: Vec<Hero>,
    skills: Vec<Skill>,
    talent_books: Vec<TalentBook>,
}

impl Catalog {
    pub fn new(heroes: Vec<Hero>, skills: Vec<Skill>, talent_books: Vec<TalentBook>) -> Self {
        Catalog {
            heroes,
            skills,
            talent_books,
        }
    }

    /// Catalog served from the embedded data
    pub fn builtin() -> Self {
        let mut skills = Vec::new();
        for kind in SkillType::all() {
            skills.extend(builtin::skills(*kind));
        }
        Catalog::new(builtin::heroes(), skills, builtin::talent_books())
    }

    pub fn heroes(&self) -> &[Hero] {
        &self.heroes
    }

    pub fn hero(&self, hero_id: &str) -> Option<&Hero> {
        self.heroes.iter().find(|h| h.id == hero_id)
    }

    pub fn require_hero(&self, hero_id: &str) -> Result<&Hero, CatalogError> {
        self.hero(hero_id)
            .ok_or_else(|| CatalogError::UnknownHero(hero_id.to_string()))
    }

    /// A trait of the given hero
    pub fn hero_trait(&self, hero_id: &str, trait_id: &str) -> Option<&HeroTrait> {
        self.hero(hero_id).and_then(|h| h.find_trait(trait_id))
    }

    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    pub fn skill(&self, skill_id: &str) -> Option<&Skill> {
        self.skills.iter().find(|s| s.id == skill_id)
    }

    pub fn require_skill(&self, skill_id: &str) -> Result<&Skill, CatalogError> {
        self.skill(skill_id)
            .ok_or_else(|| CatalogError::UnknownSkill(skill_id.to_string()))
    }

    /// Skills of one type, in catalog order
    pub fn skills_of(&self, kind: SkillType) -> Vec<&Skill> {
        self.skills.iter().filter(|s| s.skill_type == kind).collect()
    }

    pub fn talent_books(&self) -> &[TalentBook] {
        &self.talent_books
    }

    pub fn talent_book(&self, book_id: &str) -> Option<&TalentBook> {
        self.talent_books.iter().find(|b| b.id == book_id)
    }

    /// Find a page in any book
    pub fn talent_page(&self, page_id: &str) -> Option<&TalentPage> {
        self.talent_books.iter().find_map(|b| b.find_page(page_id))
    }

    pub fn require_page(&self, page_id: &str) -> Result<&TalentPage, CatalogError> {
        self.talent_page(page_id)
            .ok_or_else(|| CatalogError::UnknownPage(page_id.to_string()))
    }

    pub fn is_empty(&self) -> bool {
        self.heroes.is_empty() && self.skills.is_empty() && self.talent_books.is_empty()
    }

    /// Problems found in talent page references
    pub fn validate(&self) -> Vec<String> {
        self.talent_books
            .iter()
            .flat_map(|b| b.pages.iter())
            .flat_map(|p| p.validate())
            .collect()
    }
}
