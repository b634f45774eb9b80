//! Catalog providers and the load-with-fallback sequence

use super::builtin;
use super::{Catalog, CatalogError, Hero, Skill, SkillType};
use crate::config::ConfigError;
use crate::store::{KeyValueStore, TtlCache};
use crate::talent::TalentBook;
use crate::types::{CharacterStats, EquipmentStats};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Source of catalog data
pub trait CatalogProvider {
    /// Short label used in logs
    fn name(&self) -> &str;
    fn heroes(&self) -> Result<Vec<Hero>, CatalogError>;
    fn skills(&self, kind: SkillType) -> Result<Vec<Skill>, CatalogError>;
    fn default_stats(&self) -> Result<CharacterStats, CatalogError>;
    fn default_equipment(&self) -> Result<EquipmentStats, CatalogError>;
    fn talent_books(&self) -> Result<Vec<TalentBook>, CatalogError>;

    /// Identifies the data source within cache keys; two providers that can
    /// serve different data must return different scopes
    fn cache_scope(&self) -> String {
        self.name().to_string()
    }
}

/// Serves the embedded catalog; never fails
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinProvider;

impl CatalogProvider for BuiltinProvider {
    fn name(&self) -> &str {
        "builtin"
    }

    fn heroes(&self) -> Result<Vec<Hero>, CatalogError> {
        Ok(builtin::heroes())
    }

    fn skills(&self, kind: SkillType) -> Result<Vec<Skill>, CatalogError> {
        Ok(builtin::skills(kind))
    }

    fn default_stats(&self) -> Result<CharacterStats, CatalogError> {
        Ok(builtin::default_stats())
    }

    fn default_equipment(&self) -> Result<EquipmentStats, CatalogError> {
        Ok(builtin::default_equipment())
    }

    fn talent_books(&self) -> Result<Vec<TalentBook>, CatalogError> {
        Ok(builtin::talent_books())
    }
}

/// Reads `heroes.toml`, `skills.toml`, `talents.toml` and `defaults.toml` from a directory
#[derive(Debug, Clone)]
pub struct DirectoryProvider {
    dir: PathBuf,
}

impl DirectoryProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DirectoryProvider { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn read(&self, file: &str) -> Result<String, CatalogError> {
        let content = fs::read_to_string(self.dir.join(file)).map_err(ConfigError::from)?;
        Ok(content)
    }
}

impl CatalogProvider for DirectoryProvider {
    fn name(&self) -> &str {
        "directory"
    }

    fn heroes(&self) -> Result<Vec<Hero>, CatalogError> {
        let mut heroes = builtin::parse_heroes(&self.read("heroes.toml")?)?;
        for hero in &mut heroes {
            mark_level_one_default(hero);
        }
        Ok(heroes)
    }

    fn skills(&self, kind: SkillType) -> Result<Vec<Skill>, CatalogError> {
        Ok(builtin::parse_skills(&self.read("skills.toml")?, kind)?)
    }

    fn default_stats(&self) -> Result<CharacterStats, CatalogError> {
        Ok(builtin::parse_defaults(&self.read("defaults.toml")?)?.0)
    }

    fn default_equipment(&self) -> Result<EquipmentStats, CatalogError> {
        Ok(builtin::parse_defaults(&self.read("defaults.toml")?)?.1)
    }

    fn talent_books(&self) -> Result<Vec<TalentBook>, CatalogError> {
        Ok(builtin::parse_talent_books(&self.read("talents.toml")?)?)
    }

    /// The directory itself, canonicalized when it exists
    fn cache_scope(&self) -> String {
        let dir = fs::canonicalize(&self.dir).unwrap_or_else(|_| self.dir.clone());
        format!("{}:{}", self.name(), dir.display())
    }
}

/// External data rarely flags defaults; a hero with none gets its level-1 traits flagged
fn mark_level_one_default(hero: &mut Hero) {
    if hero.traits.iter().any(|t| t.is_default) {
        return;
    }
    for t in hero.traits.iter_mut().filter(|t| t.unlock_level == 1) {
        t.is_default = true;
    }
}

/// One independently loaded part of the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogSection {
    Heroes,
    ActiveSkills,
    PassiveSkills,
    SupportSkills,
    DefaultStats,
    DefaultEquipment,
    TalentBooks,
}

impl CatalogSection {
    pub fn all() -> &'static [CatalogSection] {
        &[
            CatalogSection::Heroes,
            CatalogSection::ActiveSkills,
            CatalogSection::PassiveSkills,
            CatalogSection::SupportSkills,
            CatalogSection::DefaultStats,
            CatalogSection::DefaultEquipment,
            CatalogSection::TalentBooks,
        ]
    }

    /// Section name; cache keys combine it with the provider's scope
    pub fn key(&self) -> &'static str {
        match self {
            CatalogSection::Heroes => "heroes",
            CatalogSection::ActiveSkills => "skills_active",
            CatalogSection::PassiveSkills => "skills_passive",
            CatalogSection::SupportSkills => "skills_support",
            CatalogSection::DefaultStats => "default_stats",
            CatalogSection::DefaultEquipment => "default_equipment",
            CatalogSection::TalentBooks => "talent_books",
        }
    }

    fn for_skills(kind: SkillType) -> CatalogSection {
        match kind {
            SkillType::Active => CatalogSection::ActiveSkills,
            SkillType::Passive => CatalogSection::PassiveSkills,
            SkillType::Support => CatalogSection::SupportSkills,
        }
    }
}

/// Result of a startup catalog load
#[derive(Debug, Clone)]
pub struct CatalogLoad {
    pub catalog: Catalog,
    pub default_stats: CharacterStats,
    pub default_equipment: EquipmentStats,
    /// Sections served from built-in data because the provider failed
    pub fallbacks: Vec<CatalogSection>,
}

impl CatalogLoad {
    /// Every section failed; a front end reports a data load failure
    pub fn all_failed(&self) -> bool {
        CatalogSection::all()
            .iter()
            .all(|s| self.fallbacks.contains(s))
    }

    pub fn used_fallback(&self) -> bool {
        !self.fallbacks.is_empty()
    }
}

/// Load every section, replacing failures with built-in data
pub fn load_catalog(provider: &dyn CatalogProvider) -> CatalogLoad {
    Loader::new(provider, None).run()
}

/// As `load_catalog`, consulting a TTL cache first and caching fresh results
pub fn load_catalog_cached<S: KeyValueStore>(
    provider: &dyn CatalogProvider,
    cache: &mut TtlCache<S>,
) -> CatalogLoad {
    Loader::new(provider, Some(cache)).run()
}

/// Cache view used by the loader, erased over the backing store
trait SectionCache {
    fn lookup(&mut self, key: &str) -> Option<Value>;
    fn remember(&mut self, key: &str, value: &Value);
}

impl<S: KeyValueStore> SectionCache for TtlCache<S> {
    fn lookup(&mut self, key: &str) -> Option<Value> {
        match self.get::<Value>(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "catalog cache read failed");
                None
            }
        }
    }

    fn remember(&mut self, key: &str, value: &Value) {
        if let Err(e) = self.set(key, value) {
            tracing::warn!(key, error = %e, "catalog cache write failed");
        }
    }
}

/// Cache key for one section as served by the provider with the given scope
pub fn section_cache_key(section: CatalogSection, scope: &str) -> String {
    format!("{}@{}", section.key(), scope)
}

struct Loader<'a> {
    provider: &'a dyn CatalogProvider,
    cache: Option<&'a mut dyn SectionCache>,
    scope: String,
    fallbacks: Vec<CatalogSection>,
}

impl<'a> Loader<'a> {
    fn new(provider: &'a dyn CatalogProvider, cache: Option<&'a mut dyn SectionCache>) -> Self {
        Loader {
            provider,
            cache,
            scope: provider.cache_scope(),
            fallbacks: Vec::new(),
        }
    }

    fn run(mut self) -> CatalogLoad {
        let heroes = self.section(CatalogSection::Heroes, |p| p.heroes(), builtin::heroes);

        let mut skills = Vec::new();
        for kind in SkillType::all() {
            let kind = *kind;
            skills.extend(self.section(
                CatalogSection::for_skills(kind),
                |p| p.skills(kind),
                || builtin::skills(kind),
            ));
        }

        let default_stats = self.section(
            CatalogSection::DefaultStats,
            |p| p.default_stats(),
            builtin::default_stats,
        );
        let default_equipment = self.section(
            CatalogSection::DefaultEquipment,
            |p| p.default_equipment(),
            builtin::default_equipment,
        );
        let talent_books = self.section(
            CatalogSection::TalentBooks,
            |p| p.talent_books(),
            builtin::talent_books,
        );

        let catalog = Catalog::new(heroes, skills, talent_books);
        for problem in catalog.validate() {
            tracing::warn!(provider = self.provider.name(), "{}", problem);
        }

        tracing::info!(
            provider = self.provider.name(),
            heroes = catalog.heroes().len(),
            skills = catalog.skills().len(),
            talent_books = catalog.talent_books().len(),
            fallbacks = self.fallbacks.len(),
            "catalog loaded"
        );

        CatalogLoad {
            catalog,
            default_stats,
            default_equipment,
            fallbacks: self.fallbacks,
        }
    }

    fn section<T, F, D>(&mut self, section: CatalogSection, fetch: F, fallback: D) -> T
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(&dyn CatalogProvider) -> Result<T, CatalogError>,
        D: FnOnce() -> T,
    {
        let scoped = section_cache_key(section, &self.scope);
        let key = scoped.as_str();
        if let Some(cache) = self.cache.as_deref_mut() {
            if let Some(value) = cache.lookup(key) {
                match serde_json::from_value(value) {
                    Ok(data) => {
                        tracing::debug!(key, "catalog section served from cache");
                        return data;
                    }
                    Err(e) => tracing::warn!(key, error = %e, "cached catalog section unreadable"),
                }
            }
        }

        match fetch(self.provider) {
            Ok(data) => {
                if let Some(cache) = self.cache.as_deref_mut() {
                    match serde_json::to_value(&data) {
                        Ok(value) => cache.remember(key, &value),
                        Err(e) => tracing::warn!(key, error = %e, "catalog section not cacheable"),
                    }
                }
                data
            }
            Err(e) => {
                tracing::warn!(
                    provider = self.provider.name(),
                    key,
                    error = %e,
                    "catalog section failed, using built-in data"
                );
                self.fallbacks.push(section);
                fallback()
            }
        }
    }
}
