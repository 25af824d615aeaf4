//! Load professions, structures and modifiers from TOML

use std::path::Path;

use serde::Deserialize;

use crate::city::rules::{Modifier, RuleSet};
use crate::city::structures::{
    Profession, ProfessionCatalog, StructureCatalog, StructureTemplate,
};
use crate::city::tiles::TileYield;
use crate::core::error::ConfigError;
use crate::core::types::ProfessionId;

/// Everything a settlement needs from the game rules
#[derive(Debug, Clone, Default)]
pub struct Ruleset {
    pub professions: ProfessionCatalog,
    pub structures: StructureCatalog,
    pub modifiers: RuleSet,
}

impl Ruleset {
    /// Built-in professions and structures, no modifiers
    pub fn with_defaults() -> Self {
        Self {
            professions: ProfessionCatalog::with_defaults(),
            structures: StructureCatalog::with_defaults(),
            modifiers: RuleSet::new(),
        }
    }

    /// Load a ruleset from a TOML file
    pub fn load_from_toml(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Parse a ruleset from a TOML string
    pub fn parse_toml(content: &str) -> Result<Self, ConfigError> {
        let data: TomlRuleset = toml::from_str(content)?;

        let mut professions = ProfessionCatalog::new();
        for p in data.professions {
            professions.add(Profession {
                id: ProfessionId::new(p.id),
                yields: p.yields,
            });
        }

        let mut structures = StructureCatalog::new();
        for template in data.structures {
            if let Some(unknown) = template
                .slots
                .professions()
                .find(|id| !professions.contains(id))
            {
                return Err(ConfigError::UnknownProfession(unknown.to_string()));
            }
            structures.add(template);
        }

        Ok(Self {
            professions,
            structures,
            modifiers: RuleSet {
                modifiers: data.modifiers,
            },
        })
    }
}

/// TOML representation of the rules file
#[derive(Debug, Deserialize)]
struct TomlRuleset {
    #[serde(default)]
    professions: Vec<TomlProfession>,
    #[serde(default)]
    structures: Vec<StructureTemplate>,
    #[serde(default)]
    modifiers: Vec<Modifier>,
}

#[derive(Debug, Deserialize)]
struct TomlProfession {
    id: String,
    #[serde(flatten)]
    yields: TileYield,
}
