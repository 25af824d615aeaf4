//! Structures and the specialist professions they house
//!
//! A completed structure grants a fixed number of slots per profession.
//! Summing the grants of every completed structure gives the settlement's
//! specialist capacity.

use serde::{Deserialize, Serialize};

use crate::city::specialists::SpecialistCounter;
use crate::city::tiles::TileYield;
use crate::core::types::{ProfessionId, StructureId};

/// A specialist profession and what one specialist produces per turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profession {
    pub id: ProfessionId,
    pub yields: TileYield,
}

/// Catalog of all known professions
#[derive(Debug, Clone, Default)]
pub struct ProfessionCatalog {
    professions: Vec<Profession>,
}

impl ProfessionCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The four classic specialists
    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();
        catalog.add(Profession {
            id: "Scientist".into(),
            yields: TileYield::new(0.0, 0.0, 0.0, 3.0),
        });
        catalog.add(Profession {
            id: "Merchant".into(),
            yields: TileYield::new(0.0, 0.0, 2.0, 0.0),
        });
        catalog.add(Profession {
            id: "Engineer".into(),
            yields: TileYield::new(0.0, 2.0, 0.0, 0.0),
        });
        catalog.add(Profession {
            id: "Artist".into(),
            yields: TileYield::new(0.0, 0.0, 1.0, 1.0),
        });
        catalog
    }

    pub fn add(&mut self, profession: Profession) {
        self.professions.push(profession);
    }

    pub fn get(&self, id: &ProfessionId) -> Option<&Profession> {
        self.professions.iter().find(|p| &p.id == id)
    }

    pub fn contains(&self, id: &ProfessionId) -> bool {
        self.get(id).is_some()
    }

    /// Yield of one specialist of this profession (zero if unknown)
    pub fn yields_of(&self, id: &ProfessionId) -> TileYield {
        self.get(id).map(|p| p.yields).unwrap_or_default()
    }

    pub fn all(&self) -> &[Profession] {
        &self.professions
    }
}

/// Blueprint of a structure type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureTemplate {
    pub name: String,
    /// Profession slots granted once complete
    #[serde(default)]
    pub slots: SpecialistCounter,
}

/// Catalog of structure templates
#[derive(Debug, Clone, Default)]
pub struct StructureCatalog {
    templates: Vec<StructureTemplate>,
}

impl StructureCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();
        catalog.add(template("Granary", &[]));
        catalog.add(template("Library", &[("Scientist", 1)]));
        catalog.add(template("University", &[("Scientist", 2)]));
        catalog.add(template("Market", &[("Merchant", 1)]));
        catalog.add(template("Workshop", &[("Engineer", 1)]));
        catalog.add(template("Amphitheater", &[("Artist", 1)]));
        catalog
    }

    pub fn add(&mut self, template: StructureTemplate) {
        self.templates.push(template);
    }

    pub fn get(&self, name: &str) -> Option<&StructureTemplate> {
        self.templates
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }

    pub fn all(&self) -> &[StructureTemplate] {
        &self.templates
    }

    /// Create a structure from a template, returns None for unknown names
    pub fn instantiate(&self, name: &str, id: StructureId) -> Option<Structure> {
        self.get(name).map(|t| Structure {
            id,
            name: t.name.clone(),
            state: StructureState::UnderConstruction,
            slots: t.slots.clone(),
        })
    }
}

fn template(name: &str, slots: &[(&str, u32)]) -> StructureTemplate {
    StructureTemplate {
        name: name.into(),
        slots: slots
            .iter()
            .map(|(p, n)| (ProfessionId::from(*p), *n))
            .collect(),
    }
}

/// Current state of a structure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StructureState {
    /// Construction site - grants nothing yet
    UnderConstruction,
    /// Fully operational
    Complete,
    /// Sacked or burned - grants nothing until rebuilt
    Destroyed,
}

/// A structure standing in a settlement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Structure {
    pub id: StructureId,
    pub name: String,
    pub state: StructureState,
    pub slots: SpecialistCounter,
}

impl Structure {
    pub fn is_complete(&self) -> bool {
        self.state == StructureState::Complete
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalogs() {
        let professions = ProfessionCatalog::with_defaults();
        assert!(professions.contains(&"Scientist".into()));
        assert!((professions.yields_of(&"Scientist".into()).science - 3.0).abs() < 0.01);
        assert_eq!(professions.yields_of(&"Bard".into()), TileYield::default());

        let structures = StructureCatalog::with_defaults();
        let university = structures.get("university").expect("case-insensitive lookup");
        assert_eq!(university.slots.get(&"Scientist".into()), 2);
        assert!(structures.get("Granary").map(|t| t.slots.is_empty()).unwrap_or(false));
    }

    #[test]
    fn test_instantiate_starts_under_construction() {
        let catalog = StructureCatalog::with_defaults();
        let library = catalog.instantiate("Library", StructureId(1)).unwrap();
        assert_eq!(library.state, StructureState::UnderConstruction);
        assert!(!library.is_complete());
        assert_eq!(library.slots.get(&"Scientist".into()), 1);

        assert!(catalog.instantiate("Colosseum", StructureId(2)).is_none());
    }
}
