//! City layer - land, structures, rules and the settlement that owns them

pub mod notifications;
pub mod religion;
pub mod rules;
pub mod ruleset;
pub mod settlement;
pub mod specialists;
pub mod stats;
pub mod structures;
pub mod tiles;
pub mod turn;

pub use notifications::{Notification, NotificationCategory, Outbox};
pub use religion::ReligionTracker;
pub use rules::{Modifier, ModifierKind, RuleSet};
pub use ruleset::Ruleset;
pub use settlement::Settlement;
pub use specialists::SpecialistCounter;
pub use stats::SettlementStats;
pub use structures::{Profession, ProfessionCatalog, Structure, StructureCatalog, StructureState};
pub use tiles::{Tile, TileMap, TileYield};
pub use turn::{City, TurnReport};
