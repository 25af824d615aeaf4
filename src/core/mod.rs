pub mod config;
pub mod error;
pub mod types;

pub use config::{BalanceConstants, Difficulty, GameConfig, GameSpeed};
pub use error::{ConfigError, PopulationError, Result};
pub use types::{CivId, ProfessionId, SettlementId, StructureId, TilePosition, Turn};
