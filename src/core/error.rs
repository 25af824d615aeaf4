use thiserror::Error;

use crate::core::types::{ProfessionId, SettlementId, TilePosition};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PopulationError {
    #[error("Population manager is not attached to a settlement")]
    Detached,

    #[error("Population manager belongs to {expected}, called with {found}")]
    SettlementMismatch {
        expected: SettlementId,
        found: SettlementId,
    },

    #[error("No free population to assign")]
    NoFreePopulation,

    #[error("No free {0} slot in this settlement")]
    NoSpecialistSlot(ProfessionId),

    #[error("No {0} is currently staffed")]
    NotStaffed(ProfessionId),

    #[error("Tile {0} cannot be worked by this settlement")]
    TileNotWorkable(TilePosition),

    #[error("Tile {0} is not worked by this settlement")]
    TileNotWorked(TilePosition),
}

pub type Result<T> = std::result::Result<T, PopulationError>;

/// Errors raised while loading configuration and rule data
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Unknown profession: {0}")]
    UnknownProfession(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
