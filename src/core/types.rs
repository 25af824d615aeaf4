//! Core type definitions used throughout the codebase

use derive_more::Display;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for settlements
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[display(fmt = "settlement-{}", _0)]
pub struct SettlementId(pub Uuid);

impl SettlementId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SettlementId {
    fn default() -> Self {
        Self::new()
    }
}

/// Unique identifier for civilizations (tile and settlement owners)
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[display(fmt = "civ-{}", _0)]
pub struct CivId(pub u32);

impl CivId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

/// Identifier of a specialist profession ("Scientist", "Merchant", ...)
#[derive(
    Debug, Display, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ProfessionId(pub String);

impl ProfessionId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProfessionId {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

/// Identifier of a structure built inside a settlement
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StructureId(pub u32);

/// Simulation turn counter
pub type Turn = u32;

/// Axial hex coordinate of a map tile
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[display(fmt = "({}, {})", q, r)]
pub struct TilePosition {
    pub q: i32,
    pub r: i32,
}

impl TilePosition {
    pub fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Cube coordinate S (derived from q and r)
    pub fn s(&self) -> i32 {
        -self.q - self.r
    }

    /// Number of hex steps between two tiles
    pub fn distance(&self, other: &Self) -> u32 {
        let dq = (self.q - other.q).abs();
        let dr = (self.r - other.r).abs();
        let ds = (self.s() - other.s()).abs();
        ((dq + dr + ds) / 2) as u32
    }

    /// All tiles within range (inclusive), center first, then ring by ring
    pub fn tiles_in_range(&self, range: u32) -> Vec<TilePosition> {
        let range = range as i32;
        let mut results = Vec::new();
        for ring in 0..=range {
            for q in -ring..=ring {
                for r in (-ring).max(-q - ring)..=ring.min(-q + ring) {
                    let candidate = TilePosition::new(self.q + q, self.r + r);
                    if self.distance(&candidate) == ring as u32 {
                        results.push(candidate);
                    }
                }
            }
        }
        results
    }
}
