//! Map tiles around settlements

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::{CivId, SettlementId, TilePosition};

/// Per-turn output of a tile or a specialist
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileYield {
    pub food: f32,
    pub production: f32,
    pub gold: f32,
    pub science: f32,
}

impl TileYield {
    pub fn new(food: f32, production: f32, gold: f32, science: f32) -> Self {
        Self {
            food,
            production,
            gold,
            science,
        }
    }

    pub fn food(food: f32) -> Self {
        Self {
            food,
            ..Self::default()
        }
    }
}

impl std::ops::Add for TileYield {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self {
            food: self.food + rhs.food,
            production: self.production + rhs.production,
            gold: self.gold + rhs.gold,
            science: self.science + rhs.science,
        }
    }
}

impl std::ops::AddAssign for TileYield {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl std::ops::Mul<f32> for TileYield {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self {
            food: self.food * rhs,
            production: self.production * rhs,
            gold: self.gold * rhs,
            science: self.science * rhs,
        }
    }
}

/// A single map tile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub position: TilePosition,
    /// Civilization whose borders contain this tile
    pub owner: Option<CivId>,
    /// Settlement currently working this tile
    pub working_settlement: Option<SettlementId>,
    /// Settlement centers always yield and can't be assigned
    pub is_settlement_center: bool,
    pub yields: TileYield,
}

impl Tile {
    pub fn new(position: TilePosition, yields: TileYield) -> Self {
        Self {
            position,
            owner: None,
            working_settlement: None,
            is_settlement_center: false,
            yields,
        }
    }

    pub fn with_owner(mut self, owner: CivId) -> Self {
        self.owner = Some(owner);
        self
    }

    /// True if some settlement already collects this tile's output
    pub fn provides_yield(&self) -> bool {
        self.is_settlement_center || self.working_settlement.is_some()
    }
}

/// Sparse hex map keyed by position
#[derive(Debug, Clone, Default)]
pub struct TileMap {
    tiles: AHashMap<TilePosition, Tile>,
}

impl TileMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, tile: Tile) {
        self.tiles.insert(tile.position, tile);
    }

    pub fn get(&self, position: TilePosition) -> Option<&Tile> {
        self.tiles.get(&position)
    }

    pub fn get_mut(&mut self, position: TilePosition) -> Option<&mut Tile> {
        self.tiles.get_mut(&position)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Change the owning civilization, returns false if the tile doesn't exist
    pub fn set_owner(&mut self, position: TilePosition, owner: Option<CivId>) -> bool {
        match self.tiles.get_mut(&position) {
            Some(tile) => {
                tile.owner = owner;
                true
            }
            None => false,
        }
    }

    /// Existing tiles within `radius` of `center`, nearest rings first
    pub fn tiles_in_range(&self, center: TilePosition, radius: u32) -> Vec<Tile> {
        center
            .tiles_in_range(radius)
            .into_iter()
            .filter_map(|position| self.tiles.get(&position).copied())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provides_yield() {
        let mut tile = Tile::new(TilePosition::new(1, 0), TileYield::food(2.0));
        assert!(!tile.provides_yield());

        tile.working_settlement = Some(SettlementId::new());
        assert!(tile.provides_yield());

        let mut center = Tile::new(TilePosition::new(0, 0), TileYield::food(2.0));
        center.is_settlement_center = true;
        assert!(center.provides_yield());
    }

    #[test]
    fn test_yield_arithmetic() {
        let a = TileYield::new(2.0, 1.0, 0.0, 0.0);
        let b = TileYield::new(1.0, 0.0, 3.0, 1.0);
        let mut sum = a + b;
        assert_eq!(sum, TileYield::new(3.0, 1.0, 3.0, 1.0));

        sum += TileYield::food(1.0);
        assert!((sum.food - 4.0).abs() < f32::EPSILON);
        assert_eq!(a * 2.0, TileYield::new(4.0, 2.0, 0.0, 0.0));
    }

    #[test]
    fn test_tiles_in_range_skips_missing() {
        let mut map = TileMap::new();
        let center = TilePosition::new(0, 0);
        map.insert(Tile::new(center, TileYield::food(2.0)));
        map.insert(Tile::new(TilePosition::new(1, 0), TileYield::food(1.0)));
        map.insert(Tile::new(TilePosition::new(5, 0), TileYield::food(1.0)));

        let tiles = map.tiles_in_range(center, 3);
        assert_eq!(tiles.len(), 2);
        assert_eq!(tiles[0].position, center);
    }

    #[test]
    fn test_set_owner() {
        let mut map = TileMap::new();
        let pos = TilePosition::new(0, 1);
        map.insert(Tile::new(pos, TileYield::default()));

        assert!(map.set_owner(pos, Some(CivId(7))));
        assert_eq!(map.get(pos).and_then(|t| t.owner), Some(CivId(7)));
        assert!(!map.set_owner(TilePosition::new(9, 9), None));
    }
}
