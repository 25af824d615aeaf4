//! Default job ranking for automated worker placement
//!
//! Weighs each yield by a fixed factor and leans harder on food while the
//! settlement is short of it.

use crate::city::stats::SettlementStats;
use crate::city::structures::ProfessionCatalog;
use crate::city::tiles::{Tile, TileYield};
use crate::core::types::ProfessionId;
use crate::population::oracle::ValuationOracle;

/// Relative worth of one unit of each yield
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YieldWeights {
    pub food: f32,
    pub production: f32,
    pub gold: f32,
    pub science: f32,
    /// Extra food weight while net food is below zero
    pub starving_food_bonus: f32,
}

impl Default for YieldWeights {
    fn default() -> Self {
        Self {
            food: 1.0,
            production: 1.0,
            gold: 0.7,
            science: 0.8,
            starving_food_bonus: 2.0,
        }
    }
}

/// Ranks tiles and professions by weighted yield
#[derive(Debug, Clone)]
pub struct YieldValuation {
    professions: ProfessionCatalog,
    pub weights: YieldWeights,
}

impl YieldValuation {
    pub fn new(professions: ProfessionCatalog) -> Self {
        Self {
            professions,
            weights: YieldWeights::default(),
        }
    }

    fn score(&self, yields: &TileYield, stats: &SettlementStats) -> f32 {
        let mut food_weight = self.weights.food;
        if stats.net.food < 0.0 {
            food_weight += self.weights.starving_food_bonus;
        }
        yields.food * food_weight
            + yields.production * self.weights.production
            + yields.gold * self.weights.gold
            + yields.science * self.weights.science
    }
}

impl ValuationOracle for YieldValuation {
    fn rank_tile(&self, tile: &Tile, stats: &SettlementStats) -> f32 {
        self.score(&tile.yields, stats)
    }

    fn rank_specialist(&self, profession: &ProfessionId, stats: &SettlementStats) -> f32 {
        self.score(&self.professions.yields_of(profession), stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::TilePosition;

    #[test]
    fn test_tile_rank_is_weighted_sum() {
        let valuation = YieldValuation::new(ProfessionCatalog::with_defaults());
        let tile = Tile::new(TilePosition::new(1, 0), TileYield::new(2.0, 1.0, 1.0, 0.0));
        let stats = SettlementStats::from_parts(TileYield::food(6.0), 2.0);

        // 2*1.0 + 1*1.0 + 1*0.7
        assert!((valuation.rank_tile(&tile, &stats) - 3.7).abs() < 0.001);
    }

    #[test]
    fn test_food_weighs_more_when_starving() {
        let valuation = YieldValuation::new(ProfessionCatalog::with_defaults());
        let tile = Tile::new(TilePosition::new(1, 0), TileYield::food(2.0));
        let fed = SettlementStats::from_parts(TileYield::food(6.0), 2.0);
        let starving = SettlementStats::from_parts(TileYield::food(2.0), 6.0);

        assert!(valuation.rank_tile(&tile, &starving) > valuation.rank_tile(&tile, &fed));
    }

    #[test]
    fn test_specialist_rank_uses_profession_yields() {
        let valuation = YieldValuation::new(ProfessionCatalog::with_defaults());
        let stats = SettlementStats::default();

        // Scientist: 3 science * 0.8
        let scientist = valuation.rank_specialist(&"Scientist".into(), &stats);
        assert!((scientist - 2.4).abs() < 0.001);
        assert!(valuation.rank_specialist(&"Bard".into(), &stats).abs() < f32::EPSILON);
    }
}
