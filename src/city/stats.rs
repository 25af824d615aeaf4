//! Per-turn settlement statistics

use serde::{Deserialize, Serialize};

use crate::city::tiles::TileYield;

/// Snapshot of what a settlement produces and eats each turn
///
/// `net.food` is already reduced by `food_eaten`; it is the surplus (or
/// deficit) added to the food stock at the end of the turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SettlementStats {
    pub gross: TileYield,
    pub food_eaten: f32,
    pub net: TileYield,
}

impl SettlementStats {
    pub fn from_parts(gross: TileYield, food_eaten: f32) -> Self {
        let mut net = gross;
        net.food -= food_eaten;
        Self {
            gross,
            food_eaten,
            net,
        }
    }

    /// Net food rounded to whole units, as banked each turn
    pub fn net_food(&self) -> i32 {
        self.net.food.round() as i32
    }
}
