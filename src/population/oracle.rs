//! Collaborator traits for the population engine
//!
//! The engine never reaches into global state. Everything it needs from
//! the surrounding settlement (land, structures, rules, stats, outgoing
//! messages and the religion system) is asked for through these traits, so
//! tests can drive it with small deterministic fakes.

use crate::city::notifications::Notification;
use crate::city::rules::{Modifier, ModifierKind};
use crate::city::specialists::SpecialistCounter;
use crate::city::stats::SettlementStats;
use crate::city::tiles::Tile;
use crate::core::config::BalanceConstants;
use crate::core::types::{CivId, ProfessionId, SettlementId, TilePosition};

/// Tiles around the settlement and the set of tiles it works
///
/// The implementor owns the worked-tile set and the lock flags; the engine
/// only asks for changes.
pub trait LandSource {
    fn center(&self) -> TilePosition;

    fn tile(&self, position: TilePosition) -> Option<Tile>;

    /// Existing tiles within `radius` of the center, nearest rings first
    fn tiles_within(&self, radius: u32) -> Vec<Tile>;

    /// Worked tiles in the order they were assigned
    fn worked_tiles(&self) -> Vec<TilePosition>;

    fn is_locked(&self, position: TilePosition) -> bool;

    fn set_locked(&mut self, position: TilePosition, locked: bool);

    fn start_working(&mut self, position: TilePosition);

    /// Stop working a tile and clear its lock
    fn stop_working(&mut self, position: TilePosition);

    fn worked_tile_count(&self) -> usize {
        self.worked_tiles().len()
    }
}

/// Specialist slots granted by structures
pub trait CapacitySource {
    /// One entry per completed structure
    fn structure_grants(&self) -> Vec<SpecialistCounter>;
}

/// Ranks candidate jobs by current economic value
///
/// Must be deterministic for a given stats snapshot.
pub trait ValuationOracle {
    fn rank_tile(&self, tile: &Tile, stats: &SettlementStats) -> f32;

    fn rank_specialist(&self, profession: &ProfessionId, stats: &SettlementStats) -> f32;
}

/// Settlement-wide derived statistics
pub trait StatsSource {
    /// Rebuild stats from the current assignments
    fn recompute_stats(&mut self, population: u32, specialists: &SpecialistCounter);

    fn stats(&self) -> &SettlementStats;

    /// Adjust the food of the current snapshot without a full rebuild
    fn add_preview_food(&mut self, food: f32);
}

/// Settlement-scoped conditional modifiers
pub trait RuleMatcher {
    fn modifiers(&self, kind: ModifierKind) -> Vec<Modifier>;

    fn matches_filter(&self, filter: &str) -> bool;

    /// Modifiers of `kind` whose filter matches this settlement
    fn matching_modifiers(&self, kind: ModifierKind) -> Vec<Modifier> {
        self.modifiers(kind)
            .into_iter()
            .filter(|m| self.matches_filter(&m.filter))
            .collect()
    }
}

/// Fire-and-forget messages to the player
pub trait NotificationSink {
    fn notify(&mut self, notification: Notification);
}

/// Religion system hooks
pub trait ReligionObserver {
    fn population_changed(&mut self, delta: i32);

    fn majority_religion_followers(&self) -> u32;

    fn own_religion_followers(&self) -> u32;
}

/// Settings supplied by the owning settlement and its civilization
#[derive(Debug, Clone, PartialEq)]
pub struct SettlementProfile {
    pub civ: CivId,
    pub is_city_state: bool,
    pub is_human: bool,
    /// Player picks specialists by hand; automation leaves them alone
    pub manual_specialists: bool,
    pub religion_enabled: bool,
    pub game_speed_modifier: f32,
    pub ai_growth_modifier: f32,
    pub balance: BalanceConstants,
}

impl SettlementProfile {
    /// Human, non city-state, standard speed, automatic specialists
    pub fn new(civ: CivId) -> Self {
        Self {
            civ,
            is_city_state: false,
            is_human: true,
            manual_specialists: false,
            religion_enabled: false,
            game_speed_modifier: 1.0,
            ai_growth_modifier: 1.0,
            balance: BalanceConstants::default(),
        }
    }
}

/// Everything the population engine needs from its settlement
pub trait SettlementContext:
    LandSource + CapacitySource + StatsSource + RuleMatcher + NotificationSink + ReligionObserver
{
    fn settlement_id(&self) -> SettlementId;

    fn name(&self) -> &str;

    fn profile(&self) -> SettlementProfile;

    fn valuation(&self) -> &dyn ValuationOracle;

    /// Flag the citizen-assignment display for redraw
    fn mark_citizens_dirty(&mut self);
}
