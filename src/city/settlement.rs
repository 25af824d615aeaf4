//! Settlement - owner of the land, structures and stats around a city
//!
//! The settlement is the single owner of the worked-tile set and the lock
//! flags. The population engine works through the collaborator traits
//! implemented here and never keeps a copy of either.

use ahash::AHashSet;

use crate::automation::YieldValuation;
use crate::city::notifications::{Notification, Outbox};
use crate::city::religion::ReligionTracker;
use crate::city::rules::{matches_settlement_filter, Modifier, ModifierKind};
use crate::city::ruleset::Ruleset;
use crate::city::specialists::SpecialistCounter;
use crate::city::stats::SettlementStats;
use crate::city::structures::{Structure, StructureState};
use crate::city::tiles::{Tile, TileMap, TileYield};
use crate::core::config::GameConfig;
use crate::core::types::{CivId, SettlementId, StructureId, TilePosition};
use crate::population::oracle::{
    CapacitySource, LandSource, NotificationSink, ReligionObserver, RuleMatcher,
    SettlementContext, SettlementProfile, StatsSource, ValuationOracle,
};

/// Radius of the borders a new settlement claims around its center
const FOUNDING_BORDER_RADIUS: u32 = 1;

pub struct Settlement {
    id: SettlementId,
    pub name: String,
    pub civ: CivId,
    pub is_capital: bool,
    pub is_city_state: bool,
    pub is_human: bool,
    /// Specialists are picked by the player, not by automation
    pub manual_specialists: bool,
    center: TilePosition,
    tiles: TileMap,
    worked_tiles: Vec<TilePosition>,
    locked_tiles: AHashSet<TilePosition>,
    structures: Vec<Structure>,
    next_structure_id: u32,
    ruleset: Ruleset,
    config: GameConfig,
    stats: SettlementStats,
    religion: ReligionTracker,
    outbox: Outbox,
    valuation: Box<dyn ValuationOracle>,
    citizens_dirty: bool,
}

impl std::fmt::Debug for Settlement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settlement")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("civ", &self.civ)
            .field("center", &self.center)
            .field("worked_tiles", &self.worked_tiles)
            .field("structures", &self.structures)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl Settlement {
    /// Found a settlement at `center` on `tiles`
    ///
    /// The center becomes a settlement-center tile and every unowned tile
    /// within the founding radius joins the civilization's borders.
    pub fn new(
        name: impl Into<String>,
        civ: CivId,
        center: TilePosition,
        mut tiles: TileMap,
        ruleset: Ruleset,
        config: GameConfig,
    ) -> Self {
        if tiles.get(center).is_none() {
            tiles.insert(Tile::new(center, TileYield::default()));
        }
        if let Some(tile) = tiles.get_mut(center) {
            tile.is_settlement_center = true;
            tile.owner = Some(civ);
        }
        for position in center.tiles_in_range(FOUNDING_BORDER_RADIUS) {
            if let Some(tile) = tiles.get_mut(position) {
                if tile.owner.is_none() {
                    tile.owner = Some(civ);
                }
            }
        }

        let valuation = Box::new(YieldValuation::new(ruleset.professions.clone()));
        Self {
            id: SettlementId::new(),
            name: name.into(),
            civ,
            is_capital: false,
            is_city_state: false,
            is_human: true,
            manual_specialists: false,
            center,
            tiles,
            worked_tiles: Vec::new(),
            locked_tiles: AHashSet::new(),
            structures: Vec::new(),
            next_structure_id: 0,
            ruleset,
            config,
            stats: SettlementStats::default(),
            religion: ReligionTracker::with_population(1),
            outbox: Outbox::new(),
            valuation,
            citizens_dirty: false,
        }
    }

    /// Replace the job ranking used by automation
    pub fn with_valuation(mut self, valuation: Box<dyn ValuationOracle>) -> Self {
        self.valuation = valuation;
        self
    }

    pub fn id(&self) -> SettlementId {
        self.id
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn ruleset(&self) -> &Ruleset {
        &self.ruleset
    }

    pub fn tiles(&self) -> &TileMap {
        &self.tiles
    }

    /// Direct map access for external events (border changes, conquest)
    ///
    /// Changes here are not reconciled until the population engine runs
    /// `unassign_extra_population`.
    pub fn tiles_mut(&mut self) -> &mut TileMap {
        &mut self.tiles
    }

    pub fn structures(&self) -> &[Structure] {
        &self.structures
    }

    pub fn religion(&self) -> &ReligionTracker {
        &self.religion
    }

    pub fn religion_mut(&mut self) -> &mut ReligionTracker {
        &mut self.religion
    }

    pub fn pending_notifications(&self) -> &[Notification] {
        self.outbox.pending()
    }

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.outbox.drain()
    }

    pub fn citizens_dirty(&self) -> bool {
        self.citizens_dirty
    }

    pub fn clear_citizens_dirty(&mut self) {
        self.citizens_dirty = false;
    }

    /// Place a structure from the catalog, returns None for unknown names
    pub fn add_structure(&mut self, name: &str, state: StructureState) -> Option<StructureId> {
        let id = StructureId(self.next_structure_id);
        let mut structure = self.ruleset.structures.instantiate(name, id)?;
        structure.state = state;
        self.next_structure_id += 1;
        self.structures.push(structure);
        Some(id)
    }

    /// Change a structure's state, returns false if it doesn't exist
    pub fn set_structure_state(&mut self, id: StructureId, state: StructureState) -> bool {
        match self.structures.iter_mut().find(|s| s.id == id) {
            Some(structure) => {
                structure.state = state;
                true
            }
            None => false,
        }
    }

    /// Food eaten per turn by `population` citizens, `specialists` of them specialists
    fn food_eaten(&self, population: u32, specialists: u32) -> f32 {
        let per_citizen = self.config.balance.food_per_citizen;
        let specialist_multiplier = self
            .matching_modifiers(ModifierKind::SpecialistFoodConsumption)
            .iter()
            .fold(1.0_f32, |acc, m| acc * m.multiplier())
            .max(0.0);

        let specialists = specialists as f32;
        per_citizen * population as f32 - per_citizen * specialists
            + per_citizen * specialists * specialist_multiplier
    }
}

impl LandSource for Settlement {
    fn center(&self) -> TilePosition {
        self.center
    }

    fn tile(&self, position: TilePosition) -> Option<Tile> {
        self.tiles.get(position).copied()
    }

    fn tiles_within(&self, radius: u32) -> Vec<Tile> {
        self.tiles.tiles_in_range(self.center, radius)
    }

    fn worked_tiles(&self) -> Vec<TilePosition> {
        self.worked_tiles.clone()
    }

    fn worked_tile_count(&self) -> usize {
        self.worked_tiles.len()
    }

    fn is_locked(&self, position: TilePosition) -> bool {
        self.locked_tiles.contains(&position)
    }

    fn set_locked(&mut self, position: TilePosition, locked: bool) {
        if locked {
            self.locked_tiles.insert(position);
        } else {
            self.locked_tiles.remove(&position);
        }
    }

    fn start_working(&mut self, position: TilePosition) {
        if !self.worked_tiles.contains(&position) {
            self.worked_tiles.push(position);
        }
        if let Some(tile) = self.tiles.get_mut(position) {
            tile.working_settlement = Some(self.id);
        }
    }

    fn stop_working(&mut self, position: TilePosition) {
        self.worked_tiles.retain(|p| *p != position);
        self.locked_tiles.remove(&position);
        if let Some(tile) = self.tiles.get_mut(position) {
            if tile.working_settlement == Some(self.id) {
                tile.working_settlement = None;
            }
        }
    }
}

impl CapacitySource for Settlement {
    fn structure_grants(&self) -> Vec<SpecialistCounter> {
        self.structures
            .iter()
            .filter(|s| s.is_complete())
            .map(|s| s.slots.clone())
            .collect()
    }
}

impl StatsSource for Settlement {
    fn recompute_stats(&mut self, population: u32, specialists: &SpecialistCounter) {
        let mut gross = self
            .tiles
            .get(self.center)
            .map(|t| t.yields)
            .unwrap_or_default();
        for position in &self.worked_tiles {
            if let Some(tile) = self.tiles.get(*position) {
                gross += tile.yields;
            }
        }
        for (profession, count) in specialists.iter() {
            gross += self.ruleset.professions.yields_of(profession) * count as f32;
        }

        let food_eaten = self.food_eaten(population, specialists.total());
        self.stats = SettlementStats::from_parts(gross, food_eaten);
    }

    fn stats(&self) -> &SettlementStats {
        &self.stats
    }

    fn add_preview_food(&mut self, food: f32) {
        self.stats.net.food += food;
    }
}

impl RuleMatcher for Settlement {
    fn modifiers(&self, kind: ModifierKind) -> Vec<Modifier> {
        self.ruleset.modifiers.of_kind(kind).cloned().collect()
    }

    fn matches_filter(&self, filter: &str) -> bool {
        matches_settlement_filter(filter, &self.name, self.is_capital)
    }
}

impl NotificationSink for Settlement {
    fn notify(&mut self, notification: Notification) {
        self.outbox.push(notification);
    }
}

impl ReligionObserver for Settlement {
    fn population_changed(&mut self, delta: i32) {
        self.religion.on_population_change(delta);
    }

    fn majority_religion_followers(&self) -> u32 {
        self.religion.majority_religion_followers()
    }

    fn own_religion_followers(&self) -> u32 {
        self.religion.own_religion_followers()
    }
}

impl SettlementContext for Settlement {
    fn settlement_id(&self) -> SettlementId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn profile(&self) -> SettlementProfile {
        SettlementProfile {
            civ: self.civ,
            is_city_state: self.is_city_state,
            is_human: self.is_human,
            manual_specialists: self.manual_specialists,
            religion_enabled: self.config.religion_enabled,
            game_speed_modifier: self.config.game_speed.modifier(),
            ai_growth_modifier: self.config.difficulty.ai_growth_modifier,
            balance: self.config.balance.clone(),
        }
    }

    fn valuation(&self) -> &dyn ValuationOracle {
        self.valuation.as_ref()
    }

    fn mark_citizens_dirty(&mut self) {
        self.citizens_dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ProfessionId;

    fn small_map() -> TileMap {
        let mut map = TileMap::new();
        for position in TilePosition::new(0, 0).tiles_in_range(3) {
            map.insert(Tile::new(position, TileYield::new(2.0, 1.0, 0.0, 0.0)));
        }
        map
    }

    fn settlement() -> Settlement {
        Settlement::new(
            "Rome",
            CivId(1),
            TilePosition::new(0, 0),
            small_map(),
            Ruleset::with_defaults(),
            GameConfig::default(),
        )
    }

    #[test]
    fn test_founding_claims_borders() {
        let s = settlement();
        let center = s.tile(TilePosition::new(0, 0)).unwrap();
        assert!(center.is_settlement_center);
        assert_eq!(center.owner, Some(CivId(1)));

        assert_eq!(s.tile(TilePosition::new(1, 0)).unwrap().owner, Some(CivId(1)));
        // Outside the founding radius
        assert_eq!(s.tile(TilePosition::new(2, 0)).unwrap().owner, None);
    }

    #[test]
    fn test_start_and_stop_working() {
        let mut s = settlement();
        let pos = TilePosition::new(1, 0);

        s.start_working(pos);
        s.start_working(pos);
        s.set_locked(pos, true);
        assert_eq!(s.worked_tiles(), vec![pos]);
        assert_eq!(s.tile(pos).unwrap().working_settlement, Some(s.id()));
        assert!(s.is_locked(pos));

        s.stop_working(pos);
        assert!(s.worked_tiles().is_empty());
        assert!(!s.is_locked(pos));
        assert_eq!(s.tile(pos).unwrap().working_settlement, None);
    }

    #[test]
    fn test_stop_working_keeps_foreign_claim() {
        let mut s = settlement();
        let pos = TilePosition::new(1, 0);
        let other = SettlementId::new();

        s.start_working(pos);
        s.tiles_mut().get_mut(pos).unwrap().working_settlement = Some(other);
        s.stop_working(pos);

        assert_eq!(s.tile(pos).unwrap().working_settlement, Some(other));
    }

    #[test]
    fn test_structure_grants_only_complete() {
        let mut s = settlement();
        let library = s.add_structure("Library", StructureState::Complete).unwrap();
        s.add_structure("University", StructureState::UnderConstruction);
        assert!(s.add_structure("Colosseum", StructureState::Complete).is_none());

        assert_eq!(s.structure_grants().len(), 1);

        assert!(s.set_structure_state(library, StructureState::Destroyed));
        assert!(s.structure_grants().is_empty());
    }

    #[test]
    fn test_recompute_stats() {
        let mut s = settlement();
        s.start_working(TilePosition::new(1, 0));
        let specialists: SpecialistCounter = [(ProfessionId::from("Scientist"), 1)].into_iter().collect();

        s.recompute_stats(2, &specialists);
        let stats = *s.stats();
        // Center (2 food, 1 prod) + worked tile (2 food, 1 prod) + scientist (3 science)
        assert!((stats.gross.food - 4.0).abs() < 0.01);
        assert!((stats.gross.science - 3.0).abs() < 0.01);
        // Two citizens eat 2 each
        assert!((stats.food_eaten - 4.0).abs() < 0.01);
        assert_eq!(stats.net_food(), 0);

        s.add_preview_food(1.5);
        assert!((s.stats().net.food - 1.5).abs() < 0.01);
    }

    #[test]
    fn test_specialist_food_modifier_reduces_eating() {
        let mut ruleset = Ruleset::with_defaults();
        ruleset.modifiers.add(Modifier::new(
            ModifierKind::SpecialistFoodConsumption,
            -50,
            "All",
        ));
        let mut s = Settlement::new(
            "Rome",
            CivId(1),
            TilePosition::new(0, 0),
            small_map(),
            ruleset,
            GameConfig::default(),
        );
        let specialists: SpecialistCounter = [(ProfessionId::from("Scientist"), 2)].into_iter().collect();

        s.recompute_stats(3, &specialists);
        // One worker eats 2, two specialists eat 1 each
        assert!((s.stats().food_eaten - 4.0).abs() < 0.01);
    }

    #[test]
    fn test_filter_matching() {
        let mut s = settlement();
        assert!(s.matches_filter("All"));
        assert!(s.matches_filter("Rome"));
        assert!(!s.matches_filter("Capital"));
        s.is_capital = true;
        assert!(s.matches_filter("Capital"));
    }

    #[test]
    fn test_profile_reflects_config() {
        let mut config = GameConfig::default();
        config.religion_enabled = true;
        config.difficulty.ai_growth_modifier = 0.8;
        let mut s = Settlement::new(
            "Rome",
            CivId(3),
            TilePosition::new(0, 0),
            small_map(),
            Ruleset::with_defaults(),
            config,
        );
        s.is_human = false;

        let profile = s.profile();
        assert_eq!(profile.civ, CivId(3));
        assert!(profile.religion_enabled);
        assert!(!profile.is_human);
        assert!((profile.ai_growth_modifier - 0.8).abs() < f32::EPSILON);
    }
}
