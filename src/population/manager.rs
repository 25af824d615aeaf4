//! Population engine - growth, starvation and worker allocation
//!
//! One `PopulationManager` belongs to each settlement. It owns the citizen
//! count, the food stock and the specialist staffing. Worked tiles belong to
//! the settlement and are changed only through its `LandSource` methods.
//!
//! Allocation is greedy and turn-local: free citizens are placed one at a
//! time on the best job available at that moment, and surplus citizens are
//! pulled off the worst job one at a time. The exact sequence of decisions
//! matters, including how ties are broken.

use serde::{Deserialize, Serialize};

use crate::city::notifications::Notification;
use crate::city::rules::ModifierKind;
use crate::city::specialists::SpecialistCounter;
use crate::city::tiles::Tile;
use crate::core::error::{PopulationError, Result};
use crate::core::types::{ProfessionId, SettlementId, TilePosition};
use crate::population::growth;
use crate::population::oracle::{LandSource, SettlementContext, SettlementProfile};

/// What happened during one call to `process_turn`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnOutcome {
    pub starved: bool,
    pub grew: bool,
    pub population: u32,
    pub food_stored: i32,
}

/// Citizen count, food stock and specialist staffing of one settlement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationManager {
    settlement: Option<SettlementId>,
    population: u32,
    food_stored: i32,
    specialists: SpecialistCounter,
}

impl Default for PopulationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PopulationManager {
    /// A detached manager with one citizen and an empty food stock
    pub fn new() -> Self {
        Self {
            settlement: None,
            population: 1,
            food_stored: 0,
            specialists: SpecialistCounter::new(),
        }
    }

    /// Bind this manager to its settlement
    pub fn attach(&mut self, settlement: SettlementId) {
        self.settlement = Some(settlement);
    }

    pub fn settlement(&self) -> Option<SettlementId> {
        self.settlement
    }

    pub fn population(&self) -> u32 {
        self.population
    }

    pub fn food_stored(&self) -> i32 {
        self.food_stored
    }

    pub fn set_food_stored(&mut self, food: i32) {
        self.food_stored = food;
    }

    pub fn specialists(&self) -> &SpecialistCounter {
        &self.specialists
    }

    pub fn number_of_specialists(&self) -> u32 {
        self.specialists.total()
    }

    /// Citizens with neither a tile nor a profession
    ///
    /// Negative while more jobs are filled than there are citizens; the
    /// public mutators restore it before returning.
    pub fn free_population<L: LandSource + ?Sized>(&self, land: &L) -> i32 {
        self.population as i32 - land.worked_tile_count() as i32 - self.specialists.total() as i32
    }

    fn ensure_attached<C: SettlementContext>(&self, city: &C) -> Result<()> {
        match self.settlement {
            None => Err(PopulationError::Detached),
            Some(expected) if expected != city.settlement_id() => {
                Err(PopulationError::SettlementMismatch {
                    expected,
                    found: city.settlement_id(),
                })
            }
            Some(_) => Ok(()),
        }
    }

    // === GROWTH ===

    pub fn food_to_next_population(&self, profile: &SettlementProfile) -> i32 {
        growth::food_to_next_population(self.population, profile)
    }

    /// Turns until a citizen starves, None unless food is shrinking
    pub fn turns_to_starvation(&self, net_food: i32) -> Option<i32> {
        growth::turns_to_starvation(self.food_stored, net_food)
    }

    /// Turns until the next citizen, None unless food is growing
    pub fn turns_to_new_population(&self, profile: &SettlementProfile, net_food: i32) -> Option<i32> {
        growth::turns_to_new_population(
            self.food_to_next_population(profile),
            self.food_stored,
            net_food,
        )
    }

    /// Bank this turn's food, then resolve starvation and growth
    ///
    /// Both can happen in the same call: a citizen is lost first, then the
    /// remaining stock is checked against the (now lower) threshold.
    pub fn process_turn<C: SettlementContext>(
        &mut self,
        city: &mut C,
        net_food: i32,
    ) -> Result<TurnOutcome> {
        self.ensure_attached(city)?;
        let settlement = city.settlement_id();
        let mut outcome = TurnOutcome::default();

        self.food_stored += net_food;
        if net_food < 0 {
            let notification = Notification::starving(settlement, city.name());
            city.notify(notification);
        }

        if self.food_stored < 0 {
            if self.population > 1 {
                tracing::info!(%settlement, population = self.population, "Citizen starved");
                self.add_population(city, -1)?;
                outcome.starved = true;
            }
            self.food_stored = 0;
        }

        let profile = city.profile();
        let threshold = self.food_to_next_population(&profile);
        if self.food_stored >= threshold {
            self.food_stored -= threshold;

            let carry_over_percent: i32 = city
                .matching_modifiers(ModifierKind::CarryOverFood)
                .iter()
                .map(|m| m.percent)
                .sum();
            self.food_stored += growth::carry_over_food(
                threshold,
                carry_over_percent,
                profile.balance.carry_over_cap_percent,
            );

            self.add_population(city, 1)?;
            city.mark_citizens_dirty();
            let notification = Notification::grown(settlement, city.name());
            city.notify(notification);
            tracing::info!(%settlement, population = self.population, "Settlement grew");
            outcome.grew = true;
        }

        outcome.population = self.population;
        outcome.food_stored = self.food_stored;
        Ok(outcome)
    }

    // === POPULATION CHANGES ===

    /// Add (or remove, for negative `delta`) citizens and rebalance jobs
    ///
    /// Population never drops below zero. Returns the change actually applied.
    pub fn add_population<C: SettlementContext>(&mut self, city: &mut C, delta: i32) -> Result<i32> {
        self.ensure_attached(city)?;

        let current = self.population as i32;
        let changed = if current + delta < 0 { -current } else { delta };
        self.population = (current + changed) as u32;

        if self.free_population(city) < 0 {
            self.unassign_extra_population(city)?;
        } else {
            self.auto_assign_population(city)?;
        }

        if city.profile().religion_enabled {
            city.population_changed(changed);
        }
        Ok(changed)
    }

    pub fn set_population<C: SettlementContext>(&mut self, city: &mut C, target: u32) -> Result<i32> {
        self.add_population(city, target as i32 - self.population as i32)
    }

    // === GREEDY FILL ===

    /// Put every free citizen to work, one at a time, on the best job left
    ///
    /// A tile wins only if it ranks strictly above the best specialist slot,
    /// so ties go to the specialist. Returns how many citizens were placed.
    pub fn auto_assign_population<C: SettlementContext>(&mut self, city: &mut C) -> Result<u32> {
        self.ensure_attached(city)?;

        let profile = city.profile();
        let capacity = self.max_specialists(city);
        let food_offset = growth::specialist_food_offset(
            profile.balance.specialist_food_base,
            city.matching_modifiers(ModifierKind::SpecialistFoodConsumption)
                .iter()
                .map(|m| m.multiplier()),
        );

        let free = self.free_population(city).max(0);
        let mut assigned = 0;
        for _ in 0..free {
            city.recompute_stats(self.population, &self.specialists);

            let best_tile = self.best_available_tile(city, &profile);
            let best_job = if profile.manual_specialists {
                None
            } else {
                self.best_available_profession(city, &capacity)
            };
            let specialist_value = best_job.as_ref().map_or(0.0, |(_, value)| *value);

            match (best_tile, best_job) {
                (Some((tile, value)), _) if value > specialist_value => {
                    tracing::debug!(tile = %tile.position, value, "Assigned citizen to tile");
                    city.start_working(tile.position);
                    city.add_preview_food(tile.yields.food);
                }
                (_, Some((profession, value))) => {
                    tracing::debug!(%profession, value, "Assigned citizen as specialist");
                    self.specialists.add(&profession, 1);
                    city.add_preview_food(food_offset);
                }
                _ => break,
            }
            assigned += 1;
        }

        city.recompute_stats(self.population, &self.specialists);
        Ok(assigned)
    }

    /// Highest-ranked unworked tile in range and owned by our civilization
    fn best_available_tile<C: SettlementContext>(
        &self,
        city: &C,
        profile: &SettlementProfile,
    ) -> Option<(Tile, f32)> {
        let stats = city.stats();
        let valuation = city.valuation();

        let mut best: Option<(Tile, f32)> = None;
        for tile in city.tiles_within(profile.balance.work_radius) {
            if tile.owner != Some(profile.civ) || tile.provides_yield() {
                continue;
            }
            let value = valuation.rank_tile(&tile, stats);
            if best.as_ref().map_or(true, |(_, v)| value > *v) {
                best = Some((tile, value));
            }
        }
        best
    }

    /// Highest-ranked profession that still has a free slot
    fn best_available_profession<C: SettlementContext>(
        &self,
        city: &C,
        capacity: &SpecialistCounter,
    ) -> Option<(ProfessionId, f32)> {
        let stats = city.stats();
        let valuation = city.valuation();

        let mut best: Option<(ProfessionId, f32)> = None;
        for (profession, slots) in capacity.iter() {
            if self.specialists.get(profession) >= slots {
                continue;
            }
            let value = valuation.rank_specialist(profession, stats);
            if best.as_ref().map_or(true, |(_, v)| value > *v) {
                best = Some((profession.clone(), value));
            }
        }
        best
    }

    // === GREEDY EVICT ===

    /// Drop invalid jobs, then pull citizens off the worst jobs until
    /// nobody is double-booked
    ///
    /// Tiles that left our borders, are claimed by another settlement or lie
    /// outside the work radius are released first, and professions above
    /// their current slot count are cut down, whatever the free population.
    pub fn unassign_extra_population<C: SettlementContext>(&mut self, city: &mut C) -> Result<()> {
        self.ensure_attached(city)?;

        let profile = city.profile();
        let settlement = city.settlement_id();
        let center = city.center();

        for position in city.worked_tiles() {
            let still_valid = city.tile(position).is_some_and(|tile| {
                tile.owner == Some(profile.civ)
                    && tile.working_settlement == Some(settlement)
                    && tile.position.distance(&center) <= profile.balance.work_radius
            });
            if !still_valid {
                tracing::debug!(tile = %position, "Released tile no longer workable");
                city.stop_working(position);
            }
        }

        let capacity = self.max_specialists(city);
        for (profession, excess) in self.specialists.clamp_to(&capacity) {
            tracing::debug!(%profession, excess, "Removed specialists above capacity");
        }

        while self.free_population(city) < 0 {
            city.recompute_stats(self.population, &self.specialists);

            let worst_tile = self.worst_worked_tile(city, &profile);
            let worst_job = if profile.manual_specialists {
                None
            } else {
                self.worst_staffed_profession(city)
            };

            match (worst_tile, worst_job) {
                (Some((position, tile_value)), Some((profession, job_value))) => {
                    if tile_value < job_value {
                        self.evict_tile(city, position);
                    } else {
                        self.evict_specialist(&profession);
                    }
                }
                (None, Some((profession, _))) => self.evict_specialist(&profession),
                (Some((position, _)), None) => self.evict_tile(city, position),
                (None, None) => {
                    // Manual specialists outnumber the citizens (the settlement
                    // is being razed, say). Pick one automatically anyway.
                    match self.worst_staffed_profession(city) {
                        Some((profession, _)) => {
                            tracing::warn!(
                                %settlement,
                                %profession,
                                "Overriding manual specialists to remove surplus"
                            );
                            self.evict_specialist(&profession);
                        }
                        None => {
                            tracing::warn!(
                                %settlement,
                                free = self.free_population(city),
                                "Nothing left to unassign"
                            );
                            break;
                        }
                    }
                }
            }
        }

        city.recompute_stats(self.population, &self.specialists);
        Ok(())
    }

    /// Lowest-ranked worked tile; locked tiles get a bonus when choosing
    ///
    /// The returned value is the tile's plain rank, without the bonus.
    fn worst_worked_tile<C: SettlementContext>(
        &self,
        city: &C,
        profile: &SettlementProfile,
    ) -> Option<(TilePosition, f32)> {
        let stats = city.stats();
        let valuation = city.valuation();

        let mut worst: Option<(TilePosition, f32, f32)> = None;
        for position in city.worked_tiles() {
            let Some(tile) = city.tile(position) else {
                continue;
            };
            let value = valuation.rank_tile(&tile, stats);
            let mut compared = value;
            if city.is_locked(position) {
                compared += profile.balance.locked_tile_bonus;
            }
            if worst.as_ref().map_or(true, |(_, _, c)| compared < *c) {
                worst = Some((position, value, compared));
            }
        }
        worst.map(|(position, value, _)| (position, value))
    }

    /// Lowest-ranked profession with at least one specialist
    fn worst_staffed_profession<C: SettlementContext>(
        &self,
        city: &C,
    ) -> Option<(ProfessionId, f32)> {
        let stats = city.stats();
        let valuation = city.valuation();

        let mut worst: Option<(ProfessionId, f32)> = None;
        for profession in self.specialists.professions() {
            let value = valuation.rank_specialist(profession, stats);
            if worst.as_ref().map_or(true, |(_, v)| value < *v) {
                worst = Some((profession.clone(), value));
            }
        }
        worst
    }

    fn evict_tile<C: SettlementContext>(&self, city: &mut C, position: TilePosition) {
        tracing::debug!(tile = %position, "Unassigned citizen from tile");
        city.stop_working(position);
    }

    fn evict_specialist(&mut self, profession: &ProfessionId) {
        tracing::debug!(%profession, "Unassigned specialist");
        self.specialists.subtract(profession, 1);
    }

    // === QUERIES ===

    /// Specialist slots per profession over all completed structures
    pub fn max_specialists<C: SettlementContext + ?Sized>(&self, city: &C) -> SpecialistCounter {
        let mut capacity = SpecialistCounter::new();
        for grant in city.structure_grants() {
            capacity.merge(&grant);
        }
        capacity
    }

    /// Head count used by rule filters ("Specialists", "Unemployed", ...)
    ///
    /// Unknown filters count zero.
    pub fn population_filter_amount<C: SettlementContext + ?Sized>(
        &self,
        city: &C,
        filter: &str,
    ) -> i32 {
        match filter {
            "Specialists" => self.number_of_specialists() as i32,
            "Population" => self.population as i32,
            "Followers of the Majority Religion" => city.majority_religion_followers() as i32,
            "Followers of this Religion" => city.own_religion_followers() as i32,
            "Unemployed" => self.free_population(city),
            _ => 0,
        }
    }

    // === MANUAL ASSIGNMENT ===

    /// Put a free citizen on a specific tile, optionally pinning it
    pub fn work_tile<C: SettlementContext>(
        &mut self,
        city: &mut C,
        position: TilePosition,
        lock: bool,
    ) -> Result<()> {
        self.ensure_attached(city)?;
        if self.free_population(city) <= 0 {
            return Err(PopulationError::NoFreePopulation);
        }

        let profile = city.profile();
        let center = city.center();
        let workable = city.tile(position).is_some_and(|tile| {
            tile.owner == Some(profile.civ)
                && !tile.provides_yield()
                && tile.position.distance(&center) <= profile.balance.work_radius
        });
        if !workable {
            return Err(PopulationError::TileNotWorkable(position));
        }

        city.start_working(position);
        if lock {
            city.set_locked(position, true);
        }
        city.recompute_stats(self.population, &self.specialists);
        Ok(())
    }

    /// Take the citizen off a worked tile, leaving them free
    pub fn release_tile<C: SettlementContext>(
        &mut self,
        city: &mut C,
        position: TilePosition,
    ) -> Result<()> {
        self.ensure_attached(city)?;
        if !city.worked_tiles().contains(&position) {
            return Err(PopulationError::TileNotWorked(position));
        }
        city.stop_working(position);
        city.recompute_stats(self.population, &self.specialists);
        Ok(())
    }

    /// Staff one more slot of a profession with a free citizen
    pub fn assign_specialist<C: SettlementContext>(
        &mut self,
        city: &mut C,
        profession: &ProfessionId,
    ) -> Result<()> {
        self.ensure_attached(city)?;
        if self.free_population(city) <= 0 {
            return Err(PopulationError::NoFreePopulation);
        }
        let slots = self.max_specialists(city).get(profession);
        if self.specialists.get(profession) >= slots {
            return Err(PopulationError::NoSpecialistSlot(profession.clone()));
        }

        self.specialists.add(profession, 1);
        city.recompute_stats(self.population, &self.specialists);
        Ok(())
    }

    /// Free one specialist of a profession
    pub fn remove_specialist<C: SettlementContext>(
        &mut self,
        city: &mut C,
        profession: &ProfessionId,
    ) -> Result<()> {
        self.ensure_attached(city)?;
        if self.specialists.subtract(profession, 1) == 0 {
            return Err(PopulationError::NotStaffed(profession.clone()));
        }
        city.recompute_stats(self.population, &self.specialists);
        Ok(())
    }

    /// Clear assignments and run the greedy fill from scratch
    ///
    /// Locked tiles are kept unless `reset_locked`; hand-picked specialists
    /// are kept in manual specialist mode.
    pub fn reassign_all_workers<C: SettlementContext>(
        &mut self,
        city: &mut C,
        reset_locked: bool,
    ) -> Result<u32> {
        self.ensure_attached(city)?;

        for position in city.worked_tiles() {
            if reset_locked || !city.is_locked(position) {
                city.stop_working(position);
            }
        }
        if !city.profile().manual_specialists {
            self.specialists = SpecialistCounter::new();
        }

        self.auto_assign_population(city)
    }
}
