//! City - a settlement together with its population
//!
//! Wires the population engine to the settlement it manages and drives the
//! turn. External events that shrink what the settlement can offer (lost
//! tiles, destroyed structures) are reconciled here before returning.

use serde::Serialize;

use crate::city::notifications::Notification;
use crate::city::settlement::Settlement;
use crate::city::specialists::SpecialistCounter;
use crate::city::stats::SettlementStats;
use crate::city::structures::StructureState;
use crate::core::error::Result;
use crate::core::types::{CivId, StructureId, TilePosition, Turn};
use crate::population::manager::{PopulationManager, TurnOutcome};
use crate::population::oracle::{LandSource, SettlementContext, StatsSource};

/// Summary of one processed turn
#[derive(Debug, Clone, Serialize)]
pub struct TurnReport {
    pub turn: Turn,
    pub net_food: i32,
    pub outcome: TurnOutcome,
    pub free_population: i32,
    pub worked_tiles: Vec<TilePosition>,
    pub specialists: SpecialistCounter,
    pub stats: SettlementStats,
    pub notifications: Vec<Notification>,
}

#[derive(Debug)]
pub struct City {
    pub settlement: Settlement,
    pub population: PopulationManager,
}

impl City {
    /// Attach a fresh population to the settlement and put the first
    /// citizen to work
    pub fn found(mut settlement: Settlement) -> Result<Self> {
        let mut population = PopulationManager::new();
        population.attach(settlement.id());
        population.auto_assign_population(&mut settlement)?;
        tracing::info!(settlement = %settlement.id(), name = %settlement.name, "Founded settlement");
        Ok(Self {
            settlement,
            population,
        })
    }

    pub fn free_population(&self) -> i32 {
        self.population.free_population(&self.settlement)
    }

    /// Net food of the current assignment
    pub fn net_food(&mut self) -> i32 {
        self.refresh_stats();
        self.settlement.stats().net_food()
    }

    pub fn turns_to_new_population(&mut self) -> Option<i32> {
        let net_food = self.net_food();
        self.population
            .turns_to_new_population(&self.settlement.profile(), net_food)
    }

    pub fn turns_to_starvation(&mut self) -> Option<i32> {
        let net_food = self.net_food();
        self.population.turns_to_starvation(net_food)
    }

    /// Bank this turn's food and resolve growth or starvation
    pub fn end_turn(&mut self, turn: Turn) -> Result<TurnReport> {
        let net_food = self.net_food();
        let outcome = self.population.process_turn(&mut self.settlement, net_food)?;
        self.refresh_stats();

        Ok(TurnReport {
            turn,
            net_food,
            outcome,
            free_population: self.free_population(),
            worked_tiles: self.settlement.worked_tiles(),
            specialists: self.population.specialists().clone(),
            stats: *self.settlement.stats(),
            notifications: self.settlement.drain_notifications(),
        })
    }

    /// Complete a structure and staff its new slots if anyone is idle
    pub fn complete_structure(&mut self, id: StructureId) -> Result<bool> {
        if !self.settlement.set_structure_state(id, StructureState::Complete) {
            return Ok(false);
        }
        if self.free_population() > 0 {
            self.population.auto_assign_population(&mut self.settlement)?;
        }
        Ok(true)
    }

    /// Destroy a structure, dropping the specialists it housed
    pub fn destroy_structure(&mut self, id: StructureId) -> Result<bool> {
        if !self.settlement.set_structure_state(id, StructureState::Destroyed) {
            return Ok(false);
        }
        self.rebalance()?;
        Ok(true)
    }

    /// Hand a tile to another civilization (or none)
    pub fn cede_tile(&mut self, position: TilePosition, new_owner: Option<CivId>) -> Result<bool> {
        if !self.settlement.tiles_mut().set_owner(position, new_owner) {
            return Ok(false);
        }
        self.rebalance()?;
        Ok(true)
    }

    /// Drop invalid jobs, then put anyone freed back to work
    pub fn rebalance(&mut self) -> Result<()> {
        self.population
            .unassign_extra_population(&mut self.settlement)?;
        if self.free_population() > 0 {
            self.population.auto_assign_population(&mut self.settlement)?;
        }
        Ok(())
    }

    fn refresh_stats(&mut self) {
        let population = self.population.population();
        self.settlement
            .recompute_stats(population, self.population.specialists());
    }
}
