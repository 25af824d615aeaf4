//! Population engine - growth, starvation and worker allocation

pub mod growth;
pub mod manager;
pub mod oracle;

pub use manager::{PopulationManager, TurnOutcome};
pub use oracle::{
    CapacitySource, LandSource, NotificationSink, ReligionObserver, RuleMatcher,
    SettlementContext, SettlementProfile, StatsSource, ValuationOracle,
};
