//! Specialist counter - per-profession head counts
//!
//! Used both for the staffed specialists of a settlement and for the slot
//! capacity granted by its structures. Counts never go negative and a
//! profession whose count reaches zero is dropped, so iterating the counter
//! only ever yields staffed (or granted) professions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::types::ProfessionId;

/// Multiset of professions
///
/// Backed by an ordered map so that iteration, and therefore every
/// tie-break between equally ranked professions, is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpecialistCounter {
    counts: BTreeMap<ProfessionId, u32>,
}

impl SpecialistCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count for a profession (0 if absent)
    pub fn get(&self, profession: &ProfessionId) -> u32 {
        self.counts.get(profession).copied().unwrap_or(0)
    }

    /// Add `amount` to a profession
    pub fn add(&mut self, profession: &ProfessionId, amount: u32) {
        if amount == 0 {
            return;
        }
        *self.counts.entry(profession.clone()).or_insert(0) += amount;
    }

    /// Remove up to `amount` from a profession, returns amount actually removed
    pub fn subtract(&mut self, profession: &ProfessionId, amount: u32) -> u32 {
        let Some(count) = self.counts.get_mut(profession) else {
            return 0;
        };
        let removed = amount.min(*count);
        *count -= removed;
        if *count == 0 {
            self.counts.remove(profession);
        }
        removed
    }

    /// Overwrite the count for a profession
    pub fn set(&mut self, profession: &ProfessionId, amount: u32) {
        if amount == 0 {
            self.counts.remove(profession);
        } else {
            self.counts.insert(profession.clone(), amount);
        }
    }

    /// Add every count of another counter into this one
    pub fn merge(&mut self, other: &SpecialistCounter) {
        for (profession, amount) in other.iter() {
            self.add(profession, amount);
        }
    }

    /// Sum of all counts
    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate over (profession, count) pairs with non-zero counts
    pub fn iter(&self) -> impl Iterator<Item = (&ProfessionId, u32)> + '_ {
        self.counts.iter().map(|(p, c)| (p, *c))
    }

    /// Professions with a non-zero count
    pub fn professions(&self) -> impl Iterator<Item = &ProfessionId> + '_ {
        self.counts.keys()
    }

    /// Clamp every profession down to the capacity given by `limits`
    ///
    /// Returns the professions that were reduced and by how much.
    pub fn clamp_to(&mut self, limits: &SpecialistCounter) -> Vec<(ProfessionId, u32)> {
        let over: Vec<(ProfessionId, u32)> = self
            .iter()
            .filter_map(|(profession, count)| {
                let limit = limits.get(profession);
                (count > limit).then(|| (profession.clone(), count - limit))
            })
            .collect();

        for (profession, excess) in &over {
            self.subtract(profession, *excess);
        }
        over
    }
}

impl FromIterator<(ProfessionId, u32)> for SpecialistCounter {
    fn from_iter<I: IntoIterator<Item = (ProfessionId, u32)>>(iter: I) -> Self {
        let mut counter = Self::new();
        for (profession, amount) in iter {
            counter.add(&profession, amount);
        }
        counter
    }
}
