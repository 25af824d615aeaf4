//! Religious followers within a settlement
//!
//! Only head counts are tracked here. Pressure from neighbours and
//! conversion happen elsewhere; this tracker just keeps the follower total
//! equal to the population as citizens are born and die.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Follower counts per religion
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReligionTracker {
    followers: BTreeMap<String, u32>,
    /// Religion founded in (or adopted by) this settlement, if any
    pub own_religion: Option<String>,
}

/// Followers of no religion
pub const NO_RELIGION: &str = "None";

impl ReligionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with every citizen following no religion
    pub fn with_population(population: u32) -> Self {
        let mut tracker = Self::new();
        if population > 0 {
            tracker.followers.insert(NO_RELIGION.into(), population);
        }
        tracker
    }

    pub fn followers_of(&self, religion: &str) -> u32 {
        self.followers.get(religion).copied().unwrap_or(0)
    }

    pub fn total_followers(&self) -> u32 {
        self.followers.values().sum()
    }

    /// Move followers from one religion to another
    pub fn convert(&mut self, from: &str, to: &str, amount: u32) -> u32 {
        let moved = amount.min(self.followers_of(from));
        if moved == 0 {
            return 0;
        }
        self.remove(from, moved);
        *self.followers.entry(to.to_string()).or_insert(0) += moved;
        moved
    }

    /// Religion with the most followers, excluding "no religion"
    ///
    /// Ties go to the alphabetically first religion.
    pub fn majority_religion(&self) -> Option<&str> {
        let mut best: Option<(&str, u32)> = None;
        for (religion, &count) in &self.followers {
            if religion == NO_RELIGION || count == 0 {
                continue;
            }
            if best.map_or(true, |(_, c)| count > c) {
                best = Some((religion, count));
            }
        }
        best.map(|(r, _)| r)
    }

    pub fn majority_religion_followers(&self) -> u32 {
        self.majority_religion()
            .map(|r| self.followers_of(r))
            .unwrap_or(0)
    }

    pub fn own_religion_followers(&self) -> u32 {
        self.own_religion
            .as_deref()
            .map(|r| self.followers_of(r))
            .unwrap_or(0)
    }

    /// Keep followers in step with a population change
    ///
    /// New citizens join the majority religion (or none); lost citizens
    /// are taken one at a time from the largest group.
    pub fn on_population_change(&mut self, delta: i32) {
        if delta > 0 {
            let religion = self
                .majority_religion()
                .unwrap_or(NO_RELIGION)
                .to_string();
            *self.followers.entry(religion).or_insert(0) += delta as u32;
            return;
        }

        for _ in 0..delta.unsigned_abs() {
            let largest = self
                .followers
                .iter()
                .filter(|(_, c)| **c > 0)
                .fold(None::<(&String, u32)>, |best, (r, &c)| match best {
                    Some((_, bc)) if bc >= c => best,
                    _ => Some((r, c)),
                })
                .map(|(r, _)| r.clone());

            match largest {
                Some(religion) => self.remove(&religion, 1),
                None => break,
            }
        }
    }

    fn remove(&mut self, religion: &str, amount: u32) {
        if let Some(count) = self.followers.get_mut(religion) {
            *count = count.saturating_sub(amount);
            if *count == 0 {
                self.followers.remove(religion);
            }
        }
    }
}
