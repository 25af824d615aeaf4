//! Settlement-scoped modifiers
//!
//! Modifiers come from policies, wonders and the like. Each one carries a
//! signed percentage and a settlement filter naming where it applies.

use serde::{Deserialize, Serialize};

/// What a modifier changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModifierKind {
    /// Percentage of the growth threshold kept as food after growing
    CarryOverFood,
    /// Percentage change of the food a specialist eats (-50 = half)
    SpecialistFoodConsumption,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Modifier {
    pub kind: ModifierKind,
    pub percent: i32,
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_filter() -> String {
    "All".into()
}

impl Modifier {
    pub fn new(kind: ModifierKind, percent: i32, filter: impl Into<String>) -> Self {
        Self {
            kind,
            percent,
            filter: filter.into(),
        }
    }

    /// Percentage expressed as a multiplier (+25 -> 1.25, -50 -> 0.5)
    pub fn multiplier(&self) -> f32 {
        1.0 + self.percent as f32 / 100.0
    }
}

/// All modifiers active for a civilization
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, modifier: Modifier) {
        self.modifiers.push(modifier);
    }

    /// Modifiers of one kind, regardless of filter
    pub fn of_kind(&self, kind: ModifierKind) -> impl Iterator<Item = &Modifier> + '_ {
        self.modifiers.iter().filter(move |m| m.kind == kind)
    }
}

/// Evaluate a settlement filter string
///
/// Recognizes "All", "Capital", "Non-Capital" and the settlement's own name.
/// Anything else does not match.
pub fn matches_settlement_filter(filter: &str, name: &str, is_capital: bool) -> bool {
    match filter {
        "All" | "all" => true,
        "Capital" => is_capital,
        "Non-Capital" => !is_capital,
        other => other == name,
    }
}
