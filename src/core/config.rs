//! Game settings and balance constants
//!
//! All magic numbers used by population growth and worker allocation are
//! collected here with explanations of their purpose.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::ConfigError;

/// Game pace preset
///
/// Scales every growth threshold. Slower games need more food per citizen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameSpeed {
    Quick,
    #[default]
    Standard,
    Epic,
    Marathon,
}

impl GameSpeed {
    /// Multiplier applied to the food needed for the next citizen
    pub fn modifier(&self) -> f32 {
        match self {
            GameSpeed::Quick => 0.67,
            GameSpeed::Standard => 1.0,
            GameSpeed::Epic => 1.5,
            GameSpeed::Marathon => 3.0,
        }
    }
}

/// Difficulty settings that touch population growth
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    pub name: String,

    /// Multiplier on the growth threshold of AI-controlled settlements
    ///
    /// Below 1.0 the AI grows faster than the player, above 1.0 slower.
    pub ai_growth_modifier: f32,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self {
            name: "Prince".into(),
            ai_growth_modifier: 1.0,
        }
    }
}

/// Balance constants for growth and allocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceConstants {
    /// Hex radius around the settlement center that citizens may work
    pub work_radius: u32,

    /// Food a specialist frees up in the allocation preview
    ///
    /// A citizen on a tile eats from that tile's yield; a specialist eats
    /// from the settlement stock instead. The preview adds this back so the
    /// next ranking sees the same food balance the real accounting will.
    pub specialist_food_base: f32,

    /// Food eaten per citizen each turn
    pub food_per_citizen: f32,

    /// Upper bound on the percentage of food kept after growth
    ///
    /// Stacked carry-over modifiers could otherwise keep 100% or more,
    /// letting a settlement grow every turn.
    pub carry_over_cap_percent: i32,

    /// Bonus added to a locked tile's rank when picking the tile to release
    ///
    /// Keeps player-pinned tiles worked until nothing else is left.
    pub locked_tile_bonus: f32,
}

impl Default for BalanceConstants {
    fn default() -> Self {
        Self {
            work_radius: 3,
            specialist_food_base: 2.0,
            food_per_citizen: 2.0,
            carry_over_cap_percent: 95,
            locked_tile_bonus: 10.0,
        }
    }
}

/// Configuration for a game session
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub game_speed: GameSpeed,
    pub difficulty: Difficulty,
    /// Whether population changes are reported to the religion system
    pub religion_enabled: bool,
    pub balance: BalanceConstants,
}

impl GameConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from a TOML file
    pub fn load_from_toml(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Parse and validate a config from a TOML string
    pub fn parse_toml(content: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.difficulty.ai_growth_modifier <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "ai_growth_modifier ({}) must be positive",
                self.difficulty.ai_growth_modifier
            )));
        }

        if !(0..=100).contains(&self.balance.carry_over_cap_percent) {
            return Err(ConfigError::Invalid(format!(
                "carry_over_cap_percent ({}) must be within 0..=100",
                self.balance.carry_over_cap_percent
            )));
        }

        if self.balance.specialist_food_base < 0.0 || self.balance.food_per_citizen < 0.0 {
            return Err(ConfigError::Invalid("Food constants must not be negative".into()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let config = GameConfig::default();
        assert_eq!(config.balance.work_radius, 3);
        assert_eq!(config.balance.carry_over_cap_percent, 95);
        assert!((config.balance.specialist_food_base - 2.0).abs() < f32::EPSILON);
        assert!((config.game_speed.modifier() - 1.0).abs() < f32::EPSILON);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_toml() {
        let config = GameConfig::parse_toml(
            r#"
game_speed = "Epic"
religion_enabled = true

[difficulty]
name = "Deity"
ai_growth_modifier = 0.6
"#,
        )
        .expect("Should parse");

        assert_eq!(config.game_speed, GameSpeed::Epic);
        assert!(config.religion_enabled);
        assert_eq!(config.difficulty.name, "Deity");
        // Missing section falls back to defaults
        assert_eq!(config.balance, BalanceConstants::default());
    }

    #[test]
    fn test_validate_rejects_bad_cap() {
        let result = GameConfig::parse_toml(
            r#"
[balance]
carry_over_cap_percent = 150
"#,
        );
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_non_positive_ai_modifier() {
        let mut config = GameConfig::new();
        config.difficulty.ai_growth_modifier = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_game_config_file() {
        let config = GameConfig::load_from_toml(Path::new("data/game.toml"))
            .expect("Should load data/game.toml");
        assert_eq!(config.balance.work_radius, 3);
        assert_eq!(config.balance.carry_over_cap_percent, 95);
    }
}
