//! Growth threshold, carry-over and projections
//!
//! Pure arithmetic, no settlement access.

use crate::population::oracle::SettlementProfile;

/// Food needed in stock before a settlement of `population` grows
///
/// `15 + 6(p-1) + floor((p-1)^1.8)`, scaled by game speed, then by 1.5 for
/// city-states, then by the AI growth modifier for non-human owners, and
/// truncated last. The multiplication order is part of the result.
pub fn food_to_next_population(population: u32, profile: &SettlementProfile) -> i32 {
    let grown = f64::from(population.saturating_sub(1));
    let mut food_required = 15.0 + 6.0 * grown + grown.powf(1.8).floor();

    food_required *= f64::from(profile.game_speed_modifier);
    if profile.is_city_state {
        food_required *= 1.5;
    }
    if !profile.is_human {
        food_required *= f64::from(profile.ai_growth_modifier);
    }

    food_required as i32
}

/// Food kept in stock after a growth event
pub fn carry_over_food(threshold: i32, carry_over_percent: i32, cap_percent: i32) -> i32 {
    let percent = carry_over_percent.min(cap_percent);
    (i64::from(threshold) * i64::from(percent) / 100) as i32
}

/// Food the allocation preview credits back per newly assigned specialist
///
/// `base - base * Π multipliers`, with the product floored at zero so the
/// offset never exceeds `base`.
pub fn specialist_food_offset(base: f32, multipliers: impl IntoIterator<Item = f32>) -> f32 {
    let product = multipliers
        .into_iter()
        .fold(1.0_f32, |acc, m| acc * m)
        .max(0.0);
    base - base * product
}

/// Turns until the stock runs out, None when food isn't shrinking
pub fn turns_to_starvation(food_stored: i32, net_food: i32) -> Option<i32> {
    if net_food >= 0 {
        return None;
    }
    Some(food_stored / -net_food + 1)
}

/// Turns until the next citizen, None when food isn't growing
pub fn turns_to_new_population(threshold: i32, food_stored: i32, net_food: i32) -> Option<i32> {
    if net_food <= 0 {
        return None;
    }
    let turns = ((threshold - food_stored) as f32 / net_food as f32).ceil() as i32;
    Some(turns.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::CivId;

    fn human() -> SettlementProfile {
        SettlementProfile::new(CivId(1))
    }

    #[test]
    fn test_threshold_first_citizen() {
        assert_eq!(food_to_next_population(1, &human()), 15);
    }

    #[test]
    fn test_threshold_grows_with_population() {
        // 15 + 6 + floor(1^1.8) = 22
        assert_eq!(food_to_next_population(2, &human()), 22);
        // 15 + 24 + floor(4^1.8 = 12.13) = 51
        assert_eq!(food_to_next_population(5, &human()), 51);
        // 15 + 54 + floor(9^1.8 = 52.2) = 121
        assert_eq!(food_to_next_population(10, &human()), 121);
    }

    #[test]
    fn test_threshold_zero_population() {
        assert_eq!(food_to_next_population(0, &human()), 15);
    }

    #[test]
    fn test_threshold_speed_and_city_state() {
        let mut profile = human();
        profile.game_speed_modifier = 1.5;
        // 22 * 1.5 = 33
        assert_eq!(food_to_next_population(2, &profile), 33);

        profile.is_city_state = true;
        // 33 * 1.5 = 49.5 -> 49
        assert_eq!(food_to_next_population(2, &profile), 49);
    }

    #[test]
    fn test_threshold_ai_modifier_only_for_ai() {
        let mut profile = human();
        profile.ai_growth_modifier = 0.6;
        assert_eq!(food_to_next_population(1, &profile), 15);

        profile.is_human = false;
        // 15 * 0.6 = 9
        assert_eq!(food_to_next_population(1, &profile), 9);
    }

    #[test]
    fn test_threshold_truncates_after_all_modifiers() {
        let mut profile = human();
        profile.game_speed_modifier = 0.67;
        profile.is_human = false;
        profile.ai_growth_modifier = 0.85;
        // 22 * 0.67 = 14.74, * 0.85 = 12.53 -> 12
        // (truncating in between would give 14 * 0.85 = 11)
        assert_eq!(food_to_next_population(2, &profile), 12);
    }

    #[test]
    fn test_carry_over() {
        assert_eq!(carry_over_food(22, 0, 95), 0);
        assert_eq!(carry_over_food(22, 25, 95), 5);
        // Capped at 95%
        assert_eq!(carry_over_food(100, 140, 95), 95);
        assert_eq!(carry_over_food(100, 95, 95), 95);
    }

    #[test]
    fn test_specialist_food_offset() {
        assert!((specialist_food_offset(2.0, []) - 0.0).abs() < f32::EPSILON);
        assert!((specialist_food_offset(2.0, [0.5]) - 1.0).abs() < f32::EPSILON);
        assert!((specialist_food_offset(2.0, [0.5, 0.5]) - 1.5).abs() < f32::EPSILON);
        // Reductions past 100% don't credit more than the base
        assert!((specialist_food_offset(2.0, [-0.5]) - 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_turns_to_starvation() {
        assert_eq!(turns_to_starvation(10, -3), Some(4));
        assert_eq!(turns_to_starvation(0, -1), Some(1));
        assert_eq!(turns_to_starvation(10, 0), None);
        assert_eq!(turns_to_starvation(10, 2), None);
    }

    #[test]
    fn test_turns_to_new_population() {
        assert_eq!(turns_to_new_population(22, 10, 5), Some(3));
        assert_eq!(turns_to_new_population(22, 12, 5), Some(2));
        // Already past the threshold still reports one turn
        assert_eq!(turns_to_new_population(22, 30, 5), Some(1));
        assert_eq!(turns_to_new_population(22, 10, 0), None);
        assert_eq!(turns_to_new_population(22, 10, -2), None);
    }
}
