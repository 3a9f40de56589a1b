//! Data-driven game balance
//!
//! Every gameplay constant lives here so a page can override any subset of
//! them with a JSON object; missing fields keep their defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while loading or validating a [`Tuning`]
#[derive(Debug, Error)]
pub enum TuningError {
    /// The JSON could not be parsed into a tuning table
    #[error("invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field holds a value the simulation cannot work with
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Upper bound of the player's health range
pub const MAX_HEALTH: f32 = 100.0;

/// Game balance table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    /// Logical surface width in world units
    pub world_width: f32,
    /// Logical surface height in world units
    pub world_height: f32,

    // === Player ===
    pub player_radius: f32,
    /// World units per second
    pub player_speed: f32,
    pub player_health: f32,

    // === Bullets ===
    pub bullet_speed: f32,
    pub bullet_radius: f32,
    /// Seconds before a bullet expires
    pub bullet_life: f32,
    /// Extra distance beyond the player's rim where bullets appear
    pub muzzle_offset: f32,
    /// How far past the viewport a bullet may travel before removal
    pub bullet_margin: f32,
    pub bullet_damage: u32,

    // === Enemies ===
    pub enemy_radius_min: f32,
    pub enemy_radius_max: f32,
    pub enemy_speed_min: f32,
    pub enemy_speed_max: f32,
    /// Speed bonus per point of score
    pub enemy_speed_per_score: f32,
    /// Cap on the score-driven speed bonus
    pub enemy_speed_bonus_max: f32,
    pub enemy_hp_min: f32,
    pub enemy_hp_max: f32,
    /// Hit point bonus per point of score
    pub enemy_hp_per_score: f32,
    /// Distance outside the viewport where enemies are born
    pub spawn_margin: f32,

    // === Contact / scoring ===
    pub contact_damage: f32,
    pub knockback: f32,
    pub kill_reward: u64,

    // === Spawn pacing ===
    /// Spawn timer units gained per second of simulated time
    pub spawn_rate: f32,
    pub spawn_interval_start: f32,
    pub spawn_interval_min: f32,
    /// Interval reduction applied after every spawn
    pub spawn_interval_step: f32,
    /// Timer value right after a spawn fires
    pub spawn_timer_reset: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            world_width: 900.0,
            world_height: 600.0,

            player_radius: 18.0,
            player_speed: 220.0,
            player_health: 100.0,

            bullet_speed: 1500.0,
            bullet_radius: 5.0,
            bullet_life: 1.5,
            muzzle_offset: 8.0,
            bullet_margin: 50.0,
            bullet_damage: 1,

            enemy_radius_min: 14.0,
            enemy_radius_max: 22.0,
            enemy_speed_min: 40.0,
            enemy_speed_max: 85.0,
            enemy_speed_per_score: 0.4,
            enemy_speed_bonus_max: 60.0,
            enemy_hp_min: 1.0,
            enemy_hp_max: 3.0,
            enemy_hp_per_score: 0.02,
            spawn_margin: 20.0,

            contact_damage: 12.0,
            knockback: 10.0,
            kill_reward: 10,

            spawn_rate: 500.0,
            spawn_interval_start: 1000.0,
            spawn_interval_min: 350.0,
            spawn_interval_step: 15.0,
            spawn_timer_reset: 1.0,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override and validate the result
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject tables that would break simulation invariants
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), TuningError> {
            Err(TuningError::Invalid { field, reason })
        }

        let positive = [
            ("world_width", self.world_width),
            ("world_height", self.world_height),
            ("player_radius", self.player_radius),
            ("player_speed", self.player_speed),
            ("player_health", self.player_health),
            ("bullet_speed", self.bullet_speed),
            ("bullet_radius", self.bullet_radius),
            ("bullet_life", self.bullet_life),
            ("enemy_radius_min", self.enemy_radius_min),
            ("spawn_rate", self.spawn_rate),
            ("spawn_interval_min", self.spawn_interval_min),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return invalid(field, "must be a positive number");
            }
        }

        let non_negative = [
            ("contact_damage", self.contact_damage),
            ("knockback", self.knockback),
            ("muzzle_offset", self.muzzle_offset),
            ("bullet_margin", self.bullet_margin),
            ("spawn_margin", self.spawn_margin),
            ("enemy_speed_min", self.enemy_speed_min),
            ("enemy_speed_per_score", self.enemy_speed_per_score),
            ("enemy_speed_bonus_max", self.enemy_speed_bonus_max),
            ("enemy_hp_min", self.enemy_hp_min),
            ("enemy_hp_per_score", self.enemy_hp_per_score),
            ("spawn_timer_reset", self.spawn_timer_reset),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return invalid(field, "must be a non-negative number");
            }
        }

        if self.player_health > MAX_HEALTH {
            return invalid("player_health", "must not exceed 100");
        }
        if self.spawn_timer_reset >= self.spawn_interval_min {
            return invalid("spawn_timer_reset", "must be below spawn_interval_min");
        }
        if self.world_width < self.player_radius * 2.0
            || self.world_height < self.player_radius * 2.0
        {
            return invalid("world_width", "world must fit the player");
        }
        if self.enemy_radius_max < self.enemy_radius_min {
            return invalid("enemy_radius_max", "must not be below enemy_radius_min");
        }
        if self.enemy_speed_max < self.enemy_speed_min {
            return invalid("enemy_speed_max", "must not be below enemy_speed_min");
        }
        if self.enemy_hp_max < self.enemy_hp_min {
            return invalid("enemy_hp_max", "must not be below enemy_hp_min");
        }
        if self.spawn_interval_start < self.spawn_interval_min {
            return invalid("spawn_interval_start", "must not be below spawn_interval_min");
        }
        if self.spawn_interval_step < 0.0 {
            return invalid("spawn_interval_step", "must not be negative");
        }
        if self.bullet_damage == 0 {
            return invalid("bullet_damage", "must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let t = Tuning::from_json(r#"{ "player_speed": 300.0, "kill_reward": 25 }"#).unwrap();
        assert_eq!(t.player_speed, 300.0);
        assert_eq!(t.kill_reward, 25);
        assert_eq!(t.player_radius, 18.0);
        assert_eq!(t.spawn_interval_start, 1000.0);
    }

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(Tuning::from_json("{}").unwrap(), Tuning::default());
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        let err = Tuning::from_json("{ player_speed: ").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_floor_above_start_rejected() {
        let err = Tuning::from_json(r#"{ "spawn_interval_min": 2000.0 }"#).unwrap_err();
        match err {
            TuningError::Invalid { field, .. } => assert_eq!(field, "spawn_interval_start"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_positive_rejected() {
        let err = Tuning::from_json(r#"{ "bullet_life": 0.0 }"#).unwrap_err();
        assert!(err.to_string().contains("bullet_life"));
    }

    fn rejected_field(json: &str) -> &'static str {
        match Tuning::from_json(json) {
            Err(TuningError::Invalid { field, .. }) => field,
            other => panic!("expected invalid value for {json}, got {other:?}"),
        }
    }

    #[test]
    fn test_out_of_domain_values_rejected() {
        assert_eq!(rejected_field(r#"{ "contact_damage": -12.0 }"#), "contact_damage");
        assert_eq!(rejected_field(r#"{ "player_health": 150.0 }"#), "player_health");
        assert_eq!(rejected_field(r#"{ "knockback": -10.0 }"#), "knockback");
        assert_eq!(rejected_field(r#"{ "bullet_margin": -1.0 }"#), "bullet_margin");
        assert_eq!(rejected_field(r#"{ "spawn_margin": -20.0 }"#), "spawn_margin");
        assert_eq!(rejected_field(r#"{ "enemy_speed_min": -40.0 }"#), "enemy_speed_min");
    }

    #[test]
    fn test_timer_reset_must_stay_below_floor() {
        assert_eq!(
            rejected_field(r#"{ "spawn_timer_reset": 350.0 }"#),
            "spawn_timer_reset"
        );
        assert!(Tuning::from_json(r#"{ "spawn_timer_reset": 349.0 }"#).is_ok());
    }

    #[test]
    fn test_tiny_world_rejected() {
        let mut t = Tuning::default();
        t.world_height = 10.0;
        assert!(t.validate().is_err());
    }
}
