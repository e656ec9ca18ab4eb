//! Data-driven game balance
//!
//! Values a player might want to tweak from the settings file. Geometry that
//! the layout depends on stays in [`crate::consts`].

use serde::{Deserialize, Serialize};

/// Balance knobs for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Lives at the start of a run
    pub starting_lives: u8,
    /// Invader march speed with a full formation (pixels per tick)
    pub enemy_base_speed: f32,
    /// Extra march speed per invader destroyed this wave
    pub enemy_speed_increment: f32,
    /// Invaders fire with probability `1 / enemy_fire_chance` per tick
    pub enemy_fire_chance: u32,
    /// March sound interval bounds in seconds (full formation, last invader)
    pub march_interval_max: f32,
    pub march_interval_min: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            starting_lives: 3,
            enemy_base_speed: 1.0,
            enemy_speed_increment: 0.2,
            enemy_fire_chance: 100,
            march_interval_max: 1.0,
            march_interval_min: 0.1,
        }
    }
}

impl Tuning {
    /// Current march speed given how many invaders are gone this wave
    pub fn march_speed(&self, destroyed: usize) -> f32 {
        self.enemy_base_speed + destroyed as f32 * self.enemy_speed_increment
    }

    /// Seconds until the next march step sound
    ///
    /// Scales linearly with the surviving fraction of the formation.
    pub fn march_interval(&self, remaining: usize, total: usize) -> f32 {
        if total == 0 {
            return self.march_interval_min;
        }
        let fraction = remaining as f32 / total as f32;
        fraction * (self.march_interval_max - self.march_interval_min) + self.march_interval_min
    }

    /// Clamp values that would break the simulation
    pub fn sanitized(mut self) -> Self {
        self.starting_lives = self.starting_lives.max(1);
        self.enemy_fire_chance = self.enemy_fire_chance.max(1);
        self.enemy_base_speed = self.enemy_base_speed.max(0.0);
        self.enemy_speed_increment = self.enemy_speed_increment.max(0.0);
        self.march_interval_min = self.march_interval_min.max(0.01);
        self.march_interval_max = self.march_interval_max.max(self.march_interval_min);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_march_speed_grows_with_kills() {
        let t = Tuning::default();
        assert!((t.march_speed(0) - 1.0).abs() < 1e-6);
        assert!((t.march_speed(10) - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_march_interval_bounds() {
        let t = Tuning::default();
        assert!((t.march_interval(55, 55) - 1.0).abs() < 1e-6);
        assert!((t.march_interval(0, 55) - 0.1).abs() < 1e-6);
        assert!((t.march_interval(0, 0) - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_sanitized_rejects_zero_fire_chance() {
        let t = Tuning {
            enemy_fire_chance: 0,
            starting_lives: 0,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(t.enemy_fire_chance, 1);
        assert_eq!(t.starting_lives, 1);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let t: Tuning = serde_json::from_str(r#"{"enemy_fire_chance": 50}"#).unwrap();
        assert_eq!(t.enemy_fire_chance, 50);
        assert_eq!(t.starting_lives, 3);
    }
}
