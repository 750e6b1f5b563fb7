//! Gameplay tuning
//!
//! Every value has a default; a JSON file may override any subset of them.

use std::path::Path;

use color_eyre::Result;
use color_eyre::eyre::{WrapErr, ensure};
use serde::{Deserialize, Serialize};

/// Arena size, speeds, timers and drop rates for one game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Arena width in world units
    pub width: f32,
    /// Arena height in world units
    pub height: f32,
    /// Target frame rate of the front end
    pub fps: u32,

    pub player_speed: f32,
    /// Seconds between player shots (before rapid fire)
    pub player_fire_cooldown: f32,
    pub bullet_speed: f32,

    pub enemy_base_speed: f32,
    pub enemy_hp: u32,

    /// Chance in [0, 1] that a destroyed enemy drops a power-up
    pub power_up_drop_chance: f32,
    /// Seconds a spread/rapid pickup lasts (shield lasts 60% of it)
    pub power_up_duration: f32,

    /// Pause between a cleared wave and the next one
    pub wave_time_between: f32,
    /// Fractional enemy speed-up per wave
    pub wave_speed_scaler: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: 900.0,
            height: 650.0,
            fps: 60,

            player_speed: 420.0,
            player_fire_cooldown: 0.22,
            bullet_speed: 900.0,

            enemy_base_speed: 120.0,
            enemy_hp: 1,

            power_up_drop_chance: 0.18,
            power_up_duration: 10.0,

            wave_time_between: 2.0,
            wave_speed_scaler: 0.06,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json).wrap_err("invalid settings JSON")?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read settings from {}", path.display()))?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.width > 0.0 && self.height > 0.0,
            "arena must have a positive size, got {}x{}",
            self.width,
            self.height
        );
        ensure!(self.fps > 0, "fps must be positive");
        ensure!(
            self.player_speed > 0.0 && self.bullet_speed > 0.0 && self.enemy_base_speed > 0.0,
            "speeds must be positive"
        );
        ensure!(
            self.player_fire_cooldown > 0.0,
            "player_fire_cooldown must be positive"
        );
        ensure!(self.enemy_hp >= 1, "enemy_hp must be at least 1");
        ensure!(
            (0.0..=1.0).contains(&self.power_up_drop_chance),
            "power_up_drop_chance must be within [0, 1], got {}",
            self.power_up_drop_chance
        );
        ensure!(
            self.power_up_duration > 0.0 && self.wave_time_between >= 0.0,
            "durations must not be negative"
        );
        ensure!(
            self.wave_speed_scaler >= 0.0,
            "wave_speed_scaler must not be negative"
        );
        Ok(())
    }

    /// Frame duration the front end aims for
    pub fn frame_time(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(1.0 / self.fps as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.width, 900.0);
        assert_eq!(settings.height, 650.0);
        assert_eq!(settings.enemy_hp, 1);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "enemy_hp": 3, "fps": 30 }"#).unwrap();
        assert_eq!(settings.enemy_hp, 3);
        assert_eq!(settings.fps, 30);
        assert_eq!(settings.player_speed, 420.0);
        assert_eq!(settings.power_up_duration, 10.0);
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(Settings::from_json(r#"{ "enemy_hp": 0 }"#).is_err());
        assert!(Settings::from_json(r#"{ "power_up_drop_chance": 1.5 }"#).is_err());
        assert!(Settings::from_json(r#"{ "width": -10.0 }"#).is_err());
        assert!(Settings::from_json("not json").is_err());
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let err = Settings::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(format!("{err}").contains("/definitely/not/here.json"));
    }

    #[test]
    fn test_frame_time() {
        let settings = Settings::default();
        let frame = settings.frame_time();
        assert!(frame.as_secs_f64() > 0.016 && frame.as_secs_f64() < 0.017);
    }
}
