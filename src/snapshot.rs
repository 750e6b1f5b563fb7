//! Read-only view of a play session for the renderer

use glam::Vec2;
use serde::Serialize;

use crate::entities::{Enemy, EnemyState, Player, PowerUp, PowerUpKind, Projectile, Star};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub radius: f32,
    pub lives: u32,
    pub shielded: bool,
    pub spread: bool,
    pub rapid: bool,
}

impl From<&Player> for PlayerView {
    fn from(player: &Player) -> Self {
        Self {
            pos: player.pos,
            radius: player.radius,
            lives: player.lives,
            shielded: player.is_shielded(),
            spread: player.has_spread(),
            rapid: player.has_rapid(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectileView {
    pub pos: Vec2,
    pub radius: f32,
    pub friendly: bool,
}

impl From<&Projectile> for ProjectileView {
    fn from(projectile: &Projectile) -> Self {
        Self {
            pos: projectile.pos,
            radius: projectile.radius,
            friendly: projectile.is_friendly(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnemyView {
    pub pos: Vec2,
    pub radius: f32,
    pub state: EnemyState,
}

impl From<&Enemy> for EnemyView {
    fn from(enemy: &Enemy) -> Self {
        Self {
            pos: enemy.pos,
            radius: enemy.radius,
            state: enemy.state,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PowerUpView {
    pub pos: Vec2,
    pub radius: f32,
    pub kind: PowerUpKind,
}

impl From<&PowerUp> for PowerUpView {
    fn from(power_up: &PowerUp) -> Self {
        Self {
            pos: power_up.pos,
            radius: power_up.radius,
            kind: power_up.kind,
        }
    }
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorldSnapshot {
    pub width: f32,
    pub height: f32,
    pub player: PlayerView,
    pub projectiles: Vec<ProjectileView>,
    pub enemies: Vec<EnemyView>,
    pub power_ups: Vec<PowerUpView>,
    pub stars: Vec<Star>,
    pub score: u64,
    pub wave: u32,
    pub multiplier: f32,
    pub paused: bool,
    pub message: Option<String>,
    /// Hit flash strength in [0, 1]
    pub flash: f32,
}

impl WorldSnapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
