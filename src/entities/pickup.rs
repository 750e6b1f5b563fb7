use glam::Vec2;
use rand::Rng;
use serde::Serialize;

use super::player::Player;
use crate::scoring::Scoreboard;

pub const POWER_UP_RADIUS: f32 = 12.0;
const FALL_SPEED: f32 = 140.0;
const SWAY_AMPLITUDE: f32 = 18.0;
const SWAY_FREQUENCY: f32 = 4.0;
/// Shield pickups last this fraction of the power-up duration
const SHIELD_FRACTION: f32 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerUpKind {
    Spread,
    Rapid,
    Shield,
    Multiplier,
}

impl PowerUpKind {
    /// Relative drop weights
    pub const DROP_TABLE: [(PowerUpKind, f32); 4] = [
        (PowerUpKind::Spread, 0.32),
        (PowerUpKind::Rapid, 0.26),
        (PowerUpKind::Shield, 0.22),
        (PowerUpKind::Multiplier, 0.20),
    ];

    /// Weighted pick from [`Self::DROP_TABLE`]
    pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let total: f32 = Self::DROP_TABLE.iter().map(|(_, w)| w).sum();
        let mut pick = rng.random_range(0.0..total);
        for (kind, weight) in Self::DROP_TABLE {
            if pick < weight {
                return kind;
            }
            pick -= weight;
        }
        PowerUpKind::Multiplier
    }

    pub fn get_name(&self) -> &'static str {
        match self {
            PowerUpKind::Spread => "Spread Shot",
            PowerUpKind::Rapid => "Rapid Fire",
            PowerUpKind::Shield => "Shield",
            PowerUpKind::Multiplier => "Score Multiplier",
        }
    }

    /// Apply the pickup and describe it for the HUD
    pub fn apply(self, player: &mut Player, scoreboard: &mut Scoreboard, duration: f32) -> String {
        match self {
            PowerUpKind::Spread => {
                player.spread = duration;
                "Power-up: Spread Shot".to_string()
            }
            PowerUpKind::Rapid => {
                player.rapid = duration;
                "Power-up: Rapid Fire".to_string()
            }
            PowerUpKind::Shield => {
                // Never cuts short a longer shield
                player.shield = player.shield.max(duration * SHIELD_FRACTION);
                "Power-up: Shield".to_string()
            }
            PowerUpKind::Multiplier => {
                scoreboard.multiplier.boost(duration);
                format!("Power-up: Score x{:.1}", scoreboard.multiplier.value())
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct PowerUp {
    pub pos: Vec2,
    pub vel: Vec2,
    pub kind: PowerUpKind,
    pub radius: f32,
    /// Seconds since it dropped
    pub t: f32,
    /// Picked up this tick; dropped by the next prune
    pub collected: bool,
}

impl PowerUp {
    pub fn new(pos: Vec2, kind: PowerUpKind) -> Self {
        Self {
            pos,
            vel: Vec2::new(0.0, FALL_SPEED),
            kind,
            radius: POWER_UP_RADIUS,
            t: 0.0,
            collected: false,
        }
    }

    /// Drop a random power-up at `pos` with probability `chance`
    pub fn roll_drop<R: Rng + ?Sized>(pos: Vec2, chance: f32, rng: &mut R) -> Option<Self> {
        if rng.random::<f32>() >= chance {
            return None;
        }
        Some(Self::new(pos, PowerUpKind::roll(rng)))
    }

    pub fn update(&mut self, dt: f32) {
        let dt = dt.max(0.0);
        self.t += dt;
        self.pos += self.vel * dt;
        self.pos.x += (self.t * SWAY_FREQUENCY).sin() * SWAY_AMPLITUDE * dt;
    }

    pub fn is_out_of_bounds(&self, max_y: f32) -> bool {
        self.pos.y >= max_y + 40.0
    }
}
