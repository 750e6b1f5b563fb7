use glam::Vec2;
use rand::Rng;
use serde::Serialize;

use super::formation::{SpawnSpec, Trajectory};
use super::projectile::{Projectile, ProjectileOwner};

pub const ENEMY_RADIUS: f32 = 16.0;
/// Seconds spent entering before patrolling
const ENTER_DURATION: f32 = 0.35;
const ENEMY_SHOT_SPEED: f32 = 420.0;
const ENEMY_SHOT_SPREAD: f32 = 70.0;

/// Behaviour phases in the only order they can occur
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EnemyState {
    Entering,
    Patrolling,
    Attacking,
    Exiting,
}

#[derive(Debug, Clone)]
pub struct Enemy {
    pub pos: Vec2,
    pub spawn: Vec2,
    /// Seconds since spawning
    pub t: f32,
    pub radius: f32,
    pub hp: u32,
    pub trajectory: Trajectory,
    pub state: EnemyState,
    attack_timer: f32,
    exit_timer: f32,
    fire_cooldown: f32,
}

impl Enemy {
    pub fn new<R: Rng + ?Sized>(spec: &SpawnSpec, hp: u32, rng: &mut R) -> Self {
        Self {
            pos: spec.origin,
            spawn: spec.origin,
            t: 0.0,
            radius: ENEMY_RADIUS,
            hp,
            trajectory: spec.trajectory,
            state: EnemyState::Entering,
            attack_timer: rng.random_range(1.2..=3.0),
            exit_timer: rng.random_range(7.0..=12.0),
            fire_cooldown: rng.random_range(0.8..=1.9),
        }
    }

    /// Advance the behaviour state machine and follow the trajectory
    pub fn update<R: Rng + ?Sized>(&mut self, dt: f32, difficulty_bonus: f32, rng: &mut R) {
        let dt = dt.max(0.0);
        self.t += dt;
        self.fire_cooldown = (self.fire_cooldown - dt).max(0.0);
        self.attack_timer -= dt;
        self.exit_timer -= dt;

        if self.state == EnemyState::Entering && self.t > ENTER_DURATION {
            self.state = EnemyState::Patrolling;
        }
        if self.state <= EnemyState::Patrolling && self.attack_timer <= 0.0 {
            self.state = EnemyState::Attacking;
            self.attack_timer = rng.random_range(3.2..=5.0);
        }
        if self.exit_timer <= 0.0 {
            self.state = EnemyState::Exiting;
        }

        self.pos = self.trajectory.position(self.t, self.spawn);

        // Dives stack on top of the formation path
        match self.state {
            EnemyState::Attacking => self.pos.y += (120.0 + 40.0 * difficulty_bonus) * dt,
            EnemyState::Exiting => self.pos.y += (160.0 + 60.0 * difficulty_bonus) * dt,
            EnemyState::Entering | EnemyState::Patrolling => {}
        }
    }

    /// Fires downwards with a little sideways scatter once the cooldown is up
    pub fn maybe_fire<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Projectile> {
        if self.fire_cooldown > 0.0 {
            return None;
        }
        self.fire_cooldown = rng.random_range(1.0..=2.2);
        let vx = rng.random_range(-ENEMY_SHOT_SPREAD..=ENEMY_SHOT_SPREAD);
        Some(Projectile::new(
            self.pos + Vec2::new(0.0, 18.0),
            Vec2::new(vx, ENEMY_SHOT_SPEED),
            ProjectileOwner::Enemy,
        ))
    }

    pub fn take_damage(&mut self, damage: u32) {
        self.hp = self.hp.saturating_sub(damage);
    }

    pub fn destroy(&mut self) {
        self.hp = 0;
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn fire_cooldown(&self) -> f32 {
        self.fire_cooldown
    }
}
