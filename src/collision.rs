//! Collision detection and resolution
//!
//! Hit circles are approximated by axis-aligned squares. Resolution runs in a
//! fixed order each tick; later passes see the flags set by earlier ones.

use glam::Vec2;
use rand::Rng;

use crate::entities::{Enemy, Player, PowerUp, Projectile};
use crate::scoring::Scoreboard;
use crate::settings::Settings;

/// Axis-aligned box around a hit circle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_circle(center: Vec2, radius: f32) -> Self {
        let half = Vec2::splat(radius);
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Touching edges do not count as overlap
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

/// What happened during one resolution pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionEvents {
    /// Enemies destroyed by player fire
    pub kills: u32,
    /// Enemies destroyed by ramming
    pub rams: u32,
    /// The player lost a life at least once
    pub player_damaged: bool,
    /// HUD text of the last power-up collected
    pub pickup_message: Option<String>,
}

/// Mutable view of everything collision resolution touches
pub struct CollisionWorld<'a, R: Rng + ?Sized> {
    pub player: &'a mut Player,
    pub projectiles: &'a mut [Projectile],
    pub enemies: &'a mut [Enemy],
    pub power_ups: &'a mut Vec<PowerUp>,
    pub scoreboard: &'a mut Scoreboard,
    pub wave_index: u32,
    pub settings: &'a Settings,
    pub rng: &'a mut R,
}

impl<R: Rng + ?Sized> CollisionWorld<'_, R> {
    /// Run all four passes in order
    pub fn resolve(&mut self) -> CollisionEvents {
        let mut events = CollisionEvents::default();
        self.resolve_player_fire(&mut events);
        self.resolve_enemy_fire(&mut events);
        self.resolve_pickups(&mut events);
        self.resolve_rams(&mut events);
        events
    }

    fn player_box(&self) -> Aabb {
        Aabb::from_circle(self.player.pos, self.player.radius)
    }

    /// Each friendly projectile damages at most one enemy
    fn resolve_player_fire(&mut self, events: &mut CollisionEvents) {
        for projectile in self.projectiles.iter_mut() {
            if !projectile.is_friendly() || projectile.spent {
                continue;
            }
            let shot = Aabb::from_circle(projectile.pos, projectile.radius);

            let target = self
                .enemies
                .iter_mut()
                .find(|e| e.is_alive() && shot.overlaps(&Aabb::from_circle(e.pos, e.radius)));
            let Some(enemy) = target else {
                continue;
            };

            enemy.take_damage(projectile.damage);
            projectile.spent = true;

            if !enemy.is_alive() {
                events.kills += 1;
                self.scoreboard.award_kill(self.wave_index);
                if let Some(drop) =
                    PowerUp::roll_drop(enemy.pos, self.settings.power_up_drop_chance, self.rng)
                {
                    log::debug!("{:?} dropped at {}", drop.kind, drop.pos);
                    self.power_ups.push(drop);
                }
            }
        }
    }

    fn resolve_enemy_fire(&mut self, events: &mut CollisionEvents) {
        let player_box = self.player_box();
        for projectile in self.projectiles.iter_mut() {
            if projectile.is_friendly() || projectile.spent {
                continue;
            }
            if Aabb::from_circle(projectile.pos, projectile.radius).overlaps(&player_box) {
                projectile.spent = true;
                if self.player.hit().is_damage() {
                    events.player_damaged = true;
                }
            }
        }
    }

    fn resolve_pickups(&mut self, events: &mut CollisionEvents) {
        let player_box = self.player_box();
        for power_up in self.power_ups.iter_mut() {
            if power_up.collected {
                continue;
            }
            if Aabb::from_circle(power_up.pos, power_up.radius).overlaps(&player_box) {
                power_up.collected = true;
                let message = power_up.kind.apply(
                    self.player,
                    self.scoreboard,
                    self.settings.power_up_duration,
                );
                log::debug!("{message}");
                events.pickup_message = Some(message);
            }
        }
    }

    /// Ramming destroys the enemy and pays out even when shielded
    fn resolve_rams(&mut self, events: &mut CollisionEvents) {
        let player_box = self.player_box();
        for enemy in self.enemies.iter_mut() {
            if !enemy.is_alive() {
                continue;
            }
            if Aabb::from_circle(enemy.pos, enemy.radius).overlaps(&player_box) {
                enemy.destroy();
                events.rams += 1;
                if self.player.hit().is_damage() {
                    events.player_damaged = true;
                }
                self.scoreboard.award_ram();
            }
        }
    }
}
