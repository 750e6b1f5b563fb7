use glam::Vec2;

use super::projectile::{Projectile, ProjectileOwner};
use crate::settings::Settings;

pub const PLAYER_RADIUS: f32 = 18.0;
pub const PLAYER_LIVES: u32 = 3;
/// Invulnerability granted after losing a life, carried on the shield timer
pub const GRACE_SHIELD: f32 = 1.1;
/// Fire cooldown multiplier while rapid fire is active
pub const RAPID_FIRE_FACTOR: f32 = 0.55;
/// Spread shot angles from straight up, in degrees
pub const SPREAD_ANGLES: [f32; 3] = [-14.0, 0.0, 14.0];
/// Keeps the ship this far from the side and bottom edges
const EDGE_MARGIN: f32 = 30.0;
/// The ship never rises above this fraction of the arena height
const CEILING_FRACTION: f32 = 0.55;
/// Projectiles leave from the nose of the ship
const MUZZLE_OFFSET: Vec2 = Vec2::new(0.0, -22.0);

/// Result of [`Player::hit`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// The shield took the hit and is now down
    Absorbed,
    /// A life was lost
    Damaged,
}

impl HitOutcome {
    pub fn is_damage(self) -> bool {
        self == HitOutcome::Damaged
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    pub lives: u32,
    /// Remaining seconds of each power-up
    pub shield: f32,
    pub spread: f32,
    pub rapid: f32,
    pub fire_cooldown: f32,
}

impl Player {
    pub fn new(settings: &Settings) -> Self {
        Self {
            pos: Vec2::new(settings.width / 2.0, settings.height - 70.0),
            radius: PLAYER_RADIUS,
            lives: PLAYER_LIVES,
            shield: 0.0,
            spread: 0.0,
            rapid: 0.0,
            fire_cooldown: 0.0,
        }
    }

    /// Move along `direction` (any length, normalized here) and decay timers
    pub fn update(&mut self, dt: f32, direction: Vec2, settings: &Settings) {
        let dt = dt.max(0.0);
        let step = direction.normalize_or_zero() * settings.player_speed * dt;
        self.pos += step;
        self.clamp_to_envelope(settings);

        self.fire_cooldown = (self.fire_cooldown - dt).max(0.0);
        self.shield = (self.shield - dt).max(0.0);
        self.spread = (self.spread - dt).max(0.0);
        self.rapid = (self.rapid - dt).max(0.0);
    }

    pub fn clamp_to_envelope(&mut self, settings: &Settings) {
        let max_x = (settings.width - EDGE_MARGIN).max(EDGE_MARGIN);
        let min_y = settings.height * CEILING_FRACTION;
        let max_y = (settings.height - EDGE_MARGIN).max(min_y);
        self.pos.x = self.pos.x.clamp(EDGE_MARGIN, max_x);
        self.pos.y = self.pos.y.clamp(min_y, max_y);
    }

    pub fn is_alive(&self) -> bool {
        self.lives > 0
    }

    pub fn is_shielded(&self) -> bool {
        self.shield > 0.0
    }

    pub fn has_spread(&self) -> bool {
        self.spread > 0.0
    }

    pub fn has_rapid(&self) -> bool {
        self.rapid > 0.0
    }

    pub fn can_fire(&self) -> bool {
        self.fire_cooldown <= 0.0
    }

    /// Seconds between shots with the current power-ups
    pub fn fire_cooldown(&self, settings: &Settings) -> f32 {
        let base = settings.player_fire_cooldown;
        if self.has_rapid() {
            base * RAPID_FIRE_FACTOR
        } else {
            base
        }
    }

    /// Fire unconditionally and restart the cooldown
    pub fn shoot(&mut self, settings: &Settings) -> Vec<Projectile> {
        self.fire_cooldown = self.fire_cooldown(settings);

        let muzzle = self.pos + MUZZLE_OFFSET;
        let base_vel = Vec2::new(0.0, -settings.bullet_speed);

        if self.has_spread() {
            SPREAD_ANGLES
                .iter()
                .map(|deg| {
                    let vel = Vec2::from_angle(deg.to_radians()).rotate(base_vel);
                    Projectile::new(muzzle, vel, ProjectileOwner::Player)
                })
                .collect()
        } else {
            vec![Projectile::new(muzzle, base_vel, ProjectileOwner::Player)]
        }
    }

    /// Fires if the cooldown allows, otherwise returns nothing
    pub fn try_fire(&mut self, settings: &Settings) -> Vec<Projectile> {
        if !self.can_fire() {
            return vec![];
        }
        self.shoot(settings)
    }

    /// Take one hit from a projectile or a ramming enemy
    pub fn hit(&mut self) -> HitOutcome {
        if self.is_shielded() {
            self.shield = 0.0;
            return HitOutcome::Absorbed;
        }
        self.lives = self.lives.saturating_sub(1);
        self.shield = GRACE_SHIELD;
        HitOutcome::Damaged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        Settings::default()
    }

    #[test]
    fn test_player_new() {
        let player = Player::new(&settings());
        assert_eq!(player.pos, Vec2::new(450.0, 580.0));
        assert_eq!(player.lives, 3);
        assert_eq!(player.radius, 18.0);
        assert!(player.can_fire());
        assert!(!player.is_shielded());
    }

    #[test]
    fn test_negative_dt_leaves_timers_alone() {
        let settings = settings();
        let mut player = Player::new(&settings);
        player.rapid = 2.0;
        let start = player.pos;
        player.update(-5.0, Vec2::new(1.0, 0.0), &settings);

        assert_eq!(player.pos, start);
        assert_eq!(player.shield, 0.0);
        assert_eq!(player.spread, 0.0);
        assert_eq!(player.rapid, 2.0);
        assert_eq!(player.fire_cooldown, 0.0);
        assert!(!player.is_shielded());
    }

    #[test]
    fn test_player_moves_with_normalized_input() {
        let settings = settings();
        let mut player = Player::new(&settings);
        let start = player.pos;
        player.update(0.1, Vec2::new(-1.0, -1.0), &settings);

        let moved = player.pos - start;
        assert!((moved.length() - settings.player_speed * 0.1).abs() < 1e-3);
        assert!(moved.x < 0.0 && moved.y < 0.0);
    }

    #[test]
    fn test_player_clamped_to_envelope() {
        let settings = settings();
        let mut player = Player::new(&settings);

        player.update(10.0, Vec2::new(-1.0, -1.0), &settings);
        assert_eq!(player.pos.x, 30.0);
        assert!((player.pos.y - 650.0 * 0.55).abs() < 1e-3);

        player.update(10.0, Vec2::new(1.0, 1.0), &settings);
        assert_eq!(player.pos.x, 870.0);
        assert_eq!(player.pos.y, 620.0);
    }

    #[test]
    fn test_player_fire_cooldown() {
        let settings = settings();
        let mut player = Player::new(&settings);
        assert_eq!(player.try_fire(&settings).len(), 1);
        assert!(!player.can_fire());
        assert!(player.try_fire(&settings).is_empty());

        player.update(0.23, Vec2::ZERO, &settings);
        assert!(player.can_fire());
    }

    #[test]
    fn test_rapid_fire_shortens_cooldown() {
        let settings = settings();
        let mut player = Player::new(&settings);
        player.rapid = 5.0;
        player.shoot(&settings);
        assert!((player.fire_cooldown - 0.22 * 0.55).abs() < 1e-6);

        player.rapid = 0.0;
        player.shoot(&settings);
        assert!((player.fire_cooldown - 0.22).abs() < 1e-6);
    }

    #[test]
    fn test_single_shot_goes_straight_up() {
        let settings = settings();
        let mut player = Player::new(&settings);
        let shots = player.shoot(&settings);
        assert_eq!(shots.len(), 1);
        assert_eq!(shots[0].vel, Vec2::new(0.0, -900.0));
        assert_eq!(shots[0].pos, player.pos + Vec2::new(0.0, -22.0));
        assert_eq!(shots[0].owner, ProjectileOwner::Player);
    }

    #[test]
    fn test_spread_shot_angles() {
        let settings = settings();
        let mut player = Player::new(&settings);
        player.spread = 3.0;
        let shots = player.shoot(&settings);
        assert_eq!(shots.len(), 3);

        for (shot, deg) in shots.iter().zip(SPREAD_ANGLES) {
            assert!((shot.vel.length() - 900.0).abs() < 1e-2);
            let expected = Vec2::new(
                900.0 * deg.to_radians().sin(),
                -900.0 * deg.to_radians().cos(),
            );
            assert!((shot.vel - expected).length() < 1e-2);
        }
        assert!(shots[0].vel.x < 0.0);
        assert!(shots[1].vel.x.abs() < 1e-3);
        assert!(shots[2].vel.x > 0.0);
    }

    #[test]
    fn test_shield_absorbs_exactly_once() {
        let mut player = Player::new(&settings());
        player.shield = 6.0;

        assert_eq!(player.hit(), HitOutcome::Absorbed);
        assert_eq!(player.lives, 3);
        assert_eq!(player.shield, 0.0);

        assert_eq!(player.hit(), HitOutcome::Damaged);
        assert_eq!(player.lives, 2);
    }

    #[test]
    fn test_damage_grants_grace_shield() {
        let mut player = Player::new(&settings());
        assert!(player.hit().is_damage());
        assert_eq!(player.shield, GRACE_SHIELD);
        // The grace shield absorbs the immediate follow-up
        assert!(!player.hit().is_damage());
        assert_eq!(player.lives, 2);
    }

    #[test]
    fn test_power_up_timers_decay_to_zero() {
        let settings = settings();
        let mut player = Player::new(&settings);
        player.shield = 0.5;
        player.spread = 1.0;
        player.rapid = 0.2;
        player.update(0.6, Vec2::ZERO, &settings);
        assert_eq!(player.shield, 0.0);
        assert!((player.spread - 0.4).abs() < 1e-6);
        assert_eq!(player.rapid, 0.0);
        assert!(!player.is_shielded());
        assert!(player.has_spread());
        assert!(!player.has_rapid());
    }

    // Property-based tests
    #[cfg(test)]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_player_stays_in_envelope(
                moves in prop::collection::vec((-1i8..=1, -1i8..=1, 0.0f32..0.5), 0..100)
            ) {
                let settings = Settings::default();
                let mut player = Player::new(&settings);
                for (dx, dy, dt) in moves {
                    player.update(dt, Vec2::new(dx as f32, dy as f32), &settings);
                    prop_assert!(player.pos.x >= 30.0 && player.pos.x <= 870.0);
                    prop_assert!(player.pos.y >= 650.0 * 0.55 - 1e-3 && player.pos.y <= 620.0);
                }
            }

            #[test]
            fn test_player_lives_never_increase(
                events in prop::collection::vec(prop::option::of(0.0f32..2.0), 0..50)
            ) {
                let settings = Settings::default();
                let mut player = Player::new(&settings);
                let mut last = player.lives;
                for event in events {
                    match event {
                        Some(dt) => player.update(dt, Vec2::ZERO, &settings),
                        None => { player.hit(); }
                    }
                    prop_assert!(player.lives <= last);
                    last = player.lives;
                }
            }
        }
    }
}
