//! One run of the game, from wave 1 until the last life is lost

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::collision::CollisionWorld;
use crate::entities::{Enemy, Player, PowerUp, Projectile, Starfield};
use crate::scoring::Scoreboard;
use crate::settings::Settings;
use crate::snapshot::WorldSnapshot;
use crate::wave::WaveManager;

/// Seconds the screen flashes after the player loses a life
pub const FLASH_DURATION: f32 = 0.18;
/// Starfield speed while paused, relative to normal
const PAUSED_STARFIELD_RATE: f32 = 0.15;
const STAR_COUNT: usize = 160;

/// Held controls for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

impl TickInput {
    /// Unnormalized movement direction; opposite keys cancel out
    pub fn direction(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| f32::from(u8::from(pos)) - f32::from(u8::from(neg));
        Vec2::new(axis(self.left, self.right), axis(self.up, self.down))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Running,
    Over { final_score: u64 },
}

pub struct PlaySession {
    pub player: Player,
    pub projectiles: Vec<Projectile>,
    pub enemies: Vec<Enemy>,
    pub power_ups: Vec<PowerUp>,
    pub waves: WaveManager,
    pub scoreboard: Scoreboard,
    /// Remaining hit flash, in seconds
    pub flash: f32,
    pub paused: bool,
    /// Last power-up picked up, for the HUD
    pub power_up_message: Option<String>,
    settings: Settings,
    rng: Pcg32,
    /// Decoration only; keeps gameplay draws independent of pause timing
    star_rng: Pcg32,
    starfield: Starfield,
    status: SessionStatus,
}

impl PlaySession {
    /// Start a session; wave 1 is staged immediately
    pub fn new(settings: Settings, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut star_rng = Pcg32::seed_from_u64(rng.random());
        let starfield = Starfield::new(STAR_COUNT, settings.width, settings.height, &mut star_rng);
        let mut waves = WaveManager::new();
        waves.next_wave(&settings, &mut rng);
        log::info!("Session started with seed {seed}");

        Self {
            player: Player::new(&settings),
            projectiles: Vec::new(),
            enemies: Vec::new(),
            power_ups: Vec::new(),
            waves,
            scoreboard: Scoreboard::default(),
            flash: 0.0,
            paused: false,
            power_up_message: None,
            settings,
            rng,
            star_rng,
            starfield,
            status: SessionStatus::Running,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn score(&self) -> u64 {
        self.scoreboard.score()
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        log::debug!("Paused: {}", self.paused);
    }

    /// Advance the world by `dt` seconds
    pub fn tick(&mut self, dt: f32, input: &TickInput) -> SessionStatus {
        if let SessionStatus::Over { .. } = self.status {
            return self.status;
        }
        let dt = dt.max(0.0);

        if self.paused {
            self.starfield.update(dt * PAUSED_STARFIELD_RATE, &mut self.star_rng);
            return self.status;
        }

        self.starfield.update(dt, &mut self.star_rng);

        self.player.update(dt, input.direction(), &self.settings);
        if input.fire && self.player.can_fire() {
            let shots = self.player.shoot(&self.settings);
            self.projectiles.extend(shots);
        }

        self.waves
            .update(dt, &mut self.enemies, &self.settings, &mut self.rng);
        let bonus = self.waves.difficulty_bonus();

        for enemy in &mut self.enemies {
            enemy.update(dt, bonus, &mut self.rng);
            if let Some(shot) = enemy.maybe_fire(&mut self.rng) {
                self.projectiles.push(shot);
            }
        }

        for projectile in &mut self.projectiles {
            projectile.update(dt);
        }
        for power_up in &mut self.power_ups {
            power_up.update(dt);
        }

        self.flash = (self.flash - dt).max(0.0);
        self.scoreboard.multiplier.update(dt);

        let events = CollisionWorld {
            player: &mut self.player,
            projectiles: &mut self.projectiles,
            enemies: &mut self.enemies,
            power_ups: &mut self.power_ups,
            scoreboard: &mut self.scoreboard,
            wave_index: self.waves.wave_index(),
            settings: &self.settings,
            rng: &mut self.rng,
        }
        .resolve();

        if events.player_damaged {
            self.flash = FLASH_DURATION;
        }
        if let Some(message) = events.pickup_message {
            self.power_up_message = Some(message);
        }

        self.prune();

        if !self.player.is_alive() {
            let final_score = self.scoreboard.score();
            log::info!(
                "Session over at wave {} with score {final_score}",
                self.waves.wave_index()
            );
            self.status = SessionStatus::Over { final_score };
        }
        self.status
    }

    /// Drop spent, dead, collected and off-screen entities
    pub fn prune(&mut self) {
        let Settings { width, height, .. } = self.settings;
        self.projectiles
            .retain(|p| !p.spent && !p.is_out_of_bounds(width, height));
        self.enemies
            .retain(|e| e.is_alive() && e.pos.y < height + 80.0);
        self.power_ups
            .retain(|p| !p.collected && !p.is_out_of_bounds(height));
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            width: self.settings.width,
            height: self.settings.height,
            player: (&self.player).into(),
            projectiles: self.projectiles.iter().map(Into::into).collect(),
            enemies: self.enemies.iter().map(Into::into).collect(),
            power_ups: self.power_ups.iter().map(Into::into).collect(),
            stars: self.starfield.stars.clone(),
            score: self.scoreboard.score(),
            wave: self.waves.wave_index(),
            multiplier: self.scoreboard.multiplier.value(),
            paused: self.paused,
            message: self.power_up_message.clone(),
            flash: (self.flash / FLASH_DURATION).clamp(0.0, 1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{PowerUpKind, ProjectileOwner, SpawnSpec, Trajectory};

    fn session() -> PlaySession {
        PlaySession::new(Settings::default(), 7)
    }

    fn idle() -> TickInput {
        TickInput::default()
    }

    fn still_enemy(session: &mut PlaySession, pos: Vec2, hp: u32) -> Enemy {
        let spec = SpawnSpec {
            origin: pos,
            trajectory: Trajectory::Fall { speed: 0.0 },
        };
        Enemy::new(&spec, hp, &mut session.rng)
    }

    #[test]
    fn test_tick_input_direction() {
        let input = TickInput {
            up: true,
            right: true,
            ..TickInput::default()
        };
        assert_eq!(input.direction(), Vec2::new(1.0, -1.0));

        let cancelled = TickInput {
            left: true,
            right: true,
            ..TickInput::default()
        };
        assert_eq!(cancelled.direction(), Vec2::ZERO);
    }

    #[test]
    fn test_new_session_starts_wave_one() {
        let session = session();
        assert_eq!(session.waves.wave_index(), 1);
        assert!(session.waves.is_spawning());
        assert_eq!(session.player.lives, 3);
        assert_eq!(session.score(), 0);
        assert_eq!(session.status(), SessionStatus::Running);
    }

    #[test]
    fn test_first_tick_spawns_enemies() {
        let mut session = session();
        session.tick(0.016, &idle());
        assert!(!session.enemies.is_empty());
    }

    #[test]
    fn test_fire_spawns_projectile_and_respects_cooldown() {
        let mut session = session();
        let fire = TickInput {
            fire: true,
            ..TickInput::default()
        };
        session.tick(0.0, &fire);
        let friendly = |s: &PlaySession| s.projectiles.iter().filter(|p| p.is_friendly()).count();
        assert_eq!(friendly(&session), 1);

        session.tick(0.0, &fire);
        assert_eq!(friendly(&session), 1);
    }

    #[test]
    fn test_negative_dt_is_clamped() {
        let mut session = session();
        let before = session.player.pos;
        let left = TickInput {
            left: true,
            ..TickInput::default()
        };
        session.tick(-1.0, &left);
        assert_eq!(session.player.pos, before);
    }

    #[test]
    fn test_pause_freezes_world() {
        let mut session = session();
        session.toggle_pause();
        session.tick(1.0, &idle());
        assert!(session.enemies.is_empty());
        assert!(session.waves.is_spawning());

        session.toggle_pause();
        session.tick(0.0, &idle());
        assert!(!session.enemies.is_empty());
    }

    #[test]
    fn test_hit_sets_flash() {
        let mut session = session();
        let pos = session.player.pos;
        session
            .projectiles
            .push(Projectile::new(pos, Vec2::ZERO, ProjectileOwner::Enemy));
        session.tick(0.0, &idle());

        assert_eq!(session.player.lives, 2);
        assert_eq!(session.flash, FLASH_DURATION);
        assert_eq!(session.snapshot().flash, 1.0);
        assert!(session.projectiles.iter().all(|p| p.is_friendly()));
    }

    #[test]
    fn test_pickup_sets_message() {
        let mut session = session();
        let pos = session.player.pos;
        session.power_ups.push(PowerUp::new(pos, PowerUpKind::Rapid));
        session.tick(0.0, &idle());

        assert!(session.power_ups.is_empty());
        assert!(session.player.has_rapid());
        assert_eq!(
            session.power_up_message.as_deref(),
            Some("Power-up: Rapid Fire")
        );
    }

    #[test]
    fn test_prune_boundaries() {
        let mut session = session();
        let height = session.settings().height;

        let low = still_enemy(&mut session, Vec2::new(100.0, height + 79.0), 1);
        let gone = still_enemy(&mut session, Vec2::new(200.0, height + 81.0), 1);
        let dead = still_enemy(&mut session, Vec2::new(300.0, 100.0), 0);
        session.enemies = vec![low, gone, dead];

        let mut spent = Projectile::new(Vec2::new(50.0, 50.0), Vec2::ZERO, ProjectileOwner::Player);
        spent.spent = true;
        session.projectiles = vec![
            spent,
            Projectile::new(Vec2::new(50.0, -51.0), Vec2::ZERO, ProjectileOwner::Player),
            Projectile::new(Vec2::new(50.0, 50.0), Vec2::ZERO, ProjectileOwner::Player),
        ];

        session.prune();
        assert_eq!(session.enemies.len(), 1);
        assert_eq!(session.enemies[0].pos.x, 100.0);
        assert_eq!(session.projectiles.len(), 1);
    }

    #[test]
    fn test_session_over_is_sticky() {
        let mut session = session();
        session.player.lives = 1;
        let pos = session.player.pos;
        session
            .projectiles
            .push(Projectile::new(pos, Vec2::ZERO, ProjectileOwner::Enemy));

        let status = session.tick(0.0, &idle());
        assert_eq!(status, SessionStatus::Over { final_score: 0 });

        session.scoreboard.award_ram();
        let before = session.enemies.len();
        assert_eq!(
            session.tick(1.0, &idle()),
            SessionStatus::Over { final_score: 0 }
        );
        assert_eq!(session.enemies.len(), before);
    }

    #[test]
    fn test_snapshot_mirrors_world() {
        let mut session = session();
        session.tick(0.5, &idle());
        let snapshot = session.snapshot();

        assert_eq!(snapshot.width, 900.0);
        assert_eq!(snapshot.height, 650.0);
        assert_eq!(snapshot.wave, 1);
        assert_eq!(snapshot.enemies.len(), session.enemies.len());
        assert_eq!(snapshot.projectiles.len(), session.projectiles.len());
        assert_eq!(snapshot.player.lives, session.player.lives);
        assert_eq!(snapshot.stars.len(), STAR_COUNT);
        assert!(!snapshot.paused);
        assert!(snapshot.to_json().is_ok());
    }

    #[test]
    fn test_pause_time_does_not_shift_gameplay() {
        let mut steady = PlaySession::new(Settings::default(), 21);
        let mut paused = PlaySession::new(Settings::default(), 21);

        // Long enough for stars to wrap and respawn
        paused.toggle_pause();
        for _ in 0..50 {
            paused.tick(1.0, &idle());
        }
        paused.toggle_pause();

        for _ in 0..600 {
            steady.tick(1.0 / 60.0, &idle());
            paused.tick(1.0 / 60.0, &idle());
        }

        let (a, b) = (steady.snapshot(), paused.snapshot());
        assert_eq!(a.enemies, b.enemies);
        assert_eq!(a.projectiles, b.projectiles);
        assert_eq!(a.wave, b.wave);
        assert_eq!(a.score, b.score);
        assert_ne!(a.stars, b.stars);
    }

    #[test]
    fn test_same_seed_same_world() {
        let mut a = PlaySession::new(Settings::default(), 42);
        let mut b = PlaySession::new(Settings::default(), 42);
        let input = TickInput {
            fire: true,
            left: true,
            ..TickInput::default()
        };
        for _ in 0..240 {
            a.tick(1.0 / 60.0, &input);
            b.tick(1.0 / 60.0, &input);
        }
        assert_eq!(a.snapshot(), b.snapshot());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn arb_input() -> impl Strategy<Value = TickInput> {
            (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
                |(up, down, left, right, fire)| TickInput {
                    up,
                    down,
                    left,
                    right,
                    fire,
                },
            )
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(32))]

            #[test]
            fn prop_session_invariants(
                seed in any::<u64>(),
                steps in prop::collection::vec((0.0f32..0.1, arb_input()), 1..120),
            ) {
                let mut session = PlaySession::new(Settings::default(), seed);
                let mut last_score = 0;
                for (dt, input) in steps {
                    session.tick(dt, &input);
                    prop_assert!(session.player.lives <= 3);
                    prop_assert!(session.score() >= last_score);
                    last_score = session.score();
                    let m = session.scoreboard.multiplier.value();
                    prop_assert!((1.0..=6.0).contains(&m));
                    prop_assert!(session.projectiles.iter().all(|p| !p.spent));
                    prop_assert!(session.enemies.iter().all(|e| e.is_alive()));
                    prop_assert!(session.power_ups.iter().all(|p| !p.collected));
                }
            }
        }
    }
}
