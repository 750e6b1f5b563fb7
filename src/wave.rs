//! Wave scheduling
//!
//! Waves alternate between an intermission (no enemies, nothing queued) and
//! a spawning phase that releases a formation member every 0.08s.

use rand::Rng;

use crate::entities::{Enemy, SpawnSpec, random_pattern};
use crate::settings::Settings;

/// Delay between consecutive spawns of one formation
pub const SPAWN_STAGGER: f32 = 0.08;
/// Countdown before the very first wave of a fresh manager
const FIRST_WAVE_DELAY: f32 = 1.0;

#[derive(Debug, Clone)]
pub struct SpawnEntry {
    /// Seconds until this enemy appears
    pub delay: f32,
    pub spec: SpawnSpec,
}

#[derive(Debug, Clone)]
pub struct WaveManager {
    wave_index: u32,
    time_to_next: f32,
    spawn_queue: Vec<SpawnEntry>,
    spawned_this_wave: usize,
}

impl Default for WaveManager {
    fn default() -> Self {
        Self::new()
    }
}

impl WaveManager {
    pub fn new() -> Self {
        Self {
            wave_index: 0,
            time_to_next: FIRST_WAVE_DELAY,
            spawn_queue: Vec::new(),
            spawned_this_wave: 0,
        }
    }

    pub fn wave_index(&self) -> u32 {
        self.wave_index
    }

    pub fn spawn_queue(&self) -> &[SpawnEntry] {
        &self.spawn_queue
    }

    pub fn spawned_this_wave(&self) -> usize {
        self.spawned_this_wave
    }

    /// Seconds left in the current intermission
    pub fn time_to_next(&self) -> f32 {
        self.time_to_next
    }

    /// Formation members are still waiting to appear
    pub fn is_spawning(&self) -> bool {
        !self.spawn_queue.is_empty()
    }

    /// Enemy speed for the current wave
    pub fn enemy_speed(&self, settings: &Settings) -> f32 {
        let waves_survived = self.wave_index.saturating_sub(1) as f32;
        settings.enemy_base_speed * (1.0 + settings.wave_speed_scaler * waves_survived)
    }

    /// Start the next wave and stage its formation
    pub fn next_wave<R: Rng + ?Sized>(&mut self, settings: &Settings, rng: &mut R) {
        self.wave_index += 1;
        self.spawned_this_wave = 0;

        let speed = self.enemy_speed(settings);
        let specs = random_pattern(self.wave_index, settings.width, speed, rng);
        log::info!(
            "Wave {} begins: {} enemies at speed {:.1}",
            self.wave_index,
            specs.len(),
            speed
        );

        self.spawn_queue.extend(specs.into_iter().enumerate().map(|(i, spec)| SpawnEntry {
            delay: i as f32 * SPAWN_STAGGER,
            spec,
        }));
        self.time_to_next = settings.wave_time_between;
    }

    /// Run the intermission countdown and release due spawns into `enemies`
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        enemies: &mut Vec<Enemy>,
        settings: &Settings,
        rng: &mut R,
    ) {
        if self.spawn_queue.is_empty() && enemies.is_empty() {
            self.time_to_next -= dt;
            if self.time_to_next <= 0.0 {
                self.next_wave(settings, rng);
            }
        }

        for entry in &mut self.spawn_queue {
            entry.delay -= dt;
        }

        let (ready, waiting): (Vec<SpawnEntry>, Vec<SpawnEntry>) = self
            .spawn_queue
            .drain(..)
            .partition(|entry| entry.delay <= 0.0);
        self.spawn_queue = waiting;

        for entry in ready {
            enemies.push(Enemy::new(&entry.spec, settings.enemy_hp, rng));
            self.spawned_this_wave += 1;
        }
    }

    /// Extra dive speed factor for later waves
    pub fn difficulty_bonus(&self) -> f32 {
        (self.wave_index.saturating_sub(1) as f32 * 0.25).max(0.0)
    }
}
