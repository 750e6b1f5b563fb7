//! Spawn formations and the trajectories enemies follow after spawning
//!
//! A formation is generated once at wave start. Each enemy gets a
//! [`SpawnSpec`]: where it appears and a [`Trajectory`] holding the random
//! parameters drawn for it, evaluated as a pure function of elapsed time.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;

/// Vertical start line for every formation (just above the arena)
pub const SPAWN_Y: f32 = -40.0;
/// Hard cap on enemies per formation
pub const MAX_FORMATION_SIZE: usize = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormationKind {
    Line,
    V,
    SineDrift,
    Ring,
}

impl FormationKind {
    const ALL: [FormationKind; 4] = [
        FormationKind::Line,
        FormationKind::V,
        FormationKind::SineDrift,
        FormationKind::Ring,
    ];

    /// Rings only appear from wave 3 onwards
    pub fn choose<R: Rng + ?Sized>(wave_index: u32, rng: &mut R) -> Self {
        let all = Self::ALL;
        let available = if wave_index >= 3 { &all[..] } else { &all[..3] };
        available.choose(rng).copied().unwrap_or(FormationKind::Line)
    }
}

/// Movement law bound at spawn time
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Trajectory {
    /// Straight down
    Fall { speed: f32 },
    /// Down with a fixed-rate horizontal wobble
    Wobble { speed: f32, amplitude: f32, phase: f32 },
    /// Down with an independent sine sway
    SineDrift {
        speed: f32,
        amplitude: f32,
        frequency: f32,
        phase: f32,
    },
    /// Orbit a falling centre while the orbit radius shrinks
    Spiral {
        center_x: f32,
        angle: f32,
        radius: f32,
        shrink: f32,
        speed: f32,
    },
}

impl Trajectory {
    const WOBBLE_FREQUENCY: f32 = 1.6;
    const SPIRAL_ANGULAR_SPEED: f32 = 0.5;

    /// Position `t` seconds after spawning at `origin`
    pub fn position(&self, t: f32, origin: Vec2) -> Vec2 {
        match *self {
            Trajectory::Fall { speed } => Vec2::new(origin.x, origin.y + speed * t),
            Trajectory::Wobble {
                speed,
                amplitude,
                phase,
            } => Vec2::new(
                origin.x + (t * Self::WOBBLE_FREQUENCY + phase).sin() * amplitude,
                origin.y + speed * t,
            ),
            Trajectory::SineDrift {
                speed,
                amplitude,
                frequency,
                phase,
            } => Vec2::new(
                origin.x + (t * frequency + phase).sin() * amplitude,
                origin.y + speed * t,
            ),
            Trajectory::Spiral {
                center_x,
                angle,
                radius,
                shrink,
                speed,
            } => {
                let r = radius * (1.0 - shrink * t).max(0.0);
                Vec2::new(
                    center_x + (angle + t * Self::SPIRAL_ANGULAR_SPEED).cos() * r,
                    origin.y + speed * t,
                )
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnSpec {
    pub origin: Vec2,
    pub trajectory: Trajectory,
}

/// Evenly spaced across `width`, falling straight down
pub fn line(count: usize, width: f32, y: f32, x_center: f32, speed: f32) -> Vec<SpawnSpec> {
    let xs: Vec<f32> = if count <= 1 {
        vec![x_center]
    } else {
        let step = width / (count - 1) as f32;
        (0..count)
            .map(|i| x_center - width / 2.0 + i as f32 * step)
            .collect()
    };

    xs.into_iter()
        .map(|x| SpawnSpec {
            origin: Vec2::new(x, y),
            trajectory: Trajectory::Fall { speed },
        })
        .collect()
}

/// A V opening upwards; outer members start lower
pub fn v_shape<R: Rng + ?Sized>(
    count: usize,
    spread: f32,
    y: f32,
    x_center: f32,
    speed: f32,
    rng: &mut R,
) -> Vec<SpawnSpec> {
    let half = (count / 2).max(1) as f32;
    let middle = count.saturating_sub(1) as f32 / 2.0;

    (0..count)
        .map(|i| {
            let offset = i as f32 - middle;
            SpawnSpec {
                origin: Vec2::new(x_center + offset * (spread / half), y + offset.abs() * 14.0),
                trajectory: Trajectory::Wobble {
                    speed,
                    amplitude: rng.random_range(18.0..=34.0),
                    phase: rng.random_range(0.0..TAU),
                },
            }
        })
        .collect()
}

/// Evenly spread over `span`, each swaying with its own amplitude and rate
pub fn sine_drift<R: Rng + ?Sized>(
    count: usize,
    span: f32,
    y: f32,
    x_center: f32,
    speed: f32,
    rng: &mut R,
) -> Vec<SpawnSpec> {
    if count == 0 {
        return vec![];
    }
    let slot = span / count as f32;

    (0..count)
        .map(|i| SpawnSpec {
            origin: Vec2::new(x_center - span / 2.0 + (i as f32 + 0.5) * slot, y),
            trajectory: Trajectory::SineDrift {
                speed,
                amplitude: rng.random_range(40.0..=90.0),
                frequency: rng.random_range(1.0..=2.2),
                phase: rng.random_range(0.0..TAU),
            },
        })
        .collect()
}

/// Around a vertically squashed circle that spirals inwards as it falls
pub fn ring<R: Rng + ?Sized>(
    count: usize,
    radius: f32,
    y: f32,
    x_center: f32,
    speed: f32,
    rng: &mut R,
) -> Vec<SpawnSpec> {
    if count == 0 {
        return vec![];
    }

    (0..count)
        .map(|i| {
            let angle = i as f32 / count as f32 * TAU;
            SpawnSpec {
                origin: Vec2::new(
                    x_center + angle.cos() * radius,
                    y + angle.sin() * radius * 0.35,
                ),
                trajectory: Trajectory::Spiral {
                    center_x: x_center,
                    angle,
                    radius,
                    shrink: rng.random_range(0.05..=0.12),
                    speed,
                },
            }
        })
        .collect()
}

/// Enemy count for a wave before the per-family limits
pub fn formation_size<R: Rng + ?Sized>(wave_index: u32, rng: &mut R) -> usize {
    let base = 6 + (wave_index as f32 * 0.8) as i64;
    let jitter: i64 = rng.random_range(-1..=3);
    (base + jitter).clamp(1, MAX_FORMATION_SIZE as i64) as usize
}

/// Build a formation of the given kind, sized for the wave
pub fn generate<R: Rng + ?Sized>(
    kind: FormationKind,
    count: usize,
    wave_index: u32,
    screen_w: f32,
    speed: f32,
    rng: &mut R,
) -> Vec<SpawnSpec> {
    let x_center = screen_w / 2.0;
    let wave = wave_index as f32;

    match kind {
        FormationKind::Line => line(count, (300.0 + wave * 25.0).min(700.0), SPAWN_Y, x_center, speed),
        FormationKind::V => v_shape(
            count,
            (260.0 + wave * 22.0).min(650.0),
            SPAWN_Y,
            x_center,
            speed,
            rng,
        ),
        FormationKind::SineDrift => sine_drift(
            count,
            (320.0 + wave * 28.0).min(760.0),
            SPAWN_Y,
            x_center,
            speed,
            rng,
        ),
        FormationKind::Ring => ring(
            count.clamp(8, 14),
            (110.0 + wave * 10.0).min(220.0),
            SPAWN_Y + 20.0,
            x_center,
            speed,
            rng,
        ),
    }
}

/// Pick and build the formation for a wave
pub fn random_pattern<R: Rng + ?Sized>(
    wave_index: u32,
    screen_w: f32,
    speed: f32,
    rng: &mut R,
) -> Vec<SpawnSpec> {
    let count = formation_size(wave_index, rng);
    let kind = FormationKind::choose(wave_index, rng);
    log::debug!("Wave {wave_index}: {kind:?} formation of {count} at speed {speed:.1}");
    generate(kind, count, wave_index, screen_w, speed, rng)
}
