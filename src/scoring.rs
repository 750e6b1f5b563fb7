//! Score and the decaying score multiplier

/// Multiplier never exceeds this, however many pickups stack
pub const MAX_MULTIPLIER: f32 = 6.0;
/// Base points for destroying an enemy
const KILL_POINTS: f64 = 100.0;
/// Extra fraction of kill points per wave reached
const KILL_WAVE_BONUS: f64 = 0.06;
/// Points for ramming an enemy, before the multiplier
const RAM_POINTS: f64 = 60.0;

/// Points for destroying an enemy during `wave_index`
pub fn kill_points(wave_index: u32, multiplier: f32) -> u64 {
    let points = KILL_POINTS * (1.0 + KILL_WAVE_BONUS * wave_index as f64) * multiplier as f64;
    points.round() as u64
}

/// Points for ramming an enemy, awarded even when the shield absorbs the hit
pub fn ram_bonus(multiplier: f32) -> u64 {
    (RAM_POINTS * multiplier as f64).round() as u64
}

#[derive(Debug, Clone, PartialEq)]
pub struct Multiplier {
    value: f32,
    /// Seconds until the multiplier falls back to 1
    timer: f32,
}

impl Default for Multiplier {
    fn default() -> Self {
        Self {
            value: 1.0,
            timer: 0.0,
        }
    }
}

impl Multiplier {
    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn remaining(&self) -> f32 {
        self.timer
    }

    /// Double the multiplier (capped) and restart the decay timer
    pub fn boost(&mut self, duration: f32) {
        self.value = (self.value * 2.0).min(MAX_MULTIPLIER);
        self.timer = duration.max(0.0);
    }

    pub fn update(&mut self, dt: f32) {
        if self.timer > 0.0 {
            self.timer = (self.timer - dt.max(0.0)).max(0.0);
            if self.timer <= 0.0 {
                self.value = 1.0;
            }
        }
    }
}

/// Running score of one play session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scoreboard {
    score: u64,
    pub multiplier: Multiplier,
}

impl Scoreboard {
    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn award_kill(&mut self, wave_index: u32) -> u64 {
        let points = kill_points(wave_index, self.multiplier.value());
        self.score = self.score.saturating_add(points);
        points
    }

    pub fn award_ram(&mut self) -> u64 {
        let points = ram_bonus(self.multiplier.value());
        self.score = self.score.saturating_add(points);
        points
    }
}
