use glam::Vec2;
use rand::Rng;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Star {
    pub pos: Vec2,
    pub speed: f32,
    pub size: u8,
}

impl Star {
    fn random<R: Rng + ?Sized>(width: f32, y: f32, rng: &mut R) -> Self {
        Self {
            pos: Vec2::new(rng.random_range(0.0..width), y),
            speed: rng.random_range(30.0..150.0),
            // One in three stars is big
            size: if rng.random_range(0..3) == 0 { 2 } else { 1 },
        }
    }
}

/// Scrolling background; purely decorative
#[derive(Debug, Clone)]
pub struct Starfield {
    pub stars: Vec<Star>,
    width: f32,
    height: f32,
}

impl Starfield {
    pub fn new<R: Rng + ?Sized>(count: usize, width: f32, height: f32, rng: &mut R) -> Self {
        let stars = (0..count)
            .map(|_| {
                let y = rng.random_range(0.0..height);
                Star::random(width, y, rng)
            })
            .collect();
        Self {
            stars,
            width,
            height,
        }
    }

    /// Scroll down; stars leaving the bottom respawn at the top
    pub fn update<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R) {
        let dt = dt.max(0.0);
        for star in &mut self.stars {
            star.pos.y += star.speed * dt;
            if star.pos.y > self.height {
                *star = Star::random(self.width, -2.0, rng);
            }
        }
    }
}
