use glam::Vec2;

/// Radius of every projectile, friendly or hostile
pub const PROJECTILE_RADIUS: f32 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileOwner {
    Player,
    Enemy,
}

#[derive(Debug, Clone)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub owner: ProjectileOwner,
    pub damage: u32,
    /// Consumed by a hit this tick; dropped by the next prune
    pub spent: bool,
}

impl Projectile {
    pub fn new(pos: Vec2, vel: Vec2, owner: ProjectileOwner) -> Self {
        Self {
            pos,
            vel,
            radius: PROJECTILE_RADIUS,
            owner,
            damage: 1,
            spent: false,
        }
    }

    /// Fired by the player (hurts enemies)
    pub fn is_friendly(&self) -> bool {
        self.owner == ProjectileOwner::Player
    }

    pub fn update(&mut self, dt: f32) {
        self.pos += self.vel * dt.max(0.0);
    }

    /// Outside the arena plus a generous margin on every side
    pub fn is_out_of_bounds(&self, width: f32, height: f32) -> bool {
        let inside = self.pos.y > -50.0
            && self.pos.y < height + 80.0
            && self.pos.x > -60.0
            && self.pos.x < width + 60.0;
        !inside
    }
}
