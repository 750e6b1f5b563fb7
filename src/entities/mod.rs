mod enemy;
pub mod formation;
mod pickup;
mod player;
mod projectile;
mod starfield;

// Re-export all public types
pub use enemy::{ENEMY_RADIUS, Enemy, EnemyState};
pub use formation::{FormationKind, SpawnSpec, Trajectory, random_pattern};
pub use pickup::{POWER_UP_RADIUS, PowerUp, PowerUpKind};
pub use player::{GRACE_SHIELD, HitOutcome, PLAYER_LIVES, PLAYER_RADIUS, Player, SPREAD_ANGLES};
pub use projectile::{PROJECTILE_RADIUS, Projectile, ProjectileOwner};
pub use starfield::{Star, Starfield};
