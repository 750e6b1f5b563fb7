// Library exports for the binary and integration tests
pub use app::App;
pub use collision::{Aabb, CollisionEvents, CollisionWorld};
pub use entities::{
    Enemy, EnemyState, FormationKind, Player, PowerUp, PowerUpKind, Projectile, ProjectileOwner,
    SpawnSpec, Starfield, Trajectory,
};
pub use game::{Command, Game, Screen};
pub use scoring::{Multiplier, Scoreboard};
pub use session::{PlaySession, SessionStatus, TickInput};
pub use settings::Settings;
pub use snapshot::WorldSnapshot;
pub use wave::WaveManager;

pub mod app;
pub mod collision;
pub mod entities;
pub mod game;
pub mod input;
pub mod renderer;
pub mod scoring;
pub mod session;
pub mod settings;
pub mod snapshot;
pub mod wave;
