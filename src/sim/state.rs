//! Game state and core simulation types
//!
//! The `World` is the whole per-session context: it owns the player, every
//! bullet and enemy, the score, the spawn pacing and the session RNG.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::tuning::Tuning;

/// The player avatar
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    /// World units per second
    pub speed: f32,
    /// Velocity of the most recent step (derived from input, not persisted)
    pub vel: Vec2,
    pub health: f32,
}

impl Player {
    pub fn new(pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            pos,
            radius: tuning.player_radius,
            speed: tuning.player_speed,
            vel: Vec2::ZERO,
            health: tuning.player_health,
        }
    }

    pub fn is_defeated(&self) -> bool {
        self.health <= 0.0
    }
}

/// A projectile fired by the player
#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Seconds remaining before expiry
    pub life: f32,
}

/// A homing enemy
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub hp: u32,
}

/// Things that happened during a step, drained by the host for audio/logging
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A bullet left the muzzle
    Shot,
    EnemySpawned,
    /// A bullet struck an enemy that survived
    EnemyHit { hp_left: u32 },
    /// An enemy was destroyed; carries the new score
    EnemyKilled { score: u64 },
    /// An enemy rammed the player; carries the remaining health
    PlayerHit { health: f32 },
    PlayerDefeated { final_score: u64 },
}

/// Complete per-session simulation state
#[derive(Debug, Clone)]
pub struct World {
    pub width: f32,
    pub height: f32,
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub score: u64,
    /// Spawn timer units accumulated since the last spawn
    pub spawn_timer: f32,
    /// Threshold the spawn timer must reach; shrinks toward the floor
    pub spawn_interval: f32,
    /// Steps taken this session
    pub time_ticks: u64,
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub events: Vec<GameEvent>,
    pub tuning: Tuning,
}

impl World {
    /// Fresh session state: player centred, empty collections, timers reset
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let centre = Vec2::new(tuning.world_width / 2.0, tuning.world_height / 2.0);
        Self {
            width: tuning.world_width,
            height: tuning.world_height,
            player: Player::new(centre, &tuning),
            bullets: Vec::new(),
            enemies: Vec::new(),
            score: 0,
            spawn_timer: 0.0,
            spawn_interval: tuning.spawn_interval_start,
            time_ticks: 0,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            tuning,
        }
    }

    /// Clamp a point into the playable rectangle inset by `radius`
    pub fn clamp_inset(&self, pos: Vec2, radius: f32) -> Vec2 {
        Vec2::new(
            pos.x.max(radius).min(self.width - radius),
            pos.y.max(radius).min(self.height - radius),
        )
    }

    /// Whether a point is within `margin` of the viewport on every side
    pub fn within_margin(&self, pos: Vec2, margin: f32) -> bool {
        pos.x >= -margin
            && pos.y >= -margin
            && pos.x <= self.width + margin
            && pos.y <= self.height + margin
    }

    /// Take the events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
