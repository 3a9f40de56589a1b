//! Enemy spawning
//!
//! Enemies are born just outside a random viewport edge with stats that
//! climb with the score.

use glam::Vec2;
use rand::Rng;

use super::state::{Enemy, GameEvent, World};
use crate::random_range;
use crate::tuning::Tuning;

/// Viewport edge an enemy enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// A uniformly random point along `edge`, pushed `margin` outside the viewport
pub fn edge_position<R: Rng>(rng: &mut R, edge: Edge, width: f32, height: f32, margin: f32) -> Vec2 {
    match edge {
        Edge::Top => Vec2::new(random_range(rng, -margin, width + margin), -margin),
        Edge::Right => Vec2::new(width + margin, random_range(rng, -margin, height + margin)),
        Edge::Bottom => Vec2::new(random_range(rng, -margin, width + margin), height + margin),
        Edge::Left => Vec2::new(-margin, random_range(rng, -margin, height + margin)),
    }
}

/// Speed for a new enemy: random base plus a capped score bonus
pub fn enemy_speed<R: Rng>(rng: &mut R, tuning: &Tuning, score: u64) -> f32 {
    let bonus = (score as f32 * tuning.enemy_speed_per_score).min(tuning.enemy_speed_bonus_max);
    random_range(rng, tuning.enemy_speed_min, tuning.enemy_speed_max) + bonus
}

/// Hit points for a new enemy: random base plus score bonus, rounded up, at least 1
pub fn enemy_hp<R: Rng>(rng: &mut R, tuning: &Tuning, score: u64) -> u32 {
    let raw = random_range(rng, tuning.enemy_hp_min, tuning.enemy_hp_max)
        + score as f32 * tuning.enemy_hp_per_score;
    (raw.ceil() as u32).max(1)
}

/// Append exactly one enemy to the world
pub fn spawn_one(world: &mut World) {
    let World {
        rng,
        tuning,
        width,
        height,
        score,
        ..
    } = world;

    let edge = Edge::random(rng);
    let pos = edge_position(rng, edge, *width, *height, tuning.spawn_margin);
    let speed = enemy_speed(rng, tuning, *score);
    let hp = enemy_hp(rng, tuning, *score);
    let radius = random_range(rng, tuning.enemy_radius_min, tuning.enemy_radius_max);

    log::debug!(
        "spawn enemy edge={:?} pos=({:.0}, {:.0}) speed={:.1} hp={}",
        edge,
        pos.x,
        pos.y,
        speed,
        hp
    );

    world.enemies.push(Enemy {
        pos,
        radius,
        speed,
        hp,
    });
    world.events.push(GameEvent::EnemySpawned);
}
