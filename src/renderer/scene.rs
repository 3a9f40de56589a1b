//! Frame composition
//!
//! Turns a `World` snapshot into one triangle list in world coordinates.
//! Draw order is background grid, player, bullets, enemies.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::heading;
use crate::sim::{Enemy, World};

/// Spacing of the background grid in world units
pub const GRID_GAP: f32 = 40.0;
const GRID_THICKNESS: f32 = 1.0;

const CIRCLE_SEGMENTS: u32 = 32;
const SMALL_SEGMENTS: u32 = 12;
const RIM_WIDTH: f32 = 1.0;

/// Barrel rectangle in the player's local frame (+x toward the pointer)
const BARREL_INSET: f32 = 4.0;
const BARREL_LENGTH: f32 = 18.0;
const BARREL_HALF_WIDTH: f32 = 5.0;

/// Fill color for an enemy with `hp` hit points left
pub fn enemy_color(hp: u32) -> [f32; 4] {
    match hp {
        0 | 1 => colors::ENEMY_WEAK,
        2 => colors::ENEMY_HURT,
        _ => colors::ENEMY_TOUGH,
    }
}

/// Center and radius of an enemy's eye, offset toward `target`
pub fn enemy_eye(enemy: &Enemy, target: Vec2) -> (Vec2, f32) {
    let dir = Vec2::from_angle(heading(enemy.pos, target));
    let center = enemy.pos + dir * (enemy.radius * 0.5);
    (center, (enemy.radius * 0.18).max(2.0))
}

/// Grid line endpoints covering a `width` x `height` area
pub fn grid_lines(width: f32, height: f32) -> Vec<(Vec2, Vec2)> {
    let mut lines = Vec::new();
    let mut x = 0.0;
    while x < width {
        lines.push((Vec2::new(x, 0.0), Vec2::new(x, height)));
        x += GRID_GAP;
    }
    let mut y = 0.0;
    while y < height {
        lines.push((Vec2::new(0.0, y), Vec2::new(width, y)));
        y += GRID_GAP;
    }
    lines
}

/// Build all vertices for one frame. `pointer` orients the player's barrel.
pub fn build_frame(world: &World, pointer: Vec2) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(
        1024 + world.enemies.len() * CIRCLE_SEGMENTS as usize * 9
            + world.bullets.len() * SMALL_SEGMENTS as usize * 9,
    );

    for (from, to) in grid_lines(world.width, world.height) {
        vertices.extend(shapes::line(from, to, GRID_THICKNESS, colors::GRID));
    }

    // Player body and barrel
    let player = &world.player;
    vertices.extend(shapes::circle(
        player.pos,
        player.radius,
        colors::PLAYER,
        CIRCLE_SEGMENTS,
    ));
    let barrel_start = player.radius - BARREL_INSET;
    vertices.extend(shapes::oriented_rect(
        player.pos,
        heading(player.pos, pointer),
        Vec2::new(barrel_start, -BARREL_HALF_WIDTH),
        Vec2::new(barrel_start + BARREL_LENGTH, BARREL_HALF_WIDTH),
        colors::BARREL,
    ));

    for bullet in &world.bullets {
        vertices.extend(shapes::circle(
            bullet.pos,
            bullet.radius,
            colors::BULLET,
            SMALL_SEGMENTS,
        ));
        vertices.extend(shapes::ring(
            bullet.pos,
            bullet.radius - RIM_WIDTH / 2.0,
            bullet.radius + RIM_WIDTH / 2.0,
            colors::BULLET_RIM,
            SMALL_SEGMENTS,
        ));
    }

    for enemy in &world.enemies {
        vertices.extend(shapes::circle(
            enemy.pos,
            enemy.radius,
            enemy_color(enemy.hp),
            CIRCLE_SEGMENTS,
        ));
        vertices.extend(shapes::ring(
            enemy.pos,
            enemy.radius - RIM_WIDTH / 2.0,
            enemy.radius + RIM_WIDTH / 2.0,
            colors::ENEMY_RIM,
            CIRCLE_SEGMENTS,
        ));
        let (eye, eye_radius) = enemy_eye(enemy, player.pos);
        vertices.extend(shapes::circle(
            eye,
            eye_radius,
            colors::ENEMY_EYE,
            SMALL_SEGMENTS,
        ));
    }

    vertices
}
