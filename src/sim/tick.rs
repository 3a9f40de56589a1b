//! Simulation step
//!
//! Advances the world by one variable timestep. The phases run in a fixed
//! order; later phases see the positions produced by earlier ones.

use glam::Vec2;

use super::collision::{circles_overlap, separation_normal};
use super::input::TickInput;
use super::spawner::spawn_one;
use super::state::{Bullet, GameEvent, World};
use crate::heading;

/// Result of a single step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The session continues
    Continue,
    /// Player health reached zero; the rest of the step was skipped
    PlayerDefeated,
}

/// Fire one bullet from the player toward `aim`
pub fn fire(world: &mut World, aim: Vec2) {
    let tuning = &world.tuning;
    let player = &world.player;
    let dir = Vec2::from_angle(heading(player.pos, aim));

    world.bullets.push(Bullet {
        pos: player.pos + dir * (player.radius + tuning.muzzle_offset),
        vel: dir * tuning.bullet_speed,
        radius: tuning.bullet_radius,
        life: tuning.bullet_life,
    });
    world.events.push(GameEvent::Shot);
}

/// Advance the world by `dt` seconds using the given input snapshot
pub fn advance(world: &mut World, input: &TickInput, dt: f32) -> StepOutcome {
    world.time_ticks += 1;

    move_player(world, input, dt);
    move_bullets(world, dt);
    move_enemies(world, dt);

    if resolve_contacts(world) == StepOutcome::PlayerDefeated {
        return StepOutcome::PlayerDefeated;
    }

    resolve_bullet_hits(world);
    advance_spawner(world, dt);

    StepOutcome::Continue
}

fn move_player(world: &mut World, input: &TickInput, dt: f32) {
    let player = &mut world.player;
    player.vel = input.move_direction() * player.speed;
    player.pos += player.vel * dt;

    let (pos, radius) = (world.player.pos, world.player.radius);
    world.player.pos = world.clamp_inset(pos, radius);
}

fn move_bullets(world: &mut World, dt: f32) {
    for b in &mut world.bullets {
        b.pos += b.vel * dt;
        b.life -= dt;
    }

    let margin = world.tuning.bullet_margin;
    let bullets = std::mem::take(&mut world.bullets);
    world.bullets = bullets
        .into_iter()
        .filter(|b| b.life > 0.0 && world.within_margin(b.pos, margin))
        .collect();
}

fn move_enemies(world: &mut World, dt: f32) {
    let target = world.player.pos;
    for enemy in &mut world.enemies {
        let dir = Vec2::from_angle(heading(enemy.pos, target));
        enemy.pos += dir * enemy.speed * dt;
    }
}

/// Enemies that touch the player deal damage and are consumed
fn resolve_contacts(world: &mut World) -> StepOutcome {
    // Newest enemies first
    for i in (0..world.enemies.len()).rev() {
        let enemy = &world.enemies[i];
        let player = &world.player;
        if !circles_overlap(enemy.pos, enemy.radius, player.pos, player.radius) {
            continue;
        }

        let push = separation_normal(enemy.pos, player.pos) * world.tuning.knockback;
        world.player.health -= world.tuning.contact_damage;
        let (pos, radius) = (world.player.pos + push, world.player.radius);
        world.player.pos = world.clamp_inset(pos, radius);
        world.enemies.remove(i);
        world.events.push(GameEvent::PlayerHit {
            health: world.player.health,
        });

        if world.player.is_defeated() {
            world.events.push(GameEvent::PlayerDefeated {
                final_score: world.score,
            });
            return StepOutcome::PlayerDefeated;
        }
    }
    StepOutcome::Continue
}

/// Bullets damage the first enemy they overlap and are consumed.
/// Both collections are scanned newest first.
fn resolve_bullet_hits(world: &mut World) {
    let damage = world.tuning.bullet_damage;
    let reward = world.tuning.kill_reward;

    for i in (0..world.enemies.len()).rev() {
        for j in (0..world.bullets.len()).rev() {
            let enemy = &world.enemies[i];
            let bullet = &world.bullets[j];
            if !circles_overlap(enemy.pos, enemy.radius, bullet.pos, bullet.radius) {
                continue;
            }

            world.bullets.remove(j);
            let enemy = &mut world.enemies[i];
            enemy.hp = enemy.hp.saturating_sub(damage);
            if enemy.hp == 0 {
                world.score += reward;
                world.events.push(GameEvent::EnemyKilled { score: world.score });
                world.enemies.remove(i);
                break;
            }
            world.events.push(GameEvent::EnemyHit { hp_left: enemy.hp });
        }
    }
}

/// Accumulate spawn time and ramp difficulty on every spawn
fn advance_spawner(world: &mut World, dt: f32) {
    world.spawn_timer += dt * world.tuning.spawn_rate;
    if world.spawn_timer < world.spawn_interval {
        return;
    }

    world.spawn_timer = world.tuning.spawn_timer_reset;
    spawn_one(world);
    world.spawn_interval = (world.spawn_interval - world.tuning.spawn_interval_step)
        .max(world.tuning.spawn_interval_min);
}
