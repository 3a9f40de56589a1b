//! Property tests for the simulation step

use glam::Vec2;
use proptest::prelude::*;

use swarm_shooter::sim::{Bullet, StepOutcome, TickInput, World, advance, fire};
use swarm_shooter::{GameSession, Tuning};

fn held_input(held: [bool; 4]) -> TickInput {
    TickInput {
        held,
        ..Default::default()
    }
}

/// Tuning with the spawner effectively switched off
fn quiet_tuning() -> Tuning {
    Tuning {
        spawn_rate: 0.0,
        ..Tuning::default()
    }
}

proptest! {
    #[test]
    fn movement_is_normalized(held in proptest::array::uniform4(any::<bool>())) {
        let len = held_input(held).move_direction().length();
        prop_assert!(len == 0.0 || (len - 1.0).abs() < 1e-5);
    }

    #[test]
    fn velocity_is_full_speed_or_zero(held in proptest::array::uniform4(any::<bool>())) {
        let mut world = World::new(quiet_tuning(), 1);
        advance(&mut world, &held_input(held), 0.0);
        let speed = world.player.vel.length();
        let cancels = held[0] == held[1] && held[2] == held[3];
        if cancels {
            prop_assert_eq!(world.player.vel, Vec2::ZERO);
        } else {
            prop_assert!((speed - world.player.speed).abs() < 1e-3);
        }
    }

    #[test]
    fn player_moves_at_most_speed_times_dt(
        held in proptest::array::uniform4(any::<bool>()),
        dt in 0.0f32..0.05,
    ) {
        let mut world = World::new(quiet_tuning(), 1);
        let before = world.player.pos;
        advance(&mut world, &held_input(held), dt);
        let moved = world.player.pos.distance(before);
        prop_assert!(moved <= world.player.speed * dt + 1e-3);
    }

    #[test]
    fn player_stays_inside_the_world(
        seed in any::<u64>(),
        start_x in 0.0f32..900.0,
        start_y in 0.0f32..600.0,
        steps in proptest::collection::vec(
            (proptest::array::uniform4(any::<bool>()), 0.0f32..0.05),
            1..200,
        ),
    ) {
        let mut world = World::new(Tuning::default(), seed);
        world.player.pos = world.clamp_inset(Vec2::new(start_x, start_y), world.player.radius);

        for (held, dt) in steps {
            let outcome = advance(&mut world, &held_input(held), dt);
            let p = world.player.pos;
            let r = world.player.radius;
            prop_assert!(p.x >= r - 1e-3 && p.x <= world.width - r + 1e-3);
            prop_assert!(p.y >= r - 1e-3 && p.y <= world.height - r + 1e-3);
            if outcome == StepOutcome::PlayerDefeated {
                break;
            }
        }
    }

    #[test]
    fn bullet_life_only_decreases(
        angles in proptest::collection::vec(0.0f32..std::f32::consts::TAU, 1..20),
        dts in proptest::collection::vec(0.0f32..0.05, 1..60),
    ) {
        let mut world = World::new(quiet_tuning(), 2);
        let centre = world.player.pos;
        for angle in angles {
            fire(&mut world, centre + Vec2::from_angle(angle) * 100.0);
        }

        for dt in dts {
            let before: Vec<Bullet> = world.bullets.clone();
            advance(&mut world, &TickInput::default(), dt);
            prop_assert!(world.bullets.len() <= before.len());
            for b in &world.bullets {
                prop_assert!(b.life > 0.0);
                prop_assert!(b.life <= world.tuning.bullet_life);
            }
            if dt > 1e-3 {
                let max_before = before.iter().map(|b| b.life).fold(0.0, f32::max);
                let max_after = world.bullets.iter().map(|b| b.life).fold(0.0, f32::max);
                prop_assert!(world.bullets.is_empty() || max_after < max_before);
            }
        }
    }

    #[test]
    fn score_never_decreases(
        seed in any::<u64>(),
        frames in proptest::collection::vec((any::<bool>(), 0.0f32..0.05), 1..300),
    ) {
        let mut world = World::new(Tuning::default(), seed);
        let mut last = world.score;

        for (shoot, dt) in frames {
            if shoot {
                let target = world
                    .enemies
                    .first()
                    .map(|e| e.pos)
                    .unwrap_or(world.player.pos + Vec2::X);
                fire(&mut world, target);
            }
            let outcome = advance(&mut world, &TickInput::default(), dt);
            prop_assert!(world.score >= last);
            prop_assert_eq!(world.score % world.tuning.kill_reward, 0);
            last = world.score;
            if outcome == StepOutcome::PlayerDefeated {
                break;
            }
        }
    }

    #[test]
    fn spawn_interval_respects_floor(
        seed in any::<u64>(),
        dts in proptest::collection::vec(0.02f32..0.05, 300..500),
    ) {
        // A few spawns from here reach the floor
        let tuning = Tuning {
            spawn_interval_start: 400.0,
            ..Tuning::default()
        };
        let mut world = World::new(tuning, seed);
        // Keep the player alive so the spawner keeps running
        world.player.health = f32::MAX;
        let mut last = world.spawn_interval;

        for dt in dts {
            advance(&mut world, &TickInput::default(), dt);
            prop_assert!(world.spawn_interval >= world.tuning.spawn_interval_min);
            prop_assert!(world.spawn_interval <= last);
            last = world.spawn_interval;
        }
        prop_assert_eq!(world.spawn_interval, world.tuning.spawn_interval_min);
    }

    #[test]
    fn session_frames_never_step_backwards(
        times in proptest::collection::vec(0.0f64..10_000.0, 1..100),
    ) {
        let mut session = GameSession::new(Tuning::default(), 9);
        session.start(0.0);
        for t in times {
            let ticks = session.world().time_ticks;
            session.frame(t);
            prop_assert!(session.world().time_ticks >= ticks);
            let hud = session.hud();
            prop_assert!(hud.health <= 100);
        }
    }
}
