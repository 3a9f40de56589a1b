//! Game session controller
//!
//! Owns the Idle → Running → Ended state machine, turns wall-clock frame
//! timestamps into clamped simulation steps, and exposes the HUD values the
//! page displays.

use glam::Vec2;

use crate::consts::MAX_FRAME_DT;
use crate::sim::{self, GameEvent, InputEvent, InputQueue, InputState, StepOutcome, World};
use crate::tuning::Tuning;

/// Where the session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Before the first start
    Idle,
    Running,
    /// Player was defeated; waiting for restart
    Ended,
}

/// What a scheduled frame did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Session not running; nothing simulated
    Skipped,
    /// One step ran and the session continues
    Advanced,
    /// This step defeated the player
    Ended { final_score: u64 },
}

impl FrameOutcome {
    /// Whether the host should request another frame
    pub fn reschedule(&self) -> bool {
        matches!(self, FrameOutcome::Advanced)
    }

    /// Whether a step ran (and a frame should be drawn)
    pub fn simulated(&self) -> bool {
        !matches!(self, FrameOutcome::Skipped)
    }
}

/// Score/health values for the on-page display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hud {
    pub score: u64,
    /// Health floored and clamped at zero
    pub health: u32,
}

impl Hud {
    pub fn from_world(world: &World) -> Self {
        Self {
            score: world.score,
            health: world.player.health.max(0.0).floor() as u32,
        }
    }

    pub fn score_text(&self) -> String {
        format!("Score: {}", self.score)
    }

    pub fn health_text(&self) -> String {
        format!("Health: {}", self.health)
    }
}

/// Guards the request-next-frame handshake so only one callback is pending
#[derive(Debug, Clone, Default)]
pub struct FrameScheduler {
    pending: bool,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the caller should actually request a frame
    pub fn try_schedule(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    /// Call at the top of the frame callback
    pub fn begin_frame(&mut self) {
        self.pending = false;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

/// A play session: world, input and lifecycle
#[derive(Debug, Clone)]
pub struct GameSession {
    phase: SessionPhase,
    tuning: Tuning,
    world: World,
    queue: InputQueue,
    input: InputState,
    /// Timestamp (ms) of the previous frame
    last_time: f64,
    /// Bumped on every (re)start so each run gets a distinct RNG stream
    runs: u64,
    base_seed: u64,
}

impl GameSession {
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        Self {
            phase: SessionPhase::Idle,
            world: World::new(tuning.clone(), seed),
            tuning,
            queue: InputQueue::new(),
            input: InputState::new(),
            last_time: 0.0,
            runs: 0,
            base_seed: seed,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Latest pointer position in world space (for aiming the avatar)
    pub fn pointer(&self) -> Vec2 {
        self.input.pointer()
    }

    pub fn hud(&self) -> Hud {
        Hud::from_world(&self.world)
    }

    /// Queue an input event for the next frame.
    ///
    /// Outside a run no frames drain the queue, so events are folded into
    /// the held state right away and fire requests are dropped.
    pub fn push_event(&mut self, event: InputEvent) {
        if self.phase == SessionPhase::Running {
            self.queue.push(event);
        } else {
            self.input.settle(std::iter::once(event));
        }
    }

    /// Events waiting for the next frame
    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    /// Begin a new run from Idle (or Ended)
    pub fn start(&mut self, now_ms: f64) {
        self.reset(now_ms);
    }

    /// Restart behaves exactly like start
    pub fn restart(&mut self, now_ms: f64) {
        self.reset(now_ms);
    }

    fn reset(&mut self, now_ms: f64) {
        // Held keys and pointer survive; fire requests from before the run do not
        self.input.settle(self.queue.drain());
        self.runs += 1;
        let seed = self.base_seed.wrapping_add(self.runs);
        self.world = World::new(self.tuning.clone(), seed);
        self.last_time = now_ms;
        self.phase = SessionPhase::Running;
        log::info!("session started (run {}, seed {})", self.runs, seed);
    }

    /// Run one scheduled frame at wall-clock time `now_ms`
    pub fn frame(&mut self, now_ms: f64) -> FrameOutcome {
        if self.phase != SessionPhase::Running {
            self.input.settle(self.queue.drain());
            return FrameOutcome::Skipped;
        }

        let dt = self.frame_delta(now_ms);
        let snapshot = self.input.apply(self.queue.drain());

        for aim in &snapshot.shots {
            sim::fire(&mut self.world, *aim);
        }

        match sim::advance(&mut self.world, &snapshot, dt) {
            StepOutcome::Continue => FrameOutcome::Advanced,
            StepOutcome::PlayerDefeated => {
                self.phase = SessionPhase::Ended;
                let final_score = self.world.score;
                log::info!("session ended with score {}", final_score);
                FrameOutcome::Ended { final_score }
            }
        }
    }

    /// Seconds since the previous frame, clamped to `[0, MAX_FRAME_DT]`
    fn frame_delta(&mut self, now_ms: f64) -> f32 {
        let raw = ((now_ms - self.last_time) / 1000.0) as f32;
        self.last_time = now_ms;
        if !raw.is_finite() || raw < 0.0 {
            log::debug!("non-monotonic frame time ({raw}); stepping 0");
            return 0.0;
        }
        if raw > MAX_FRAME_DT {
            log::debug!("frame delta {raw:.3}s clamped to {MAX_FRAME_DT}s");
        }
        raw.min(MAX_FRAME_DT)
    }

    /// Take the gameplay events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.world.drain_events()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Direction, Enemy};

    fn session() -> GameSession {
        GameSession::new(Tuning::default(), 42)
    }

    #[test]
    fn test_idle_until_started() {
        let mut s = session();
        assert_eq!(s.phase(), SessionPhase::Idle);
        assert_eq!(s.frame(16.0), FrameOutcome::Skipped);
        assert_eq!(s.world().time_ticks, 0);
    }

    #[test]
    fn test_start_then_zero_delta_frame() {
        let mut s = session();
        s.start(1000.0);
        assert_eq!(s.phase(), SessionPhase::Running);

        let outcome = s.frame(1000.0);
        assert_eq!(outcome, FrameOutcome::Advanced);
        assert!(outcome.reschedule());
        assert!(s.world().enemies.is_empty());
        assert!(s.world().bullets.is_empty());

        let hud = s.hud();
        assert_eq!(hud.score_text(), "Score: 0");
        assert_eq!(hud.health_text(), "Health: 100");
    }

    #[test]
    fn test_delta_is_clamped() {
        let mut s = session();
        s.start(0.0);
        s.push_event(InputEvent::KeyDown(Direction::Right));
        let x0 = s.world().player.pos.x;
        // A 2 second stall only advances 50 ms
        s.frame(2000.0);
        let moved = s.world().player.pos.x - x0;
        assert!((moved - 220.0 * 0.05).abs() < 1e-3);
    }

    #[test]
    fn test_backwards_time_steps_zero() {
        let mut s = session();
        s.start(500.0);
        s.push_event(InputEvent::KeyDown(Direction::Right));
        let x0 = s.world().player.pos.x;
        s.frame(400.0);
        assert_eq!(s.world().player.pos.x, x0);
    }

    #[test]
    fn test_fire_event_creates_bullet() {
        let mut s = session();
        s.start(0.0);
        let player = s.world().player.pos;
        s.push_event(InputEvent::PointerMove(player + Vec2::new(50.0, 0.0)));
        s.push_event(InputEvent::PointerDown);
        s.push_event(InputEvent::Fire);
        s.frame(0.0);
        assert_eq!(s.world().bullets.len(), 1);
        assert_eq!(s.world().bullets[0].vel, Vec2::new(1500.0, 0.0));
        assert_eq!(s.drain_events(), vec![GameEvent::Shot]);
    }

    #[test]
    fn test_shots_before_start_are_dropped() {
        let mut s = session();
        s.push_event(InputEvent::KeyDown(Direction::Up));
        s.push_event(InputEvent::Fire);
        s.start(0.0);
        s.frame(0.0);
        assert!(s.world().bullets.is_empty());
        // The held key did survive the start
        s.frame(50.0);
        assert!(s.world().player.vel.y < 0.0);
    }

    #[test]
    fn test_defeat_ends_session() {
        let mut s = session();
        s.start(0.0);
        s.world.player.health = 5.0;
        let pos = s.world.player.pos;
        s.world.enemies.push(Enemy {
            pos,
            radius: 15.0,
            speed: 50.0,
            hp: 1,
        });
        s.world.score = 70;

        let outcome = s.frame(16.0);
        assert_eq!(outcome, FrameOutcome::Ended { final_score: 70 });
        assert!(!outcome.reschedule());
        assert!(outcome.simulated());
        assert_eq!(s.phase(), SessionPhase::Ended);
        assert_eq!(s.hud().health_text(), "Health: 0");

        // Ended frames do nothing
        let ticks = s.world().time_ticks;
        assert_eq!(s.frame(32.0), FrameOutcome::Skipped);
        assert_eq!(s.world().time_ticks, ticks);
    }

    #[test]
    fn test_queue_stays_empty_after_defeat() {
        let mut s = session();
        s.start(0.0);
        s.world.player.health = 5.0;
        let pos = s.world.player.pos;
        s.world.enemies.push(Enemy {
            pos,
            radius: 15.0,
            speed: 50.0,
            hp: 1,
        });
        assert!(matches!(s.frame(16.0), FrameOutcome::Ended { .. }));

        for i in 0..10_000 {
            s.push_event(InputEvent::PointerMove(Vec2::new(i as f32, 10.0)));
            s.push_event(InputEvent::Fire);
        }
        assert_eq!(s.pending_events(), 0);
        // The pointer still tracks the latest move for the next run
        assert_eq!(s.pointer(), Vec2::new(9999.0, 10.0));

        s.restart(100.0);
        s.frame(100.0);
        assert!(s.world().bullets.is_empty());
    }

    #[test]
    fn test_idle_events_do_not_queue() {
        let mut s = session();
        s.push_event(InputEvent::KeyDown(Direction::Left));
        s.push_event(InputEvent::PointerMove(Vec2::new(5.0, 5.0)));
        assert_eq!(s.pending_events(), 0);
        assert_eq!(s.pointer(), Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut s = session();
        s.start(0.0);
        s.world.score = 120;
        s.world.player.health = 40.0;
        s.world.spawn_interval = 500.0;
        s.world.enemies.push(Enemy {
            pos: Vec2::ZERO,
            radius: 15.0,
            speed: 50.0,
            hp: 2,
        });
        s.restart(100.0);

        let w = s.world();
        assert_eq!(s.phase(), SessionPhase::Running);
        assert_eq!(w.score, 0);
        assert_eq!(w.player.health, 100.0);
        assert_eq!(w.spawn_interval, 1000.0);
        assert_eq!(w.spawn_timer, 0.0);
        assert!(w.enemies.is_empty());
        assert!(w.bullets.is_empty());
        assert_eq!(w.player.pos, Vec2::new(450.0, 300.0));
    }

    #[test]
    fn test_runs_use_distinct_seeds() {
        let mut s = session();
        s.start(0.0);
        let first = s.world().seed;
        s.restart(0.0);
        assert_ne!(first, s.world().seed);
    }

    #[test]
    fn test_hud_floors_health() {
        let mut world = World::new(Tuning::default(), 1);
        world.player.health = 87.9;
        assert_eq!(Hud::from_world(&world).health, 87);
        world.player.health = -4.0;
        assert_eq!(Hud::from_world(&world).health, 0);
    }

    #[test]
    fn test_scheduler_single_pending() {
        let mut sched = FrameScheduler::new();
        assert!(sched.try_schedule());
        // A restart while a frame is pending must not start a second loop
        assert!(!sched.try_schedule());
        sched.begin_frame();
        assert!(!sched.is_pending());
        assert!(sched.try_schedule());
    }
}
