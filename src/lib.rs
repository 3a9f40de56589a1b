//! Swarm Shooter - a top-down arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (input snapshot, step, collisions, spawning)
//! - `session`: Idle/Running/Ended state machine and frame scheduling
//! - `renderer`: Scene tessellation and the WebGPU pipeline
//! - `tuning`: Data-driven game balance
//! - `audio`: Procedural sound effects
//! - `platform`: Browser glue shared by the entry point

pub mod audio;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod sim;
pub mod tuning;

pub use session::{FrameOutcome, FrameScheduler, GameSession, Hud, SessionPhase};
pub use tuning::{Tuning, TuningError};

use glam::Vec2;
use rand::Rng;

/// Engine-level constants that are not gameplay balance
pub mod consts {
    /// Largest single simulation step in seconds (stalled tabs are clamped to this)
    pub const MAX_FRAME_DT: f32 = 0.05;
    /// Fallback seed when the host provides none
    pub const DEFAULT_SEED: u64 = 0x5eed_cafe;
}

/// Uniform sample in `[min, max)`; an empty or inverted range yields `min`
#[inline]
pub fn random_range<R: Rng>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max > min {
        rng.random_range(min..max)
    } else {
        min
    }
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Angle (radians) of the vector pointing from `from` to `to`.
///
/// Coincident points give 0, i.e. "facing right".
#[inline]
pub fn heading(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}
