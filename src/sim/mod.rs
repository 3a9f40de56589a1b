//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay deterministic:
//! - Input arrives as a per-tick snapshot
//! - Seeded RNG only
//! - Stable iteration order (collections keep insertion order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod input;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{circles_overlap, separation_normal};
pub use input::{Direction, InputEvent, InputQueue, InputState, KeyBinding, TickInput, pointer_to_world};
pub use spawner::{Edge, spawn_one};
pub use state::{Bullet, Enemy, GameEvent, Player, World};
pub use tick::{StepOutcome, advance, fire};
