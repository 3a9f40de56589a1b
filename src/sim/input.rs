//! Input capture
//!
//! Platform callbacks only ever push [`InputEvent`]s into an [`InputQueue`].
//! Once per tick the queue is folded into the held [`InputState`], producing
//! a [`TickInput`] snapshot the simulation reads deterministically.

use std::collections::VecDeque;

use glam::Vec2;

/// Logical movement directions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    fn index(self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }
}

/// What a physical key means to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyBinding {
    Move(Direction),
    Fire,
    Mute,
}

impl KeyBinding {
    /// Map a DOM `KeyboardEvent.key` value; unknown keys are ignored
    pub fn from_key(key: &str) -> Option<Self> {
        let binding = match key.to_ascii_lowercase().as_str() {
            "w" | "arrowup" => KeyBinding::Move(Direction::Up),
            "s" | "arrowdown" => KeyBinding::Move(Direction::Down),
            "a" | "arrowleft" => KeyBinding::Move(Direction::Left),
            "d" | "arrowright" => KeyBinding::Move(Direction::Right),
            " " | "spacebar" => KeyBinding::Fire,
            "m" => KeyBinding::Mute,
            _ => return None,
        };
        Some(binding)
    }
}

/// A single input occurrence, in arrival order
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(Direction),
    KeyUp(Direction),
    /// Pointer position already mapped into world space
    PointerMove(Vec2),
    PointerDown,
    PointerUp,
    /// Fire toward the pointer position current at this point in the queue
    Fire,
}

/// Events received since the previous tick
#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    events: VecDeque<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn drain(&mut self) -> impl Iterator<Item = InputEvent> + '_ {
        self.events.drain(..)
    }
}

/// Latched input that persists across ticks (held keys, pointer)
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: [bool; 4],
    pointer: Vec2,
    pointer_down: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_held(&self, dir: Direction) -> bool {
        self.held[dir.index()]
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    /// Fold queued events in order and return this tick's snapshot
    pub fn apply<I>(&mut self, events: I) -> TickInput
    where
        I: IntoIterator<Item = InputEvent>,
    {
        let mut shots = Vec::new();
        for event in events {
            match event {
                InputEvent::KeyDown(dir) => self.held[dir.index()] = true,
                InputEvent::KeyUp(dir) => self.held[dir.index()] = false,
                InputEvent::PointerMove(pos) => self.pointer = pos,
                InputEvent::PointerDown => self.pointer_down = true,
                InputEvent::PointerUp => self.pointer_down = false,
                InputEvent::Fire => shots.push(self.pointer),
            }
        }
        TickInput {
            held: self.held,
            pointer: self.pointer,
            pointer_down: self.pointer_down,
            shots,
        }
    }

    /// Fold queued events but discard any fire requests (used while not running)
    pub fn settle<I>(&mut self, events: I)
    where
        I: IntoIterator<Item = InputEvent>,
    {
        let _ = self.apply(events);
    }
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    pub held: [bool; 4],
    /// Aim point in world space
    pub pointer: Vec2,
    pub pointer_down: bool,
    /// Aim points of the fire requests received since the last tick
    pub shots: Vec<Vec2>,
}

impl TickInput {
    /// Snapshot with the given directions held and nothing else
    pub fn holding(dirs: &[Direction]) -> Self {
        let mut input = Self::default();
        for dir in dirs {
            input.held[dir.index()] = true;
        }
        input
    }

    pub fn is_held(&self, dir: Direction) -> bool {
        self.held[dir.index()]
    }

    /// Unit movement direction; opposite keys cancel and no keys give zero
    pub fn move_direction(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.is_held(Direction::Up) {
            dir.y -= 1.0;
        }
        if self.is_held(Direction::Down) {
            dir.y += 1.0;
        }
        if self.is_held(Direction::Left) {
            dir.x -= 1.0;
        }
        if self.is_held(Direction::Right) {
            dir.x += 1.0;
        }
        dir.normalize_or_zero()
    }
}

/// Map a client-space pointer position into world space.
///
/// `rect_origin`/`rect_size` describe where the surface is displayed,
/// `surface_size` is its native (world) size. A collapsed rect keeps scale 1.
pub fn pointer_to_world(
    client: Vec2,
    rect_origin: Vec2,
    rect_size: Vec2,
    surface_size: Vec2,
) -> Vec2 {
    let scale_x = if rect_size.x > 0.0 {
        surface_size.x / rect_size.x
    } else {
        1.0
    };
    let scale_y = if rect_size.y > 0.0 {
        surface_size.y / rect_size.y
    } else {
        1.0
    };
    (client - rect_origin) * Vec2::new(scale_x, scale_y)
}
