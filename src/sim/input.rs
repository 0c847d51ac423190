//! Input event types
//!
//! The windowing shell is an externally supplied event source; it translates
//! its own key codes into these crate-local types and forwards them to
//! [`GameWorld::on_key`](super::world::GameWorld::on_key) and
//! [`GameWorld::on_cursor_move`](super::world::GameWorld::on_cursor_move).

/// Keys the simulation reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    /// Restart the run
    R,
    /// Hold for debug bounding-box overlay
    D,
    /// With shift: slow the game down
    Comma,
    /// With shift: speed the game up
    Period,
}

/// Press/repeat/release, mirroring the usual windowing callback shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Press,
    Repeat,
    Release,
}

/// Modifier flags accompanying a key event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Self = Self { shift: false };
    pub const SHIFT: Self = Self { shift: true };
}
