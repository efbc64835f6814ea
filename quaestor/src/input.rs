//! Simulated mouse and keyboard input behind a narrow, fakeable interface.

use std::fmt::Debug;

use crate::errors::AutomationError;
use crate::geometry::Point;

/// Mouse buttons for simulated clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Injects input the way a human user would.
///
/// Text is written through clicks and keystrokes rather than a direct
/// value-set call: many controls only accept input this way, and driving the
/// same code paths a user exercises is the point of a UI-level test. Keeping
/// the surface this small lets tests substitute a recorder instead of moving
/// the real cursor.
pub trait InputSimulator: Send + Sync + Debug {
    /// Click the given button at a screen point.
    fn click(&self, button: MouseButton, point: Point) -> Result<(), AutomationError>;

    /// Send the platform select-all chord to the focused control.
    fn select_all(&self) -> Result<(), AutomationError>;

    /// Type the literal text into the focused control.
    fn type_text(&self, text: &str) -> Result<(), AutomationError>;
}
