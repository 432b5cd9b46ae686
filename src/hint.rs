//! One-line guidance shown on the HUD while the user hovers the buttons.

use crate::cooldown::Cooldown;
use crate::palette::{Panel, ToolPalette};
use crate::types::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hint {
    Pen,
    Eraser,
    Clear,
    Board,
    Idle,
}

impl Hint {
    pub fn text(self) -> &'static str {
        match self {
            Hint::Pen => "You've selected the pen tool. Start drawing!",
            Hint::Eraser => "Eraser activated. Clear your mistakes!",
            Hint::Clear => "Canvas cleared! Ready for a fresh start.",
            Hint::Board => "Whiteboard toggled!",
            Hint::Idle => "Use gestures to control the tools!",
        }
    }

    /// Pick the hint for a selection-mode fingertip. Must run before any toggle
    /// fires this frame, since it reads the cooldown.
    pub fn for_selection(palette: &ToolPalette, cooldown: &Cooldown, p: Point) -> Self {
        if palette.is_over_toggle(Panel::Colors, p) && cooldown.can_fire() {
            Hint::Pen
        } else if palette.is_over_clear(p) {
            Hint::Clear
        } else if palette.is_over_toggle(Panel::Board, p) && cooldown.can_fire() {
            Hint::Board
        } else if palette.is_over_eraser(p) {
            Hint::Eraser
        } else {
            Hint::Idle
        }
    }
}
