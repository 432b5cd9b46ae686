//! Hand detection seam. The landmark model itself lives outside this crate; the
//! window's mouse stands in for it so the app runs without one.

use crate::draw::PointerState;
use crate::gesture::{FingerFlags, HandSample, LANDMARK_COUNT};
use crate::types::FrameBuffer;

/// Anything that can find a hand in a frame.
pub trait HandDetector {
    /// Landmarks and extended fingers for the hand in `frame`, or None when no
    /// hand is visible.
    fn detect(&mut self, frame: &FrameBuffer) -> Option<HandSample>;
}

/// Mouse-driven detector: left button points (draw), right button raises two
/// fingers (select). The pointer leaving the window counts as no hand.
#[derive(Debug, Default)]
pub struct PointerDetector {
    pointer: PointerState,
}

impl PointerDetector {
    /// Record the pointer for the next `detect` call.
    pub fn observe(&mut self, pointer: PointerState) {
        self.pointer = pointer;
    }
}

impl HandDetector for PointerDetector {
    fn detect(&mut self, _frame: &FrameBuffer) -> Option<HandSample> {
        let tip = self.pointer.pos?;
        let index = self.pointer.left || self.pointer.right;
        let middle = self.pointer.right;
        Some(HandSample {
            landmarks: vec![tip; LANDMARK_COUNT],
            fingers: FingerFlags([false, index, middle, false, false]),
        })
    }
}
