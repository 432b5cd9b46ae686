//! Rectangular on-screen buttons: point containment and translucent rendering.

use crate::draw::{blend_rect, draw_text_5x7, outline_rect, text_size_5x7};
use crate::types::{FrameBuffer, Point, Rgb};

/// Translucency of a region that is not being pressed.
pub const IDLE_TRANSLUCENCY: f32 = 0.5;

const LABEL_COLOR: Rgb = Rgb::WHITE;
const LABEL_SCALE: i32 = 2;
const BORDER_COLOR: Rgb = Rgb::WHITE;
const BORDER_THICKNESS: i32 = 2;

/// Axis-aligned rectangle in frame coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Strict interior test: points on the border are outside.
    pub fn contains(&self, p: Point) -> bool {
        self.x < p.x && p.x < self.x + self.width && self.y < p.y && p.y < self.y + self.height
    }
}

/// A labelled, coloured button or panel. Geometry is fixed for the run; the pressed
/// look and the shown label are supplied by the caller at render time.
#[derive(Clone, Debug, PartialEq)]
pub struct HitRegion {
    pub rect: Rect,
    pub color: Rgb,
    pub label: String,
    /// Translucency used when the region is not highlighted.
    pub idle_translucency: f32,
}

impl HitRegion {
    pub fn new(rect: Rect, color: Rgb, label: impl Into<String>) -> Self {
        debug_assert!(rect.width > 0 && rect.height > 0);
        Self { rect, color, label: label.into(), idle_translucency: IDLE_TRANSLUCENCY }
    }

    pub fn with_idle_translucency(mut self, translucency: f32) -> Self {
        self.idle_translucency = translucency.clamp(0.0, 1.0);
        self
    }

    pub fn contains(&self, p: Point) -> bool {
        self.rect.contains(p)
    }

    /// Highlighted regions are painted solid; idle ones let the video show through.
    pub fn translucency(&self, highlighted: bool) -> f32 {
        if highlighted { 0.0 } else { self.idle_translucency }
    }

    /// Blend the rectangle over `fb`, centre `label` in it and draw the border.
    pub fn render(&self, fb: &mut FrameBuffer, translucency: f32, label: &str) {
        let Rect { x, y, width, height } = self.rect;
        blend_rect(fb, x, y, width, height, self.color, translucency);

        if !label.is_empty() {
            let (tw, th) = text_size_5x7(label, LABEL_SCALE);
            let tx = x + width / 2 - tw / 2;
            let ty = y + height / 2 - th / 2;
            draw_text_5x7(fb, tx, ty, label, LABEL_COLOR.to_u32(), LABEL_SCALE);
        }

        outline_rect(fb, x, y, width, height, BORDER_THICKNESS, BORDER_COLOR.to_u32());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region() -> HitRegion {
        HitRegion::new(Rect::new(200, 0, 100, 100), Rgb::new(0, 255, 120), "Colors")
    }

    #[test]
    fn interior_points_are_inside() {
        let r = region();
        for p in [(201, 1), (250, 50), (299, 99)] {
            assert!(r.contains(p.into()), "{p:?} should be inside");
        }
    }

    #[test]
    fn boundary_and_outside_points_are_not() {
        let r = region();
        for p in [(200, 50), (300, 50), (250, 0), (250, 100), (200, 0), (300, 100), (150, 50), (250, 150)] {
            assert!(!r.contains(p.into()), "{p:?} should be outside");
        }
    }

    #[test]
    fn highlight_is_solid() {
        let r = region().with_idle_translucency(0.6);
        assert_eq!(r.translucency(true), 0.0);
        assert_eq!(r.translucency(false), 0.6);
    }

    #[test]
    fn render_fills_and_borders() {
        let mut fb = FrameBuffer::filled(400, 200, Rgb::BLACK);
        let r = region();
        r.render(&mut fb, 0.0, "");
        assert_eq!(fb.get(210, 50), Some(r.color));
        assert_eq!(fb.get(200, 50), Some(Rgb::WHITE));
        assert_eq!(fb.get(199, 50), Some(Rgb::BLACK));
    }
}
