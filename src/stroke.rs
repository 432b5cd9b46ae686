//! Turns successive fingertip samples into connected line segments.

use crate::canvas::{Canvas, Segment};
use crate::palette::ToolState;
use crate::types::Point;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StrokeTracker {
    last: Option<Point>,
}

impl StrokeTracker {
    pub fn last_point(&self) -> Option<Point> {
        self.last
    }

    /// The first sample of a stroke only anchors it. Later samples draw a segment
    /// from the previous sample, eraser-wide when the eraser is active.
    pub fn begin_or_continue(&mut self, canvas: &mut Canvas, point: Point, tools: &ToolState) -> Option<Segment> {
        let prev = self.last.replace(point)?;
        let seg = Segment { from: prev, to: point, color: tools.color(), width: tools.stroke_width() };
        canvas.draw_segment(&seg);
        Some(seg)
    }

    /// Break the stroke; the next sample starts a new one.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{ERASER_COLOR, ToolPalette};
    use crate::types::Rgb;
    use pretty_assertions::assert_eq;

    fn canvas() -> Canvas {
        Canvas::new(200, 200, Rgb::BLACK)
    }

    fn untouched(c: &Canvas) -> bool {
        c.buffer().pixels.iter().all(|&p| p == Rgb::BLACK.to_u32())
    }

    #[test]
    fn first_sample_only_anchors() {
        let mut c = canvas();
        let mut s = StrokeTracker::default();
        assert_eq!(s.begin_or_continue(&mut c, Point::new(50, 50), &ToolState::default()), None);
        assert!(untouched(&c));
        assert_eq!(s.last_point(), Some(Point::new(50, 50)));
    }

    #[test]
    fn second_sample_draws_brush_segment() {
        let mut c = canvas();
        let mut s = StrokeTracker::default();
        let tools = ToolState::default();
        s.begin_or_continue(&mut c, Point::new(50, 50), &tools);
        let seg = s.begin_or_continue(&mut c, Point::new(90, 50), &tools);
        assert_eq!(
            seg,
            Some(Segment { from: Point::new(50, 50), to: Point::new(90, 50), color: tools.color(), width: 5 })
        );
        assert_eq!(c.pixel(70, 52), Some(tools.color()));
        assert_eq!(c.pixel(70, 53), Some(Rgb::BLACK));
    }

    #[test]
    fn eraser_uses_eraser_width() {
        let palette = ToolPalette::new(Rgb::WHITE);
        let mut tools = ToolState::default();
        tools.set_color(ERASER_COLOR, &palette.colors()).unwrap();

        let mut c = canvas();
        let mut s = StrokeTracker::default();
        s.begin_or_continue(&mut c, Point::new(100, 100), &tools);
        let seg = s.begin_or_continue(&mut c, Point::new(110, 100), &tools).unwrap();
        assert_eq!(seg.width, 20);
        assert_eq!(seg.color, ERASER_COLOR);
    }

    #[test]
    fn reset_prevents_bridging_segment() {
        let mut c = canvas();
        let mut s = StrokeTracker::default();
        let tools = ToolState::default();
        s.begin_or_continue(&mut c, Point::new(20, 20), &tools);
        s.reset();
        assert_eq!(s.begin_or_continue(&mut c, Point::new(150, 150), &tools), None);
        assert!(untouched(&c));
        // midpoint of the would-be jump line
        assert_eq!(c.pixel(85, 85), Some(Rgb::BLACK));
    }
}
