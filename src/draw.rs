// Window + software drawing utilities.
// Visual effects provided here:
// 1) A window that shows the composited camera + canvas image.
// 2) Raster primitives: pixels, thick lines, discs, translucent rectangles.
// 3) A tiny 5x7 bitmap font to render button labels and HUD text.

use crate::error::Error;
use crate::types::{FrameBuffer, Point, Rgb};
use minifb::{Key, MouseButton, MouseMode, Window, WindowOptions};

pub struct Drawer {
    window: Window, // the on-screen window you see
}

/// Snapshot of the mouse for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PointerState {
    pub pos: Option<Point>,
    pub left: bool,
    pub right: bool,
}

impl Drawer {
    /// Create a window sized to the processing frame.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        Ok(Self { window })
    }

    /// Push the pixels for this frame to the screen.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// True while ESC is held down (we exit when this is pressed).
    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Mouse position and buttons. `pos` is None while the pointer is outside the window.
    pub fn pointer(&self) -> PointerState {
        let pos = self
            .window
            .get_mouse_pos(MouseMode::Discard)
            .map(|(x, y)| Point::new(x as i32, y as i32));
        PointerState {
            pos,
            left: self.window.get_mouse_down(MouseButton::Left),
            right: self.window.get_mouse_down(MouseButton::Right),
        }
    }
}

/* ---------- Software drawing ---------- */

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
#[inline]
pub fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = color;
}

/// Walk the Bresenham points between (x0,y0) and (x1,y1), both ends included.
fn bresenham(x0: i32, y0: i32, x1: i32, y1: i32, mut plot: impl FnMut(i32, i32)) {
    let (mut x0, mut y0) = (x0, y0);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        plot(x0, y0);
        if x0 == x1 && y0 == y1 { break; }
        let e2 = 2 * err;
        if e2 >= dy { err += dy; x0 += sx; }
        if e2 <= dx { err += dx; y0 += sy; }
    }
}

/// Fill a solid disc of `radius` centred at (cx,cy).
pub fn fill_disc(fb: &mut FrameBuffer, cx: i32, cy: i32, radius: i32, color: u32) {
    if radius <= 0 {
        put_pixel(fb, cx, cy, color);
        return;
    }
    let r2 = radius * radius;
    for y in (cy - radius)..=(cy + radius) {
        for x in (cx - radius)..=(cx + radius) {
            let (dx, dy) = (x - cx, y - cy);
            if dx * dx + dy * dy <= r2 {
                put_pixel(fb, x, y, color);
            }
        }
    }
}

/// Draw a line about `thickness` pixels wide with round caps.
/// Discs of radius `thickness / 2` are stamped along the Bresenham path, so the
/// painted span is always odd: odd widths come out exact, even widths one pixel
/// wider (10 -> 11, 20 -> 21).
pub fn draw_thick_line(fb: &mut FrameBuffer, from: Point, to: Point, thickness: u32, color: u32) {
    let radius = (thickness / 2) as i32;
    bresenham(from.x, from.y, to.x, to.y, |x, y| fill_disc(fb, x, y, radius, color));
}

/// Blend a solid rectangle over the buffer. `translucency` is the weight kept from
/// the pixels underneath: 0.0 paints `color` solid, 1.0 leaves the buffer untouched.
pub fn blend_rect(fb: &mut FrameBuffer, x: i32, y: i32, w: i32, h: i32, color: Rgb, translucency: f32) {
    let t = translucency.clamp(0.0, 1.0);
    let x0 = x.max(0) as usize;
    let y0 = y.max(0) as usize;
    let x1 = ((x + w).max(0) as usize).min(fb.width);
    let y1 = ((y + h).max(0) as usize).min(fb.height);
    let mix = |under: u8, over: u8| -> u8 {
        (under as f32 * t + over as f32 * (1.0 - t)).round().clamp(0.0, 255.0) as u8
    };
    for row in y0..y1 {
        for col in x0..x1 {
            let idx = row * fb.width + col;
            let under = Rgb::from_u32(fb.pixels[idx]);
            let out = Rgb::new(mix(under.r, color.r), mix(under.g, color.g), mix(under.b, color.b));
            fb.pixels[idx] = out.to_u32();
        }
    }
}

/// Draw a rectangle border `thickness` pixels wide, inside the rectangle.
pub fn outline_rect(fb: &mut FrameBuffer, x: i32, y: i32, w: i32, h: i32, thickness: i32, color: u32) {
    for t in 0..thickness {
        for col in x..(x + w) {
            put_pixel(fb, col, y + t, color);
            put_pixel(fb, col, y + h - 1 - t, color);
        }
        for row in y..(y + h) {
            put_pixel(fb, x + t, row, color);
            put_pixel(fb, x + w - 1 - t, row, color);
        }
    }
}

/* ---------- 5x7 bitmap font ---------- */

/// Return a 5x7 glyph bitmap. Lowercase letters share the uppercase shapes.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    // Helper macro to define a glyph quickly
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch.to_ascii_uppercase() {
        // Digits 0..9
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'J' => g!(0b00111,0b00010,0b00010,0b00010,0b00010,0b10010,0b01100),
        'K' => g!(0b10001,0b10010,0b10100,0b11000,0b10100,0b10010,0b10001),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'M' => g!(0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001),
        'N' => g!(0b10001,0b10001,0b11001,0b10101,0b10011,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'Q' => g!(0b01110,0b10001,0b10001,0b10001,0b10101,0b10010,0b01101),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),
        'W' => g!(0b10001,0b10001,0b10001,0b10101,0b10101,0b10101,0b01010),
        'X' => g!(0b10001,0b10001,0b01010,0b00100,0b01010,0b10001,0b10001),
        'Y' => g!(0b10001,0b10001,0b01010,0b00100,0b00100,0b00100,0b00100),
        'Z' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b10000,0b11111),

        // Punctuation
        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),
        ',' => g!(0b00000,0b00000,0b00000,0b00000,0b00110,0b00100,0b01000),
        '!' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00000,0b00100),
        '?' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b00000,0b00100),
        '\'' => g!(0b00100,0b00100,0b01000,0b00000,0b00000,0b00000,0b00000),
        '-' => g!(0b00000,0b00000,0b00000,0b11111,0b00000,0b00000,0b00000),
        '%' => g!(0b11000,0b11001,0b00010,0b00100,0b01000,0b10011,0b00011),

        _ => None,
    }
}

/// Draw a single 5x7 character at (x,y), each font pixel a `scale`x`scale` block.
/// A 1-block black shadow keeps it readable over the video.
fn draw_char_5x7(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, color: u32, scale: i32) {
    let Some(rows) = glyph5x7(ch) else { return };
    let mut pass = |ox: i32, oy: i32, c: u32| {
        for (ry, rowbits) in rows.iter().enumerate() {
            for rx in 0..5 {
                if (rowbits & (1 << (4 - rx))) == 0 {
                    continue;
                }
                let px = x + rx * scale + ox;
                let py = y + ry as i32 * scale + oy;
                for sy in 0..scale {
                    for sx in 0..scale {
                        put_pixel(fb, px + sx, py + sy, c);
                    }
                }
            }
        }
    };
    // Shadow pass, then foreground pass
    pass(scale, scale, 0x00000000);
    pass(0, 0, color);
}

/// Pixel size of `text` drawn at `scale`.
pub fn text_size_5x7(text: &str, scale: i32) -> (i32, i32) {
    let n = text.chars().count() as i32;
    if n == 0 {
        return (0, 0);
    }
    (n * 6 * scale - scale, 7 * scale)
}

/// Draw a text string using 5x7 glyphs; each glyph advances 6 font pixels.
pub fn draw_text_5x7(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, color: u32, scale: i32) {
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch, color, scale);
        x += 6 * scale;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank(w: usize, h: usize) -> FrameBuffer {
        FrameBuffer::filled(w, h, Rgb::BLACK)
    }

    #[test]
    fn thick_line_spans_its_width() {
        let mut fb = blank(64, 64);
        let white = Rgb::WHITE.to_u32();
        draw_thick_line(&mut fb, Point::new(10, 30), Point::new(40, 30), 10, white);

        // radius 5 around the row
        assert_eq!(fb.get(25, 25), Some(Rgb::WHITE));
        assert_eq!(fb.get(25, 35), Some(Rgb::WHITE));
        assert_eq!(fb.get(25, 24), Some(Rgb::BLACK));
        assert_eq!(fb.get(25, 36), Some(Rgb::BLACK));
        // round caps past the endpoints
        assert_eq!(fb.get(5, 30), Some(Rgb::WHITE));
        assert_eq!(fb.get(4, 30), Some(Rgb::BLACK));
    }

    #[test]
    fn thick_line_span_rounds_up_to_odd() {
        let white = Rgb::WHITE.to_u32();
        for (thickness, span) in [(1, 1), (5, 5), (10, 11), (15, 15), (20, 21)] {
            let mut fb = blank(64, 64);
            draw_thick_line(&mut fb, Point::new(20, 32), Point::new(40, 32), thickness, white);
            let painted = (0..64).filter(|&y| fb.get(30, y) == Some(Rgb::WHITE)).count();
            assert_eq!(painted, span, "thickness {thickness}");
        }
    }

    #[test]
    fn thick_line_clips_at_edges() {
        let mut fb = blank(16, 16);
        draw_thick_line(&mut fb, Point::new(-5, -5), Point::new(30, 30), 6, Rgb::WHITE.to_u32());
        assert_eq!(fb.get(8, 8), Some(Rgb::WHITE));
    }

    #[test]
    fn blend_rect_weights() {
        let mut fb = blank(8, 8);
        blend_rect(&mut fb, 2, 2, 4, 4, Rgb::new(200, 100, 0), 0.5);
        assert_eq!(fb.get(3, 3), Some(Rgb::new(100, 50, 0)));
        assert_eq!(fb.get(1, 1), Some(Rgb::BLACK));

        blend_rect(&mut fb, 0, 0, 8, 8, Rgb::WHITE, 0.0);
        assert_eq!(fb.get(0, 0), Some(Rgb::WHITE));
        assert_eq!(fb.get(7, 7), Some(Rgb::WHITE));
    }

    #[test]
    fn outline_stays_inside() {
        let mut fb = blank(10, 10);
        outline_rect(&mut fb, 2, 2, 5, 5, 1, Rgb::WHITE.to_u32());
        assert_eq!(fb.get(2, 2), Some(Rgb::WHITE));
        assert_eq!(fb.get(6, 6), Some(Rgb::WHITE));
        assert_eq!(fb.get(4, 4), Some(Rgb::BLACK));
        assert_eq!(fb.get(7, 7), Some(Rgb::BLACK));
    }

    #[test]
    fn text_size_and_glyph_coverage() {
        assert_eq!(text_size_5x7("Hide", 2), (46, 14));
        assert_eq!(text_size_5x7("", 2), (0, 0));
        for ch in "Colors Pen Board Eraser Clear Hide 0123456789!?',.-%".chars() {
            assert!(glyph5x7(ch).is_some(), "missing glyph {ch:?}");
        }
    }

    #[test]
    fn text_draws_something() {
        let mut fb = blank(40, 20);
        draw_text_5x7(&mut fb, 1, 1, "A", Rgb::WHITE.to_u32(), 1);
        // apex of the A
        assert_eq!(fb.get(2, 1), Some(Rgb::WHITE));
    }
}
