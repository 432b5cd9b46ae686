//! The persistent drawing surface, its compositing onto the live frame, and the
//! binarized snapshot handed to a recognizer.

use image::{GrayImage, Luma};

use crate::draw::draw_thick_line;
use crate::types::{FrameBuffer, Point, Rgb};

/// Canvas pixels brighter than this count as ink when compositing.
const INK_LUMA_THRESHOLD: u8 = 20;

/// One straight piece of a stroke, as drawn on the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
    pub color: Rgb,
    pub width: u32,
}

/// Pixel buffer that accumulates strokes for the lifetime of the run.
pub struct Canvas {
    buf: FrameBuffer,
    background: Rgb,
}

impl Canvas {
    pub fn new(width: usize, height: usize, background: Rgb) -> Self {
        Self { buf: FrameBuffer::filled(width, height, background), background }
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgb> {
        self.buf.get(x, y)
    }

    pub fn buffer(&self) -> &FrameBuffer {
        &self.buf
    }

    /// Wipe every pixel back to the background colour.
    pub fn clear(&mut self) {
        self.buf.pixels.fill(self.background.to_u32());
    }

    pub fn draw_segment(&mut self, seg: &Segment) {
        draw_thick_line(&mut self.buf, seg.from, seg.to, seg.width, seg.color.to_u32());
    }

    /// Lay the canvas over `frame`: ink pixels replace the frame, dark pixels are OR-ed in.
    pub fn composite_onto(&self, frame: &mut FrameBuffer) {
        debug_assert_eq!((frame.width, frame.height), (self.buf.width, self.buf.height));
        for (dst, &src) in frame.pixels.iter_mut().zip(&self.buf.pixels) {
            if Rgb::from_u32(src).luma() > INK_LUMA_THRESHOLD {
                *dst = src;
            } else {
                *dst |= src;
            }
        }
    }

    /// Grayscale canvas binarized with Otsu's threshold and inverted, so ink is
    /// black on white.
    pub fn binarized(&self) -> GrayImage {
        let gray: Vec<u8> = self.buf.pixels.iter().map(|&px| Rgb::from_u32(px).luma()).collect();
        let threshold = otsu_threshold(&gray);
        GrayImage::from_fn(self.buf.width as u32, self.buf.height as u32, |x, y| {
            let v = gray[y as usize * self.buf.width + x as usize];
            Luma([if v > threshold { 0 } else { 255 }])
        })
    }
}

/// Threshold maximising between-class variance of the histogram.
fn otsu_threshold(gray: &[u8]) -> u8 {
    let mut hist = [0u64; 256];
    for &v in gray {
        hist[v as usize] += 1;
    }
    let total = gray.len() as f64;
    let sum_all: f64 = hist.iter().enumerate().map(|(i, &n)| i as f64 * n as f64).sum();

    let mut sum_bg = 0.0;
    let mut weight_bg = 0.0;
    let mut best = (0u8, -1.0f64);
    for (t, &n) in hist.iter().enumerate() {
        weight_bg += n as f64;
        if weight_bg == 0.0 {
            continue;
        }
        let weight_fg = total - weight_bg;
        if weight_fg == 0.0 {
            break;
        }
        sum_bg += t as f64 * n as f64;
        let mean_bg = sum_bg / weight_bg;
        let mean_fg = (sum_all - sum_bg) / weight_fg;
        let between = weight_bg * weight_fg * (mean_bg - mean_fg).powi(2);
        if between > best.1 {
            best = (t as u8, between);
        }
    }
    best.0
}
