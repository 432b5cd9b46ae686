// Opens a camera and converts frames into the fixed-size buffer the engine works in.
// Each `next_frame()` yields a Vec<u32> of 0x00RRGGBB pixels at the processing size,
// optionally mirrored so the user sees a selfie view.

use crate::error::Error;
use crate::types::FrameBuffer;

use image::{ImageBuffer, Rgb, imageops};
use log::{info, warn};
use nokhwa::{
    Camera,
    pixel_format::RgbFormat,
    utils::{
        CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution,
    },
};

// A small wrapper around nokhwa::Camera so the main loop stays clean.
// The stream is stopped when this is dropped.
pub struct CameraCapture {
    cam: Camera,
    out_width: u32,
    out_height: u32,
    mirror: bool,
}

impl CameraCapture {
    /// Open camera `index` near the requested capture size. Frames come out
    /// resized to `out_width` x `out_height`.
    pub fn new(
        index: u32,
        (width, height): (u32, u32),
        (out_width, out_height): (u32, u32),
        mirror: bool,
    ) -> Result<Self, Error> {
        let idx = CameraIndex::Index(index);

        let fmt = CameraFormat::new(
            Resolution::new(width, height),
            FrameFormat::YUYV, // uncompressed; cheap to convert to RGB
            30,                // target FPS
        );
        let req = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(fmt));

        let mut cam = Camera::new(idx, req)
            .map_err(|e| Error::CameraInit(format!("Create camera: {e}")))?;
        cam.open_stream()
            .map_err(|e| Error::CameraInit(format!("Open stream: {e}")))?;

        // The stream might choose a slightly different resolution.
        let actual = cam.resolution();
        info!(
            "camera {index} streaming {}x{} (scaled to {out_width}x{out_height})",
            actual.width(),
            actual.height()
        );

        Ok(Self { cam, out_width, out_height, mirror })
    }

    /// Grab one frame (blocks until ready), scale it and pack it as 0x00RRGGBB.
    pub fn next_frame(&mut self) -> Result<FrameBuffer, Error> {
        let frame = self
            .cam
            .frame()
            .map_err(|e| Error::CameraFrame(format!("Fetch frame: {e}")))?;

        let rgb_img: ImageBuffer<Rgb<u8>, Vec<u8>> = frame
            .decode_image::<RgbFormat>()
            .map_err(|e| Error::CameraFrame(format!("Decode RGB: {e}")))?;

        let mut img = if rgb_img.dimensions() == (self.out_width, self.out_height) {
            rgb_img
        } else {
            imageops::resize(&rgb_img, self.out_width, self.out_height, imageops::FilterType::Triangle)
        };
        if self.mirror {
            imageops::flip_horizontal_in_place(&mut img);
        }

        Ok(pack_rgb(&img))
    }
}

impl Drop for CameraCapture {
    fn drop(&mut self) {
        if let Err(e) = self.cam.stop_stream() {
            warn!("camera stop: {e}");
        }
    }
}

/// Pack an RGB image as 0x00RRGGBB pixels.
fn pack_rgb(img: &ImageBuffer<Rgb<u8>, Vec<u8>>) -> FrameBuffer {
    let (w, h) = img.dimensions();
    let pixels = img
        .pixels()
        .map(|p| ((p[0] as u32) << 16) | ((p[1] as u32) << 8) | p[2] as u32)
        .collect();
    FrameBuffer { width: w as usize, height: h as usize, pixels }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_is_row_major_rrggbb() {
        let mut img = ImageBuffer::new(2, 1);
        img.put_pixel(0, 0, Rgb([1, 2, 3]));
        img.put_pixel(1, 0, Rgb([255, 0, 16]));
        let fb = pack_rgb(&img);
        assert_eq!((fb.width, fb.height), (2, 1));
        assert_eq!(fb.pixels, vec![0x0001_0203, 0x00FF_0010]);
    }
}
