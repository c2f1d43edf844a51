//! PNG encoding of rendered surfaces

use std::io::Cursor;

use image::{DynamicImage, RgbImage};
use mupdf::Pixmap;

use super::error::{RenderError, RenderResult};

/// Encode an RGB(A) pixmap as PNG, dropping any alpha channel
pub fn encode_png(pixmap: &Pixmap) -> RenderResult<Vec<u8>> {
    let width = pixmap.width() as u32;
    let height = pixmap.height() as u32;
    let n = pixmap.n() as usize; // components per pixel
    if n < 3 {
        return Err(RenderError::Encode(format!(
            "expected an RGB surface, got {} component(s) per pixel",
            n
        )));
    }

    let pixel_count = width as usize * height as usize;
    let mut rgb_buffer = Vec::with_capacity(pixel_count * 3);
    for pixel in pixmap.samples().chunks_exact(n).take(pixel_count) {
        rgb_buffer.extend_from_slice(&pixel[..3]);
    }

    let img = RgbImage::from_raw(width, height, rgb_buffer)
        .ok_or_else(|| RenderError::Encode("Failed to create image buffer".to_string()))?;

    let mut output = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut output), image::ImageFormat::Png)
        .map_err(|e| RenderError::Encode(e.to_string()))?;

    Ok(output)
}
