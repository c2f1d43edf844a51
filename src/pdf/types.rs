//! Render pipeline data types

use mupdf::Matrix;

/// Fixed render scale (1.0 = 72 DPI, 2.0 = 144 DPI)
pub const RENDER_SCALE: f32 = 2.0;

/// Page rendered for every request (1-indexed)
pub const FIRST_PAGE: usize = 1;

/// Slack used when rounding viewport edges outward, same as MuPDF's
/// `fz_round_rect`
const ROUND_EPSILON: f32 = 0.001;

/// Page box mapped into pixel space at a given scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scale: f32,
    /// Scaled width in pixels (fractional)
    pub width: f32,
    /// Scaled height in pixels (fractional)
    pub height: f32,
    origin: (f32, f32),
}

impl Viewport {
    /// Build a viewport from a page box in points
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32, scale: f32) -> Self {
        Self {
            scale,
            width: (x1 - x0) * scale,
            height: (y1 - y0) * scale,
            origin: (x0, y0),
        }
    }

    /// Viewport for a loaded MuPDF page
    pub fn for_page(page: &mupdf::Page, scale: f32) -> Result<Self, mupdf::Error> {
        let bounds = page.bounds()?;
        Ok(Self::new(bounds.x0, bounds.y0, bounds.x1, bounds.y1, scale))
    }

    /// Surface width, rounded outward
    pub fn pixel_width(&self) -> i32 {
        round_out(self.width)
    }

    /// Surface height, rounded outward
    pub fn pixel_height(&self) -> i32 {
        round_out(self.height)
    }

    /// Page space to pixel space: move the box origin to (0, 0), then scale
    pub fn transform(&self) -> Matrix {
        let mut ctm = Matrix::new_translate(-self.origin.0, -self.origin.1);
        ctm.concat(Matrix::new_scale(self.scale, self.scale));
        ctm
    }
}

fn round_out(value: f32) -> i32 {
    (value - ROUND_EPSILON).ceil() as i32
}

/// A rendered page ready to be sent
#[derive(Debug, Clone)]
pub struct RenderedPage {
    /// Page number (1-indexed)
    pub page: usize,
    /// PNG bytes
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl RenderedPage {
    pub fn content_type(&self) -> &'static str {
        "image/png"
    }
}
