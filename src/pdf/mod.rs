//! PDF rendering module
//!
//! Loads a PDF with MuPDF, renders one page onto a drawing surface from
//! [`crate::canvas`] and encodes the result as PNG.

mod encode;
mod error;
mod renderer;
mod resources;
mod types;

pub use encode::encode_png;
pub use error::{RenderError, RenderResult};
pub use renderer::{render_page, PageRasterizer, PdfPageRenderer};
pub use resources::ResourceOptions;
pub use types::{RenderedPage, Viewport, FIRST_PAGE, RENDER_SCALE};
