//! First-page PDF renderer
//!
//! Reads the input file asynchronously, then hands the bytes to a blocking
//! thread for the MuPDF part of the pipeline. MuPDF documents, pages and
//! devices are not `Send`, so load, page fetch, render and encode all happen
//! inside one `spawn_blocking` closure.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use mupdf::Document;
use tokio::time::timeout;

use crate::canvas::SurfaceFactory;

use super::encode::encode_png;
use super::error::{RenderError, RenderResult};
use super::resources::ResourceOptions;
use super::types::{RenderedPage, Viewport, FIRST_PAGE, RENDER_SCALE};

/// Produces the PNG served by the render route
#[async_trait]
pub trait PageRasterizer: Send + Sync {
    /// Render page 1 of the input document
    async fn render_first_page(&self) -> RenderResult<RenderedPage>;
}

/// MuPDF-backed renderer for a fixed input file
pub struct PdfPageRenderer {
    input_path: PathBuf,
    resources: ResourceOptions,
    factory: SurfaceFactory,
    /// No deadline when `None`
    timeout: Option<Duration>,
}

impl PdfPageRenderer {
    pub fn new<P: AsRef<Path>>(input_path: P, resources: ResourceOptions) -> Self {
        Self {
            input_path: input_path.as_ref().to_path_buf(),
            resources,
            factory: SurfaceFactory::new(),
            timeout: None,
        }
    }

    /// Abort requests whose render takes longer than `limit`
    pub fn with_timeout(mut self, limit: Option<Duration>) -> Self {
        self.timeout = limit;
        self
    }

    async fn read_input(&self) -> RenderResult<Vec<u8>> {
        tokio::fs::read(&self.input_path)
            .await
            .map_err(|e| RenderError::from_io(&self.input_path, e))
    }
}

#[async_trait]
impl PageRasterizer for PdfPageRenderer {
    async fn render_first_page(&self) -> RenderResult<RenderedPage> {
        let data = self.read_input().await?;
        tracing::debug!(
            "Read {} bytes from {}",
            data.len(),
            self.input_path.display()
        );

        let resources = self.resources.clone();
        let factory = self.factory.clone();
        let task = tokio::task::spawn_blocking(move || {
            render_page(&data, &resources, &factory, FIRST_PAGE, RENDER_SCALE)
        });

        let joined = match self.timeout {
            Some(limit) => timeout(limit, task)
                .await
                .map_err(|_| RenderError::Timeout(limit.as_secs()))?,
            None => task.await,
        };

        joined.map_err(|e| RenderError::Task(e.to_string()))?
    }
}

/// Render one page of an in-memory PDF to PNG
///
/// Blocks the calling thread. The surface is created at exactly the
/// viewport's pixel size and destroyed before this returns.
pub fn render_page(
    data: &[u8],
    resources: &ResourceOptions,
    factory: &SurfaceFactory,
    page_number: usize,
    scale: f32,
) -> RenderResult<RenderedPage> {
    let doc = load_document(data, resources)?;

    let page_count = doc
        .page_count()
        .map_err(|e| RenderError::DocumentLoad(e.to_string()))?
        .max(0) as usize;
    if page_count == 0 {
        return Err(RenderError::DocumentLoad("document has no pages".into()));
    }
    if page_number < 1 || page_number > page_count {
        return Err(RenderError::page(
            page_number,
            format!("page not found (document has {} pages)", page_count),
        ));
    }

    let page = doc
        .load_page((page_number - 1) as i32)
        .map_err(|e| RenderError::page(page_number, e))?;
    let viewport =
        Viewport::for_page(&page, scale).map_err(|e| RenderError::page(page_number, e))?;

    let surface = factory.create_scoped(viewport.pixel_width(), viewport.pixel_height())?;
    let (context, pixmap) = match (surface.context(), surface.surface()) {
        (Some(context), Some(pixmap)) => (context, pixmap),
        _ => return Err(RenderError::page(page_number, "surface is not live")),
    };

    page.run(context, &viewport.transform())
        .map_err(|e| RenderError::page(page_number, e))?;

    let png = encode_png(pixmap)?;
    let (width, height) = surface.dimensions();

    drop(page);
    tracing::debug!("Released page {} resources", page_number);

    Ok(RenderedPage {
        page: page_number,
        data: png,
        width,
        height,
    })
}

fn load_document(data: &[u8], resources: &ResourceOptions) -> RenderResult<Document> {
    tracing::trace!(
        cmap_dir = %resources.cmap_dir.display(),
        cmap_packed = resources.cmap_packed,
        standard_font_dir = %resources.standard_font_dir.display(),
        "Loading document ({} bytes)",
        data.len()
    );

    Document::from_bytes(data, "application/pdf")
        .map_err(|e| RenderError::DocumentLoad(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// 200x100pt page with a black box at (10, 10, 50x30) and a line of text
    const SAMPLE_PDF: &[u8] = include_bytes!("../../tests/fixtures/sample.pdf");
    /// Header and catalog only, cut off before the page tree
    const TRUNCATED_PDF: &[u8] = include_bytes!("../../tests/fixtures/truncated.pdf");

    fn resources() -> ResourceOptions {
        ResourceOptions::under("/nonexistent")
    }

    fn render(data: &[u8], page_number: usize) -> RenderResult<RenderedPage> {
        render_page(data, &resources(), &SurfaceFactory::new(), page_number, 2.0)
    }

    #[test]
    fn test_render_page_sizes_output_to_viewport() {
        let page = render(SAMPLE_PDF, 1).unwrap();

        assert_eq!((page.width, page.height), (400, 200));
        let decoded = image::load_from_memory(&page.data).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (400, 200));
    }

    #[test]
    fn test_render_page_draws_content() {
        let page = render(SAMPLE_PDF, 1).unwrap();
        let decoded = image::load_from_memory(&page.data).unwrap().to_rgb8();

        // The fixture fills a black box in the lower-left of the page
        assert_eq!(decoded.get_pixel(60, 140).0, [0, 0, 0]);
        // and leaves the upper-right corner blank
        assert_eq!(decoded.get_pixel(390, 10).0, [255, 255, 255]);
    }

    #[test]
    fn test_render_page_out_of_range() {
        let err = render(SAMPLE_PDF, 2).unwrap_err();
        assert!(matches!(err, RenderError::PageRender { page: 2, .. }));
    }

    #[test]
    fn test_render_page_rejects_garbage() {
        let err = render(b"definitely not a pdf", 1).unwrap_err();
        assert!(matches!(err, RenderError::DocumentLoad(_)), "got {:?}", err);
    }

    #[test]
    fn test_render_page_rejects_truncated_pdf() {
        let err = render(TRUNCATED_PDF, 1).unwrap_err();
        assert!(matches!(err, RenderError::DocumentLoad(_)), "got {:?}", err);
        assert!(err.to_string().starts_with("Failed to load document"));
    }

    #[tokio::test]
    async fn test_missing_input_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let renderer = PdfPageRenderer::new(temp_dir.path().join("sample.pdf"), resources());

        let err = renderer.render_first_page().await.unwrap_err();
        assert!(matches!(err, RenderError::InputNotFound(_)));
    }

    #[tokio::test]
    async fn test_render_first_page_from_disk() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sample.pdf");
        std::fs::write(&path, SAMPLE_PDF).unwrap();

        let renderer = PdfPageRenderer::new(&path, resources())
            .with_timeout(Some(Duration::from_secs(30)));
        let page = renderer.render_first_page().await.unwrap();

        assert_eq!(page.page, 1);
        assert_eq!((page.width, page.height), (400, 200));
        assert_eq!(page.content_type(), "image/png");
    }
}
