//! Application state management

use std::sync::Arc;

use crate::config::Config;
use crate::pdf::{PageRasterizer, PdfPageRenderer, ResourceOptions};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    rasterizer: Arc<dyn PageRasterizer>,
}

impl AppState {
    /// Create state backed by the MuPDF renderer
    ///
    /// Resource directories are resolved next to the executable; when any is
    /// absent MuPDF's built-in tables are used instead.
    pub fn new(config: Config) -> Self {
        let resources = ResourceOptions::beside_executable();
        {
            let missing = resources.missing();
            for dir in &missing {
                tracing::debug!("Resource directory {} not found", dir.display());
            }
            if !missing.is_empty() {
                tracing::info!("Using MuPDF built-in CMap and font data");
            }
        }

        let renderer = PdfPageRenderer::new(&config.render.input_path, resources)
            .with_timeout(config.render.timeout());

        Self::with_rasterizer(Arc::new(renderer))
    }

    /// Create state around any rasterizer
    pub fn with_rasterizer(rasterizer: Arc<dyn PageRasterizer>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { rasterizer }),
        }
    }

    /// Get the page rasterizer
    pub fn rasterizer(&self) -> &dyn PageRasterizer {
        self.inner.rasterizer.as_ref()
    }
}
