//! CMap and standard font resource locations
//!
//! Some PDFs reference external CMaps or the base-14 fonts without embedding
//! them. MuPDF compiles its own copies of both into the library, so the
//! directories here are optional: when they exist they are reported to the
//! loader, when they don't the built-in tables are used.

use std::path::{Path, PathBuf};

/// Directory holding CMap data, relative to the install location
const CMAP_SUBDIR: &str = "resources/cmaps";
/// Directory holding standard font data, relative to the install location
const STANDARD_FONT_SUBDIR: &str = "resources/standard_fonts";

/// Resource options handed to the document loader
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceOptions {
    pub cmap_dir: PathBuf,
    /// CMaps are stored in the packed binary form
    pub cmap_packed: bool,
    pub standard_font_dir: PathBuf,
}

impl ResourceOptions {
    /// Resolve resource directories beneath `base`
    pub fn under<P: AsRef<Path>>(base: P) -> Self {
        let base = base.as_ref();
        Self {
            cmap_dir: base.join(CMAP_SUBDIR),
            cmap_packed: true,
            standard_font_dir: base.join(STANDARD_FONT_SUBDIR),
        }
    }

    /// Resolve resource directories next to the running executable
    ///
    /// Falls back to the current working directory when the executable path
    /// is unavailable.
    pub fn beside_executable() -> Self {
        let base = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_default();
        Self::under(base)
    }

    /// Directories that do not exist on disk
    pub fn missing(&self) -> Vec<&Path> {
        [self.cmap_dir.as_path(), self.standard_font_dir.as_path()]
            .into_iter()
            .filter(|dir| !dir.is_dir())
            .collect()
    }
}
