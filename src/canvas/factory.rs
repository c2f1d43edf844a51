//! Surface factory and handle
//!
//! MuPDF pixmaps cannot change size, so `reset` allocates a fresh pixmap and
//! draw device and swaps them into the existing handle. The old pair is
//! dropped during the swap, which also means the contents after a reset are
//! always blank.

use std::fmt;

use mupdf::{Colorspace, Device, Pixmap};

use super::error::{SurfaceError, SurfaceResult};
use super::scoped::ScopedSurface;

/// Fill value for freshly allocated surfaces (white)
const DEFAULT_BACKGROUND: i32 = 0xff;

/// Lifecycle state of a [`SurfaceHandle`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SurfaceState {
    #[default]
    Uninitialized,
    Live,
    Destroyed,
}

impl SurfaceState {
    fn as_str(&self) -> &'static str {
        match self {
            SurfaceState::Uninitialized => "uninitialized",
            SurfaceState::Live => "live",
            SurfaceState::Destroyed => "destroyed",
        }
    }
}

/// A drawing surface paired with the draw context that renders into it
#[derive(Default)]
pub struct SurfaceHandle {
    // Field order matters: the device must drop before the pixmap it targets.
    context: Option<Device>,
    surface: Option<Pixmap>,
    state: SurfaceState,
}

impl SurfaceHandle {
    /// Current lifecycle state
    pub fn state(&self) -> SurfaceState {
        self.state
    }

    pub fn is_live(&self) -> bool {
        self.state == SurfaceState::Live
    }

    /// Pixel width, 0 unless live
    pub fn width(&self) -> u32 {
        self.surface.as_ref().map(|p| p.width() as u32).unwrap_or(0)
    }

    /// Pixel height, 0 unless live
    pub fn height(&self) -> u32 {
        self.surface.as_ref().map(|p| p.height() as u32).unwrap_or(0)
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    /// The backing pixmap
    pub fn surface(&self) -> Option<&Pixmap> {
        self.surface.as_ref()
    }

    /// The draw device bound to the pixmap
    pub fn context(&self) -> Option<&Device> {
        self.context.as_ref()
    }

    fn ensure_live(&self) -> SurfaceResult<()> {
        if self.is_live() && self.surface.is_some() {
            Ok(())
        } else {
            Err(SurfaceError::PreconditionFailed(self.state.as_str()))
        }
    }
}

impl fmt::Debug for SurfaceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SurfaceHandle")
            .field("state", &self.state)
            .field("width", &self.width())
            .field("height", &self.height())
            .field("has_context", &self.context.is_some())
            .finish()
    }
}

/// Creates, resizes and destroys RGB drawing surfaces
#[derive(Debug, Clone)]
pub struct SurfaceFactory {
    background: i32,
}

impl Default for SurfaceFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl SurfaceFactory {
    pub fn new() -> Self {
        Self {
            background: DEFAULT_BACKGROUND,
        }
    }

    /// Use a different fill value for new surfaces (0 = black, 255 = white)
    #[cfg(test)]
    pub(crate) fn with_background(mut self, value: u8) -> Self {
        self.background = i32::from(value);
        self
    }

    /// Allocate a new live surface of `width` x `height` pixels
    pub fn create(&self, width: i32, height: i32) -> SurfaceResult<SurfaceHandle> {
        validate_size(width, height)?;

        let (surface, context) = self.allocate(width, height)?;
        tracing::trace!("Created {}x{} surface", width, height);

        Ok(SurfaceHandle {
            context: Some(context),
            surface: Some(surface),
            state: SurfaceState::Live,
        })
    }

    /// Allocate a surface that is destroyed when the returned guard drops
    pub fn create_scoped(&self, width: i32, height: i32) -> SurfaceResult<ScopedSurface<'_>> {
        let handle = self.create(width, height)?;
        Ok(ScopedSurface::new(self, handle))
    }

    /// Resize a live surface in place; previous contents are discarded
    pub fn reset(&self, handle: &mut SurfaceHandle, width: i32, height: i32) -> SurfaceResult<()> {
        handle.ensure_live()?;
        validate_size(width, height)?;

        let (surface, context) = self.allocate(width, height)?;
        handle.context = Some(context);
        handle.surface = Some(surface);
        tracing::trace!("Reset surface to {}x{}", width, height);

        Ok(())
    }

    /// Release the surface and its context; the handle cannot be drawn on again
    pub fn destroy(&self, handle: &mut SurfaceHandle) -> SurfaceResult<()> {
        handle.ensure_live()?;

        handle.context = None;
        handle.surface = None;
        handle.state = SurfaceState::Destroyed;

        Ok(())
    }

    fn allocate(&self, width: i32, height: i32) -> SurfaceResult<(Pixmap, Device)> {
        let mut pixmap = Pixmap::new_with_w_h(&Colorspace::device_rgb(), width, height, false)?;
        pixmap.clear_with(self.background)?;
        let device = Device::from_pixmap(&pixmap)?;
        Ok((pixmap, device))
    }
}

fn validate_size(width: i32, height: i32) -> SurfaceResult<()> {
    if width > 0 && height > 0 {
        Ok(())
    } else {
        Err(SurfaceError::InvalidArgument { width, height })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_matches_requested_size() {
        let factory = SurfaceFactory::new();

        for (w, h) in [(1, 1), (17, 3), (640, 480)] {
            let handle = factory.create(w, h).unwrap();
            assert_eq!(handle.dimensions(), (w as u32, h as u32));
            assert_eq!(handle.state(), SurfaceState::Live);
            assert!(handle.surface().is_some());
            assert!(handle.context().is_some());
        }
    }

    #[test]
    fn test_create_rejects_non_positive_sizes() {
        let factory = SurfaceFactory::new();

        for (w, h) in [(0, 10), (10, 0), (-1, 10), (10, -5), (0, 0)] {
            let err = factory.create(w, h).unwrap_err();
            assert!(
                matches!(
                    err,
                    SurfaceError::InvalidArgument { width, height } if width == w && height == h
                ),
                "unexpected error for {}x{}: {:?}",
                w,
                h,
                err
            );
        }
    }

    #[test]
    fn test_new_surface_is_filled_with_background() {
        let factory = SurfaceFactory::new();
        let handle = factory.create(4, 4).unwrap();
        let samples = handle.surface().unwrap().samples();
        assert!(samples.iter().all(|&b| b == 0xff));

        let black = SurfaceFactory::new().with_background(0);
        let handle = black.create(4, 4).unwrap();
        assert!(handle.surface().unwrap().samples().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_reset_resizes_in_place() {
        let factory = SurfaceFactory::new();
        let mut handle = factory.create(10, 20).unwrap();

        factory.reset(&mut handle, 30, 5).unwrap();
        assert_eq!(handle.dimensions(), (30, 5));
        assert!(handle.is_live());
    }

    #[test]
    fn test_reset_rejects_non_positive_sizes() {
        let factory = SurfaceFactory::new();
        let mut handle = factory.create(10, 20).unwrap();

        let err = factory.reset(&mut handle, 0, 5).unwrap_err();
        assert!(matches!(err, SurfaceError::InvalidArgument { .. }));
        // A rejected reset leaves the surface untouched
        assert_eq!(handle.dimensions(), (10, 20));
    }

    #[test]
    fn test_reset_requires_live_handle() {
        let factory = SurfaceFactory::new();

        let mut uninit = SurfaceHandle::default();
        let err = factory.reset(&mut uninit, 10, 10).unwrap_err();
        assert!(matches!(err, SurfaceError::PreconditionFailed("uninitialized")));

        let mut handle = factory.create(10, 10).unwrap();
        factory.destroy(&mut handle).unwrap();
        let err = factory.reset(&mut handle, 10, 10).unwrap_err();
        assert!(matches!(err, SurfaceError::PreconditionFailed("destroyed")));
    }

    #[test]
    fn test_destroy_clears_everything() {
        let factory = SurfaceFactory::new();
        let mut handle = factory.create(8, 8).unwrap();

        factory.destroy(&mut handle).unwrap();
        assert_eq!(handle.dimensions(), (0, 0));
        assert!(handle.surface().is_none());
        assert!(handle.context().is_none());
        assert_eq!(handle.state(), SurfaceState::Destroyed);
    }

    #[test]
    fn test_double_destroy_fails() {
        let factory = SurfaceFactory::new();
        let mut handle = factory.create(8, 8).unwrap();

        factory.destroy(&mut handle).unwrap();
        let err = factory.destroy(&mut handle).unwrap_err();
        assert!(matches!(err, SurfaceError::PreconditionFailed(_)));
    }

    #[test]
    fn test_destroy_uninitialized_fails() {
        let factory = SurfaceFactory::new();
        let mut handle = SurfaceHandle::default();
        assert_eq!(handle.dimensions(), (0, 0));
        assert!(factory.destroy(&mut handle).is_err());
    }
}
