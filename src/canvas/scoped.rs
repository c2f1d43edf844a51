//! RAII guard around a live surface

use std::ops::{Deref, DerefMut};

use super::error::SurfaceResult;
use super::factory::{SurfaceFactory, SurfaceHandle};

/// Destroys its surface through the owning factory on drop
///
/// Covers every exit path out of a render, including `?` returns and
/// unwinding, so peak memory stays bounded to one surface per request.
pub struct ScopedSurface<'a> {
    factory: &'a SurfaceFactory,
    handle: SurfaceHandle,
}

impl<'a> ScopedSurface<'a> {
    pub(super) fn new(factory: &'a SurfaceFactory, handle: SurfaceHandle) -> Self {
        Self { factory, handle }
    }

    /// Resize the guarded surface
    pub fn reset(&mut self, width: i32, height: i32) -> SurfaceResult<()> {
        self.factory.reset(&mut self.handle, width, height)
    }

    /// Destroy now instead of at end of scope, handing back the dead handle
    pub fn destroy(mut self) -> SurfaceResult<SurfaceHandle> {
        self.factory.destroy(&mut self.handle)?;
        Ok(std::mem::take(&mut self.handle))
    }
}

impl Deref for ScopedSurface<'_> {
    type Target = SurfaceHandle;

    fn deref(&self) -> &Self::Target {
        &self.handle
    }
}

impl DerefMut for ScopedSurface<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.handle
    }
}

impl Drop for ScopedSurface<'_> {
    fn drop(&mut self) {
        if !self.handle.is_live() {
            return;
        }
        let (width, height) = self.handle.dimensions();
        match self.factory.destroy(&mut self.handle) {
            Ok(()) => tracing::debug!("Released {}x{} surface", width, height),
            Err(e) => tracing::warn!("Failed to release surface: {}", e),
        }
    }
}
