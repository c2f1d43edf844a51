//! Off-screen drawing surfaces
//!
//! A surface is a MuPDF `Pixmap` paired with a draw `Device` that writes into
//! it. The factory owns the lifecycle of these pairs:
//!
//! ```text
//! Uninitialized ──create──▶ Live ──destroy──▶ Destroyed
//!                            │ ▲
//!                            └─┘ reset
//! ```
//!
//! Every request renders onto exactly one surface. Use
//! [`SurfaceFactory::create_scoped`] so the surface is destroyed as soon as
//! the guard goes out of scope instead of whenever MuPDF's allocator gets
//! around to it.

mod error;
mod factory;
mod scoped;

pub use error::{SurfaceError, SurfaceResult};
pub use factory::{SurfaceFactory, SurfaceHandle, SurfaceState};
pub use scoped::ScopedSurface;
