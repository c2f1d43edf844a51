//! Page Render Server Library
//!
//! Renders page 1 of a local PDF to PNG over HTTP. The binary in main.rs
//! only wires configuration, logging and the listener around this crate.
//!
//! # Modules
//!
//! - `canvas`: Off-screen drawing surfaces with an explicit lifecycle
//! - `pdf`: Document loading, page rendering and PNG encoding via MuPDF
//! - `routes`: HTTP endpoints

pub mod canvas;
pub mod config;
pub mod error;
pub mod pdf;
pub mod routes;
pub mod state;
