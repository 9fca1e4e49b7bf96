//! Page rendering for the GPS display
//!
//! This crate provides:
//! - `DrawSurface` trait: the handful of primitives the pages are built from
//! - `GraphicsSurface`: a `DrawSurface` over any `embedded-graphics` RGB565 target
//! - Page geometry (speed bar, compass needle, clock hands)
//! - `Renderer`: draws a page from a fix record snapshot
//!
//! # Architecture
//!
//! The renderer decides what goes where; the surface decides how pixels are
//! produced. Firmware wraps its panel driver in a `GraphicsSurface`, while
//! tests record calls on a mock surface.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod backend;
pub mod layout;
pub mod render;
pub mod surface;

// Re-export key types
pub use backend::{DisplayError, DrawSurface};
pub use render::Renderer;
pub use surface::GraphicsSurface;
