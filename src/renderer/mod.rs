//! Rendering module
//!
//! Canvas 2D drawing for the web build. Layout math and styling helpers are
//! platform independent so they can be tested natively.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod layout;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use layout::{Viewport, cat_lean, particle_alpha};
