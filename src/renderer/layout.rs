//! Viewport sizing and small drawing helpers
//!
//! The game always simulates in a fixed 800×450 logical space; the canvas is
//! letterboxed to 16:9 and scaled by the device pixel ratio.

use crate::consts::{VIEW_H, VIEW_W};
use crate::sim::Player;

/// Device pixel ratio is capped to keep fill rate sane on dense screens
pub const MAX_DPR: f64 = 2.0;

/// Lean angle (radians) at full speed
const MAX_LEAN: f32 = 0.15;

/// Canvas size for a window, and the transform from logical to canvas pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// CSS size of the canvas element
    pub css_width: f64,
    pub css_height: f64,
    /// Backing store size in device pixels
    pub pixel_width: u32,
    pub pixel_height: u32,
    /// Logical → device pixel scale
    pub scale_x: f64,
    pub scale_y: f64,
}

impl Viewport {
    /// Fit a 16:9 canvas into the window
    pub fn fit(window_width: f64, window_height: f64, device_pixel_ratio: f64) -> Self {
        let dpr = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio.min(MAX_DPR)
        } else {
            1.0
        };
        let css_width = window_width.min(window_height * 16.0 / 9.0).max(1.0);
        let css_height = css_width * 9.0 / 16.0;
        let pixel_width = (css_width * dpr).round() as u32;
        let pixel_height = (css_height * dpr).round() as u32;

        Self {
            css_width,
            css_height,
            pixel_width,
            pixel_height,
            scale_x: pixel_width as f64 / VIEW_W as f64,
            scale_y: pixel_height as f64 / VIEW_H as f64,
        }
    }
}

/// Cat sprite tilt proportional to its horizontal speed
pub fn cat_lean(player: &Player) -> f32 {
    if player.max_speed <= 0.0 {
        return 0.0;
    }
    (player.vel_x / player.max_speed).clamp(-1.0, 1.0) * MAX_LEAN
}

/// Particles fade out over their last half second
pub fn particle_alpha(life: f32) -> f32 {
    (life.clamp(0.0, 1.0) * 2.0).min(1.0)
}
