//! False-colour rendering of the field state
//!
//! Produces one RGBA pixel per grid cell. The flow palette maps flow direction
//! to hue and height/speed to brightness. Obstacles are drawn in a fixed slate
//! colour with lighter faces where they meet open water.

use crate::error::{Result, WaveSimError};
use crate::grid::ObstacleMask;
use crate::solver::vorticity::compute_vorticity;
use crate::solver::FieldState;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// Obstacle interior colour
pub const OBSTACLE_COLOR: [u8; 3] = [36, 48, 72];

/// Obstacle face colour (obstacle cells touching fluid)
pub const OBSTACLE_OUTLINE_COLOR: [u8; 3] = [70, 110, 180];

/// Fixed saturation of the flow palette
pub const FLOW_SATURATION: f32 = 0.35;

/// Hue shift applied to crests and troughs
pub const HEIGHT_HUE_SHIFT: f32 = 0.08;

/// Heights below this magnitude keep the pure flow hue
pub const HEIGHT_HUE_THRESHOLD: f32 = 0.02;

/// Peak channel value of the flow palette
const FLOW_CHANNEL_SCALE: f32 = 220.0;

/// Colouring scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Direction as hue, height and speed as brightness
    #[default]
    Flow,
    /// Red for positive vorticity, blue for negative, green for speed
    Vorticity,
}

/// Convert HSV in `[0, 1]` to RGB in `[0, 1]`
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> (f32, f32, f32) {
    let sector = (h * 6.0).floor();
    let f = h * 6.0 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);
    match (sector as i64).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}

/// Flow palette colour of one fluid cell
fn flow_color(h: f32, ux: f32, uy: f32) -> [u8; 3] {
    let speed = ux.hypot(uy);
    let mut hue = (uy.atan2(ux) / TAU + 1.0).rem_euclid(1.0);
    if h.abs() > HEIGHT_HUE_THRESHOLD {
        hue += if h > 0.0 { HEIGHT_HUE_SHIFT } else { -HEIGHT_HUE_SHIFT };
    }
    let hue = hue.clamp(0.0, 1.0);
    let value = (0.95 * (h.abs() * 1.5 + speed * 0.4).min(1.0)).clamp(0.0, 1.0);
    let value = if value.is_nan() { 0.0 } else { value };
    let (r, g, b) = hsv_to_rgb(hue, FLOW_SATURATION, value);
    [
        (r * FLOW_CHANNEL_SCALE).round() as u8,
        (g * FLOW_CHANNEL_SCALE).round() as u8,
        (b * FLOW_CHANNEL_SCALE).round() as u8,
    ]
}

/// Debug palette colour of one fluid cell
fn vorticity_color(omega: f32, speed: f32) -> [u8; 3] {
    let scale = 255.0;
    let red = if omega > 0.0 { (omega * scale * 10.0).min(scale) } else { 0.0 };
    let blue = if omega < 0.0 { (-omega * scale * 10.0).min(scale) } else { 0.0 };
    let green = (speed * scale * 0.7).min(scale);
    [red as u8, green as u8, blue as u8]
}

/// Renders field state into RGBA buffers
#[derive(Debug, Default)]
pub struct Renderer {
    omega: Vec<f32>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write one RGBA pixel per cell into `out`
    ///
    /// Border cells are opaque black.
    ///
    /// # Errors
    ///
    /// Returns [`WaveSimError::BufferSizeMismatch`] if `out` is not exactly
    /// `4 · nx · ny` bytes long.
    pub fn render(
        &mut self,
        state: &FieldState,
        obstacles: &ObstacleMask,
        mode: RenderMode,
        out: &mut [u8],
    ) -> Result<()> {
        let grid = state.grid();
        let (nx, ny) = (grid.nx(), grid.ny());
        let expected = 4 * grid.cell_count();
        if out.len() != expected {
            return Err(WaveSimError::BufferSizeMismatch {
                expected,
                actual: out.len(),
            });
        }

        if mode == RenderMode::Vorticity {
            self.omega.resize(grid.cell_count(), 0.0);
            compute_vorticity(
                state.velocity_x.as_slice(),
                state.velocity_y.as_slice(),
                &mut self.omega,
                nx,
                ny,
            );
        }

        let h = state.height.as_slice();
        let ux = state.velocity_x.as_slice();
        let uy = state.velocity_y.as_slice();
        let solid = obstacles.as_slice();
        let omega = self.omega.as_slice();

        out.par_chunks_mut(4 * nx)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, pixel) in row.chunks_exact_mut(4).enumerate() {
                    let rgb = if grid.is_border(x, y) {
                        [0, 0, 0]
                    } else {
                        let i = y * nx + x;
                        if solid[i] {
                            let touches_fluid =
                                !solid[i - 1] || !solid[i + 1] || !solid[i - nx] || !solid[i + nx];
                            if touches_fluid {
                                OBSTACLE_OUTLINE_COLOR
                            } else {
                                OBSTACLE_COLOR
                            }
                        } else {
                            match mode {
                                RenderMode::Flow => flow_color(h[i], ux[i], uy[i]),
                                RenderMode::Vorticity => {
                                    vorticity_color(omega[i], ux[i].hypot(uy[i]))
                                }
                            }
                        }
                    };
                    pixel[..3].copy_from_slice(&rgb);
                    pixel[3] = 255;
                }
            });
        Ok(())
    }
}
