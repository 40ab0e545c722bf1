//! Second-order wave-equation integrator
//!
//! Tracks only height and the height one step back:
//!
//! ```text
//! h_next = (2h − h_prev + c²∇²h + vort − drag·h_prev) · damping
//! c      = sqrt(gravity) · 0.2
//! vort   = k · ((h[x+1] − h[x−1]) − (h[y+1] − h[y−1])) · 0.25
//! ```
//!
//! Obstacles are plain Dirichlet walls (height 0), with no reflection sweep.
//! The model carries no velocity; both components are zeroed every step so
//! impulse kicks never linger in the renderer or the statistics.

use super::fields::FieldData;
use super::params::{StepParams, WaveModel};
use super::state::FieldState;
use super::FieldIntegrator;
use crate::grid::{Grid, ObstacleMask};
use rayon::prelude::*;

/// Wave speed per unit `sqrt(gravity)`
pub const WAVE_SPEED_SCALE: f32 = 0.2;

/// Wave-equation integrator
pub struct WaveEquationIntegrator {
    height_next: FieldData,
}

impl WaveEquationIntegrator {
    /// Create an integrator with a scratch buffer for the grid
    #[must_use]
    pub fn new(grid: Grid) -> Self {
        Self {
            height_next: FieldData::new(grid),
        }
    }
}

impl FieldIntegrator for WaveEquationIntegrator {
    fn step(
        &mut self,
        state: &mut FieldState,
        obstacles: &ObstacleMask,
        params: &StepParams,
        _dt: f32,
    ) {
        let grid = state.grid();
        if self.height_next.grid() != grid {
            self.height_next = FieldData::new(grid);
        }
        let nx = grid.nx();
        let ny = grid.ny();

        let c = params.gravity.max(0.0).sqrt() * WAVE_SPEED_SCALE;
        let c2 = c * c;
        let vorticity = params.vorticity;
        let drag = params.drag;
        let damping = params.effective_damping();

        let h = state.height.as_slice();
        let h_prev = state.previous_height.as_slice();
        let solid = obstacles.as_slice();

        self.height_next
            .as_mut_slice()
            .par_chunks_mut(nx)
            .enumerate()
            .for_each(|(y, row)| {
                if y == 0 || y == ny - 1 {
                    row.fill(0.0);
                    return;
                }
                for x in 0..nx {
                    let i = y * nx + x;
                    if x == 0 || x == nx - 1 || solid[i] {
                        row[x] = 0.0;
                        continue;
                    }
                    let laplacian = h[i - nx] + h[i + nx] + h[i - 1] + h[i + 1] - 4.0 * h[i];
                    let vort = if vorticity > 0.0 {
                        let dx = h[i + 1] - h[i - 1];
                        let dy = h[i + nx] - h[i - nx];
                        vorticity * (dx - dy) * 0.25
                    } else {
                        0.0
                    };
                    row[x] = (2.0 * h[i] - h_prev[i] + c2 * laplacian + vort - drag * h_prev[i])
                        * damping;
                }
            });

        // Rotate: prev <- h, h <- next, next gets the stale prev
        std::mem::swap(&mut state.previous_height, &mut state.height);
        std::mem::swap(&mut state.height, &mut self.height_next);
        state.clear_velocity();
    }

    fn model(&self) -> WaveModel {
        WaveModel::WaveEquation
    }

    fn name(&self) -> &'static str {
        "wave-equation"
    }
}
