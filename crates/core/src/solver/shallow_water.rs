//! Linearized shallow-water integrator
//!
//! Advances height `h` and velocity `(ux, uy)` with a forward-Euler update on
//! a collocated grid, plus the obstacle boundary sweeps and optional vorticity
//! confinement:
//!
//! ```text
//! u' = (u − dt·g·∂h/∂x − drag·u) · exp(−dt/τ)      (backward difference)
//! v' = (v − dt·g·∂h/∂y − drag·v) · exp(−dt/τ)
//! h' = (h − dt·(∂u/∂x + ∂v/∂y)) · exp(−dt/τ)        (forward difference)
//! ```
//!
//! The backward gradient and forward divergence are adjoint to each other, so
//! with no obstacles the only energy sources are the O(dt²) Euler error and
//! confinement; drag and the pulse-lifetime decay remove energy.

use super::boundary::{clamp_inflow, reflect_at_obstacles};
use super::fields::FieldData;
use super::params::{StepParams, WaveModel};
use super::state::FieldState;
use super::vorticity::{apply_confinement, compute_vorticity};
use super::FieldIntegrator;
use crate::grid::{Grid, ObstacleMask};
use rayon::prelude::*;

/// Scalar inputs of the compute pass
#[derive(Debug, Clone, Copy)]
struct MomentumParams {
    dt: f32,
    gravity: f32,
    drag: f32,
    decay: f32,
}

/// Shallow-water integrator with ping-pong scratch buffers
pub struct ShallowWaterIntegrator {
    // Written during a step, then swapped with the live state
    height_next: FieldData,
    velocity_x_next: FieldData,
    velocity_y_next: FieldData,

    // Vorticity of the pre-step velocity
    omega: FieldData,
}

impl ShallowWaterIntegrator {
    /// Create an integrator with scratch buffers for the grid
    #[must_use]
    pub fn new(grid: Grid) -> Self {
        Self {
            height_next: FieldData::new(grid),
            velocity_x_next: FieldData::new(grid),
            velocity_y_next: FieldData::new(grid),
            omega: FieldData::new(grid),
        }
    }

    /// Reallocate scratch buffers if the state grid changed
    fn ensure_grid(&mut self, grid: Grid) {
        if self.height_next.grid() != grid {
            *self = Self::new(grid);
        }
    }
}

impl FieldIntegrator for ShallowWaterIntegrator {
    fn step(
        &mut self,
        state: &mut FieldState,
        obstacles: &ObstacleMask,
        params: &StepParams,
        dt: f32,
    ) {
        let grid = state.grid();
        debug_assert_eq!(grid, obstacles.grid(), "Obstacle mask grid mismatch");
        self.ensure_grid(grid);
        let (nx, ny) = (grid.nx(), grid.ny());
        let solid = obstacles.as_slice();

        let momentum = MomentumParams {
            dt,
            gravity: params.gravity,
            drag: params.drag,
            decay: params.decay_factor(dt),
        };

        // 1. Momentum and continuity into the scratch buffers
        step_momentum_continuity(
            state.height.as_slice(),
            state.velocity_x.as_slice(),
            state.velocity_y.as_slice(),
            self.height_next.as_mut_slice(),
            self.velocity_x_next.as_mut_slice(),
            self.velocity_y_next.as_mut_slice(),
            solid,
            nx,
            momentum,
        );

        // 2. Reflective walls, then the one-sided inflow clamp
        reflect_at_obstacles(
            self.height_next.as_mut_slice(),
            self.velocity_x_next.as_mut_slice(),
            self.velocity_y_next.as_mut_slice(),
            solid,
            nx,
            ny,
        );
        clamp_inflow(
            self.height_next.as_mut_slice(),
            self.velocity_x_next.as_mut_slice(),
            self.velocity_y_next.as_mut_slice(),
            solid,
            nx,
            ny,
        );

        // 3. Vorticity confinement from the pre-step velocity
        if params.vorticity > 0.0 {
            compute_vorticity(
                state.velocity_x.as_slice(),
                state.velocity_y.as_slice(),
                self.omega.as_mut_slice(),
                nx,
                ny,
            );
            apply_confinement(
                self.omega.as_slice(),
                self.velocity_x_next.as_mut_slice(),
                self.velocity_y_next.as_mut_slice(),
                solid,
                nx,
                ny,
                dt * params.vorticity,
                params.vorticity_boost,
            );
        }

        // Swap buffers
        std::mem::swap(&mut state.height, &mut self.height_next);
        std::mem::swap(&mut state.velocity_x, &mut self.velocity_x_next);
        std::mem::swap(&mut state.velocity_y, &mut self.velocity_y_next);
    }

    fn model(&self) -> WaveModel {
        WaveModel::ShallowWater
    }

    fn name(&self) -> &'static str {
        "shallow-water"
    }
}

/// Compute pass over every cell
///
/// Each output row depends only on the pre-step inputs, so rows are filled in
/// parallel. Border cells and obstacle cells are written as zero.
#[allow(clippy::too_many_arguments)]
fn step_momentum_continuity(
    height: &[f32],
    velocity_x: &[f32],
    velocity_y: &[f32],
    height_out: &mut [f32],
    velocity_x_out: &mut [f32],
    velocity_y_out: &mut [f32],
    obstacles: &[bool],
    nx: usize,
    p: MomentumParams,
) {
    let ny = height.len() / nx;

    height_out
        .par_chunks_mut(nx)
        .zip(velocity_x_out.par_chunks_mut(nx))
        .zip(velocity_y_out.par_chunks_mut(nx))
        .enumerate()
        .for_each(|(y, ((h_row, ux_row), uy_row))| {
            if y == 0 || y == ny - 1 {
                h_row.fill(0.0);
                ux_row.fill(0.0);
                uy_row.fill(0.0);
                return;
            }
            for x in 0..nx {
                let i = y * nx + x;
                if x == 0 || x == nx - 1 || obstacles[i] {
                    h_row[x] = 0.0;
                    ux_row[x] = 0.0;
                    uy_row[x] = 0.0;
                    continue;
                }

                let h = height[i];
                let u = velocity_x[i];
                let v = velocity_y[i];

                let dhdx = h - height[i - 1];
                let dhdy = h - height[i - nx];
                ux_row[x] = (u - p.dt * p.gravity * dhdx - p.drag * u) * p.decay;
                uy_row[x] = (v - p.dt * p.gravity * dhdy - p.drag * v) * p.decay;

                let du = velocity_x[i + 1] - u;
                let dv = velocity_y[i + nx] - v;
                h_row[x] = (h - p.dt * (du + dv)) * p.decay;
            }
        });
}
