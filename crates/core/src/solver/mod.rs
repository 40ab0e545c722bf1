//! Field integrators for the wave simulation
//!
//! The core abstraction is the `FieldIntegrator` trait, implemented by two
//! physical models:
//!
//! - [`ShallowWaterIntegrator`] (default): height plus velocity, reflective
//!   obstacle walls and optional vorticity confinement.
//! - [`WaveEquationIntegrator`]: height plus previous height, Dirichlet walls.
//!
//! Both read a [`FieldState`] and an obstacle mask, compute into their own
//! scratch buffers and swap them in, so a step never observes partially
//! updated cells.
//!
//! # Example
//!
//! ```rust
//! use wave_sim_core::grid::{Grid, ObstacleMask};
//! use wave_sim_core::solver::{create_integrator, FieldState, StepParams, WaveModel};
//!
//! let grid = Grid::square(64).unwrap();
//! let mut state = FieldState::new(grid);
//! let obstacles = ObstacleMask::new(grid);
//! let mut integrator = create_integrator(WaveModel::ShallowWater, grid);
//! integrator.step(&mut state, &obstacles, &StepParams::default(), 1.0 / 60.0);
//! assert!(state.is_quiescent());
//! ```

pub mod boundary;
pub mod diagnostics;
mod fields;
mod params;
pub mod profiler;
mod shallow_water;
mod state;
#[allow(clippy::module_name_repetitions)]
mod r#trait;
pub mod vorticity;
mod wave_equation;

// Re-exports
pub use diagnostics::FieldStats;
pub use fields::FieldData;
pub use params::{
    StepParams, WaveModel, DEFAULT_DAMPING, DEFAULT_GRAVITY, DEFAULT_PULSE_LIFETIME,
    MIN_PULSE_LIFETIME,
};
pub use profiler::ProfilerScope;
pub use r#trait::FieldIntegrator;
pub use shallow_water::ShallowWaterIntegrator;
pub use state::FieldState;
pub use wave_equation::{WaveEquationIntegrator, WAVE_SPEED_SCALE};

use crate::grid::Grid;
use tracing::info;

/// Create an integrator for the requested model
///
/// # Arguments
///
/// * `model` - Physical model to advance the field with
/// * `grid` - Grid the scratch buffers are sized for
///
/// # Returns
///
/// A boxed `FieldIntegrator` trait object
pub fn create_integrator(model: WaveModel, grid: Grid) -> Box<dyn FieldIntegrator> {
    let integrator: Box<dyn FieldIntegrator> = match model {
        WaveModel::ShallowWater => Box::new(ShallowWaterIntegrator::new(grid)),
        WaveModel::WaveEquation => Box::new(WaveEquationIntegrator::new(grid)),
    };
    info!(
        "Using {} integrator ({}x{} grid)",
        integrator.name(),
        grid.nx(),
        grid.ny()
    );
    integrator
}
