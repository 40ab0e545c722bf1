//! Field integrator trait definition
//!
//! Both physical models implement `FieldIntegrator`, so the orchestration
//! layer can switch between them without knowing which buffers each one uses.

use super::params::{StepParams, WaveModel};
use super::state::FieldState;
use crate::grid::ObstacleMask;

/// Model-agnostic interface for advancing the field by one fixed timestep
pub trait FieldIntegrator: Send + Sync {
    /// Advance the field by `dt` seconds
    ///
    /// Reads the pre-step values of `state`, computes the next values into
    /// internal scratch buffers and swaps them in. Border cells come out as
    /// zero and cells marked in `obstacles` come out with every field exactly
    /// zero.
    ///
    /// # Arguments
    ///
    /// * `state` - Live field state, replaced by the post-step values
    /// * `obstacles` - Occupancy mask for the same grid
    /// * `params` - Parameters for this step
    /// * `dt` - Timestep in seconds
    fn step(
        &mut self,
        state: &mut FieldState,
        obstacles: &ObstacleMask,
        params: &StepParams,
        dt: f32,
    );

    /// Physical model implemented by this integrator
    fn model(&self) -> WaveModel;

    /// Short human-readable name for logs
    fn name(&self) -> &'static str;
}
