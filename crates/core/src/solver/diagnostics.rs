//! Field statistics for reports and regression checks

use super::state::FieldState;
use crate::grid::ObstacleMask;

/// Magnitudes below this count as a quiet cell
pub const ACTIVITY_THRESHOLD: f32 = 1e-4;

/// Summary of one field state
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FieldStats {
    /// `Σ g·h² + ux² + uy²` over all cells
    pub energy: f64,
    /// Net height `Σ h`
    pub net_height: f64,
    /// Largest |h|
    pub max_height: f32,
    /// Largest |u|
    pub max_speed: f32,
    /// Fluid cells whose height or speed exceeds [`ACTIVITY_THRESHOLD`]
    pub active_cells: usize,
}

impl FieldStats {
    /// Compute statistics, weighting height energy by `gravity`
    pub fn compute(state: &FieldState, obstacles: &ObstacleMask, gravity: f32) -> Self {
        let h = state.height.as_slice();
        let ux = state.velocity_x.as_slice();
        let uy = state.velocity_y.as_slice();
        let g = f64::from(gravity);

        let mut stats = Self::default();
        for i in 0..h.len() {
            let speed = ux[i].hypot(uy[i]);
            stats.energy += g * f64::from(h[i]) * f64::from(h[i])
                + f64::from(ux[i]) * f64::from(ux[i])
                + f64::from(uy[i]) * f64::from(uy[i]);
            stats.net_height += f64::from(h[i]);
            stats.max_height = stats.max_height.max(h[i].abs());
            stats.max_speed = stats.max_speed.max(speed);
            if !obstacles.is_obstacle(i)
                && (h[i].abs() > ACTIVITY_THRESHOLD || speed > ACTIVITY_THRESHOLD)
            {
                stats.active_cells += 1;
            }
        }
        stats
    }
}
