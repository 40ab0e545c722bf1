//! Physical unknowns of the simulation
//!
//! `FieldState` owns the live buffers read by the renderer and mutated by
//! impulses between frames. Integrators keep their own scratch buffers and
//! swap them in at the end of a step, so a step never reads a cell that has
//! already been overwritten.

use super::fields::FieldData;
use crate::grid::Grid;

/// Height and velocity fields for one grid
#[derive(Debug, Clone, PartialEq)]
pub struct FieldState {
    /// Surface displacement per cell
    pub height: FieldData,
    /// Flow velocity, x component
    pub velocity_x: FieldData,
    /// Flow velocity, y component
    pub velocity_y: FieldData,
    /// Height one step back (wave-equation model only)
    pub previous_height: FieldData,
    grid: Grid,
}

impl FieldState {
    /// Allocate zeroed fields for the grid
    #[must_use]
    pub fn new(grid: Grid) -> Self {
        Self {
            height: FieldData::new(grid),
            velocity_x: FieldData::new(grid),
            velocity_y: FieldData::new(grid),
            previous_height: FieldData::new(grid),
            grid,
        }
    }

    /// Grid these fields cover
    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Number of cells in every field
    pub fn len(&self) -> usize {
        self.grid.cell_count()
    }

    /// Always false; grids have a minimum size
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Zero every field without touching the grid
    pub fn reset(&mut self) {
        self.height.fill(0.0);
        self.velocity_x.fill(0.0);
        self.velocity_y.fill(0.0);
        self.previous_height.fill(0.0);
    }

    /// Zero both velocity components
    pub fn clear_velocity(&mut self) {
        self.velocity_x.fill(0.0);
        self.velocity_y.fill(0.0);
    }

    /// Whether every value in every field is exactly zero
    pub fn is_quiescent(&self) -> bool {
        [
            &self.height,
            &self.velocity_x,
            &self.velocity_y,
            &self.previous_height,
        ]
        .iter()
        .all(|field| field.as_slice().iter().all(|&v| v == 0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_allocation() {
        let grid = Grid::new(80, 60).unwrap();
        let state = FieldState::new(grid);
        assert_eq!(state.len(), 80 * 60);
        assert_eq!(state.height.data.len(), state.len());
        assert_eq!(state.velocity_x.data.len(), state.len());
        assert_eq!(state.velocity_y.data.len(), state.len());
        assert_eq!(state.previous_height.data.len(), state.len());
        assert!(state.is_quiescent());
    }

    #[test]
    fn test_reset_zeroes_everything() {
        let grid = Grid::square(64).unwrap();
        let mut state = FieldState::new(grid);
        state.height.set(10, 10, 4.0);
        state.velocity_x.set(11, 10, -1.0);
        state.velocity_y.set(10, 11, 2.0);
        state.previous_height.set(9, 9, 3.0);
        assert!(!state.is_quiescent());

        state.reset();
        assert!(state.is_quiescent());
        assert_eq!(state.grid(), grid);
    }

    #[test]
    fn test_clear_velocity_keeps_height() {
        let grid = Grid::square(48).unwrap();
        let mut state = FieldState::new(grid);
        state.height.set(10, 10, 1.5);
        state.velocity_x.set(10, 10, 0.5);
        state.velocity_y.set(12, 10, -0.5);

        state.clear_velocity();

        assert_eq!(state.velocity_x.max_abs(), 0.0);
        assert_eq!(state.velocity_y.max_abs(), 0.0);
        assert_eq!(state.height.get(10, 10), 1.5);
    }
}
