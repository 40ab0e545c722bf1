//! Scalar field storage
//!
//! A field is a flat `Vec<f32>` in row-major order sized exactly to its grid.
//! Height, both velocity components and the wave-equation history buffer are
//! all stored this way so that integrators can swap whole buffers.

use crate::grid::Grid;

/// One scalar value per grid cell
#[derive(Debug, Clone, PartialEq)]
pub struct FieldData {
    /// Field values in row-major order (y * nx + x)
    pub data: Vec<f32>,
    grid: Grid,
}

impl FieldData {
    /// Create a zeroed field covering the grid
    #[must_use]
    pub fn new(grid: Grid) -> Self {
        Self {
            data: vec![0.0; grid.cell_count()],
            grid,
        }
    }

    /// Grid this field covers
    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Get reference to field data
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Get mutable reference to field data
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Value at (x, y)
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        assert!(
            x < self.grid.nx() && y < self.grid.ny(),
            "Coordinates out of bounds"
        );
        self.data[self.grid.index(x, y)]
    }

    /// Overwrite the value at (x, y)
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds
    pub fn set(&mut self, x: usize, y: usize, value: f32) {
        assert!(
            x < self.grid.nx() && y < self.grid.ny(),
            "Coordinates out of bounds"
        );
        let idx = self.grid.index(x, y);
        self.data[idx] = value;
    }

    /// Add to the value at a flat index
    #[inline]
    pub fn add(&mut self, index: usize, delta: f32) {
        self.data[index] += delta;
    }

    /// Fill entire field with a value
    pub fn fill(&mut self, value: f32) {
        self.data.fill(value);
    }

    /// Sum of squared values, accumulated in f64
    pub fn sum_squares(&self) -> f64 {
        self.data.iter().map(|&v| f64::from(v) * f64::from(v)).sum()
    }

    /// Largest absolute value in the field
    pub fn max_abs(&self) -> f32 {
        self.data.iter().fold(0.0_f32, |acc, &v| acc.max(v.abs()))
    }
}
