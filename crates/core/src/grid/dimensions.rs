//! Grid dimensions and cell addressing
//!
//! All fields of the simulation are flat arrays in row-major order
//! (`y * nx + x`). The outermost ring of cells is never simulated and acts as
//! an implicit wall, so every shape and impulse targets the interior
//! `[1, nx-2] × [1, ny-2]`.

use crate::error::{Result, WaveSimError};
use serde::{Deserialize, Serialize};

/// Smallest grid side accepted by [`Grid::new`]
pub const MIN_GRID_DIMENSION: usize = 48;

/// Largest number of cells the core will allocate for one field
pub const MAX_GRID_CELLS: usize = 4096 * 4096;

/// Fixed-size 2D grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid {
    nx: usize,
    ny: usize,
}

impl Grid {
    /// Create a grid of `nx` × `ny` cells
    ///
    /// # Errors
    ///
    /// Returns [`WaveSimError::GridTooSmall`] if either side is below
    /// [`MIN_GRID_DIMENSION`], and [`WaveSimError::GridTooLarge`] if the cell
    /// count exceeds [`MAX_GRID_CELLS`].
    pub fn new(nx: usize, ny: usize) -> Result<Self> {
        if nx < MIN_GRID_DIMENSION {
            return Err(WaveSimError::GridTooSmall {
                axis: "nx",
                value: nx,
                minimum: MIN_GRID_DIMENSION,
            });
        }
        if ny < MIN_GRID_DIMENSION {
            return Err(WaveSimError::GridTooSmall {
                axis: "ny",
                value: ny,
                minimum: MIN_GRID_DIMENSION,
            });
        }
        match nx.checked_mul(ny) {
            Some(cells) if cells <= MAX_GRID_CELLS => Ok(Self { nx, ny }),
            _ => Err(WaveSimError::GridTooLarge { nx, ny }),
        }
    }

    /// Create a square grid
    ///
    /// # Errors
    ///
    /// Same conditions as [`Grid::new`].
    pub fn square(size: usize) -> Result<Self> {
        Self::new(size, size)
    }

    /// Create a grid `nx` cells wide whose height follows a display aspect
    /// ratio (`height / width`), never going below the minimum side
    ///
    /// # Errors
    ///
    /// Same conditions as [`Grid::new`].
    pub fn with_aspect(nx: usize, aspect: f32) -> Result<Self> {
        let aspect = if aspect.is_finite() && aspect > 0.0 {
            aspect
        } else {
            1.0
        };
        let ny = ((nx as f32 * aspect).round() as usize).max(MIN_GRID_DIMENSION);
        Self::new(nx, ny)
    }

    /// Grid width in cells
    #[inline]
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// Grid height in cells
    #[inline]
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Total number of cells (`nx * ny`)
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.nx * self.ny
    }

    /// Flat index of cell (x, y)
    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.nx && y < self.ny, "Coordinates out of bounds");
        y * self.nx + x
    }

    /// Cell coordinates of a flat index
    #[inline]
    pub fn coords(&self, index: usize) -> (usize, usize) {
        (index % self.nx, index / self.nx)
    }

    /// Whether signed coordinates fall anywhere on the grid
    #[inline]
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.nx && (y as usize) < self.ny
    }

    /// Whether signed coordinates fall inside the simulated interior
    #[inline]
    pub fn is_interior(&self, x: i64, y: i64) -> bool {
        x >= 1 && y >= 1 && (x as usize) < self.nx - 1 && (y as usize) < self.ny - 1
    }

    /// Whether a cell lies on the outer ring
    #[inline]
    pub fn is_border(&self, x: usize, y: usize) -> bool {
        x == 0 || y == 0 || x == self.nx - 1 || y == self.ny - 1
    }

    /// Map continuous grid coordinates to the nearest interior cell
    ///
    /// Coordinates are floored, then clamped to `[1, nx-2] × [1, ny-2]`.
    /// Non-finite input lands on the interior origin.
    pub fn clamp_to_interior(&self, x: f32, y: f32) -> (usize, usize) {
        let clamp_axis = |v: f32, n: usize| -> usize {
            let hi = (n - 2) as f32;
            if v.is_finite() {
                v.floor().clamp(1.0, hi) as usize
            } else {
                1
            }
        };
        (clamp_axis(x, self.nx), clamp_axis(y, self.ny))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_creation() {
        let grid = Grid::new(64, 48).unwrap();
        assert_eq!(grid.nx(), 64);
        assert_eq!(grid.ny(), 48);
        assert_eq!(grid.cell_count(), 64 * 48);
    }

    #[test]
    fn test_grid_rejects_small_dimensions() {
        let err = Grid::new(10, 64).unwrap_err();
        assert_eq!(
            err,
            WaveSimError::GridTooSmall {
                axis: "nx",
                value: 10,
                minimum: MIN_GRID_DIMENSION
            }
        );
        assert!(matches!(
            Grid::new(64, 47),
            Err(WaveSimError::GridTooSmall { axis: "ny", .. })
        ));
    }

    #[test]
    fn test_grid_rejects_huge_dimensions() {
        assert!(matches!(
            Grid::new(100_000, 100_000),
            Err(WaveSimError::GridTooLarge { .. })
        ));
    }

    #[test]
    fn test_with_aspect() {
        let grid = Grid::with_aspect(200, 0.5).unwrap();
        assert_eq!(grid.ny(), 100);

        // Very wide displays never drop below the minimum height
        let grid = Grid::with_aspect(100, 0.1).unwrap();
        assert_eq!(grid.ny(), MIN_GRID_DIMENSION);

        let grid = Grid::with_aspect(64, f32::NAN).unwrap();
        assert_eq!(grid.ny(), 64);
    }

    #[test]
    fn test_row_major_indexing() {
        let grid = Grid::square(64).unwrap();
        assert_eq!(grid.index(3, 4), 4 * 64 + 3);
        assert_eq!(grid.coords(4 * 64 + 3), (3, 4));
    }

    #[test]
    fn test_interior_and_border() {
        let grid = Grid::square(64).unwrap();
        assert!(grid.is_border(0, 10));
        assert!(grid.is_border(63, 10));
        assert!(grid.is_border(10, 63));
        assert!(!grid.is_border(1, 1));

        assert!(grid.is_interior(1, 1));
        assert!(grid.is_interior(62, 62));
        assert!(!grid.is_interior(0, 5));
        assert!(!grid.is_interior(63, 5));
        assert!(!grid.is_interior(-3, 5));

        assert!(grid.contains(0, 0));
        assert!(!grid.contains(64, 0));
    }

    #[test]
    fn test_clamp_to_interior() {
        let grid = Grid::square(64).unwrap();
        assert_eq!(grid.clamp_to_interior(10.7, 20.2), (10, 20));
        assert_eq!(grid.clamp_to_interior(-5.0, 100.0), (1, 62));
        assert_eq!(grid.clamp_to_interior(f32::NAN, 0.0), (1, 1));
    }
}
