//! Obstacle occupancy mask
//!
//! Obstacles are stamped as simple shapes onto a boolean mask that the
//! integrator consults every step. Stamping is additive: cells are only ever
//! set to occupied, and only [`ObstacleMask::clear`] empties the mask.
//!
//! Shapes are clipped per cell to the interior `[1, nx-2] × [1, ny-2]`; the
//! outer ring is reserved as the implicit wall and never appears in the mask.

use super::Grid;
use crate::error::WaveSimError;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Half thickness of a slit wall, in cells on each side of its center row
pub const SLIT_HALF_THICKNESS: i64 = 2;

/// Supported obstacle shape names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Filled disc
    Circle,
    /// Filled axis-aligned rectangle
    Box,
    /// Horizontal wall with a centered opening
    Slit,
}

impl FromStr for ObstacleKind {
    type Err = WaveSimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "circle" => Ok(Self::Circle),
            "box" | "rect" => Ok(Self::Box),
            "slit" => Ok(Self::Slit),
            _ => Err(WaveSimError::UnknownObstacleShape(s.to_string())),
        }
    }
}

/// A shape with its placement, ready to be stamped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleShape {
    /// Disc of `radius` cells around (cx, cy)
    Circle { cx: i64, cy: i64, radius: i64 },
    /// Rectangle covering `[cx-half_w, cx+half_w) × [cy-half_h, cy+half_h)`
    Box {
        cx: i64,
        cy: i64,
        half_w: i64,
        half_h: i64,
    },
    /// Wall `length` cells long centered on (cx, cy), open where
    /// `|x - cx| <= gap_half_width`
    Slit {
        cx: i64,
        cy: i64,
        length: i64,
        gap_half_width: i64,
    },
}

impl ObstacleShape {
    /// Shape family of this placement
    pub fn kind(&self) -> ObstacleKind {
        match self {
            Self::Circle { .. } => ObstacleKind::Circle,
            Self::Box { .. } => ObstacleKind::Box,
            Self::Slit { .. } => ObstacleKind::Slit,
        }
    }
}

/// Boolean occupancy over the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObstacleMask {
    cells: Vec<bool>,
    grid: Grid,
}

impl ObstacleMask {
    /// Create an empty mask for the grid
    #[must_use]
    pub fn new(grid: Grid) -> Self {
        Self {
            cells: vec![false; grid.cell_count()],
            grid,
        }
    }

    /// Grid this mask covers
    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Occupancy flags in row-major order
    pub fn as_slice(&self) -> &[bool] {
        &self.cells
    }

    /// Whether the cell at a flat index is an obstacle
    #[inline]
    pub fn is_obstacle(&self, index: usize) -> bool {
        self.cells[index]
    }

    /// Whether the cell at (x, y) is an obstacle; off-grid cells are not
    #[inline]
    pub fn is_obstacle_at(&self, x: i64, y: i64) -> bool {
        self.grid.contains(x, y) && self.cells[self.grid.index(x as usize, y as usize)]
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Remove every obstacle
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Stamp any supported shape
    pub fn stamp(&mut self, shape: ObstacleShape) {
        match shape {
            ObstacleShape::Circle { cx, cy, radius } => self.stamp_circle(cx, cy, radius),
            ObstacleShape::Box {
                cx,
                cy,
                half_w,
                half_h,
            } => self.stamp_box(cx, cy, half_w, half_h),
            ObstacleShape::Slit {
                cx,
                cy,
                length,
                gap_half_width,
            } => self.stamp_slit(cx, cy, length, gap_half_width),
        }
    }

    /// Mark every cell with `(x-cx)² + (y-cy)² <= radius²`
    pub fn stamp_circle(&mut self, cx: i64, cy: i64, radius: i64) {
        if radius < 0 {
            return;
        }
        let r2 = i128::from(radius) * i128::from(radius);
        let (nx, ny) = (self.grid.nx(), self.grid.ny());
        for y in interior_span(cy.saturating_sub(radius), cy.saturating_add(radius), ny) {
            let dy = i128::from(y) - i128::from(cy);
            for x in interior_span(cx.saturating_sub(radius), cx.saturating_add(radius), nx) {
                let dx = i128::from(x) - i128::from(cx);
                if (dx * dx).saturating_add(dy * dy) <= r2 {
                    self.mark(x, y);
                }
            }
        }
    }

    /// Mark `[cx-half_w, cx+half_w) × [cy-half_h, cy+half_h)`
    pub fn stamp_box(&mut self, cx: i64, cy: i64, half_w: i64, half_h: i64) {
        let ys = interior_span(
            cy.saturating_sub(half_h),
            cy.saturating_add(half_h).saturating_sub(1),
            self.grid.ny(),
        );
        for y in ys {
            let xs = interior_span(
                cx.saturating_sub(half_w),
                cx.saturating_add(half_w).saturating_sub(1),
                self.grid.nx(),
            );
            for x in xs {
                self.mark(x, y);
            }
        }
    }

    /// Mark a horizontal wall of thickness `2 * SLIT_HALF_THICKNESS + 1` rows
    /// spanning `cx ± length/2`, leaving open the columns with
    /// `|x - cx| <= gap_half_width`
    pub fn stamp_slit(&mut self, cx: i64, cy: i64, length: i64, gap_half_width: i64) {
        let half = length.max(0) / 2;
        let gap = u64::try_from(gap_half_width).ok();
        let nx = self.grid.nx();
        let ys = interior_span(
            cy.saturating_sub(SLIT_HALF_THICKNESS),
            cy.saturating_add(SLIT_HALF_THICKNESS),
            self.grid.ny(),
        );
        for y in ys {
            for x in interior_span(cx.saturating_sub(half), cx.saturating_add(half), nx) {
                if gap.is_some_and(|g| x.abs_diff(cx) <= g) {
                    continue;
                }
                self.mark(x, y);
            }
        }
    }

    /// Set one cell, skipping anything outside the interior
    #[inline]
    fn mark(&mut self, x: i64, y: i64) {
        if self.grid.is_interior(x, y) {
            let idx = self.grid.index(x as usize, y as usize);
            self.cells[idx] = true;
        }
    }
}

/// Inclusive range `[lo, hi]` clipped to the interior `[1, n - 2]` of an axis
fn interior_span(lo: i64, hi: i64, n: usize) -> RangeInclusive<i64> {
    let last = i64::try_from(n).map_or(i64::MAX, |n| n - 2);
    lo.max(1)..=hi.min(last)
}
