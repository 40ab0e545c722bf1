//! Random obstacle layouts

use crate::grid::{ObstacleMask, ObstacleShape};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Distance kept between shape centers and the grid edge
pub const LAYOUT_PADDING: i64 = 10;

/// Recipe for a randomly generated obstacle field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleLayout {
    /// Number of circles
    pub circles: usize,
    /// Number of boxes
    pub boxes: usize,
    /// Number of slit walls
    pub slits: usize,
    /// Nominal shape size in cells
    pub size: i64,
}

impl Default for ObstacleLayout {
    fn default() -> Self {
        Self {
            circles: 4,
            boxes: 3,
            slits: 1,
            size: 12,
        }
    }
}

/// Uniform integer in `[lo, hi]`, collapsing to `lo` when the range is empty
fn pick(rng: &mut StdRng, lo: i64, hi: i64) -> i64 {
    rng.random_range(lo..=hi.max(lo))
}

impl ObstacleLayout {
    /// Layout with no shapes
    pub fn empty() -> Self {
        Self {
            circles: 0,
            boxes: 0,
            slits: 0,
            ..Self::default()
        }
    }

    /// Draw the shapes of this layout for the mask's grid
    ///
    /// The same seed always yields the same shapes.
    pub fn shapes(&self, mask: &ObstacleMask, seed: u64) -> Vec<ObstacleShape> {
        let grid = mask.grid();
        let nx = grid.nx() as i64;
        let ny = grid.ny() as i64;
        let pad = LAYOUT_PADDING;
        let s = self.size.max(1);
        let min_size = (s - 6).max(3);

        let mut rng = StdRng::seed_from_u64(seed);
        let mut shapes = Vec::with_capacity(self.circles + self.boxes + self.slits);

        for _ in 0..self.circles {
            let cx = pick(&mut rng, pad, nx - pad);
            let cy = pick(&mut rng, pad, ny - pad);
            let radius = pick(&mut rng, min_size, s + 5);
            shapes.push(ObstacleShape::Circle { cx, cy, radius });
        }
        for _ in 0..self.boxes {
            let cx = pick(&mut rng, pad, nx - pad);
            let cy = pick(&mut rng, pad, ny - pad);
            let half_w = pick(&mut rng, min_size, s + 6);
            let half_h = pick(&mut rng, min_size, s + 6);
            shapes.push(ObstacleShape::Box {
                cx,
                cy,
                half_w,
                half_h,
            });
        }
        for _ in 0..self.slits {
            let cx = pick(&mut rng, pad + 12, nx - 12 - pad);
            let cy = pick(&mut rng, pad + 6, ny - 6 - pad);
            let length = pick(&mut rng, 20, (s * 3).max(30));
            let gap_half_width = pick(&mut rng, 1, (s / 4).max(2));
            shapes.push(ObstacleShape::Slit {
                cx,
                cy,
                length,
                gap_half_width,
            });
        }
        shapes
    }

    /// Clear `mask` and stamp a fresh random layout into it
    ///
    /// # Returns
    ///
    /// Number of shapes stamped
    pub fn generate(&self, mask: &mut ObstacleMask, seed: u64) -> usize {
        let shapes = self.shapes(mask, seed);
        mask.clear();
        for shape in &shapes {
            mask.stamp(*shape);
        }
        shapes.len()
    }
}
