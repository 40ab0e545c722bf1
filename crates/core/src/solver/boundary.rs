//! Obstacle boundary conditions for the shallow-water model
//!
//! Two sweeps run after the compute pass, both over the interior only:
//!
//! 1. **Reflection**: every fluid neighbour of an obstacle cell has its
//!    freshly computed height negated, together with the velocity component
//!    normal to the shared face (`ux` for left/right, `uy` for up/down).
//!    A fluid cell touching two obstacle faces is negated twice.
//! 2. **Inflow clamp**: obstacle cells are zeroed and the normal velocity of
//!    each fluid neighbour is clamped so it cannot point into the obstacle.
//!
//! The clamp is partly redundant with the reflection; both are applied
//! unconditionally.

/// Negate the height and face-normal velocity of fluid cells next to obstacles
///
/// # Arguments
///
/// * `height` - Post-step height field
/// * `velocity_x` - Post-step x velocity
/// * `velocity_y` - Post-step y velocity
/// * `obstacles` - Occupancy flags for the same grid
/// * `nx` - Grid width in cells
/// * `ny` - Grid height in cells
pub fn reflect_at_obstacles(
    height: &mut [f32],
    velocity_x: &mut [f32],
    velocity_y: &mut [f32],
    obstacles: &[bool],
    nx: usize,
    ny: usize,
) {
    for y in 1..ny - 1 {
        for x in 1..nx - 1 {
            let i = y * nx + x;
            if !obstacles[i] {
                continue;
            }
            for j in [i - 1, i + 1] {
                if !obstacles[j] {
                    velocity_x[j] = -velocity_x[j];
                    height[j] = -height[j];
                }
            }
            for j in [i - nx, i + nx] {
                if !obstacles[j] {
                    velocity_y[j] = -velocity_y[j];
                    height[j] = -height[j];
                }
            }
        }
    }
}

/// Zero obstacle cells and forbid flow into them from fluid neighbours
///
/// Left neighbours keep `ux <= 0`, right neighbours `ux >= 0`, the neighbour
/// above (lower y) keeps `uy <= 0` and the one below `uy >= 0`.
pub fn clamp_inflow(
    height: &mut [f32],
    velocity_x: &mut [f32],
    velocity_y: &mut [f32],
    obstacles: &[bool],
    nx: usize,
    ny: usize,
) {
    for y in 1..ny - 1 {
        for x in 1..nx - 1 {
            let i = y * nx + x;
            if !obstacles[i] {
                continue;
            }
            height[i] = 0.0;
            velocity_x[i] = 0.0;
            velocity_y[i] = 0.0;

            if !obstacles[i - 1] {
                velocity_x[i - 1] = velocity_x[i - 1].min(0.0);
            }
            if !obstacles[i + 1] {
                velocity_x[i + 1] = velocity_x[i + 1].max(0.0);
            }
            if !obstacles[i - nx] {
                velocity_y[i - nx] = velocity_y[i - nx].min(0.0);
            }
            if !obstacles[i + nx] {
                velocity_y[i + nx] = velocity_y[i + nx].max(0.0);
            }
        }
    }
}
