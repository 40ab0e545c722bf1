//! Vorticity confinement
//!
//! Forward differencing smears small eddies out within a few steps. The
//! confinement force pushes velocity perpendicular to the gradient of |ω|,
//! which spins existing vortices back up.
//!
//! ```text
//! ω   = ½ (∂uy/∂x − ∂ux/∂y)            (central differences)
//! N̂   = ∇|ω| / (|∇|ω|| + ε)
//! f   = dt · k · ω · boost · (N̂y, −N̂x)
//! boost = 1 + vorticity_boost · min(1, |∇|ω|| / 2)
//! ```

use rayon::prelude::*;

/// Added to |∇|ω|| before normalizing
pub const GRADIENT_EPSILON: f32 = 1e-6;

/// Gradient magnitude at which the boost saturates
pub const BOOST_SATURATION: f32 = 2.0;

/// Scalar vorticity of a velocity field over the interior
///
/// Border cells of `omega` are written as zero.
pub fn compute_vorticity(
    velocity_x: &[f32],
    velocity_y: &[f32],
    omega: &mut [f32],
    nx: usize,
    ny: usize,
) {
    omega
        .par_chunks_mut(nx)
        .enumerate()
        .for_each(|(y, row)| {
            if y == 0 || y == ny - 1 {
                row.fill(0.0);
                return;
            }
            row[0] = 0.0;
            row[nx - 1] = 0.0;
            for x in 1..nx - 1 {
                let i = y * nx + x;
                row[x] = 0.5
                    * ((velocity_y[i + 1] - velocity_y[i - 1])
                        - (velocity_x[i + nx] - velocity_x[i - nx]));
            }
        });
}

/// Add the confinement force to the post-step velocity
///
/// Runs over the strictly interior region (two-cell margin) so that the
/// gradient stencil on `omega` stays in bounds. Obstacle cells are skipped.
///
/// # Arguments
///
/// * `omega` - Vorticity from [`compute_vorticity`]
/// * `velocity_x` - Post-step x velocity, updated in place
/// * `velocity_y` - Post-step y velocity, updated in place
/// * `obstacles` - Occupancy flags
/// * `nx`, `ny` - Grid dimensions
/// * `strength` - Confinement scale `dt * vorticity`
/// * `vorticity_boost` - Extra gain at sharp |ω| gradients
#[allow(clippy::too_many_arguments)]
pub fn apply_confinement(
    omega: &[f32],
    velocity_x: &mut [f32],
    velocity_y: &mut [f32],
    obstacles: &[bool],
    nx: usize,
    ny: usize,
    strength: f32,
    vorticity_boost: f32,
) {
    if nx < 5 || ny < 5 {
        return;
    }
    for y in 2..ny - 2 {
        for x in 2..nx - 2 {
            let i = y * nx + x;
            if obstacles[i] {
                continue;
            }
            let gx = omega[i + 1].abs() - omega[i - 1].abs();
            let gy = omega[i + nx].abs() - omega[i - nx].abs();
            let grad = gx.hypot(gy);
            let len = grad + GRADIENT_EPSILON;
            let (nx_hat, ny_hat) = (gx / len, gy / len);
            let boost = 1.0 + vorticity_boost * (grad / BOOST_SATURATION).min(1.0);
            let force = strength * omega[i] * boost;

            velocity_x[i] += force * ny_hat;
            velocity_y[i] -= force * nx_hat;
        }
    }
}
