//! Additive perturbations of the field state
//!
//! Three impulse shapes couple user input to the field:
//!
//! - **Radial**: a smooth height bump plus an isotropic outward push sampled
//!   at [`RADIAL_SAMPLES`] angles on a ring.
//! - **Directional**: a single-cell kick along a stroke direction with a
//!   perpendicular swirl, boosted by stroke speed.
//! - **Gaussian**: height-only bump, elliptically corrected for the display
//!   aspect ratio and not obstacle-checked.

use crate::grid::{Grid, ObstacleMask};
use crate::solver::FieldState;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// Angular samples used to spread a radial push
pub const RADIAL_SAMPLES: usize = 64;

/// Peak height of a radial impulse per unit strength and radius
pub const RADIAL_HEIGHT_GAIN: f32 = 120.0;

/// Total outward velocity of a radial impulse per unit strength and radius
pub const RADIAL_VELOCITY_GAIN: f32 = 32.0;

/// Velocity kick of a directional impulse per unit strength
pub const DIRECTIONAL_VELOCITY_GAIN: f32 = 60.0;

/// Perpendicular swirl of a directional impulse per unit strength
pub const DIRECTIONAL_SWIRL_GAIN: f32 = 30.0;

/// Height added by a directional impulse per unit strength
pub const DIRECTIONAL_HEIGHT_GAIN: f32 = 0.12;

/// Stroke speed boost per unit speed and pulse radius
pub const SPEED_BOOST_GAIN: f32 = 8.0;

/// Pulse shape settings shared by every impulse kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImpulseConfig {
    /// Pulse amplitude used by strokes and pointer impulses
    pub amplitude: f32,
    /// Pulse radius in cells
    pub radius: f32,
    /// Horizontal stretch of the Gaussian footprint (display width / height
    /// relative to the grid's own aspect); 1.0 keeps it circular in cells
    pub aspect: f32,
}

impl Default for ImpulseConfig {
    fn default() -> Self {
        Self {
            amplitude: 1.0,
            radius: 3.0,
            aspect: 1.0,
        }
    }
}

/// Hermite smoothstep between two edges
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Maps interaction events to field perturbations
#[derive(Debug, Clone, Copy, Default)]
pub struct ImpulseInjector {
    config: ImpulseConfig,
}

impl ImpulseInjector {
    /// Create an injector with the given pulse settings
    pub fn new(config: ImpulseConfig) -> Self {
        Self { config }
    }

    /// Current pulse settings
    pub fn config(&self) -> &ImpulseConfig {
        &self.config
    }

    /// Replace the pulse settings
    pub fn set_config(&mut self, config: ImpulseConfig) {
        self.config = config;
    }

    /// Pulse radius, floored at one cell
    fn pulse_radius(&self) -> f32 {
        if self.config.radius.is_finite() {
            self.config.radius.max(1.0)
        } else {
            1.0
        }
    }

    /// Radial impulse centred on (cx, cy)
    ///
    /// Height follows `strength · 120 · r · (1 − smoothstep(0, r, d))` inside
    /// the disc `d < r`, which peaks at the center and falls off strictly with
    /// distance. Velocity is pushed outward at 64 angles on a ring of radius
    /// `max(1, r/2)`. Obstacle and border cells are skipped.
    ///
    /// # Returns
    ///
    /// `false` if the center cell is an obstacle and nothing was applied
    pub fn emit_radial(
        &self,
        state: &mut FieldState,
        obstacles: &ObstacleMask,
        cx: f32,
        cy: f32,
        strength: f32,
        radius: f32,
    ) -> bool {
        let grid = state.grid();
        let (gx, gy) = grid.clamp_to_interior(cx, cy);
        if obstacles.is_obstacle(grid.index(gx, gy)) {
            return false;
        }

        let r = if radius.is_finite() { radius.max(1.0) } else { 1.0 };
        let peak = strength * RADIAL_HEIGHT_GAIN * r;
        let reach = r.ceil().min(grid.nx().max(grid.ny()) as f32) as i64;
        let (gx, gy) = (gx as i64, gy as i64);
        let (nx, ny) = (grid.nx() as i64, grid.ny() as i64);

        // Offsets clipped so gx + dx and gy + dy stay inside [1, n - 2]
        let (dx_lo, dx_hi) = ((1 - gx).max(-reach), (nx - 2 - gx).min(reach));
        let (dy_lo, dy_hi) = ((1 - gy).max(-reach), (ny - 2 - gy).min(reach));

        for dy in dy_lo..=dy_hi {
            for dx in dx_lo..=dx_hi {
                let d = (dx as f32).hypot(dy as f32);
                if d >= r {
                    continue;
                }
                if let Some(i) = fluid_index(grid, obstacles, gx + dx, gy + dy) {
                    state.height.add(i, peak * (1.0 - smoothstep(0.0, r, d)));
                }
            }
        }

        let ring = (r * 0.5).max(1.0);
        let push = strength * RADIAL_VELOCITY_GAIN * r / RADIAL_SAMPLES as f32;
        for k in 0..RADIAL_SAMPLES {
            let angle = TAU * k as f32 / RADIAL_SAMPLES as f32;
            let (sin, cos) = angle.sin_cos();
            let sx = gx + (cos * ring).round() as i64;
            let sy = gy + (sin * ring).round() as i64;
            if let Some(i) = fluid_index(grid, obstacles, sx, sy) {
                state.velocity_x.add(i, push * cos);
                state.velocity_y.add(i, push * sin);
            }
        }
        true
    }

    /// Directional (drag-stroke) impulse at (cx, cy)
    ///
    /// `direction` is normally a unit vector. The kick grows with stroke speed
    /// through `speed_boost = max(1, |dir| · 8 · radius)` and carries a
    /// perpendicular swirl at half the along-stroke gain.
    ///
    /// # Returns
    ///
    /// `false` if the target cell is an obstacle and nothing was applied
    pub fn emit_directional(
        &self,
        state: &mut FieldState,
        obstacles: &ObstacleMask,
        cx: f32,
        cy: f32,
        direction: Vector2<f32>,
        strength: f32,
    ) -> bool {
        let grid = state.grid();
        let (gx, gy) = grid.clamp_to_interior(cx, cy);
        let i = grid.index(gx, gy);
        if obstacles.is_obstacle(i) {
            return false;
        }

        let speed = direction.norm();
        let speed_boost = (speed * SPEED_BOOST_GAIN * self.pulse_radius()).max(1.0);

        let kick = direction * (strength * DIRECTIONAL_VELOCITY_GAIN * speed_boost);
        let swirl = strength * DIRECTIONAL_SWIRL_GAIN * speed * speed_boost;
        let perpendicular = Vector2::new(-direction.y, direction.x);
        let velocity = kick + perpendicular * swirl;

        state
            .height
            .add(i, strength * speed * speed_boost * DIRECTIONAL_HEIGHT_GAIN);
        state.velocity_x.add(i, velocity.x);
        state.velocity_y.add(i, velocity.y);
        true
    }

    /// Gaussian height impulse at continuous coordinates (x, y)
    ///
    /// Adds `amplitude · exp(−d²/r²)` to every interior cell with
    /// `d = hypot((i − x) · aspect, j − y) < r`. Obstacles are not checked;
    /// the integrator zeroes them on the next step.
    pub fn impulse(&self, state: &mut FieldState, x: f32, y: f32, amplitude: f32, radius: f32) {
        if !(x.is_finite() && y.is_finite() && radius.is_finite()) || radius <= 0.0 {
            return;
        }
        let grid = state.grid();
        let aspect = if self.config.aspect.is_finite() && self.config.aspect > 0.0 {
            self.config.aspect
        } else {
            1.0
        };
        let r2 = radius * radius;

        let x_reach = radius / aspect;
        let x_lo = (x - x_reach).floor().max(1.0) as usize;
        let x_hi = (x + x_reach).ceil().min((grid.nx() - 2) as f32);
        let y_lo = (y - radius).floor().max(1.0) as usize;
        let y_hi = (y + radius).ceil().min((grid.ny() - 2) as f32);
        if x_hi < 1.0 || y_hi < 1.0 {
            return;
        }
        let (x_hi, y_hi) = (x_hi as usize, y_hi as usize);

        for j in y_lo..=y_hi {
            for i in x_lo..=x_hi {
                let dx = (i as f32 - x) * aspect;
                let dy = j as f32 - y;
                let d2 = dx * dx + dy * dy;
                if d2 < r2 {
                    state
                        .height
                        .add(grid.index(i, j), amplitude * (-d2 / r2).exp());
                }
            }
        }
    }
}

/// Flat index of an interior, non-obstacle cell
#[inline]
fn fluid_index(grid: Grid, obstacles: &ObstacleMask, x: i64, y: i64) -> Option<usize> {
    if !grid.is_interior(x, y) {
        return None;
    }
    let i = grid.index(x as usize, y as usize);
    (!obstacles.is_obstacle(i)).then_some(i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn setup() -> (FieldState, ObstacleMask, ImpulseInjector) {
        let grid = Grid::square(64).unwrap();
        (
            FieldState::new(grid),
            ObstacleMask::new(grid),
            ImpulseInjector::default(),
        )
    }

    #[test]
    fn test_smoothstep() {
        assert_eq!(smoothstep(0.0, 1.0, -1.0), 0.0);
        assert_eq!(smoothstep(0.0, 1.0, 2.0), 1.0);
        assert_relative_eq!(smoothstep(0.0, 1.0, 0.5), 0.5);
    }

    #[test]
    fn test_radial_peak_and_falloff() {
        let (mut state, obstacles, injector) = setup();
        assert!(injector.emit_radial(&mut state, &obstacles, 32.0, 32.0, 1.0, 3.0));

        assert_relative_eq!(state.height.get(32, 32), 360.0);
        let h1 = state.height.get(33, 32);
        let h2 = state.height.get(34, 32);
        assert!(360.0 > h1 && h1 > h2 && h2 > 0.0);
        // Outside the disc nothing is deposited
        assert_eq!(state.height.get(35, 32), 0.0);
        assert_relative_eq!(state.height.get(31, 32), h1);
        assert_relative_eq!(state.height.get(32, 30), h2);
    }

    #[test]
    fn test_radial_push_is_outward() {
        let (mut state, obstacles, injector) = setup();
        injector.emit_radial(&mut state, &obstacles, 32.0, 32.0, 1.0, 4.0);

        // Ring radius 2: right of center pushes +x, left pushes -x
        assert!(state.velocity_x.get(34, 32) > 0.0);
        assert!(state.velocity_x.get(30, 32) < 0.0);
        assert!(state.velocity_y.get(32, 34) > 0.0);
        assert!(state.velocity_y.get(32, 30) < 0.0);

        // Total outward magnitude is strength * 32 * radius
        let grid = state.grid();
        let mut outward = 0.0;
        for y in 28..=36 {
            for x in 28..=36 {
                let (dx, dy) = (x as f32 - 32.0, y as f32 - 32.0);
                let len = dx.hypot(dy);
                if len > 0.0 {
                    let i = grid.index(x, y);
                    outward += (state.velocity_x.data[i] * dx + state.velocity_y.data[i] * dy)
                        / len;
                }
            }
        }
        assert!(outward > 0.9 * 32.0 * 4.0 && outward <= 32.0 * 4.0 * 1.001);
    }

    #[test]
    fn test_radial_on_obstacle_is_dropped() {
        let (mut state, mut obstacles, injector) = setup();
        obstacles.stamp_circle(32, 32, 2);
        assert!(!injector.emit_radial(&mut state, &obstacles, 32.0, 32.0, 1.0, 3.0));
        assert!(state.is_quiescent());
    }

    #[test]
    fn test_radial_skips_obstacle_cells_in_footprint() {
        let (mut state, mut obstacles, injector) = setup();
        obstacles.stamp_box(35, 32, 1, 10);
        injector.emit_radial(&mut state, &obstacles, 32.0, 32.0, 1.0, 5.0);
        assert_eq!(state.height.get(34, 32), 0.0);
        assert!(state.height.get(33, 32) > 0.0);
    }

    #[test]
    fn test_radial_larger_than_grid_fills_interior_only() {
        let (mut state, obstacles, injector) = setup();
        assert!(injector.emit_radial(&mut state, &obstacles, 32.0, 32.0, 1e-9, 1e9));

        let grid = state.grid();
        for y in 0..64 {
            for x in 0..64 {
                let h = state.height.get(x, y);
                if grid.is_border(x, y) {
                    assert_eq!(h, 0.0, "border ({x}, {y})");
                } else {
                    assert!(h > 0.0 && h.is_finite(), "interior ({x}, {y}) = {h}");
                }
            }
        }
    }

    #[test]
    fn test_directional_kick() {
        let (mut state, obstacles, injector) = setup();
        let dir = Vector2::new(1.0, 0.0);
        assert!(injector.emit_directional(&mut state, &obstacles, 20.0, 20.0, dir, 0.5));

        // speed_boost = max(1, 1 * 8 * 3) = 24
        assert_relative_eq!(state.velocity_x.get(20, 20), 0.5 * 60.0 * 24.0);
        assert_relative_eq!(state.velocity_y.get(20, 20), 0.5 * 30.0 * 24.0);
        assert_relative_eq!(state.height.get(20, 20), 0.5 * 24.0 * 0.12);
    }

    #[test]
    fn test_directional_boost_floor() {
        let (mut state, obstacles, injector) = setup();
        let dir = Vector2::new(0.0, 0.01);
        injector.emit_directional(&mut state, &obstacles, 20.0, 20.0, dir, 1.0);
        // 0.01 * 8 * 3 < 1, so the boost is floored at 1
        assert_relative_eq!(state.velocity_y.get(20, 20), 60.0 * 0.01);
    }

    #[test]
    fn test_directional_on_obstacle_is_dropped() {
        let (mut state, mut obstacles, injector) = setup();
        obstacles.stamp_box(20, 20, 2, 2);
        let dir = Vector2::new(0.0, 1.0);
        assert!(!injector.emit_directional(&mut state, &obstacles, 20.0, 20.0, dir, 1.0));
        assert!(state.is_quiescent());
    }

    #[test]
    fn test_gaussian_impulse() {
        let (mut state, _, injector) = setup();
        injector.impulse(&mut state, 32.0, 32.0, 2.0, 4.0);
        assert_relative_eq!(state.height.get(32, 32), 2.0);
        assert_relative_eq!(state.height.get(34, 32), 2.0 * (-4.0_f32 / 16.0).exp());
        assert_eq!(state.height.get(36, 32), 0.0);
        assert!(state.velocity_x.data.iter().all(|&u| u == 0.0));
    }

    #[test]
    fn test_gaussian_aspect_correction() {
        let (mut state, _, _) = setup();
        let injector = ImpulseInjector::new(ImpulseConfig {
            aspect: 2.0,
            ..ImpulseConfig::default()
        });
        injector.impulse(&mut state, 32.0, 32.0, 1.0, 4.0);
        // Horizontal footprint is half as wide
        assert!(state.height.get(32, 35) > 0.0);
        assert_eq!(state.height.get(34, 32), 0.0);
        assert!(state.height.get(33, 32) > 0.0);
    }

    #[test]
    fn test_gaussian_is_not_obstacle_checked_and_stays_interior() {
        let (mut state, mut obstacles, injector) = setup();
        obstacles.stamp_circle(32, 32, 3);
        injector.impulse(&mut state, 32.0, 32.0, 1.0, 2.0);
        assert!(state.height.get(32, 32) > 0.0);

        injector.impulse(&mut state, 0.0, 0.0, 1.0, 3.0);
        assert_eq!(state.height.get(0, 0), 0.0);
        assert!(state.height.get(1, 1) > 0.0);
    }
}
