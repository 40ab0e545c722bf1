//! Interactive wave simulation driver
//!
//! `WaveSimulation` owns the field state, the obstacle mask and the active
//! integrator, and sequences them the way an interactive front end needs:
//! input events mutate the field between frames, each frame advances a
//! bounded number of fixed steps, and the renderer reads the result.

pub mod clock;
pub mod layout;

pub use clock::{FrameClock, FIXED_TIMESTEP, FPS_WINDOW, MAX_SUBSTEPS};
pub use layout::{ObstacleLayout, LAYOUT_PADDING};

use crate::error::Result;
use crate::grid::{Grid, ObstacleMask};
use crate::impulse::{ImpulseConfig, ImpulseInjector, StrokeTracker};
use crate::render::{RenderMode, Renderer};
use crate::solver::{
    create_integrator, FieldIntegrator, FieldState, FieldStats, ProfilerScope, StepParams,
    WaveModel,
};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

/// Everything needed to build a simulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Grid width in cells
    pub nx: usize,
    /// Grid height in cells
    pub ny: usize,
    /// Physical model
    pub model: WaveModel,
    /// Step parameters
    pub params: StepParams,
    /// Pulse settings for strokes and pointer impulses
    pub impulse: ImpulseConfig,
    /// Integrator steps allowed per rendered frame
    pub max_substeps: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            nx: 160,
            ny: 120,
            model: WaveModel::default(),
            params: StepParams::default(),
            impulse: ImpulseConfig::default(),
            max_substeps: MAX_SUBSTEPS,
        }
    }
}

/// Interactive 2D wave simulation
pub struct WaveSimulation {
    grid: Grid,
    state: FieldState,
    obstacles: ObstacleMask,
    integrator: Box<dyn FieldIntegrator>,
    params: StepParams,
    injector: ImpulseInjector,
    stroke: StrokeTracker,
    clock: FrameClock,
    renderer: Renderer,
    paused: bool,

    // Statistics
    simulation_time: f64,
    steps_taken: u64,
}

impl WaveSimulation {
    /// Create a simulation with empty fields and no obstacles
    ///
    /// # Errors
    ///
    /// Fails if the grid size is out of range or the parameters are invalid.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        let grid = Grid::new(config.nx, config.ny)?;
        config.params.validate()?;

        let integrator = create_integrator(config.model, grid);
        info!(
            "Wave simulation initialized: {}x{} grid, model={:?}, max_substeps={}",
            grid.nx(),
            grid.ny(),
            config.model,
            config.max_substeps
        );

        Ok(Self {
            grid,
            state: FieldState::new(grid),
            obstacles: ObstacleMask::new(grid),
            integrator,
            params: config.params,
            injector: ImpulseInjector::new(config.impulse),
            stroke: StrokeTracker::new(),
            clock: FrameClock::with_limits(FIXED_TIMESTEP, config.max_substeps),
            renderer: Renderer::new(),
            paused: false,
            simulation_time: 0.0,
            steps_taken: 0,
        })
    }

    // ========================================================================
    // Structure
    // ========================================================================

    /// Reallocate every field, the obstacle mask and integrator scratch
    ///
    /// Previous field values and obstacles are discarded. On error the
    /// simulation is left unchanged.
    ///
    /// # Errors
    ///
    /// Fails if the new grid size is out of range.
    pub fn set_grid_size(&mut self, nx: usize, ny: usize) -> Result<()> {
        let grid = Grid::new(nx, ny)?;
        info!(
            "Reallocating grid {}x{} -> {}x{}",
            self.grid.nx(),
            self.grid.ny(),
            nx,
            ny
        );
        self.grid = grid;
        self.state = FieldState::new(grid);
        self.obstacles = ObstacleMask::new(grid);
        self.integrator = create_integrator(self.integrator.model(), grid);
        self.stroke.end();
        Ok(())
    }

    /// Zero all fields; obstacles are kept
    pub fn reset(&mut self) {
        self.state.reset();
        self.stroke.end();
        info!("Fields reset at t={:.2}s", self.simulation_time);
    }

    /// Switch the physical model
    ///
    /// Entering the wave-equation model seeds the previous height with the
    /// current one so the field starts at rest. Velocity is cleared on every
    /// switch; the wave-equation model has none to hand over.
    pub fn set_model(&mut self, model: WaveModel) {
        if model == self.integrator.model() {
            return;
        }
        if model == WaveModel::WaveEquation {
            self.state.previous_height = self.state.height.clone();
        }
        self.state.clear_velocity();
        self.integrator = create_integrator(model, self.grid);
        info!("Switched to {} model", self.integrator.name());
    }

    /// Active physical model
    pub fn model(&self) -> WaveModel {
        self.integrator.model()
    }

    // ========================================================================
    // Parameters
    // ========================================================================

    /// Current step parameters
    pub fn params(&self) -> &StepParams {
        &self.params
    }

    /// Replace the step parameters, taking effect on the next step
    ///
    /// # Errors
    ///
    /// Returns [`crate::WaveSimError::InvalidParameter`] and keeps the old
    /// parameters if any value is non-finite or out of range.
    pub fn set_params(&mut self, params: StepParams) -> Result<()> {
        params.validate()?;
        debug!("Step parameters updated: {:?}", params);
        self.params = params;
        Ok(())
    }

    /// Current pulse settings
    pub fn impulse_config(&self) -> &ImpulseConfig {
        self.injector.config()
    }

    /// Replace the pulse settings
    pub fn set_impulse_config(&mut self, config: ImpulseConfig) {
        debug!("Impulse settings updated: {:?}", config);
        self.injector.set_config(config);
    }

    // ========================================================================
    // Time stepping
    // ========================================================================

    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            info!("Simulation paused at t={:.2}s", self.simulation_time);
        }
    }

    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            info!("Simulation resumed at t={:.2}s", self.simulation_time);
        }
    }

    /// Flip the pause state and return the new one
    pub fn toggle_pause(&mut self) -> bool {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
        self.paused
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Advance one rendered frame of `elapsed` wall-clock seconds
    ///
    /// # Returns
    ///
    /// Number of fixed steps taken: 0 while paused, otherwise between 1 and
    /// the configured sub-step cap
    pub fn advance_frame(&mut self, elapsed: f32) -> usize {
        let substeps = self.clock.tick(elapsed);
        if self.paused {
            return 0;
        }
        for _ in 0..substeps {
            self.step();
        }
        trace!(elapsed, substeps, "frame advanced");
        substeps
    }

    /// Advance exactly one fixed step, even while paused
    pub fn step(&mut self) {
        let _scope = ProfilerScope::new("integrator_step");
        let dt = self.clock.fixed_dt();
        self.integrator
            .step(&mut self.state, &self.obstacles, &self.params, dt);
        self.simulation_time += f64::from(dt);
        self.steps_taken += 1;
    }

    /// Frame rate measured by the frame clock
    pub fn fps(&self) -> f64 {
        self.clock.fps()
    }

    // ========================================================================
    // Input
    // ========================================================================

    /// Radial impulse at grid coordinates; see [`ImpulseInjector::emit_radial`]
    pub fn emit_radial(&mut self, cx: f32, cy: f32, strength: f32, radius: f32) -> bool {
        self.injector
            .emit_radial(&mut self.state, &self.obstacles, cx, cy, strength, radius)
    }

    /// Directional impulse; see [`ImpulseInjector::emit_directional`]
    pub fn emit_directional(
        &mut self,
        cx: f32,
        cy: f32,
        direction: Vector2<f32>,
        strength: f32,
    ) -> bool {
        self.injector
            .emit_directional(&mut self.state, &self.obstacles, cx, cy, direction, strength)
    }

    /// Gaussian height impulse; see [`ImpulseInjector::impulse`]
    pub fn impulse(&mut self, x: f32, y: f32, amplitude: f32, radius: f32) {
        self.injector.impulse(&mut self.state, x, y, amplitude, radius);
    }

    /// Start a drag stroke at grid coordinates (x, y)
    pub fn begin_stroke(&mut self, x: f32, y: f32) {
        self.stroke.begin(Vector2::new(x, y));
    }

    /// Continue the drag stroke to (x, y)
    ///
    /// # Returns
    ///
    /// Number of directional impulses that landed on fluid cells
    pub fn continue_stroke(&mut self, x: f32, y: f32) -> usize {
        let amplitude = self.injector.config().amplitude;
        let mut applied = 0;
        for s in self.stroke.move_to(Vector2::new(x, y), amplitude) {
            if self.injector.emit_directional(
                &mut self.state,
                &self.obstacles,
                s.x,
                s.y,
                s.direction,
                s.strength,
            ) {
                applied += 1;
            }
        }
        applied
    }

    pub fn end_stroke(&mut self) {
        self.stroke.end();
    }

    // ========================================================================
    // Obstacles
    // ========================================================================

    pub fn obstacles(&self) -> &ObstacleMask {
        &self.obstacles
    }

    /// Mutable mask for stamping shapes between frames
    pub fn obstacles_mut(&mut self) -> &mut ObstacleMask {
        &mut self.obstacles
    }

    pub fn clear_obstacles(&mut self) {
        self.obstacles.clear();
        debug!("Obstacles cleared");
    }

    /// Replace the obstacles with a random layout
    ///
    /// # Returns
    ///
    /// Number of shapes stamped
    pub fn generate_obstacles(&mut self, layout: &ObstacleLayout, seed: u64) -> usize {
        let shapes = layout.generate(&mut self.obstacles, seed);
        info!(
            "Generated {} obstacles (seed={}, {} circles, {} boxes, {} slits), {} cells occupied",
            shapes,
            seed,
            layout.circles,
            layout.boxes,
            layout.slits,
            self.obstacles.occupied_count()
        );
        shapes
    }

    // ========================================================================
    // Output
    // ========================================================================

    pub fn state(&self) -> &FieldState {
        &self.state
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Field statistics with height energy weighted by the current gravity
    pub fn stats(&self) -> FieldStats {
        FieldStats::compute(&self.state, &self.obstacles, self.params.gravity)
    }

    /// Render the current field as RGBA into `out`
    ///
    /// # Errors
    ///
    /// Fails if `out` is not `4 · nx · ny` bytes long.
    pub fn render(&mut self, mode: RenderMode, out: &mut [u8]) -> Result<()> {
        self.renderer
            .render(&self.state, &self.obstacles, mode, out)
    }

    /// Simulated seconds so far
    pub fn simulation_time(&self) -> f64 {
        self.simulation_time
    }

    /// Integrator steps so far
    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }
}
