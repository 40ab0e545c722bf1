//! Fixed-timestep frame scheduling
//!
//! Rendering runs at whatever rate the display allows while the integrator
//! always advances by [`FIXED_TIMESTEP`]. Each frame converts its elapsed
//! wall time into a bounded number of sub-steps.

/// Simulation time advanced by one integrator step (seconds)
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;

/// Upper bound on integrator steps per rendered frame
pub const MAX_SUBSTEPS: usize = 4;

/// Window over which the frame rate is averaged (seconds)
pub const FPS_WINDOW: f64 = 0.5;

/// Converts frame time into integrator sub-steps and tracks frame rate
#[derive(Debug, Clone)]
pub struct FrameClock {
    fixed_dt: f32,
    max_substeps: usize,
    last_frame_time_ms: f64,
    window_elapsed: f64,
    window_frames: u32,
    fps: f64,
}

impl FrameClock {
    /// Clock with the default step and sub-step cap
    pub fn new() -> Self {
        Self::with_limits(FIXED_TIMESTEP, MAX_SUBSTEPS)
    }

    /// Clock with a custom step and cap; a zero cap is raised to 1
    pub fn with_limits(fixed_dt: f32, max_substeps: usize) -> Self {
        Self {
            fixed_dt,
            max_substeps: max_substeps.max(1),
            last_frame_time_ms: 0.0,
            window_elapsed: 0.0,
            window_frames: 0,
            fps: 0.0,
        }
    }

    /// Step size in seconds
    pub fn fixed_dt(&self) -> f32 {
        self.fixed_dt
    }

    /// Sub-step cap per frame
    pub fn max_substeps(&self) -> usize {
        self.max_substeps
    }

    /// Number of integrator steps owed for a frame of `elapsed` seconds
    ///
    /// Whole fixed steps are counted up to the cap; at least one step is
    /// always returned so motion stays visible at very low frame rates.
    /// Leftover time is dropped rather than carried to the next frame.
    pub fn substeps(&self, elapsed: f32) -> usize {
        let mut acc = if elapsed.is_finite() { elapsed.max(0.0) } else { 0.0 };
        let mut n = 0;
        while acc > self.fixed_dt && n < self.max_substeps {
            n += 1;
            acc -= self.fixed_dt;
        }
        n.max(1)
    }

    /// Record a rendered frame of `elapsed` seconds
    ///
    /// # Returns
    ///
    /// The sub-step count for this frame (see [`FrameClock::substeps`])
    pub fn tick(&mut self, elapsed: f32) -> usize {
        let seconds = if elapsed.is_finite() {
            f64::from(elapsed.max(0.0))
        } else {
            0.0
        };
        self.last_frame_time_ms = seconds * 1000.0;

        self.window_frames += 1;
        self.window_elapsed += seconds;
        if self.window_elapsed >= FPS_WINDOW {
            self.fps = f64::from(self.window_frames) / self.window_elapsed;
            self.window_frames = 0;
            self.window_elapsed = 0.0;
        }

        self.substeps(elapsed)
    }

    /// Frames per second averaged over the last completed window
    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// Duration of the last recorded frame
    pub fn last_frame_time_ms(&self) -> f64 {
        self.last_frame_time_ms
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
