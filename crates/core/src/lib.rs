//! Wave Simulation Core Library
//!
//! A stylized 2D wave/fluid field for interactive visualization. A height field
//! (plus a velocity field in the shallow-water model) is advanced at a fixed
//! timestep, perturbed by pointer impulses, deflected by stamped obstacles and
//! rendered as a false-colour image.
//!
//! ## Layout
//!
//! - [`grid`]: dimensions, indexing and the obstacle mask
//! - [`solver`]: field storage, step parameters and the integrators
//! - [`impulse`]: pointer and stroke impulses
//! - [`simulation`]: the frame-driven [`WaveSimulation`] driver
//! - [`render`]: RGBA colouring of the field
//!
//! ## Example
//!
//! ```rust
//! use wave_sim_core::{SimulationConfig, WaveSimulation};
//!
//! let mut sim = WaveSimulation::new(SimulationConfig::default()).unwrap();
//! sim.obstacles_mut().stamp_slit(80, 60, 120, 3);
//! sim.emit_radial(80.0, 80.0, 0.05, 3.0);
//! let steps = sim.advance_frame(0.045);
//! assert_eq!(steps, 2);
//! ```

pub mod error;
pub mod grid;
pub mod impulse;
pub mod render;
pub mod simulation;
pub mod solver;

// Re-export core types
pub use error::{Result, WaveSimError};
pub use grid::{Grid, ObstacleKind, ObstacleMask, ObstacleShape};
pub use impulse::{ImpulseConfig, ImpulseInjector, StrokeTracker};
pub use render::{RenderMode, Renderer};
pub use simulation::{FrameClock, ObstacleLayout, SimulationConfig, WaveSimulation};
pub use solver::{FieldIntegrator, FieldState, FieldStats, StepParams, WaveModel};
