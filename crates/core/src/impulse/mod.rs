//! User interaction coupling
//!
//! [`ImpulseInjector`] turns pointer events into additive field perturbations
//! and [`StrokeTracker`] interpolates drag strokes into evenly spaced samples.

mod injector;
mod stroke;

pub use injector::{
    smoothstep, ImpulseConfig, ImpulseInjector, DIRECTIONAL_HEIGHT_GAIN,
    DIRECTIONAL_SWIRL_GAIN, DIRECTIONAL_VELOCITY_GAIN, RADIAL_HEIGHT_GAIN, RADIAL_SAMPLES,
    RADIAL_VELOCITY_GAIN, SPEED_BOOST_GAIN,
};
pub use stroke::{
    StrokeSample, StrokeTracker, STROKE_MAX_GAIN, STROKE_MIN_DISTANCE, STROKE_SPEED_REFERENCE,
};
