//! Pointer-drag stroke interpolation
//!
//! Fast pointer moves skip many cells between events. The tracker fills the
//! gap with evenly spaced directional samples so a stroke leaves a continuous
//! wake instead of isolated dots.

use nalgebra::Vector2;

/// Moves shorter than this (in cells) are treated as jitter
pub const STROKE_MIN_DISTANCE: f32 = 0.5;

/// Upper bound on the speed gain applied to stroke strength
pub const STROKE_MAX_GAIN: f32 = 3.0;

/// Distance (in cells) that maps to a speed gain of 1
pub const STROKE_SPEED_REFERENCE: f32 = 2.0;

/// One interpolated point of a stroke segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeSample {
    /// Grid x coordinate
    pub x: f32,
    /// Grid y coordinate
    pub y: f32,
    /// Unit direction of the segment
    pub direction: Vector2<f32>,
    /// Impulse strength for this sample
    pub strength: f32,
}

/// Tracks the last pointer position of an active stroke
#[derive(Debug, Clone, Copy, Default)]
pub struct StrokeTracker {
    last: Option<Vector2<f32>>,
}

impl StrokeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a stroke at `p`
    pub fn begin(&mut self, p: Vector2<f32>) {
        self.last = Some(p);
    }

    /// Whether a stroke is in progress
    pub fn is_active(&self) -> bool {
        self.last.is_some()
    }

    /// Move the pointer to `p`
    ///
    /// # Arguments
    ///
    /// * `p` - New pointer position in grid coordinates
    /// * `amplitude` - Pulse amplitude, scaled by stroke speed
    ///
    /// # Returns
    ///
    /// `max(1, floor(d))` samples spread over the segment when it is longer
    /// than [`STROKE_MIN_DISTANCE`], otherwise none. Without an active stroke
    /// the move starts one and returns nothing.
    pub fn move_to(&mut self, p: Vector2<f32>, amplitude: f32) -> Vec<StrokeSample> {
        let Some(prev) = self.last.replace(p) else {
            return Vec::new();
        };

        let delta = p - prev;
        let dist = delta.norm();
        if !dist.is_finite() || dist <= STROKE_MIN_DISTANCE {
            return Vec::new();
        }

        let steps = (dist.floor() as usize).max(1);
        let direction = delta / dist;
        let strength = amplitude * (dist / STROKE_SPEED_REFERENCE).min(STROKE_MAX_GAIN);

        (1..=steps)
            .map(|k| {
                let at = prev + delta * (k as f32 / steps as f32);
                StrokeSample {
                    x: at.x,
                    y: at.y,
                    direction,
                    strength,
                }
            })
            .collect()
    }

    /// Finish the stroke
    pub fn end(&mut self) {
        self.last = None;
    }
}
