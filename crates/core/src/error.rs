//! Error types for the wave simulation core
//!
//! The numerical core is defensive by construction: coordinates are clamped or
//! skipped rather than rejected. Errors only arise at the configuration
//! boundary (grid allocation, parameter validation, parsing shape and model
//! names).

use std::fmt;

/// Errors reported by the simulation core.
#[derive(Debug, Clone, PartialEq)]
pub enum WaveSimError {
    /// A grid dimension is below the supported minimum.
    GridTooSmall {
        /// Axis name (`"nx"` or `"ny"`)
        axis: &'static str,
        /// Requested size in cells
        value: usize,
        /// Smallest accepted size in cells
        minimum: usize,
    },

    /// The requested grid has more cells than the core will allocate.
    GridTooLarge {
        /// Requested width in cells
        nx: usize,
        /// Requested height in cells
        ny: usize,
    },

    /// An obstacle shape name did not match any supported shape.
    UnknownObstacleShape(String),

    /// A model name did not match any supported physical model.
    UnknownModel(String),

    /// A simulation parameter is non-finite or outside its domain.
    InvalidParameter {
        /// Parameter name as it appears in `StepParams`
        name: &'static str,
        /// Offending value
        value: f32,
    },

    /// An output buffer does not match the grid it is written for.
    BufferSizeMismatch {
        /// Required length in bytes
        expected: usize,
        /// Length that was supplied
        actual: usize,
    },
}

impl WaveSimError {
    /// Create error for a non-finite or out-of-domain parameter.
    pub fn invalid_parameter(name: &'static str, value: f32) -> Self {
        Self::InvalidParameter { name, value }
    }
}

impl fmt::Display for WaveSimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GridTooSmall {
                axis,
                value,
                minimum,
            } => write!(
                f,
                "Grid dimension {axis} must be at least {minimum} cells, got {value}"
            ),
            Self::GridTooLarge { nx, ny } => {
                write!(f, "Grid of {nx}x{ny} cells exceeds the allocation limit")
            }
            Self::UnknownObstacleShape(name) => write!(
                f,
                "Unknown obstacle shape '{name}' (expected circle, box or slit)"
            ),
            Self::UnknownModel(name) => write!(
                f,
                "Unknown model '{name}' (expected shallow-water or wave-equation)"
            ),
            Self::InvalidParameter { name, value } => {
                write!(f, "Simulation parameter {name}: invalid value {value}")
            }
            Self::BufferSizeMismatch { expected, actual } => write!(
                f,
                "Output buffer holds {actual} bytes, expected {expected}"
            ),
        }
    }
}

impl std::error::Error for WaveSimError {}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, WaveSimError>;
