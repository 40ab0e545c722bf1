//! Simulation parameters passed into every integrator step
//!
//! Integrators hold no parameter state of their own: whatever drives the
//! simulation (sliders, a config file, a test) builds a `StepParams` and hands
//! it to each `step` call. Missing fields deserialize to the documented
//! defaults.

use crate::error::{Result, WaveSimError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Default gravity / wave-speed coefficient
pub const DEFAULT_GRAVITY: f32 = 1.0;

/// Default per-step damping of the wave-equation model
pub const DEFAULT_DAMPING: f32 = 0.995;

/// Default pulse lifetime in seconds
pub const DEFAULT_PULSE_LIFETIME: f32 = 2.0;

/// Lifetimes below this are treated as this value to keep the decay finite
pub const MIN_PULSE_LIFETIME: f32 = 1e-3;

/// Which physical model advances the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaveModel {
    /// Linearized shallow water: height plus a velocity field
    #[default]
    ShallowWater,
    /// Second-order wave equation on height and previous height
    WaveEquation,
}

impl FromStr for WaveModel {
    type Err = WaveSimError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "shallow-water" | "shallow_water" | "swe" => Ok(Self::ShallowWater),
            "wave-equation" | "wave_equation" | "wave" => Ok(Self::WaveEquation),
            _ => Err(WaveSimError::UnknownModel(s.to_string())),
        }
    }
}

/// Per-step simulation parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepParams {
    /// Gravity / wave-speed coefficient
    pub gravity: f32,
    /// Linear drag coefficient (fraction of velocity removed per step)
    pub drag: f32,
    /// Vorticity confinement strength (0 disables confinement)
    pub vorticity: f32,
    /// Time constant in seconds of the exponential decay applied every step
    pub pulse_lifetime: f32,
    /// Extra confinement gain where |ω| changes sharply
    pub vorticity_boost: f32,
    /// Per-step damping factor of the wave-equation model
    pub damping: f32,
}

impl Default for StepParams {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            drag: 0.0,
            vorticity: 0.0,
            pulse_lifetime: DEFAULT_PULSE_LIFETIME,
            vorticity_boost: 0.0,
            damping: DEFAULT_DAMPING,
        }
    }
}

impl StepParams {
    /// Multiplicative decay `exp(-dt / pulse_lifetime)` for one step
    pub fn decay_factor(&self, dt: f32) -> f32 {
        (-dt / self.pulse_lifetime.max(MIN_PULSE_LIFETIME)).exp()
    }

    /// Damping factor of the wave-equation model; zero or negative values
    /// fall back to the default
    pub fn effective_damping(&self) -> f32 {
        if self.damping > 0.0 {
            self.damping
        } else {
            DEFAULT_DAMPING
        }
    }

    /// Check that every parameter is finite and inside its domain
    ///
    /// # Errors
    ///
    /// Returns [`WaveSimError::InvalidParameter`] naming the first parameter
    /// that is non-finite or negative.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("gravity", self.gravity),
            ("drag", self.drag),
            ("vorticity", self.vorticity),
            ("pulse_lifetime", self.pulse_lifetime),
            ("vorticity_boost", self.vorticity_boost),
            ("damping", self.damping),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(WaveSimError::invalid_parameter(name, value));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults() {
        let params = StepParams::default();
        assert_eq!(params.gravity, 1.0);
        assert_eq!(params.damping, 0.995);
        assert!(params.validate().is_ok());
        assert_eq!(WaveModel::default(), WaveModel::ShallowWater);
    }

    #[test]
    fn test_model_parsing() {
        assert_eq!("swe".parse::<WaveModel>().unwrap(), WaveModel::ShallowWater);
        assert_eq!(
            " Wave-Equation ".parse::<WaveModel>().unwrap(),
            WaveModel::WaveEquation
        );
        assert_eq!(
            "lattice".parse::<WaveModel>(),
            Err(WaveSimError::UnknownModel("lattice".to_string()))
        );
    }

    #[test]
    fn test_decay_factor() {
        let params = StepParams {
            pulse_lifetime: 1.0,
            ..StepParams::default()
        };
        assert_relative_eq!(params.decay_factor(1.0 / 60.0), (-1.0_f32 / 60.0).exp());

        // A zero lifetime must not produce NaN
        let params = StepParams {
            pulse_lifetime: 0.0,
            ..StepParams::default()
        };
        let decay = params.decay_factor(1.0 / 60.0);
        assert!(decay.is_finite());
        assert!((0.0..1.0).contains(&decay));
    }

    #[test]
    fn test_damping_fallback() {
        let params = StepParams {
            damping: 0.0,
            ..StepParams::default()
        };
        assert_eq!(params.effective_damping(), DEFAULT_DAMPING);

        let params = StepParams {
            damping: 0.9,
            ..StepParams::default()
        };
        assert_eq!(params.effective_damping(), 0.9);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let params = StepParams {
            drag: f32::NAN,
            ..StepParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(WaveSimError::InvalidParameter { name: "drag", .. })
        ));

        let params = StepParams {
            gravity: -1.0,
            ..StepParams::default()
        };
        assert!(params.validate().is_err());
    }
}
