//! Parameter records supplied by the caller for each engine request.
//!
//! Every record is a plain value type with defaults matching the initial state
//! of an interactive session, and can be read from (or written to) JSON with
//! camelCase keys. Missing keys take their default values.

use serde::{ Deserialize, Serialize, de::DeserializeOwned };
use crate::{
    DEF_POINTS,
    error::ConfigError,
    potential::{ BarrierShape, Family },
    timedep::InitialState,
};

pub type ConfigResult<T> = Result<T, ConfigError>;

/// JSON (de)serialization for configuration records.
pub trait JsonConfig: Serialize + DeserializeOwned {
    /// Parse from a JSON document.
    fn from_json(s: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Render as pretty-printed JSON.
    fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Potential parameters and solve settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Parameters {
    /// First family parameter (frequency, width, step height, ...).
    pub param1: f64,
    /// Second family parameter (depth, ...).
    pub param2: f64,
    /// Number of eigenstates to compute.
    pub num_states: usize,
    /// Width of the symmetric position domain.
    pub system_size: f64,
}

impl Default for Parameters {
    fn default() -> Self {
        Self { param1: 1.0, param2: 1.0, num_states: 5, system_size: 10.0 }
    }
}

impl JsonConfig for Parameters { }

/// A user-defined potential expression and the interval it is sampled over.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomPotential {
    /// Expression in `x`; see [`Expr`][crate::expr::Expr].
    pub function: String,
    /// Left edge of the domain.
    pub min: f64,
    /// Right edge of the domain.
    pub max: f64,
}

impl Default for CustomPotential {
    fn default() -> Self {
        Self { function: "0.5*x^2".into(), min: -5.0, max: 5.0 }
    }
}

impl JsonConfig for CustomPotential { }

/// Barrier scattering settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScatteringParams {
    /// Particle energy E.
    pub energy: f64,
    /// Barrier height V0.
    pub barrier_height: f64,
    /// Barrier width a.
    pub barrier_width: f64,
    /// Barrier geometry used for the displayed profile.
    pub barrier_shape: BarrierShape,
}

impl Default for ScatteringParams {
    fn default() -> Self {
        Self {
            energy: 5.0,
            barrier_height: 8.0,
            barrier_width: 1.0,
            barrier_shape: BarrierShape::Single,
        }
    }
}

impl JsonConfig for ScatteringParams { }

/// Time-evolution playback settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlaybackParams {
    /// Simulated time advanced per frame at unit speed.
    pub step: f64,
    /// Playback speed multiplier.
    pub speed: f64,
    /// Minimum wall-clock time between frames, in seconds.
    pub frame_interval: f64,
}

impl Default for PlaybackParams {
    fn default() -> Self {
        Self { step: 0.05, speed: 1.0, frame_interval: 1.0 / 60.0 }
    }
}

impl JsonConfig for PlaybackParams { }

/// Everything needed to reproduce one view of a session.
///
/// A fresh session starts on the harmonic oscillator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Session {
    /// Selected potential family.
    pub potential: Family,
    pub parameters: Parameters,
    pub custom_potential: CustomPotential,
    pub scattering: ScatteringParams,
    pub playback: PlaybackParams,
    /// Initial superposition for time evolution.
    pub initial_state: InitialState,
    /// Number of grid points; [`DEF_POINTS`] if absent.
    pub points: Option<usize>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            potential: Family::Harmonic,
            parameters: Parameters::default(),
            custom_potential: CustomPotential::default(),
            scattering: ScatteringParams::default(),
            playback: PlaybackParams::default(),
            initial_state: InitialState::default(),
            points: None,
        }
    }
}

impl Session {
    /// Get the number of grid points, falling back to [`DEF_POINTS`].
    pub fn points(&self) -> usize { self.points.unwrap_or(DEF_POINTS) }
}

impl JsonConfig for Session { }
