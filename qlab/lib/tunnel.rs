//! Transmission through rectangular potential barriers.
//!
//! For a barrier of height `V0` and width `a`, a particle of energy `E` is
//! transmitted with probability
//! ```text
//! E < V0:  T = 1 / (1 + V0² sinh²(κ a) / (4 E (V0 - E))),  κ = √(2 (V0 - E))
//! E > V0:  T = 1 / (1 + V0² sin²(q a) / (4 E (E - V0))),   q = √(2 (E - V0))
//! E = V0:  T = 1 / (1 + a² V0 / 2)
//! ```
//! and reflected with probability `R = 1 - T`.

use ndarray as nd;
use serde::Serialize;
use crate::{
    RESONANCE_EPSILON,
    config::ScatteringParams,
    error::GridError,
    grid::{ build_grid, Grid, GridResult },
    potential::barrier_potential,
};

/// Number of points in the scattering display grid.
pub const SCATTERING_POINTS: usize = 500;

/// Half-width of the scattering display grid.
pub const SCATTERING_EXTENT: f64 = 10.0;

/// Transmission and reflection probabilities.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Transmission {
    /// Transmission probability, in `[0, 1]`.
    #[serde(rename = "transmission")]
    pub T: f64,
    /// Reflection probability, `1 - T`.
    #[serde(rename = "reflection")]
    pub R: f64,
}

impl Transmission {
    fn from_t(T: f64) -> Self {
        let T = if T.is_finite() { T.clamp(0.0, 1.0) } else { 0.0 };
        Self { T, R: 1.0 - T }
    }
}

/// Compute transmission and reflection probabilities for a particle of energy
/// `E` incident on a rectangular barrier of height `V0` and width `a`.
///
/// Energies within [`RESONANCE_EPSILON`] of `V0` use the `E → V0` limit. A
/// vanishing barrier transmits everything; a non-positive energy (against a
/// nonzero barrier) transmits nothing. `T` is always within `[0, 1]`.
///
/// ```
/// use qlab::tunnel::tunnel;
///
/// let res = tunnel(5.0, 8.0, 1.0);
/// assert!(res.T > 0.0 && res.T < 1.0);
/// assert_eq!(res.R, 1.0 - res.T);
/// ```
pub fn tunnel(E: f64, V0: f64, a: f64) -> Transmission {
    let T
        = if (E - V0).abs() < RESONANCE_EPSILON {
            (1.0 + a * a * V0 / 2.0).recip()
        } else if V0 == 0.0 || a == 0.0 {
            1.0
        } else if E <= 0.0 {
            0.0
        } else if E < V0 {
            let kappa = (2.0 * (V0 - E)).sqrt();
            let s = (kappa * a).sinh();
            (1.0 + V0 * V0 * s * s / (4.0 * E * (V0 - E))).recip()
        } else {
            let q = (2.0 * (E - V0)).sqrt();
            let s = (q * a).sin();
            (1.0 + V0 * V0 * s * s / (4.0 * E * (E - V0))).recip()
        };
    Transmission::from_t(T)
}

/// Energies sampled for the transmission curve: 100 points evenly spaced over
/// `[0.1, 20.1]`.
pub fn energy_grid() -> GridResult<Grid> { build_grid(0.1, 20.1, 100) }

/// Compute `T(E)` at each of the given energies for a fixed barrier.
pub fn transmission_curve<S>(energies: &nd::ArrayBase<S, nd::Ix1>, V0: f64, a: f64)
    -> nd::Array1<f64>
where S: nd::Data<Elem = f64>
{
    energies.mapv(|E| tunnel(E, V0, a).T)
}

/// Grid on which barrier profiles and the display wavepacket are sampled.
pub fn scattering_grid() -> GridResult<Grid> {
    build_grid(-SCATTERING_EXTENT, SCATTERING_EXTENT, SCATTERING_POINTS)
}

/// Closed-form display wavepacket `exp(-(x - c - t)² / 2w²) cos(5 (x - c - t))`
/// with `c = -5` and `w = 1`, drifting to the right with unit speed.
///
/// This is a visual aid only; it is not a solution of the Schrödinger
/// equation in the presence of the barrier.
pub fn wavepacket(grid: &Grid, t: f64) -> nd::Array1<f64> {
    const CENTER: f64 = -5.0;
    const WIDTH: f64 = 1.0;
    const WAVENUMBER: f64 = 5.0;
    grid.map(|x| {
        let u = x - CENTER - t;
        (-u * u / (2.0 * WIDTH * WIDTH)).exp() * (WAVENUMBER * u).cos()
    })
}

/// Everything displayed for one barrier configuration.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scattering {
    /// Scattering grid positions.
    pub x: Vec<f64>,
    /// Barrier profile over `x`.
    pub barrier: Vec<f64>,
    /// Result at the configured energy.
    pub result: Transmission,
    /// Tunneling probability, present only below the barrier top.
    pub tunneling: Option<f64>,
    /// Energies of the transmission curve.
    pub energies: Vec<f64>,
    /// `T` at each of `energies`.
    pub curve: Vec<f64>,
    /// Display wavepacket at the requested time.
    pub wavepacket: Vec<f64>,
}

impl Scattering {
    /// Compute the scattering view for a barrier configuration at time `t`.
    pub fn compute(params: &ScatteringParams, t: f64) -> Result<Self, GridError> {
        let grid = scattering_grid()?;
        let barrier = barrier_potential(
            &grid, params.barrier_shape, params.barrier_height, params.barrier_width);
        let result = tunnel(params.energy, params.barrier_height, params.barrier_width);
        let tunneling
            = (params.energy < params.barrier_height).then_some(result.T);
        let energies = energy_grid()?;
        let curve = transmission_curve(
            energies.x(), params.barrier_height, params.barrier_width);
        Ok(Self {
            x: grid.x().to_vec(),
            barrier: barrier.to_vec(),
            result,
            tunneling,
            energies: energies.x().to_vec(),
            curve: curve.to_vec(),
            wavepacket: wavepacket(&grid, t).to_vec(),
        })
    }
}
