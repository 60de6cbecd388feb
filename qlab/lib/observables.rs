//! Expectation values and uncertainty relations for computed eigenstates.
//!
//! Operators that are diagonal in position are represented by their samples
//! over the grid, so that `⟨O⟩ = Σ O[i] φ[i]² dx`.

use std::f64::consts::TAU;
use ndarray as nd;
use serde::Serialize;
use crate::{
    Arr1,
    error::LengthError,
    grid::Grid,
    solve::{ Solution, Spectrum },
    utils::riemann,
};

/// Lower bound on `ΔX ΔP` in natural units.
pub const HEISENBERG_LIMIT: f64 = 0.5;

// slack for round-off in the discrete sums when checking the bound
const HEISENBERG_TOL: f64 = 1e-9;

/// Compute `⟨O⟩ = Σ O[i] amp[i]² dx` for a real amplitude on a grid.
///
/// Fails if `op`, `amp`, and `grid` do not all have the same length.
pub fn expectation<S, T>(op: &Arr1<S>, amp: &Arr1<T>, grid: &Grid)
    -> Result<f64, LengthError>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    LengthError::check(op, amp)?;
    LengthError::check(op, grid.x())?;
    let integrand: nd::Array1<f64>
        = nd::Zip::from(op).and(amp)
        .map_collect(|ok, ak| ok * ak * ak);
    Ok(riemann(&integrand, grid.dx()))
}

/// Sampled operators available for display and expectation values.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Operator {
    /// `x`.
    Position,
    /// `x²`.
    PositionSquared,
    /// `V(x)`.
    Potential,
    /// Momentum axis `k[i] = (i - N/2) 2π / (x[N - 1] - x[0])`.
    Momentum,
}

impl Operator {
    /// Sample the operator over a grid. `V` is only read for
    /// [`Operator::Potential`].
    pub fn sample<S>(&self, grid: &Grid, V: &Arr1<S>) -> nd::Array1<f64>
    where S: nd::Data<Elem = f64>
    {
        match self {
            Self::Position => grid.x().clone(),
            Self::PositionSquared => grid.map(|x| x * x),
            Self::Potential => V.to_owned(),
            Self::Momentum => {
                let n = grid.len();
                let dk = TAU / crate::safe_denom(grid.width());
                (0..n).map(|i| (i as f64 - n as f64 / 2.0) * dk).collect()
            },
        }
    }
}

/// Position and momentum spreads of a bound state.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantumProperties {
    /// `ΔX = √max(0, ⟨x²⟩ - ⟨x⟩²)`.
    pub delta_x: f64,
    /// `ΔP = √(2 max(0, E - ⟨V⟩))`.
    pub delta_p: f64,
    /// `ΔX ΔP`.
    pub uncertainty_product: f64,
}

impl QuantumProperties {
    /// Compute spreads for an eigenstate of the potential `V`.
    ///
    /// Since the state is real, `⟨p⟩ = 0` and `⟨p²⟩ / 2 = E - ⟨V⟩`.
    pub fn compute<S>(grid: &Grid, V: &Arr1<S>, state: &Solution)
        -> Result<Self, LengthError>
    where S: nd::Data<Elem = f64>
    {
        let x = expectation(grid.x(), &state.wf, grid)?;
        let x2 = expectation(&Operator::PositionSquared.sample(grid, V), &state.wf, grid)?;
        let v = expectation(V, &state.wf, grid)?;
        let delta_x = (x2 - x * x).max(0.0).sqrt();
        let delta_p = (2.0 * (state.e - v).max(0.0)).sqrt();
        Ok(Self { delta_x, delta_p, uncertainty_product: delta_x * delta_p })
    }

    /// Compute spreads for the ground state of a spectrum; `None` if the
    /// spectrum is empty.
    pub fn of_ground<S>(grid: &Grid, V: &Arr1<S>, spectrum: &Spectrum)
        -> Result<Option<Self>, LengthError>
    where S: nd::Data<Elem = f64>
    {
        spectrum.ground()
            .map(|ground| Self::compute(grid, V, ground))
            .transpose()
    }

    /// Return `true` if `ΔX ΔP ≥ 1/2`, allowing for round-off.
    ///
    /// This is only reported; nothing is enforced.
    pub fn satisfies_heisenberg(&self) -> bool {
        self.uncertainty_product >= HEISENBERG_LIMIT - HEISENBERG_TOL
    }
}

/// Ground-state expectation values shown alongside the operators.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Expectations {
    /// `⟨x⟩`
    pub position: f64,
    /// `⟨p⟩`, identically zero for a real bound state.
    pub momentum: f64,
    /// `⟨H⟩`, equal to the eigenvalue.
    pub energy: f64,
}

impl Expectations {
    /// Compute expectation values for a real eigenstate.
    pub fn compute(grid: &Grid, state: &Solution) -> Result<Self, LengthError> {
        Ok(Self {
            position: expectation(grid.x(), &state.wf, grid)?,
            momentum: 0.0,
            energy: state.e,
        })
    }
}
