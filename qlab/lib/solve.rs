//! Functions to compute solutions to the one-dimensional, time-independent
//! Schrödinger equation (TISE) for conservative potentials.
//!
//! The harmonic oscillator and infinite square well are solved in closed form;
//! every other potential goes through a three-point finite-difference
//! Hamiltonian and the [Jacobi eigensolver][crate::eigen]. If the eigensolver
//! cannot produce a result, a placeholder sine-basis spectrum is returned
//! instead and flagged as such in the [`Spectrum`].

use std::{ cmp, f64::consts::PI };
use ndarray as nd;
use crate::{
    Arr1,
    config::{ CustomPotential, Parameters },
    eigen::{ self, EigenResult },
    error::{ LengthError, XError },
    grid::{ self, Grid },
    potential::{ evaluate_potential, Family },
    safe_denom,
    utils::wf_normalized,
};

pub type XResult<T> = Result<T, XError>;

/// A single solution to the TISE.
///
/// Wavefunctions are sampled on the grid they were solved over and normalized
/// so that `Σ wf[i]² dx = 1`.
#[derive(Clone, Debug)]
pub struct Solution {
    /// Energy
    pub e: f64,
    /// Wavefunction
    pub wf: nd::Array1<f64>,
}

impl Solution {
    /// Compare two `Solution`s by their energy.
    pub fn cmp_energy(&self, other: &Self) -> Option<cmp::Ordering> {
        self.e.partial_cmp(&other.e)
    }
}

/// Describes how a [`Spectrum`] was obtained.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SolveStatus {
    /// Closed-form solution.
    Analytic,
    /// Finite-difference Hamiltonian diagonalized numerically.
    Numerical,
    /// Placeholder states returned after the eigensolver failed.
    Fallback,
}

/// A set of eigenstates in ascending order of energy.
#[derive(Clone, Debug)]
pub struct Spectrum {
    states: Vec<Solution>,
    status: SolveStatus,
    // number of grid points every state is sampled on
    points: usize,
}

impl Spectrum {
    fn new(mut states: Vec<Solution>, status: SolveStatus, points: usize)
        -> Self
    {
        states.sort_by(|l, r| l.cmp_energy(r).unwrap_or(cmp::Ordering::Equal));
        Self { states, status, points }
    }

    /// Get the eigenstates.
    pub fn states(&self) -> &[Solution] { &self.states }

    /// Get the way the states were computed.
    pub fn status(&self) -> SolveStatus { self.status }

    /// Return `true` if the states are placeholders rather than a real
    /// solution.
    pub fn used_fallback(&self) -> bool { self.status == SolveStatus::Fallback }

    /// Get the number of grid points the states are sampled on.
    pub fn points(&self) -> usize { self.points }

    /// Get the number of states.
    pub fn len(&self) -> usize { self.states.len() }

    /// Return `true` if there are no states.
    pub fn is_empty(&self) -> bool { self.states.is_empty() }

    /// Get the lowest-energy state, if any.
    pub fn ground(&self) -> Option<&Solution> { self.states.first() }

    /// Collect all energies.
    pub fn energies(&self) -> nd::Array1<f64> {
        self.states.iter().map(|sol| sol.e).collect()
    }

    /// Iterate over the states.
    pub fn iter(&self) -> std::slice::Iter<'_, Solution> { self.states.iter() }
}

impl<'a> IntoIterator for &'a Spectrum {
    type Item = &'a Solution;
    type IntoIter = std::slice::Iter<'a, Solution>;

    fn into_iter(self) -> Self::IntoIter { self.states.iter() }
}

/// Evaluate the physicists' Hermite polynomial `H_n` at `xi` by upward
/// recurrence.
pub fn hermite(n: usize, xi: f64) -> f64 {
    match n {
        0 => 1.0,
        1 => 2.0 * xi,
        _ => {
            let mut hprev = 1.0;
            let mut h = 2.0 * xi;
            for k in 2..=n {
                let hnext = 2.0 * xi * h - 2.0 * (k - 1) as f64 * hprev;
                hprev = h;
                h = hnext;
            }
            h
        },
    }
}

/// Energy of the `n`-th harmonic oscillator level, `ω (n + 1/2)`.
pub fn harmonic_energy(n: usize, omega: f64) -> f64 {
    omega * (n as f64 + 0.5)
}

/// Normalized `n`-th harmonic oscillator eigenfunction `H_n(ξ) exp(-ξ²/2)`,
/// `ξ = x √ω`, sampled on a grid.
pub fn harmonic_wavefunction(grid: &Grid, n: usize, omega: f64) -> nd::Array1<f64> {
    let sw = omega.sqrt();
    let wf = grid.map(|x| {
        let xi = x * sw;
        let phi = hermite(n, xi) * (-xi * xi / 2.0).exp();
        // overflow far out in the tails
        if phi.is_finite() { phi } else { 0.0 }
    });
    wf_normalized(&wf, grid.dx())
}

/// Energy of the `n`-th infinite square well level, `(n + 1)² π² / (2 L²)`.
pub fn box_energy(n: usize, width: f64) -> f64 {
    let k = (n + 1) as f64 * PI / safe_denom(width);
    k * k / 2.0
}

/// Normalized `n`-th infinite square well eigenfunction
/// `sin((n + 1) π (x + L/2) / L)` inside the well, zero outside.
pub fn box_wavefunction(grid: &Grid, n: usize, width: f64) -> nd::Array1<f64> {
    let wf = grid.map(|x| {
        if x.abs() <= width / 2.0 {
            sine_mode(x, n, width)
        } else {
            0.0
        }
    });
    wf_normalized(&wf, grid.dx())
}

fn sine_mode(x: f64, n: usize, width: f64) -> f64 {
    ((n + 1) as f64 * PI * (x + width / 2.0) / safe_denom(width)).sin()
}

/// Closed-form harmonic oscillator spectrum with angular frequency `omega`.
pub fn solve_harmonic(grid: &Grid, omega: f64, num_states: usize) -> Vec<Solution> {
    (0..num_states.min(grid.len()))
        .map(|n| Solution {
            e: harmonic_energy(n, omega),
            wf: harmonic_wavefunction(grid, n, omega),
        })
        .collect()
}

/// Closed-form infinite square well spectrum for a well of width `width`
/// centered on the origin.
pub fn solve_infinite_well(grid: &Grid, width: f64, num_states: usize)
    -> Vec<Solution>
{
    (0..num_states.min(grid.len()))
        .map(|n| Solution {
            e: box_energy(n, width),
            wf: box_wavefunction(grid, n, width),
        })
        .collect()
}

/// Construct the three-point finite-difference Hamiltonian
/// `H = -(1/2) d²/dx² + V`.
///
/// With `t = 1 / (2 dx²)`, the diagonal is `2 t + V[i]` and the first
/// off-diagonals are `-t`. Wavefunctions are implicitly zero just outside the
/// grid. A zero spacing is treated as 1.
pub fn hamiltonian<S>(dx: f64, V: &Arr1<S>) -> nd::Array2<f64>
where S: nd::Data<Elem = f64>
{
    let n = V.len();
    let t = 0.5 / safe_denom(dx).powi(2);
    let mut H: nd::Array2<f64> = nd::Array2::zeros((n, n));
    H.diag_mut().iter_mut().zip(V)
        .for_each(|(Hii, Vi)| { *Hii = 2.0 * t + Vi; });
    if n > 1 {
        H.slice_mut(nd::s![1..n, 0..n - 1]).diag_mut().fill(-t);
        H.slice_mut(nd::s![0..n - 1, 1..n]).diag_mut().fill(-t);
    }
    H
}

/// Diagonalize the [finite-difference Hamiltonian][hamiltonian] and return
/// the lowest `min(num_states, N)` states, each normalized.
pub fn solve_finite_difference<S>(grid: &Grid, V: &Arr1<S>, num_states: usize)
    -> EigenResult<Vec<Solution>>
where S: nd::Data<Elem = f64>
{
    let H = hamiltonian(grid.dx(), V);
    let eig = eigen::eigh(&H)?;
    let sols: Vec<Solution>
        = eig.values.iter()
        .zip(eig.vectors.columns())
        .take(num_states)
        .map(|(&e, v)| Solution { e, wf: wf_normalized(&v, grid.dx()) })
        .collect();
    Ok(sols)
}

/// Placeholder states used when a numerical solve fails: energies `n + 1`
/// and sine modes `sin((n + 1) π (x + L/2) / L)` over the full grid width
/// `L`.
pub fn fallback_spectrum(grid: &Grid, num_states: usize) -> Vec<Solution> {
    let width = grid.width();
    (0..num_states.min(grid.len()))
        .map(|n| {
            let wf = grid.map(|x| sine_mode(x, n, width));
            Solution { e: (n + 1) as f64, wf: wf_normalized(&wf, grid.dx()) }
        })
        .collect()
}

/// Compute the lowest `min(num_states, N)` eigenstates for a potential
/// profile.
///
/// The harmonic oscillator (with `p1 > 0` taken as the frequency) and infinite
/// square well (with `p1 > 0` taken as the width) use their closed forms;
/// everything else, including those two families with non-positive `p1`, is
/// solved numerically. A failed numerical solve is logged and replaced by
/// [`fallback_spectrum`]; only mismatched array lengths produce an error.
pub fn solve_spectrum<S>(
    grid: &Grid,
    V: &Arr1<S>,
    family: Family,
    p1: f64,
    num_states: usize,
) -> XResult<Spectrum>
where S: nd::Data<Elem = f64>
{
    LengthError::check(grid.x(), V)?;
    let analytic_ok = p1.is_finite() && p1 > 0.0;
    let spectrum
        = match family {
            Family::Harmonic if analytic_ok => {
                log::debug!("solve::solve_spectrum: closed-form harmonic oscillator");
                Spectrum::new(
                    solve_harmonic(grid, p1, num_states),
                    SolveStatus::Analytic,
                    grid.len(),
                )
            },
            Family::InfiniteWell if analytic_ok => {
                log::debug!("solve::solve_spectrum: closed-form infinite well");
                Spectrum::new(
                    solve_infinite_well(grid, p1, num_states),
                    SolveStatus::Analytic,
                    grid.len(),
                )
            },
            _ => match solve_finite_difference(grid, V, num_states) {
                Ok(sols) => {
                    Spectrum::new(sols, SolveStatus::Numerical, grid.len())
                },
                Err(err) => {
                    log::warn!(
                        "solve::solve_spectrum: eigensolver failed for the {} \
                        potential ({}); returning placeholder states",
                        family,
                        err,
                    );
                    Spectrum::new(
                        fallback_spectrum(grid, num_states),
                        SolveStatus::Fallback,
                        grid.len(),
                    )
                },
            },
        };
    Ok(spectrum)
}

/// Simple record to keep track of coordinate and potential arrays for a
/// single potential family.
///
/// Arrays borrowed from this type are guaranteed to have the same length.
#[derive(Clone, Debug)]
pub struct System {
    // coordinate grid
    grid: Grid,
    // potential array
    V: nd::Array1<f64>,
    // potential family
    family: Family,
    // first family parameter
    p1: f64,
}

impl System {
    /// Create a new `System` for a potential family.
    ///
    /// The [custom][Family::Custom] family is sampled over
    /// `[custom.min, custom.max]` (using the default expression if `custom` is
    /// `None`); every other family over `[-systemSize / 2, systemSize / 2]`.
    pub fn new(
        family: Family,
        params: &Parameters,
        custom: Option<&CustomPotential>,
        n_points: usize,
    ) -> XResult<Self>
    {
        let default_custom = CustomPotential::default();
        let custom = custom.unwrap_or(&default_custom);
        let grid
            = if family == Family::Custom {
                grid::build_grid(custom.min, custom.max, n_points)?
            } else {
                grid::symmetric(params.system_size, n_points)?
            };
        let V = evaluate_potential(
            &grid,
            family,
            params.param1,
            params.param2,
            Some(custom.function.as_str()),
        );
        Ok(Self { grid, V, family, p1: params.param1 })
    }

    /// Create a new `System` from a grid and a precomputed potential.
    pub fn from_arrays(grid: Grid, V: nd::Array1<f64>, family: Family, p1: f64)
        -> XResult<Self>
    {
        LengthError::check(grid.x(), &V)?;
        Ok(Self { grid, V, family, p1 })
    }

    /// Get a reference to the grid.
    pub fn get_grid(&self) -> &Grid { &self.grid }

    /// Get a reference to the coordinate array.
    pub fn get_x(&self) -> &nd::Array1<f64> { self.grid.x() }

    /// Get a reference to the potential array.
    pub fn get_V(&self) -> &nd::Array1<f64> { &self.V }

    /// Get the coordinate array grid spacing.
    pub fn get_dx(&self) -> f64 { self.grid.dx() }

    /// Get the potential family.
    pub fn get_family(&self) -> Family { self.family }

    /// Get the length of the coordinate and potential arrays.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize { self.grid.len() }

    /// Thin interface to [`solve_spectrum`].
    pub fn solve(&self, num_states: usize) -> XResult<Spectrum> {
        solve_spectrum(&self.grid, &self.V, self.family, self.p1, num_states)
    }
}
