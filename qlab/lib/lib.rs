#![allow(non_snake_case)]

//! Provides the numerical kernel behind an interactive single-particle quantum
//! mechanics explorer: eigenstates of the one-dimensional, time-independent
//! Schrödinger equation for a family of model potentials, exact spectral time
//! evolution of superpositions of those eigenstates, transmission through
//! rectangular barriers, and single-qubit gate algebra.
//!
//! Provides implementations for the following routines:
//! - Time-independent:
//!     - Closed-form harmonic oscillator and infinite square well spectra
//!     - Three-point finite-difference Hamiltonian with a dense cyclic Jacobi
//!       eigensolver
//! - Time-dependent:
//!     - Spectral expansion over computed eigenstates (no time stepping)
//!     - Probability current and momentum-space densities
//! - Scattering:
//!     - Exact rectangular-barrier transmission coefficients
//!
//! All quantities are expressed in natural units where *ħ* = *m* = 1. Every
//! function is a pure function of its inputs; callers own any "current" state
//! and pass it back in explicitly.
//!
//! ```
//! use qlab::{ config::Parameters, potential::Family, solve::System };
//!
//! let params = Parameters::default();
//! let system = System::new(Family::Harmonic, &params, None, 150).unwrap();
//! let spectrum = system.solve(params.num_states).unwrap();
//! assert!(!spectrum.used_fallback());
//! assert!((spectrum.energies()[0] - 0.5).abs() < 1e-12);
//! ```
//!
//! See [`docs`] for theoretical background.

pub mod error;
pub mod grid;
pub mod expr;
pub mod potential;
pub mod utils;
pub mod eigen;
pub mod solve;
pub mod timedep;
pub mod playback;
pub mod tunnel;
pub mod observables;
pub mod qubit;
pub mod illustrative;
pub mod config;
pub mod export;

pub mod docs;

/// Default number of grid points for bound-state solves.
pub const DEF_POINTS: usize = 150;

/// Finite stand-in for +∞ outside an infinite square well.
pub const INFINITE_WALL: f64 = 1000.0;

/// Softening length added to |x| in the Coulomb-like potential.
pub const COULOMB_SOFTENING: f64 = 0.1;

/// Threshold on |E - V0| below which barrier transmission uses the resonance
/// limit.
pub const RESONANCE_EPSILON: f64 = 1e-10;

pub(crate) const DEF_MAXSWEEPS: usize = 50;

pub type Arr1<S> = ndarray::ArrayBase<S, ndarray::Ix1>;
pub type Arr2<S> = ndarray::ArrayBase<S, ndarray::Ix2>;

// replace a zero (or non-finite) denominator with 1
pub(crate) fn safe_denom(d: f64) -> f64 {
    if d == 0.0 || !d.is_finite() { 1.0 } else { d }
}
