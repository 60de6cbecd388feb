//! Provides functions to compute solutions to the 1+1-dimensional
//! (time-dependent) Schrödinger equation (TDSE) for motion in a
//! time-independent potential.
//!
//! States are evolved exactly by expanding over a precomputed [`Spectrum`]:
//! ```text
//! ψ(x, t) = Σ_n c_n φ_n(x) exp(-i E_n t)
//! ```
//! so there is no time step and no accumulated integration error; the result at
//! any `t` costs one pass over the spectrum.
//!
//! In all 2D arrays, the first (or zero-th) axis indexes time.

use std::f64::consts::TAU;
use ndarray as nd;
use num_complex::Complex64 as C64;
use num_traits::Zero;
use serde::{ Deserialize, Serialize };
use crate::{
    Arr1,
    grid::Grid,
    solve::Spectrum,
    utils::{ centered_wavenumbers, fft },
    safe_denom,
};

/// Preset expansion coefficients.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InitialState {
    /// `c₁ = 1`.
    #[serde(rename = "first")]
    FirstExcited,
    /// `c₀ = c₁ = 1/√2`.
    Superposition,
    /// `c_n ∝ exp(-(n - 2)² / 2)`.
    Gaussian,
    /// `c₀ = 1`; also used for unrecognized tags.
    #[default]
    #[serde(other)]
    Ground,
}

impl InitialState {
    /// Look up a preset by tag, mapping unknown tags to
    /// [`InitialState::Ground`].
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "first" | "excited" | "first_excited" => Self::FirstExcited,
            "superposition" => Self::Superposition,
            "gaussian" => Self::Gaussian,
            _ => Self::Ground,
        }
    }

    /// Generate the coefficients for a spectrum of `n` states.
    ///
    /// Entries that would refer to states beyond `n` are dropped, so e.g. the
    /// first-excited preset over a single state is all zeros.
    pub fn coefficients(&self, n: usize) -> Vec<C64> {
        let mut c: Vec<C64> = vec![C64::zero(); n];
        match self {
            Self::Ground => {
                if let Some(c0) = c.get_mut(0) { *c0 = C64::from(1.0); }
            },
            Self::FirstExcited => {
                if let Some(c1) = c.get_mut(1) { *c1 = C64::from(1.0); }
            },
            Self::Superposition => {
                c.iter_mut().take(2)
                    .for_each(|ck| { *ck = C64::from(std::f64::consts::FRAC_1_SQRT_2); });
            },
            Self::Gaussian => {
                c.iter_mut().enumerate()
                    .for_each(|(k, ck)| {
                        *ck = C64::from((-0.5 * (k as f64 - 2.0).powi(2)).exp());
                    });
                let norm = safe_denom(
                    c.iter().map(|ck| ck.norm_sqr()).sum::<f64>().sqrt());
                c.iter_mut().for_each(|ck| { *ck /= norm; });
            },
        }
        c
    }
}

// pad or truncate to `n` and normalize if possible
fn conform_coefficients(coeffs: &[C64], n: usize) -> Vec<C64> {
    let mut c: Vec<C64> = coeffs.iter().copied().take(n).collect();
    c.resize(n, C64::zero());
    let norm: f64 = c.iter().map(|ck| ck.norm_sqr()).sum::<f64>().sqrt();
    if norm > 0.0 && norm.is_finite() {
        c.iter_mut().for_each(|ck| { *ck /= norm; });
    }
    c
}

/// Compute `ψ(x, t)` for a superposition of the states in `spectrum`.
///
/// `coeffs` is zero-padded or truncated to the number of states and then
/// normalized to `Σ |c_n|² = 1` (all-zero coefficients give `ψ = 0`).
pub fn evolve(spectrum: &Spectrum, coeffs: &[C64], t: f64) -> nd::Array1<C64> {
    let c = conform_coefficients(coeffs, spectrum.len());
    let mut psi: nd::Array1<C64> = nd::Array1::zeros(spectrum.points());
    spectrum.iter().zip(&c)
        .filter(|(_, cn)| !cn.is_zero())
        .for_each(|(sol, cn)| {
            let a = cn * C64::cis(-sol.e * t);
            psi.iter_mut().zip(&sol.wf)
                .for_each(|(psik, phik)| { *psik += a * *phik; });
        });
    psi
}

/// Like [`evolve`], but for a sequence of times, returning a 2D array whose
/// first axis indexes time.
pub fn evolve_many<S>(spectrum: &Spectrum, coeffs: &[C64], t: &Arr1<S>)
    -> nd::Array2<C64>
where S: nd::Data<Elem = f64>
{
    let mut psi: nd::Array2<C64>
        = nd::Array2::zeros((t.len(), spectrum.points()));
    psi.outer_iter_mut().zip(t)
        .for_each(|(mut psi_t, &tk)| {
            psi_t.assign(&evolve(spectrum, coeffs, tk));
        });
    psi
}

/// Compute the probability density `|ψ|²`.
pub fn probability_density<S>(psi: &Arr1<S>) -> nd::Array1<f64>
where S: nd::Data<Elem = C64>
{
    psi.mapv(|psik| psik.norm_sqr())
}

/// Compute the probability current `J = Re ψ · ∂ₓ Im ψ - Im ψ · ∂ₓ Re ψ` using
/// central differences.
///
/// The current is pinned to zero at both endpoints. A zero grid spacing is
/// treated as 1.
pub fn probability_current<S>(psi: &Arr1<S>, dx: f64) -> nd::Array1<f64>
where S: nd::Data<Elem = C64>
{
    let n = psi.len();
    let mut J: nd::Array1<f64> = nd::Array1::zeros(n);
    if n < 3 { return J; }
    let h = 2.0 * safe_denom(dx);
    J.slice_mut(nd::s![1..n - 1]).iter_mut()
        .zip(psi.windows(3))
        .for_each(|(Jk, w)| {
            let d = (w[2] - w[0]) / h;
            *Jk = w[1].re * d.im - w[1].im * d.re;
        });
    J
}

/// Compute the momentum-space amplitude
/// `φ(k_m) = Σ_j ψ(x_j) exp(-i k_m x_j) dx`
/// on the centered wavenumber grid `k_m = (m - N/2) 2π / (N dx)`.
///
/// The sum is evaluated exactly with a single FFT: shifting `k` by `N/2` steps
/// multiplies each sample by `(-1)^j`, and the offset of the grid origin
/// contributes an overall phase per wavenumber.
pub fn momentum_amplitude<S>(psi: &Arr1<S>, grid: &Grid)
    -> (nd::Array1<f64>, nd::Array1<C64>)
where S: nd::Data<Elem = C64>
{
    let n = psi.len();
    let dx = grid.dx_safe();
    let k = centered_wavenumbers(n, dx);
    let shifted: nd::Array1<C64>
        = psi.iter().enumerate()
        .map(|(j, psij)| if j % 2 == 0 { *psij } else { -*psij })
        .collect();
    let mut phi = fft(&shifted);
    let x0 = grid.min();
    phi.iter_mut().zip(&k)
        .for_each(|(phim, km)| { *phim *= dx * C64::cis(-km * x0); });
    (k, phi)
}

/// Compute the momentum-space density `|φ(k)|² / 2π` on the centered
/// wavenumber grid; see [`momentum_amplitude`].
///
/// ```
/// use qlab::{ grid::build_grid, timedep::momentum_density };
/// use num_complex::Complex64 as C64;
///
/// let grid = build_grid(-10.0, 10.0, 256).unwrap();
/// let pi_quarter = std::f64::consts::PI.powf(-0.25);
/// let psi = grid.x().mapv(|x| C64::from(pi_quarter * (-x * x / 2.0).exp()));
/// let (k, rho) = momentum_density(&psi, &grid);
/// let total: f64 = rho.sum() * (k[1] - k[0]);
/// assert!((total - 1.0).abs() < 1e-6);
/// ```
pub fn momentum_density<S>(psi: &Arr1<S>, grid: &Grid)
    -> (nd::Array1<f64>, nd::Array1<f64>)
where S: nd::Data<Elem = C64>
{
    let (k, phi) = momentum_amplitude(psi, grid);
    let rho = phi.mapv(|phim| phim.norm_sqr() / TAU);
    (k, rho)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use crate::{
        grid::build_grid,
        potential::Family,
        solve::solve_spectrum,
        utils::wf_norm_c,
    };
    use super::*;

    fn harmonic(n_states: usize) -> (Grid, Spectrum) {
        let grid = build_grid(-5.0, 5.0, 150).unwrap();
        let V = grid.map(|x| 0.5 * x * x);
        let spectrum
            = solve_spectrum(&grid, &V, Family::Harmonic, 1.0, n_states).unwrap();
        (grid, spectrum)
    }

    #[test]
    fn ground_state_at_t0() {
        let (_, spectrum) = harmonic(5);
        let psi = evolve(&spectrum, &[C64::from(1.0)], 0.0);
        let phi0 = &spectrum.ground().unwrap().wf;
        psi.iter().zip(phi0)
            .for_each(|(psik, phik)| {
                assert_abs_diff_eq!(psik.re, *phik, epsilon = 1e-14);
                assert_abs_diff_eq!(psik.im, 0.0, epsilon = 1e-14);
            });
    }

    #[test]
    fn stationary_density() {
        let (_, spectrum) = harmonic(3);
        let rho0 = probability_density(&evolve(&spectrum, &[C64::from(1.0)], 0.0));
        let rho1 = probability_density(&evolve(&spectrum, &[C64::from(1.0)], 3.7));
        rho0.iter().zip(&rho1)
            .for_each(|(a, b)| assert_abs_diff_eq!(a, b, epsilon = 1e-12));
    }

    #[test]
    fn norm_is_preserved() {
        // closed-form states are cut off at the grid edges, so their discrete
        // overlaps are only small rather than zero
        let (grid, spectrum) = harmonic(5);
        let c = InitialState::Gaussian.coefficients(spectrum.len());
        for t in [0.0, 0.4, 2.5, 11.0] {
            let psi = evolve(&spectrum, &c, t);
            assert_abs_diff_eq!(wf_norm_c(&psi, grid.dx()), 1.0, epsilon = 1e-6);
        }

        let grid = build_grid(-5.0, 5.0, 100).unwrap();
        let V = grid.map(|x| Family::FiniteWell.value(x, 3.0, 8.0));
        let spectrum = solve_spectrum(&grid, &V, Family::FiniteWell, 3.0, 5).unwrap();
        assert_eq!(spectrum.status(), crate::solve::SolveStatus::Numerical);
        for t in [0.0, 0.4, 2.5, 11.0] {
            let psi = evolve(&spectrum, &c, t);
            assert_abs_diff_eq!(wf_norm_c(&psi, grid.dx()), 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn coefficients_are_conformed() {
        let (grid, spectrum) = harmonic(2);
        // unnormalized and too long
        let c = [C64::from(3.0), C64::from(4.0), C64::from(100.0)];
        let psi = evolve(&spectrum, &c, 0.0);
        assert_abs_diff_eq!(wf_norm_c(&psi, grid.dx()), 1.0, epsilon = 1e-9);
        // all zero
        let psi = evolve(&spectrum, &[C64::zero()], 1.0);
        assert!(psi.iter().all(|psik| psik.is_zero()));
        assert_eq!(psi.len(), 150);
    }

    #[test]
    fn evolve_many_rows() {
        let (_, spectrum) = harmonic(2);
        let c = InitialState::Superposition.coefficients(2);
        let t = nd::array![0.0, 0.5, 1.0];
        let psi = evolve_many(&spectrum, &c, &t);
        assert_eq!(psi.dim(), (3, 150));
        let row = evolve(&spectrum, &c, 0.5);
        psi.row(1).iter().zip(&row)
            .for_each(|(a, b)| assert_abs_diff_eq!((a - b).norm(), 0.0));
    }

    #[test]
    fn current_vanishes_for_real_states() {
        let (grid, spectrum) = harmonic(1);
        let psi = evolve(&spectrum, &[C64::from(1.0)], 0.0);
        let J = probability_current(&psi, grid.dx());
        assert!(J.iter().all(|Jk| Jk.abs() < 1e-14));
    }

    #[test]
    fn current_of_a_plane_wave() {
        let grid = build_grid(0.0, 10.0, 1001).unwrap();
        let k0 = 2.0;
        let psi = grid.x().mapv(|x| C64::cis(k0 * x));
        let J = probability_current(&psi, grid.dx());
        assert_eq!(J[0], 0.0);
        assert_eq!(J[1000], 0.0);
        // central difference of a plane wave gives sin(k dx) / dx
        let expected = (k0 * grid.dx()).sin() / grid.dx();
        J.iter().skip(1).take(999)
            .for_each(|Jk| assert_abs_diff_eq!(*Jk, expected, epsilon = 1e-9));
    }

    #[test]
    fn ground_state_momentum_density() {
        let (grid, spectrum) = harmonic(1);
        let psi = evolve(&spectrum, &[C64::from(1.0)], 0.0);
        let (k, rho) = momentum_density(&psi, &grid);
        assert_eq!(k[75], 0.0);
        assert_abs_diff_eq!(rho[75], std::f64::consts::PI.sqrt().recip(), epsilon = 1e-3);
        let total: f64 = rho.sum() * (k[1] - k[0]);
        assert_abs_diff_eq!(total, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn momentum_of_a_boosted_packet() {
        let grid = build_grid(-12.0, 12.0, 256).unwrap();
        let k0 = 3.0;
        let psi = grid.x().mapv(|x| (-x * x / 2.0).exp() * C64::cis(k0 * x));
        let (k, rho) = momentum_density(&psi, &grid);
        let peak
            = k.iter().zip(&rho)
            .max_by(|l, r| l.1.total_cmp(r.1))
            .map(|(km, _)| *km)
            .unwrap();
        assert!((peak - k0).abs() <= k[1] - k[0]);
    }

    #[test]
    fn presets() {
        assert_eq!(InitialState::Ground.coefficients(3)[0], C64::from(1.0));
        assert!(InitialState::FirstExcited.coefficients(1).iter().all(|c| c.is_zero()));
        let c = InitialState::Superposition.coefficients(4);
        assert_abs_diff_eq!(c[1].re, std::f64::consts::FRAC_1_SQRT_2);
        assert!(c[2].is_zero());
        let c = InitialState::Gaussian.coefficients(5);
        let norm: f64 = c.iter().map(|ck| ck.norm_sqr()).sum();
        assert_abs_diff_eq!(norm, 1.0, epsilon = 1e-12);
        assert!(c[2].re > c[1].re && c[2].re > c[3].re);
        assert_eq!(InitialState::from_tag("first"), InitialState::FirstExcited);
        assert_eq!(InitialState::from_tag("???"), InitialState::Ground);
    }
}
