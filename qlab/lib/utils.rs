//! Miscellaneous tools: discrete integrals, wavefunction normalization, and
//! Fourier transforms.
//!
//! Integrals over a grid are plain Riemann sums, `Σ f[i] dx`, which is also
//! the inner product under which computed eigenstates are normalized.

use std::f64::consts::TAU;
use ndarray::{ self as nd, Ix1 };
use num_complex::Complex64 as C64;
use rustfft as fft;
use crate::safe_denom;

/// Integrate using a left-and-right-inclusive Riemann sum.
pub fn riemann<S>(y: &nd::ArrayBase<S, Ix1>, dx: f64) -> f64
where S: nd::Data<Elem = f64>
{
    y.iter().map(|yk| yk * dx).sum()
}

/// Calculate the squared norm `Σ q[i]² dx` of a real wavefunction.
pub fn wf_norm<S>(q: &nd::ArrayBase<S, Ix1>, dx: f64) -> f64
where S: nd::Data<Elem = f64>
{
    q.iter().map(|qk| qk * qk * dx).sum()
}

/// Calculate the squared norm `Σ |q[i]|² dx` of a complex wavefunction.
pub fn wf_norm_c<S>(q: &nd::ArrayBase<S, Ix1>, dx: f64) -> f64
where S: nd::Data<Elem = C64>
{
    q.iter().map(|qk| qk.norm_sqr() * dx).sum()
}

/// Renormalize a real wavefunction in place.
///
/// A wavefunction with zero norm (or a grid with zero spacing) is left as-is
/// rather than producing NaNs.
pub fn wf_renormalize<S>(q: &mut nd::ArrayBase<S, Ix1>, dx: f64)
where S: nd::DataMut<Elem = f64>
{
    let norm = safe_denom(wf_norm(q, dx).sqrt());
    q.iter_mut().for_each(|qk| { *qk /= norm; });
}

/// Return a normalized copy of a real wavefunction.
///
/// ```
/// use ndarray as nd;
/// use qlab::utils::{ wf_norm, wf_normalized };
///
/// let q: nd::Array1<f64> = nd::array![1.0, 2.0, 2.0];
/// let qn = wf_normalized(&q, 0.5);
/// assert!((wf_norm(&qn, 0.5) - 1.0).abs() < 1e-12);
/// ```
pub fn wf_normalized<S>(q: &nd::ArrayBase<S, Ix1>, dx: f64) -> nd::Array1<f64>
where S: nd::Data<Elem = f64>
{
    let norm = safe_denom(wf_norm(q, dx).sqrt());
    q.mapv(|qk| qk / norm)
}

/// Generate the wavenumber grid `k[m] = (m - n/2) dk`, `dk = 2π / (n dx)`,
/// centered on zero.
///
/// For odd `n` the samples sit at half-integer multiples of `dk`, so the grid
/// is shifted by `-dk/2` relative to a symmetric one and omits `k = 0`.
pub fn centered_wavenumbers(n: usize, dx: f64) -> nd::Array1<f64> {
    let dk = TAU / (n as f64 * safe_denom(dx));
    (0..n).map(|m| (m as f64 - n as f64 / 2.0) * dk).collect()
}

/// Perform the one-dimensional, complex-valued FFT.
pub fn fft<S>(x: &nd::ArrayBase<S, Ix1>) -> nd::Array1<C64>
where S: nd::Data<Elem = C64>
{
    let mut buf: Vec<C64> = x.iter().copied().collect();
    let mut plan = fft::FftPlanner::new();
    let fft_plan = plan.plan_fft_forward(buf.len());
    fft_plan.process(&mut buf);
    nd::Array1::from_vec(buf)
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;
    use approx::assert_abs_diff_eq;
    use crate::grid::build_grid;
    use super::*;

    #[test]
    fn normalization_is_idempotent() {
        let grid = build_grid(-4.0, 4.0, 201).unwrap();
        let q = grid.map(|x| (x - 0.3).exp() * (-x * x).exp() + 0.2 * x);
        let q1 = wf_normalized(&q, grid.dx());
        assert_abs_diff_eq!(wf_norm(&q1, grid.dx()), 1.0, epsilon = 1e-12);
        let q2 = wf_normalized(&q1, grid.dx());
        q1.iter().zip(&q2)
            .for_each(|(a, b)| assert_abs_diff_eq!(a, b, epsilon = 1e-14));
    }

    #[test]
    fn zero_norm_is_left_alone() {
        let mut q: nd::Array1<f64> = nd::Array1::zeros(10);
        wf_renormalize(&mut q, 0.1);
        assert!(q.iter().all(|qk| *qk == 0.0));

        let q: nd::Array1<f64> = nd::array![1.0, -1.0];
        let qn = wf_normalized(&q, 0.0);
        assert_eq!(qn, q);
    }

    #[test]
    fn fft_matches_direct_sum() {
        let x: nd::Array1<C64>
            = (0..12).map(|k| C64::new(k as f64, (k * k) as f64 / 7.0)).collect();
        let f = fft(&x);
        for (m, fm) in f.iter().enumerate() {
            let direct: C64
                = x.iter().enumerate()
                .map(|(j, xj)| xj * C64::cis(-TAU * (j * m) as f64 / 12.0))
                .sum();
            assert_abs_diff_eq!((fm - direct).norm(), 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn wavenumbers_are_centered() {
        let k = centered_wavenumbers(8, 0.5);
        let dk = TAU / 4.0;
        assert_abs_diff_eq!(k[0], -4.0 * dk);
        assert_abs_diff_eq!(k[4], 0.0);
        assert_abs_diff_eq!(k[7], 3.0 * dk);

        let k = centered_wavenumbers(7, 1.0);
        let dk = TAU / 7.0;
        assert_abs_diff_eq!(k[0], -PI, epsilon = 1e-12);
        assert_abs_diff_eq!(k[3], -0.5 * dk, epsilon = 1e-12);
        assert_abs_diff_eq!(k[6], 2.5 * dk, epsilon = 1e-12);
        assert!(k.iter().all(|km| km.abs() > 0.1 * dk));
    }
}
