//! Closed-form pictures of systems beyond one dimension.
//!
//! Nothing here solves a Schrödinger equation. These are qualitative shapes
//! drawn from textbook forms, sampled on fixed grids for display next to the
//! real one-dimensional results.

use std::f64::consts::TAU;
use ndarray as nd;

/// Hydrogen-like quantum numbers `(n, l, m)`.
///
/// Constructed values always satisfy `n ≥ 1`, `0 ≤ l ≤ n - 1`, and
/// `-l ≤ m ≤ l`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct QuantumNumbers {
    n: u32,
    l: u32,
    m: i32,
}

impl QuantumNumbers {
    /// Create a new set of quantum numbers, clamping each into its allowed
    /// range in the order `n`, `l`, `m`.
    pub fn new(n: u32, l: u32, m: i32) -> Self {
        let n = n.max(1);
        let l = l.min(n - 1);
        let lm = i32::try_from(l).unwrap_or(i32::MAX);
        let m = m.clamp(-lm, lm);
        Self { n, l, m }
    }

    /// Principal quantum number.
    pub fn n(&self) -> u32 { self.n }

    /// Orbital quantum number.
    pub fn l(&self) -> u32 { self.l }

    /// Magnetic quantum number.
    pub fn m(&self) -> i32 { self.m }
}

impl Default for QuantumNumbers {
    fn default() -> Self { Self { n: 1, l: 0, m: 0 } }
}

// low-order associated Laguerre factors; higher states are drawn without one
fn laguerre_factor(n: u32, l: u32, rho: f64) -> f64 {
    match (n, l) {
        (2, 0) => 1.0 - 0.5 * rho,
        (3, 0) => 1.0 - rho + rho * rho / 6.0,
        (3, 1) => 1.0 - 0.25 * rho,
        _ => 1.0,
    }
}

/// Qualitative hydrogen radial function `r^l L(2r/n) exp(-r/n)` over 100
/// radii in `[0.1, 10.1]`.
///
/// Returns the radii and the (unnormalized) radial function.
pub fn hydrogen_radial(qn: QuantumNumbers) -> (nd::Array1<f64>, nd::Array1<f64>) {
    let n = f64::from(qn.n);
    let r: nd::Array1<f64> = nd::Array1::linspace(0.1, 10.1, 100);
    let R = r.mapv(|rk| {
        let rho = 2.0 * rk / n;
        rk.powi(qn.l as i32) * laguerre_factor(qn.n, qn.l, rho) * (-rk / n).exp()
    });
    (r, R)
}

/// Quantum dot confinement `0.5 x² + 0.1 x⁴` over 100 points in `[-5, 5]`.
pub fn quantum_dot_potential() -> (nd::Array1<f64>, nd::Array1<f64>) {
    let x: nd::Array1<f64> = nd::Array1::linspace(-5.0, 5.0, 100);
    let V = x.mapv(|xk| 0.5 * xk * xk + 0.1 * xk.powi(4));
    (x, V)
}

/// Two-dimensional harmonic oscillator ground-state profile
/// `exp(-(x² + y²) / 2)` on a 50×50 grid over `[-5, 5]²`.
///
/// The returned array is indexed `[x, y]`.
pub fn harmonic_2d_ground() -> (nd::Array1<f64>, nd::Array2<f64>) {
    let x: nd::Array1<f64> = nd::Array1::linspace(-5.0, 5.0, 50);
    let z = nd::Array2::from_shape_fn((50, 50), |(i, j)| {
        (-(x[i] * x[i] + x[j] * x[j]) / 2.0).exp()
    });
    (x, z)
}

/// Spin-up and spin-down components `cos θ` and `sin θ` over 100 angles in
/// `[0, 2π]`.
pub fn spin_components()
    -> (nd::Array1<f64>, nd::Array1<f64>, nd::Array1<f64>)
{
    let theta: nd::Array1<f64> = nd::Array1::linspace(0.0, TAU, 100);
    let up = theta.mapv(f64::cos);
    let down = theta.mapv(f64::sin);
    (theta, up, down)
}

/// Illustrative `n`×`n` density matrix with `1/2` on the diagonal and
/// `0.1 exp(-|i - j|)` off it.
pub fn illustrative_density_matrix(n: usize) -> nd::Array2<f64> {
    nd::Array2::from_shape_fn((n, n), |(i, j)| {
        if i == j { 0.5 } else { 0.1 * (-(i.abs_diff(j) as f64)).exp() }
    })
}

/// Largest matrix produced by [`illustrative_matrix_representation`].
pub const MAX_MATRIX_DIM: usize = 5;

/// Illustrative Hamiltonian matrix over the first few eigenstates: the
/// energies on the diagonal and `0.1 exp(-|i - j|)` off it, truncated to at
/// most [`MAX_MATRIX_DIM`] states.
pub fn illustrative_matrix_representation(energies: &[f64]) -> nd::Array2<f64> {
    let n = energies.len().min(MAX_MATRIX_DIM);
    nd::Array2::from_shape_fn((n, n), |(i, j)| {
        if i == j { energies[i] } else { 0.1 * (-(i.abs_diff(j) as f64)).exp() }
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use super::*;

    #[test]
    fn quantum_numbers_are_clamped() {
        let qn = QuantumNumbers::new(0, 5, -3);
        assert_eq!((qn.n(), qn.l(), qn.m()), (1, 0, 0));
        let qn = QuantumNumbers::new(3, 7, 9);
        assert_eq!((qn.n(), qn.l(), qn.m()), (3, 2, 2));
        let qn = QuantumNumbers::new(4, 1, -1);
        assert_eq!((qn.n(), qn.l(), qn.m()), (4, 1, -1));
    }

    #[test]
    fn radial_shapes() {
        let (r, R) = hydrogen_radial(QuantumNumbers::default());
        assert_eq!(r.len(), 100);
        assert_abs_diff_eq!(r[99], 10.1, epsilon = 1e-12);
        assert_abs_diff_eq!(R[0], (-0.1_f64).exp(), epsilon = 1e-12);
        assert!(R.iter().zip(R.iter().skip(1)).all(|(a, b)| b < a));

        // 2s has one radial node at r = 2
        let (r, R) = hydrogen_radial(QuantumNumbers::new(2, 0, 0));
        let sign_changes
            = R.iter().zip(R.iter().skip(1))
            .filter(|(a, b)| a.signum() != b.signum())
            .count();
        assert_eq!(sign_changes, 1);
        assert!(r.iter().zip(&R).all(|(rk, Rk)| (*rk < 2.0) == (*Rk > 0.0)));
    }

    #[test]
    fn fixed_grids() {
        let (x, V) = quantum_dot_potential();
        assert_eq!(x.len(), 100);
        assert_abs_diff_eq!(V[0], 12.5 + 62.5, epsilon = 1e-12);

        let (x, z) = harmonic_2d_ground();
        assert_eq!(z.dim(), (50, 50));
        assert_abs_diff_eq!(x[0], -5.0);
        assert_abs_diff_eq!(z[[0, 0]], (-25.0_f64).exp(), epsilon = 1e-15);
        assert_abs_diff_eq!(z[[3, 17]], z[[17, 3]]);

        let (theta, up, down) = spin_components();
        assert_abs_diff_eq!(theta[99], TAU, epsilon = 1e-12);
        assert_abs_diff_eq!(up[0], 1.0);
        assert_abs_diff_eq!(down[0], 0.0);

        let rho = illustrative_density_matrix(4);
        assert_eq!(rho, rho.t());
        assert_abs_diff_eq!(rho[[0, 1]], 0.1 * (-1.0_f64).exp());
        assert_abs_diff_eq!(rho.diag().sum(), 2.0);
    }

    #[test]
    fn matrix_representation_is_truncated() {
        let energies: Vec<f64> = (0..8).map(|n| n as f64 + 0.5).collect();
        let h = illustrative_matrix_representation(&energies);
        assert_eq!(h.dim(), (MAX_MATRIX_DIM, MAX_MATRIX_DIM));
        assert_eq!(h, h.t());
        assert_abs_diff_eq!(h[[4, 4]], 4.5);
        assert_abs_diff_eq!(h[[0, 2]], 0.1 * (-2.0_f64).exp(), epsilon = 1e-15);

        let h = illustrative_matrix_representation(&energies[..3]);
        assert_eq!(h.dim(), (3, 3));
        assert_abs_diff_eq!(h[[1, 1]], 1.5);
        assert_eq!(illustrative_matrix_representation(&[]).dim(), (0, 0));
    }
}
