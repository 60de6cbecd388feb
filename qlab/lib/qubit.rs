//! Single-qubit states and gates.
//!
//! A [`Qubit`] is a pair of complex amplitudes `[α, β]` over the computational
//! basis `{|0⟩, |1⟩}`. Gates act by their 2×2 unitary matrices. States are
//! never renormalized, neither on input nor after a gate, so an unnormalized
//! input stays exactly as unnormalized as it was.

use std::{ f64::consts::FRAC_1_SQRT_2, fmt, str::FromStr };
use num_complex::Complex64 as C64;
use num_traits::{ One, Zero };
use crate::error::QubitError;

pub type QubitResult<T> = Result<T, QubitError>;

/// A two-level state `α|0⟩ + β|1⟩`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Qubit(pub [C64; 2]);

impl Default for Qubit {
    fn default() -> Self { Self::zero() }
}

/// Single-qubit gates.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Gate {
    /// `[(α + β)/√2, (α - β)/√2]`
    Hadamard,
    /// `[β, α]`
    PauliX,
    /// `[β, -α]`
    PauliY,
    /// `[α, -β]`
    PauliZ,
    /// Controlled-NOT. There is no second qubit to act on, so this is the
    /// identity.
    Cnot,
}

impl Gate {
    /// Get the gate's short name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Hadamard => "h",
            Self::PauliX => "x",
            Self::PauliY => "y",
            Self::PauliZ => "z",
            Self::Cnot => "cnot",
        }
    }
}

impl FromStr for Gate {
    type Err = QubitError;

    fn from_str(s: &str) -> QubitResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "h" | "hadamard" => Ok(Self::Hadamard),
            "x" | "paulix" | "not" => Ok(Self::PauliX),
            "y" | "pauliy" => Ok(Self::PauliY),
            "z" | "pauliz" => Ok(Self::PauliZ),
            "cnot" | "cx" => Ok(Self::Cnot),
            _ => Err(QubitError::UnknownGate(s.to_string())),
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Polar and azimuthal angles of a state on the Bloch sphere.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BlochAngles {
    /// `θ = 2 acos(min(1, |α|))`
    pub theta: f64,
    /// `φ = arg β - arg α`
    pub phi: f64,
}

impl BlochAngles {
    /// Get the Cartesian Bloch vector `(sin θ cos φ, sin θ sin φ, cos θ)`.
    pub fn vector(&self) -> [f64; 3] {
        let (st, ct) = self.theta.sin_cos();
        let (sp, cp) = self.phi.sin_cos();
        [st * cp, st * sp, ct]
    }
}

impl Qubit {
    /// Create a new state from its two amplitudes.
    pub fn new(alpha: C64, beta: C64) -> Self { Self([alpha, beta]) }

    /// `|0⟩`
    pub fn zero() -> Self { Self([C64::one(), C64::zero()]) }

    /// `|1⟩`
    pub fn one() -> Self { Self([C64::zero(), C64::one()]) }

    /// Get the `|0⟩` amplitude.
    pub fn alpha(&self) -> C64 { self.0[0] }

    /// Get the `|1⟩` amplitude.
    pub fn beta(&self) -> C64 { self.0[1] }

    /// Parse a state from text of the form `"α, β"`, where each amplitude is a
    /// real or complex literal such as `0.6`, `0.8i`, or `1+2i`.
    ///
    /// ```
    /// use num_complex::Complex64 as C64;
    /// use qlab::qubit::Qubit;
    ///
    /// let q = Qubit::parse("0.6, 0.8i").unwrap();
    /// assert_eq!(q.beta(), C64::new(0.0, 0.8));
    /// assert!(Qubit::parse("1, 0, 0").is_err());
    /// ```
    pub fn parse(s: &str) -> QubitResult<Self> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 2 { return Err(QubitError::BadLength(parts.len())); }
        let amp = |p: &str| -> QubitResult<C64> {
            let z: C64
                = p.replace(' ', "").parse()
                .map_err(|_| QubitError::BadAmplitude(p.to_string()))?;
            if z.is_finite() { Ok(z) } else { Err(QubitError::BadAmplitude(p.to_string())) }
        };
        Ok(Self([amp(parts[0])?, amp(parts[1])?]))
    }

    /// Apply a gate in place.
    pub fn apply(&mut self, gate: Gate) {
        let [a, b] = self.0;
        self.0
            = match gate {
                Gate::Hadamard => [(a + b) * FRAC_1_SQRT_2, (a - b) * FRAC_1_SQRT_2],
                Gate::PauliX => [b, a],
                Gate::PauliY => [b, -a],
                Gate::PauliZ => [a, -b],
                Gate::Cnot => [a, b],
            };
    }

    /// Like [`Self::apply`], but create a copy of `self` with the gate
    /// applied.
    pub fn applied(&self, gate: Gate) -> Self {
        let mut new = *self;
        new.apply(gate);
        new
    }

    /// Get `|α|² + |β|²`.
    pub fn norm_sqr(&self) -> f64 {
        self.0.iter().map(|z| z.norm_sqr()).sum()
    }

    /// Get `(|α|², |β|²)`.
    pub fn probabilities(&self) -> (f64, f64) {
        (self.0[0].norm_sqr(), self.0[1].norm_sqr())
    }

    /// Compute the state's Bloch sphere angles.
    pub fn bloch(&self) -> BlochAngles {
        let [a, b] = self.0;
        BlochAngles {
            theta: 2.0 * a.norm().min(1.0).acos(),
            phi: b.arg() - a.arg(),
        }
    }
}

impl FromStr for Qubit {
    type Err = QubitError;

    fn from_str(s: &str) -> QubitResult<Self> { Self::parse(s) }
}

impl fmt::Display for Qubit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.0[0], self.0[1])
    }
}

/// Apply a gate by name, returning the new state.
///
/// An unknown gate name is an error and the input state is left untouched for
/// the caller to keep.
pub fn apply_gate(state: &Qubit, gate: &str) -> QubitResult<Qubit> {
    let gate: Gate = gate.parse()?;
    Ok(state.applied(gate))
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;
    use approx::assert_abs_diff_eq;
    use super::*;

    fn assert_close(l: Qubit, r: Qubit) {
        l.0.iter().zip(&r.0)
            .for_each(|(a, b)| assert_abs_diff_eq!((a - b).norm(), 0.0, epsilon = 1e-15));
    }

    #[test]
    fn involutions() {
        let q0 = Qubit::zero();
        assert_close(q0.applied(Gate::Hadamard).applied(Gate::Hadamard), q0);
        let q = Qubit::new(C64::new(0.3, 0.1), C64::new(-0.2, 0.9));
        assert_eq!(q.applied(Gate::PauliX).applied(Gate::PauliX), q);
        assert_eq!(q.applied(Gate::PauliZ).applied(Gate::PauliZ), q);
        assert_eq!(q.applied(Gate::Cnot), q);
    }

    #[test]
    fn gate_actions() {
        let q = Qubit::new(C64::new(1.0, 0.0), C64::new(0.0, 2.0));
        assert_eq!(q.applied(Gate::PauliX).0, [C64::new(0.0, 2.0), C64::new(1.0, 0.0)]);
        assert_eq!(q.applied(Gate::PauliY).0, [C64::new(0.0, 2.0), C64::new(-1.0, 0.0)]);
        assert_eq!(q.applied(Gate::PauliZ).0, [C64::new(1.0, 0.0), C64::new(0.0, -2.0)]);
        let h = Qubit::zero().applied(Gate::Hadamard);
        assert_abs_diff_eq!(h.alpha().re, FRAC_1_SQRT_2);
        assert_abs_diff_eq!(h.beta().re, FRAC_1_SQRT_2);
    }

    #[test]
    fn unnormalized_states_stay_unnormalized() {
        let q = Qubit::new(C64::new(3.0, 0.0), C64::new(4.0, 0.0));
        let h = q.applied(Gate::Hadamard);
        assert_abs_diff_eq!(h.norm_sqr(), 25.0, epsilon = 1e-12);
    }

    #[test]
    fn parsing() {
        let q: Qubit = "1+2i, -0.5".parse().unwrap();
        assert_eq!(q.0, [C64::new(1.0, 2.0), C64::new(-0.5, 0.0)]);
        assert_eq!(Qubit::parse("1"), Err(QubitError::BadLength(1)));
        assert_eq!(Qubit::parse("1, 2, 3"), Err(QubitError::BadLength(3)));
        assert!(matches!(Qubit::parse("1, banana"), Err(QubitError::BadAmplitude(_))));
        assert!(matches!(Qubit::parse("NaN, 0"), Err(QubitError::BadAmplitude(_))));
    }

    #[test]
    fn failed_gate_keeps_state() {
        let mut state = Qubit::zero();
        match apply_gate(&state, "toffoli") {
            Ok(new) => state = new,
            Err(err) => assert_eq!(err, QubitError::UnknownGate("toffoli".into())),
        }
        assert_eq!(state, Qubit::zero());
        let state = apply_gate(&state, "X").unwrap();
        assert_eq!(state, Qubit::one());
    }

    #[test]
    fn bloch_angles() {
        let b = Qubit::zero().bloch();
        assert_abs_diff_eq!(b.theta, 0.0);
        let b = Qubit::one().bloch();
        assert_abs_diff_eq!(b.theta, PI);
        let plus_i = Qubit::new(
            C64::from(FRAC_1_SQRT_2), C64::new(0.0, FRAC_1_SQRT_2));
        let b = plus_i.bloch();
        assert_abs_diff_eq!(b.theta, PI / 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(b.phi, PI / 2.0, epsilon = 1e-12);
        let [x, y, z] = b.vector();
        assert_abs_diff_eq!(x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(y, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(z, 0.0, epsilon = 1e-12);
        // oversized |α| is clamped
        assert_eq!(Qubit::new(C64::from(2.0), C64::zero()).bloch().theta, 0.0);
    }
}
